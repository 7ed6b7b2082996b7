//! Input/output helpers.
//!
//! - artifact directory read/write (`artifacts`)
//! - prediction exports (JSON) (`export`)

pub mod artifacts;
pub mod export;

pub use artifacts::*;
pub use export::*;
