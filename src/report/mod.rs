//! Reporting utilities: currency formatting and terminal tables.

pub mod format;

pub use format::*;
