//! `salary-predict` library crate.
//!
//! The binary (`salary`) is a thin wrapper around this library so that:
//!
//! - prediction logic is testable without spawning processes or a terminal
//! - the TUI and the one-shot commands share one predictor
//! - code stays easy to navigate as the project grows

pub mod app;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod io;
pub mod logging;
pub mod models;
pub mod report;
pub mod tui;
