//! modalias CLI: inspect module alias configurations.
//!
//! - [`cli`] - argument definitions
//! - [`commands`] - command implementations
//! - [`error`] - error type and diagnostics
//! - [`logger`] - tracing setup

pub mod cli;
pub mod commands;
pub mod error;
pub mod logger;
pub mod ui;
