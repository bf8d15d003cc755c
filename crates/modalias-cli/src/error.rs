//! CLI error type and conversion to miette diagnostics.

use modalias::{AliasError, HostError};
use modalias_config::ConfigError;
use miette::Report;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Alias error: {0}")]
    Alias(#[from] AliasError),

    /// The host could not find the (possibly rewritten) request.
    #[error(transparent)]
    Resolution(#[from] HostError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convert CliError to miette Report
pub fn cli_error_to_miette(err: CliError) -> Report {
    match err {
        CliError::Resolution(HostError::ModuleNotFound { request, parent }) => {
            let from = parent
                .as_deref()
                .and_then(|p| p.parent())
                .map(|p| format!("\nSearched from: {}", p.display()))
                .unwrap_or_default();
            miette::miette!(
                "Cannot find module '{}'{}\n\nHint: check the alias targets and --modules-dir entries with 'modalias check'",
                request,
                from
            )
        }
        CliError::Alias(AliasError::Config(e)) | CliError::Config(e) => {
            miette::miette!("Configuration error: {}", e)
        }
        _ => miette::miette!("{}", err),
    }
}
