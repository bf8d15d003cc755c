//! Error types for alias registration and setup.

use modalias_config::ConfigError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AliasError>;

#[derive(Debug, Error)]
pub enum AliasError {
    /// An empty prefix would match every request.
    #[error("alias prefix cannot be empty")]
    EmptyPrefix,

    #[error(transparent)]
    Config(#[from] ConfigError),
}
