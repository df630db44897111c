//! CLI error types.

use mrst_assemble::{AssembleError, BuildError, GenerateError};
use mrst_config::ConfigError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Assemble(#[from] AssembleError),

    #[error("{0}")]
    Generate(#[from] GenerateError),

    #[error("{0}")]
    Build(#[from] BuildError),

    #[error("{0}")]
    Validation(String),
}
