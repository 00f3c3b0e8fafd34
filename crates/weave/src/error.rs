//! CLI error types.

use weave_config::ConfigError;
use weave_site::{GenerateError, LoadError, TemplateError};

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Load(#[from] LoadError),

    #[error("{0}")]
    Template(#[from] TemplateError),

    #[error("{0}")]
    Generate(#[from] GenerateError),
}
