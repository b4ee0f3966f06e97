//! Theme-specific error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ThemeError {
    #[error("invalid theme JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid theme YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("failed to read themes file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

pub type ThemeResult<T> = Result<T, ThemeError>;
