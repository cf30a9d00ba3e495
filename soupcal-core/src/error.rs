//! Error types for soupcal.

use thiserror::Error;

/// Errors that can occur in soupcal operations.
///
/// Missing or unparseable schedule information is not an error: the pipeline
/// represents it with empty fields and dropped lines.
#[derive(Error, Debug)]
pub enum SoupCalError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unknown timezone '{0}'")]
    Timezone(String),

    #[error("Fetch error: {0}")]
    Fetch(String),

    #[error("Recurrence error: {0}")]
    Recurrence(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for soupcal operations.
pub type SoupCalResult<T> = Result<T, SoupCalError>;
