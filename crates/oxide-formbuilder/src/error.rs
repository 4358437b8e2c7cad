//! Error types for form configuration.

use thiserror::Error;

/// Errors raised while building a form from external input.
///
/// Lookups and validation never produce these: an unknown field renders as
/// empty markup and failed checks land in the
/// [`ErrorCollection`](crate::ErrorCollection).
#[derive(Debug, Error)]
pub enum FormError {
    /// The form definition or submitted data was not valid JSON.
    #[error("failed to parse form configuration: {0}")]
    Config(#[from] serde_json::Error),

    /// A regex validator was declared with a pattern that does not compile.
    #[error("invalid validator pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    /// A validator was declared for a field that is not registered.
    #[error("validator declared for unknown field: {0}")]
    UnknownField(String),
}

/// Result type alias for form operations.
pub type Result<T> = std::result::Result<T, FormError>;
