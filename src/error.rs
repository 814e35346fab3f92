//! Error types for sqlshape.

use thiserror::Error;

use crate::render::SqlFeature;

/// The main error type for AST construction and rendering.
#[derive(Debug, Error)]
pub enum SqlError {
    /// A node was constructed from invalid parts (blank identifier,
    /// conflicting flags, empty required list, ...).
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The active dialect cannot express the construct being rendered.
    #[error("Dialect '{dialect}' does not support {feature} (required by {construct})")]
    UnsupportedFeature {
        feature: SqlFeature,
        construct: &'static str,
        dialect: String,
    },

    /// Bind mode could not resolve a parameter to a value or a name.
    #[error("Unresolved parameter: {0}")]
    UnresolvedParameter(String),

    /// The requested operation cannot be carried out by the dialect.
    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(String),

    /// Render options could not be loaded.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl SqlError {
    /// Create an invalid argument error.
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    /// Create an unsupported feature error.
    pub fn unsupported(
        feature: SqlFeature,
        construct: &'static str,
        dialect: impl Into<String>,
    ) -> Self {
        Self::UnsupportedFeature {
            feature,
            construct,
            dialect: dialect.into(),
        }
    }
}

impl From<toml::de::Error> for SqlError {
    fn from(err: toml::de::Error) -> Self {
        Self::Config(err.to_string())
    }
}

/// Result type alias for sqlshape operations.
pub type SqlResult<T> = Result<T, SqlError>;
