//! Shared error types for the crate

use crate::core::types::TypeKey;
use thiserror::Error;

/// Main error type for adaptree operations
#[derive(Debug, Error)]
pub enum Error {
    /// A key was used that is not present in the type catalog
    #[error("unknown type `{key}` ({context})")]
    UnknownType { key: TypeKey, context: String },

    /// Catalog construction failed validation
    #[error("catalog error: {0}")]
    Catalog(String),

    /// Registry construction failed validation
    #[error("registry error: {0}")]
    Registry(String),

    /// A registered adapter failed while converting
    #[error("adapter `{from}` -> `{to}` failed: {cause}")]
    AdapterInvocation {
        from: TypeKey,
        to: TypeKey,
        cause: anyhow::Error,
    },

    /// The winning adapter produced a value of an unexpected Rust type
    #[error("adapter for `{target}` produced a value that is not a `{expected}`")]
    OutputType {
        target: TypeKey,
        expected: &'static str,
    },

    /// Generic errors with context
    #[error("{context}: {message}")]
    WithContext { context: String, message: String },

    /// Wrapped external errors
    #[error(transparent)]
    External(#[from] anyhow::Error),

    /// IO errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON errors
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// TOML errors
    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}

impl Error {
    /// Create an unknown-type error naming where the key was expected
    pub fn unknown_type(key: impl Into<TypeKey>, context: impl Into<String>) -> Self {
        Self::UnknownType {
            key: key.into(),
            context: context.into(),
        }
    }

    /// Create a catalog validation error
    pub fn catalog(message: impl Into<String>) -> Self {
        Self::Catalog(message.into())
    }

    /// Create a registry validation error
    pub fn registry(message: impl Into<String>) -> Self {
        Self::Registry(message.into())
    }

    /// Wrap an adapter failure with the registration it came from
    pub fn adapter_invocation(from: TypeKey, to: TypeKey, cause: Error) -> Self {
        Self::AdapterInvocation {
            from,
            to,
            cause: anyhow::Error::new(cause),
        }
    }

    /// Report a downcast mismatch on an adapted value
    pub fn output_type(target: TypeKey, expected: &'static str) -> Self {
        Self::OutputType { target, expected }
    }

    /// Add context to an error
    pub fn with_context(self, context: impl Into<String>) -> Self {
        Self::WithContext {
            context: context.into(),
            message: self.to_string(),
        }
    }
}

/// Result type alias using our error type
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }
}
