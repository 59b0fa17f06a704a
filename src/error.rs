//! Error types for the render pipeline

use thiserror::Error;

use crate::context::ContextError;

/// Boxed error used for causes crossing the host boundary
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors that can occur while rendering a directive
#[derive(Debug, Error)]
pub enum RenderError {
    /// The loader could not resolve the requested resource.
    ///
    /// Include rethrows this unchanged after logging, so the embedding
    /// render call sees the original kind.
    #[error("resource not found: '{path}'")]
    ResourceNotFound { path: String },

    /// A directive argument was neither a string literal nor a reference
    #[error("invalid #include() argument '{arg}' at {location}")]
    InvalidArgument { arg: String, location: String },

    /// Application-level runtime failure, passed through unchanged
    #[error("{0}")]
    Runtime(String),

    /// Any other failure, wrapped with its original cause attached
    #[error("{message}")]
    Processing {
        message: String,
        #[source]
        source: BoxError,
    },

    /// Context stack misuse surfaced to the embedding render call
    #[error(transparent)]
    Context(#[from] ContextError),

    /// Output sink failure
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl RenderError {
    /// Wrap an arbitrary cause into a processing error
    pub fn processing(message: impl Into<String>, source: impl Into<BoxError>) -> Self {
        RenderError::Processing {
            message: message.into(),
            source: source.into(),
        }
    }
}
