//! Lint engine error types.

use thiserror::Error;

/// Errors raised by a lint engine.
///
/// Finding issues is not an error; these describe the engine itself failing.
#[derive(Debug, Error)]
pub enum EngineError {
    /// A plugin could not be registered.
    #[error("Failed to register plugin: {0}")]
    Plugin(String),

    /// The engine ran but did not produce a result.
    #[error("Lint engine failed: {0}")]
    Failed(String),

    /// An issue could not be turned into a message.
    #[error("Failed to render issue: {0}")]
    Render(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl EngineError {
    /// Creates a plugin registration error.
    pub fn plugin(message: impl Into<String>) -> Self {
        Self::Plugin(message.into())
    }

    /// Creates an engine failure.
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed(message.into())
    }

    /// Creates a render error.
    pub fn render(message: impl Into<String>) -> Self {
        Self::Render(message.into())
    }
}
