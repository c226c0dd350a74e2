//! Loader error types.

use std::path::PathBuf;

use htmllint_engine::EngineError;
use thiserror::Error;

/// Errors produced by a loader invocation.
///
/// Every variant except `LintIssuesFound` fails the invocation. That one only
/// carries a finished report, which the loader emits as a warning or an error.
#[derive(Debug, Error)]
pub enum LoaderError {
    /// No configuration file could be located.
    #[error("cannot find config for {}!", start.display())]
    ConfigNotFound { start: PathBuf },

    /// A configuration file exists but could not be read.
    #[error("Failed to read config {}: {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A configuration file was read but is not a valid configuration.
    #[error("Invalid config {}: {message}", path.display())]
    ConfigParse { path: PathBuf, message: String },

    /// The lint engine failed.
    #[error(transparent)]
    Engine(#[from] EngineError),

    /// Issues were found; carries the formatted report.
    #[error("{report}")]
    LintIssuesFound { report: String },
}

/// Discriminant of a `LoaderError`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    ConfigNotFound,
    ConfigRead,
    ConfigParse,
    LintEngineFailure,
    LintIssuesFound,
}

impl LoaderError {
    /// Creates a config-not-found error for a search start.
    pub fn config_not_found(start: impl Into<PathBuf>) -> Self {
        Self::ConfigNotFound {
            start: start.into(),
        }
    }

    /// Creates a config parse error.
    pub fn config_parse(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::ConfigParse {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Wraps a formatted report.
    pub fn lint_issues(report: impl Into<String>) -> Self {
        Self::LintIssuesFound {
            report: report.into(),
        }
    }

    /// Returns the kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            LoaderError::ConfigNotFound { .. } => ErrorKind::ConfigNotFound,
            LoaderError::ConfigRead { .. } => ErrorKind::ConfigRead,
            LoaderError::ConfigParse { .. } => ErrorKind::ConfigParse,
            LoaderError::Engine(_) => ErrorKind::LintEngineFailure,
            LoaderError::LintIssuesFound { .. } => ErrorKind::LintIssuesFound,
        }
    }

    /// Returns the report if this is a `LintIssuesFound` error.
    pub fn report(&self) -> Option<&str> {
        match self {
            LoaderError::LintIssuesFound { report } => Some(report),
            _ => None,
        }
    }
}
