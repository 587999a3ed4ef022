//! Shared error types for the application

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for testgap operations
#[derive(Debug, Error)]
pub enum Error {
    /// An input source could not be read
    #[error("Could not load {path}: {source}")]
    LoadFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A declared class name has no matching class or module
    #[error("Could not figure out how to get {name}")]
    UnresolvedClass { name: String },

    /// Parsing errors
    #[error("Parse error in {path}: {message}")]
    Parse { path: PathBuf, message: String },

    /// Configuration errors
    #[error("Configuration error in {path}: {message}")]
    Config { path: PathBuf, message: String },

    /// The interpreter used for eval mode could not be run
    #[error("Interpreter error: {message}")]
    Interpreter { message: String },

    /// Generic errors with context
    #[error("{context}: {message}")]
    WithContext { context: String, message: String },

    /// IO errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Pattern errors
    #[error(transparent)]
    Pattern(#[from] glob::PatternError),
}

impl Error {
    /// Create a load failure for an input path
    pub fn load_failure(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::LoadFailure {
            path: path.into(),
            source,
        }
    }

    pub fn unresolved(name: impl Into<String>) -> Self {
        Self::UnresolvedClass { name: name.into() }
    }

    /// Create a parse error for a source path
    pub fn parse(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Parse {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn config(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Config {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn interpreter(message: impl Into<String>) -> Self {
        Self::Interpreter {
            message: message.into(),
        }
    }

    /// Add context to an error
    pub fn with_context(self, context: impl Into<String>) -> Self {
        Self::WithContext {
            context: context.into(),
            message: self.to_string(),
        }
    }

    /// Whether the pipeline may skip the failing item and keep going
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::LoadFailure { .. } | Self::UnresolvedClass { .. } | Self::Parse { .. }
        )
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
