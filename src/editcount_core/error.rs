use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EditCountError {
    // Configuration errors
    #[error("Path not found: {0}")]
    PathNotFound(PathBuf),

    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("Argument error: {0}")]
    Argument(String),

    // Traversal errors
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Directory walker error: {0}")]
    Walkdir(#[from] walkdir::Error),

    // Ledger errors
    #[error("Malformed ledger {path}: {source}")]
    LedgerParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Failed to persist {path}: {source}")]
    Persist {
        path: PathBuf,
        #[source]
        source: tempfile::PersistError,
    },
}

impl EditCountError {
    /// Attach a path to an I/O error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// True for errors caused by bad input paths rather than the traversal itself.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            Self::PathNotFound(_) | Self::NotADirectory(_) | Self::Argument(_)
        )
    }
}

/// Result type for editcount operations.
pub type Result<T> = std::result::Result<T, EditCountError>;
