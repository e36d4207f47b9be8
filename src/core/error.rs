//! Error taxonomy for the editing core.
//!
//! Every file-system and helper failure is caught at the operation boundary and
//! turned into one of these variants. A user declining a prompt is not an error;
//! it surfaces as a `Cancelled` outcome on the operation's own result type.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Editor core error
#[derive(Debug, Error)]
pub enum EditorError {
    /// Reading or writing a file failed
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A tab index outside `[0, len)` was requested
    #[error("tab index {index} out of range (open tabs: {len})")]
    Index { index: usize, len: usize },

    /// The explain helper failed, timed out, was cancelled or is missing
    #[error("explain helper unavailable: {0}")]
    HelperUnavailable(String),
}

impl EditorError {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        EditorError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, EditorError>;
