//! Error types for collection conversion

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Failures that can abort a conversion run.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// The source collection document could not be parsed. The read side
    /// yields no partial result in this case.
    #[error("malformed collection document: {0}")]
    MalformedCollection(String),

    /// The target collection document has no playlist container node to
    /// insert into. The document is left untouched.
    #[error("collection document has no playlist container node")]
    MissingContainer,

    /// A decoded path had its root stripped or was re-rooted; the removed
    /// information is unrecoverable, so re-encoding it is a caller bug.
    #[error("path '{0}' was transformed during decoding and cannot be re-encoded")]
    UnsupportedRoundTrip(String),

    /// A file could not be read or written.
    #[error("{}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ConvertError {
    /// Attach the offending path to an I/O failure.
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        ConvertError::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}
