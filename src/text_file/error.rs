use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TextFileError {
    #[error("Failed to create {path:?}: {source}")]
    CreateFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read {path:?}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {path:?}: {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path:?} is {size} bytes, larger than the {limit} byte limit")]
    SizeLimitExceeded { path: PathBuf, size: u64, limit: u64 },
}

pub type TextFileResult<T> = Result<T, TextFileError>;
