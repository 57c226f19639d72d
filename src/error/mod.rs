use crate::cue::error::CueError;
use std::path::PathBuf;
use std::result;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CueToolError {
    #[error(transparent)]
    IoError(#[from] std::io::Error),

    #[error(transparent)]
    CueError(#[from] CueError),

    #[error(transparent)]
    ProgressTemplateError(#[from] indicatif::style::TemplateError),

    #[error("The input file is not a .cue file: {0}")]
    NotACueFile(PathBuf),

    #[error("{0} already exists, use --force to overwrite")]
    OutputAlreadyExists(PathBuf),

    #[error("No files are referenced in the CUE sheet")]
    NoFileReferencedInCueSheet,

    #[error("{path} is {size} bytes which is not a whole number of 2352 byte sectors")]
    MisalignedBinary { path: PathBuf, size: u64 },

    #[error("Could not read the binary {path} referenced by the CUE sheet: {source}")]
    BinaryUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type CueToolResult<T> = result::Result<T, CueToolError>;
