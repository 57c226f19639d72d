use crate::text_file::error::TextFileError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CueError {
    #[error(transparent)]
    Io(#[from] TextFileError),

    #[error("Unrecognised command in .cue file: {0:?}")]
    UnrecognizedLine(String),

    #[error(transparent)]
    InvalidFileRecord(#[from] FileRecordError),

    #[error(transparent)]
    InvalidTrackRecord(#[from] TrackRecordError),

    #[error(transparent)]
    InvalidIndexRecord(#[from] IndexRecordError),

    #[error(transparent)]
    TimestampFormat(#[from] TimestampError),

    #[error(transparent)]
    SequencingViolation(#[from] SequencingError),

    #[error("No FILE entries to combine")]
    NothingToCombine,

    #[error("Got {offsets} byte offsets for {files} FILE entries")]
    OffsetCountMismatch { files: usize, offsets: usize },

    #[error("INDEX byte offset {offset} plus file offset {base} overflows")]
    OffsetOverflow { offset: u64, base: u64 },

    #[error("line {line}: {source}")]
    AtLine {
        line: usize,
        #[source]
        source: Box<CueError>,
    },
}

impl CueError {
    /// Strips any line context and returns the underlying error.
    #[cfg(test)]
    pub fn root(&self) -> &CueError {
        match self {
            CueError::AtLine { source, .. } => source.root(),
            other => other,
        }
    }

    pub(crate) fn at_line(self, line: usize) -> Self {
        CueError::AtLine {
            line,
            source: Box::new(self),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FileRecordError {
    #[error("A FILE in the .cue file has no filename")]
    MissingFilename,

    #[error("A FILE is of unknown type: {0:?}")]
    UnknownKind(String),

    #[error("A FILE in the .cue file has no type")]
    CorruptToken,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TrackRecordError {
    #[error("TRACK {0} exceeds 99, not a standard CD")]
    TooManyTracks(u32),

    #[error("A TRACK is of unknown type: {0:?}")]
    UnknownKind(String),

    #[error("A TRACK in the .cue file is corrupt: {0:?}")]
    CorruptToken(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum IndexRecordError {
    #[error("INDEX {0} exceeds 99, not a standard CD")]
    TooManyIndexes(u32),

    #[error("{0} bytes do not align with the 2352 byte sector size, incorrect TRACK mode or corrupt image")]
    SectorMisalignment(u64),

    #[error("An INDEX in the .cue file is corrupt: {0:?}")]
    CorruptToken(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TimestampError {
    #[error("Timestamp {0:?} is not in MM:SS:FF format")]
    WrongLength(String),

    #[error("Timestamp of {0} minutes exceeds 99 minutes")]
    MinutesOverflow(u64),

    #[error("Timestamp {0:?} contains a non-numeric field")]
    CorruptToken(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SequencingError {
    #[error("Attempted to push a TRACK, but no FILE exists")]
    TrackWithoutFile,

    #[error("Attempted to push an INDEX, but no TRACK exists")]
    IndexWithoutTrack,
}

pub type CueResult<T> = Result<T, CueError>;
