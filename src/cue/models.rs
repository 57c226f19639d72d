use crate::cd::is_sector_aligned;
use crate::cue::error::{
    CueResult, FileRecordError, IndexRecordError, SequencingError, TrackRecordError,
};
use crate::cue::strictness::Strictness;
use log::debug;
use std::fmt::Display;

pub const MAX_TRACK_NUMBER: u32 = 99;
pub const MAX_INDEX_NUMBER: u32 = 99;

/// FILE entries in on-disc concatenation order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CueSheet {
    pub files: Vec<CueFile>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CueFile {
    pub filename: String,
    pub file_type: FileType,
    pub tracks: Vec<Track>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    pub number: u32,
    pub track_type: TrackType,
    pub indices: Vec<Index>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Index {
    pub number: u32,
    /// Byte offset into the FILE, always a multiple of the sector size
    pub offset: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    Unknown,
    Binary,
    Mp3,
}

// Indexed by the FileType discriminant
const FILE_TYPE_NAMES: [&str; 3] = ["UNKNOWN", "BINARY", "MP3"];

impl FileType {
    pub const ALL: [FileType; 3] = [FileType::Unknown, FileType::Binary, FileType::Mp3];

    pub fn as_str(self) -> &'static str {
        FILE_TYPE_NAMES[self as usize]
    }

    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|file_type| file_type.as_str() == token)
    }
}

impl Display for FileType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// AUDIO      Audio/Music (2352, 588 samples)
/// CDG        Karaoke CD+G (2448)
/// MODE1/2048 CD-ROM Mode 1 Data (cooked)
/// MODE1/2352 CD-ROM Mode 1 Data (raw)
/// MODE2/2336 CD-ROM XA Mode 2 Data (form mix)
/// MODE2/2352 CD-ROM XA Mode 2 Data (raw)
/// CDI/2336   CD-i Mode 2 Data
/// CDI/2352   CD-i Mode 2 Data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackType {
    Unknown,
    Audio,
    CdG,
    Mode1_2048,
    Mode1_2352,
    Mode2_2336,
    Mode2_2352,
    CdI2336,
    CdI2352,
}

// Indexed by the TrackType discriminant
const TRACK_TYPE_NAMES: [&str; 9] = [
    "UNKNOWN",
    "AUDIO",
    "CDG",
    "MODE1/2048",
    "MODE1/2352",
    "MODE2/2336",
    "MODE2/2352",
    "CDI/2336",
    "CDI/2352",
];

impl TrackType {
    pub const ALL: [TrackType; 9] = [
        TrackType::Unknown,
        TrackType::Audio,
        TrackType::CdG,
        TrackType::Mode1_2048,
        TrackType::Mode1_2352,
        TrackType::Mode2_2336,
        TrackType::Mode2_2352,
        TrackType::CdI2336,
        TrackType::CdI2352,
    ];

    pub fn as_str(self) -> &'static str {
        TRACK_TYPE_NAMES[self as usize]
    }

    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|track_type| track_type.as_str() == token)
    }
}

impl Display for TrackType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl CueFile {
    pub fn validate(&self, strictness: Strictness) -> CueResult<()> {
        self.validate_filename()?;

        if self.file_type == FileType::Unknown {
            strictness.report(FileRecordError::UnknownKind(self.file_type.to_string()).into())?;
        }

        Ok(())
    }

    fn validate_filename(&self) -> CueResult<()> {
        if self.filename.is_empty() {
            return Err(FileRecordError::MissingFilename.into());
        }
        Ok(())
    }
}

impl Track {
    pub fn validate(&self, strictness: Strictness) -> CueResult<()> {
        self.validate_number(strictness)?;

        if self.track_type == TrackType::Unknown {
            strictness.report(TrackRecordError::UnknownKind(self.track_type.to_string()).into())?;
        }

        Ok(())
    }

    fn validate_number(&self, strictness: Strictness) -> CueResult<()> {
        if self.number > MAX_TRACK_NUMBER {
            strictness.report(TrackRecordError::TooManyTracks(self.number).into())?;
        }
        Ok(())
    }
}

impl Index {
    pub fn validate(&self, strictness: Strictness) -> CueResult<()> {
        if self.number > MAX_INDEX_NUMBER {
            strictness.report(IndexRecordError::TooManyIndexes(self.number).into())?;
        }

        if !is_sector_aligned(self.offset) {
            return Err(IndexRecordError::SectorMisalignment(self.offset).into());
        }

        Ok(())
    }
}

impl CueSheet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.files.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn push_file(
        &mut self,
        filename: impl Into<String>,
        file_type: FileType,
        strictness: Strictness,
    ) -> CueResult<()> {
        let file = CueFile {
            filename: filename.into(),
            file_type,
            tracks: Vec::new(),
        };
        file.validate(strictness)?;

        self.append_file(file);
        Ok(())
    }

    /// [`CueSheet::push_file`] for a record whose type token was already
    /// reported while parsing.
    pub(crate) fn push_parsed_file(&mut self, filename: String, file_type: FileType) -> CueResult<()> {
        let file = CueFile {
            filename,
            file_type,
            tracks: Vec::new(),
        };
        file.validate_filename()?;

        self.append_file(file);
        Ok(())
    }

    fn append_file(&mut self, file: CueFile) {
        debug!("FILE {:?} {}", file.filename, file.file_type);
        self.files.push(file);
    }

    /// Appends a TRACK to the most recently pushed FILE.
    pub fn push_track(
        &mut self,
        number: u32,
        track_type: TrackType,
        strictness: Strictness,
    ) -> CueResult<()> {
        let file = self.current_file()?;

        let track = Track {
            number,
            track_type,
            indices: Vec::new(),
        };
        track.validate(strictness)?;

        append_track(file, track);
        Ok(())
    }

    /// [`CueSheet::push_track`] for a record whose type token was already
    /// reported while parsing.
    pub(crate) fn push_parsed_track(
        &mut self,
        number: u32,
        track_type: TrackType,
        strictness: Strictness,
    ) -> CueResult<()> {
        let file = self.current_file()?;

        let track = Track {
            number,
            track_type,
            indices: Vec::new(),
        };
        track.validate_number(strictness)?;

        append_track(file, track);
        Ok(())
    }

    fn current_file(&mut self) -> CueResult<&mut CueFile> {
        Ok(self
            .files
            .last_mut()
            .ok_or(SequencingError::TrackWithoutFile)?)
    }

    /// Appends an INDEX to the most recently pushed TRACK of the current FILE.
    pub fn push_index(&mut self, number: u32, offset: u64, strictness: Strictness) -> CueResult<()> {
        let track = self
            .files
            .last_mut()
            .and_then(|file| file.tracks.last_mut())
            .ok_or(SequencingError::IndexWithoutTrack)?;

        let index = Index { number, offset };
        index.validate(strictness)?;

        debug!("    INDEX {:02} @ {} bytes", index.number, index.offset);
        track.indices.push(index);
        Ok(())
    }
}

fn append_track(file: &mut CueFile, track: Track) {
    debug!("  TRACK {:02} {}", track.number, track.track_type);
    file.tracks.push(track);
}
