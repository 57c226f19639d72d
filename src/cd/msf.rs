use crate::cd::{MAX_MINUTES, SECONDS_PER_MINUTE, SECTOR_SIZE, SECTORS_PER_SECOND, is_sector_aligned};
use crate::cue::error::{CueError, CueResult, IndexRecordError, TimestampError};
use std::fmt::Display;
use std::str::FromStr;

/// Minutes:Seconds:Frames position, counted from byte zero of the image.
///
/// There is no 2 second lead-in here, this is not Red Book physical
/// addressing. Frames >= 75 or seconds >= 60 parse fine but describe a
/// malformed disc address, keeping those out is up to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Msf {
    pub minutes: u8,
    pub seconds: u8,
    pub frames: u8,
}

impl Msf {
    pub fn from_bytes(bytes: u64) -> CueResult<Self> {
        if !is_sector_aligned(bytes) {
            return Err(IndexRecordError::SectorMisalignment(bytes).into());
        }

        let sectors = bytes / SECTOR_SIZE;

        let seconds = sectors / SECTORS_PER_SECOND;
        let frames = sectors % SECTORS_PER_SECOND;

        let minutes = seconds / SECONDS_PER_MINUTE;
        let seconds = seconds % SECONDS_PER_MINUTE;

        if minutes > MAX_MINUTES {
            return Err(TimestampError::MinutesOverflow(minutes).into());
        }

        Ok(Self {
            minutes: minutes as u8,
            seconds: seconds as u8,
            frames: frames as u8,
        })
    }

    pub fn to_sectors(&self) -> u64 {
        let total_seconds = self.seconds as u64 + self.minutes as u64 * SECONDS_PER_MINUTE;
        total_seconds * SECTORS_PER_SECOND + self.frames as u64
    }

    pub fn to_bytes(&self) -> u64 {
        self.to_sectors() * SECTOR_SIZE
    }
}

impl Display for Msf {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}:{:02}:{:02}", self.minutes, self.seconds, self.frames)
    }
}

impl FromStr for Msf {
    type Err = CueError;

    fn from_str(timestamp: &str) -> Result<Self, Self::Err> {
        let raw = timestamp.as_bytes();
        if raw.len() != 8 {
            return Err(TimestampError::WrongLength(timestamp.to_string()).into());
        }

        if raw[2] != b':' || raw[5] != b':' {
            return Err(TimestampError::CorruptToken(timestamp.to_string()).into());
        }

        let field = |at: usize| -> CueResult<u8> {
            let (hi, lo) = (raw[at], raw[at + 1]);
            if !hi.is_ascii_digit() || !lo.is_ascii_digit() {
                return Err(TimestampError::CorruptToken(timestamp.to_string()).into());
            }
            Ok((hi - b'0') * 10 + (lo - b'0'))
        };

        Ok(Self {
            minutes: field(0)?,
            seconds: field(3)?,
            frames: field(6)?,
        })
    }
}

/// Converts a sector aligned byte offset into an `MM:SS:FF` timestamp.
pub fn bytes_to_timestamp(bytes: u64) -> CueResult<String> {
    Ok(Msf::from_bytes(bytes)?.to_string())
}

/// Converts an `MM:SS:FF` timestamp into a byte offset.
pub fn timestamp_to_bytes(timestamp: &str) -> CueResult<u64> {
    Ok(timestamp.parse::<Msf>()?.to_bytes())
}
