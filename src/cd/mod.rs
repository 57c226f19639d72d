pub mod msf;

/// Raw CD sector size, the granularity of every byte offset in a cue sheet.
pub const SECTOR_SIZE: u64 = 2352;
pub const SECTORS_PER_SECOND: u64 = 75;
pub const SECONDS_PER_MINUTE: u64 = 60;
pub const MAX_MINUTES: u64 = 99;

pub fn is_sector_aligned(bytes: u64) -> bool {
    bytes % SECTOR_SIZE == 0
}
