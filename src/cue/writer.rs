use crate::cd::msf::bytes_to_timestamp;
use crate::cue::error::CueResult;
use crate::cue::models::{CueFile, CueSheet, Index, Track};
use crate::cue::strictness::Strictness;
use crate::text_file::LineSink;

pub fn file_line(file: &CueFile, strictness: Strictness) -> CueResult<String> {
    file.validate(strictness)?;
    Ok(format!("FILE \"{}\" {}", file.filename, file.file_type))
}

pub fn track_line(track: &Track, strictness: Strictness) -> CueResult<String> {
    track.validate(strictness)?;
    Ok(format!("  TRACK {:02} {}", track.number, track.track_type))
}

pub fn index_line(index: &Index, strictness: Strictness) -> CueResult<String> {
    index.validate(strictness)?;
    Ok(format!(
        "    INDEX {:02} {}",
        index.number,
        bytes_to_timestamp(index.offset)?
    ))
}

/// Renders every FILE, TRACK and INDEX of `sheet` into `sink`, in order.
pub fn write_cue_sheet<S>(sheet: &CueSheet, sink: &mut S, strictness: Strictness) -> CueResult<()>
where
    S: LineSink + ?Sized,
{
    for file in &sheet.files {
        sink.append(file_line(file, strictness)?);

        for track in &file.tracks {
            sink.append(track_line(track, strictness)?);

            for index in &track.indices {
                sink.append(index_line(index, strictness)?);
            }
        }
    }

    Ok(())
}

pub fn cue_sheet_to_string(sheet: &CueSheet, strictness: Strictness) -> CueResult<String> {
    let mut lines: Vec<String> = Vec::new();
    write_cue_sheet(sheet, &mut lines, strictness)?;

    Ok(lines.iter().map(|line| format!("{line}\n")).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cue::error::{CueError, FileRecordError, TimestampError, TrackRecordError};
    use crate::cue::models::{FileType, TrackType};
    use crate::cue::parser::parse_cue_str;

    fn sample_sheet() -> CueSheet {
        let mut sheet = CueSheet::new();
        sheet.push_file("game.bin", FileType::Binary, Strictness::Strict).unwrap();
        sheet.push_track(1, TrackType::Mode2_2352, Strictness::Strict).unwrap();
        sheet.push_index(1, 0, Strictness::Strict).unwrap();
        sheet.push_track(2, TrackType::Audio, Strictness::Strict).unwrap();
        sheet.push_index(0, 352_800, Strictness::Strict).unwrap();
        sheet.push_index(1, 705_600, Strictness::Strict).unwrap();
        sheet.push_file("music.mp3", FileType::Mp3, Strictness::Strict).unwrap();
        sheet.push_track(3, TrackType::CdI2336, Strictness::Strict).unwrap();
        sheet.push_index(1, 2352 * 4501, Strictness::Strict).unwrap();
        sheet
    }

    #[test]
    fn renders_canonical_lines() {
        let text = cue_sheet_to_string(&sample_sheet(), Strictness::Strict).unwrap();
        assert_eq!(
            text,
            "FILE \"game.bin\" BINARY
  TRACK 01 MODE2/2352
    INDEX 01 00:00:00
  TRACK 02 AUDIO
    INDEX 00 00:02:00
    INDEX 01 00:04:00
FILE \"music.mp3\" MP3
  TRACK 03 CDI/2336
    INDEX 01 01:00:01
"
        );
    }

    #[test]
    fn every_track_type_renders_its_own_name() {
        for track_type in TrackType::ALL {
            let track = Track {
                number: 1,
                track_type,
                indices: Vec::new(),
            };
            let line = track_line(&track, Strictness::Silent).unwrap();
            assert_eq!(line, format!("  TRACK 01 {}", track_type.as_str()));
        }
    }

    #[test]
    fn written_sheets_parse_back_unchanged() {
        let sheet = sample_sheet();
        let text = cue_sheet_to_string(&sheet, Strictness::Strict).unwrap();
        assert_eq!(parse_cue_str(&text, Strictness::Strict).unwrap(), sheet);
    }

    #[test]
    fn out_of_range_numbers_still_render_when_allowed() {
        let track = Track {
            number: 123,
            track_type: TrackType::Audio,
            indices: Vec::new(),
        };
        assert_eq!(track_line(&track, Strictness::Warn).unwrap(), "  TRACK 123 AUDIO");
        assert!(matches!(
            track_line(&track, Strictness::Strict).unwrap_err(),
            CueError::InvalidTrackRecord(TrackRecordError::TooManyTracks(123))
        ));

        let index = Index { number: 5, offset: 0 };
        assert_eq!(index_line(&index, Strictness::Strict).unwrap(), "    INDEX 05 00:00:00");
    }

    #[test]
    fn fatal_problems_abort_rendering() {
        let file = CueFile {
            filename: String::new(),
            file_type: FileType::Binary,
            tracks: Vec::new(),
        };
        assert!(matches!(
            file_line(&file, Strictness::Silent).unwrap_err(),
            CueError::InvalidFileRecord(FileRecordError::MissingFilename)
        ));

        let index = Index {
            number: 1,
            offset: 100 * 60 * 75 * 2352,
        };
        assert!(matches!(
            index_line(&index, Strictness::Silent).unwrap_err(),
            CueError::TimestampFormat(TimestampError::MinutesOverflow(100))
        ));
    }
}
