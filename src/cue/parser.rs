use crate::cd::msf::timestamp_to_bytes;
use crate::cue::error::{CueResult, FileRecordError, IndexRecordError, TrackRecordError};
use crate::cue::line::{LineKind, classify, word};
use crate::cue::models::{CueSheet, FileType, TrackType};
use crate::cue::strictness::Strictness;
use crate::text_file::LineSource;
use log::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    pub filename: String,
    pub file_type: FileType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackRecord {
    pub number: u32,
    pub track_type: TrackType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexRecord {
    pub number: u32,
    pub offset: u64,
}

/// Parses `FILE "<filename>" <TYPE>`.
pub fn parse_file_record(line: &str, strictness: Strictness) -> CueResult<FileRecord> {
    let start = line.find('"').map(|i| i + 1).unwrap_or(line.len());
    let end = line[start..]
        .find('"')
        .map(|i| start + i)
        .ok_or(FileRecordError::MissingFilename)?;
    let filename = line[start..end].to_string();

    // The type is whatever follows the last quote
    let type_token = line[line.rfind('"').unwrap_or(end) + 1..].trim();
    if type_token.is_empty() {
        return Err(FileRecordError::CorruptToken.into());
    }

    let file_type = match FileType::from_token(type_token) {
        Some(file_type) => file_type,
        None => {
            strictness.report(FileRecordError::UnknownKind(type_token.to_string()).into())?;
            FileType::Unknown
        }
    };

    Ok(FileRecord {
        filename,
        file_type,
    })
}

/// Parses `  TRACK <NN> <TYPE>`.
pub fn parse_track_record(line: &str, strictness: Strictness) -> CueResult<TrackRecord> {
    let number_token = word(line, 2);
    let number = number_token
        .parse::<u32>()
        .map_err(|_| TrackRecordError::CorruptToken(number_token.to_string()))?;

    let type_token = word(line, 3);
    if type_token.is_empty() {
        return Err(TrackRecordError::CorruptToken(line.to_string()).into());
    }

    let track_type = match TrackType::from_token(type_token) {
        Some(track_type) => track_type,
        None => {
            strictness.report(TrackRecordError::UnknownKind(type_token.to_string()).into())?;
            TrackType::Unknown
        }
    };

    Ok(TrackRecord { number, track_type })
}

/// Parses `    INDEX <NN> <MM:SS:FF>`.
pub fn parse_index_record(line: &str) -> CueResult<IndexRecord> {
    let number_token = word(line, 2);
    let number = number_token
        .parse::<u32>()
        .map_err(|_| IndexRecordError::CorruptToken(number_token.to_string()))?;

    let offset = timestamp_to_bytes(word(line, 3))?;

    Ok(IndexRecord { number, offset })
}

fn read_line(sheet: &mut CueSheet, line: &str, strictness: Strictness) -> CueResult<()> {
    match classify(line, strictness)? {
        LineKind::Empty | LineKind::Invalid => {}
        LineKind::Remark => debug!("Skipping remark: {line}"),
        LineKind::File => {
            let record = parse_file_record(line, strictness)?;
            sheet.push_parsed_file(record.filename, record.file_type)?;
        }
        LineKind::Track => {
            let record = parse_track_record(line, strictness)?;
            sheet.push_parsed_track(record.number, record.track_type, strictness)?;
        }
        LineKind::Index => {
            let record = parse_index_record(line)?;
            sheet.push_index(record.number, record.offset, strictness)?;
        }
    }

    Ok(())
}

/// Builds a cue sheet from every line of `source`. Line endings must
/// already be normalised.
pub fn read_cue_sheet<S>(source: &S, strictness: Strictness) -> CueResult<CueSheet>
where
    S: LineSource + ?Sized,
{
    let mut sheet = CueSheet::new();

    for number in 1..=source.line_count() {
        let line = source.line(number).unwrap_or_default();
        read_line(&mut sheet, line, strictness).map_err(|err| err.at_line(number))?;
    }

    Ok(sheet)
}

#[cfg(test)]
pub fn parse_cue_str(text: &str, strictness: Strictness) -> CueResult<CueSheet> {
    let lines: Vec<&str> = text.lines().collect();
    read_cue_sheet(lines.as_slice(), strictness)
}
