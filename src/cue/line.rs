use crate::cue::error::{CueError, CueResult};
use crate::cue::strictness::Strictness;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Empty,
    Remark,
    File,
    Track,
    Index,
    Invalid,
}

impl LineKind {
    /// Matching is on indentation sensitive substrings, first match wins:
    /// an INDEX line is recognised by its four leading spaces and a TRACK
    /// line by its two, so INDEX has to be checked first.
    pub fn of(line: &str) -> Self {
        if line.is_empty() {
            LineKind::Empty
        } else if line.contains("    INDEX") {
            LineKind::Index
        } else if line.contains("  TRACK") {
            LineKind::Track
        } else if line.contains("FILE \"") {
            LineKind::File
        } else if line.contains("REM ") {
            LineKind::Remark
        } else {
            LineKind::Invalid
        }
    }
}

/// Classifies a line, reporting unrecognised ones through `strictness`.
pub fn classify(line: &str, strictness: Strictness) -> CueResult<LineKind> {
    let kind = LineKind::of(line);
    if kind == LineKind::Invalid {
        strictness.report(CueError::UnrecognizedLine(line.to_string()))?;
    }
    Ok(kind)
}

const WORD_DELIMITERS: [char; 3] = [' ', '\t', '\r'];

/// Returns the `index`th (1-indexed, 0 is treated as 1) word of `input`, or
/// an empty string if there are not that many words.
pub fn word(input: &str, index: usize) -> &str {
    input
        .split(WORD_DELIMITERS)
        .filter(|word| !word.is_empty())
        .nth(index.max(1) - 1)
        .unwrap_or("")
}
