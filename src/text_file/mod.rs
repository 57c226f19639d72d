use crate::text_file::error::{TextFileError, TextFileResult};
use log::{debug, warn};
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use tokio::fs;

pub mod error;

/// Default ceiling for text files loaded into memory (100 KiB).
pub const DEFAULT_BYTE_LIMIT: u64 = 102_400;

/// Read side of a line store, lines are 1-indexed.
pub trait LineSource {
    fn line_count(&self) -> usize;

    fn line(&self, number: usize) -> Option<&str>;
}

/// Write side of a line store.
pub trait LineSink {
    fn append(&mut self, line: String);
}

impl<T: AsRef<str>> LineSource for [T] {
    fn line_count(&self) -> usize {
        self.len()
    }

    fn line(&self, number: usize) -> Option<&str> {
        number
            .checked_sub(1)
            .and_then(|i| self.get(i))
            .map(AsRef::as_ref)
    }
}

impl LineSink for Vec<String> {
    fn append(&mut self, line: String) {
        self.push(line);
    }
}

/// A text file held in memory as lines.
#[derive(Debug)]
pub struct TextFile {
    path: PathBuf,
    lines: Vec<String>,
    byte_limit: u64,
    verbose: bool,
}

impl TextFile {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            lines: Vec::new(),
            byte_limit: DEFAULT_BYTE_LIMIT,
            verbose: false,
        }
    }

    pub fn set_byte_limit(&mut self, byte_limit: u64) {
        self.byte_limit = byte_limit;
    }

    pub fn set_verbose(&mut self, verbose: bool) {
        self.verbose = verbose;
    }

    /// Loads the file, replacing anything held in memory.
    pub async fn read(&mut self) -> TextFileResult<()> {
        let read_failed = |source| TextFileError::ReadFailed {
            path: self.path.clone(),
            source,
        };

        let size = fs::metadata(&self.path).await.map_err(read_failed)?.len();
        if size > self.byte_limit {
            return Err(TextFileError::SizeLimitExceeded {
                path: self.path.clone(),
                size,
                limit: self.byte_limit,
            });
        }

        let bytes = fs::read(&self.path).await.map_err(read_failed)?;
        let text = String::from_utf8_lossy(&bytes);
        if let Cow::Owned(_) = text {
            warn!("{:?} is not valid UTF-8, invalid bytes were replaced", self.path);
        }
        self.lines = text.split_terminator('\n').map(str::to_string).collect();

        if self.verbose {
            debug!("Read {} lines ({size} bytes) from {:?}", self.lines.len(), self.path);
        }

        Ok(())
    }

    /// Converts DOS line endings to Unix ones.
    pub fn normalize_line_endings(&mut self) {
        let mut converted = 0;
        for line in &mut self.lines {
            let trimmed = line.trim_end_matches('\r').len();
            if trimmed != line.len() {
                line.truncate(trimmed);
                converted += 1;
            }
        }

        if self.verbose {
            debug!("Converted {converted} DOS line endings in {:?}", self.path);
        }
    }

    /// Makes sure the file exists on disk and empties the lines in memory.
    /// An existing file keeps its content until [`TextFile::overwrite`].
    pub async fn create(&mut self) -> TextFileResult<()> {
        fs::OpenOptions::new()
            .write(true)
            .create(true)
            .open(&self.path)
            .await
            .map_err(|source| TextFileError::CreateFailed {
                path: self.path.clone(),
                source,
            })?;
        self.lines.clear();

        if self.verbose {
            debug!("Created {:?}", self.path);
        }

        Ok(())
    }

    /// Replaces the file on disk with the lines in memory.
    ///
    /// The content goes to a sibling temp file first which is then renamed
    /// over the target, so readers never see a half written file.
    pub async fn overwrite(&self) -> TextFileResult<()> {
        let write_failed = |source| TextFileError::WriteFailed {
            path: self.path.clone(),
            source,
        };

        let mut content = String::with_capacity(self.lines.iter().map(|l| l.len() + 1).sum());
        for line in &self.lines {
            content.push_str(line);
            content.push('\n');
        }

        let mut temp_name = self.path.file_name().unwrap_or_default().to_os_string();
        temp_name.push(".tmp");
        let temp_path = self.path.with_file_name(temp_name);

        let written = match fs::write(&temp_path, content).await {
            Ok(()) => fs::rename(&temp_path, &self.path).await,
            Err(err) => Err(err),
        };
        if let Err(source) = written {
            if let Err(err) = fs::remove_file(&temp_path).await {
                debug!("Could not remove {temp_path:?}: {err}");
            }
            return Err(write_failed(source));
        }

        if self.verbose {
            debug!("Wrote {} lines to {:?}", self.lines.len(), self.path);
        }

        Ok(())
    }
}

impl LineSource for TextFile {
    fn line_count(&self) -> usize {
        self.lines.len()
    }

    fn line(&self, number: usize) -> Option<&str> {
        self.lines.as_slice().line(number)
    }
}

impl LineSink for TextFile {
    fn append(&mut self, line: String) {
        self.lines.push(line);
    }
}
