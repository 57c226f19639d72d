use crate::cd::is_sector_aligned;
use crate::cd::msf::bytes_to_timestamp;
use crate::commands::cue::{CombineCommand, InfoCommand, RewriteCommand};
use crate::cue::combine::{combine_cue_files, offsets_from_sizes};
use crate::cue::error::CueResult;
use crate::cue::models::{CueFile, CueSheet};
use crate::cue::parser::read_cue_sheet;
use crate::cue::strictness::Strictness;
use crate::cue::writer::{cue_sheet_to_string, write_cue_sheet};
use crate::error::{CueToolError, CueToolResult};
use crate::text_file::{LineSink, TextFile};
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use log::{debug, info};
use std::path::{Path, PathBuf};
use tokio::fs::{self, File};
use tokio::io::{AsyncReadExt, AsyncWriteExt, BufReader, BufWriter};

pub mod combine;
pub mod error;
pub mod line;
pub mod models;
pub mod parser;
pub mod strictness;
pub mod writer;

const COPY_BUFFER_SIZE: usize = 8 * 1024 * 1024; // 8 MB buffer

/// Settings shared by every cue command.
#[derive(Debug, Clone, Copy)]
pub struct CueOptions {
    pub strictness: Strictness,
    pub byte_limit: u64,
}

pub fn validate_cue_path(path: &Path) -> CueToolResult<()> {
    let name = path.to_string_lossy();
    if !name.contains(".cue") && !name.contains(".CUE") {
        return Err(CueToolError::NotACueFile(path.to_path_buf()));
    }
    Ok(())
}

pub async fn load_cue_sheet(cue_path: &Path, options: CueOptions) -> CueToolResult<CueSheet> {
    validate_cue_path(cue_path)?;

    debug!("Parsing CUE file: {cue_path:?}");
    let mut cue_file = TextFile::new(cue_path);
    cue_file.set_byte_limit(options.byte_limit);
    cue_file.set_verbose(log::log_enabled!(log::Level::Debug));
    cue_file.read().await.map_err(error::CueError::from)?;
    cue_file.normalize_line_endings();

    Ok(read_cue_sheet(&cue_file, options.strictness)?)
}

/// Writes `sheet` to `cue_path`, rendering everything before touching the disk.
pub async fn save_cue_sheet(sheet: &CueSheet, cue_path: &Path, strictness: Strictness) -> CueToolResult<()> {
    let mut lines: Vec<String> = Vec::new();
    write_cue_sheet(sheet, &mut lines, strictness)?;

    let mut cue_file = TextFile::new(cue_path);
    cue_file.set_verbose(log::log_enabled!(log::Level::Debug));
    cue_file.create().await.map_err(error::CueError::from)?;
    for line in lines {
        cue_file.append(line);
    }
    cue_file.overwrite().await.map_err(error::CueError::from)?;

    debug!("Wrote CUE file: {cue_path:?}");
    Ok(())
}

/// Human readable listing of a FILE with its TRACKs and INDEXes.
pub fn describe_file(file: &CueFile) -> CueResult<String> {
    let mut out = format!("FILENAME: {}\t\tTYPE: {}\n", file.filename, file.file_type);
    out.push_str(&"-".repeat(58));
    out.push('\n');

    for track in &file.tracks {
        out.push_str(&format!(
            "TRACK {:02}        TYPE: {}\n",
            track.number, track.track_type
        ));

        for index in &track.indices {
            out.push_str(&format!(
                "  INDEX {:02}    BYTES: {:>9}    TIMESTAMP: {}\n",
                index.number,
                index.offset,
                bytes_to_timestamp(index.offset)?
            ));
        }

        out.push('\n');
    }

    Ok(out)
}

pub async fn print_cue_info(cmd: InfoCommand, options: CueOptions) -> CueToolResult<()> {
    let sheet = load_cue_sheet(&cmd.input_cue, options).await?;
    if sheet.is_empty() {
        return Err(CueToolError::NoFileReferencedInCueSheet);
    }

    for file in &sheet.files {
        print!("{}", describe_file(file)?);
    }

    Ok(())
}

pub async fn rewrite_cue(cmd: RewriteCommand, options: CueOptions) -> CueToolResult<()> {
    let sheet = load_cue_sheet(&cmd.input_cue, options).await?;

    if cmd.stdout {
        print!("{}", cue_sheet_to_string(&sheet, options.strictness)?);
        return Ok(());
    }

    let output = cmd.output.unwrap_or_else(|| cmd.input_cue.clone());

    if output != cmd.input_cue {
        ensure_writable(&output, cmd.force).await?;
    }

    save_cue_sheet(&sheet, &output, options.strictness).await?;

    info!("Rewrote {:?} to {:?}", cmd.input_cue, output);
    Ok(())
}

pub async fn combine_cue(pb: MultiProgress, cmd: CombineCommand, options: CueOptions) -> CueToolResult<()> {
    let sheet = load_cue_sheet(&cmd.input_cue, options).await?;
    if sheet.is_empty() {
        return Err(CueToolError::NoFileReferencedInCueSheet);
    }

    let name = match cmd.name {
        Some(name) => name,
        None => cmd
            .input_cue
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| "combined".to_string()),
    };

    fs::create_dir_all(&cmd.output_dir).await?;
    let bin_filename = format!("{name}.bin");
    let out_bin = cmd.output_dir.join(&bin_filename);
    let out_cue = cmd.output_dir.join(format!("{name}.cue"));

    ensure_writable(&out_cue, cmd.force).await?;
    if !cmd.skip_bin {
        ensure_writable(&out_bin, cmd.force).await?;
    }

    // FILE names are relative to the directory of the cue sheet
    let cue_dir = cmd.input_cue.parent().unwrap_or(Path::new("."));
    let bin_paths: Vec<PathBuf> = sheet
        .files
        .iter()
        .map(|file| cue_dir.join(&file.filename))
        .collect();

    let mut sizes = Vec::with_capacity(bin_paths.len());
    for path in &bin_paths {
        let size = fs::metadata(path)
            .await
            .map_err(|source| CueToolError::BinaryUnreadable {
                path: path.clone(),
                source,
            })?
            .len();
        if !is_sector_aligned(size) {
            return Err(CueToolError::MisalignedBinary {
                path: path.clone(),
                size,
            });
        }
        debug!("{path:?} is {size} bytes");
        sizes.push(size);
    }

    let offsets = offsets_from_sizes(&sizes);
    let mut combined = CueSheet::new();
    combine_cue_files(&mut combined, &bin_filename, &sheet, &offsets, options.strictness)?;

    if !cmd.skip_bin {
        let total = sizes.iter().sum();
        concatenate_binaries(&pb, &bin_paths, &out_bin, total).await?;
    }

    save_cue_sheet(&combined, &out_cue, options.strictness).await?;

    info!(
        "Combined {} files with {} tracks into {:?}",
        sheet.files.len(),
        combined.files[0].tracks.len(),
        out_cue
    );

    Ok(())
}

async fn ensure_writable(path: &Path, force: bool) -> CueToolResult<()> {
    if fs::try_exists(path).await? && !force {
        return Err(CueToolError::OutputAlreadyExists(path.to_path_buf()));
    }
    Ok(())
}

async fn concatenate_binaries(
    pb: &MultiProgress,
    inputs: &[PathBuf],
    output: &Path,
    total_bytes: u64,
) -> CueToolResult<()> {
    let bar = pb.add(ProgressBar::new(total_bytes));
    bar.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({eta})")?
            .progress_chars("#>-"),
    );

    let file = File::create(output).await?;
    let mut writer = BufWriter::with_capacity(COPY_BUFFER_SIZE, file);
    let mut buffer = vec![0u8; COPY_BUFFER_SIZE];

    for input in inputs {
        debug!("Appending {input:?} to {output:?}");
        let mut reader = BufReader::new(File::open(input).await?);

        loop {
            let read = reader.read(&mut buffer).await?;
            if read == 0 {
                break;
            }
            writer.write_all(&buffer[..read]).await?;
            bar.inc(read as u64);
        }
    }

    writer.flush().await?;
    bar.finish_and_clear();
    pb.remove(&bar);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cue::models::{FileType, TrackType};
    use tempfile::tempdir;

    fn options() -> CueOptions {
        CueOptions {
            strictness: Strictness::Strict,
            byte_limit: crate::text_file::DEFAULT_BYTE_LIMIT,
        }
    }

    #[test]
    fn only_cue_paths_are_accepted() {
        assert!(validate_cue_path(Path::new("game.cue")).is_ok());
        assert!(validate_cue_path(Path::new("dir/GAME.CUE")).is_ok());
        assert!(matches!(
            validate_cue_path(Path::new("game.bin")).unwrap_err(),
            CueToolError::NotACueFile(_)
        ));
    }

    #[test]
    fn describes_tracks_and_indexes() {
        let mut sheet = CueSheet::new();
        sheet.push_file("game.bin", FileType::Binary, Strictness::Strict).unwrap();
        sheet.push_track(2, TrackType::Audio, Strictness::Strict).unwrap();
        sheet.push_index(1, 352_800, Strictness::Strict).unwrap();

        let text = describe_file(&sheet.files[0]).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "FILENAME: game.bin\t\tTYPE: BINARY");
        assert_eq!(lines[2], "TRACK 02        TYPE: AUDIO");
        assert_eq!(lines[3], "  INDEX 01    BYTES:    352800    TIMESTAMP: 00:02:00");
    }

    #[tokio::test]
    async fn saved_sheets_load_back_unchanged() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("game.cue");

        let mut sheet = CueSheet::new();
        sheet.push_file("game.bin", FileType::Binary, Strictness::Strict).unwrap();
        sheet.push_track(1, TrackType::Mode1_2352, Strictness::Strict).unwrap();
        sheet.push_index(1, 0, Strictness::Strict).unwrap();

        save_cue_sheet(&sheet, &path, Strictness::Strict).await.unwrap();
        assert_eq!(load_cue_sheet(&path, options()).await.unwrap(), sheet);
    }

    #[tokio::test]
    async fn failed_save_keeps_the_previous_sheet() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("game.cue");
        let original = "FILE \"game.bin\" BINARY\n  TRACK 01 AUDIO\n    INDEX 01 00:00:00\n";
        fs::write(&path, original).await.unwrap();
        fs::create_dir(dir.path().join("game.cue.tmp")).await.unwrap();

        let mut sheet = CueSheet::new();
        sheet.push_file("other.bin", FileType::Binary, Strictness::Strict).unwrap();

        assert!(save_cue_sheet(&sheet, &path, Strictness::Strict).await.is_err());
        assert_eq!(fs::read_to_string(&path).await.unwrap(), original);
    }

    #[tokio::test]
    async fn loads_sheets_with_non_utf8_filenames() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("game.cue");
        fs::write(
            &path,
            b"FILE \"Pok\xE9mon.bin\" BINARY\n  TRACK 01 MODE2/2352\n    INDEX 01 00:00:00\n",
        )
        .await
        .unwrap();

        let sheet = load_cue_sheet(&path, options()).await.unwrap();
        assert_eq!(sheet.files[0].filename, "Pok\u{FFFD}mon.bin");
        assert_eq!(sheet.files[0].tracks[0].track_type, TrackType::Mode2_2352);
    }

    #[tokio::test]
    async fn oversized_cue_files_are_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("game.cue");
        fs::write(&path, "FILE \"game.bin\" BINARY\n").await.unwrap();

        let options = CueOptions {
            byte_limit: 4,
            ..options()
        };
        assert!(matches!(
            load_cue_sheet(&path, options).await.unwrap_err(),
            CueToolError::CueError(error::CueError::Io(
                crate::text_file::error::TextFileError::SizeLimitExceeded { .. }
            ))
        ));
    }

    #[tokio::test]
    async fn combines_binaries_and_cue_sheet() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("Game.cue");
        fs::write(
            &input,
            "FILE \"Game (Track 1).bin\" BINARY\r
  TRACK 01 MODE2/2352\r
    INDEX 01 00:00:00\r
FILE \"Game (Track 2).bin\" BINARY\r
  TRACK 02 AUDIO\r
    INDEX 00 00:00:00\r
    INDEX 01 00:00:02\r
",
        )
        .await
        .unwrap();
        fs::write(dir.path().join("Game (Track 1).bin"), vec![1u8; 2352 * 3]).await.unwrap();
        fs::write(dir.path().join("Game (Track 2).bin"), vec![2u8; 2352 * 2]).await.unwrap();

        let out_dir = dir.path().join("out");
        let cmd = CombineCommand {
            input_cue: input,
            output_dir: out_dir.clone(),
            name: None,
            skip_bin: false,
            force: false,
        };
        combine_cue(MultiProgress::new(), cmd, options()).await.unwrap();

        let bin = fs::read(out_dir.join("Game.bin")).await.unwrap();
        assert_eq!(bin.len(), 2352 * 5);
        assert!(bin[..2352 * 3].iter().all(|&b| b == 1));
        assert!(bin[2352 * 3..].iter().all(|&b| b == 2));

        let cue = fs::read_to_string(out_dir.join("Game.cue")).await.unwrap();
        assert_eq!(
            cue,
            "FILE \"Game.bin\" BINARY
  TRACK 01 MODE2/2352
    INDEX 01 00:00:00
  TRACK 02 AUDIO
    INDEX 00 00:00:03
    INDEX 01 00:00:05
"
        );
    }

    #[tokio::test]
    async fn combine_refuses_to_overwrite_without_force() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("Game.cue");
        fs::write(&input, "FILE \"a.bin\" BINARY\n  TRACK 01 AUDIO\n    INDEX 01 00:00:00\n")
            .await
            .unwrap();
        fs::write(dir.path().join("a.bin"), vec![0u8; 2352]).await.unwrap();

        let existing = dir.path().join("Game.cue");
        let cmd = CombineCommand {
            input_cue: input,
            output_dir: dir.path().to_path_buf(),
            name: None,
            skip_bin: true,
            force: false,
        };
        assert!(matches!(
            combine_cue(MultiProgress::new(), cmd, options()).await.unwrap_err(),
            CueToolError::OutputAlreadyExists(path) if path == existing
        ));
    }

    #[tokio::test]
    async fn combine_rejects_misaligned_binaries() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("Game.cue");
        fs::write(&input, "FILE \"a.bin\" BINARY\n  TRACK 01 AUDIO\n    INDEX 01 00:00:00\n")
            .await
            .unwrap();
        fs::write(dir.path().join("a.bin"), vec![0u8; 2000]).await.unwrap();

        let cmd = CombineCommand {
            input_cue: input,
            output_dir: dir.path().join("out"),
            name: Some("merged".to_string()),
            skip_bin: false,
            force: false,
        };
        assert!(matches!(
            combine_cue(MultiProgress::new(), cmd, options()).await.unwrap_err(),
            CueToolError::MisalignedBinary { size: 2000, .. }
        ));
    }

    #[tokio::test]
    async fn combine_names_the_missing_binary() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("Game.cue");
        fs::write(&input, "FILE \"missing.bin\" BINARY\n  TRACK 01 AUDIO\n    INDEX 01 00:00:00\n")
            .await
            .unwrap();

        let expected = dir.path().join("missing.bin");
        let cmd = CombineCommand {
            input_cue: input,
            output_dir: dir.path().join("out"),
            name: None,
            skip_bin: false,
            force: false,
        };
        let err = combine_cue(MultiProgress::new(), cmd, options()).await.unwrap_err();
        assert!(err.to_string().contains("missing.bin"));
        assert!(matches!(
            err,
            CueToolError::BinaryUnreadable { path, .. } if path == expected
        ));
    }
}
