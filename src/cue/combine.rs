use crate::cue::error::{CueError, CueResult};
use crate::cue::models::CueSheet;
use crate::cue::strictness::Strictness;
use log::{debug, warn};

/// Start offsets of each binary once they are concatenated in order.
pub fn offsets_from_sizes(sizes: &[u64]) -> Vec<u64> {
    sizes
        .iter()
        .scan(0u64, |next, size| {
            let start = *next;
            *next += size;
            Some(start)
        })
        .collect()
}

/// Merges every FILE of `source` into a single FILE named `output_filename`
/// in `combined`, which is emptied first.
///
/// `offsets[i]` is where the data of `source.files[i]` starts in the merged
/// binary and is added to each of its INDEX offsets. Track and index numbers
/// are copied as they are, duplicates across source files are kept. The
/// merged FILE takes the type of the first source FILE.
pub fn combine_cue_files(
    combined: &mut CueSheet,
    output_filename: &str,
    source: &CueSheet,
    offsets: &[u64],
    strictness: Strictness,
) -> CueResult<()> {
    combined.clear();

    let first = source.files.first().ok_or(CueError::NothingToCombine)?;
    if offsets.len() != source.files.len() {
        return Err(CueError::OffsetCountMismatch {
            files: source.files.len(),
            offsets: offsets.len(),
        });
    }

    for file in source.files.iter().filter(|f| f.file_type != first.file_type) {
        warn!(
            "{:?} is {} but the combined file will be {}",
            file.filename, file.file_type, first.file_type
        );
    }

    combined.push_file(output_filename, first.file_type, strictness)?;

    for (file, &base) in source.files.iter().zip(offsets) {
        debug!("Combining {:?} at byte {base}", file.filename);

        for track in &file.tracks {
            combined.push_track(track.number, track.track_type, strictness)?;

            for index in &track.indices {
                let offset = index
                    .offset
                    .checked_add(base)
                    .ok_or(CueError::OffsetOverflow {
                        offset: index.offset,
                        base,
                    })?;
                combined.push_index(index.number, offset, strictness)?;
            }
        }
    }

    Ok(())
}
