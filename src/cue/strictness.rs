use crate::cue::error::{CueError, CueResult};
use clap::ValueEnum;
use log::{error, warn};

/// How recoverable problems in a cue sheet are treated.
///
/// Missing filenames, corrupt tokens, sequencing mistakes and broken
/// timestamps are always fatal and never pass through here.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Strictness {
    /// Carry on without saying anything
    Silent,
    /// Log a warning and carry on
    #[default]
    Warn,
    /// Log an error and abort
    Strict,
}

impl Strictness {
    pub fn report(self, err: CueError) -> CueResult<()> {
        match self {
            Strictness::Silent => Ok(()),
            Strictness::Warn => {
                warn!("{err}");
                Ok(())
            }
            Strictness::Strict => {
                error!("{err}");
                Err(err)
            }
        }
    }
}
