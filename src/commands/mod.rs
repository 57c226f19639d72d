use crate::commands::cue::{CombineCommand, InfoCommand, RewriteCommand};
use crate::cue::CueOptions;
use crate::cue::strictness::Strictness;
use crate::text_file::DEFAULT_BYTE_LIMIT;
use clap::{Parser, Subcommand};

pub mod cue;

/// CLI for reading, rewriting and combining .cue files of disc images.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// How to treat unknown types, track or index numbers over 99 and unrecognised lines
    #[arg(long, short = 's', global = true, value_enum, default_value_t = Strictness::Warn)]
    pub strictness: Strictness,

    /// Largest .cue file in bytes that will be read
    #[arg(long, global = true, value_name = "BYTES", default_value_t = DEFAULT_BYTE_LIMIT)]
    pub byte_limit: u64,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn cue_options(&self) -> CueOptions {
        CueOptions {
            strictness: self.strictness,
            byte_limit: self.byte_limit,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    Info(InfoCommand),
    Rewrite(RewriteCommand),
    Combine(CombineCommand),
}
