use clap::Parser;
use std::path::PathBuf;

/// Prints the FILE, TRACK and INDEX layout of a .cue file.
#[derive(Parser, Debug, Clone, Eq, PartialEq)]
pub struct InfoCommand {
    /// Input .cue file
    #[arg(value_name = "INPUT_CUE")]
    pub input_cue: PathBuf,
}

/// Parses a .cue file and writes it back out in canonical form.
#[derive(Parser, Debug, Clone, Eq, PartialEq)]
pub struct RewriteCommand {
    /// Input .cue file
    #[arg(value_name = "INPUT_CUE")]
    pub input_cue: PathBuf,

    /// Output .cue file path, defaults to rewriting the input in place
    #[arg(value_name = "OUTPUT")]
    pub output: Option<PathBuf>,

    /// Force overwrite of the output file if it already exists
    #[arg(long, short = 'f', value_name = "FORCE", default_value_t = false)]
    pub force: bool,

    /// Print the canonical .cue to stdout instead of writing a file
    #[arg(long, default_value_t = false, conflicts_with = "output")]
    pub stdout: bool,
}

/// Combines a .cue file referencing several .bin files into a single .bin and .cue.
#[derive(Parser, Debug, Clone, Eq, PartialEq)]
#[command(
    long_about = "Combines a .cue file referencing several .bin files into a single .bin and .cue\n\nEvery INDEX is moved to where its FILE starts inside the combined .bin, TRACK and INDEX numbers are kept as they are"
)]
pub struct CombineCommand {
    /// Input .cue file referencing the .bin files to combine
    #[arg(value_name = "INPUT_CUE")]
    pub input_cue: PathBuf,

    /// Directory the combined .bin and .cue are written to
    #[arg(value_name = "OUTPUT_DIR")]
    pub output_dir: PathBuf,

    /// Base name of the combined files, defaults to the input .cue name
    #[arg(long, short = 'n', value_name = "NAME")]
    pub name: Option<String>,

    #[arg(
        value_name = "SKIP_BIN",
        long,
        short = 'S',
        help = "only writes the combined .cue file, useful when the .bin files are concatenated elsewhere",
        default_value = "false"
    )]
    pub skip_bin: bool,

    /// Force overwrite of the output files if they already exist
    #[arg(long, short = 'f', value_name = "FORCE", default_value_t = false)]
    pub force: bool,
}
