use crate::commands::{Cli, Commands};
use crate::cue::{combine_cue, print_cue_info, rewrite_cue};
use anyhow::Result;
use clap::Parser;
use indicatif::MultiProgress;
use indicatif_log_bridge::LogWrapper;

mod cd;
mod commands;
mod cue;
mod error;
mod text_file;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let logger = env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .build();

    let level = logger.filter();
    let pb = MultiProgress::new();

    LogWrapper::new(pb.clone(), logger).try_init()?;
    log::set_max_level(level);

    let cli = Cli::parse();
    let options = cli.cue_options();

    match cli.command {
        Commands::Info(cmd) => print_cue_info(cmd, options).await?,
        Commands::Rewrite(cmd) => rewrite_cue(cmd, options).await?,
        Commands::Combine(cmd) => combine_cue(pb.clone(), cmd, options).await?,
    }

    Ok(())
}
