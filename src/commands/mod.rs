mod report;
mod track;

use anyhow::Result;
use clap::{Parser, Subcommand};

pub use report::ReportCommand;
pub use track::TrackCommand;

#[derive(Parser)]
#[command(
    name = "cyclemech",
    version,
    about = "Live knee-angle biomechanics tracking and session reports"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a live tracking session against a pose-landmark stream
    Track(TrackCommand),
    /// Generate a summary report from a logged session
    Report(ReportCommand),
}

impl Cli {
    pub async fn execute(self) -> Result<()> {
        match self.command {
            Commands::Track(cmd) => cmd.execute().await,
            Commands::Report(cmd) => cmd.execute().await,
        }
    }
}
