use std::{fs, path::PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use crate::record::read_records;
use crate::report::{render_markdown, summarize};

#[derive(Args)]
pub struct ReportCommand {
    /// Session CSV produced by `cyclemech track`
    session: PathBuf,

    /// Write the Markdown report here instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,
}

impl ReportCommand {
    pub async fn execute(self) -> Result<()> {
        let records = read_records(&self.session)?;
        let summary = summarize(&records)?;
        let report = render_markdown(&summary, &records, &self.session);

        match self.output {
            Some(path) => {
                fs::write(&path, report)
                    .with_context(|| format!("failed to write report to {}", path.display()))?;
                println!("Report written to {}", path.display());
            }
            None => print!("{report}"),
        }
        Ok(())
    }
}
