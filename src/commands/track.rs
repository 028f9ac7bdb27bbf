use std::path::PathBuf;

use anyhow::Result;
use chrono::Local;
use clap::Args;
use log::info;
use uuid::Uuid;

use crate::{
    config::TrackerConfig,
    record::RecordWriter,
    session::SessionController,
    source::{JsonlPoseSource, PoseSource},
};

#[derive(Args)]
pub struct TrackCommand {
    /// Pose stream to consume: a JSON-lines file, or `-` for stdin
    #[arg(long, default_value = "-")]
    input: String,

    /// Session log path (defaults to sessions/session_<timestamp>.csv)
    #[arg(long)]
    output: Option<PathBuf>,

    /// Calibration overrides, JSON
    #[arg(long)]
    config: Option<PathBuf>,
}

impl TrackCommand {
    pub async fn execute(self) -> Result<()> {
        let config = match &self.config {
            Some(path) => TrackerConfig::load(path)?,
            None => TrackerConfig::default(),
        };

        // A source that cannot be opened is a fatal startup condition; the
        // session must not start.
        let source: Box<dyn PoseSource + Send> = if self.input == "-" {
            Box::new(JsonlPoseSource::stdin())
        } else {
            Box::new(JsonlPoseSource::open(self.input.as_ref())?)
        };

        let log_path = self.output.unwrap_or_else(|| {
            let stamp = Local::now().format("%Y%m%d_%H%M%S");
            PathBuf::from(&config.sessions_dir).join(format!("session_{stamp}.csv"))
        });
        let writer = RecordWriter::create(&log_path)?;
        println!("Logging session to {}", log_path.display());

        let session_id = Uuid::new_v4().to_string();
        let mut controller = SessionController::new();
        let cancel_token = controller.start(session_id, source, writer, config)?;

        // Ctrl-C is a normal termination path: cancel the token and let the
        // loop finish its current frame and clean up.
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("interrupt received, stopping session");
                cancel_token.cancel();
            }
        });

        let outcome = controller.wait().await?;
        println!(
            "Session saved to {} ({} frames, {} strokes)",
            outcome.log_path.display(),
            outcome.frames,
            outcome.strokes
        );
        Ok(())
    }
}
