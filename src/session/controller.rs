use anyhow::{bail, Context, Result};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::{config::TrackerConfig, record::RecordWriter, source::PoseSource};

use super::loop_worker::{run_session, SessionOutcome};

/// Owns the session worker task. The loop itself is synchronous and
/// frame-by-frame; it runs on the blocking pool and is stopped cooperatively
/// through the cancellation token.
pub struct SessionController {
    handle: Option<JoinHandle<Result<SessionOutcome>>>,
    cancel_token: Option<CancellationToken>,
}

impl SessionController {
    pub fn new() -> Self {
        Self {
            handle: None,
            cancel_token: None,
        }
    }

    pub fn start(
        &mut self,
        session_id: String,
        source: Box<dyn PoseSource + Send>,
        writer: RecordWriter,
        config: TrackerConfig,
    ) -> Result<CancellationToken> {
        if self.handle.is_some() {
            bail!("session already active");
        }

        let cancel_token = CancellationToken::new();
        let token_clone = cancel_token.clone();

        let handle = tokio::task::spawn_blocking(move || {
            run_session(session_id, source, writer, config, token_clone)
        });

        self.handle = Some(handle);
        self.cancel_token = Some(cancel_token.clone());
        Ok(cancel_token)
    }

    /// Wait for the session to end on its own (source exhausted or token
    /// cancelled) and return its outcome.
    pub async fn wait(&mut self) -> Result<SessionOutcome> {
        let Some(handle) = self.handle.take() else {
            bail!("no active session");
        };
        self.cancel_token = None;
        handle.await.context("session worker failed to join")?
    }

    pub fn stop(&mut self) {
        if let Some(token) = &self.cancel_token {
            token.cancel();
        }
    }
}

impl Default for SessionController {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pose::FrameObservation;

    struct EmptySource;

    impl PoseSource for EmptySource {
        fn next_frame(&mut self) -> Result<Option<FrameObservation>> {
            Ok(None)
        }

        fn describe(&self) -> String {
            "empty".into()
        }
    }

    #[tokio::test]
    async fn controller_runs_session_to_completion() {
        let dir = tempfile::tempdir().unwrap();
        let writer = RecordWriter::create(&dir.path().join("session.csv")).unwrap();

        let mut controller = SessionController::new();
        controller
            .start(
                "test".into(),
                Box::new(EmptySource),
                writer,
                TrackerConfig::default(),
            )
            .unwrap();

        let outcome = controller.wait().await.unwrap();
        assert_eq!(outcome.frames, 0);
    }

    #[tokio::test]
    async fn double_start_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let mut controller = SessionController::new();
        controller
            .start(
                "a".into(),
                Box::new(EmptySource),
                RecordWriter::create(&dir.path().join("a.csv")).unwrap(),
                TrackerConfig::default(),
            )
            .unwrap();

        let err = controller.start(
            "b".into(),
            Box::new(EmptySource),
            RecordWriter::create(&dir.path().join("b.csv")).unwrap(),
            TrackerConfig::default(),
        );
        assert!(err.is_err());

        controller.wait().await.unwrap();
    }
}
