use std::{path::PathBuf, time::Instant};

use anyhow::Result;
use chrono::Utc;
use log::{debug, error, info};
use tokio_util::sync::CancellationToken;

use crate::{
    analysis::{classify, phase_for, AngleWindow, StrokeCounter},
    config::TrackerConfig,
    geometry::joint_angle_deg,
    record::{FrameRecord, RecordWriter},
    source::PoseSource,
};

#[derive(Debug)]
pub struct SessionOutcome {
    pub session_id: String,
    pub frames: u64,
    pub strokes: u32,
    pub log_path: PathBuf,
}

/// Run one tracking session to completion. Frames are processed strictly in
/// order, one at a time; the cancel token is checked once per frame. The
/// closing log line runs on every exit path, so the operator always learns
/// where the session landed.
pub fn run_session(
    session_id: String,
    mut source: Box<dyn PoseSource + Send>,
    mut writer: RecordWriter,
    config: TrackerConfig,
    cancel: CancellationToken,
) -> Result<SessionOutcome> {
    info!(
        "session {} started: {} -> {}",
        session_id,
        source.describe(),
        writer.path().display()
    );

    let start = Instant::now();
    let mut window = AngleWindow::new(config.window_capacity);
    let mut strokes = StrokeCounter::new(config.stroke_threshold_deg);

    let mut failure = None;

    loop {
        if cancel.is_cancelled() {
            info!("session {} stopped by operator", session_id);
            break;
        }

        let observation = match source.next_frame() {
            Ok(Some(observation)) => observation,
            Ok(None) => {
                info!("pose stream exhausted, ending session {}", session_id);
                break;
            }
            Err(err) => {
                error!("session {} frame read failed: {err:?}", session_id);
                failure = Some(err);
                break;
            }
        };

        let (side, angle) = match observation.leg() {
            Some((side, [hip, knee, ankle])) => {
                (Some(side), joint_angle_deg(hip, knee, ankle))
            }
            None => (None, None),
        };

        strokes.update(angle);
        window.push(angle);

        let (p50, p95) = window.percentiles();
        let risk = classify(p95, config.overextension_deg, config.high_flexion_deg);
        let phase = phase_for(start.elapsed(), config.warmup_end(), config.main_end());

        let record = FrameRecord::new(
            epoch_seconds(),
            side,
            angle,
            p50,
            p95,
            risk,
            strokes.count(),
            phase,
        );

        if let Err(err) = writer.append(&record) {
            error!("session {} record write failed: {err:?}", session_id);
            failure = Some(err);
            break;
        }

        debug!(
            "frame {}: side={} angle={:?} p95={:?} risk={} strokes={} phase={}",
            writer.rows(),
            record.side,
            angle,
            p95,
            record.risk,
            record.stroke_count,
            record.phase
        );
    }

    // Rows were flushed as they were written; this is the guaranteed
    // cleanup/summary step shared by every exit path.
    info!(
        "session {} saved: {} frames, {} strokes -> {}",
        session_id,
        writer.rows(),
        strokes.count(),
        writer.path().display()
    );

    match failure {
        Some(err) => Err(err),
        None => Ok(SessionOutcome {
            session_id,
            frames: writer.rows(),
            strokes: strokes.count(),
            log_path: writer.path().to_path_buf(),
        }),
    }
}

fn epoch_seconds() -> f64 {
    Utc::now().timestamp_micros() as f64 / 1_000_000.0
}
