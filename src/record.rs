use std::{
    fs::{self, File},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::analysis::{Phase, RiskLevel};
use crate::pose::Side;

/// One row of the session log. Undefined numerics are serialized as `NaN` so
/// the flat CSV keeps one row per frame regardless of tracking quality.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameRecord {
    /// Seconds since the Unix epoch.
    pub timestamp: f64,
    pub side: String,
    pub angle_deg: f64,
    pub p50: f64,
    pub p95: f64,
    pub risk: String,
    pub stroke_count: u32,
    pub phase: String,
}

impl FrameRecord {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        timestamp: f64,
        side: Option<Side>,
        angle_deg: Option<f64>,
        p50: Option<f64>,
        p95: Option<f64>,
        risk: RiskLevel,
        stroke_count: u32,
        phase: Phase,
    ) -> Self {
        Self {
            timestamp,
            side: side.map(|s| s.as_str().to_string()).unwrap_or_else(|| "unknown".into()),
            angle_deg: angle_deg.unwrap_or(f64::NAN),
            p50: p50.unwrap_or(f64::NAN),
            p95: p95.unwrap_or(f64::NAN),
            risk: risk.as_str().into(),
            stroke_count,
            phase: phase.as_str().into(),
        }
    }

    pub fn angle(&self) -> Option<f64> {
        defined(self.angle_deg)
    }
}

fn defined(value: f64) -> Option<f64> {
    (!value.is_nan()).then_some(value)
}

/// Append-only CSV sink for frame records. Every row is flushed before the
/// next frame is processed so an abrupt termination loses at most the row in
/// flight.
pub struct RecordWriter {
    writer: csv::Writer<File>,
    path: PathBuf,
    rows: u64,
}

impl RecordWriter {
    pub fn create(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).with_context(|| {
                    format!("failed to create session directory {}", parent.display())
                })?;
            }
        }
        let file = File::create(path)
            .with_context(|| format!("failed to create session log {}", path.display()))?;
        Ok(Self {
            writer: csv::Writer::from_writer(file),
            path: path.to_path_buf(),
            rows: 0,
        })
    }

    pub fn append(&mut self, record: &FrameRecord) -> Result<()> {
        self.writer
            .serialize(record)
            .with_context(|| format!("failed to write record to {}", self.path.display()))?;
        self.writer
            .flush()
            .with_context(|| format!("failed to flush {}", self.path.display()))?;
        self.rows += 1;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn rows(&self) -> u64 {
        self.rows
    }
}

/// Load a whole session log back into memory for reporting.
pub fn read_records(path: &Path) -> Result<Vec<FrameRecord>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("failed to open session log {}", path.display()))?;
    let mut records = Vec::new();
    for row in reader.deserialize() {
        let record: FrameRecord =
            row.with_context(|| format!("malformed row in {}", path.display()))?;
        records.push(record);
    }
    Ok(records)
}
