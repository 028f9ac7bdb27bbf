use std::{
    fs::File,
    io::{self, BufRead, BufReader},
    path::Path,
};

use anyhow::{Context, Result};

use crate::pose::FrameObservation;

/// Blocking per-frame landmark provider. The pose model itself lives in an
/// external process; this crate only consumes its per-frame output.
pub trait PoseSource {
    /// Next frame's observation, or `None` once the source is exhausted.
    /// Blocks until a frame is available.
    fn next_frame(&mut self) -> Result<Option<FrameObservation>>;

    /// Human-readable origin for logs.
    fn describe(&self) -> String;
}

/// Reads one JSON object per line, each a `FrameObservation`. `stdin` lets a
/// pose-estimation process be piped straight in.
pub struct JsonlPoseSource {
    reader: Box<dyn BufRead + Send>,
    label: String,
    line: u64,
}

impl JsonlPoseSource {
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("failed to open pose stream {}", path.display()))?;
        Ok(Self {
            reader: Box::new(BufReader::new(file)),
            label: path.display().to_string(),
            line: 0,
        })
    }

    pub fn stdin() -> Self {
        Self {
            reader: Box::new(BufReader::new(io::stdin())),
            label: "stdin".into(),
            line: 0,
        }
    }
}

impl PoseSource for JsonlPoseSource {
    fn next_frame(&mut self) -> Result<Option<FrameObservation>> {
        let mut buf = String::new();
        loop {
            buf.clear();
            let read = self
                .reader
                .read_line(&mut buf)
                .with_context(|| format!("read failed on pose stream {}", self.label))?;
            if read == 0 {
                return Ok(None);
            }
            self.line += 1;
            let trimmed = buf.trim();
            if trimmed.is_empty() {
                continue;
            }
            let observation: FrameObservation = serde_json::from_str(trimmed)
                .with_context(|| format!("malformed frame at {}:{}", self.label, self.line))?;
            return Ok(Some(observation));
        }
    }

    fn describe(&self) -> String {
        self.label.clone()
    }
}
