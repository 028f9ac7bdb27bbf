use std::{fs, path::Path, time::Duration};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Tunable calibration for a tracking session. Defaults match the values the
/// classifier and detectors were calibrated with; override via a JSON file
/// passed to `--config`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Rolling statistics window capacity, in frames.
    pub window_capacity: usize,
    /// Falling-edge threshold for stroke detection, degrees.
    pub stroke_threshold_deg: f64,
    /// p95 above this reads as overextension risk, degrees.
    pub overextension_deg: f64,
    /// p95 below this reads as high flexion risk, degrees.
    pub high_flexion_deg: f64,
    /// Warmup phase ends at this many seconds of elapsed session time.
    pub warmup_end_secs: f64,
    /// Main phase ends at this many seconds of elapsed session time.
    pub main_end_secs: f64,
    /// Directory session CSVs are written into when no explicit output path
    /// is given.
    pub sessions_dir: String,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            window_capacity: 300,
            stroke_threshold_deg: 100.0,
            overextension_deg: 155.0,
            high_flexion_deg: 145.0,
            warmup_end_secs: 10.0,
            main_end_secs: 25.0,
            sessions_dir: "sessions".into(),
        }
    }
}

impl TrackerConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read config from {}", path.display()))?;
        serde_json::from_str(&contents)
            .with_context(|| format!("invalid config in {}", path.display()))
    }

    pub fn warmup_end(&self) -> Duration {
        Duration::from_secs_f64(self.warmup_end_secs)
    }

    pub fn main_end(&self) -> Duration {
        Duration::from_secs_f64(self.main_end_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_match_calibration() {
        let config = TrackerConfig::default();
        assert_eq!(config.window_capacity, 300);
        assert_eq!(config.stroke_threshold_deg, 100.0);
        assert_eq!(config.overextension_deg, 155.0);
        assert_eq!(config.high_flexion_deg, 145.0);
        assert_eq!(config.warmup_end_secs, 10.0);
        assert_eq!(config.main_end_secs, 25.0);
    }

    #[test]
    fn partial_config_file_falls_back_to_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "stroke_threshold_deg": 95.0 }}"#).unwrap();
        let config = TrackerConfig::load(file.path()).unwrap();
        assert_eq!(config.stroke_threshold_deg, 95.0);
        assert_eq!(config.window_capacity, 300);
    }

    #[test]
    fn missing_config_file_is_an_error() {
        assert!(TrackerConfig::load(Path::new("/nonexistent/config.json")).is_err());
    }
}
