use std::fmt::Write as _;
use std::path::Path;

use anyhow::{bail, Result};

use crate::analysis::{Phase, RiskLevel};
use crate::record::FrameRecord;

const CHART_WIDTH: usize = 60;
const SPARK_LEVELS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AngleStats {
    pub mean: f64,
    pub max: f64,
    pub min: f64,
}

impl AngleStats {
    fn from_angles(angles: &[f64]) -> Option<Self> {
        if angles.is_empty() {
            return None;
        }
        let sum: f64 = angles.iter().sum();
        let max = angles.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let min = angles.iter().cloned().fold(f64::INFINITY, f64::min);
        Some(Self {
            mean: sum / angles.len() as f64,
            max,
            min,
        })
    }
}

/// Aggregates over a full session log, mirroring what the live loop emitted.
#[derive(Debug)]
pub struct SessionSummary {
    pub records: usize,
    pub duration_secs: f64,
    pub angle: Option<AngleStats>,
    pub overextension_events: usize,
    pub high_flexion_events: usize,
    pub strokes: u32,
    /// Per-phase angle stats, in session order (Warmup, Main, Cooldown);
    /// phases with no defined angles are omitted.
    pub phases: Vec<(Phase, AngleStats)>,
}

pub fn summarize(records: &[FrameRecord]) -> Result<SessionSummary> {
    if records.is_empty() {
        bail!("session log contains no records");
    }

    let defined: Vec<f64> = records.iter().filter_map(|r| r.angle()).collect();
    let duration_secs = records.last().map(|r| r.timestamp).unwrap_or(0.0)
        - records.first().map(|r| r.timestamp).unwrap_or(0.0);

    let count_risk = |level: RiskLevel| {
        records
            .iter()
            .filter(|r| r.risk == level.as_str())
            .count()
    };

    let mut phases = Vec::new();
    for phase in [Phase::Warmup, Phase::Main, Phase::Cooldown] {
        let angles: Vec<f64> = records
            .iter()
            .filter(|r| r.phase == phase.as_str())
            .filter_map(|r| r.angle())
            .collect();
        if let Some(stats) = AngleStats::from_angles(&angles) {
            phases.push((phase, stats));
        }
    }

    Ok(SessionSummary {
        records: records.len(),
        duration_secs,
        angle: AngleStats::from_angles(&defined),
        overextension_events: count_risk(RiskLevel::Overextension),
        high_flexion_events: count_risk(RiskLevel::HighFlexion),
        strokes: records.last().map(|r| r.stroke_count).unwrap_or(0),
        phases,
    })
}

/// Render the summary plus an angle-over-time chart as a Markdown document.
pub fn render_markdown(
    summary: &SessionSummary,
    records: &[FrameRecord],
    source: &Path,
) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "# Cycling Biomechanics Report");
    let _ = writeln!(out);
    let _ = writeln!(out, "## Session");
    let _ = writeln!(out);
    let _ = writeln!(out, "- File: `{}`", source.display());
    let _ = writeln!(out, "- Total records: {}", summary.records);
    let _ = writeln!(out, "- Duration: {:.1} s", summary.duration_secs);
    let _ = writeln!(out, "- Strokes: {}", summary.strokes);
    let _ = writeln!(out);

    let _ = writeln!(out, "## Knee angle");
    let _ = writeln!(out);
    let _ = writeln!(out, "| Metric | Value |");
    let _ = writeln!(out, "| --- | --- |");
    match &summary.angle {
        Some(stats) => {
            let _ = writeln!(out, "| Average knee angle | {:.1}° |", stats.mean);
            let _ = writeln!(out, "| Maximum knee angle | {:.1}° |", stats.max);
            let _ = writeln!(out, "| Minimum knee angle | {:.1}° |", stats.min);
        }
        None => {
            let _ = writeln!(out, "| Average knee angle | no tracked frames |");
        }
    }
    let _ = writeln!(
        out,
        "| Overextension risk events | {} |",
        summary.overextension_events
    );
    let _ = writeln!(
        out,
        "| High flexion risk events | {} |",
        summary.high_flexion_events
    );
    let _ = writeln!(out);

    if !summary.phases.is_empty() {
        let _ = writeln!(out, "## Phases");
        let _ = writeln!(out);
        let _ = writeln!(out, "| Phase | Mean | Max | Min |");
        let _ = writeln!(out, "| --- | --- | --- | --- |");
        for (phase, stats) in &summary.phases {
            let _ = writeln!(
                out,
                "| {} | {:.1}° | {:.1}° | {:.1}° |",
                phase.as_str(),
                stats.mean,
                stats.max,
                stats.min
            );
        }
        let _ = writeln!(out);
    }

    let angles: Vec<Option<f64>> = records.iter().map(|r| r.angle()).collect();
    if let Some(chart) = sparkline(&angles, CHART_WIDTH) {
        let _ = writeln!(out, "## Knee angle over time");
        let _ = writeln!(out);
        let _ = writeln!(out, "```");
        let _ = writeln!(out, "{chart}");
        let _ = writeln!(out, "```");
        let _ = writeln!(out);
        if let Some(stats) = &summary.angle {
            let _ = writeln!(
                out,
                "Scale: {:.1}° (bottom) to {:.1}° (top), left to right in time; gaps are untracked frames.",
                stats.min, stats.max
            );
        }
    }

    out
}

/// Bucket-averaged block-glyph chart of the angle series. Buckets with no
/// defined samples render as gaps. Returns `None` when nothing is defined.
fn sparkline(angles: &[Option<f64>], width: usize) -> Option<String> {
    let defined: Vec<f64> = angles.iter().filter_map(|a| *a).collect();
    if defined.is_empty() || width == 0 {
        return None;
    }
    let max = defined.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let min = defined.iter().cloned().fold(f64::INFINITY, f64::min);
    let span = (max - min).max(f64::EPSILON);

    let buckets = width.min(angles.len());
    let mut chart = String::with_capacity(buckets * 3);
    for b in 0..buckets {
        let lo = b * angles.len() / buckets;
        let hi = ((b + 1) * angles.len() / buckets).max(lo + 1);
        let bucket: Vec<f64> = angles[lo..hi].iter().filter_map(|a| *a).collect();
        if bucket.is_empty() {
            chart.push(' ');
            continue;
        }
        let mean = bucket.iter().sum::<f64>() / bucket.len() as f64;
        let level = ((mean - min) / span * (SPARK_LEVELS.len() - 1) as f64).round() as usize;
        chart.push(SPARK_LEVELS[level.min(SPARK_LEVELS.len() - 1)]);
    }
    Some(chart)
}
