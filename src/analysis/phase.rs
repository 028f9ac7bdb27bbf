use std::time::Duration;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    Warmup,
    Main,
    Cooldown,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Warmup => "Warmup",
            Phase::Main => "Main",
            Phase::Cooldown => "Cooldown",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Warmup" => Some(Phase::Warmup),
            "Main" => Some(Phase::Main),
            "Cooldown" => Some(Phase::Cooldown),
            _ => None,
        }
    }
}

/// Session phase from wall-clock time since session start. Pure and without
/// hysteresis: only elapsed time matters.
pub fn phase_for(elapsed: Duration, warmup_end: Duration, main_end: Duration) -> Phase {
    if elapsed < warmup_end {
        Phase::Warmup
    } else if elapsed < main_end {
        Phase::Main
    } else {
        Phase::Cooldown
    }
}
