use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    Ok,
    Overextension,
    HighFlexion,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Ok => "OK",
            RiskLevel::Overextension => "Overextension risk",
            RiskLevel::HighFlexion => "High flexion risk",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "OK" => Some(RiskLevel::Ok),
            "Overextension risk" => Some(RiskLevel::Overextension),
            "High flexion risk" => Some(RiskLevel::HighFlexion),
            _ => None,
        }
    }
}

/// Map the rolling p95 knee angle to a coarse risk label. No p95 yet (no
/// defined samples in the window) reads as OK rather than an error state.
pub fn classify(p95: Option<f64>, overextension_deg: f64, high_flexion_deg: f64) -> RiskLevel {
    match p95 {
        None => RiskLevel::Ok,
        Some(v) if v > overextension_deg => RiskLevel::Overextension,
        Some(v) if v < high_flexion_deg => RiskLevel::HighFlexion,
        Some(_) => RiskLevel::Ok,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify_default(p95: Option<f64>) -> RiskLevel {
        classify(p95, 155.0, 145.0)
    }

    #[test]
    fn no_samples_is_ok() {
        assert_eq!(classify_default(None), RiskLevel::Ok);
    }

    #[test]
    fn boundary_values() {
        assert_eq!(classify_default(Some(155.0)), RiskLevel::Ok);
        assert_eq!(classify_default(Some(155.1)), RiskLevel::Overextension);
        assert_eq!(classify_default(Some(145.0)), RiskLevel::Ok);
        assert_eq!(classify_default(Some(144.9)), RiskLevel::HighFlexion);
    }

    #[test]
    fn labels_round_trip() {
        for level in [RiskLevel::Ok, RiskLevel::Overextension, RiskLevel::HighFlexion] {
            assert_eq!(RiskLevel::from_label(level.as_str()), Some(level));
        }
        assert_eq!(RiskLevel::from_label("nonsense"), None);
    }
}
