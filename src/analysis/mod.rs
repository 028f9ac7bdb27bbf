mod phase;
mod risk;
mod strokes;
mod window;

pub use phase::{phase_for, Phase};
pub use risk::{classify, RiskLevel};
pub use strokes::StrokeCounter;
pub use window::AngleWindow;
