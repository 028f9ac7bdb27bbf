/// Falling-edge detector over the knee-angle signal. One stroke = the angle
/// dropping from above the threshold to at-or-below it, i.e. the flexion half
/// of a pedal cycle.
#[derive(Debug, Clone)]
pub struct StrokeCounter {
    threshold_deg: f64,
    prev_angle: Option<f64>,
    count: u32,
}

impl StrokeCounter {
    pub fn new(threshold_deg: f64) -> Self {
        Self {
            threshold_deg,
            prev_angle: None,
            count: 0,
        }
    }

    /// Feed the current frame's angle. Undefined frames leave the detector
    /// untouched: a tracking gap neither triggers a crossing nor erases a
    /// pending one.
    pub fn update(&mut self, angle: Option<f64>) {
        let Some(current) = angle else {
            return;
        };
        if let Some(prev) = self.prev_angle {
            if prev > self.threshold_deg && current <= self.threshold_deg {
                self.count += 1;
            }
        }
        self.prev_angle = Some(current);
    }

    pub fn count(&self) -> u32 {
        self.count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(angles: &[Option<f64>]) -> u32 {
        let mut counter = StrokeCounter::new(100.0);
        for &angle in angles {
            counter.update(angle);
        }
        counter.count()
    }

    #[test]
    fn counts_each_falling_crossing() {
        let angles = [110.0, 105.0, 95.0, 108.0, 96.0].map(Some);
        assert_eq!(run(&angles), 2);
    }

    #[test]
    fn staying_below_threshold_counts_once() {
        let angles = [120.0, 99.0, 98.0, 97.0].map(Some);
        assert_eq!(run(&angles), 1);
    }

    #[test]
    fn exact_threshold_triggers() {
        assert_eq!(run(&[Some(101.0), Some(100.0)]), 1);
        // ...but arriving at the threshold from below does not.
        assert_eq!(run(&[Some(99.0), Some(100.0)]), 0);
    }

    #[test]
    fn gap_preserves_pending_crossing() {
        assert_eq!(run(&[Some(110.0), None, Some(95.0)]), 1);
    }

    #[test]
    fn gap_does_not_double_count() {
        let angles = [Some(110.0), Some(95.0), None, Some(94.0)];
        assert_eq!(run(&angles), 1);
    }

    #[test]
    fn starts_at_zero_and_needs_history() {
        let mut counter = StrokeCounter::new(100.0);
        assert_eq!(counter.count(), 0);
        // First defined sample can never be a crossing.
        counter.update(Some(50.0));
        assert_eq!(counter.count(), 0);
    }
}
