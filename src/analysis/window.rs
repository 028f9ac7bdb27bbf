use std::collections::VecDeque;

/// Bounded FIFO of the most recent angle samples. Undefined samples (frames
/// with no usable pose) still occupy a slot and age out like any other, so
/// sustained tracking loss shrinks the effective sample size rather than
/// freezing the statistics. That mirrors the live-dashboard behavior and is
/// deliberate.
#[derive(Debug, Clone)]
pub struct AngleWindow {
    samples: VecDeque<Option<f64>>,
    capacity: usize,
}

impl AngleWindow {
    pub fn new(capacity: usize) -> Self {
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, sample: Option<f64>) {
        if self.samples.len() == self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(sample);
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// (p50, p95) over the defined samples currently retained, or `(None,
    /// None)` when every slot is undefined.
    pub fn percentiles(&self) -> (Option<f64>, Option<f64>) {
        let mut defined: Vec<f64> = self.samples.iter().filter_map(|s| *s).collect();
        if defined.is_empty() {
            return (None, None);
        }
        defined.sort_by(|a, b| a.total_cmp(b));
        (
            Some(percentile(&defined, 50.0)),
            Some(percentile(&defined, 95.0)),
        )
    }
}

/// Linear-interpolation percentile over an already sorted slice.
fn percentile(sorted: &[f64], q: f64) -> f64 {
    debug_assert!(!sorted.is_empty());
    let rank = q / 100.0 * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    if lo == hi {
        return sorted[lo];
    }
    let frac = rank - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_window_has_no_percentiles() {
        let window = AngleWindow::new(300);
        assert_eq!(window.percentiles(), (None, None));
    }

    #[test]
    fn all_undefined_samples_have_no_percentiles() {
        let mut window = AngleWindow::new(300);
        for _ in 0..10 {
            window.push(None);
        }
        assert_eq!(window.percentiles(), (None, None));
    }

    #[test]
    fn single_sample_is_both_percentiles() {
        let mut window = AngleWindow::new(300);
        window.push(Some(142.0));
        let (p50, p95) = window.percentiles();
        assert_eq!(p50, Some(142.0));
        assert_eq!(p95, Some(142.0));
    }

    #[test]
    fn percentiles_interpolate_linearly() {
        let mut window = AngleWindow::new(300);
        for v in [10.0, 20.0, 30.0, 40.0, 50.0] {
            window.push(Some(v));
        }
        let (p50, p95) = window.percentiles();
        assert_eq!(p50, Some(30.0));
        // rank = 0.95 * 4 = 3.8 -> 40 + 0.8 * 10
        assert!((p95.unwrap() - 48.0).abs() < 1e-9);
    }

    #[test]
    fn undefined_samples_are_excluded_from_statistics() {
        let mut window = AngleWindow::new(300);
        window.push(Some(100.0));
        window.push(None);
        window.push(Some(120.0));
        let (p50, _) = window.percentiles();
        assert_eq!(p50, Some(110.0));
    }

    #[test]
    fn capacity_evicts_oldest_sample() {
        let mut window = AngleWindow::new(300);
        window.push(Some(0.0));
        for _ in 0..300 {
            window.push(Some(90.0));
        }
        assert_eq!(window.len(), 300);
        // The initial 0.0 aged out, so it no longer drags the median down.
        let (p50, p95) = window.percentiles();
        assert_eq!(p50, Some(90.0));
        assert_eq!(p95, Some(90.0));
    }

    #[test]
    fn undefined_samples_count_toward_eviction() {
        let mut window = AngleWindow::new(3);
        window.push(Some(50.0));
        window.push(None);
        window.push(None);
        window.push(None);
        assert_eq!(window.len(), 3);
        assert_eq!(window.percentiles(), (None, None));
    }
}
