/// Convert a fraction to a whole percentage, clamped to `0..=100`.
pub fn clamp_progress(fraction: f64) -> u8 {
    if fraction.is_nan() {
        return 0;
    }
    (fraction.clamp(0.0, 1.0) * 100.0).round() as u8
}

/// Monotonic download percentage for one URL.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadProgress {
    percent: u8,
}

impl LoadProgress {
    pub fn percent(&self) -> u8 {
        self.percent
    }

    /// Record a new fraction. Returns the percentage only if it went up.
    pub fn advance(&mut self, fraction: f64) -> Option<u8> {
        let next = clamp_progress(fraction);
        if next > self.percent {
            self.percent = next;
            Some(next)
        } else {
            None
        }
    }

    pub fn reset(&mut self) {
        self.percent = 0;
    }
}
