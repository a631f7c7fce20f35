//! Exponential smoothing of the raw displacement

/// Recursive weighted average: `value = value * (1 - alpha) + sample * alpha`
///
/// `alpha = 1.0` passes samples through unchanged. The value starts at 0.0,
/// matching a session whose origin is the first fix.
#[derive(Debug, Clone, PartialEq)]
pub struct ExponentialSmoother {
    alpha: f64,
    value: f64,
}

impl ExponentialSmoother {
    pub fn new(alpha: f64) -> Self {
        Self { alpha, value: 0.0 }
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    /// Fold one sample in and return the new smoothed value
    pub fn update(&mut self, sample: f64) -> f64 {
        self.value = self.value * (1.0 - self.alpha) + sample * self.alpha;
        self.value
    }

    pub fn reset(&mut self) {
        self.value = 0.0;
    }
}
