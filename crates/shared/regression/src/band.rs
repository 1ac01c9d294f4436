/// Expected value and sigma boundaries at one ordinal position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SigmaBand {
    pub lower: f64,
    pub expected: f64,
    pub upper: f64,
}

impl SigmaBand {
    pub fn new(expected: f64, half_width: f64) -> Self {
        Self {
            lower: expected - half_width,
            expected,
            upper: expected + half_width,
        }
    }

    /// Inclusive on both boundaries
    pub fn contains(&self, value: f64) -> bool {
        self.lower <= value && value <= self.upper
    }

    /// Strictly above the upper boundary
    pub fn is_above(&self, value: f64) -> bool {
        value > self.upper
    }

    /// Strictly below the lower boundary
    pub fn is_below(&self, value: f64) -> bool {
        value < self.lower
    }

    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }
}
