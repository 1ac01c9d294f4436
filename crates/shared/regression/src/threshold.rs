use serde::{Deserialize, Serialize};
use std::fmt;

/// Boundary width in residual standard deviations
///
/// Always within [`SigmaThreshold::MIN`, `SigmaThreshold::MAX`]: out-of-range
/// values are clamped rather than rejected, NaN falls back to the default.
/// Deserialization goes through the same clamp.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(from = "f64", into = "f64")]
pub struct SigmaThreshold(f64);

impl SigmaThreshold {
    pub const MIN: f64 = 1.0;
    pub const MAX: f64 = 5.0;
    pub const DEFAULT: SigmaThreshold = SigmaThreshold(2.0);

    pub fn new(k: f64) -> Self {
        if k.is_nan() {
            return Self::DEFAULT;
        }
        Self(k.clamp(Self::MIN, Self::MAX))
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

impl Default for SigmaThreshold {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl From<f64> for SigmaThreshold {
    fn from(k: f64) -> Self {
        Self::new(k)
    }
}

impl From<SigmaThreshold> for f64 {
    fn from(k: SigmaThreshold) -> Self {
        k.0
    }
}

impl fmt::Display for SigmaThreshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}σ", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamped_to_safe_range() {
        assert_eq!(SigmaThreshold::new(0.2).value(), 1.0);
        assert_eq!(SigmaThreshold::new(9.0).value(), 5.0);
        assert_eq!(SigmaThreshold::new(3.5).value(), 3.5);
        assert_eq!(SigmaThreshold::new(f64::NAN), SigmaThreshold::DEFAULT);
        assert_eq!(SigmaThreshold::new(f64::INFINITY).value(), 5.0);
    }

    #[test]
    fn test_deserialize_clamps() {
        let k: SigmaThreshold = serde_json::from_str("12.0").unwrap();
        assert_eq!(k.value(), 5.0);
        assert_eq!(serde_json::to_string(&SigmaThreshold::new(2.5)).unwrap(), "2.5");
    }

    #[test]
    fn test_display() {
        assert_eq!(SigmaThreshold::default().to_string(), "2.0σ");
    }
}
