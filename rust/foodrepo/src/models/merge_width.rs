use serde::{
    Deserialize,
    Serialize,
};

use crate::errors::BinningError;

/// Retention-time merge width (minutes) as exposed to users.
///
/// Restricted to `MIN..=MAX` on a `STEP` grid; the binning engine itself
/// accepts any positive width.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct MergeWidth(f64);

impl MergeWidth {
    pub const MIN: f64 = 0.05;
    pub const MAX: f64 = 1.0;
    pub const STEP: f64 = 0.05;
    pub const DEFAULT: f64 = 0.2;

    /// Validates and snaps the width to the nearest grid step.
    pub fn try_new(width: f64) -> Result<Self, BinningError> {
        // Half a step of slack so slider rounding noise is still accepted.
        let slack = Self::STEP / 2.0;
        if !width.is_finite() || width < Self::MIN - slack || width > Self::MAX + slack {
            return Err(BinningError::InvalidMergeWidth(width));
        }
        let steps = (width / Self::STEP).round();
        let snapped = (steps * Self::STEP).clamp(Self::MIN, Self::MAX);
        Ok(Self(snapped))
    }

    pub fn get(&self) -> f64 {
        self.0
    }
}

impl Default for MergeWidth {
    fn default() -> Self {
        Self(Self::DEFAULT)
    }
}

impl std::fmt::Display for MergeWidth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl TryFrom<f64> for MergeWidth {
    type Error = BinningError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::try_new(value)
    }
}

impl From<MergeWidth> for f64 {
    fn from(value: MergeWidth) -> Self {
        value.0
    }
}

impl std::str::FromStr for MergeWidth {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: f64 = s
            .trim()
            .parse()
            .map_err(|e| format!("Invalid merge width '{}': {}", s, e))?;
        Self::try_new(value).map_err(|e| e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_point_two() {
        assert_eq!(MergeWidth::default().get(), 0.2);
    }

    #[test]
    fn test_snaps_to_grid() {
        let w = MergeWidth::try_new(0.26).unwrap();
        assert!((w.get() - 0.25).abs() < 1e-12);
        let w = MergeWidth::try_new(1.01).unwrap();
        assert_eq!(w.get(), 1.0);
    }

    #[test]
    fn test_rejects_out_of_range() {
        assert!(MergeWidth::try_new(0.0).is_err());
        assert!(MergeWidth::try_new(2.0).is_err());
        assert!(MergeWidth::try_new(f64::NAN).is_err());
        assert!("abc".parse::<MergeWidth>().is_err());
    }
}
