//! Exposure increment granularity and the exposure legs it applies to.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ExposureError;

/// Fineness of the discretized stops a value table models.
///
/// A calculator is bound to exactly one granularity for its whole lifetime.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    /// One-third stop increments (most camera dials).
    #[default]
    Third,
    /// Half stop increments.
    Half,
    /// Full stop increments.
    Full,
}

impl Granularity {
    /// Size of one table step, in full stops.
    pub const fn step(self) -> f64 {
        match self {
            Self::Third => 1.0 / 3.0,
            Self::Half => 0.5,
            Self::Full => 1.0,
        }
    }

    /// Short label used in failure messages.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Third => "⅓",
            Self::Half => "½",
            Self::Full => "Full",
        }
    }

    /// Every granularity, finest first.
    pub fn all() -> &'static [Self] {
        const ALL: [Granularity; 3] = [Granularity::Third, Granularity::Half, Granularity::Full];
        &ALL
    }

    pub(crate) const fn ordinal(self) -> usize {
        match self {
            Self::Third => 0,
            Self::Half => 1,
            Self::Full => 2,
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Granularity {
    type Err = ExposureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "third" | "thirds" | "⅓" | "1/3" => Ok(Self::Third),
            "half" | "halves" | "½" | "1/2" => Ok(Self::Half),
            "full" | "1" => Ok(Self::Full),
            _ => Err(ExposureError::UnknownGranularity(s.to_string())),
        }
    }
}

/// One leg of the exposure triangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    /// Light sensitivity (ISO).
    Sensitivity,
    /// Lens aperture (f-number).
    Aperture,
    /// Shutter duration.
    Shutter,
}

impl Axis {
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Sensitivity => "ISO",
            Self::Aperture => "aperture",
            Self::Shutter => "shutter",
        }
    }

    pub fn all() -> &'static [Self] {
        const ALL: [Axis; 3] = [Axis::Sensitivity, Axis::Aperture, Axis::Shutter];
        &ALL
    }

    pub(crate) const fn ordinal(self) -> usize {
        match self {
            Self::Sensitivity => 0,
            Self::Aperture => 1,
            Self::Shutter => 2,
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_sizes() {
        assert!((Granularity::Third.step() * 3.0 - 1.0).abs() < 1e-12);
        assert_eq!(Granularity::Half.step(), 0.5);
        assert_eq!(Granularity::Full.step(), 1.0);
    }

    #[test]
    fn test_parse_accepts_names_and_labels() {
        assert_eq!("thirds".parse::<Granularity>().unwrap(), Granularity::Third);
        assert_eq!("½".parse::<Granularity>().unwrap(), Granularity::Half);
        assert_eq!("Full".parse::<Granularity>().unwrap(), Granularity::Full);
        assert!("quarter".parse::<Granularity>().is_err());
    }

    #[test]
    fn test_serde_uses_lowercase_names() {
        let json = serde_json::to_string(&Granularity::Half).unwrap();
        assert_eq!(json, "\"half\"");
        let back: Granularity = serde_json::from_str("\"full\"").unwrap();
        assert_eq!(back, Granularity::Full);
    }

    #[test]
    fn test_default_is_third() {
        assert_eq!(Granularity::default(), Granularity::Third);
    }

    #[test]
    fn test_ordinals_are_distinct() {
        let mut seen = [false; 3];
        for g in Granularity::all() {
            assert!(!seen[g.ordinal()]);
            seen[g.ordinal()] = true;
        }
    }
}
