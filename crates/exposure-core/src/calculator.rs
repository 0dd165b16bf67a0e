//! Exposure compensation: solve for the one leg of the triangle that keeps
//! total exposure constant after the other two change.
//!
//! # Algorithm
//! Every table is ordered brightest first with one granularity step between
//! neighbours, so compensation is plain index arithmetic on the solved axis:
//!
//! ```text
//! required = index_of(base.solved)
//!          + difference_in_stops(other_a, base.a, final.a)
//!          + difference_in_stops(other_b, base.b, final.b)
//! ```
//!
//! A `required` index outside the table is an over/underexposure failure,
//! except on the shutter axis where a negative index is extrapolated to a
//! long exposure in whole seconds.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{BoundaryFailure, ExposureError};
use crate::granularity::{Axis, Granularity};
use crate::notation::shutter_seconds;
use crate::stops::difference_in_stops;
use crate::tables::{self, ValueTable};

/// One complete exposure setting.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExposureSettings {
    /// ISO, e.g. `"400"`.
    #[serde(alias = "iso")]
    pub sensitivity: String,
    /// f-number, e.g. `"f/2.8"`.
    pub aperture: String,
    /// Shutter duration, e.g. `"1/60"` or `"2\""`.
    pub shutter: String,
}

impl ExposureSettings {
    pub fn new(
        sensitivity: impl Into<String>,
        aperture: impl Into<String>,
        shutter: impl Into<String>,
    ) -> Self {
        Self {
            sensitivity: sensitivity.into(),
            aperture: aperture.into(),
            shutter: shutter.into(),
        }
    }

    /// The value this exposure uses on `axis`.
    pub fn get(&self, axis: Axis) -> &str {
        match axis {
            Axis::Sensitivity => &self.sensitivity,
            Axis::Aperture => &self.aperture,
            Axis::Shutter => &self.shutter,
        }
    }
}

/// Final aperture and ISO when solving for shutter duration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShutterInputs {
    pub aperture: String,
    #[serde(alias = "iso")]
    pub sensitivity: String,
}

/// Final shutter and ISO when solving for aperture.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApertureInputs {
    pub shutter: String,
    #[serde(alias = "iso")]
    pub sensitivity: String,
}

/// Final aperture and shutter when solving for ISO.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SensitivityInputs {
    pub aperture: String,
    pub shutter: String,
}

/// The leg to solve for, together with the two known final values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "solve", rename_all = "lowercase")]
pub enum Unknown {
    Shutter(ShutterInputs),
    Aperture(ApertureInputs),
    #[serde(alias = "iso")]
    Sensitivity(SensitivityInputs),
}

impl Unknown {
    pub fn axis(&self) -> Axis {
        match self {
            Self::Shutter(_) => Axis::Shutter,
            Self::Aperture(_) => Axis::Aperture,
            Self::Sensitivity(_) => Axis::Sensitivity,
        }
    }
}

/// Result of a shutter solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ShutterSolution {
    /// A canonical entry of the shutter table.
    Tabulated(&'static str),
    /// Slower than the longest tabulated duration; whole seconds.
    LongExposure { seconds: u64 },
}

impl fmt::Display for ShutterSolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tabulated(v) => f.write_str(v),
            Self::LongExposure { seconds } => write!(f, "{seconds}s"),
        }
    }
}

/// Result of [`ExposureCalculator::solve`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Solution {
    /// A canonical entry of the solved axis' table.
    Value(&'static str),
    /// Shutter only: extrapolated duration in whole seconds.
    LongExposure { seconds: u64 },
}

impl From<ShutterSolution> for Solution {
    fn from(s: ShutterSolution) -> Self {
        match s {
            ShutterSolution::Tabulated(v) => Self::Value(v),
            ShutterSolution::LongExposure { seconds } => Self::LongExposure { seconds },
        }
    }
}

impl fmt::Display for Solution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(v) => f.write_str(v),
            Self::LongExposure { seconds } => write!(f, "{seconds}s"),
        }
    }
}

/// Stateless calculator bound to one increment granularity.
///
/// Only the tables of the bound granularity are ever consulted.
///
/// ```
/// use exposure_core::{ExposureCalculator, ExposureSettings, Granularity, SensitivityInputs};
///
/// let calc = ExposureCalculator::new(Granularity::Third);
/// let base = ExposureSettings::new("400", "f/2.8", "1/15");
/// let iso = calc
///     .solve_sensitivity(
///         &base,
///         &SensitivityInputs {
///             aperture: "f/2.8".into(),
///             shutter: "1/30".into(),
///         },
///     )
///     .unwrap();
/// assert_eq!(iso, "800");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExposureCalculator {
    granularity: Granularity,
}

impl ExposureCalculator {
    pub const fn new(granularity: Granularity) -> Self {
        Self { granularity }
    }

    pub fn granularity(&self) -> Granularity {
        self.granularity
    }

    pub fn shutter_durations(&self) -> &'static ValueTable {
        tables::shutter_durations(self.granularity)
    }

    pub fn apertures(&self) -> &'static ValueTable {
        tables::apertures(self.granularity)
    }

    pub fn sensitivities(&self) -> &'static ValueTable {
        tables::sensitivities(self.granularity)
    }

    pub fn table(&self, axis: Axis) -> &'static ValueTable {
        tables::table(axis, self.granularity)
    }

    /// Stops between two values on `axis` at this calculator's granularity.
    pub fn difference_in_stops(
        &self,
        axis: Axis,
        base: &str,
        final_value: &str,
    ) -> Result<i64, ExposureError> {
        difference_in_stops(self.table(axis), base, final_value)
    }

    /// Shutter duration that balances a new aperture and ISO.
    ///
    /// Returns [`ShutterSolution::LongExposure`] when the balancing duration
    /// is longer than the table's slowest entry.
    pub fn solve_shutter(
        &self,
        base: &ExposureSettings,
        target: &ShutterInputs,
    ) -> Result<ShutterSolution, ExposureError> {
        let values = self.shutter_durations();
        let base_idx = values.index_of(&base.shutter)?;

        let offset = base_idx as i64
            + difference_in_stops(self.apertures(), &base.aperture, &target.aperture)?
            + difference_in_stops(self.sensitivities(), &base.sensitivity, &target.sensitivity)?;

        if offset < 0 {
            let seconds = self.long_exposure_seconds(base_idx, offset, &base.shutter)?;
            return Ok(ShutterSolution::LongExposure { seconds });
        }

        let shutter = self.pluck(values, base_idx, offset)?;
        tracing::debug!(%shutter, granularity = %self.granularity, "solved shutter");
        Ok(ShutterSolution::Tabulated(shutter))
    }

    /// Aperture that balances a new shutter duration and ISO.
    pub fn solve_aperture(
        &self,
        base: &ExposureSettings,
        target: &ApertureInputs,
    ) -> Result<&'static str, ExposureError> {
        let values = self.apertures();
        let base_idx = values.index_of(&base.aperture)?;

        let offset = base_idx as i64
            + difference_in_stops(self.shutter_durations(), &base.shutter, &target.shutter)?
            + difference_in_stops(self.sensitivities(), &base.sensitivity, &target.sensitivity)?;

        let aperture = self.pluck(values, base_idx, offset)?;
        tracing::debug!(%aperture, granularity = %self.granularity, "solved aperture");
        Ok(aperture)
    }

    /// ISO that balances a new aperture and shutter duration.
    pub fn solve_sensitivity(
        &self,
        base: &ExposureSettings,
        target: &SensitivityInputs,
    ) -> Result<&'static str, ExposureError> {
        let values = self.sensitivities();
        let base_idx = values.index_of(&base.sensitivity)?;

        let offset = base_idx as i64
            + difference_in_stops(self.shutter_durations(), &base.shutter, &target.shutter)?
            + difference_in_stops(self.apertures(), &base.aperture, &target.aperture)?;

        let sensitivity = self.pluck(values, base_idx, offset)?;
        tracing::debug!(%sensitivity, granularity = %self.granularity, "solved sensitivity");
        Ok(sensitivity)
    }

    /// Dispatch to the solve matching `unknown`.
    pub fn solve(
        &self,
        base: &ExposureSettings,
        unknown: &Unknown,
    ) -> Result<Solution, ExposureError> {
        match unknown {
            Unknown::Shutter(target) => self.solve_shutter(base, target).map(Solution::from),
            Unknown::Aperture(target) => self.solve_aperture(base, target).map(Solution::Value),
            Unknown::Sensitivity(target) => {
                self.solve_sensitivity(base, target).map(Solution::Value)
            }
        }
    }

    /// Boundary-checked table lookup.
    fn pluck(
        &self,
        values: &'static ValueTable,
        base_idx: usize,
        idx: i64,
    ) -> Result<&'static str, ExposureError> {
        if idx > values.last_index() as i64 {
            let failure = BoundaryFailure::over(values, base_idx, idx);
            tracing::debug!(axis = %values.axis(), idx, "overexposed: {failure}");
            Err(ExposureError::Overexposed(failure))
        } else if idx < 0 {
            let failure = BoundaryFailure::under(values, base_idx, idx);
            tracing::debug!(axis = %values.axis(), idx, "underexposed: {failure}");
            Err(ExposureError::Underexposed(failure))
        } else {
            Ok(values.values()[idx as usize])
        }
    }

    /// Extrapolate a shutter duration longer than the slowest table entry.
    ///
    /// ```text
    /// factor   = 2^step
    /// distance = |base_idx − offset|
    /// seconds  = round(factor^distance × seconds(base.shutter))
    /// ```
    fn long_exposure_seconds(
        &self,
        base_idx: usize,
        offset: i64,
        base_shutter: &str,
    ) -> Result<u64, ExposureError> {
        let factor = 2.0_f64.powf(self.granularity.step());
        let distance = (base_idx as i64 - offset).unsigned_abs();
        let base_seconds = shutter_seconds(base_shutter)?;

        let seconds = (factor.powi(distance as i32) * base_seconds).round() as u64;
        tracing::debug!(
            base_shutter,
            distance,
            seconds,
            granularity = %self.granularity,
            "extrapolated long exposure"
        );
        Ok(seconds)
    }
}

impl Default for ExposureCalculator {
    fn default() -> Self {
        Self::new(Granularity::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn thirds() -> ExposureCalculator {
        ExposureCalculator::new(Granularity::Third)
    }

    #[test]
    fn test_granularity_accessor() {
        assert_eq!(thirds().granularity(), Granularity::Third);
        assert_eq!(
            ExposureCalculator::new(Granularity::Half).granularity(),
            Granularity::Half
        );
    }

    #[test]
    fn test_no_change_returns_base_values() {
        for &g in Granularity::all() {
            let calc = ExposureCalculator::new(g);
            let base = ExposureSettings::new("400", "f/2.8", "1/60");
            let shutter = calc
                .solve_shutter(
                    &base,
                    &ShutterInputs {
                        aperture: base.aperture.clone(),
                        sensitivity: base.sensitivity.clone(),
                    },
                )
                .unwrap();
            assert_eq!(shutter, ShutterSolution::Tabulated("1/60"));

            let aperture = calc
                .solve_aperture(
                    &base,
                    &ApertureInputs {
                        shutter: base.shutter.clone(),
                        sensitivity: base.sensitivity.clone(),
                    },
                )
                .unwrap();
            assert_eq!(aperture, "f/2.8");

            let iso = calc
                .solve_sensitivity(
                    &base,
                    &SensitivityInputs {
                        aperture: base.aperture.clone(),
                        shutter: base.shutter.clone(),
                    },
                )
                .unwrap();
            assert_eq!(iso, "400");
        }
    }

    #[test]
    fn test_pluck_boundaries() {
        let calc = thirds();
        let table = calc.apertures();
        assert_eq!(calc.pluck(table, 0, 0).unwrap(), "f/1");
        assert_eq!(calc.pluck(table, 0, 36).unwrap(), "f/64");
        assert!(matches!(calc.pluck(table, 0, 37), Err(ExposureError::Overexposed(_))));
        assert!(matches!(calc.pluck(table, 0, -1), Err(ExposureError::Underexposed(_))));
    }

    #[test]
    fn test_long_exposure_at_table_edge_doubles_per_full_stop() {
        let calc = ExposureCalculator::new(Granularity::Full);
        // 30" is index 0; one stop slower.
        assert_eq!(calc.long_exposure_seconds(0, -1, "30\"").unwrap(), 60);
        assert_eq!(calc.long_exposure_seconds(0, -3, "30\"").unwrap(), 240);
    }

    #[test]
    fn test_invalid_base_value_is_reported() {
        let calc = ExposureCalculator::new(Granularity::Full);
        let base = ExposureSettings::new("320", "f/2.8", "1/60");
        let err = calc
            .solve_aperture(
                &base,
                &ApertureInputs {
                    shutter: "1/30".into(),
                    sensitivity: "400".into(),
                },
            )
            .unwrap_err();
        assert!(matches!(
            err,
            ExposureError::InvalidValue {
                axis: Axis::Sensitivity,
                ..
            }
        ));
    }

    #[test]
    fn test_solve_dispatches_by_unknown() {
        let calc = thirds();
        let base = ExposureSettings::new("200", "f/2.8", "1/15");
        let unknown = Unknown::Aperture(ApertureInputs {
            shutter: "1\"".into(),
            sensitivity: "200".into(),
        });
        assert_eq!(unknown.axis(), Axis::Aperture);
        assert_eq!(calc.solve(&base, &unknown).unwrap(), Solution::Value("f/11"));
    }

    #[test]
    fn test_unknown_deserializes_from_tagged_json() {
        let json = r#"{"solve": "shutter", "aperture": "f/4", "iso": "200"}"#;
        let unknown: Unknown = serde_json::from_str(json).unwrap();
        assert_eq!(
            unknown,
            Unknown::Shutter(ShutterInputs {
                aperture: "f/4".into(),
                sensitivity: "200".into(),
            })
        );
    }

    #[test]
    fn test_solution_serializes() {
        let json = serde_json::to_string(&Solution::LongExposure { seconds: 120 }).unwrap();
        assert_eq!(json, r#"{"long_exposure":{"seconds":120}}"#);
        let json = serde_json::to_string(&Solution::Value("f/11")).unwrap();
        assert_eq!(json, r#"{"value":"f/11"}"#);
    }
}
