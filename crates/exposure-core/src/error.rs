//! Failures raised by exposure calculations.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::granularity::{Axis, Granularity};
use crate::tables::ValueTable;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ExposureError {
    #[error(
        "The given parameters will result in an overexposed image. Using a value of {} will \
         still result in overexposure by {}.",
        .0.closest_achievable,
        .0
    )]
    Overexposed(BoundaryFailure),
    #[error(
        "The given parameters will result in an underexposed image. Using a value of {} will \
         still result in underexposure by {}.",
        .0.closest_achievable,
        .0
    )]
    Underexposed(BoundaryFailure),
    #[error("{value:?} is not a valid {axis} value at {granularity} stop increments")]
    InvalidValue {
        axis: Axis,
        granularity: Granularity,
        value: String,
    },
    #[error("unrecognised shutter notation: {0:?}")]
    InvalidNotation(String),
    #[error("unknown exposure increment: {0:?}")]
    UnknownGranularity(String),
}

impl ExposureError {
    /// The boundary payload for over/underexposure failures.
    pub fn boundary(&self) -> Option<&BoundaryFailure> {
        match self {
            Self::Overexposed(b) | Self::Underexposed(b) => Some(b),
            _ => None,
        }
    }
}

/// Which end of a table a solved index fell off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoundaryKind {
    /// Past the last (darkest) entry.
    Over,
    /// Before the first (brightest) entry.
    Under,
}

/// Data describing a solve that landed outside its table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoundaryFailure {
    pub kind: BoundaryKind,
    /// The axis that was being solved.
    pub axis: Axis,
    pub granularity: Granularity,
    /// The index the compensation arithmetic asked for.
    pub required_index: i64,
    /// Index of the base exposure's value on the solved axis.
    pub base_index: usize,
    pub table_len: usize,
    /// The table entry nearest the requested exposure.
    pub closest_achievable: &'static str,
}

impl BoundaryFailure {
    /// Solved index lies past the table's last entry.
    pub(crate) fn over(table: &ValueTable, base_index: usize, required_index: i64) -> Self {
        Self {
            kind: BoundaryKind::Over,
            axis: table.axis(),
            granularity: table.granularity(),
            required_index,
            base_index,
            table_len: table.len(),
            closest_achievable: table.last(),
        }
    }

    /// Solved index is negative.
    pub(crate) fn under(table: &ValueTable, base_index: usize, required_index: i64) -> Self {
        Self {
            kind: BoundaryKind::Under,
            axis: table.axis(),
            granularity: table.granularity(),
            required_index,
            base_index,
            table_len: table.len(),
            closest_achievable: table.first(),
        }
    }

    /// Magnitude in steps of the active granularity.
    ///
    /// Overexposure counts steps past the last tabulated entry.
    /// Underexposure counts steps between the base and the solved index.
    pub fn increments(&self) -> u64 {
        match self.kind {
            BoundaryKind::Over => {
                let last_index = self.table_len as i64 - 1;
                (self.required_index - last_index).unsigned_abs()
            }
            BoundaryKind::Under => (self.base_index as i64 - self.required_index).unsigned_abs(),
        }
    }

    /// Magnitude converted to full stops.
    pub fn full_stops(&self) -> f64 {
        self.increments() as f64 * self.granularity.step()
    }
}

impl fmt::Display for BoundaryFailure {
    /// Renders e.g. `4 ⅓ stops (1.3 stops)`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} stops ({} stops)",
            self.increments(),
            self.granularity.label(),
            format_stops(self.full_stops())
        )
    }
}

/// One decimal place, dropping the fraction when it rounds to a whole number.
pub(crate) fn format_stops(stops: f64) -> String {
    let tenths = (stops * 10.0).round();
    if tenths % 10.0 == 0.0 {
        format!("{:.0}", tenths / 10.0)
    } else {
        format!("{:.1}", tenths / 10.0)
    }
}
