//! Stop arithmetic between two entries of a value table.

use crate::error::ExposureError;
use crate::tables::ValueTable;

/// Signed number of table steps from `base` to `final_value`.
///
/// ```text
/// difference = index_of(base) − index_of(final_value)
/// ```
///
/// Positive means the final value admits more light than the base, negative
/// means less, zero means no change. Steps are counted in the table's own
/// granularity.
///
/// ```
/// use exposure_core::{apertures, difference_in_stops, Granularity};
///
/// let table = apertures(Granularity::Full);
/// // f/2.8 → f/2 opens up by one stop.
/// assert_eq!(difference_in_stops(table, "f/2.8", "f/2").unwrap(), 1);
/// ```
pub fn difference_in_stops(
    table: &ValueTable,
    base: &str,
    final_value: &str,
) -> Result<i64, ExposureError> {
    let base_idx = table.index_of(base)? as i64;
    let final_idx = table.index_of(final_value)? as i64;
    Ok(base_idx - final_idx)
}
