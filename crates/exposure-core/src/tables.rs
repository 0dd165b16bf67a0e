//! Discretized ISO, aperture and shutter tables.
//!
//! Every table is ordered from the value that admits the most light
//! (index 0) to the one that admits the least. Adjacent entries are exactly
//! one step apart at the table's granularity, so table positions double as
//! stop counts.
//!
//! Tables are built once on first access and shared by every calculator.

use std::collections::HashMap;
use std::sync::OnceLock;

use crate::error::ExposureError;
use crate::granularity::{Axis, Granularity};

static SHUTTER_THIRDS: [&str; 55] = [
    "30\"", "25\"", "20\"", "15\"", "13\"", "10\"", "8\"", "6\"", "5\"", "4\"", "3.2\"", "2.5\"",
    "2\"", "1.6\"", "1.3\"", "1\"", "0\"8", "0\"6", "0\"5", "0\"4", "0\"3", "1/4", "1/5", "1/6",
    "1/8", "1/10", "1/13", "1/15", "1/20", "1/25", "1/30", "1/40", "1/50", "1/60", "1/80",
    "1/100", "1/125", "1/160", "1/200", "1/250", "1/320", "1/400", "1/500", "1/640", "1/800",
    "1/1000", "1/1250", "1/1600", "1/2000", "1/2500", "1/3200", "1/4000", "1/5000", "1/6400",
    "1/8000",
];

static SHUTTER_HALVES: [&str; 37] = [
    "30\"", "20\"", "15\"", "10\"", "8\"", "6\"", "4\"", "3\"", "2\"", "1.5\"", "1\"", "0\"7",
    "0\"5", "0\"3", "1/4", "1/6", "1/8", "1/10", "1/15", "1/20", "1/30", "1/45", "1/60", "1/90",
    "1/125", "1/180", "1/250", "1/350", "1/500", "1/750", "1/1000", "1/1500", "1/2000", "1/3000",
    "1/4000", "1/6000", "1/8000",
];

static SHUTTER_FULL: [&str; 19] = [
    "30\"", "15\"", "8\"", "4\"", "2\"", "1\"", "0\"5", "1/4", "1/8", "1/15", "1/30", "1/60",
    "1/125", "1/250", "1/500", "1/1000", "1/2000", "1/4000", "1/8000",
];

static ISO_THIRDS: [&str; 27] = [
    "25600", "20000", "16000", "12800", "10000", "8000", "6400", "5000", "4000", "3200", "2500",
    "2000", "1600", "1250", "1000", "800", "640", "500", "400", "320", "250", "200", "160", "125",
    "100", "70", "50",
];

static ISO_HALVES: [&str; 20] = [
    "25600", "17600", "12800", "8800", "6400", "4400", "3600", "3200", "2200", "1600", "1100",
    "800", "560", "400", "280", "200", "140", "100", "70", "50",
];

static ISO_FULL: [&str; 10] = [
    "25600", "12800", "6400", "3200", "1600", "800", "400", "200", "100", "50",
];

static APERTURE_THIRDS: [&str; 37] = [
    "f/1", "f/1.1", "f/1.3", "f/1.4", "f/1.6", "f/1.8", "f/2", "f/2.2", "f/2.5", "f/2.8", "f/3.2",
    "f/3.6", "f/4", "f/4.5", "f/5", "f/5.6", "f/6.3", "f/7.1", "f/8", "f/9", "f/10.1", "f/11",
    "f/12.7", "f/14.3", "f/16", "f/18", "f/20.2", "f/22", "f/25.4", "f/28.5", "f/32", "f/36",
    "f/40.3", "f/45", "f/50.8", "f/57", "f/64",
];

static APERTURE_HALVES: [&str; 24] = [
    "f/1", "f/1.2", "f/1.4", "f/2", "f/2.4", "f/2.8", "f/3.4", "f/4", "f/4.8", "f/5.6", "f/6.7",
    "f/8", "f/9.5", "f/11", "f/13.5", "f/16", "f/19", "f/22", "f/26.9", "f/32", "f/38.1", "f/45",
    "f/53.8", "f/64",
];

static APERTURE_FULL: [&str; 13] = [
    "f/1", "f/1.4", "f/2", "f/2.8", "f/4", "f/5.6", "f/8", "f/11", "f/16", "f/22", "f/32", "f/45",
    "f/64",
];

/// An ordered, immutable sequence of canonical values for one axis at one
/// granularity, with an O(1) value-to-position index.
#[derive(Debug)]
pub struct ValueTable {
    axis: Axis,
    granularity: Granularity,
    values: &'static [&'static str],
    positions: HashMap<&'static str, usize>,
}

impl ValueTable {
    fn new(axis: Axis, granularity: Granularity, values: &'static [&'static str]) -> Self {
        let positions = values.iter().enumerate().map(|(i, v)| (*v, i)).collect();
        Self {
            axis,
            granularity,
            values,
            positions,
        }
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    pub fn granularity(&self) -> Granularity {
        self.granularity
    }

    /// Canonical values, brightest first.
    pub fn values(&self) -> &'static [&'static str] {
        self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&'static str> {
        self.values.get(index).copied()
    }

    /// The value admitting the most light.
    pub fn first(&self) -> &'static str {
        self.values[0]
    }

    /// The value admitting the least light.
    pub fn last(&self) -> &'static str {
        self.values[self.values.len() - 1]
    }

    pub fn last_index(&self) -> usize {
        self.values.len() - 1
    }

    pub fn contains(&self, value: &str) -> bool {
        self.positions.contains_key(value)
    }

    /// Position of `value`, or `None` when it is not a canonical entry.
    pub fn position(&self, value: &str) -> Option<usize> {
        self.positions.get(value).copied()
    }

    /// Position of `value`, failing with [`ExposureError::InvalidValue`]
    /// when it is not a canonical entry of this table.
    pub fn index_of(&self, value: &str) -> Result<usize, ExposureError> {
        self.position(value)
            .ok_or_else(|| ExposureError::InvalidValue {
                axis: self.axis,
                granularity: self.granularity,
                value: value.to_string(),
            })
    }
}

fn raw_values(axis: Axis, granularity: Granularity) -> &'static [&'static str] {
    match (axis, granularity) {
        (Axis::Sensitivity, Granularity::Third) => &ISO_THIRDS,
        (Axis::Sensitivity, Granularity::Half) => &ISO_HALVES,
        (Axis::Sensitivity, Granularity::Full) => &ISO_FULL,
        (Axis::Aperture, Granularity::Third) => &APERTURE_THIRDS,
        (Axis::Aperture, Granularity::Half) => &APERTURE_HALVES,
        (Axis::Aperture, Granularity::Full) => &APERTURE_FULL,
        (Axis::Shutter, Granularity::Third) => &SHUTTER_THIRDS,
        (Axis::Shutter, Granularity::Half) => &SHUTTER_HALVES,
        (Axis::Shutter, Granularity::Full) => &SHUTTER_FULL,
    }
}

fn all_tables() -> &'static [ValueTable] {
    static TABLES: OnceLock<Vec<ValueTable>> = OnceLock::new();
    TABLES.get_or_init(|| {
        let tables: Vec<ValueTable> = Axis::all()
            .iter()
            .flat_map(|&axis| {
                Granularity::all()
                    .iter()
                    .map(move |&g| ValueTable::new(axis, g, raw_values(axis, g)))
            })
            .collect();
        tracing::trace!("built {} exposure value tables", tables.len());
        tables
    })
}

/// The table for `axis` at `granularity`.
pub fn table(axis: Axis, granularity: Granularity) -> &'static ValueTable {
    &all_tables()[axis.ordinal() * Granularity::all().len() + granularity.ordinal()]
}

/// ISO sensitivities, highest (brightest) first.
///
/// ```
/// use exposure_core::{sensitivities, Granularity};
///
/// let isos = sensitivities(Granularity::Full);
/// assert_eq!(isos.first(), "25600");
/// assert_eq!(isos.last(), "50");
/// ```
pub fn sensitivities(granularity: Granularity) -> &'static ValueTable {
    table(Axis::Sensitivity, granularity)
}

/// Apertures, widest first.
pub fn apertures(granularity: Granularity) -> &'static ValueTable {
    table(Axis::Aperture, granularity)
}

/// Shutter durations, longest first.
pub fn shutter_durations(granularity: Granularity) -> &'static ValueTable {
    table(Axis::Shutter, granularity)
}
