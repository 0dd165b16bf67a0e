//! Exposure Core — exposure triangle calculations.
//!
//! Given a correctly exposed ISO / aperture / shutter setting and new values
//! for two of the three legs, derive the third leg that keeps total exposure
//! constant. Values are the discretized settings found on camera dials at
//! third, half, or full stop increments. No I/O and no global mutable state.

pub mod calculator;
pub mod config;
pub mod error;
pub mod granularity;
pub mod notation;
pub mod stops;
pub mod tables;

// Re-exports for convenience.
pub use calculator::{
    ApertureInputs, ExposureCalculator, ExposureSettings, SensitivityInputs, ShutterInputs,
    ShutterSolution, Solution, Unknown,
};
pub use config::{CalculatorConfig, ConfigError};
pub use error::{BoundaryFailure, BoundaryKind, ExposureError};
pub use granularity::{Axis, Granularity};
pub use notation::{ShutterNotation, shutter_seconds};
pub use stops::difference_in_stops;
pub use tables::{ValueTable, apertures, sensitivities, shutter_durations, table};
