//! JSON request/response types for the CLI.

use std::ffi::OsString;

use serde::{Deserialize, Serialize};

use exposure_core::{
    Axis, ConfigError, ExposureCalculator, ExposureError, ExposureSettings, Granularity, Solution,
    Unknown,
};

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("invalid arguments: {0}")]
    Args(#[from] pico_args::Error),
    #[error("argument is not valid UTF-8: {0:?}")]
    NonUtf8Argument(OsString),
    #[error("unknown flag: {0}")]
    UnknownFlag(String),
    #[error("expected at most one request argument, got {}", .0.len())]
    UnexpectedArguments(Vec<OsString>),
    #[error("failed to read request: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid request JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Exposure(#[from] ExposureError),
}

/// The optional `REQUEST` positional left over after flag parsing.
pub fn request_argument(rest: Vec<OsString>) -> Result<Option<String>, CliError> {
    if rest.len() > 1 {
        return Err(CliError::UnexpectedArguments(rest));
    }
    let Some(arg) = rest.into_iter().next() else {
        return Ok(None);
    };
    let arg = arg.into_string().map_err(CliError::NonUtf8Argument)?;
    if arg.starts_with('-') {
        return Err(CliError::UnknownFlag(arg));
    }
    Ok(Some(arg))
}

/// A base exposure plus the leg to solve for.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SolveRequest {
    pub base: ExposureSettings,
    #[serde(flatten)]
    pub unknown: Unknown,
}

/// What the CLI prints on success.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SolveResponse {
    pub increments: Granularity,
    pub solved: Axis,
    #[serde(flatten)]
    pub solution: Solution,
}

impl SolveRequest {
    pub fn from_json(json: &str) -> Result<Self, CliError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn run(&self, calculator: &ExposureCalculator) -> Result<SolveResponse, CliError> {
        let solution = calculator.solve(&self.base, &self.unknown)?;
        tracing::debug!(solved = %self.unknown.axis(), %solution, "request solved");
        Ok(SolveResponse {
            increments: calculator.granularity(),
            solved: self.unknown.axis(),
            solution,
        })
    }
}

#[derive(Serialize)]
struct Tables {
    increments: Granularity,
    sensitivity: &'static [&'static str],
    aperture: &'static [&'static str],
    shutter: &'static [&'static str],
}

/// The calculator's three tables as pretty-printed JSON.
pub fn tables_json(calculator: &ExposureCalculator) -> Result<String, CliError> {
    let tables = Tables {
        increments: calculator.granularity(),
        sensitivity: calculator.sensitivities().values(),
        aperture: calculator.apertures().values(),
        shutter: calculator.shutter_durations().values(),
    };
    Ok(serde_json::to_string_pretty(&tables)?)
}
