//! Calculator configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::calculator::ExposureCalculator;
use crate::error::ExposureError;
use crate::granularity::Granularity;

/// Environment variable consulted for the default increment granularity.
pub const INCREMENTS_ENV: &str = "EXPOSURE_INCREMENTS";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Exposure(#[from] ExposureError),
}

/// Settings used to build an [`ExposureCalculator`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculatorConfig {
    /// Stop increments the calculator works in.
    #[serde(default = "default_increments")]
    pub increments: Granularity,
}

fn default_increments() -> Granularity {
    std::env::var(INCREMENTS_ENV)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or_default()
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            increments: default_increments(),
        }
    }
}

impl CalculatorConfig {
    pub fn new(increments: Granularity) -> Self {
        Self { increments }
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a JSON config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_json(&text)?;
        tracing::debug!(
            path = %path.display(),
            increments = %config.increments,
            "loaded calculator config"
        );
        Ok(config)
    }

    /// Override the increments with a textual name such as `"half"`.
    pub fn with_increments_name(mut self, name: &str) -> Result<Self, ConfigError> {
        self.increments = name.parse()?;
        Ok(self)
    }

    pub fn calculator(&self) -> ExposureCalculator {
        ExposureCalculator::new(self.increments)
    }
}
