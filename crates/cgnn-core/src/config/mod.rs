//! Engine configuration: one immutable value, every option enumerated with its default.

pub mod defaults;
mod generator_config;
mod metric_config;
mod run_config;
mod sampling_config;
mod training_config;
pub mod validation;

pub use generator_config::{GeneratorConfig, MechanismKind};
pub use metric_config::MetricConfig;
pub use run_config::{DeviceConfig, RunConfig};
pub use sampling_config::SamplingConfig;
pub use training_config::TrainingConfig;
pub use validation::{validate, ConfigValidationError};

use serde::{Deserialize, Serialize};

use crate::errors::{CgnnResult, ConfigError};

/// Top-level configuration handed to every scorer at construction.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CgnnConfig {
    pub generator: GeneratorConfig,
    pub metric: MetricConfig,
    pub training: TrainingConfig,
    pub runs: RunConfig,
    pub device: DeviceConfig,
    pub sampling: SamplingConfig,
}

impl CgnnConfig {
    /// Parse a TOML document. Missing sections and fields take their defaults.
    pub fn from_toml(source: &str) -> CgnnResult<Self> {
        toml::from_str(source).map_err(|e| {
            ConfigError::Parse {
                message: e.to_string(),
            }
            .into()
        })
    }

    /// All validation failures, empty when the config is usable.
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        validation::validate(self)
    }

    /// Consume the config, failing with the first validation error.
    pub fn validated(self) -> CgnnResult<Self> {
        match self.validate().into_iter().next() {
            Some(err) => Err(ConfigError::InvalidValue {
                field: err.field,
                message: err.message,
            }
            .into()),
            None => Ok(self),
        }
    }
}
