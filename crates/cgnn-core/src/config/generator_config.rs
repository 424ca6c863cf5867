use serde::{Deserialize, Serialize};

use super::defaults;

/// Functional form of each per-variable mechanism.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MechanismKind {
    /// One hidden ReLU layer over parents + noise.
    #[default]
    Mlp,
    /// Second-degree polynomial over [1, parents, noise].
    Polynomial,
}

/// Generator network hyperparameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Width of the hidden layer. Default: 20.
    pub hidden_units: usize,
    /// Adam learning rate. Default: 0.01.
    pub learning_rate: f64,
    /// Standard deviation of the normal weight initialisation. Default: 0.05.
    pub init_std: f64,
    /// Mechanism used for every generated variable. Default: mlp.
    pub mechanism: MechanismKind,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            hidden_units: defaults::DEFAULT_HIDDEN_UNITS,
            learning_rate: defaults::DEFAULT_LEARNING_RATE,
            init_std: defaults::DEFAULT_INIT_STD,
            mechanism: MechanismKind::default(),
        }
    }
}
