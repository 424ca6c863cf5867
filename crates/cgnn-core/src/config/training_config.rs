use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::defaults;

/// Epoch counts, retry bound, and per-run timeout.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingConfig {
    /// Gradient steps per model. Default: 1000.
    pub train_epochs: usize,
    /// Noise redraws averaged during evaluation. Default: 500.
    pub test_epochs: usize,
    /// Fresh-weight attempts before non-convergence is reported. Default: 5.
    pub max_attempts: u32,
    /// Wall-clock budget per run in milliseconds. Default: unbounded.
    pub run_timeout_ms: Option<u64>,
}

impl TrainingConfig {
    pub fn run_timeout(&self) -> Option<Duration> {
        self.run_timeout_ms.map(Duration::from_millis)
    }
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            train_epochs: defaults::DEFAULT_TRAIN_EPOCHS,
            test_epochs: defaults::DEFAULT_TEST_EPOCHS,
            max_attempts: defaults::DEFAULT_MAX_ATTEMPTS,
            run_timeout_ms: None,
        }
    }
}
