use serde::{Deserialize, Serialize};

use super::defaults;

/// Distance metric selection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricConfig {
    /// Use the random Fourier feature approximation instead of exact MMD. Default: false.
    pub approximate: bool,
    /// Number of random features per bandwidth for the approximation. Default: 100.
    pub fourier_features: usize,
    /// Gaussian kernel bandwidths. Default: [0.01, 0.1, 1, 10, 100].
    pub bandwidths: Vec<f64>,
}

impl Default for MetricConfig {
    fn default() -> Self {
        Self {
            approximate: defaults::DEFAULT_APPROXIMATE_METRIC,
            fourier_features: defaults::DEFAULT_FOURIER_FEATURES,
            bandwidths: defaults::DEFAULT_BANDWIDTHS.to_vec(),
        }
    }
}
