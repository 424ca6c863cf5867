use serde::{Deserialize, Serialize};

use super::defaults;

/// Input preprocessing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplingConfig {
    /// Rows above this count are subsampled (without replacement) once per run. Default: 1500.
    pub max_points: usize,
    /// Scale each pair to zero mean / unit variance before pairwise scoring. Default: true.
    pub standardize: bool,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            max_points: defaults::DEFAULT_MAX_POINTS,
            standardize: defaults::DEFAULT_STANDARDIZE,
        }
    }
}
