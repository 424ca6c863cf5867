use serde::{Deserialize, Serialize};

use super::defaults;

/// Restart count and worker parallelism.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Independent runs per scoring call. Default: 8.
    pub runs: usize,
    /// Worker threads executing runs. Default: 1.
    pub jobs: usize,
    /// Base seed; when set, every run's seed is derived from it. Default: none.
    pub seed: Option<u64>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            runs: defaults::DEFAULT_RUNS,
            jobs: defaults::DEFAULT_JOBS,
            seed: None,
        }
    }
}

/// Accelerator placement.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceConfig {
    /// Place runs on accelerators. Default: false.
    pub enabled: bool,
    /// Number of accelerators in the round-robin pool. Default: 1.
    pub count: usize,
    /// Index of the first accelerator used. Default: 0.
    pub offset: usize,
    /// Run on the CPU when the assigned accelerator is missing. Default: false.
    pub allow_cpu_fallback: bool,
}

impl DeviceConfig {
    /// Device index for a run: `offset + run mod count`.
    pub fn index_for_run(&self, run: usize) -> usize {
        self.offset + run % self.count.max(1)
    }
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            enabled: defaults::DEFAULT_DEVICE_ENABLED,
            count: defaults::DEFAULT_DEVICE_COUNT,
            offset: defaults::DEFAULT_DEVICE_OFFSET,
            allow_cpu_fallback: defaults::DEFAULT_ALLOW_CPU_FALLBACK,
        }
    }
}
