use serde::{Deserialize, Serialize};

use super::Device;

/// Evaluation losses of one run, one entry per hypothesis.
///
/// For pairwise scoring `losses = [loss_ab, loss_ba]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunResult {
    pub run: usize,
    pub device: Device,
    /// Rows the run trained on after subsampling.
    pub rows_used: usize,
    pub losses: Vec<f64>,
}

/// Mean loss per hypothesis across runs. Empty input gives an empty vector.
pub fn aggregate_means(results: &[RunResult]) -> Vec<f64> {
    let Some(width) = results.iter().map(|r| r.losses.len()).max() else {
        return Vec::new();
    };
    (0..width)
        .map(|h| {
            let values: Vec<f64> = results.iter().filter_map(|r| r.losses.get(h).copied()).collect();
            values.iter().sum::<f64>() / values.len() as f64
        })
        .collect()
}
