//! Data model shared by the scorers and their callers.

mod device;
mod run_result;
mod sample;
mod scored_edge;

pub use device::Device;
pub use run_result::{aggregate_means, RunResult};
pub use sample::Sample;
pub use scored_edge::ScoredEdge;
