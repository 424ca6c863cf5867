//! # cgnn-core
//!
//! Foundation crate for the CGNN causal scoring engine.
//! Defines the data model, the skeleton collaborator trait, errors, config,
//! constants, and tracing setup. Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod traits;
pub mod tracing_setup;

// Re-export the most commonly used types at the crate root.
pub use config::CgnnConfig;
pub use errors::{CgnnError, CgnnResult};
pub use models::{Device, RunResult, Sample, ScoredEdge};
pub use traits::{EdgeOrder, Skeleton};
