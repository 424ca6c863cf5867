//! # cgnn-causal
//!
//! Causal generative neural network scoring: generator models trained by MMD
//! minimisation, the pairwise and full-graph scorers built on them, and the
//! run orchestrator that executes independent runs in parallel.

pub mod generator;
pub mod graph;
pub mod metric;
pub mod orchestrator;
pub mod scoring;

pub use graph::CausalGraph;
pub use metric::{DistanceMetric, FourierMmd, GaussianMmd};
pub use orchestrator::{AcceleratorPool, RunContext, RunOrchestrator};
pub use scoring::{
    GraphComparison, GraphMode, GraphOutput, GraphScore, GraphScorer, PairScore, PairwiseScorer,
};
