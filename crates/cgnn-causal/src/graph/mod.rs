pub mod causal_graph;
pub mod topology;

pub use causal_graph::{CausalGraph, EdgeWeight};
pub use topology::{resolve, Topology};
