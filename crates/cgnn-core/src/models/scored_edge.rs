use serde::{Deserialize, Serialize};

/// A directed edge `cause -> effect` with a score signed relative to that direction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredEdge {
    pub cause: String,
    pub effect: String,
    pub score: f64,
}

impl ScoredEdge {
    pub fn new(cause: impl Into<String>, effect: impl Into<String>, score: f64) -> Self {
        Self {
            cause: cause.into(),
            effect: effect.into(),
            score,
        }
    }
}
