use super::config_error::ConfigError;
use super::error_code::{self, CgnnErrorCode};

/// Result alias used across the workspace.
pub type CgnnResult<T> = Result<T, CgnnError>;

/// Top-level error for every CGNN operation.
#[derive(Debug, thiserror::Error)]
pub enum CgnnError {
    /// Training produced a non-finite loss on every allowed attempt.
    #[error("training did not converge after {attempts} attempt(s), last loss {loss}")]
    NonConvergence { attempts: u32, loss: f64 },

    #[error("shape mismatch: {details}")]
    ShapeMismatch { details: String },

    /// Both directional losses vanished, so the normalized score is undefined.
    #[error("degenerate score: mean losses {mean_ab} (A->B) and {mean_ba} (B->A) sum to ~0")]
    DegenerateScore { mean_ab: f64, mean_ba: f64 },

    #[error("device {device} unavailable: {reason}")]
    ResourceExhaustion { device: usize, reason: String },

    #[error("cycle detected in causal skeleton at node {node}")]
    CycleDetected { node: String },

    #[error("run {run} timed out after {elapsed_ms} ms")]
    RunTimedOut { run: usize, elapsed_ms: u64 },

    #[error("invalid model state: {details}")]
    InvalidState { details: String },

    #[error("worker pool error: {reason}")]
    WorkerPool { reason: String },

    #[error("config error: {0}")]
    Config(#[from] ConfigError),
}

impl CgnnError {
    /// Shorthand for the most common fatal input error.
    pub fn shape(details: impl Into<String>) -> Self {
        Self::ShapeMismatch {
            details: details.into(),
        }
    }

    /// Whether a fresh-weight retry can recover from this error.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::NonConvergence { .. })
    }
}

impl CgnnErrorCode for CgnnError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::NonConvergence { .. } => error_code::NON_CONVERGENCE,
            Self::ShapeMismatch { .. } => error_code::SHAPE_MISMATCH,
            Self::DegenerateScore { .. } => error_code::DEGENERATE_SCORE,
            Self::ResourceExhaustion { .. } => error_code::RESOURCE_EXHAUSTION,
            Self::CycleDetected { .. } => error_code::CYCLE_DETECTED,
            Self::RunTimedOut { .. } => error_code::RUN_TIMED_OUT,
            Self::InvalidState { .. } => error_code::INVALID_STATE,
            Self::WorkerPool { .. } => error_code::WORKER_POOL,
            Self::Config(e) => e.error_code(),
        }
    }
}
