//! Stable error code strings for callers that report errors across a process boundary.

/// Every error enum implements this to provide a structured error code string.
pub trait CgnnErrorCode {
    /// Returns the error code string (e.g., "NON_CONVERGENCE").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted error string: `[ERROR_CODE] message`.
    fn coded_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const NON_CONVERGENCE: &str = "NON_CONVERGENCE";
pub const SHAPE_MISMATCH: &str = "SHAPE_MISMATCH";
pub const DEGENERATE_SCORE: &str = "DEGENERATE_SCORE";
pub const RESOURCE_EXHAUSTION: &str = "RESOURCE_EXHAUSTION";
pub const CYCLE_DETECTED: &str = "CYCLE_DETECTED";
pub const RUN_TIMED_OUT: &str = "RUN_TIMED_OUT";
pub const INVALID_STATE: &str = "INVALID_STATE";
pub const WORKER_POOL: &str = "WORKER_POOL";
pub const INVALID_CONFIG: &str = "INVALID_CONFIG";
