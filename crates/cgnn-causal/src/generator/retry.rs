use tracing::warn;

use cgnn_core::errors::{CgnnError, CgnnResult};

/// Run `attempt` until it succeeds, at most `max_attempts` times.
///
/// Each call must build its model from scratch; only errors for which
/// [`CgnnError::is_retryable`] holds are retried, every other error is
/// returned immediately. On exhaustion the error carries the number of
/// attempts made and the last loss seen.
pub fn with_fresh_state<T, F>(max_attempts: u32, mut attempt: F) -> CgnnResult<T>
where
    F: FnMut(u32) -> CgnnResult<T>,
{
    let max_attempts = max_attempts.max(1);
    let mut last_loss = f64::NAN;
    for n in 1..=max_attempts {
        let err = match attempt(n) {
            Ok(value) => return Ok(value),
            Err(e) if e.is_retryable() => e,
            Err(e) => return Err(e),
        };
        if let CgnnError::NonConvergence { loss, .. } = err {
            last_loss = loss;
        }
        if n < max_attempts {
            warn!(attempt = n, max_attempts, loss = last_loss, "non-finite loss, retrying with fresh weights");
        }
    }
    Err(CgnnError::NonConvergence {
        attempts: max_attempts,
        loss: last_loss,
    })
}
