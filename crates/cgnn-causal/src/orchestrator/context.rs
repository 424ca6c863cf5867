use std::time::{Duration, Instant};

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use cgnn_core::errors::{CgnnError, CgnnResult};
use cgnn_core::models::Device;

/// Cooperative per-run time limit, checked once per epoch.
#[derive(Debug, Clone, Copy)]
pub struct Deadline {
    run: usize,
    started: Instant,
    limit: Duration,
}

impl Deadline {
    pub fn start(run: usize, limit: Duration) -> Self {
        Self {
            run,
            started: Instant::now(),
            limit,
        }
    }

    pub fn check(&self) -> CgnnResult<()> {
        let elapsed = self.started.elapsed();
        if elapsed >= self.limit {
            return Err(CgnnError::RunTimedOut {
                run: self.run,
                elapsed_ms: u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
            });
        }
        Ok(())
    }
}

/// Everything one run needs to execute independently of every other run.
#[derive(Debug, Clone)]
pub struct RunContext {
    pub run: usize,
    pub device: Device,
    pub seed: u64,
    pub deadline: Option<Deadline>,
}

impl RunContext {
    /// The run's private random stream.
    pub fn rng(&self) -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(self.seed)
    }
}
