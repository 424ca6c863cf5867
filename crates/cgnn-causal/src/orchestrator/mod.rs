//! Executes R independent runs on a dedicated worker pool.

mod accelerator;
mod context;

pub use accelerator::AcceleratorPool;
pub use context::{Deadline, RunContext};

use std::time::Duration;

use rand::Rng;
use rayon::prelude::*;
use tracing::warn;

use cgnn_core::config::{CgnnConfig, DeviceConfig};
use cgnn_core::errors::{CgnnError, CgnnResult};
use cgnn_core::models::Device;

/// Spreads run indices across the seed space.
const SEED_STRIDE: u64 = 0x9E37_79B9_7F4A_7C15;

/// Fans a unit of work out over `runs.runs` independent runs and joins them all.
///
/// Results come back ordered by run index. The first failing run fails the
/// whole call; per-run retries happen inside the unit of work.
pub struct RunOrchestrator {
    pool: rayon::ThreadPool,
    runs: usize,
    seed: Option<u64>,
    device: DeviceConfig,
    accelerators: AcceleratorPool,
    timeout: Option<Duration>,
}

impl RunOrchestrator {
    pub fn new(config: &CgnnConfig) -> CgnnResult<Self> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.runs.jobs.max(1))
            .thread_name(|i| format!("cgnn-run-{i}"))
            .build()
            .map_err(|e| CgnnError::WorkerPool {
                reason: e.to_string(),
            })?;
        Ok(Self {
            pool,
            runs: config.runs.runs,
            seed: config.runs.seed,
            device: config.device.clone(),
            accelerators: AcceleratorPool::none(),
            timeout: config.training.run_timeout(),
        })
    }

    pub fn with_accelerators(mut self, accelerators: AcceleratorPool) -> Self {
        self.accelerators = accelerators;
        self
    }

    pub fn runs(&self) -> usize {
        self.runs
    }

    pub fn jobs(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// Run `work` once per run index and collect every result.
    pub fn execute<T, F>(&self, work: F) -> CgnnResult<Vec<T>>
    where
        T: Send,
        F: Fn(&RunContext) -> CgnnResult<T> + Sync,
    {
        self.pool.install(|| {
            (0..self.runs)
                .into_par_iter()
                .map(|run| {
                    let ctx = self.context_for(run)?;
                    let _span = cgnn_core::run_span!(ctx.run, ctx.device).entered();
                    work(&ctx)
                })
                .collect::<CgnnResult<Vec<T>>>()
        })
    }

    /// Placement, seed and deadline for one run.
    pub fn context_for(&self, run: usize) -> CgnnResult<RunContext> {
        let device = self.place(run)?;
        let seed = match self.seed {
            Some(base) => base.wrapping_add((run as u64).wrapping_mul(SEED_STRIDE)),
            None => rand::rng().random(),
        };
        Ok(RunContext {
            run,
            device,
            seed,
            deadline: self.timeout.map(|limit| Deadline::start(run, limit)),
        })
    }

    fn place(&self, run: usize) -> CgnnResult<Device> {
        if !self.device.enabled {
            return Ok(Device::Cpu);
        }
        let index = self.device.index_for_run(run);
        if self.accelerators.contains(index) {
            return Ok(Device::Accelerator(index));
        }
        if self.device.allow_cpu_fallback {
            warn!(run, device = index, "accelerator unavailable, falling back to cpu");
            return Ok(Device::Cpu);
        }
        Err(CgnnError::ResourceExhaustion {
            device: index,
            reason: format!(
                "run {run} needs accelerator {index}, pool has {} device(s)",
                self.accelerators.len()
            ),
        })
    }
}
