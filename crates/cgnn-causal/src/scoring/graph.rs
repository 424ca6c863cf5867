//! Full-graph scoring: how well does a generator wired along a candidate DAG
//! reproduce the joint distribution?

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::info;

use cgnn_core::config::CgnnConfig;
use cgnn_core::errors::{CgnnError, CgnnResult};
use cgnn_core::models::{aggregate_means, RunResult, Sample};
use cgnn_core::traits::Skeleton;

use super::{attempt_rng, fit_and_evaluate};
use crate::generator::{with_fresh_state, GenerationPlan, GeneratorModel};
use crate::graph::{resolve, Topology};
use crate::orchestrator::{AcceleratorPool, RunContext, RunOrchestrator};

/// What [`GraphScorer::run`] produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphMode {
    Score,
    Generate,
}

#[derive(Debug, Clone, PartialEq)]
pub enum GraphOutput {
    Score(GraphScore),
    Generated(Sample),
}

/// Joint-fit loss of one candidate graph. Lower is a better fit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphScore {
    pub loss: f64,
    pub runs: Vec<RunResult>,
}

/// Mean loss per candidate and the index of the lowest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphComparison {
    pub losses: Vec<f64>,
    pub best: usize,
    pub runs: Vec<RunResult>,
}

pub struct GraphScorer {
    config: CgnnConfig,
    orchestrator: RunOrchestrator,
}

impl GraphScorer {
    pub fn new(config: CgnnConfig) -> CgnnResult<Self> {
        let config = config.validated()?;
        let orchestrator = RunOrchestrator::new(&config)?;
        Ok(Self {
            config,
            orchestrator,
        })
    }

    pub fn with_accelerators(mut self, accelerators: AcceleratorPool) -> Self {
        self.orchestrator = self.orchestrator.with_accelerators(accelerators);
        self
    }

    pub fn config(&self) -> &CgnnConfig {
        &self.config
    }

    pub fn run(&self, sample: &Sample, skeleton: &dyn Skeleton, mode: GraphMode) -> CgnnResult<GraphOutput> {
        match mode {
            GraphMode::Score => self.score(sample, skeleton).map(GraphOutput::Score),
            GraphMode::Generate => self.generate(sample, skeleton).map(GraphOutput::Generated),
        }
    }

    /// Mean evaluation loss of the graph model over `runs.runs` runs.
    pub fn score(&self, sample: &Sample, skeleton: &dyn Skeleton) -> CgnnResult<GraphScore> {
        let comparison = self.compare(sample, &[skeleton])?;
        let loss = comparison.losses.first().copied().ok_or_else(|| CgnnError::InvalidState {
            details: "graph scoring produced no loss".to_string(),
        })?;
        Ok(GraphScore {
            loss,
            runs: comparison.runs,
        })
    }

    /// Score several candidate graphs under identical run seeds and rows.
    pub fn compare(&self, sample: &Sample, candidates: &[&dyn Skeleton]) -> CgnnResult<GraphComparison> {
        if candidates.is_empty() {
            return Err(CgnnError::shape("no candidate graphs to compare"));
        }
        let topologies = candidates
            .iter()
            .map(|skeleton| resolve(*skeleton, sample))
            .collect::<CgnnResult<Vec<Topology>>>()?;
        let nodes = topologies.iter().map(Topology::node_count).max().unwrap_or(0);
        let _span = cgnn_core::graph_span!(nodes, sample.nrows()).entered();

        let data = self.prepare(sample);
        let runs = self
            .orchestrator
            .execute(|ctx| self.run_candidates(&data, &topologies, ctx))?;
        let losses = aggregate_means(&runs);
        let best = losses
            .iter()
            .enumerate()
            .min_by(|a, b| a.1.total_cmp(b.1))
            .map(|(idx, _)| idx)
            .unwrap_or(0);
        info!(candidates = losses.len(), best, loss = losses.get(best).copied(), "graphs scored");

        Ok(GraphComparison { losses, best, runs })
    }

    /// Train one graph model on the full sample and return a generated joint
    /// sample with the skeleton's node names as columns.
    ///
    /// No subsampling or standardisation: the output is on the input's scale.
    pub fn generate(&self, sample: &Sample, skeleton: &dyn Skeleton) -> CgnnResult<Sample> {
        let topology = resolve(skeleton, sample)?;
        let data = sample.select(topology.names())?;
        let _span = cgnn_core::graph_span!(topology.node_count(), data.nrows()).entered();

        let ctx = self.orchestrator.context_for(0)?;
        let _run = cgnn_core::run_span!(ctx.run, ctx.device).entered();
        let plan = GenerationPlan::from_topology(&topology);
        let seed = ctx.rng().random::<u64>();

        let generated = with_fresh_state(self.config.training.max_attempts, |attempt| {
            let _span = cgnn_core::training_span!(plan.label(), attempt).entered();
            let mut model = GeneratorModel::build(
                &self.config,
                plan.clone(),
                data.nrows(),
                attempt_rng(seed, attempt),
            )?
            .with_deadline(ctx.deadline);
            model.train(data.values(), self.config.training.train_epochs)?;
            let out = model.generate(data.values());
            model.terminate();
            out
        })?;
        info!(rows = generated.nrows(), columns = generated.ncols(), "joint sample generated");

        Sample::new(topology.names().to_vec(), generated)
    }

    fn prepare(&self, sample: &Sample) -> Sample {
        if self.config.sampling.standardize {
            sample.standardized()
        } else {
            sample.clone()
        }
    }

    /// One run: the same rows and model seed for every candidate.
    fn run_candidates(&self, data: &Sample, topologies: &[Topology], ctx: &RunContext) -> CgnnResult<RunResult> {
        let mut rng = ctx.rng();
        let rows = data.subsample(self.config.sampling.max_points, &mut rng);
        let model_seed: u64 = rng.random();

        let losses = topologies
            .iter()
            .map(|topology| {
                let columns = rows.select(topology.names())?;
                let plan = GenerationPlan::from_topology(topology);
                fit_and_evaluate(&self.config, &plan, columns.values(), model_seed, ctx.deadline)
            })
            .collect::<CgnnResult<Vec<f64>>>()?;

        Ok(RunResult {
            run: ctx.run,
            device: ctx.device,
            rows_used: rows.nrows(),
            losses,
        })
    }
}
