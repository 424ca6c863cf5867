//! Pairwise orientation: which of A→B and B→A does a generator fit better?

use std::collections::HashSet;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use cgnn_core::config::CgnnConfig;
use cgnn_core::constants::DEGENERATE_LOSS_EPSILON;
use cgnn_core::errors::{CgnnError, CgnnResult};
use cgnn_core::models::{aggregate_means, RunResult, Sample};
use cgnn_core::traits::{EdgeOrder, Skeleton};

use super::fit_and_evaluate;
use crate::generator::GenerationPlan;
use crate::graph::CausalGraph;
use crate::orchestrator::{AcceleratorPool, RunContext, RunOrchestrator};

/// Result of scoring one pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairScore {
    /// In [−1, 1]: positive favours A→B, negative favours B→A.
    pub score: f64,
    pub mean_ab: f64,
    pub mean_ba: f64,
    /// Per-run `[loss_ab, loss_ba]`, ordered by run index.
    pub runs: Vec<RunResult>,
}

/// `(mean_ba − mean_ab) / (mean_ba + mean_ab)`.
///
/// Fails with `DegenerateScore` when the sum is at or below
/// [`DEGENERATE_LOSS_EPSILON`]. Both means are non-negative, so the score
/// lies in the closed interval [−1, 1]; it is ±1 only when one direction
/// fits exactly (zero loss) and the other does not.
pub fn normalized_score(mean_ab: f64, mean_ba: f64) -> CgnnResult<f64> {
    let total = mean_ab + mean_ba;
    if total <= DEGENERATE_LOSS_EPSILON {
        return Err(CgnnError::DegenerateScore { mean_ab, mean_ba });
    }
    Ok((mean_ba - mean_ab) / total)
}

/// Scores A→B against B→A over `runs.runs` independent runs.
pub struct PairwiseScorer {
    config: CgnnConfig,
    orchestrator: RunOrchestrator,
}

impl PairwiseScorer {
    /// Validates `config` and sets up the worker pool.
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

    /// Score two equal-length vectors.
    pub fn score(&self, a: &[f64], b: &[f64]) -> CgnnResult<PairScore> {
        let sample = Sample::from_pair(a, b)?;
        self.score_sample(&sample)
    }

    /// The scalar score only.
    pub fn predict(&self, a: &[f64], b: &[f64]) -> CgnnResult<f64> {
        self.score(a, b).map(|s| s.score)
    }

    /// Score a two-column sample, first column as A.
    pub fn score_sample(&self, sample: &Sample) -> CgnnResult<PairScore> {
        if sample.ncols() != 2 {
            return Err(CgnnError::shape(format!(
                "pairwise scoring needs 2 columns, got {}",
                sample.ncols()
            )));
        }
        let names = sample.names();
        let _span = cgnn_core::pairwise_span!(names[0], names[1], sample.nrows()).entered();

        let data = if self.config.sampling.standardize {
            sample.standardized()
        } else {
            sample.clone()
        };
        let runs = self.orchestrator.execute(|ctx| self.run_once(&data, ctx))?;

        let means = aggregate_means(&runs);
        let (mean_ab, mean_ba) = match means.as_slice() {
            [ab, ba] => (*ab, *ba),
            _ => {
                return Err(CgnnError::InvalidState {
                    details: format!("expected 2 hypothesis means, got {}", means.len()),
                })
            }
        };
        let score = normalized_score(mean_ab, mean_ba)?;
        info!(score, mean_ab, mean_ba, runs = runs.len(), "pair scored");

        Ok(PairScore {
            score,
            mean_ab,
            mean_ba,
            runs,
        })
    }

    /// One run: subsample once, then fit each direction on the same rows
    /// with its own independently seeded model.
    fn run_once(&self, data: &Sample, ctx: &RunContext) -> CgnnResult<RunResult> {
        let mut rng = ctx.rng();
        let rows = data.subsample(self.config.sampling.max_points, &mut rng);
        let seed_ab: u64 = rng.random();
        let seed_ba: u64 = rng.random();
        let names = rows.names();

        let forward = GenerationPlan::pairwise(&names[0], &names[1]);
        let loss_ab = fit_and_evaluate(&self.config, &forward, rows.values(), seed_ab, ctx.deadline)?;

        let swapped = rows.swapped()?;
        let backward = GenerationPlan::pairwise(&names[1], &names[0]);
        let loss_ba = fit_and_evaluate(
            &self.config,
            &backward,
            swapped.values(),
            seed_ba,
            ctx.deadline,
        )?;

        Ok(RunResult {
            run: ctx.run,
            device: ctx.device,
            rows_used: rows.nrows(),
            losses: vec![loss_ab, loss_ba],
        })
    }

    /// Orient every skeleton edge by its pairwise score.
    ///
    /// Edge directions in `skeleton` are ignored. Edges are inserted by
    /// descending |score|; an orientation that would close a cycle is
    /// inserted reversed, so the result is always acyclic.
    pub fn orient_skeleton(&self, sample: &Sample, skeleton: &dyn Skeleton) -> CgnnResult<CausalGraph> {
        let mut seen = HashSet::new();
        let mut scored = Vec::new();
        for edge in skeleton.edges(EdgeOrder::Insertion) {
            let key = if edge.cause <= edge.effect {
                (edge.cause.clone(), edge.effect.clone())
            } else {
                (edge.effect.clone(), edge.cause.clone())
            };
            if edge.cause == edge.effect || !seen.insert(key) {
                continue;
            }
            let pair = sample.select(&[edge.cause.as_str(), edge.effect.as_str()])?;
            let result = self.score_sample(&pair)?;
            scored.push((edge.cause, edge.effect, result.score));
        }
        scored.sort_by(|a, b| b.2.abs().total_cmp(&a.2.abs()));

        let mut graph = CausalGraph::new();
        for node in skeleton.list_nodes() {
            graph.ensure_node(&node);
        }
        for (a, b, score) in scored {
            let (cause, effect, strength) = if score >= 0.0 { (a, b, score) } else { (b, a, -score) };
            if graph.would_create_cycle(&cause, &effect) {
                warn!(%cause, %effect, score = strength, "orientation closes a cycle, inserting reversed");
                graph.add_edge(&effect, &cause, -strength);
            } else {
                graph.add_edge(&cause, &effect, strength);
            }
        }
        Ok(graph)
    }
}
