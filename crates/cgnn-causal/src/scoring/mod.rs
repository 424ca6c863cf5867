//! Pairwise and full-graph causal scorers.

pub mod graph;
pub mod pairwise;

pub use graph::{GraphComparison, GraphMode, GraphOutput, GraphScore, GraphScorer};
pub use pairwise::{normalized_score, PairScore, PairwiseScorer};

use ndarray::ArrayView2;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use cgnn_core::config::CgnnConfig;
use cgnn_core::errors::CgnnResult;

use crate::generator::{with_fresh_state, GenerationPlan, GeneratorModel};
use crate::orchestrator::Deadline;

/// Train and evaluate one hypothesis, rebuilding the model on non-convergence.
///
/// Attempt `k` draws its weights and noise from stream `k` of the generator
/// seeded with `seed`, so a retry never reuses the failed attempt's weights.
pub(crate) fn fit_and_evaluate(
    config: &CgnnConfig,
    plan: &GenerationPlan,
    data: ArrayView2<'_, f64>,
    seed: u64,
    deadline: Option<Deadline>,
) -> CgnnResult<f64> {
    let label = plan.label();
    with_fresh_state(config.training.max_attempts, |attempt| {
        let _span = cgnn_core::training_span!(label, attempt).entered();
        fit_once(config, plan, data, attempt_rng(seed, attempt), deadline)
    })
}

/// Build, train, evaluate and terminate a single model.
fn fit_once(
    config: &CgnnConfig,
    plan: &GenerationPlan,
    data: ArrayView2<'_, f64>,
    rng: ChaCha8Rng,
    deadline: Option<Deadline>,
) -> CgnnResult<f64> {
    let mut model =
        GeneratorModel::build(config, plan.clone(), data.nrows(), rng)?.with_deadline(deadline);
    model.train(data, config.training.train_epochs)?;
    let loss = model.evaluate(data, config.training.test_epochs);
    model.terminate();
    loss
}

pub(crate) fn attempt_rng(seed: u64, attempt: u32) -> ChaCha8Rng {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    rng.set_stream(u64::from(attempt));
    rng
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgnn_core::config::MechanismKind;
    use cgnn_core::errors::CgnnError;
    use ndarray::Array2;

    fn small_config() -> CgnnConfig {
        let mut config = CgnnConfig::default();
        config.generator.hidden_units = 5;
        config.training.train_epochs = 20;
        config.training.test_epochs = 5;
        config
    }

    /// Polynomial weights of infinite scale: `inf · 0` at the row where the
    /// parent is exactly zero makes the first loss NaN.
    fn diverging_config() -> CgnnConfig {
        let mut config = small_config();
        config.generator.mechanism = MechanismKind::Polynomial;
        config.generator.init_std = f64::INFINITY;
        config
    }

    fn pair_data(n: usize) -> Array2<f64> {
        Array2::from_shape_fn((n, 2), |(i, j)| {
            let x = i as f64 / n as f64 - 0.5;
            if j == 0 {
                x
            } else {
                2.0 * x
            }
        })
    }

    #[test]
    fn attempts_start_from_different_weights() {
        let config = small_config();
        let plan = GenerationPlan::pairwise("a", "b");
        let first = GeneratorModel::build(&config, plan.clone(), 10, attempt_rng(11, 1)).unwrap();
        let second = GeneratorModel::build(&config, plan.clone(), 10, attempt_rng(11, 2)).unwrap();
        let again = GeneratorModel::build(&config, plan, 10, attempt_rng(11, 1)).unwrap();

        assert_eq!(first.parameters().len(), second.parameters().len());
        assert_ne!(first.parameters(), second.parameters());
        assert_eq!(first.parameters(), again.parameters());
    }

    #[test]
    fn diverged_first_attempt_is_retried_once_on_the_next_stream() {
        let config = small_config();
        let diverging = diverging_config();
        let plan = GenerationPlan::pairwise("a", "b");
        let data = pair_data(10);

        let mut attempts = Vec::new();
        let loss = with_fresh_state(config.training.max_attempts, |attempt| {
            attempts.push(attempt);
            let cfg = if attempt == 1 { &diverging } else { &config };
            fit_once(cfg, &plan, data.view(), attempt_rng(7, attempt), None)
        })
        .unwrap();

        assert_eq!(attempts, vec![1, 2]);
        assert!(loss.is_finite());
        let second = fit_once(&config, &plan, data.view(), attempt_rng(7, 2), None).unwrap();
        assert_eq!(loss, second);
    }

    #[test]
    fn converging_fit_uses_the_first_stream() {
        let config = small_config();
        let plan = GenerationPlan::pairwise("a", "b");
        let data = pair_data(10);
        let loss = fit_and_evaluate(&config, &plan, data.view(), 3, None).unwrap();
        let first = fit_once(&config, &plan, data.view(), attempt_rng(3, 1), None).unwrap();
        assert_eq!(loss, first);
    }

    #[test]
    fn persistent_divergence_exhausts_the_attempts() {
        let mut config = diverging_config();
        config.training.max_attempts = 3;
        let plan = GenerationPlan::pairwise("a", "b");
        let data = pair_data(10);
        let err = fit_and_evaluate(&config, &plan, data.view(), 3, None).unwrap_err();
        assert!(matches!(err, CgnnError::NonConvergence { attempts: 3, .. }));
    }
}
