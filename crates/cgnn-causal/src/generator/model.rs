//! A trainable generative model of the joint distribution over a plan's columns.

use ndarray::{Array1, Array2, ArrayView2, Axis};
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, StandardNormal};
use tracing::debug;

use cgnn_core::config::CgnnConfig;
use cgnn_core::constants::TRAINING_LOG_INTERVAL;
use cgnn_core::errors::{CgnnError, CgnnResult, ConfigError};

use super::adam::Adam;
use super::mechanism::{build_mechanism, Mechanism, MechanismPass};
use super::plan::{Conditioning, GenerationPlan};
use crate::metric::{build_metric, DistanceMetric};
use crate::orchestrator::Deadline;

/// Lifecycle of a [`GeneratorModel`]. A terminated model is unusable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelState {
    Built,
    Training,
    Converged,
    Evaluated,
    Terminated,
}

/// Per-column mechanisms, their optimisers, the metric, and the noise stream
/// for one hypothesis. Single use: build, train, evaluate or generate, terminate.
pub struct GeneratorModel {
    plan: GenerationPlan,
    rows: usize,
    mechanisms: Vec<Box<dyn Mechanism>>,
    optimisers: Vec<Adam>,
    metric: Box<dyn DistanceMetric>,
    rng: ChaCha8Rng,
    state: ModelState,
    deadline: Option<Deadline>,
}

impl std::fmt::Debug for GeneratorModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeneratorModel")
            .field("plan", &self.plan)
            .field("rows", &self.rows)
            .field("metric", &self.metric.name())
            .field("state", &self.state)
            .finish()
    }
}

impl GeneratorModel {
    /// Allocate freshly initialised weights for every step of `plan`.
    pub fn build(
        config: &CgnnConfig,
        plan: GenerationPlan,
        rows: usize,
        mut rng: ChaCha8Rng,
    ) -> CgnnResult<Self> {
        if rows == 0 {
            return Err(CgnnError::shape("generator model needs at least one row"));
        }
        if plan.steps().is_empty() {
            return Err(CgnnError::shape("generation plan has no target columns"));
        }
        let mechanisms: Vec<Box<dyn Mechanism>> = plan
            .steps()
            .iter()
            .map(|step| build_mechanism(&config.generator, step.parents.len(), &mut rng))
            .collect();
        let optimisers = mechanisms
            .iter()
            .map(|m| Adam::new(m.parameter_count(), config.generator.learning_rate))
            .collect();
        let metric = build_metric(&config.metric, plan.columns().len(), &mut rng);

        Ok(Self {
            plan,
            rows,
            mechanisms,
            optimisers,
            metric,
            rng,
            state: ModelState::Built,
            deadline: None,
        })
    }

    pub fn with_deadline(mut self, deadline: Option<Deadline>) -> Self {
        self.deadline = deadline;
        self
    }

    pub fn state(&self) -> ModelState {
        self.state
    }

    pub fn plan(&self) -> &GenerationPlan {
        &self.plan
    }

    pub fn parameter_count(&self) -> usize {
        self.mechanisms.iter().map(|m| m.parameter_count()).sum()
    }

    /// Every mechanism's weights, concatenated in plan order.
    pub fn parameters(&self) -> Vec<f64> {
        self.mechanisms
            .iter()
            .flat_map(|m| m.parameters().iter().copied())
            .collect()
    }

    /// Fit the mechanisms for `epochs` Adam steps; returns the final-epoch loss.
    ///
    /// A non-finite loss aborts immediately with `NonConvergence`; the model
    /// must then be discarded.
    pub fn train(&mut self, data: ArrayView2<'_, f64>, epochs: usize) -> CgnnResult<f64> {
        self.require(&[ModelState::Built, ModelState::Converged], "train")?;
        self.check_input(&data)?;
        require_epochs(epochs, "training.train_epochs")?;

        self.state = ModelState::Training;
        let mut loss = f64::NAN;
        for epoch in 1..=epochs {
            self.check_deadline()?;
            let (generated, passes) = self.simulate(data);
            let (value, grad) = self.metric.distance_with_gradient(data, generated.view())?;
            if !value.is_finite() {
                return Err(CgnnError::NonConvergence {
                    attempts: 1,
                    loss: value,
                });
            }
            let grads = self.backward(&passes, grad);
            for ((mechanism, optimiser), g) in self
                .mechanisms
                .iter_mut()
                .zip(self.optimisers.iter_mut())
                .zip(grads)
            {
                optimiser.step(mechanism.parameters_mut(), &g);
            }
            loss = value;
            if epoch % TRAINING_LOG_INTERVAL == 0 {
                debug!(epoch, loss, "training progress");
            }
        }
        self.state = ModelState::Converged;
        Ok(loss)
    }

    /// Mean loss over `epochs` forward passes with fresh noise, no updates.
    pub fn evaluate(&mut self, data: ArrayView2<'_, f64>, epochs: usize) -> CgnnResult<f64> {
        self.require(
            &[ModelState::Built, ModelState::Converged, ModelState::Evaluated],
            "evaluate",
        )?;
        self.check_input(&data)?;
        require_epochs(epochs, "training.test_epochs")?;

        let mut total = 0.0;
        for _ in 0..epochs {
            self.check_deadline()?;
            let (generated, _) = self.simulate(data);
            total += self.metric.distance(data, generated.view())?;
        }
        let mean = total / epochs as f64;
        if !mean.is_finite() {
            return Err(CgnnError::NonConvergence {
                attempts: 1,
                loss: mean,
            });
        }
        self.state = ModelState::Evaluated;
        Ok(mean)
    }

    /// One freshly generated joint sample with the shape of `data`.
    pub fn generate(&mut self, data: ArrayView2<'_, f64>) -> CgnnResult<Array2<f64>> {
        self.require(
            &[ModelState::Built, ModelState::Converged, ModelState::Evaluated],
            "generate",
        )?;
        self.check_input(&data)?;
        let (generated, _) = self.simulate(data);
        if let Some(((row, col), value)) = generated.indexed_iter().find(|(_, v)| !v.is_finite()) {
            debug!(row, col, value, "non-finite generated value");
            return Err(CgnnError::NonConvergence {
                attempts: 1,
                loss: f64::NAN,
            });
        }
        self.state = ModelState::Evaluated;
        Ok(generated)
    }

    /// Release the weights. Every later call fails with `InvalidState`.
    pub fn terminate(&mut self) {
        self.mechanisms.clear();
        self.optimisers.clear();
        self.state = ModelState::Terminated;
    }

    fn require(&self, allowed: &[ModelState], operation: &str) -> CgnnResult<()> {
        if allowed.contains(&self.state) {
            return Ok(());
        }
        Err(CgnnError::InvalidState {
            details: format!("cannot {operation} a model in state {:?}", self.state),
        })
    }

    fn check_input(&self, data: &ArrayView2<'_, f64>) -> CgnnResult<()> {
        let expected = (self.rows, self.plan.columns().len());
        if data.dim() != expected {
            return Err(CgnnError::shape(format!(
                "model built for {expected:?} data, got {:?}",
                data.dim()
            )));
        }
        Ok(())
    }

    fn check_deadline(&self) -> CgnnResult<()> {
        match &self.deadline {
            Some(deadline) => deadline.check(),
            None => Ok(()),
        }
    }

    /// Forward pass over every step in order, with fresh noise per step.
    fn simulate(&mut self, data: ArrayView2<'_, f64>) -> (Array2<f64>, Vec<MechanismPass>) {
        let n = data.nrows();
        let conditioning = self.plan.conditioning();
        let mut generated = match conditioning {
            Conditioning::Observed => data.to_owned(),
            Conditioning::Generated => Array2::zeros(data.dim()),
        };
        let mut passes = Vec::with_capacity(self.mechanisms.len());

        for (step, mechanism) in self.plan.steps().iter().zip(&self.mechanisms) {
            let parents = match conditioning {
                Conditioning::Observed => data.select(Axis(1), &step.parents),
                Conditioning::Generated => generated.select(Axis(1), &step.parents),
            };
            let noise: Array1<f64> =
                Array1::from_shape_fn(n, |_| StandardNormal.sample(&mut self.rng));
            let pass = mechanism.forward(parents.view(), noise.view());
            generated.column_mut(step.target).assign(&pass.output);
            passes.push(pass);
        }
        (generated, passes)
    }

    /// Parameter gradients per mechanism, given ∂loss/∂generated.
    ///
    /// Under generated conditioning, each child's input gradient is pushed
    /// back into its parents' columns before those parents are visited.
    fn backward(&self, passes: &[MechanismPass], mut grad: Array2<f64>) -> Vec<Vec<f64>> {
        let conditioning = self.plan.conditioning();
        let mut param_grads = vec![Vec::new(); self.mechanisms.len()];
        for (idx, step) in self.plan.steps().iter().enumerate().rev() {
            let grad_output = grad.column(step.target).to_owned();
            let grads = self.mechanisms[idx].backward(&passes[idx], grad_output.view());
            if conditioning == Conditioning::Generated {
                for (slot, &parent) in step.parents.iter().enumerate() {
                    let mut column = grad.column_mut(parent);
                    column += &grads.inputs.column(slot);
                }
            }
            param_grads[idx] = grads.params;
        }
        param_grads
    }
}

fn require_epochs(epochs: usize, field: &str) -> CgnnResult<()> {
    if epochs == 0 {
        return Err(ConfigError::InvalidValue {
            field: field.to_string(),
            message: "epoch count must be > 0".to_string(),
        }
        .into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgnn_core::config::MechanismKind;
    use ndarray::Array2;
    use rand::SeedableRng;

    fn small_config() -> CgnnConfig {
        let mut config = CgnnConfig::default();
        config.generator.hidden_units = 5;
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

    fn model(config: &CgnnConfig, rows: usize) -> GeneratorModel {
        GeneratorModel::build(
            config,
            GenerationPlan::pairwise("a", "b"),
            rows,
            ChaCha8Rng::seed_from_u64(1),
        )
        .unwrap()
    }

    #[test]
    fn training_reduces_loss() {
        let config = small_config();
        let data = pair_data(40);
        let mut m = model(&config, 40);
        let before = m.evaluate(data.view(), 5).unwrap();
        let mut m = model(&config, 40);
        m.train(data.view(), 300).unwrap();
        assert_eq!(m.state(), ModelState::Converged);
        let after = m.evaluate(data.view(), 5).unwrap();
        assert!(after < before, "loss {before} -> {after}");
        assert_eq!(m.state(), ModelState::Evaluated);
    }

    #[test]
    fn zero_epochs_is_invalid_config() {
        let config = small_config();
        let data = pair_data(10);
        let mut m = model(&config, 10);
        let err = m.train(data.view(), 0).unwrap_err();
        assert!(matches!(err, CgnnError::Config(ConfigError::InvalidValue { .. })));
    }

    #[test]
    fn wrong_row_count_is_rejected() {
        let config = small_config();
        let mut m = model(&config, 10);
        let err = m.train(pair_data(12).view(), 1).unwrap_err();
        assert!(matches!(err, CgnnError::ShapeMismatch { .. }));
    }

    #[test]
    fn terminated_model_rejects_every_call() {
        let config = small_config();
        let data = pair_data(10);
        let mut m = model(&config, 10);
        m.terminate();
        assert!(matches!(m.train(data.view(), 1), Err(CgnnError::InvalidState { .. })));
        assert!(matches!(m.evaluate(data.view(), 1), Err(CgnnError::InvalidState { .. })));
        assert!(matches!(m.generate(data.view()), Err(CgnnError::InvalidState { .. })));
    }

    #[test]
    fn exploding_weights_surface_as_non_convergence() {
        let mut config = small_config();
        config.generator.mechanism = MechanismKind::Polynomial;
        config.generator.init_std = f64::INFINITY;
        let data = pair_data(10);
        let mut m = model(&config, 10);
        let err = m.train(data.view(), 3).unwrap_err();
        assert!(matches!(err, CgnnError::NonConvergence { .. }));
        // A failed model cannot be trained again.
        assert!(matches!(m.train(data.view(), 1), Err(CgnnError::InvalidState { .. })));
    }

    #[test]
    fn observed_columns_pass_through_generation() {
        let config = small_config();
        let data = pair_data(10);
        let mut m = model(&config, 10);
        let generated = m.generate(data.view()).unwrap();
        assert_eq!(generated.column(0), data.column(0));
    }
}
