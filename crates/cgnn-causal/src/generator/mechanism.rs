//! Per-variable generative mechanisms.

use ndarray::{Array1, Array2, ArrayView1, ArrayView2};
use rand::Rng;

use cgnn_core::config::{GeneratorConfig, MechanismKind};

use super::mlp::MlpMechanism;
use super::polynomial::PolynomialMechanism;

/// Intermediate values of one forward pass, kept for the backward pass.
#[derive(Debug, Clone)]
pub struct MechanismPass {
    /// N×(p+1): parents followed by the noise column.
    pub inputs: Array2<f64>,
    /// Mechanism-specific activations (hidden pre-activations or monomial basis).
    pub hidden: Array2<f64>,
    /// Generated values, length N.
    pub output: Array1<f64>,
}

/// Gradients produced by [`Mechanism::backward`].
#[derive(Debug, Clone)]
pub struct Gradients {
    /// Same layout as the mechanism's flat parameter vector.
    pub params: Vec<f64>,
    /// N×(p+1), gradient with respect to each parent column and the noise column.
    pub inputs: Array2<f64>,
}

/// A trainable map from (parents, noise) to one generated column.
pub trait Mechanism: Send + std::fmt::Debug {
    /// Number of parent columns plus one for noise.
    fn input_width(&self) -> usize;

    fn parameter_count(&self) -> usize;

    fn forward(&self, parents: ArrayView2<'_, f64>, noise: ArrayView1<'_, f64>) -> MechanismPass;

    fn backward(&self, pass: &MechanismPass, grad_output: ArrayView1<'_, f64>) -> Gradients;

    fn parameters(&self) -> &[f64];

    fn parameters_mut(&mut self) -> &mut [f64];
}

/// Stack parents and the noise column into one N×(p+1) input matrix.
pub(crate) fn stack_inputs(parents: ArrayView2<'_, f64>, noise: ArrayView1<'_, f64>) -> Array2<f64> {
    let n = noise.len();
    let p = parents.ncols();
    let mut inputs = Array2::zeros((n, p + 1));
    for i in 0..n {
        for j in 0..p {
            inputs[[i, j]] = parents[[i, j]];
        }
        inputs[[i, p]] = noise[i];
    }
    inputs
}

/// Construct a freshly initialised mechanism with `parents` inputs.
pub fn build_mechanism<R: Rng>(
    config: &GeneratorConfig,
    parents: usize,
    rng: &mut R,
) -> Box<dyn Mechanism> {
    match config.mechanism {
        MechanismKind::Mlp => Box::new(MlpMechanism::new(
            parents,
            config.hidden_units,
            config.init_std,
            rng,
        )),
        MechanismKind::Polynomial => {
            Box::new(PolynomialMechanism::new(parents, config.init_std, rng))
        }
    }
}
