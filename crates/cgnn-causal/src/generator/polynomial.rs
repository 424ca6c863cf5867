use ndarray::{Array1, Array2, ArrayView1, ArrayView2};
use rand::Rng;
use rand_distr::{Distribution, StandardNormal};

use super::mechanism::{stack_inputs, Gradients, Mechanism, MechanismPass};

/// Second-degree polynomial mechanism.
///
/// With `v = [1, parent₁/m, …, parent_p/m, noise]` and `m = (p+2)(p+1)/2`,
/// the output is `Σ_{a<b} W_c·v_a·v_b`, one weight per cross term.
#[derive(Debug, Clone)]
pub struct PolynomialMechanism {
    parents: usize,
    params: Vec<f64>,
}

impl PolynomialMechanism {
    pub fn new<R: Rng>(parents: usize, init_std: f64, rng: &mut R) -> Self {
        let count = Self::term_count(parents);
        let params = (0..count)
            .map(|_| {
                let z: f64 = StandardNormal.sample(&mut *rng);
                z * init_std
            })
            .collect();
        Self { parents, params }
    }

    fn term_count(parents: usize) -> usize {
        (parents + 2) * (parents + 1) / 2
    }

    fn basis_width(&self) -> usize {
        self.parents + 2
    }
}

impl Mechanism for PolynomialMechanism {
    fn input_width(&self) -> usize {
        self.parents + 1
    }

    fn parameter_count(&self) -> usize {
        self.params.len()
    }

    fn forward(&self, parents: ArrayView2<'_, f64>, noise: ArrayView1<'_, f64>) -> MechanismPass {
        let inputs = stack_inputs(parents, noise);
        let n = inputs.nrows();
        let width = self.basis_width();
        let scale = 1.0 / self.params.len() as f64;

        let mut basis = Array2::zeros((n, width));
        let mut output = Array1::zeros(n);
        for i in 0..n {
            basis[[i, 0]] = 1.0;
            for j in 0..self.parents {
                basis[[i, j + 1]] = inputs[[i, j]] * scale;
            }
            basis[[i, width - 1]] = inputs[[i, self.parents]];

            let mut term = 0;
            for a in 0..width {
                for b in (a + 1)..width {
                    output[i] += self.params[term] * basis[[i, a]] * basis[[i, b]];
                    term += 1;
                }
            }
        }

        MechanismPass {
            inputs,
            hidden: basis,
            output,
        }
    }

    fn backward(&self, pass: &MechanismPass, grad_output: ArrayView1<'_, f64>) -> Gradients {
        let n = pass.inputs.nrows();
        let width = self.basis_width();
        let scale = 1.0 / self.params.len() as f64;

        let mut params = vec![0.0; self.params.len()];
        let mut inputs = Array2::zeros((n, self.input_width()));
        let mut d_basis = vec![0.0; width];
        for i in 0..n {
            let g = grad_output[i];
            d_basis.iter_mut().for_each(|d| *d = 0.0);
            let mut term = 0;
            for a in 0..width {
                for b in (a + 1)..width {
                    let va = pass.hidden[[i, a]];
                    let vb = pass.hidden[[i, b]];
                    params[term] += g * va * vb;
                    d_basis[a] += g * self.params[term] * vb;
                    d_basis[b] += g * self.params[term] * va;
                    term += 1;
                }
            }
            for j in 0..self.parents {
                inputs[[i, j]] = d_basis[j + 1] * scale;
            }
            inputs[[i, self.parents]] = d_basis[width - 1];
        }

        Gradients { params, inputs }
    }

    fn parameters(&self) -> &[f64] {
        &self.params
    }

    fn parameters_mut(&mut self) -> &mut [f64] {
        &mut self.params
    }
}
