use ndarray::{Array1, Array2, ArrayView1, ArrayView2};
use rand::Rng;
use rand_distr::{Distribution, StandardNormal};

use super::mechanism::{stack_inputs, Gradients, Mechanism, MechanismPass};

/// One hidden ReLU layer over `[parents, noise]`.
///
/// Parameters are stored flat as `W_in ((p+1)×h) | b_in (h) | w_out (h) | b_out`.
#[derive(Debug, Clone)]
pub struct MlpMechanism {
    inputs: usize,
    hidden: usize,
    params: Vec<f64>,
}

impl MlpMechanism {
    pub fn new<R: Rng>(parents: usize, hidden: usize, init_std: f64, rng: &mut R) -> Self {
        let inputs = parents + 1;
        let count = inputs * hidden + 2 * hidden + 1;
        let mut params = vec![0.0; count];
        let (w_in, rest) = params.split_at_mut(inputs * hidden);
        let w_out = &mut rest[hidden..2 * hidden];
        for w in w_in.iter_mut().chain(w_out.iter_mut()) {
            let z: f64 = StandardNormal.sample(&mut *rng);
            *w = z * init_std;
        }
        Self {
            inputs,
            hidden,
            params,
        }
    }

    fn b_in_offset(&self) -> usize {
        self.inputs * self.hidden
    }

    fn w_out_offset(&self) -> usize {
        self.b_in_offset() + self.hidden
    }

    fn b_out_offset(&self) -> usize {
        self.w_out_offset() + self.hidden
    }
}

impl Mechanism for MlpMechanism {
    fn input_width(&self) -> usize {
        self.inputs
    }

    fn parameter_count(&self) -> usize {
        self.params.len()
    }

    fn forward(&self, parents: ArrayView2<'_, f64>, noise: ArrayView1<'_, f64>) -> MechanismPass {
        let inputs = stack_inputs(parents, noise);
        let n = inputs.nrows();
        let h = self.hidden;
        let (b_in, w_out, b_out) = (self.b_in_offset(), self.w_out_offset(), self.b_out_offset());

        let mut pre = Array2::zeros((n, h));
        let mut output = Array1::from_elem(n, self.params[b_out]);
        for i in 0..n {
            for k in 0..h {
                let mut acc = self.params[b_in + k];
                for j in 0..self.inputs {
                    acc += inputs[[i, j]] * self.params[j * h + k];
                }
                pre[[i, k]] = acc;
                if acc > 0.0 {
                    output[i] += acc * self.params[w_out + k];
                }
            }
        }

        MechanismPass {
            inputs,
            hidden: pre,
            output,
        }
    }

    fn backward(&self, pass: &MechanismPass, grad_output: ArrayView1<'_, f64>) -> Gradients {
        let n = pass.inputs.nrows();
        let h = self.hidden;
        let (b_in, w_out, b_out) = (self.b_in_offset(), self.w_out_offset(), self.b_out_offset());

        let mut params = vec![0.0; self.params.len()];
        let mut inputs = Array2::zeros((n, self.inputs));
        for i in 0..n {
            let g = grad_output[i];
            params[b_out] += g;
            for k in 0..h {
                let pre = pass.hidden[[i, k]];
                if pre <= 0.0 {
                    continue;
                }
                params[w_out + k] += g * pre;
                let d_pre = g * self.params[w_out + k];
                params[b_in + k] += d_pre;
                for j in 0..self.inputs {
                    params[j * h + k] += pass.inputs[[i, j]] * d_pre;
                    inputs[[i, j]] += d_pre * self.params[j * h + k];
                }
            }
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
