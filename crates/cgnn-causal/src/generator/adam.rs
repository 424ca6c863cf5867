use cgnn_core::constants::{ADAM_BETA1, ADAM_BETA2, ADAM_EPSILON};

/// Adam optimiser state for one flat parameter vector.
#[derive(Debug, Clone)]
pub struct Adam {
    learning_rate: f64,
    first_moment: Vec<f64>,
    second_moment: Vec<f64>,
    step: i32,
}

impl Adam {
    pub fn new(parameter_count: usize, learning_rate: f64) -> Self {
        Self {
            learning_rate,
            first_moment: vec![0.0; parameter_count],
            second_moment: vec![0.0; parameter_count],
            step: 0,
        }
    }

    pub fn steps_taken(&self) -> i32 {
        self.step
    }

    /// Apply one bias-corrected update in place.
    pub fn step(&mut self, params: &mut [f64], grads: &[f64]) {
        debug_assert_eq!(params.len(), grads.len());
        self.step = self.step.saturating_add(1);
        let correction1 = 1.0 - ADAM_BETA1.powi(self.step);
        let correction2 = 1.0 - ADAM_BETA2.powi(self.step);

        for (((p, g), m), v) in params
            .iter_mut()
            .zip(grads)
            .zip(self.first_moment.iter_mut())
            .zip(self.second_moment.iter_mut())
        {
            *m = ADAM_BETA1 * *m + (1.0 - ADAM_BETA1) * g;
            *v = ADAM_BETA2 * *v + (1.0 - ADAM_BETA2) * g * g;
            let m_hat = *m / correction1;
            let v_hat = *v / correction2;
            *p -= self.learning_rate * m_hat / (v_hat.sqrt() + ADAM_EPSILON);
        }
    }
}
