//! Random Fourier feature approximation of the Gaussian-mixture MMD.

use std::f64::consts::TAU;

use cgnn_core::errors::{CgnnError, CgnnResult};
use ndarray::{Array1, Array2, ArrayView2, Axis};
use rand::Rng;
use rand_distr::{Distribution, StandardNormal};

use super::{check_shapes, DistanceMetric};

/// Random feature map for one bandwidth: `φ(x) = √(2/F)·cos(x·W + c)`.
#[derive(Debug, Clone)]
struct FeatureMap {
    /// K×F, entries drawn from N(0, 1/b).
    frequencies: Array2<f64>,
    /// F phases drawn from U(0, 2π).
    phases: Array1<f64>,
}

impl FeatureMap {
    fn sample<R: Rng>(dims: usize, features: usize, bandwidth: f64, rng: &mut R) -> Self {
        let scale = 1.0 / bandwidth.sqrt();
        let frequencies = Array2::from_shape_fn((dims, features), |_| {
            let z: f64 = StandardNormal.sample(&mut *rng);
            z * scale
        });
        let phases = Array1::from_shape_fn(features, |_| rng.random_range(0.0..TAU));
        Self { frequencies, phases }
    }

    /// `x·W + c`, N×F.
    fn project(&self, x: &ArrayView2<'_, f64>) -> Array2<f64> {
        let mut proj = x.dot(&self.frequencies);
        proj += &self.phases;
        proj
    }
}

/// Linear-time MMD estimate: per bandwidth, the squared distance between the
/// mean random-feature embeddings of the two samples, summed over bandwidths.
///
/// The feature maps are drawn once at construction and reused for every call.
#[derive(Debug, Clone)]
pub struct FourierMmd {
    dims: usize,
    features: usize,
    maps: Vec<FeatureMap>,
}

impl FourierMmd {
    pub fn new<R: Rng>(dims: usize, features: usize, bandwidths: &[f64], rng: &mut R) -> Self {
        let maps = bandwidths
            .iter()
            .map(|b| FeatureMap::sample(dims, features, *b, &mut *rng))
            .collect();
        Self {
            dims,
            features,
            maps,
        }
    }

    pub fn feature_count(&self) -> usize {
        self.features
    }

    fn evaluate(
        &self,
        observed: ArrayView2<'_, f64>,
        generated: ArrayView2<'_, f64>,
        with_gradient: bool,
    ) -> CgnnResult<(f64, Option<Array2<f64>>)> {
        check_shapes(&observed, &generated)?;
        if generated.ncols() != self.dims {
            return Err(CgnnError::shape(format!(
                "feature map built for {} columns, sample has {}",
                self.dims,
                generated.ncols()
            )));
        }
        let n = generated.nrows() as f64;
        let scale = (2.0 / self.features as f64).sqrt();

        let mut loss = 0.0;
        let mut grad = with_gradient.then(|| Array2::<f64>::zeros(generated.dim()));

        for map in &self.maps {
            let proj_obs = map.project(&observed);
            let proj_gen = map.project(&generated);
            let mean_obs = proj_obs.mapv(f64::cos).sum_axis(Axis(0)) * (scale / n);
            let mean_gen = proj_gen.mapv(f64::cos).sum_axis(Axis(0)) * (scale / n);
            let diff = &mean_gen - &mean_obs;
            loss += diff.dot(&diff);

            if let Some(g) = grad.as_mut() {
                // ∂L/∂proj_gen[i, f] = 2·diff_f·(−scale·sin(proj_gen[i, f]))/N
                let mut coef = proj_gen.mapv(f64::sin) * (-2.0 * scale / n);
                coef *= &diff;
                *g += &coef.dot(&map.frequencies.t());
            }
        }

        Ok((loss, grad))
    }
}

impl DistanceMetric for FourierMmd {
    fn name(&self) -> &'static str {
        "fourier_mmd"
    }

    fn distance(
        &self,
        observed: ArrayView2<'_, f64>,
        generated: ArrayView2<'_, f64>,
    ) -> CgnnResult<f64> {
        self.evaluate(observed, generated, false).map(|(loss, _)| loss)
    }

    fn distance_with_gradient(
        &self,
        observed: ArrayView2<'_, f64>,
        generated: ArrayView2<'_, f64>,
    ) -> CgnnResult<(f64, Array2<f64>)> {
        let (loss, grad) = self.evaluate(observed, generated, true)?;
        let grad = grad.unwrap_or_else(|| Array2::zeros(generated.dim()));
        Ok((loss, grad))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn metric(dims: usize) -> FourierMmd {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        FourierMmd::new(dims, 100, &[0.01, 0.1, 1.0, 10.0, 100.0], &mut rng)
    }

    #[test]
    fn identical_samples_have_zero_distance() {
        let a = array![[0.5, -1.0], [1.5, 0.25], [-0.75, 2.0]];
        let d = metric(2).distance(a.view(), a.view()).unwrap();
        assert!(d.abs() < 1e-12, "got {d}");
    }

    #[test]
    fn gradient_matches_finite_differences() {
        let observed = array![[0.3, -0.2], [1.1, 0.5], [-0.4, 0.9], [0.0, 0.0]];
        let generated = array![[0.0, 0.1], [0.8, -0.6], [0.2, 0.4], [-0.3, 0.2]];
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let m = FourierMmd::new(2, 20, &[0.5, 2.0], &mut rng);
        let (_, grad) = m
            .distance_with_gradient(observed.view(), generated.view())
            .unwrap();

        let h = 1e-6;
        for i in 0..4 {
            for c in 0..2 {
                let mut plus = generated.clone();
                plus[[i, c]] += h;
                let mut minus = generated.clone();
                minus[[i, c]] -= h;
                let numeric = (m.distance(observed.view(), plus.view()).unwrap()
                    - m.distance(observed.view(), minus.view()).unwrap())
                    / (2.0 * h);
                assert!(
                    (numeric - grad[[i, c]]).abs() < 1e-6,
                    "grad[{i},{c}]: analytic {} vs numeric {numeric}",
                    grad[[i, c]]
                );
            }
        }
    }

    #[test]
    fn rejects_wrong_column_count() {
        let a = array![[0.0], [1.0]];
        assert!(metric(2).distance(a.view(), a.view()).is_err());
    }
}
