//! Distributional distances between an observed and a generated sample.
//!
//! Both metrics return the loss together with its gradient with respect to the
//! generated sample, which is what the generator's backward pass consumes.

pub mod exact;
pub mod fourier;

use cgnn_core::config::MetricConfig;
use cgnn_core::errors::{CgnnError, CgnnResult};
use ndarray::{Array2, ArrayView2};
use rand::Rng;

pub use exact::GaussianMmd;
pub use fourier::FourierMmd;

/// A divergence between two equal-shape samples, minimisable by gradient descent.
pub trait DistanceMetric: Send + Sync {
    fn name(&self) -> &'static str;

    /// Non-negative distance, zero when the two samples coincide.
    fn distance(&self, observed: ArrayView2<'_, f64>, generated: ArrayView2<'_, f64>)
        -> CgnnResult<f64>;

    /// Distance and its gradient with respect to every entry of `generated`.
    fn distance_with_gradient(
        &self,
        observed: ArrayView2<'_, f64>,
        generated: ArrayView2<'_, f64>,
    ) -> CgnnResult<(f64, Array2<f64>)>;
}

/// Build the metric selected by `config` for samples with `dims` columns.
pub fn build_metric<R: Rng>(
    config: &MetricConfig,
    dims: usize,
    rng: &mut R,
) -> Box<dyn DistanceMetric> {
    if config.approximate {
        Box::new(FourierMmd::new(
            dims,
            config.fourier_features,
            &config.bandwidths,
            rng,
        ))
    } else {
        Box::new(GaussianMmd::new(config.bandwidths.clone()))
    }
}

pub(crate) fn check_shapes(
    observed: &ArrayView2<'_, f64>,
    generated: &ArrayView2<'_, f64>,
) -> CgnnResult<()> {
    if observed.dim() != generated.dim() {
        return Err(CgnnError::shape(format!(
            "observed sample is {:?} but generated sample is {:?}",
            observed.dim(),
            generated.dim()
        )));
    }
    if observed.nrows() == 0 {
        return Err(CgnnError::shape("metric needs at least one row"));
    }
    Ok(())
}

/// Clamp rounding noise below zero without masking NaN.
pub(crate) fn non_negative(loss: f64) -> f64 {
    if loss < 0.0 {
        0.0
    } else {
        loss
    }
}
