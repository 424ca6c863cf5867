//! Separation behaviour of both MMD estimators on seeded samples.

use cgnn_causal::metric::{build_metric, DistanceMetric, FourierMmd, GaussianMmd};
use cgnn_core::config::MetricConfig;
use ndarray::Array2;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

fn uniform(rng: &mut ChaCha8Rng, rows: usize, low: f64, high: f64) -> Array2<f64> {
    Array2::from_shape_fn((rows, 2), |_| rng.random_range(low..high))
}

fn separation(metric: &dyn DistanceMetric) -> (f64, f64) {
    let mut rng = ChaCha8Rng::seed_from_u64(21);
    let a = uniform(&mut rng, 100, 0.0, 1.0);
    let b = uniform(&mut rng, 100, 0.0, 1.0);
    let far = uniform(&mut rng, 100, 5.0, 6.0);
    let same = metric.distance(a.view(), b.view()).unwrap();
    let disjoint = metric.distance(a.view(), far.view()).unwrap();
    (same, disjoint)
}

#[test]
fn exact_mmd_separates_disjoint_supports() {
    let metric = GaussianMmd::new(MetricConfig::default().bandwidths);
    let (same, disjoint) = separation(&metric);
    assert!(same >= 0.0);
    assert!(disjoint > 10.0 * same, "same {same}, disjoint {disjoint}");
}

#[test]
fn fourier_mmd_separates_disjoint_supports() {
    let mut rng = ChaCha8Rng::seed_from_u64(4);
    let metric = FourierMmd::new(2, 100, &MetricConfig::default().bandwidths, &mut rng);
    let (same, disjoint) = separation(&metric);
    assert!(disjoint > 0.1);
    assert!(disjoint > 5.0 * same, "same {same}, disjoint {disjoint}");
}

#[test]
fn config_selects_the_estimator() {
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let mut config = MetricConfig::default();
    assert_eq!(build_metric(&config, 2, &mut rng).name(), "mmd");
    config.approximate = true;
    assert_eq!(build_metric(&config, 2, &mut rng).name(), "fourier_mmd");
}

#[test]
fn gradient_descent_on_the_sample_reduces_distance() {
    let metric = GaussianMmd::new(vec![0.1, 1.0, 10.0]);
    let mut rng = ChaCha8Rng::seed_from_u64(8);
    let target = uniform(&mut rng, 30, 0.0, 1.0);
    let mut moving = uniform(&mut rng, 30, 2.0, 3.0);

    let start = metric.distance(target.view(), moving.view()).unwrap();
    for _ in 0..500 {
        let (_, grad) = metric
            .distance_with_gradient(target.view(), moving.view())
            .unwrap();
        moving.scaled_add(-1.0, &grad);
    }
    let end = metric.distance(target.view(), moving.view()).unwrap();
    assert!(end < 0.5 * start, "{start} -> {end}");
}
