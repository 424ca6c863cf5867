//! Seeded synthetic samples with known causal structure.

use cgnn_core::models::Sample;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, StandardNormal};

fn uniform(rng: &mut ChaCha8Rng, n: usize) -> Vec<f64> {
    (0..n).map(|_| rng.random_range(-1.0..1.0)).collect()
}

fn gaussian(rng: &mut ChaCha8Rng, n: usize, std: f64) -> Vec<f64> {
    (0..n)
        .map(|_| {
            let z: f64 = StandardNormal.sample(rng);
            z * std
        })
        .collect()
}

/// Three levels `{-1, 0, 1}` with `N(0, spread²)` jitter.
fn clustered(rng: &mut ChaCha8Rng, n: usize, spread: f64) -> Vec<f64> {
    (0..n)
        .map(|_| {
            let level = f64::from(rng.random_range(-1i32..=1));
            let z: f64 = StandardNormal.sample(&mut *rng);
            level + spread * z
        })
        .collect()
}

fn build(columns: Vec<(&str, Vec<f64>)>) -> Sample {
    Sample::from_columns(
        columns
            .into_iter()
            .map(|(name, values)| (name.to_string(), values))
            .collect(),
    )
    .unwrap_or_else(|e| panic!("synthetic sample is invalid: {e}"))
}

/// `X ~ U(-1, 1)`, `Y = slope·X + N(0, noise_std²)`. Columns `X`, `Y`.
pub fn linear_pair(n: usize, slope: f64, noise_std: f64, seed: u64) -> Sample {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let x = uniform(&mut rng, n);
    let noise = gaussian(&mut rng, n, noise_std);
    let y = x.iter().zip(&noise).map(|(x, e)| slope * x + e).collect();
    build(vec![("X", x), ("Y", y)])
}

/// `X ~ U(-1, 1)`, `Y = X³ + X + N(0, noise_std²)`: low-noise, injective.
pub fn cubic_pair(n: usize, noise_std: f64, seed: u64) -> Sample {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let x = uniform(&mut rng, n);
    let noise = gaussian(&mut rng, n, noise_std);
    let y = x.iter().zip(&noise).map(|(x, e)| x.powi(3) + x + e).collect();
    build(vec![("X", x), ("Y", y)])
}

/// Two independent columns `X ~ U(-1, 1)` and `Z ~ N(0, 1)`.
pub fn independent_pair(n: usize, seed: u64) -> Sample {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let x = uniform(&mut rng, n);
    let z = gaussian(&mut rng, n, 1.0);
    build(vec![("X", x), ("Z", z)])
}

/// `X` clustered on three levels, `Y = 2·X + N(0, 0.5²)`, and `Z` the values
/// of `X` in shuffled order: independent of `X` with the same marginal.
///
/// The noise blurs the levels in `Y`, so `X | Y` is a multimodal mixture
/// while `Y | X` stays Gaussian.
pub fn xyz_sample(n: usize, seed: u64) -> Sample {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let x = clustered(&mut rng, n, 0.2);
    let noise = gaussian(&mut rng, n, 0.5);
    let y = x.iter().zip(&noise).map(|(x, e)| 2.0 * x + e).collect();
    let mut z = x.clone();
    z.shuffle(&mut rng);
    build(vec![("X", x), ("Y", y), ("Z", z)])
}

/// `X` on three levels with jitter `spread`, `Y = 2·X + N(0, noise_std²)`.
pub fn clustered_linear_pair(n: usize, spread: f64, noise_std: f64, seed: u64) -> Sample {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let x = clustered(&mut rng, n, spread);
    let noise = gaussian(&mut rng, n, noise_std);
    let y = x.iter().zip(&noise).map(|(x, e)| 2.0 * x + e).collect();
    build(vec![("X", x), ("Y", y)])
}

/// `X` on three levels with `N(0, 0.1²)` jitter, `Y = X³ + X + N(0, noise_std²)`:
/// injective, low noise for small `noise_std`.
pub fn clustered_cubic_pair(n: usize, noise_std: f64, seed: u64) -> Sample {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let x = clustered(&mut rng, n, 0.1);
    let noise = gaussian(&mut rng, n, noise_std);
    let y = x.iter().zip(&noise).map(|(x, e)| x.powi(3) + x + e).collect();
    build(vec![("X", x), ("Y", y)])
}

/// Chain `a -> b -> c` with nonlinear links.
pub fn chain_sample(n: usize, seed: u64) -> Sample {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let a = uniform(&mut rng, n);
    let nb = gaussian(&mut rng, n, 0.1);
    let nc = gaussian(&mut rng, n, 0.1);
    let b: Vec<f64> = a.iter().zip(&nb).map(|(a, e)| (2.0 * a).tanh() + e).collect();
    let c = b.iter().zip(&nc).map(|(b, e)| b * b + e).collect();
    build(vec![("a", a), ("b", b), ("c", c)])
}

/// Diamond `a -> b`, `a -> c`, `b -> d`, `c -> d`.
pub fn diamond_sample(n: usize, seed: u64) -> Sample {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let a = uniform(&mut rng, n);
    let nb = gaussian(&mut rng, n, 0.1);
    let nc = gaussian(&mut rng, n, 0.1);
    let nd = gaussian(&mut rng, n, 0.1);
    let b: Vec<f64> = a.iter().zip(&nb).map(|(a, e)| a + e).collect();
    let c: Vec<f64> = a.iter().zip(&nc).map(|(a, e)| -a * a + e).collect();
    let d = b
        .iter()
        .zip(&c)
        .zip(&nd)
        .map(|((b, c), e)| b * c + e)
        .collect();
    build(vec![("a", a), ("b", b), ("c", c), ("d", d)])
}
