/// Loss sums at or below this value make the normalized pairwise score undefined.
pub const DEGENERATE_LOSS_EPSILON: f64 = 1e-12;

/// Training progress is logged every this many epochs.
pub const TRAINING_LOG_INTERVAL: usize = 100;

/// Adam first-moment decay.
pub const ADAM_BETA1: f64 = 0.9;
/// Adam second-moment decay.
pub const ADAM_BETA2: f64 = 0.999;
/// Adam denominator guard.
pub const ADAM_EPSILON: f64 = 1e-8;
