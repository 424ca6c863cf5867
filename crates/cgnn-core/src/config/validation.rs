//! Config validation: reject invalid combinations before any run starts.

use super::CgnnConfig;

/// Validation error for one config field.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigValidationError {
    /// Dotted path of the invalid field.
    pub field: String,
    /// Description of the problem.
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "config.{}: {}", self.field, self.message)
    }
}

fn push(errors: &mut Vec<ConfigValidationError>, field: &str, message: impl Into<String>) {
    errors.push(ConfigValidationError {
        field: field.to_string(),
        message: message.into(),
    });
}

/// Validate a CgnnConfig, returning all errors found.
pub fn validate(config: &CgnnConfig) -> Vec<ConfigValidationError> {
    let mut errors = Vec::new();

    let g = &config.generator;
    if g.hidden_units == 0 {
        push(&mut errors, "generator.hidden_units", "must be > 0");
    }
    if !(g.learning_rate.is_finite() && g.learning_rate > 0.0) {
        push(
            &mut errors,
            "generator.learning_rate",
            format!("must be finite and > 0, got {}", g.learning_rate),
        );
    }
    if !(g.init_std.is_finite() && g.init_std > 0.0) {
        push(
            &mut errors,
            "generator.init_std",
            format!("must be finite and > 0, got {}", g.init_std),
        );
    }

    let m = &config.metric;
    if m.bandwidths.is_empty() {
        push(&mut errors, "metric.bandwidths", "must not be empty");
    }
    if let Some(bad) = m.bandwidths.iter().find(|b| !(b.is_finite() && **b > 0.0)) {
        push(
            &mut errors,
            "metric.bandwidths",
            format!("every bandwidth must be finite and > 0, got {bad}"),
        );
    }
    if m.approximate && m.fourier_features == 0 {
        push(&mut errors, "metric.fourier_features", "must be > 0");
    }

    let t = &config.training;
    if t.train_epochs == 0 {
        push(&mut errors, "training.train_epochs", "must be > 0");
    }
    if t.test_epochs == 0 {
        push(&mut errors, "training.test_epochs", "must be > 0");
    }
    if t.max_attempts == 0 {
        push(&mut errors, "training.max_attempts", "must be > 0");
    }
    if t.run_timeout_ms == Some(0) {
        push(&mut errors, "training.run_timeout_ms", "must be > 0 when set");
    }

    if config.runs.runs == 0 {
        push(&mut errors, "runs.runs", "must be > 0");
    }
    if config.runs.jobs == 0 {
        push(&mut errors, "runs.jobs", "must be > 0");
    }

    if config.device.enabled && config.device.count == 0 {
        push(&mut errors, "device.count", "must be > 0 when devices are enabled");
    }

    if config.sampling.max_points < 2 {
        push(
            &mut errors,
            "sampling.max_points",
            format!("must be >= 2, got {}", config.sampling.max_points),
        );
    }

    errors
}
