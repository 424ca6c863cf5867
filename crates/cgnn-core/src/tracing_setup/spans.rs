//! Span definitions per operation: run, training, pairwise and graph scoring.

/// Span covering one orchestrated run.
#[macro_export]
macro_rules! run_span {
    ($run:expr, $device:expr) => {
        tracing::info_span!("cgnn.run", run = $run, device = %$device)
    };
}

/// Span covering one model's training attempt.
#[macro_export]
macro_rules! training_span {
    ($hypothesis:expr, $attempt:expr) => {
        tracing::debug_span!("cgnn.training", hypothesis = %$hypothesis, attempt = $attempt)
    };
}

/// Span covering one pairwise scoring call.
#[macro_export]
macro_rules! pairwise_span {
    ($a:expr, $b:expr, $rows:expr) => {
        tracing::info_span!("cgnn.pairwise", a = %$a, b = %$b, rows = $rows)
    };
}

/// Span covering one graph scoring call.
#[macro_export]
macro_rules! graph_span {
    ($nodes:expr, $rows:expr) => {
        tracing::info_span!("cgnn.graph", nodes = $nodes, rows = $rows)
    };
}

/// Span names as constants for programmatic use.
pub mod names {
    pub const RUN: &str = "cgnn.run";
    pub const TRAINING: &str = "cgnn.training";
    pub const PAIRWISE: &str = "cgnn.pairwise";
    pub const GRAPH: &str = "cgnn.graph";
}
