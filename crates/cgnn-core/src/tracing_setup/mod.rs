//! Tracing initialization and span definitions.

pub mod spans;

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Initialize the CGNN tracing/logging system.
///
/// Reads the `CGNN_LOG` environment variable for per-module log levels.
/// Format: `CGNN_LOG=cgnn_causal=debug,cgnn_core=info`
///
/// Falls back to `cgnn=info` (both crates) if `CGNN_LOG` is not set or is invalid.
///
/// This function is idempotent. Calling it multiple times is safe.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env("CGNN_LOG")
            .unwrap_or_else(|_| EnvFilter::new("cgnn=info"));

        // A subscriber may already be installed by the embedding process.
        let _ = tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_file(true)
                    .with_line_number(true),
            )
            .with(filter)
            .try_init();
    });
}
