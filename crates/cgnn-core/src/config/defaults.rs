// Single source of truth for all default values.

// --- Generator ---
pub const DEFAULT_HIDDEN_UNITS: usize = 20;
pub const DEFAULT_LEARNING_RATE: f64 = 0.01;
pub const DEFAULT_INIT_STD: f64 = 0.05;

// --- Metric ---
pub const DEFAULT_APPROXIMATE_METRIC: bool = false;
pub const DEFAULT_FOURIER_FEATURES: usize = 100;
pub const DEFAULT_BANDWIDTHS: [f64; 5] = [0.01, 0.1, 1.0, 10.0, 100.0];

// --- Training ---
pub const DEFAULT_TRAIN_EPOCHS: usize = 1000;
pub const DEFAULT_TEST_EPOCHS: usize = 500;
pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;

// --- Runs ---
pub const DEFAULT_RUNS: usize = 8;
pub const DEFAULT_JOBS: usize = 1;

// --- Device ---
pub const DEFAULT_DEVICE_ENABLED: bool = false;
pub const DEFAULT_DEVICE_COUNT: usize = 1;
pub const DEFAULT_DEVICE_OFFSET: usize = 0;
pub const DEFAULT_ALLOW_CPU_FALLBACK: bool = false;

// --- Sampling ---
pub const DEFAULT_MAX_POINTS: usize = 1500;
pub const DEFAULT_STANDARDIZE: bool = true;
