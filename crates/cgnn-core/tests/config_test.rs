use cgnn_core::config::*;
use cgnn_core::errors::ConfigError;
use cgnn_core::CgnnError;

#[test]
fn config_loads_from_empty_toml_with_all_defaults() {
    let config = CgnnConfig::from_toml("").unwrap();

    // Generator defaults
    assert_eq!(config.generator.hidden_units, 20);
    assert_eq!(config.generator.learning_rate, 0.01);
    assert_eq!(config.generator.init_std, 0.05);
    assert_eq!(config.generator.mechanism, MechanismKind::Mlp);

    // Metric defaults
    assert!(!config.metric.approximate);
    assert_eq!(config.metric.fourier_features, 100);
    assert_eq!(config.metric.bandwidths, vec![0.01, 0.1, 1.0, 10.0, 100.0]);

    // Training defaults
    assert_eq!(config.training.train_epochs, 1000);
    assert_eq!(config.training.test_epochs, 500);
    assert_eq!(config.training.max_attempts, 5);
    assert!(config.training.run_timeout_ms.is_none());

    // Run defaults
    assert_eq!(config.runs.runs, 8);
    assert_eq!(config.runs.jobs, 1);
    assert!(config.runs.seed.is_none());

    // Device defaults
    assert!(!config.device.enabled);
    assert_eq!(config.device.count, 1);
    assert_eq!(config.device.offset, 0);
    assert!(!config.device.allow_cpu_fallback);

    // Sampling defaults
    assert_eq!(config.sampling.max_points, 1500);
    assert!(config.sampling.standardize);

    assert!(config.validate().is_empty());
}

#[test]
fn config_loads_partial_toml_with_overrides() {
    let toml = r#"
[generator]
hidden_units = 32
mechanism = "polynomial"

[metric]
approximate = true
fourier_features = 64

[runs]
runs = 16
jobs = 4
seed = 42

[training]
run_timeout_ms = 60000
"#;
    let config = CgnnConfig::from_toml(toml).unwrap();
    assert_eq!(config.generator.hidden_units, 32);
    assert_eq!(config.generator.mechanism, MechanismKind::Polynomial);
    assert!(config.metric.approximate);
    assert_eq!(config.metric.fourier_features, 64);
    assert_eq!(config.runs.runs, 16);
    assert_eq!(config.runs.jobs, 4);
    assert_eq!(config.runs.seed, Some(42));
    assert_eq!(
        config.training.run_timeout(),
        Some(std::time::Duration::from_secs(60))
    );
    // Non-overridden fields keep defaults
    assert_eq!(config.generator.learning_rate, 0.01);
    assert_eq!(config.training.train_epochs, 1000);
}

#[test]
fn malformed_toml_is_a_parse_error() {
    let err = CgnnConfig::from_toml("[generator\nhidden_units = ").unwrap_err();
    assert!(matches!(err, CgnnError::Config(ConfigError::Parse { .. })));
}

#[test]
fn validation_reports_every_invalid_field() {
    let mut config = CgnnConfig::default();
    config.generator.hidden_units = 0;
    config.generator.learning_rate = f64::NAN;
    config.training.max_attempts = 0;
    config.runs.jobs = 0;
    config.metric.bandwidths = vec![1.0, -2.0];

    let errors = config.validate();
    let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
    assert!(fields.contains(&"generator.hidden_units"));
    assert!(fields.contains(&"generator.learning_rate"));
    assert!(fields.contains(&"training.max_attempts"));
    assert!(fields.contains(&"runs.jobs"));
    assert!(fields.contains(&"metric.bandwidths"));
}

#[test]
fn validated_fails_with_first_error() {
    let mut config = CgnnConfig::default();
    config.sampling.max_points = 1;
    let err = config.validated().unwrap_err();
    match err {
        CgnnError::Config(ConfigError::InvalidValue { field, .. }) => {
            assert_eq!(field, "sampling.max_points");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn device_count_only_matters_when_enabled() {
    let mut config = CgnnConfig::default();
    config.device.count = 0;
    assert!(config.validate().is_empty());
    config.device.enabled = true;
    assert_eq!(config.validate().len(), 1);
}

#[test]
fn device_index_is_round_robin_with_offset() {
    let device = DeviceConfig {
        enabled: true,
        count: 3,
        offset: 2,
        allow_cpu_fallback: false,
    };
    let indices: Vec<usize> = (0..7).map(|run| device.index_for_run(run)).collect();
    assert_eq!(indices, vec![2, 3, 4, 2, 3, 4, 2]);
}

#[test]
fn config_round_trips_through_json() {
    let mut config = CgnnConfig::default();
    config.runs.seed = Some(7);
    let json = serde_json::to_string(&config).unwrap();
    let back: CgnnConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(back.runs.seed, Some(7));
    assert_eq!(back.metric.bandwidths, config.metric.bandwidths);
}
