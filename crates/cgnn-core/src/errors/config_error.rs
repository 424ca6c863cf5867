use super::error_code::{self, CgnnErrorCode};

/// Errors that can occur during configuration loading and validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config parse error: {message}")]
    Parse { message: String },

    #[error("invalid config value for {field}: {message}")]
    InvalidValue { field: String, message: String },
}

impl CgnnErrorCode for ConfigError {
    fn error_code(&self) -> &'static str {
        error_code::INVALID_CONFIG
    }
}
