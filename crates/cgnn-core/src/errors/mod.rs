//! Error types for the CGNN engine.

mod cgnn_error;
mod config_error;
pub mod error_code;

pub use cgnn_error::{CgnnError, CgnnResult};
pub use config_error::ConfigError;
pub use error_code::CgnnErrorCode;
