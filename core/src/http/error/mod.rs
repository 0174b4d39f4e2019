//! Error types.

mod access_error;
mod config_error;

pub use access_error::AccessError;
pub use config_error::ConfigError;
