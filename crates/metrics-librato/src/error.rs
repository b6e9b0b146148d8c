//! Error types for batch configuration.

use core::error::Error;

use derive_more::Display;
use error_stack::Report;

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, Report<ConfigError>>;

/// Errors raised while loading or validating batch settings.
#[derive(Debug, Display)]
pub enum ConfigError {
    /// A setting has a value the batching client cannot work with
    #[display("Invalid setting `{field}`: {reason}")]
    InvalidSetting { field: &'static str, reason: String },

    /// Settings document could not be parsed
    #[display("Failed to parse batch settings")]
    Parse,
}

impl Error for ConfigError {}

impl ConfigError {
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidSetting {
            field,
            reason: reason.into(),
        }
    }
}
