//! Configuration validation.

use crate::config::schema::Config;
use crate::error::{Error, Result};

/// Upper bound for the configured lock wait.
pub const MAX_LOCK_WAIT_SECONDS: u64 = 3600;

/// Checks merged configuration values.
///
/// # Examples
///
/// ```
/// use roomres::config::{Config, ConfigValidator};
///
/// ConfigValidator::validate(&Config::default()).unwrap();
///
/// let bad = Config { maximum_lock_wait_seconds: Some(0), ..Default::default() };
/// assert!(ConfigValidator::validate(&bad).is_err());
/// ```
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validates a complete configuration.
    ///
    /// # Errors
    ///
    /// Returns a validation error for the first invalid field.
    pub fn validate(config: &Config) -> Result<()> {
        if let Some(seconds) = config.maximum_lock_wait_seconds {
            if seconds == 0 {
                return Err(Error::Validation {
                    field: "maximum_lock_wait_seconds".into(),
                    message: "Must be greater than 0".into(),
                });
            }
            if seconds > MAX_LOCK_WAIT_SECONDS {
                return Err(Error::Validation {
                    field: "maximum_lock_wait_seconds".into(),
                    message: format!("Must be at most {MAX_LOCK_WAIT_SECONDS}"),
                });
            }
        }
        Ok(())
    }
}
