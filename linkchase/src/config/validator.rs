//! Configuration validation.

use crate::config::schema::{Config, ScanConfig};
use crate::error::{Error, Result};

/// Validates configuration values that the schema alone cannot rule out.
///
/// # Examples
///
/// ```
/// use linkchase::config::{Config, ConfigValidator};
///
/// let config = Config::default();
/// ConfigValidator::validate(&config).unwrap();
/// ```
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate a complete configuration.
    ///
    /// # Errors
    ///
    /// Returns a validation error naming the offending field.
    pub fn validate(config: &Config) -> Result<()> {
        if let Some(ref scan) = config.scan {
            Self::validate_scan(scan)?;
        }

        Ok(())
    }

    fn validate_scan(scan: &ScanConfig) -> Result<()> {
        if scan.max_depth == Some(0) {
            return Err(Error::Validation {
                field: "scan.max_depth".into(),
                message: "Must be at least 1 (0 would scan only the root itself)".into(),
            });
        }

        Ok(())
    }
}
