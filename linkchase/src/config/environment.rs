//! Environment variable handling for configuration overrides.
//!
//! `LINKCHASE_*` variables override values from configuration files.

use crate::config::schema::{Config, OutputFormat};
use crate::error::{Error, Result};
use std::env;

/// Handles environment variable overrides for configuration.
///
/// # Examples
///
/// ```no_run
/// use linkchase::config::{Config, EnvironmentConfig};
///
/// let mut config = Config::default();
/// EnvironmentConfig::apply_overrides(&mut config).unwrap();
/// ```
pub struct EnvironmentConfig;

impl EnvironmentConfig {
    /// Apply environment variable overrides to config.
    ///
    /// Recognised variables:
    /// `LINKCHASE_OUTPUT_FORMAT`, `LINKCHASE_SHOW_CHAIN`,
    /// `LINKCHASE_EXPAND_TILDE`, `LINKCHASE_MUST_EXIST`,
    /// `LINKCHASE_SCAN_MAX_DEPTH`, `LINKCHASE_SCAN_INCLUDE_HIDDEN` and
    /// `LINKCHASE_SCAN_BROKEN_ONLY`.
    ///
    /// # Errors
    ///
    /// Returns an error if any variable holds a value of the wrong type.
    pub fn apply_overrides(config: &mut Config) -> Result<()> {
        if let Ok(val) = env::var("LINKCHASE_OUTPUT_FORMAT") {
            let format: OutputFormat = val.parse().map_err(|message| Error::Validation {
                field: "LINKCHASE_OUTPUT_FORMAT".into(),
                message,
            })?;
            config.output_format = Some(format);
        }

        if let Ok(val) = env::var("LINKCHASE_SHOW_CHAIN") {
            config.show_chain = Some(Self::parse_bool("LINKCHASE_SHOW_CHAIN", &val)?);
        }

        if let Ok(val) = env::var("LINKCHASE_EXPAND_TILDE") {
            config.expand_tilde = Some(Self::parse_bool("LINKCHASE_EXPAND_TILDE", &val)?);
        }

        if let Ok(val) = env::var("LINKCHASE_MUST_EXIST") {
            config.must_exist = Some(Self::parse_bool("LINKCHASE_MUST_EXIST", &val)?);
        }

        Self::apply_scan_overrides(config)
    }

    /// Apply scan-related overrides.
    fn apply_scan_overrides(config: &mut Config) -> Result<()> {
        let mut scan = config.scan.clone().unwrap_or_default();
        let mut modified = false;

        if let Ok(val) = env::var("LINKCHASE_SCAN_MAX_DEPTH") {
            scan.max_depth = Some(val.parse().map_err(|_| Error::Validation {
                field: "LINKCHASE_SCAN_MAX_DEPTH".into(),
                message: "Must be a positive integer".into(),
            })?);
            modified = true;
        }

        if let Ok(val) = env::var("LINKCHASE_SCAN_INCLUDE_HIDDEN") {
            scan.include_hidden = Some(Self::parse_bool("LINKCHASE_SCAN_INCLUDE_HIDDEN", &val)?);
            modified = true;
        }

        if let Ok(val) = env::var("LINKCHASE_SCAN_BROKEN_ONLY") {
            scan.broken_only = Some(Self::parse_bool("LINKCHASE_SCAN_BROKEN_ONLY", &val)?);
            modified = true;
        }

        if modified {
            config.scan = Some(scan);
        }

        Ok(())
    }

    /// Parse a boolean value from a string.
    ///
    /// Accepts: true/1/yes/on for true, false/0/no/off for false (case-insensitive).
    fn parse_bool(field: &str, s: &str) -> Result<bool> {
        match s.to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(true),
            "false" | "0" | "no" | "off" => Ok(false),
            _ => Err(Error::Validation {
                field: field.into(),
                message: format!(
                    "Invalid boolean value: '{s}' (expected true/false/1/0/yes/no/on/off)"
                ),
            }),
        }
    }
}
