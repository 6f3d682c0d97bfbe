//! Configuration merging and precedence handling.

use crate::config::loader::ConfigSource;
use crate::config::schema::{Config, ScanConfig};

/// Merges configuration sources according to precedence rules.
///
/// # Examples
///
/// ```
/// use linkchase::config::{Config, ConfigMerger};
///
/// let low = Config { show_chain: Some(false), ..Default::default() };
/// let high = Config { show_chain: Some(true), ..Default::default() };
///
/// let mut result = low;
/// ConfigMerger::merge_into(&mut result, &high);
/// assert_eq!(result.show_chain, Some(true));
/// ```
pub struct ConfigMerger;

impl ConfigMerger {
    /// Merge multiple configuration sources into final config.
    ///
    /// Sources should be provided in order from lowest to highest precedence.
    #[must_use]
    pub fn merge(sources: Vec<ConfigSource>) -> Config {
        let mut result = Config::default();

        for source in sources {
            Self::merge_into(&mut result, &source.config);
        }

        result
    }

    /// Merge source config into target (source overwrites target).
    ///
    /// # Merging Rules
    ///
    /// - Simple fields: source overwrites if Some
    /// - `scan`: field-by-field merge
    pub fn merge_into(target: &mut Config, source: &Config) {
        if source.output_format.is_some() {
            target.output_format = source.output_format;
        }

        if source.show_chain.is_some() {
            target.show_chain = source.show_chain;
        }

        if source.expand_tilde.is_some() {
            target.expand_tilde = source.expand_tilde;
        }

        if source.must_exist.is_some() {
            target.must_exist = source.must_exist;
        }

        if let Some(ref source_scan) = source.scan {
            target.scan = Some(match &target.scan {
                Some(target_scan) => Self::merge_scan(target_scan, source_scan),
                None => source_scan.clone(),
            });
        }
    }

    fn merge_scan(target: &ScanConfig, source: &ScanConfig) -> ScanConfig {
        ScanConfig {
            max_depth: source.max_depth.or(target.max_depth),
            include_hidden: source.include_hidden.or(target.include_hidden),
            broken_only: source.broken_only.or(target.broken_only),
        }
    }
}
