//! Configuration schema definitions.
//!
//! Every field is optional so that partial files can be layered on top of
//! each other; the `effective_*` accessors fill in built-in defaults.

use serde::{Deserialize, Serialize};

use crate::scan::ScanOptions;

/// Complete configuration structure.
///
/// # Examples
///
/// ```
/// use linkchase::config::{Config, OutputFormat};
///
/// let config = Config {
///     output_format: Some(OutputFormat::Json),
///     ..Default::default()
/// };
/// assert_eq!(config.effective_output_format(), OutputFormat::Json);
/// assert!(config.effective_expand_tilde());
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Default output format for command results.
    pub output_format: Option<OutputFormat>,

    /// Print every hop of a chain, not just the final target.
    pub show_chain: Option<bool>,

    /// Expand a leading `~` in paths given to `resolve`.
    pub expand_tilde: Option<bool>,

    /// Treat a chain ending at a missing path as a failure.
    pub must_exist: Option<bool>,

    /// Settings for `scan`.
    pub scan: Option<ScanConfig>,
}

impl Config {
    /// Configuration with every field set to its built-in default.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            output_format: Some(OutputFormat::default()),
            show_chain: Some(false),
            expand_tilde: Some(true),
            must_exist: Some(false),
            scan: Some(ScanConfig {
                max_depth: None,
                include_hidden: Some(false),
                broken_only: Some(false),
            }),
        }
    }

    /// Output format, defaulting to [`OutputFormat::Human`].
    #[must_use]
    pub fn effective_output_format(&self) -> OutputFormat {
        self.output_format.unwrap_or_default()
    }

    /// Whether to print full chains (default `false`).
    #[must_use]
    pub fn effective_show_chain(&self) -> bool {
        self.show_chain.unwrap_or(false)
    }

    /// Whether to expand `~` (default `true`).
    #[must_use]
    pub fn effective_expand_tilde(&self) -> bool {
        self.expand_tilde.unwrap_or(true)
    }

    /// Whether dangling results are failures (default `false`).
    #[must_use]
    pub fn effective_must_exist(&self) -> bool {
        self.must_exist.unwrap_or(false)
    }

    /// Whether `scan` lists only broken links (default `false`).
    #[must_use]
    pub fn effective_broken_only(&self) -> bool {
        self.scan
            .as_ref()
            .and_then(|s| s.broken_only)
            .unwrap_or(false)
    }

    /// Scanner options derived from the `scan` section.
    #[must_use]
    pub fn scan_options(&self) -> ScanOptions {
        self.scan
            .as_ref()
            .map(ScanConfig::to_options)
            .unwrap_or_default()
    }
}

/// Settings for broken-link scans.
///
/// # Examples
///
/// ```
/// use linkchase::config::ScanConfig;
///
/// let scan: ScanConfig = serde_yaml::from_str("max_depth: 3\ninclude_hidden: true\n").unwrap();
/// let options = scan.to_options();
/// assert_eq!(options.max_depth, Some(3));
/// assert!(options.include_hidden);
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ScanConfig {
    /// Deepest directory level to descend to.
    pub max_depth: Option<usize>,

    /// Descend into and report dot-entries.
    pub include_hidden: Option<bool>,

    /// Report only links that do not resolve.
    pub broken_only: Option<bool>,
}

impl ScanConfig {
    /// Convert to the options the scanner takes.
    #[must_use]
    pub fn to_options(&self) -> ScanOptions {
        ScanOptions::default()
            .with_max_depth(self.max_depth)
            .with_hidden(self.include_hidden.unwrap_or(false))
    }
}

/// Output format for command results.
///
/// # Examples
///
/// ```
/// use linkchase::config::OutputFormat;
///
/// let format = OutputFormat::Json;
/// assert_eq!(format.to_string(), "json");
/// assert_eq!("plain".parse::<OutputFormat>().unwrap(), OutputFormat::Plain);
/// ```
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Readable text with arrows between hops.
    #[default]
    Human,
    /// JSON document.
    Json,
    /// Bare paths, one per line.
    Plain,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Human => write!(f, "human"),
            Self::Json => write!(f, "json"),
            Self::Plain => write!(f, "plain"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "human" => Ok(Self::Human),
            "json" => Ok(Self::Json),
            "plain" => Ok(Self::Plain),
            _ => Err(format!(
                "invalid output format '{s}' (expected human, json or plain)"
            )),
        }
    }
}
