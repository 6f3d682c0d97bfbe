//! Output formatting for resolutions and scan reports.
//!
//! Human and plain output only render what succeeded; callers report
//! failures separately (the CLI sends them to stderr). JSON output is a
//! single document holding successes and failures alike.

mod formatters;

use std::path::{Path, PathBuf};

use crate::config::OutputFormat;
use crate::error::ResolveError;
use crate::path::Resolution;
use crate::scan::ScanReport;
use crate::Result;

pub use formatters::{HumanFormatter, JsonFormatter, PlainFormatter};

/// The result of resolving one input path.
#[derive(Debug)]
pub enum ResolveOutcome {
    /// The walk finished.
    Resolved(Resolution),
    /// The walk failed.
    Failed {
        /// The path as given.
        input: PathBuf,
        /// Why it failed.
        error: ResolveError,
    },
}

impl ResolveOutcome {
    /// Pair a resolution result with the path it was computed for.
    #[must_use]
    pub fn new(input: &Path, result: std::result::Result<Resolution, ResolveError>) -> Self {
        match result {
            Ok(resolution) => Self::Resolved(resolution),
            Err(error) => Self::Failed {
                input: input.to_path_buf(),
                error,
            },
        }
    }

    /// The path as given.
    #[must_use]
    pub fn input(&self) -> &Path {
        match self {
            Self::Resolved(resolution) => resolution.original(),
            Self::Failed { input, .. } => input,
        }
    }
}

/// Trait for rendering results into one of the output formats.
pub trait OutputFormatter {
    /// Render the outcome of resolving one or more paths.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    fn format_resolutions(&self, outcomes: &[ResolveOutcome]) -> Result<String>;

    /// Render a scan report.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    fn format_scan(&self, report: &ScanReport) -> Result<String>;
}

impl OutputFormat {
    /// Create a formatter for this output format.
    ///
    /// `show_chain` lists every hop in human and plain output; JSON always
    /// carries the chain.
    ///
    /// # Examples
    ///
    /// ```
    /// use linkchase::config::OutputFormat;
    /// use linkchase::scan::ScanReport;
    /// use linkchase::OutputFormatter;
    ///
    /// let formatter = OutputFormat::Plain.create_formatter(false);
    /// assert_eq!(formatter.format_scan(&ScanReport::default()).unwrap(), "");
    /// ```
    #[must_use]
    pub fn create_formatter(self, show_chain: bool) -> Box<dyn OutputFormatter> {
        match self {
            Self::Human => Box::new(HumanFormatter::new(show_chain)),
            Self::Json => Box::new(JsonFormatter),
            Self::Plain => Box::new(PlainFormatter::new(show_chain)),
        }
    }
}
