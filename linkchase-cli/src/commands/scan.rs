//! Scan command implementation.
//!
//! Walks a directory and reports every symlink under it. Any broken link
//! makes the command exit with status 1.

use crate::error::CliError;
use crate::utils::{load_configuration, print_output, FormatArg, GlobalOptions};
use clap::Args;
use linkchase::config::ScanConfig;
use linkchase::{Config, Scanner};
use std::path::PathBuf;

/// Report symlinks under a directory and whether they resolve.
#[derive(Args)]
pub struct ScanCommand {
    /// Directory to scan
    #[arg(value_name = "DIR")]
    pub dir: PathBuf,

    /// Deepest level to descend to (1 = only the directory's own entries)
    #[arg(long, value_name = "N")]
    pub max_depth: Option<usize>,

    /// Include dot-files and dot-directories
    #[arg(long)]
    pub hidden: bool,

    /// List only links that do not resolve
    #[arg(long)]
    pub broken_only: bool,

    /// Output format (defaults to the configured one)
    #[arg(long, value_enum, ignore_case = true)]
    pub format: Option<FormatArg>,
}

impl ScanCommand {
    /// Execute the scan command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        if self.max_depth == Some(0) {
            return Err(CliError::InvalidArguments(
                "--max-depth must be at least 1".to_string(),
            ));
        }

        let config = load_configuration(global, self.overrides())?;

        let mut report = Scanner::new(config.scan_options()).scan(&self.dir)?;
        let broken = report.broken().count();
        if config.effective_broken_only() {
            report.retain_broken();
        }

        let formatter = config
            .effective_output_format()
            .create_formatter(config.effective_show_chain());
        print_output(&formatter.format_scan(&report)?)?;

        if broken > 0 {
            return Err(CliError::SemanticFailure(format!(
                "{broken} broken link(s) under {}",
                report.root.display()
            )));
        }

        Ok(())
    }

    /// Flags that were given, as configuration overrides.
    fn overrides(&self) -> Config {
        let scan = ScanConfig {
            max_depth: self.max_depth,
            include_hidden: self.hidden.then_some(true),
            broken_only: self.broken_only.then_some(true),
        };
        Config {
            output_format: self.format.map(Into::into),
            scan: (scan != ScanConfig::default()).then_some(scan),
            ..Default::default()
        }
    }
}
