//! Resolve command implementation.
//!
//! Follows each given path through its symlink chain and prints where it
//! ends. Failures are reported on stderr (or inside the JSON document) and
//! turn into a non-zero exit once every path has been tried.

use crate::error::CliError;
use crate::utils::{load_configuration, print_output, FormatArg, GlobalOptions};
use clap::Args;
use linkchase::{Config, LinkResolver, ResolveError, ResolveOutcome};
use std::path::PathBuf;

/// Resolve symlinks to their final target.
#[derive(Args)]
pub struct ResolveCommand {
    /// Paths to resolve
    #[arg(value_name = "PATH", required = true)]
    pub paths: Vec<PathBuf>,

    /// Show every link followed, not just the final target
    #[arg(long)]
    pub chain: bool,

    /// Output format (defaults to the configured one)
    #[arg(long, value_enum, ignore_case = true)]
    pub format: Option<FormatArg>,

    /// Fail when a chain ends at a path that does not exist
    #[arg(long)]
    pub must_exist: bool,

    /// Take a leading `~` literally
    #[arg(long)]
    pub no_tilde: bool,
}

impl ResolveCommand {
    /// Execute the resolve command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global, self.overrides())?;
        let must_exist = config.effective_must_exist();

        let resolver = LinkResolver::new().with_tilde_expansion(config.effective_expand_tilde());

        let outcomes: Vec<ResolveOutcome> = self
            .paths
            .iter()
            .map(|path| ResolveOutcome::new(path, resolver.resolve(path)))
            .collect();

        let formatter = config
            .effective_output_format()
            .create_formatter(config.effective_show_chain());
        print_output(&formatter.format_resolutions(&outcomes)?)?;

        let mut failed = 0;
        let mut io = false;
        for outcome in &outcomes {
            match outcome {
                ResolveOutcome::Failed { input, error } => {
                    failed += 1;
                    io |= matches!(error, ResolveError::Io { .. });
                    eprintln!("Error: {}: {error}", input.display());
                }
                ResolveOutcome::Resolved(res) if must_exist && res.is_dangling() => {
                    failed += 1;
                    eprintln!(
                        "Error: {}: target {} does not exist",
                        res.original().display(),
                        res.resolved().display()
                    );
                }
                ResolveOutcome::Resolved(res) => {
                    log::info!("{} resolved in {} hop(s)", res.original().display(), res.hops());
                }
            }
        }

        if failed > 0 {
            return Err(CliError::Unresolved {
                failed,
                total: outcomes.len(),
                io,
            });
        }

        Ok(())
    }

    /// Flags that were given, as configuration overrides.
    fn overrides(&self) -> Config {
        Config {
            output_format: self.format.map(Into::into),
            show_chain: self.chain.then_some(true),
            expand_tilde: self.no_tilde.then_some(false),
            must_exist: self.must_exist.then_some(true),
            scan: None,
        }
    }
}
