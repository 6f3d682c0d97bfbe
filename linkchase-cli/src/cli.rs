//! CLI structure and command definitions.
//!
//! This module defines the main CLI structure using clap's derive macros,
//! including global options and subcommands.

use crate::commands::{CompletionsCommand, ResolveCommand, ScanCommand, ValidateCommand};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line tool for following symlink chains and finding broken links.
#[derive(Parser)]
#[command(name = "linkchase")]
#[command(version, about = "Follow symlink chains without getting caught in loops", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Read settings from this file in addition to the discovered ones
    #[arg(long, value_name = "PATH", global = true, env = "LINKCHASE_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand)]
pub enum Command {
    /// Resolve symlinks to their final target
    Resolve(ResolveCommand),

    /// Report symlinks under a directory and whether they resolve
    Scan(ScanCommand),

    /// Validate a configuration file
    Validate(ValidateCommand),

    /// Generate shell completion scripts
    Completions(CompletionsCommand),
}
