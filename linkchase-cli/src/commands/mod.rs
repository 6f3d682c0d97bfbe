//! CLI command implementations.
//!
//! This module contains the implementations of all CLI commands:
//! - `resolve`: Follow symlinks to their final target
//! - `scan`: Report symlinks under a directory
//! - `validate`: Validate a configuration file
//! - `completions`: Generate shell completion scripts

pub mod completions;
pub mod resolve;
pub mod scan;
pub mod validate;

pub use completions::CompletionsCommand;
pub use resolve::ResolveCommand;
pub use scan::ScanCommand;
pub use validate::ValidateCommand;
