#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # linkchase
//!
//! A library for following symbolic link chains to their final target
//! without getting caught in loops.
//!
//! Each node of a chain is identified by a canonical path; the first time
//! a node is seen twice the walk stops with [`ResolveError::Cycle`]. Relative
//! link targets are taken against the directory that actually holds the
//! link, and the final target does not have to exist.
//!
//! ## Core Types
//!
//! - [`LinkResolver`] and [`resolve`]: Chain resolution
//! - [`Resolution`] and [`EntryKind`]: What a walk ends at
//! - [`FileSystem`], [`LocalFileSystem`] and [`MemoryFileSystem`]: Where the
//!   resolver gets its answers
//! - [`Scanner`]: Finds broken links under a directory
//! - [`Error`], [`ResolveError`] and [`Result`]: Error handling types
//! - [`Logger`] and [`LogLevel`]: Logging infrastructure
//!
//! ## Examples
//!
//! ```
//! use linkchase::{LinkResolver, MemoryFileSystem, ResolveError};
//! use std::path::Path;
//!
//! let fs = MemoryFileSystem::new()
//!     .with_file("/data/real")
//!     .with_symlink("/data/alias", "real")
//!     .with_symlink("/data/a", "b")
//!     .with_symlink("/data/b", "a");
//! let resolver = LinkResolver::with_filesystem(fs);
//!
//! let res = resolver.resolve(Path::new("/data/alias")).unwrap();
//! assert_eq!(res.resolved(), Path::new("/data/real"));
//!
//! let err = resolver.resolve(Path::new("/data/a")).unwrap_err();
//! assert!(matches!(err, ResolveError::Cycle { .. }));
//! ```

pub mod config;
pub mod error;
pub mod logging;
pub mod output;
pub mod path;
pub mod scan;

// Re-export key types at crate root for convenience
pub use config::{Config, ConfigBuilder, OutputFormat};
pub use error::{Error, ResolveError, Result};
pub use logging::{init_logger, LogLevel, Logger};
pub use output::{OutputFormatter, ResolveOutcome};
pub use path::{
    resolve, EntryKind, FileSystem, LinkInfo, LinkResolver, LocalFileSystem, MemoryFileSystem,
    Resolution,
};
pub use scan::{ScanOptions, ScanReport, Scanner};
