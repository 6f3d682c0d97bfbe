//! CLI-specific error types with exit codes.
//!
//! This module defines error types specific to the CLI layer,
//! wrapping library errors and providing appropriate exit codes.

use linkchase::{Error as LibError, ResolveError};
use std::fmt;

/// CLI-specific error type with exit code mapping.
#[derive(Debug)]
pub enum CliError {
    /// Library error (wrapped).
    Library(LibError),

    /// Invalid command-line arguments.
    InvalidArguments(String),

    /// I/O error.
    Io(std::io::Error),

    /// Configuration error.
    Config(String),

    /// Some of the requested paths did not resolve.
    Unresolved {
        /// Paths that failed.
        failed: usize,
        /// Paths requested.
        total: usize,
        /// Whether any failure was a filesystem error rather than a loop
        /// or missing target.
        io: bool,
    },

    /// Semantic failure (e.g., broken links found) - exit code 1.
    SemanticFailure(String),
}

impl CliError {
    /// Get the appropriate exit code for this error.
    ///
    /// Exit codes:
    /// - 0: Success (not an error)
    /// - 1: Semantic failure (cycle, missing target, broken links)
    /// - 4: Invalid arguments
    /// - 5: I/O error
    /// - 6: Other library error
    /// - 7: Configuration error
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::SemanticFailure(_) | CliError::Unresolved { io: false, .. } => 1,
            CliError::Library(lib_err) => match lib_err {
                LibError::Resolve(ResolveError::Cycle { .. }) => 1,
                LibError::InvalidPath { .. } | LibError::PathNotFound { .. } => 4,
                LibError::Resolve(ResolveError::Io { .. })
                | LibError::Io(_)
                | LibError::PermissionDenied { .. } => 5,
                LibError::Configuration(_) | LibError::Validation { .. } => 7,
            },
            CliError::InvalidArguments(_) => 4,
            CliError::Io(_) | CliError::Unresolved { io: true, .. } => 5,
            CliError::Config(_) => 7,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Library(e) => write!(f, "{e}"),
            CliError::InvalidArguments(msg) => write!(f, "Invalid arguments: {msg}"),
            CliError::Io(e) => write!(f, "I/O error: {e}"),
            CliError::Config(msg) => write!(f, "Configuration error: {msg}"),
            CliError::Unresolved { failed, total, .. } => {
                write!(f, "{failed} of {total} path(s) could not be resolved")
            }
            CliError::SemanticFailure(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Library(e) => Some(e),
            CliError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<LibError> for CliError {
    fn from(e: LibError) -> Self {
        CliError::Library(e)
    }
}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        CliError::Io(e)
    }
}
