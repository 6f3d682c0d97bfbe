//! Error types for the linkchase library.
//!
//! Resolution has exactly two ways to fail, captured by [`ResolveError`].
//! Everything else the library does (configuration, scanning, path
//! normalization) reports through the crate-wide [`Error`], which wraps
//! `ResolveError` when a resolution failure needs to travel further.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for operations that may fail with a linkchase error.
///
/// # Examples
///
/// ```
/// use linkchase::{Error, Result};
///
/// fn example_operation() -> Result<usize> {
///     Ok(3)
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// Failure of a single symlink resolution walk.
///
/// There is no partial-success mode: a walk either yields a final
/// non-symlink node or one of these.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// The walk revisited a canonical path it had already seen.
    #[error("symlink cycle detected at {} after {hops} hop(s)", path.display())]
    Cycle {
        /// The canonical path that was seen twice.
        path: PathBuf,
        /// Number of hops taken before the repeat was found.
        hops: usize,
    },

    /// The filesystem could not answer a query for the current hop.
    #[error("cannot query {}: {source}", path.display())]
    Io {
        /// The path being queried when the failure happened.
        path: PathBuf,
        /// The underlying cause.
        #[source]
        source: io::Error,
    },
}

impl ResolveError {
    /// Check if the walk ended in a cycle.
    ///
    /// # Examples
    ///
    /// ```
    /// use linkchase::ResolveError;
    /// use std::path::PathBuf;
    ///
    /// let err = ResolveError::Cycle { path: PathBuf::from("/tmp/a"), hops: 2 };
    /// assert!(err.is_cycle());
    /// ```
    #[must_use]
    pub fn is_cycle(&self) -> bool {
        matches!(self, Self::Cycle { .. })
    }

    /// The path the error is about.
    #[must_use]
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::Cycle { path, .. } | Self::Io { path, .. } => path,
        }
    }
}

/// The main error type for the linkchase library.
#[derive(Debug, Error)]
pub enum Error {
    /// A symlink could not be resolved.
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    /// An invalid filesystem path was provided.
    #[error("invalid path {}: {reason}", path.display())]
    InvalidPath {
        /// The invalid path.
        path: PathBuf,
        /// The reason the path is invalid.
        reason: String,
    },

    /// A configuration file could not be parsed.
    #[error("configuration error: {0}")]
    Configuration(#[from] serde_yaml::Error),

    /// A configuration value failed validation.
    #[error("validation error for '{field}': {message}")]
    Validation {
        /// The field that failed validation.
        field: String,
        /// A description of the validation failure.
        message: String,
    },

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A path does not exist.
    #[error("path not found: {}", path.display())]
    PathNotFound {
        /// The path that was not found.
        path: PathBuf,
    },

    /// Permission denied accessing a path.
    #[error("permission denied: {}", path.display())]
    PermissionDenied {
        /// The path that could not be accessed.
        path: PathBuf,
    },
}

impl Error {
    /// Check if error indicates a path does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use linkchase::Error;
    /// use std::path::PathBuf;
    ///
    /// let err = Error::PathNotFound { path: PathBuf::from("/nonexistent") };
    /// assert!(err.is_not_found());
    /// ```
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::PathNotFound { .. })
    }

    /// Check if error is permission-related.
    #[must_use]
    pub fn is_permission_denied(&self) -> bool {
        matches!(self, Self::PermissionDenied { .. })
    }

    /// Check if error is a symlink cycle.
    #[must_use]
    pub fn is_cycle(&self) -> bool {
        matches!(self, Self::Resolve(e) if e.is_cycle())
    }
}
