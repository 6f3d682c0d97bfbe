//! Path canonicalization.
//!
//! Two flavours live here:
//! - [`canonicalize`] and [`canonicalize_existing`] follow every symlink,
//!   including the last component, and are used for roots and display.
//! - [`canonical_key`] resolves every *directory* component but leaves the
//!   final component alone. It is the identity of one node in a symlink
//!   chain: two spellings of the same link produce the same key, while the
//!   link and its target stay distinct.

use std::ffi::OsString;
use std::fs;
use std::io::{self, ErrorKind};
use std::path::{Component, Path, PathBuf};

use crate::error::{Error, Result};
use crate::path::normalize::resolve_components;

/// Canonicalize an existing path by following every symlink in it.
///
/// # Errors
///
/// Returns an error if:
/// - The path does not exist (`PathNotFound`)
/// - Permission is denied (`PermissionDenied`)
/// - Another I/O error occurs (`Io`)
///
/// # Examples
///
/// ```no_run
/// use linkchase::path::canonicalize::canonicalize;
/// use std::path::Path;
///
/// let canonical = canonicalize(Path::new("/tmp")).unwrap();
/// assert!(canonical.is_absolute());
/// ```
pub fn canonicalize(path: &Path) -> Result<PathBuf> {
    fs::canonicalize(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => Error::PathNotFound {
            path: path.to_path_buf(),
        },
        ErrorKind::PermissionDenied => Error::PermissionDenied {
            path: path.to_path_buf(),
        },
        _ => Error::Io(e),
    })
}

/// Canonicalize the existing portion of a path.
///
/// Finds the longest prefix of `path` that exists, canonicalizes it, and
/// returns the rest verbatim. The remainder may contain `.` or `..`.
///
/// # Errors
///
/// Returns an error if no prefix of the path exists (only possible for
/// relative paths whose first component is missing).
///
/// # Examples
///
/// ```no_run
/// use linkchase::path::canonicalize::canonicalize_existing;
/// use std::path::{Path, PathBuf};
///
/// let (canonical, remainder) =
///     canonicalize_existing(Path::new("/tmp/nonexistent/file")).unwrap();
/// assert_eq!(remainder, Some(PathBuf::from("nonexistent/file")));
/// ```
pub fn canonicalize_existing(path: &Path) -> Result<(PathBuf, Option<PathBuf>)> {
    split_existing(path).ok_or_else(|| Error::InvalidPath {
        path: path.to_path_buf(),
        reason: "Cannot find any existing portion of path".to_string(),
    })
}

/// Compute the canonical key of a path for cycle detection.
///
/// The parent directory is canonicalized as far as it exists, missing
/// components are appended and folded lexically, and the final component is
/// appended without being followed. Paths ending in `.` or `..` name a
/// directory and are canonicalized whole.
///
/// # Errors
///
/// Returns `InvalidInput` for relative paths and `NotFound` when no
/// ancestor of the path exists.
///
/// # Examples
///
/// ```no_run
/// use linkchase::path::canonicalize::canonical_key;
/// use std::path::Path;
///
/// // "/tmp/d2" is a symlink to "/tmp/d1/d2"; the key of a node below it
/// // lives under the real directory, but the node itself is not followed.
/// let key = canonical_key(Path::new("/tmp/d2/file")).unwrap();
/// assert!(key.ends_with("d1/d2/file"));
/// ```
pub fn canonical_key(path: &Path) -> io::Result<PathBuf> {
    if !path.is_absolute() {
        return Err(io::Error::new(
            ErrorKind::InvalidInput,
            format!("canonical key requires an absolute path: {}", path.display()),
        ));
    }

    match (path.components().next_back(), path.parent()) {
        (Some(Component::Normal(name)), Some(parent)) => {
            let mut key = canonical_dir(parent)?;
            key.push(name);
            Ok(key)
        }
        _ => canonical_dir(path),
    }
}

/// Canonicalize a directory path that may be partly missing.
fn canonical_dir(dir: &Path) -> io::Result<PathBuf> {
    let (base, remainder) = split_existing(dir).ok_or_else(|| {
        io::Error::new(
            ErrorKind::NotFound,
            format!("no existing ancestor of {}", dir.display()),
        )
    })?;

    Ok(match remainder {
        Some(rest) => resolve_components(&base.join(rest)),
        None => base,
    })
}

/// Split a path into its canonicalized existing prefix and missing suffix.
fn split_existing(path: &Path) -> Option<(PathBuf, Option<PathBuf>)> {
    let mut current = path;
    let mut missing: Vec<OsString> = Vec::new();

    loop {
        // `exists` is false for dangling links and loops too; those are
        // appended lexically like any other missing component.
        if current.exists() {
            if let Ok(canonical) = fs::canonicalize(current) {
                let remainder = if missing.is_empty() {
                    None
                } else {
                    Some(missing.iter().rev().collect())
                };
                return Some((canonical, remainder));
            }
        }

        let last = current.components().next_back()?;
        missing.push(last.as_os_str().to_os_string());
        current = current.parent()?;
        if current.as_os_str().is_empty() {
            return None;
        }
    }
}
