//! Lexical path normalization.
//!
//! Nothing here touches the filesystem except [`normalize`], which reads the
//! process working directory to absolutize a caller-supplied start path.
//! Link targets are never absolutized against the working directory; they
//! go through [`join_target`] instead.

use std::env;
use std::path::{Component, Path, PathBuf};

use crate::error::{Error, Result};

/// Expand a leading tilde (`~`) to the home directory.
///
/// Handles `~` and `~/path`. `~user` is rejected.
///
/// # Errors
///
/// Returns an error if:
/// - The path starts with `~` but contains invalid UTF-8
/// - The home directory cannot be determined
/// - The path uses `~user` syntax
///
/// # Examples
///
/// ```
/// use linkchase::path::normalize::expand_tilde;
/// use std::path::Path;
///
/// let expanded = expand_tilde(Path::new("~/links")).unwrap();
/// assert!(expanded.is_absolute());
/// assert!(expanded.ends_with("links"));
///
/// // Anything else passes through untouched
/// let untouched = expand_tilde(Path::new("rel/~x")).unwrap();
/// assert_eq!(untouched, Path::new("rel/~x"));
/// ```
pub fn expand_tilde(path: &Path) -> Result<PathBuf> {
    let Some(Component::Normal(first)) = path.components().next() else {
        return Ok(path.to_path_buf());
    };
    let Some(first) = first.to_str() else {
        return Ok(path.to_path_buf());
    };
    if !first.starts_with('~') {
        return Ok(path.to_path_buf());
    }
    if first != "~" {
        return Err(Error::InvalidPath {
            path: path.to_path_buf(),
            reason: "~user syntax is not supported; use ~ or ~/path".to_string(),
        });
    }

    let home = home::home_dir().ok_or_else(|| Error::InvalidPath {
        path: path.to_path_buf(),
        reason: "Cannot determine home directory".to_string(),
    })?;

    let rest: PathBuf = path.components().skip(1).collect();
    if rest.as_os_str().is_empty() {
        Ok(home)
    } else {
        Ok(home.join(rest))
    }
}

/// Fold `.` and `..` components without consulting the filesystem.
///
/// A `..` at the root stays at the root, the way the kernel treats `/..`.
/// Leading `..` components of a relative path are kept since there is
/// nothing to fold them into.
///
/// This is only correct when no directory in the path is a symlink; callers
/// that need the real location use
/// [`canonical_key`](crate::path::canonicalize::canonical_key).
///
/// # Examples
///
/// ```
/// use linkchase::path::normalize::resolve_components;
/// use std::path::{Path, PathBuf};
///
/// assert_eq!(resolve_components(Path::new("/a/./b/../c")), PathBuf::from("/a/c"));
/// assert_eq!(resolve_components(Path::new("/a/../../b")), PathBuf::from("/b"));
/// assert_eq!(resolve_components(Path::new("../x/./y")), PathBuf::from("../x/y"));
/// ```
#[must_use]
pub fn resolve_components(path: &Path) -> PathBuf {
    let mut parts: Vec<Component<'_>> = Vec::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match parts.last() {
                Some(Component::Normal(_)) => {
                    parts.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => parts.push(component),
            },
            _ => parts.push(component),
        }
    }

    if parts.is_empty() {
        return PathBuf::from(".");
    }
    parts.iter().collect()
}

/// Join a link target onto the directory that holds the link.
///
/// Absolute targets replace the base entirely. The result is not folded:
/// `..` must be interpreted against the real directory tree, which only the
/// canonicalization step can do.
///
/// # Examples
///
/// ```
/// use linkchase::path::normalize::join_target;
/// use std::path::{Path, PathBuf};
///
/// let dir = Path::new("/srv/d1/d2");
/// assert_eq!(join_target(dir, Path::new("../file")), PathBuf::from("/srv/d1/d2/../file"));
/// assert_eq!(join_target(dir, Path::new("/etc/hosts")), PathBuf::from("/etc/hosts"));
/// ```
#[must_use]
pub fn join_target(link_dir: &Path, target: &Path) -> PathBuf {
    if target.is_absolute() {
        target.to_path_buf()
    } else {
        link_dir.join(target)
    }
}

/// Make a caller-supplied start path absolute without folding it.
///
/// Expands `~` when `expand_home` is set, then joins relative paths onto the
/// process working directory. `..` components are kept since a directory
/// symlink earlier in the path changes what they mean.
///
/// # Errors
///
/// Returns an error if tilde expansion fails or the working directory cannot
/// be read.
///
/// # Examples
///
/// ```no_run
/// use linkchase::path::normalize::absolutize;
/// use std::path::Path;
///
/// let absolute = absolutize(Path::new("d2/../file"), true).unwrap();
/// assert!(absolute.is_absolute());
/// assert!(absolute.ends_with("d2/../file"));
/// ```
pub fn absolutize(path: &Path, expand_home: bool) -> Result<PathBuf> {
    let expanded = if expand_home {
        expand_tilde(path)?
    } else {
        path.to_path_buf()
    };

    if expanded.is_absolute() {
        return Ok(expanded);
    }

    let cwd = env::current_dir().map_err(|e| Error::InvalidPath {
        path: path.to_path_buf(),
        reason: format!("Cannot get current directory: {e}"),
    })?;
    Ok(cwd.join(expanded))
}

/// Normalize a path to absolute, folded form.
///
/// This is [`absolutize`] followed by [`resolve_components`]. Only suitable
/// for display and configuration paths, never for link walking.
///
/// # Errors
///
/// Returns an error if [`absolutize`] fails.
///
/// # Examples
///
/// ```no_run
/// use linkchase::path::normalize::normalize;
/// use std::path::Path;
///
/// let normalized = normalize(Path::new("./links/a"), true).unwrap();
/// assert!(normalized.is_absolute());
/// ```
pub fn normalize(path: &Path, expand_home: bool) -> Result<PathBuf> {
    absolutize(path, expand_home).map(|absolute| resolve_components(&absolute))
}
