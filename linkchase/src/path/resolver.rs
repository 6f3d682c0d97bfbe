//! Symlink chain resolution with cycle detection.
//!
//! [`LinkResolver`] follows a path through any number of symlinks until it
//! reaches something that is not a symlink. Every node visited is identified
//! by its canonical key; seeing a key twice means the chain loops, and the
//! walk stops right there rather than after some hop ceiling.

use std::collections::HashSet;
use std::io;
use std::path::Path;

use crate::error::ResolveError;
use crate::path::filesystem::{FileSystem, LocalFileSystem};
use crate::path::normalize::{absolutize, join_target};
use crate::path::types::Resolution;

/// Resolves symlink chains against a [`FileSystem`].
///
/// The resolver is stateless between calls, so a single instance can be
/// shared by any number of threads.
///
/// # Examples
///
/// ```
/// use linkchase::path::{LinkResolver, MemoryFileSystem};
/// use std::path::Path;
///
/// let fs = MemoryFileSystem::new()
///     .with_file("/srv/target")
///     .with_symlink("/srv/link1", "target")
///     .with_symlink("/srv/link2", "link1");
///
/// let resolver = LinkResolver::with_filesystem(fs);
/// let resolution = resolver.resolve(Path::new("/srv/link2")).unwrap();
/// assert_eq!(resolution.resolved(), Path::new("/srv/target"));
/// assert_eq!(resolution.hops(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct LinkResolver<F = LocalFileSystem> {
    fs: F,
    /// Whether to expand `~` in start paths.
    expand_tilde: bool,
}

impl Default for LinkResolver<LocalFileSystem> {
    fn default() -> Self {
        Self::with_filesystem(LocalFileSystem)
    }
}

impl LinkResolver<LocalFileSystem> {
    /// Create a resolver backed by the local disk.
    ///
    /// # Examples
    ///
    /// ```
    /// use linkchase::path::LinkResolver;
    ///
    /// let resolver = LinkResolver::new();
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl<F: FileSystem> LinkResolver<F> {
    /// Create a resolver backed by another filesystem.
    #[must_use]
    pub fn with_filesystem(fs: F) -> Self {
        Self {
            fs,
            expand_tilde: true,
        }
    }

    /// Configure whether a leading `~` in the start path means the home
    /// directory.
    ///
    /// # Examples
    ///
    /// ```
    /// use linkchase::path::LinkResolver;
    ///
    /// let resolver = LinkResolver::new().with_tilde_expansion(false);
    /// ```
    #[must_use]
    pub fn with_tilde_expansion(mut self, expand: bool) -> Self {
        self.expand_tilde = expand;
        self
    }

    /// The filesystem this resolver queries.
    pub fn filesystem(&self) -> &F {
        &self.fs
    }

    /// Follow `start` through every symlink to the first non-symlink node.
    ///
    /// A relative `start` is taken against the process working directory.
    /// Relative link targets are taken against the real directory holding
    /// the link. The final node need not exist; see
    /// [`Resolution::is_dangling`].
    ///
    /// # Errors
    ///
    /// - [`ResolveError::Cycle`] when a canonical path repeats
    /// - [`ResolveError::Io`] when a query fails or the start path is
    ///   unusable
    ///
    /// # Examples
    ///
    /// ```
    /// use linkchase::path::{LinkResolver, MemoryFileSystem};
    /// use std::path::Path;
    ///
    /// let fs = MemoryFileSystem::new()
    ///     .with_symlink("/l/a", "b")
    ///     .with_symlink("/l/b", "a");
    ///
    /// let err = LinkResolver::with_filesystem(fs)
    ///     .resolve(Path::new("/l/a"))
    ///     .unwrap_err();
    /// assert!(err.is_cycle());
    /// ```
    pub fn resolve(&self, start: &Path) -> Result<Resolution, ResolveError> {
        let mut current =
            absolutize(start, self.expand_tilde).map_err(|e| ResolveError::Io {
                path: start.to_path_buf(),
                source: io::Error::new(io::ErrorKind::InvalidInput, e.to_string()),
            })?;

        let mut visited = HashSet::new();
        let mut chain = Vec::new();

        loop {
            let info = self.fs.query(&current).map_err(|source| {
                log::debug!("query failed for {}: {source}", current.display());
                ResolveError::Io {
                    path: current.clone(),
                    source,
                }
            })?;

            if !visited.insert(info.canonical.clone()) {
                log::debug!(
                    "cycle at {} after {} hop(s) from {}",
                    info.canonical.display(),
                    chain.len(),
                    start.display()
                );
                return Err(ResolveError::Cycle {
                    path: info.canonical,
                    hops: chain.len(),
                });
            }

            if info.is_symlink() && info.symlink_target().is_none() {
                return Err(ResolveError::Io {
                    path: current,
                    source: io::Error::new(
                        io::ErrorKind::InvalidData,
                        "symlink reported without a target",
                    ),
                });
            }

            let Some(target) = info.symlink_target().map(Path::to_path_buf) else {
                log::trace!(
                    "{} resolved to {} ({}) in {} hop(s)",
                    start.display(),
                    info.canonical.display(),
                    info.kind,
                    chain.len()
                );
                return Ok(Resolution::new(
                    start.to_path_buf(),
                    info.canonical,
                    info.kind,
                    chain,
                ));
            };

            // A symlink's key always ends in a normal component, so the
            // parent is the real directory holding it.
            let link_dir = info.canonical.parent().unwrap_or_else(|| Path::new("/"));
            let next = join_target(link_dir, &target);
            log::trace!("{} -> {}", info.canonical.display(), next.display());

            chain.push(info.canonical);
            current = next;
        }
    }

    /// Like [`resolve`](Self::resolve), but a chain ending at a missing path
    /// is an error.
    ///
    /// # Errors
    ///
    /// Everything [`resolve`](Self::resolve) returns, plus
    /// [`ResolveError::Io`] with [`io::ErrorKind::NotFound`] for dangling
    /// chains.
    pub fn resolve_existing(&self, start: &Path) -> Result<Resolution, ResolveError> {
        let resolution = self.resolve(start)?;
        if resolution.is_dangling() {
            return Err(ResolveError::Io {
                path: resolution.resolved().to_path_buf(),
                source: io::Error::new(io::ErrorKind::NotFound, "symlink target does not exist"),
            });
        }
        Ok(resolution)
    }
}

/// Resolve `path` against the local disk with default settings.
///
/// # Errors
///
/// See [`LinkResolver::resolve`].
///
/// # Examples
///
/// ```no_run
/// use linkchase::resolve;
/// use std::path::Path;
///
/// let resolution = resolve(Path::new("/usr/bin/python3")).unwrap();
/// println!("{} -> {}", resolution.original().display(), resolution);
/// ```
pub fn resolve(path: &Path) -> Result<Resolution, ResolveError> {
    LinkResolver::new().resolve(path)
}
