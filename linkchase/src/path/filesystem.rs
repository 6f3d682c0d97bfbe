//! The filesystem capability consumed by the resolver.
//!
//! The resolver needs exactly one thing from its environment: given a path,
//! what is its canonical form, is it a symlink, and if so what does the link
//! say. [`FileSystem`] is that query. [`LocalFileSystem`] answers it from the
//! disk; [`MemoryFileSystem`] answers it from an in-memory tree so tests can
//! build link graphs (and failures) without touching the disk.

use std::collections::BTreeMap;
use std::fs;
use std::io::{self, ErrorKind};
use std::path::{Component, Path, PathBuf};

use crate::path::canonicalize::canonical_key;
use crate::path::normalize::{join_target, resolve_components};
use crate::path::types::{EntryKind, LinkInfo};

/// Maximum directory symlinks followed while canonicalizing one path in
/// [`MemoryFileSystem`]. Mirrors the kernel's `MAXSYMLINKS`.
const MAX_DIRECTORY_LINKS: usize = 40;

/// A source of path metadata for symlink resolution.
///
/// Implementations must be safe to share across threads; the resolver holds
/// no state of its own between calls.
///
/// # Examples
///
/// ```
/// use linkchase::path::{FileSystem, MemoryFileSystem};
/// use std::path::Path;
///
/// let fs = MemoryFileSystem::new()
///     .with_file("/srv/target")
///     .with_symlink("/srv/link", "target");
///
/// let info = fs.query(Path::new("/srv/link")).unwrap();
/// assert!(info.is_symlink());
/// assert_eq!(info.symlink_target(), Some(Path::new("target")));
/// ```
pub trait FileSystem: Send + Sync {
    /// Describe `path` without following a symlink in its final component.
    ///
    /// A path that does not exist is not an error: it is reported with
    /// [`EntryKind::Missing`].
    ///
    /// # Errors
    ///
    /// Returns an error if the filesystem cannot answer (permission denied,
    /// transport failure, too many directory links).
    fn query(&self, path: &Path) -> io::Result<LinkInfo>;
}

impl<F: FileSystem + ?Sized> FileSystem for &F {
    fn query(&self, path: &Path) -> io::Result<LinkInfo> {
        (**self).query(path)
    }
}

/// Answers queries from the local disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFileSystem;

impl FileSystem for LocalFileSystem {
    fn query(&self, path: &Path) -> io::Result<LinkInfo> {
        let canonical = canonical_key(path)?;

        let metadata = match fs::symlink_metadata(&canonical) {
            Ok(metadata) => metadata,
            Err(e) if is_missing(&e) => return Ok(LinkInfo::missing(canonical)),
            Err(e) => return Err(e),
        };

        let file_type = metadata.file_type();
        if file_type.is_symlink() {
            let target = fs::read_link(&canonical)?;
            return Ok(LinkInfo::symlink(canonical, target));
        }

        let kind = if file_type.is_dir() {
            EntryKind::Directory
        } else if file_type.is_file() {
            EntryKind::File
        } else {
            EntryKind::Other
        };
        Ok(LinkInfo::new(canonical, kind))
    }
}

/// Errors that mean "nothing is there" rather than "cannot tell".
fn is_missing(err: &io::Error) -> bool {
    matches!(err.kind(), ErrorKind::NotFound | ErrorKind::NotADirectory)
}

#[derive(Debug, Clone)]
enum Node {
    Directory,
    File,
    Symlink(PathBuf),
    Failing(ErrorKind),
}

/// An in-memory filesystem of directories, files and symlinks.
///
/// Paths are absolute and Unix-style. Adding an entry creates its parent
/// directories. Entries registered with [`with_error`](Self::with_error)
/// fail every query with the given error kind.
///
/// # Examples
///
/// ```
/// use linkchase::path::{FileSystem, MemoryFileSystem, EntryKind};
/// use std::path::Path;
///
/// let fs = MemoryFileSystem::new()
///     .with_file("/tmp/d1/file")
///     .with_dir("/tmp/d1/d2")
///     .with_symlink("/tmp/d2", "d1/d2");
///
/// // Directory links are followed while canonicalizing
/// let info = fs.query(Path::new("/tmp/d2/file")).unwrap();
/// assert_eq!(info.canonical, Path::new("/tmp/d1/d2/file"));
/// assert_eq!(info.kind, EntryKind::Missing);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryFileSystem {
    nodes: BTreeMap<PathBuf, Node>,
}

impl MemoryFileSystem {
    /// Create an empty filesystem containing only `/`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a directory.
    #[must_use]
    pub fn with_dir(mut self, path: impl AsRef<Path>) -> Self {
        self.add_dir(path);
        self
    }

    /// Add a regular file.
    #[must_use]
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        self.add_file(path);
        self
    }

    /// Add a symlink at `link` whose contents are `target`.
    #[must_use]
    pub fn with_symlink(mut self, link: impl AsRef<Path>, target: impl AsRef<Path>) -> Self {
        self.add_symlink(link, target);
        self
    }

    /// Make every query of `path` fail with `kind`.
    #[must_use]
    pub fn with_error(mut self, path: impl AsRef<Path>, kind: ErrorKind) -> Self {
        self.insert(path.as_ref(), Node::Failing(kind));
        self
    }

    /// Add a directory in place.
    pub fn add_dir(&mut self, path: impl AsRef<Path>) {
        self.insert(path.as_ref(), Node::Directory);
    }

    /// Add a regular file in place.
    pub fn add_file(&mut self, path: impl AsRef<Path>) {
        self.insert(path.as_ref(), Node::File);
    }

    /// Add a symlink in place.
    pub fn add_symlink(&mut self, link: impl AsRef<Path>, target: impl AsRef<Path>) {
        self.insert(link.as_ref(), Node::Symlink(target.as_ref().to_path_buf()));
    }

    fn insert(&mut self, path: &Path, node: Node) {
        let path = resolve_components(path);
        debug_assert!(path.is_absolute(), "memory paths must be absolute");

        for ancestor in path.ancestors().skip(1) {
            if ancestor.parent().is_none() {
                break;
            }
            self.nodes
                .entry(ancestor.to_path_buf())
                .or_insert(Node::Directory);
        }
        self.nodes.insert(path, node);
    }

    /// Walk `path` component by component, following every symlink.
    ///
    /// Returns the real location and whether it exists. Once a component is
    /// missing the rest is appended lexically, like
    /// [`canonical_key`] does on disk. Running out of `budget` fails the
    /// walk the way `ELOOP` does.
    fn walk(&self, path: &Path, budget: &mut usize) -> io::Result<(PathBuf, bool)> {
        let mut real = PathBuf::from("/");
        let mut exists = true;

        for component in path.components() {
            match component {
                Component::RootDir | Component::Prefix(_) | Component::CurDir => {}
                Component::ParentDir => {
                    real.pop();
                }
                Component::Normal(name) => {
                    let next = real.join(name);
                    if !exists {
                        real = next;
                        continue;
                    }
                    match self.nodes.get(&next) {
                        None => {
                            exists = false;
                            real = next;
                        }
                        Some(Node::Symlink(target)) => {
                            if *budget == 0 {
                                return Err(io::Error::other(format!(
                                    "too many levels of symbolic links: {}",
                                    path.display()
                                )));
                            }
                            *budget -= 1;
                            let (resolved, found) =
                                self.walk(&join_target(&real, target), budget)?;
                            if found {
                                real = resolved;
                            } else {
                                exists = false;
                                real = next;
                            }
                        }
                        Some(_) => real = next,
                    }
                }
            }
        }

        Ok((real, exists))
    }
}

impl FileSystem for MemoryFileSystem {
    fn query(&self, path: &Path) -> io::Result<LinkInfo> {
        if !path.is_absolute() {
            return Err(io::Error::new(
                ErrorKind::InvalidInput,
                format!("canonical key requires an absolute path: {}", path.display()),
            ));
        }

        let mut budget = MAX_DIRECTORY_LINKS;
        let canonical = match (path.components().next_back(), path.parent()) {
            (Some(Component::Normal(name)), Some(parent)) => {
                self.walk(parent, &mut budget)?.0.join(name)
            }
            _ => self.walk(path, &mut budget)?.0,
        };

        match self.nodes.get(&canonical) {
            None if canonical.parent().is_none() => {
                Ok(LinkInfo::new(canonical, EntryKind::Directory))
            }
            None => Ok(LinkInfo::missing(canonical)),
            Some(Node::Directory) => Ok(LinkInfo::new(canonical, EntryKind::Directory)),
            Some(Node::File) => Ok(LinkInfo::new(canonical, EntryKind::File)),
            Some(Node::Symlink(target)) => {
                let target = target.clone();
                Ok(LinkInfo::symlink(canonical, target))
            }
            Some(Node::Failing(kind)) => Err(io::Error::new(
                *kind,
                format!("injected failure for {}", canonical.display()),
            )),
        }
    }
}
