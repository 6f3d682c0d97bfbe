//! Core types for symlink resolution.
//!
//! [`LinkInfo`] is the answer to one filesystem query; [`Resolution`] is the
//! outcome of a whole walk.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

/// What a path names on the filesystem, without following a final symlink.
///
/// # Examples
///
/// ```
/// use linkchase::path::EntryKind;
///
/// assert_eq!(EntryKind::Symlink.to_string(), "symlink");
/// assert!(!EntryKind::Missing.exists());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    /// Nothing exists at the path.
    Missing,
    /// A symbolic link.
    Symlink,
    /// A regular file.
    File,
    /// A directory.
    Directory,
    /// A device, socket, fifo or anything else.
    Other,
}

impl EntryKind {
    /// Whether something exists at the path.
    #[must_use]
    pub fn exists(self) -> bool {
        !matches!(self, Self::Missing)
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing => write!(f, "missing"),
            Self::Symlink => write!(f, "symlink"),
            Self::File => write!(f, "file"),
            Self::Directory => write!(f, "directory"),
            Self::Other => write!(f, "other"),
        }
    }
}

/// The answer to a single filesystem query about one path.
///
/// # Examples
///
/// ```
/// use linkchase::path::{EntryKind, LinkInfo};
/// use std::path::{Path, PathBuf};
///
/// let info = LinkInfo::symlink(PathBuf::from("/srv/link"), PathBuf::from("../target"));
/// assert!(info.is_symlink());
/// assert_eq!(info.symlink_target(), Some(Path::new("../target")));
///
/// let file = LinkInfo::new(PathBuf::from("/srv/target"), EntryKind::File);
/// assert_eq!(file.symlink_target(), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkInfo {
    /// Canonical form of the queried path (final component not followed).
    pub canonical: PathBuf,
    /// What the path names.
    pub kind: EntryKind,
    /// Verbatim link contents when `kind` is [`EntryKind::Symlink`].
    pub target: Option<PathBuf>,
}

impl LinkInfo {
    /// Describe a non-symlink entry.
    #[must_use]
    pub fn new(canonical: PathBuf, kind: EntryKind) -> Self {
        Self {
            canonical,
            kind,
            target: None,
        }
    }

    /// Describe a path where nothing exists.
    #[must_use]
    pub fn missing(canonical: PathBuf) -> Self {
        Self::new(canonical, EntryKind::Missing)
    }

    /// Describe a symlink and its immediate target.
    #[must_use]
    pub fn symlink(canonical: PathBuf, target: PathBuf) -> Self {
        Self {
            canonical,
            kind: EntryKind::Symlink,
            target: Some(target),
        }
    }

    /// Whether the queried path is a symlink.
    #[must_use]
    pub fn is_symlink(&self) -> bool {
        self.kind == EntryKind::Symlink
    }

    /// The immediate target, present only for symlinks.
    #[must_use]
    pub fn symlink_target(&self) -> Option<&Path> {
        if self.is_symlink() {
            self.target.as_deref()
        } else {
            None
        }
    }
}

/// The outcome of a successful resolution walk.
///
/// `resolved` is never a symlink: the walk only stops on a node whose
/// [`EntryKind`] is something else.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    original: PathBuf,
    resolved: PathBuf,
    kind: EntryKind,
    chain: Vec<PathBuf>,
}

impl Resolution {
    pub(crate) fn new(
        original: PathBuf,
        resolved: PathBuf,
        kind: EntryKind,
        chain: Vec<PathBuf>,
    ) -> Self {
        debug_assert!(kind != EntryKind::Symlink);
        Self {
            original,
            resolved,
            kind,
            chain,
        }
    }

    /// The path the caller asked about, as given.
    #[must_use]
    pub fn original(&self) -> &Path {
        &self.original
    }

    /// Canonical form of the final, non-symlink node.
    #[must_use]
    pub fn resolved(&self) -> &Path {
        &self.resolved
    }

    /// What the final node is.
    #[must_use]
    pub fn kind(&self) -> EntryKind {
        self.kind
    }

    /// Canonical forms of every symlink traversed, in order.
    #[must_use]
    pub fn chain(&self) -> &[PathBuf] {
        &self.chain
    }

    /// Number of symlinks followed.
    #[must_use]
    pub fn hops(&self) -> usize {
        self.chain.len()
    }

    /// Whether the original path was a symlink at all.
    #[must_use]
    pub fn is_link(&self) -> bool {
        !self.chain.is_empty()
    }

    /// Whether the chain ends at a path that does not exist.
    #[must_use]
    pub fn is_dangling(&self) -> bool {
        !self.kind.exists()
    }

    /// Convert into the resolved `PathBuf`.
    #[must_use]
    pub fn into_path_buf(self) -> PathBuf {
        self.resolved
    }
}

impl AsRef<Path> for Resolution {
    fn as_ref(&self) -> &Path {
        &self.resolved
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.resolved.display())
    }
}
