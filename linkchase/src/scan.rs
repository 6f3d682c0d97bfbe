//! Broken-link scanning.
//!
//! A [`Scanner`] walks a directory tree without following links, resolves
//! every symlink it meets, and sorts them into resolved, dangling, cyclic and
//! unreadable. A link that fails to resolve is a finding, not a scan
//! failure; only an unusable root aborts the scan.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;
use walkdir::{DirEntry, WalkDir};

use crate::error::{Error, ResolveError, Result};
use crate::path::canonicalize::canonicalize;
use crate::path::LinkResolver;

/// Options controlling a scan.
///
/// # Examples
///
/// ```
/// use linkchase::scan::ScanOptions;
///
/// let options = ScanOptions::default().with_max_depth(Some(2));
/// assert_eq!(options.max_depth, Some(2));
/// assert!(!options.include_hidden);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanOptions {
    /// Deepest level to descend to (the root's children are depth 1).
    pub max_depth: Option<usize>,
    /// Whether to look inside and report dot-entries.
    pub include_hidden: bool,
}

impl ScanOptions {
    /// Limit how deep the walk goes.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: Option<usize>) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Include dot-files and dot-directories.
    #[must_use]
    pub fn with_hidden(mut self, include_hidden: bool) -> Self {
        self.include_hidden = include_hidden;
        self
    }
}

/// How a symlink found during a scan resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "detail", rename_all = "lowercase")]
pub enum LinkStatus {
    /// The chain ends at an existing non-symlink.
    Resolved(PathBuf),
    /// The chain ends at a path that does not exist.
    Dangling(PathBuf),
    /// The chain loops.
    Cycle,
    /// A hop could not be queried.
    Unreadable(String),
}

impl LinkStatus {
    /// Anything but [`LinkStatus::Resolved`].
    #[must_use]
    pub fn is_broken(&self) -> bool {
        !matches!(self, Self::Resolved(_))
    }
}

impl fmt::Display for LinkStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Resolved(path) => write!(f, "{}", path.display()),
            Self::Dangling(path) => write!(f, "dangling ({})", path.display()),
            Self::Cycle => write!(f, "cycle"),
            Self::Unreadable(reason) => write!(f, "unreadable ({reason})"),
        }
    }
}

/// One symlink found during a scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScanEntry {
    /// Where the link was found.
    pub link: PathBuf,
    /// Number of links followed before the walk ended (0 for I/O failures).
    pub hops: usize,
    /// The outcome.
    #[serde(flatten)]
    pub status: LinkStatus,
}

/// Everything a scan found.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ScanReport {
    /// Canonical form of the scanned root.
    pub root: PathBuf,
    /// Every symlink found, in walk order.
    pub entries: Vec<ScanEntry>,
    /// Directory entries that could not be read during the walk.
    pub skipped: usize,
}

impl ScanReport {
    /// Entries that did not resolve to an existing target.
    pub fn broken(&self) -> impl Iterator<Item = &ScanEntry> {
        self.entries.iter().filter(|e| e.status.is_broken())
    }

    /// Whether any link is broken.
    #[must_use]
    pub fn has_broken(&self) -> bool {
        self.broken().next().is_some()
    }

    /// Drop every entry that resolved.
    pub fn retain_broken(&mut self) {
        self.entries.retain(|e| e.status.is_broken());
    }

    /// Count of links that resolved.
    #[must_use]
    pub fn resolved_count(&self) -> usize {
        self.count(|s| matches!(s, LinkStatus::Resolved(_)))
    }

    /// Count of dangling links.
    #[must_use]
    pub fn dangling_count(&self) -> usize {
        self.count(|s| matches!(s, LinkStatus::Dangling(_)))
    }

    /// Count of cyclic links.
    #[must_use]
    pub fn cycle_count(&self) -> usize {
        self.count(|s| matches!(s, LinkStatus::Cycle))
    }

    /// Count of links that could not be queried.
    #[must_use]
    pub fn unreadable_count(&self) -> usize {
        self.count(|s| matches!(s, LinkStatus::Unreadable(_)))
    }

    fn count(&self, pred: impl Fn(&LinkStatus) -> bool) -> usize {
        self.entries.iter().filter(|e| pred(&e.status)).count()
    }
}

/// Walks a directory tree and classifies every symlink in it.
///
/// # Examples
///
/// ```no_run
/// use linkchase::scan::{Scanner, ScanOptions};
/// use std::path::Path;
///
/// let report = Scanner::new(ScanOptions::default())
///     .scan(Path::new("/usr/lib"))
///     .unwrap();
/// for entry in report.broken() {
///     println!("{}: {}", entry.link.display(), entry.status);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Scanner {
    resolver: LinkResolver,
    options: ScanOptions,
}

impl Default for Scanner {
    fn default() -> Self {
        Self::new(ScanOptions::default())
    }
}

impl Scanner {
    /// Create a scanner with the given options.
    #[must_use]
    pub fn new(options: ScanOptions) -> Self {
        Self {
            resolver: LinkResolver::new().with_tilde_expansion(false),
            options,
        }
    }

    /// The options in effect.
    #[must_use]
    pub fn options(&self) -> &ScanOptions {
        &self.options
    }

    /// Scan `root`.
    ///
    /// # Errors
    ///
    /// Returns an error if `root` does not exist, cannot be read, or is not a
    /// directory.
    pub fn scan(&self, root: &Path) -> Result<ScanReport> {
        let root = canonicalize(root)?;
        if !root.is_dir() {
            return Err(Error::InvalidPath {
                path: root,
                reason: "scan root must be a directory".to_string(),
            });
        }

        let mut walker = WalkDir::new(&root).follow_links(false);
        if let Some(depth) = self.options.max_depth {
            walker = walker.max_depth(depth);
        }

        let include_hidden = self.options.include_hidden;
        let mut report = ScanReport {
            root: root.clone(),
            ..ScanReport::default()
        };

        for entry in walker
            .into_iter()
            .filter_entry(|e| include_hidden || e.depth() == 0 || !is_hidden(e))
        {
            let entry = match entry {
                Ok(v) => v,
                Err(e) => {
                    log::warn!("skipping unreadable entry: {e}");
                    report.skipped += 1;
                    continue;
                }
            };

            if !entry.path_is_symlink() {
                continue;
            }

            report.entries.push(self.classify(entry.path()));
        }

        log::debug!(
            "scanned {}: {} link(s), {} broken, {} skipped",
            root.display(),
            report.entries.len(),
            report.broken().count(),
            report.skipped
        );
        Ok(report)
    }

    fn classify(&self, link: &Path) -> ScanEntry {
        let (hops, status) = match self.resolver.resolve(link) {
            Ok(res) if res.is_dangling() => (res.hops(), LinkStatus::Dangling(res.into_path_buf())),
            Ok(res) => (res.hops(), LinkStatus::Resolved(res.into_path_buf())),
            Err(ResolveError::Cycle { hops, .. }) => (hops, LinkStatus::Cycle),
            Err(ResolveError::Io { source, .. }) => (0, LinkStatus::Unreadable(source.to_string())),
        };
        ScanEntry {
            link: link.to_path_buf(),
            hops,
            status,
        }
    }
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .is_some_and(|name| name.starts_with('.'))
}
