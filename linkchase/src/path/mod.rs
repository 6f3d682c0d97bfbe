//! Symlink resolution and the path handling underneath it.
//!
//! # Key Concepts
//!
//! ## Canonical key
//!
//! Every node in a symlink chain is identified by its canonical key: the
//! absolute path with all *directory* symlinks resolved and `.`/`..` folded,
//! but with the final component left alone. Two spellings of the same link
//! share a key; a link and its target never do. The resolver keeps the keys
//! it has seen, and a repeat is a cycle.
//!
//! ## Relative targets
//!
//! A relative link target is taken against the real directory that holds
//! the link (the parent of its canonical key). It is never taken against the
//! start path's directory or the process working directory:
//!
//! ```
//! use linkchase::path::{LinkResolver, MemoryFileSystem};
//! use std::path::Path;
//!
//! // tmp/d2 -> d1/d2 and tmp/d1/d2/file -> ../file
//! let fs = MemoryFileSystem::new()
//!     .with_file("/tmp/d1/file")
//!     .with_dir("/tmp/d1/d2")
//!     .with_symlink("/tmp/d2", "d1/d2")
//!     .with_symlink("/tmp/d1/d2/file", "../file");
//!
//! let resolution = LinkResolver::with_filesystem(fs)
//!     .resolve(Path::new("/tmp/d2/file"))
//!     .unwrap();
//! assert_eq!(resolution.resolved(), Path::new("/tmp/d1/file"));
//! ```
//!
//! ## Filesystem capability
//!
//! The resolver asks one question per hop through [`FileSystem::query`].
//! [`LocalFileSystem`] answers from the disk and [`MemoryFileSystem`] from an
//! in-memory tree.

pub mod canonicalize;
pub mod filesystem;
pub mod normalize;
pub mod resolver;
mod types;

#[cfg(all(test, feature = "property-tests"))]
mod proptests;

pub use filesystem::{FileSystem, LocalFileSystem, MemoryFileSystem};
pub use resolver::{resolve, LinkResolver};
pub use types::{EntryKind, LinkInfo, Resolution};
