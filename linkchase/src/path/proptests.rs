//! Property-based tests for symlink resolution.
//!
//! Link graphs are built in a `MemoryFileSystem` so thousands of shapes can
//! be checked without touching the disk.

use super::filesystem::MemoryFileSystem;
use super::resolver::LinkResolver;
use super::types::EntryKind;
use crate::error::ResolveError;
use proptest::prelude::*;
use std::path::{Path, PathBuf};

fn path_component_strategy() -> impl Strategy<Value = String> {
    "[a-z0-9_-]{1,12}"
}

fn directory_strategy() -> impl Strategy<Value = PathBuf> {
    prop::collection::vec(path_component_strategy(), 1..4).prop_map(|parts| {
        let mut path = PathBuf::from("/");
        for part in parts {
            path.push(part);
        }
        path
    })
}

/// Build `dir/link0 -> link1 -> ... -> link{n-1} -> target`.
fn chain_fs(dir: &Path, len: usize, relative: bool) -> MemoryFileSystem {
    let mut fs = MemoryFileSystem::new().with_file(dir.join("target"));
    for i in 0..len {
        let next = if i + 1 == len {
            "target".to_string()
        } else {
            format!("link{}", i + 1)
        };
        let target = if relative {
            PathBuf::from(next)
        } else {
            dir.join(next)
        };
        fs.add_symlink(dir.join(format!("link{i}")), target);
    }
    fs
}

/// Build a ring `dir/link0 -> link1 -> ... -> link{n-1} -> link0`.
fn ring_fs(dir: &Path, len: usize) -> MemoryFileSystem {
    let mut fs = MemoryFileSystem::new().with_dir(dir);
    for i in 0..len {
        fs.add_symlink(
            dir.join(format!("link{i}")),
            format!("link{}", (i + 1) % len),
        );
    }
    fs
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 2000,
        max_shrink_iters: 2000,
        .. ProptestConfig::default()
    })]

    // A non-symlink resolves to itself with no hops
    #[test]
    fn plain_file_resolves_to_itself(dir in directory_strategy()) {
        let file = dir.join("target");
        let fs = MemoryFileSystem::new().with_file(&file);
        let res = LinkResolver::with_filesystem(fs).resolve(&file).unwrap();
        prop_assert_eq!(res.resolved(), file.as_path());
        prop_assert_eq!(res.hops(), 0);
    }

    // Chains of any length end at the target, with one chain entry per hop
    #[test]
    fn chain_resolves_to_end(
        dir in directory_strategy(),
        len in 1usize..64,
        relative in any::<bool>(),
    ) {
        let fs = chain_fs(&dir, len, relative);
        let res = LinkResolver::with_filesystem(fs)
            .resolve(&dir.join("link0"))
            .unwrap();
        let expected = dir.join("target");
        prop_assert_eq!(res.resolved(), expected.as_path());
        prop_assert_eq!(res.kind(), EntryKind::File);
        prop_assert_eq!(res.hops(), len);
    }

    // Starting anywhere on a ring is a cycle detected after exactly one lap
    #[test]
    fn ring_is_cycle(dir in directory_strategy(), len in 1usize..64, start in 0usize..64) {
        let start = start % len;
        let fs = ring_fs(&dir, len);
        let err = LinkResolver::with_filesystem(fs)
            .resolve(&dir.join(format!("link{start}")))
            .unwrap_err();
        match err {
            ResolveError::Cycle { path, hops } => {
                prop_assert_eq!(path, dir.join(format!("link{start}")));
                prop_assert_eq!(hops, len);
            }
            ResolveError::Io { .. } => prop_assert!(false, "expected a cycle"),
        }
    }

    // Looking below a directory link that points into itself is a query
    // failure, never a dangling success
    #[test]
    fn directory_link_into_itself_fails(dir in directory_strategy(), depth in 1usize..4) {
        let link = dir.join("loop");
        let below: PathBuf = std::iter::repeat("x").take(depth).collect();
        let fs = MemoryFileSystem::new().with_symlink(&link, Path::new("loop").join(&below));
        let err = LinkResolver::with_filesystem(fs).resolve(&link).unwrap_err();
        prop_assert!(matches!(err, ResolveError::Io { .. }));
    }

    // Chain entries are distinct: no node is counted twice
    #[test]
    fn chain_entries_are_unique(dir in directory_strategy(), len in 1usize..32) {
        let fs = chain_fs(&dir, len, true);
        let res = LinkResolver::with_filesystem(fs)
            .resolve(&dir.join("link0"))
            .unwrap();
        let unique: std::collections::HashSet<_> = res.chain().iter().collect();
        prop_assert_eq!(unique.len(), res.chain().len());
    }
}
