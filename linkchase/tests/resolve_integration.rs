//! Integration tests for symlink resolution against the real filesystem.
//!
//! Every tree is built in a fresh temporary directory; see
//! [`common::LinkTree`].

#![cfg(unix)]

mod common;

use std::fs;
use std::path::Path;

use common::LinkTree;
use linkchase::{resolve, EntryKind, LinkResolver, ResolveError};

// ============================================================================
// Chains that end
// ============================================================================

#[test]
fn test_relative_link_through_directory_link() {
    // d1/file, d1/d2/, d2 -> d1/d2, d1/d2/file -> ../file
    let tree = LinkTree::new();
    let target = tree.file("d1/file");
    tree.dir("d1/d2");
    tree.link("d2", "d1/d2");
    tree.link("d1/d2/file", "../file");

    let res = resolve(&tree.path("d2/file")).unwrap();
    assert_eq!(res.resolved(), target);
    assert_eq!(res.kind(), EntryKind::File);
    assert_eq!(res.hops(), 1);
    // The link is recorded under the directory that really holds it
    assert_eq!(res.chain(), &[tree.path("d1/d2/file")]);
}

#[test]
fn test_desktop_entry_link() {
    let tree = LinkTree::new();
    let target = tree.file_with(
        "target.desktop",
        "[Desktop Entry]\nVersion=1.0\nType=Application\nName=My App\n\
         Exec=/full/path/to/my-app-binary\nTerminal=false\n",
    );
    let link = tree.link("link.desktop", &target);

    let res = resolve(&link).unwrap();
    assert_eq!(res.resolved(), target);
    assert_eq!(res.original(), link);
    assert!(fs::read_to_string(res.resolved())
        .unwrap()
        .starts_with("[Desktop Entry]"));
}

#[test]
fn test_multi_level_link() {
    let tree = LinkTree::new();
    let target = tree.file("target");
    let link1 = tree.link("link1", &target);
    let link2 = tree.link("link2", &link1);
    let link3 = tree.link("link3", &link2);

    let res = resolve(&link3).unwrap();
    assert_eq!(res.resolved(), target);
    assert_eq!(res.hops(), 3);
    assert_eq!(res.chain(), &[link3, link2, link1]);
}

#[test]
fn test_non_symlink_resolves_to_itself() {
    let tree = LinkTree::new();
    let file = tree.file("plain");
    let dir = tree.dir("folder");

    let res = resolve(&file).unwrap();
    assert_eq!(res.resolved(), file);
    assert_eq!(res.hops(), 0);
    assert!(!res.is_link());

    let res = resolve(&dir).unwrap();
    assert_eq!(res.resolved(), dir);
    assert_eq!(res.kind(), EntryKind::Directory);
}

#[test]
fn test_link_to_directory_stops_at_directory() {
    let tree = LinkTree::new();
    let dir = tree.dir("real");
    let link = tree.link("alias", "real");

    let res = resolve(&link).unwrap();
    assert_eq!(res.resolved(), dir);
    assert_eq!(res.kind(), EntryKind::Directory);
}

#[test]
fn test_dangling_link_is_not_an_error() {
    let tree = LinkTree::new();
    let link = tree.link("dangling", "nowhere/file");

    let res = resolve(&link).unwrap();
    assert!(res.is_dangling());
    assert_eq!(res.kind(), EntryKind::Missing);
    assert_eq!(res.resolved(), tree.path("nowhere/file"));
}

#[test]
fn test_resolve_existing_rejects_dangling() {
    let tree = LinkTree::new();
    let link = tree.link("dangling", "gone");

    let err = LinkResolver::new().resolve_existing(&link).unwrap_err();
    match err {
        ResolveError::Io { path, source } => {
            assert_eq!(path, tree.path("gone"));
            assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
        }
        ResolveError::Cycle { .. } => panic!("expected a missing target"),
    }
}

#[test]
fn test_nonexistent_start_is_dangling() {
    let tree = LinkTree::new();
    let res = resolve(&tree.path("never/created")).unwrap();
    assert!(res.is_dangling());
    assert_eq!(res.hops(), 0);
}

#[test]
fn test_spellings_of_same_link_agree() {
    let tree = LinkTree::new();
    let target = tree.file("target");
    tree.dir("sub");
    tree.link("link", "target");

    let plain = resolve(&tree.path("link")).unwrap();
    let dotted = resolve(&tree.root().join("sub").join("..").join(".").join("link")).unwrap();
    assert_eq!(plain.resolved(), target);
    assert_eq!(dotted.resolved(), target);
    assert_eq!(plain.chain(), dotted.chain());
}

// ============================================================================
// Chains that loop
// ============================================================================

#[test]
fn test_three_link_loop() {
    let tree = LinkTree::new();
    let link1 = tree.path("link1");
    let link2 = tree.path("link2");
    let link3 = tree.path("link3");
    tree.link("link2", &link1);
    tree.link("link3", &link2);
    tree.link("link1", &link3);

    let err = resolve(&link3).unwrap_err();
    match err {
        ResolveError::Cycle { path, hops } => {
            assert_eq!(path, link3);
            assert_eq!(hops, 3);
        }
        ResolveError::Io { .. } => panic!("expected a cycle"),
    }
}

#[test]
fn test_self_loop() {
    let tree = LinkTree::new();
    let link = tree.link("me", "me");

    let err = resolve(&link).unwrap_err();
    assert!(err.is_cycle());
    assert_eq!(err.path(), link);
}

#[test]
fn test_loop_entered_after_prefix() {
    let tree = LinkTree::new();
    tree.link("entry", "a");
    tree.link("a", "b");
    tree.link("b", "a");

    match resolve(&tree.path("entry")).unwrap_err() {
        ResolveError::Cycle { path, hops } => {
            assert_eq!(path, tree.path("a"));
            assert_eq!(hops, 3);
        }
        ResolveError::Io { .. } => panic!("expected a cycle"),
    }
}

#[test]
fn test_loop_through_directory_link() {
    // alias -> real, real/a -> ../alias/a names real/a again
    let tree = LinkTree::new();
    tree.dir("real");
    tree.link("alias", "real");
    let link = tree.link("real/a", "../alias/a");

    let err = resolve(&link).unwrap_err();
    assert!(err.is_cycle());
    assert_eq!(err.path(), link);

    // Entering through the alias spelling finds the same node
    let err = resolve(&tree.path("alias/a")).unwrap_err();
    assert_eq!(err.path(), link);
}

#[test]
fn test_loop_through_existing_intermediate() {
    // x -> d/../y, y -> d/../x with d a real directory
    let tree = LinkTree::new();
    tree.dir("d");
    tree.link("x", "d/../y");
    tree.link("y", "d/../x");

    let err = resolve(&tree.path("x")).unwrap_err();
    assert!(err.is_cycle());
}

// ============================================================================
// Query failures
// ============================================================================

#[test]
fn test_io_error_carries_failing_path() {
    // Looking below a directory link that loops cannot be answered
    let tree = LinkTree::new();
    tree.link("loopdir", "loopdir");
    let start = tree.path("loopdir/x");

    match resolve(&start).unwrap_err() {
        ResolveError::Io { path, .. } => assert_eq!(path, start),
        ResolveError::Cycle { .. } => panic!("expected an I/O failure"),
    }
}

#[test]
fn test_tilde_start_uses_home() {
    let Some(home) = home::home_dir() else {
        return;
    };
    let Ok(home) = fs::canonicalize(home) else {
        return;
    };

    let res = resolve(Path::new("~")).unwrap();
    assert_eq!(res.resolved(), home);

    let literal = LinkResolver::new()
        .with_tilde_expansion(false)
        .resolve(Path::new("/~"))
        .unwrap();
    assert_eq!(literal.resolved(), Path::new("/~"));
}
