//! Relative-pattern matching starts the walk at the current working
//! directory. Kept as a single test in its own binary because it changes the
//! process cwd.

use minicode::glob::find_matches;
use std::fs;
use tempfile::Builder;

#[test]
fn relative_patterns_walk_from_the_current_directory() {
    let tmp_dir = Builder::new().prefix("test-glob-rel").tempdir().unwrap();
    let root = tmp_dir.path();
    fs::create_dir_all(root.join("a/b")).unwrap();
    fs::create_dir_all(root.join("a/x")).unwrap();
    fs::write(root.join("a/b/c.txt"), "b").unwrap();
    fs::write(root.join("a/x/c.txt"), "x").unwrap();
    fs::write(root.join("a/c.txt"), "top").unwrap();

    std::env::set_current_dir(root).unwrap();

    let recursive = find_matches("a/**/c.txt").unwrap();
    assert_eq!(recursive, vec!["a/b/c.txt", "a/c.txt", "a/x/c.txt"]);

    let one_level = find_matches("a/*/c.txt").unwrap();
    assert_eq!(one_level, vec!["a/b/c.txt", "a/x/c.txt"]);

    let no_matches = find_matches("a/**/*.rs").unwrap();
    assert!(no_matches.is_empty());
}
