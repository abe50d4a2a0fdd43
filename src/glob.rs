//! # Pattern Matcher
//!
//! Resolves a glob-style path pattern against the filesystem. `*` matches any
//! run of characters within one path segment, `?` matches exactly one
//! character, and `**` matches zero or more intermediate directory levels.
//!
//! The walk is a pure function: every recursive call returns a fresh set that
//! the caller merges, and the final result is deduplicated and
//! lexicographically sorted. Paths that do not exist or are not directories
//! are silently pruned mid-walk; the filesystem legitimately may not contain
//! matches.

use anyhow::Result;
use regex::Regex;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// One `/`-delimited unit of the pattern.
enum Segment {
    /// No wildcards; checked by direct path lookup.
    Literal(String),
    /// Contains `*` or `?`; compiled to an anchored regex and matched against
    /// directory entry names.
    Wildcard(Regex),
    /// The recursive-descent marker `**`.
    Any,
}

/// Resolves `pattern` to a sorted list of matching paths.
///
/// A leading `/` anchors the walk at the filesystem root; otherwise it starts
/// at the current working directory and results come back as relative paths.
/// An empty list means no matches; errors are reserved for unusable patterns.
pub fn find_matches(pattern: &str) -> Result<Vec<String>> {
    let (start, rest) = match pattern.strip_prefix('/') {
        Some(rest) => (PathBuf::from("/"), rest),
        None => (PathBuf::new(), pattern),
    };

    let segments = rest
        .split('/')
        .filter(|s| !s.is_empty())
        .map(parse_segment)
        .collect::<Result<Vec<_>>>()?;

    if segments.is_empty() {
        return Ok(Vec::new());
    }

    Ok(walk(&start, &segments).into_iter().collect())
}

fn parse_segment(raw: &str) -> Result<Segment> {
    if raw == "**" {
        return Ok(Segment::Any);
    }
    if raw.contains('*') || raw.contains('?') {
        return Ok(Segment::Wildcard(compile_wildcard(raw)?));
    }
    Ok(Segment::Literal(raw.to_string()))
}

fn compile_wildcard(segment: &str) -> Result<Regex> {
    let mut pattern = String::from("^");
    for ch in segment.chars() {
        match ch {
            '*' => pattern.push_str(".*"),
            '?' => pattern.push('.'),
            other => pattern.push_str(&regex::escape(&other.to_string())),
        }
    }
    pattern.push('$');
    Ok(Regex::new(&pattern)?)
}

/// Matches `segments` beneath `dir`, returning every concrete path that
/// satisfies the remaining pattern. The last segment emits files and
/// directories alike; earlier segments only descend into directories.
fn walk(dir: &Path, segments: &[Segment]) -> BTreeSet<String> {
    let mut found = BTreeSet::new();
    let Some((first, rest)) = segments.split_first() else {
        return found;
    };

    match first {
        Segment::Any => {
            if rest.is_empty() {
                // Trailing `**`: the zero-level expansion matches the walk
                // root itself, then everything beneath it.
                if !dir.as_os_str().is_empty() {
                    found.insert(dir.to_string_lossy().into_owned());
                }
                collect_all(dir, &mut found);
            } else {
                // Zero directories: the rest of the pattern applies here.
                found.extend(walk(dir, rest));
                // One or more: descend while keeping `**` active. The zero
                // case never re-enters subdirectories with `**` still
                // leading, so the two branches enumerate disjoint paths;
                // the set merge absorbs overlap from stacked `**` segments.
                for sub in entries(dir) {
                    if sub.is_dir() {
                        found.extend(walk(&sub, segments));
                    }
                }
            }
        }
        Segment::Literal(name) => {
            let candidate = dir.join(name);
            if rest.is_empty() {
                if candidate.exists() {
                    found.insert(candidate.to_string_lossy().into_owned());
                }
            } else if candidate.is_dir() {
                found.extend(walk(&candidate, rest));
            }
        }
        Segment::Wildcard(re) => {
            for entry in entries(dir) {
                let Some(name) = entry.file_name().map(|n| n.to_string_lossy().into_owned())
                else {
                    continue;
                };
                if !re.is_match(&name) {
                    continue;
                }
                if rest.is_empty() {
                    found.insert(entry.to_string_lossy().into_owned());
                } else if entry.is_dir() {
                    found.extend(walk(&entry, rest));
                }
            }
        }
    }

    found
}

fn collect_all(dir: &Path, found: &mut BTreeSet<String>) {
    for entry in entries(dir) {
        found.insert(entry.to_string_lossy().into_owned());
        if entry.is_dir() {
            collect_all(&entry, found);
        }
    }
}

/// Directory entries of `dir`, joined onto `dir` so relative walks produce
/// relative paths. Unreadable directories yield nothing.
fn entries(dir: &Path) -> Vec<PathBuf> {
    let read_root: &Path = if dir.as_os_str().is_empty() {
        Path::new(".")
    } else {
        dir
    };
    match std::fs::read_dir(read_root) {
        Ok(iter) => iter
            .filter_map(|entry| entry.ok())
            .map(|entry| dir.join(entry.file_name()))
            .collect(),
        Err(_) => Vec::new(),
    }
}
