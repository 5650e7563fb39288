// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Slash-path helpers.
//!
//! Every addressable element on the bus is reached through a slash-delimited
//! path such as `/shell/submodels/sm1/temp/value`. The helpers in this module
//! are pure and total: they never fail, leading/trailing separators are
//! stripped, and repeated separators collapse. The empty path addresses the
//! root of a model tree.

/// The path separator character.
pub const SEPARATOR: char = '/';

/// Splits a path into its non-empty segments.
///
/// `split("")` and `split("/")` both yield an empty vector. Repeated
/// separators collapse, so `"a//b"` splits the same as `"a/b"`.
///
/// # Examples
///
/// ```
/// use vab_core::path::split;
///
/// assert_eq!(split("/a/b/c/"), vec!["a", "b", "c"]);
/// assert!(split("/").is_empty());
/// ```
pub fn split(path: &str) -> Vec<&str> {
    path.split(SEPARATOR).filter(|s| !s.is_empty()).collect()
}

/// Joins segments into a canonical path without leading or trailing separators.
///
/// Empty segments are skipped, so `join` of `split` output is always in
/// canonical form.
pub fn join<I, S>(segments: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out = String::new();
    for segment in segments {
        let segment = segment.as_ref();
        if segment.is_empty() {
            continue;
        }
        if !out.is_empty() {
            out.push(SEPARATOR);
        }
        out.push_str(segment);
    }
    out
}

/// Normalizes a path to its canonical form: no leading/trailing separators,
/// no repeated separators.
pub fn strip_slashes(path: &str) -> String {
    join(split(path))
}

/// Returns the last segment of a path, or `None` for the empty path.
pub fn last_segment(path: &str) -> Option<&str> {
    split(path).last().copied()
}

/// Returns the path with its last segment removed.
///
/// Dropping the last segment of a single-segment path (or the empty path)
/// yields the empty path.
pub fn drop_last_segment(path: &str) -> String {
    let segments = split(path);
    match segments.len() {
        0 | 1 => String::new(),
        n => join(&segments[..n - 1]),
    }
}

/// Concatenates paths into one canonical path.
///
/// Empty operands are skipped; the result never carries leading or trailing
/// separators.
pub fn concat<I, S>(paths: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut segments: Vec<String> = Vec::new();
    for path in paths {
        segments.extend(split(path.as_ref()).iter().map(|s| s.to_string()));
    }
    join(segments)
}

/// Returns `true` if the path addresses the root (no segments).
pub fn is_empty(path: &str) -> bool {
    split(path).is_empty()
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_empty_forms() {
        assert!(split("").is_empty());
        assert!(split("/").is_empty());
        assert!(split("//").is_empty());
    }

    #[test]
    fn test_split_collapses_separators() {
        assert_eq!(split("a//b///c"), vec!["a", "b", "c"]);
        assert_eq!(split("/a/b/"), vec!["a", "b"]);
    }

    #[test]
    fn test_join_skips_empty_segments() {
        assert_eq!(join(["a", "", "b"]), "a/b");
        assert_eq!(join(Vec::<&str>::new()), "");
    }

    #[test]
    fn test_round_trip_matches_strip_slashes() {
        for path in ["", "/", "a", "/a/b/c/", "a//b", "///x///y///"] {
            assert_eq!(join(split(path)), strip_slashes(path), "path: {path:?}");
        }
    }

    #[test]
    fn test_last_segment() {
        assert_eq!(last_segment("/a/b/c"), Some("c"));
        assert_eq!(last_segment("a"), Some("a"));
        assert_eq!(last_segment("/"), None);
    }

    #[test]
    fn test_drop_last_segment() {
        assert_eq!(drop_last_segment("/a/b/c"), "a/b");
        assert_eq!(drop_last_segment("a"), "");
        assert_eq!(drop_last_segment(""), "");
    }

    #[test]
    fn test_concat() {
        assert_eq!(concat(["/shell/", "/submodels/sm1"]), "shell/submodels/sm1");
        assert_eq!(concat(["", "a", ""]), "a");
    }
}
