//! # Path Codec
//!
//! Lexical split and join of dotted toggle paths.
//!
//! `parse_toggle_path("")` yields one empty segment, not an empty list.
//! Callers that must reject blank paths do so before parsing.

use crate::domain::PATH_SEPARATOR;

/// Split a dotted path into its segments.
pub fn parse_toggle_path(path: &str) -> Vec<&str> {
    path.split(PATH_SEPARATOR).collect()
}

/// Join segments with the path separator.
pub fn build_toggle_path<S: AsRef<str>>(segments: &[S]) -> String {
    let mut path = String::new();
    for (i, segment) in segments.iter().enumerate() {
        if i > 0 {
            path.push(PATH_SEPARATOR);
        }
        path.push_str(segment.as_ref());
    }
    path
}

/// Cumulative prefixes of a segment list: `[a, b, c]` gives
/// `["a", "a.b", "a.b.c"]`.
pub fn path_prefixes<S: AsRef<str>>(segments: &[S]) -> Vec<String> {
    (1..=segments.len())
        .map(|end| build_toggle_path(&segments[..end]))
        .collect()
}
