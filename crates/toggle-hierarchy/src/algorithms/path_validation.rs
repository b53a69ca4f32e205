//! # Path Validation
//!
//! Accumulating validation of caller-supplied toggle paths. Every violation
//! is reported, not just the first, except for a blank path.

use crate::config::HierarchyConfig;
use crate::domain::{codes, FieldError, ToggleError, PATH_SEPARATOR};

use super::path_codec::parse_toggle_path;

const FIELD: &str = "path";

fn violation(message: impl Into<String>) -> FieldError {
    FieldError::new(FIELD, message).with_code(codes::INVALID_PATH)
}

fn is_segment_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

/// Validate a toggle path against the configured limits.
///
/// # Checks
/// 1. Not blank (stops further checks)
/// 2. Length within `max_path_length`
/// 3. No leading or trailing dot
/// 4. No consecutive dots
/// 5. At most `max_depth` segments
/// 6. Each segment non-empty, within `max_segment_length`, and made of
///    `[A-Za-z0-9_-]`
pub fn validate_toggle_path(path: &str, config: &HierarchyConfig) -> Result<(), ToggleError> {
    if path.trim().is_empty() {
        return Err(ToggleError::validation_failed(vec![violation(
            "Toggle path is required",
        )]));
    }

    let mut details = Vec::new();

    if path.chars().count() > config.max_path_length {
        details.push(violation(format!(
            "Toggle path must be at most {} characters",
            config.max_path_length
        )));
    }

    if path.starts_with(PATH_SEPARATOR) || path.ends_with(PATH_SEPARATOR) {
        details.push(violation("Toggle path cannot start or end with a dot"));
    }

    if path.contains("..") {
        details.push(violation("Toggle path cannot contain consecutive dots"));
    }

    let segments = parse_toggle_path(path);
    if segments.len() > config.max_depth {
        details.push(violation(format!(
            "Toggle path has {} segments, at most {} are allowed",
            segments.len(),
            config.max_depth
        )));
    }

    for (i, segment) in segments.iter().enumerate() {
        let position = i + 1;
        if segment.trim().is_empty() {
            details.push(violation(format!("Toggle path segment {} is empty", position)));
            continue;
        }
        if segment.chars().count() > config.max_segment_length {
            details.push(violation(format!(
                "Toggle path segment {} must be at most {} characters",
                position, config.max_segment_length
            )));
        }
        if !segment.chars().all(is_segment_char) {
            details.push(violation(format!(
                "Toggle path segment {} ('{}') contains invalid characters. Only letters, numbers, hyphens and underscores are allowed",
                position, segment
            )));
        }
    }

    if details.is_empty() {
        Ok(())
    } else {
        Err(ToggleError::validation_failed(details))
    }
}
