//! Centralized filename parsing for the bracket-segment convention.
//!
//! All routing entries (files and folders) follow the same naming pattern:
//! a stem that is either literal (`about`) or dynamic (`[id]`), plus an
//! extension for files. This module provides the classification and URL
//! synthesis primitives used by every stage:
//!
//! - `about.js`   → literal segment `/about`
//! - `[id].js`    → dynamic segment `/:id`, parameter `id`
//! - `[*].js`     → wildcard segment `/*`
//! - `index.js`   → segment elided; `/` at the root
//!
//! Bracket usage is strict: exactly one `[` and one `]`, spanning the whole
//! stem. Anything else (`[a][b]`, `a[b]`, `[x`) is a naming error the caller
//! recovers from by skipping the entry.

use std::path::Path;
use thiserror::Error;

/// Malformed bracket usage in a file or folder name.
///
/// Always entry-local: callers skip the offending entry, log, and continue.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid name '{0}': brackets must be a single pair wrapping the whole name")]
pub struct InvalidNameError(pub String);

/// Classify a stem as dynamic, returning the parameter name if it is.
///
/// - No brackets at all → `Ok(None)`
/// - Exactly one `[` and one `]`, at the first and last position →
///   `Ok(Some(param))`
/// - Any other arrangement → `Err(InvalidNameError)`
pub fn dynamic_param(name: &str) -> Result<Option<&str>, InvalidNameError> {
    let open = name.matches('[').count();
    let close = name.matches(']').count();

    if open == 0 && close == 0 {
        return Ok(None);
    }

    if open != 1 || close != 1 || !name.starts_with('[') || !name.ends_with(']') {
        return Err(InvalidNameError(name.to_string()));
    }

    Ok(Some(&name[1..name.len() - 1]))
}

/// Whether a stem is a dynamic segment. See [`dynamic_param`].
pub fn is_dynamic(name: &str) -> Result<bool, InvalidNameError> {
    dynamic_param(name).map(|p| p.is_some())
}

/// Strip the single trailing extension from a name.
///
/// Splits on `.`: fewer than two parts returns the input unchanged;
/// otherwise everything but the last part, rejoined by `.` (`a.b.js` →
/// `a.b`). Multi-dot files are already excluded by the partitioner's
/// convention filter; this handles them anyway since folders undergo no
/// extension filtering.
pub fn strip_extension(name: &str) -> String {
    match name.rsplit_once('.') {
        Some((head, _)) => head.to_string(),
        None => name.to_string(),
    }
}

/// Rewrite one path segment for URL use.
///
/// `[x]` becomes `:x`, `[*]` becomes the wildcard marker `*`, literal
/// segments pass through. Malformed brackets are an error.
pub fn route_segment(name: &str) -> Result<String, InvalidNameError> {
    match dynamic_param(name)? {
        Some("*") => Ok("*".to_string()),
        Some(param) => Ok(format!(":{param}")),
        None => Ok(name.to_string()),
    }
}

/// Synthesize the URL path for an entry.
///
/// Takes the directory the entry lives in (below the input root) plus the
/// entry's stem. Every directory segment is rewritten via [`route_segment`];
/// segments literally named `index` are dropped.
///
/// - `index` at the root → `/`
/// - `index` below the root → the directory path alone
/// - anything else → directory path + `/` + rewritten stem
pub fn synthesize_route_path(
    input_dir: &Path,
    current_dir: &Path,
    stem: &str,
) -> Result<String, InvalidNameError> {
    let rel = current_dir.strip_prefix(input_dir).unwrap_or(current_dir);

    let mut segments = Vec::new();
    for component in rel.components() {
        let s = component.as_os_str().to_string_lossy();
        if s == "index" {
            continue;
        }
        segments.push(route_segment(&s)?);
    }

    let base = if segments.is_empty() {
        String::new()
    } else {
        format!("/{}", segments.join("/"))
    };

    if stem == "index" {
        if base.is_empty() {
            return Ok("/".to_string());
        }
        return Ok(base);
    }

    Ok(format!("{}/{}", base, route_segment(stem)?))
}
