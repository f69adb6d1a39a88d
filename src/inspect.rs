//! Static source inspection: which of the requested identifiers does a
//! page file export?
//!
//! Leaf route entries can carry metadata declared in the page source
//! itself, e.g.
//!
//! ```text
//! export function secured() { ... }   →  "secured": true
//! export const roles = ['admin'];     →  "roles": ["admin"]
//! export const maxAge = 3600;         →  "maxAge": 3600
//! ```
//!
//! Only identifiers named in the configured keyword list are reported;
//! everything else in the file is ignored. Scanning is line-oriented
//! pattern matching over named-export declarations — deliberately not a
//! full parser. A file that cannot be read (or is not UTF-8) yields an
//! empty result and the run continues un-annotated; inspection failures
//! are never fatal.

use crate::types::{ExportMap, ExportValue};
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;
use tracing::debug;

static EXPORT_FUNCTION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^\s*export\s+(?:async\s+)?function\s+([A-Za-z_$][A-Za-z0-9_$]*)").unwrap()
});

static EXPORT_VARIABLE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^\s*export\s+(?:const|let|var)\s+([A-Za-z_$][A-Za-z0-9_$]*)\s*=\s*(.+)$")
        .unwrap()
});

/// Scan a file for named exports matching the requested identifiers.
///
/// Returns a map from identifier to value: `true` for function exports,
/// the literal value for variable exports (non-literal initializers fall
/// back to `true` — the export exists, its value just isn't representable).
/// Identifiers the file does not export are absent. Read failures produce
/// an empty map.
pub fn inspect(path: &Path, keywords: &[String]) -> ExportMap {
    let mut scope = ExportMap::new();
    if keywords.is_empty() {
        return scope;
    }

    let source = match std::fs::read_to_string(path) {
        Ok(s) => s,
        Err(err) => {
            debug!("could not inspect '{}': {err}", path.display());
            return scope;
        }
    };

    for caps in EXPORT_FUNCTION.captures_iter(&source) {
        let name = &caps[1];
        if keywords.iter().any(|k| k == name) {
            scope.insert(name.to_string(), ExportValue::Bool(true));
        }
    }

    for caps in EXPORT_VARIABLE.captures_iter(&source) {
        let name = &caps[1];
        if !keywords.iter().any(|k| k == name) {
            continue;
        }
        let value = parse_literal(&caps[2]).unwrap_or(ExportValue::Bool(true));
        scope.insert(name.to_string(), value);
    }

    scope
}

/// Parse a JS literal initializer: boolean, number, quoted string, or a
/// flat array of those. Trailing `;` and inline `//` comments are ignored.
fn parse_literal(raw: &str) -> Option<ExportValue> {
    let mut value = raw.trim();
    if let Some(pos) = find_comment_start(value) {
        value = value[..pos].trim();
    }
    value = value.trim_end_matches(';').trim();

    if value == "true" {
        return Some(ExportValue::Bool(true));
    }
    if value == "false" {
        return Some(ExportValue::Bool(false));
    }
    if let Ok(num) = value.parse::<i64>() {
        return Some(ExportValue::Int(num));
    }
    if let Ok(num) = value.parse::<f64>() {
        return Some(ExportValue::Float(num));
    }
    if let Some(s) = parse_string_literal(value) {
        return Some(ExportValue::String(s));
    }
    if value.starts_with('[') && value.ends_with(']') {
        let inner = &value[1..value.len() - 1];
        if inner.trim().is_empty() {
            return Some(ExportValue::Array(Vec::new()));
        }
        let mut items = Vec::new();
        for part in inner.split(',') {
            // Nested arrays are out of scope for line-oriented scanning.
            items.push(parse_literal(part)?);
        }
        return Some(ExportValue::Array(items));
    }

    None
}

/// Quoted string literal (single or double quotes), or `None`.
fn parse_string_literal(value: &str) -> Option<String> {
    let bytes = value.as_bytes();
    if bytes.len() < 2 {
        return None;
    }
    let quote = bytes[0];
    if (quote == b'\'' || quote == b'"') && bytes[bytes.len() - 1] == quote {
        let inner = &value[1..value.len() - 1];
        if !inner.contains(quote as char) {
            return Some(inner.to_string());
        }
    }
    None
}

/// Position of an inline `//` comment, skipping `//` inside string
/// literals.
fn find_comment_start(value: &str) -> Option<usize> {
    let mut in_quote: Option<char> = None;
    let mut prev = '\0';
    for (i, c) in value.char_indices() {
        match in_quote {
            Some(q) if c == q => in_quote = None,
            Some(_) => {}
            None if c == '\'' || c == '"' => in_quote = Some(c),
            None if c == '/' && prev == '/' => return Some(i - 1),
            None => {}
        }
        prev = c;
    }
    None
}
