//! Directory listing and entry partitioning.
//!
//! First step of every directory-level resolution: list the immediate
//! children of a directory, classify each as file or folder, and keep only
//! the routing-relevant ones.
//!
//! ## Convention filter
//!
//! Folders are always candidates. Files are candidates only when the name
//! splits into exactly two `.`-delimited parts (stem + extension) and the
//! extension is in the configured allow-set:
//!
//! - `about.js`      → candidate (allow-set `["js"]`)
//! - `about.style.js`→ excluded: two dots, not a page component
//! - `README`        → excluded: no extension
//! - `notes.txt`     → excluded: extension not in allow-set
//!
//! Exclusion is a filter, not a skip decision — nothing is logged for a
//! file that simply isn't routing-relevant.
//!
//! ## Ordering
//!
//! The returned list is all retained files first, then all retained
//! folders, each group in filesystem listing order. The conflict resolver
//! depends on this: folder nesting flags are computed against sibling
//! files, so files must be known before folders are processed.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// One raw directory child, before metadata resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawEntry {
    /// Raw listing name (`about.js`, `[cat]`).
    pub name: String,
    pub is_dir: bool,
    pub path: PathBuf,
}

/// List a directory and partition its children into routing candidates.
///
/// Files failing the convention filter are silently dropped. The result is
/// files-then-folders, listing order preserved within each group.
pub fn partition_dir(dir: &Path, allowed_extensions: &[String]) -> io::Result<Vec<RawEntry>> {
    let mut files = Vec::new();
    let mut folders = Vec::new();

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().to_string();
        let path = entry.path();
        let is_dir = entry.file_type()?.is_dir();

        if is_dir {
            folders.push(RawEntry { name, is_dir, path });
            continue;
        }

        if matches_convention(&name, allowed_extensions) {
            files.push(RawEntry { name, is_dir, path });
        }
    }

    files.extend(folders);
    Ok(files)
}

/// Whether a file name is a page component: exactly one dot, extension in
/// the allow-set.
fn matches_convention(name: &str, allowed_extensions: &[String]) -> bool {
    let parts: Vec<&str> = name.split('.').collect();
    if parts.len() != 2 {
        return false;
    }
    allowed_extensions.iter().any(|ext| ext == parts[1])
}

/// Whether a directory has any listable children.
///
/// Empty folders contribute no routes and are dropped by the resolver.
pub fn has_entries(dir: &Path) -> bool {
    fs::read_dir(dir)
        .map(|mut entries| entries.next().is_some())
        .unwrap_or(false)
}
