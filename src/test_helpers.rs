//! Shared fixture helpers for unit tests.

use crate::cache::InspectCache;
use crate::resolve::Resolver;
use crate::types::RouteTree;
use std::fs;
use std::path::{Path, PathBuf};

/// Create a page file with a minimal default export.
pub fn write_page(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, "export default {};\n").unwrap();
    path
}

/// Resolve a fixture tree with default options: `js` pages, no keywords,
/// output directory at the input root.
pub fn resolve_fixture(root: &Path) -> RouteTree {
    let extensions = vec!["js".to_string()];
    let keywords: Vec<String> = Vec::new();
    let mut cache = InspectCache::new();
    let mut resolver = Resolver::new(root, root, &extensions, &keywords, &mut cache);
    resolver.resolve().unwrap()
}
