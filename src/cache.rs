//! Inspector result cache for watch mode.
//!
//! Source inspection reads and scans every page file for requested
//! exports. In a single run that cost is paid once, but watch mode
//! re-resolves the whole tree on every change — this cache lets unchanged
//! files skip re-inspection across passes.
//!
//! # Design
//!
//! Entries are keyed by **absolute path** and hold the file's [`ExportMap`].
//! The cache is read during a resolution pass and written once per path;
//! re-inspecting the same path yields the same value, so overwrites are
//! harmless. Invalidation is per-path: a change or delete event removes
//! only the affected entry — siblings and ancestors are recomputed from
//! fresh directory listings regardless of cache state.
//!
//! The cache lives for the whole watch session as a field of the engine;
//! it is purely in-memory and never persisted.

use crate::types::ExportMap;
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

/// In-memory inspector cache keyed by absolute path.
#[derive(Debug, Default)]
pub struct InspectCache {
    entries: HashMap<PathBuf, ExportMap>,
    stats: CacheStats,
}

impl InspectCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached exports for a path, recording a hit or miss.
    pub fn get(&mut self, path: &Path) -> Option<ExportMap> {
        match self.entries.get(path) {
            Some(scope) => {
                self.stats.hit();
                Some(scope.clone())
            }
            None => {
                self.stats.miss();
                None
            }
        }
    }

    /// Store the exports for a path. Last write wins.
    pub fn insert(&mut self, path: PathBuf, scope: ExportMap) {
        self.entries.insert(path, scope);
    }

    /// Drop the entry for a single path (change/delete invalidation).
    pub fn invalidate(&mut self, path: &Path) {
        self.entries.remove(path);
    }

    /// Drop everything. Used when the keyword set changes.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }
}

/// Hit/miss counters for one resolution pass or watch session.
#[derive(Debug, Default)]
pub struct CacheStats {
    pub hits: u32,
    pub misses: u32,
}

impl CacheStats {
    pub fn hit(&mut self) {
        self.hits += 1;
    }

    pub fn miss(&mut self) {
        self.misses += 1;
    }

    pub fn total(&self) -> u32 {
        self.hits + self.misses
    }
}

impl fmt::Display for CacheStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.hits > 0 {
            write!(
                f,
                "{} cached, {} inspected ({} total)",
                self.hits,
                self.misses,
                self.total()
            )
        } else {
            write!(f, "{} inspected", self.misses)
        }
    }
}
