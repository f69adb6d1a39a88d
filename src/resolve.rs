//! Route resolution: the heart of the tool.
//!
//! Walks the pages directory depth-first and turns each level into an
//! ordered route list. Per directory the work is:
//!
//! 1. **Partition** ([`crate::scan`]): list children, files first.
//! 2. **Resolve metadata and conflicts**: compute stems, dynamic/nesting
//!    flags and URL paths, and apply the skip rules (reserved `*` names,
//!    malformed brackets, duplicate dynamic siblings, empty folders,
//!    index routes that shadow or are shadowed).
//! 3. **Score**: rank each survivor 1–5 so specific routes sort before
//!    catch-alls.
//! 4. **Compose**: recurse into folders, attach nested-folder results as
//!    sub-routes of their owning file, and concatenate head/tail buckets.
//!
//! ## Ordering
//!
//! The final order for a level is:
//!
//! ```text
//! files (score < 5, sorted)  ++  plain folders (flattened)
//!   ++  dynamic folders (flattened)  ++  files (score 5, sorted)
//! ```
//!
//! Static and specific matches always come before any folder subtree, and
//! every dynamic-rooted subtree is pushed to the very end so a request is
//! never shadowed by a broader dynamic pattern appearing earlier. Sorting
//! is stable; listing order breaks ties.
//!
//! ## Failure semantics
//!
//! Entry-level problems (bad names, conflicts) are skipped and logged,
//! never fatal. Only a root path that is not a directory aborts the run.

use crate::cache::InspectCache;
use crate::inspect;
use crate::naming;
use crate::scan::{self, RawEntry};
use crate::types::{ExportMap, RouteEntry, RouteTree};
use rayon::prelude::*;
use std::collections::HashMap;
use std::io;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("input path is not a directory: {0}")]
    NotADirectory(PathBuf),
}

/// Score given to entries deferred to the tail of a level.
const SCORE_TAIL: u8 = 5;
/// Score given to dynamic folders (tail, but ahead of dynamic files).
const SCORE_DYNAMIC_DIR: u8 = 4;

/// Flags describing the directory that owns the level being resolved.
///
/// Passed top-down, immutable per call. The root level gets all-false.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DirContext {
    /// The owning directory is itself a dynamic segment (`[cat]/`).
    pub is_dynamic_dir: bool,
    /// The owning directory is nested under a file of the same stem.
    pub is_nested_dir: bool,
    /// The grandparent level kept a dynamic file.
    pub parent_has_dynamic_file: bool,
}

/// Fully resolved metadata for one surviving entry.
///
/// Built fresh per directory listing; entries never reference each other —
/// nesting is resolved through name-keyed lookups over the sibling list.
#[derive(Debug, Clone)]
pub struct EntryMeta {
    pub name: String,
    pub is_dir: bool,
    pub path: PathBuf,
    /// Name without its single trailing extension (folders: the name).
    pub stem: String,
    pub is_dynamic: bool,
    /// Folders: a sibling file's stem equals this folder's name.
    pub is_nested: bool,
    /// Files: a non-empty sibling folder is named after this file's stem.
    pub has_nested: bool,
    /// Files: URL path for this entry.
    pub route_path: String,
    /// Files: path from the output directory to the source file.
    pub component_path: String,
}

/// An entry annotated with its precedence score.
///
/// A separate wrapper (rather than a mutable field on [`EntryMeta`]) so
/// scoring stays a pure function over the resolved level.
#[derive(Debug, Clone)]
pub struct ScoredEntry {
    pub meta: EntryMeta,
    pub score: u8,
}

/// One resolved directory level plus its dynamic-sibling counters.
struct Level {
    entries: Vec<EntryMeta>,
    dynamic_file_count: u32,
}

/// Assign the precedence score for one entry. First matching rule wins:
///
/// 1. `index` inside a dynamic directory → 5 (least specific there)
/// 2. `index` anywhere else → 1 (most specific)
/// 3. literal file → 2
/// 4. literal folder → 3
/// 5. dynamic folder → 4
/// 6. dynamic file → 5
pub fn score_entry(meta: &EntryMeta, ctx: &DirContext) -> u8 {
    if meta.stem == "index" && ctx.is_dynamic_dir {
        return SCORE_TAIL;
    }
    if meta.stem == "index" {
        return 1;
    }
    if !meta.is_dynamic && !meta.is_dir {
        return 2;
    }
    if !meta.is_dynamic {
        return 3;
    }
    if meta.is_dir {
        return SCORE_DYNAMIC_DIR;
    }
    SCORE_TAIL
}

/// Long-lived resolution context: configuration plus the inspector cache.
///
/// Created once per run (or once per watch session, so the cache survives
/// across passes) and threaded through the recursive calls by `&mut self`.
pub struct Resolver<'a> {
    input_dir: PathBuf,
    /// Relative path from the output directory to the input directory,
    /// prefixed onto every `componentPath`.
    relative_prefix: PathBuf,
    allowed_extensions: &'a [String],
    keywords: &'a [String],
    cache: &'a mut InspectCache,
}

impl<'a> Resolver<'a> {
    pub fn new(
        input_dir: &Path,
        output_dir: &Path,
        allowed_extensions: &'a [String],
        keywords: &'a [String],
        cache: &'a mut InspectCache,
    ) -> Self {
        Self {
            input_dir: input_dir.to_path_buf(),
            relative_prefix: relative_between(output_dir, input_dir),
            allowed_extensions,
            keywords,
            cache,
        }
    }

    /// Resolve the whole tree. The only fatal condition is an input path
    /// that is not a directory.
    pub fn resolve(&mut self) -> Result<RouteTree, ResolveError> {
        if !self.input_dir.is_dir() {
            return Err(ResolveError::NotADirectory(self.input_dir.clone()));
        }
        let root = self.input_dir.clone();
        let routes = self.resolve_dir(&root, &DirContext::default())?;
        Ok(RouteTree { routes })
    }

    /// Resolve one directory into its ordered route list.
    fn resolve_dir(&mut self, dir: &Path, ctx: &DirContext) -> Result<Vec<RouteEntry>, ResolveError> {
        let raw = scan::partition_dir(dir, self.allowed_extensions)?;
        let level = self.resolve_level(dir, ctx, &raw);

        let scored: Vec<ScoredEntry> = level
            .entries
            .into_iter()
            .map(|meta| ScoredEntry {
                score: score_entry(&meta, ctx),
                meta,
            })
            .collect();

        // Split into files, plain folders, and nested folders keyed by the
        // owning file's stem.
        let mut files: Vec<ScoredEntry> = Vec::new();
        let mut folders: Vec<ScoredEntry> = Vec::new();
        let mut nested: HashMap<String, EntryMeta> = HashMap::new();
        for entry in scored {
            if !entry.meta.is_dir {
                files.push(entry);
            } else if entry.meta.is_nested {
                nested.insert(entry.meta.stem.clone(), entry.meta);
            } else {
                folders.push(entry);
            }
        }

        let exports = self.inspect_files(&files);

        // Files: leaves, or owners of a nested folder's sub-routes.
        let mut head_files: Vec<(u8, RouteEntry)> = Vec::new();
        let mut tail_files: Vec<(u8, RouteEntry)> = Vec::new();
        for entry in &files {
            let scope = exports
                .get(&absolutize(&entry.meta.path))
                .cloned()
                .unwrap_or_default();

            let route = match nested.get(&entry.meta.stem) {
                Some(folder) if entry.meta.has_nested => {
                    let child_ctx = DirContext {
                        is_dynamic_dir: folder.is_dynamic,
                        is_nested_dir: true,
                        parent_has_dynamic_file: ctx.parent_has_dynamic_file,
                    };
                    let folder_path = folder.path.clone();
                    let sub = self.resolve_dir(&folder_path, &child_ctx)?;
                    RouteEntry {
                        exports: scope,
                        component_path: entry.meta.component_path.clone(),
                        path: entry.meta.route_path.clone(),
                        routes: Some(sub),
                        exact: false,
                    }
                }
                _ => RouteEntry {
                    exports: scope,
                    component_path: entry.meta.component_path.clone(),
                    path: entry.meta.route_path.clone(),
                    routes: None,
                    exact: true,
                },
            };

            if entry.score == SCORE_TAIL {
                tail_files.push((entry.score, route));
            } else {
                head_files.push((entry.score, route));
            }
        }

        // Plain folders: their resolved sub-lists flatten into this level.
        let mut head_dirs: Vec<RouteEntry> = Vec::new();
        let mut tail_dirs: Vec<RouteEntry> = Vec::new();
        for entry in &folders {
            let child_ctx = DirContext {
                is_dynamic_dir: entry.meta.is_dynamic,
                is_nested_dir: false,
                parent_has_dynamic_file: level.dynamic_file_count > 0,
            };
            let sub = self.resolve_dir(&entry.meta.path, &child_ctx)?;
            if entry.score == SCORE_DYNAMIC_DIR {
                tail_dirs.extend(sub);
            } else {
                head_dirs.extend(sub);
            }
        }

        head_files.sort_by_key(|(score, _)| *score);
        tail_files.sort_by_key(|(score, _)| *score);

        let mut out: Vec<RouteEntry> = head_files.into_iter().map(|(_, r)| r).collect();
        out.extend(head_dirs);
        out.extend(tail_dirs);
        out.extend(tail_files.into_iter().map(|(_, r)| r));
        Ok(out)
    }

    /// Apply the per-level metadata and conflict rules (spec steps, in
    /// listing order). Skips never abort the level.
    fn resolve_level(&self, dir: &Path, ctx: &DirContext, raw: &[RawEntry]) -> Level {
        let mut entries: Vec<EntryMeta> = Vec::new();
        let mut dynamic_file_count: u32 = 0;
        let mut dynamic_folder_count: u32 = 0;
        let mut nested_index_dir = false;

        for item in raw {
            let stem = if item.is_dir {
                item.name.clone()
            } else {
                naming::strip_extension(&item.name)
            };

            // Reserved: a literal '*' would collide with the wildcard
            // marker produced for '[*]' segments.
            if stem == "*" {
                info!("skipping '{}' ('*' is a reserved name)", item.path.display());
                continue;
            }

            let is_dynamic = match naming::is_dynamic(&stem) {
                Ok(d) => d,
                Err(err) => {
                    warn!("skipping '{}': {err}", item.path.display());
                    continue;
                }
            };

            if item.is_dir {
                let is_nested = raw
                    .iter()
                    .filter(|s| !s.is_dir)
                    .any(|s| naming::strip_extension(&s.name) == stem);
                if is_nested && stem == "index" {
                    nested_index_dir = true;
                }

                if is_dynamic {
                    dynamic_folder_count += 1;
                    // Two dynamic folders at one level are path-ambiguous;
                    // first found wins.
                    if dynamic_folder_count > 1 {
                        info!(
                            "skipping folder '{}' (a dynamic folder already exists at this level)",
                            item.path.display()
                        );
                        continue;
                    }
                }

                if !scan::has_entries(&item.path) {
                    info!("skipping folder '{}' (empty)", item.path.display());
                    continue;
                }

                entries.push(EntryMeta {
                    name: item.name.clone(),
                    is_dir: true,
                    path: item.path.clone(),
                    stem,
                    is_dynamic,
                    is_nested,
                    has_nested: false,
                    route_path: String::new(),
                    component_path: String::new(),
                });
                continue;
            }

            // An index file inside a dynamic folder whose parent level also
            // kept a dynamic file resolves to the same URL as that file:
            //
            //   test/[id].js    -> /test/:id
            //   test/[param]/index.js -> /test/:param
            if stem == "index" && ctx.parent_has_dynamic_file && ctx.is_dynamic_dir {
                info!(
                    "skipping '{}' (conflicts with the parent level's dynamic file)",
                    item.path.display()
                );
                continue;
            }

            if is_dynamic {
                dynamic_file_count += 1;
                if dynamic_file_count > 1 {
                    info!(
                        "skipping '{}' (a dynamic file already exists at this level)",
                        item.path.display()
                    );
                    continue;
                }
            }

            let nested_folder = raw
                .iter()
                .find(|s| s.is_dir && s.name == stem);
            let has_nested = match nested_folder {
                Some(folder) if scan::has_entries(&folder.path) => true,
                Some(folder) => {
                    // Nesting onto an empty folder is pointless; demote to
                    // a plain leaf route.
                    info!(
                        "nested folder '{}' is empty; treating '{}' as a leaf route",
                        folder.path.display(),
                        item.path.display()
                    );
                    false
                }
                None => false,
            };

            let route_path = match naming::synthesize_route_path(&self.input_dir, dir, &stem) {
                Ok(p) => p,
                Err(err) => {
                    warn!("skipping '{}': {err}", item.path.display());
                    continue;
                }
            };

            entries.push(EntryMeta {
                name: item.name.clone(),
                is_dir: false,
                path: item.path.clone(),
                stem,
                is_dynamic,
                is_nested: false,
                has_nested,
                route_path,
                component_path: self.component_path(dir, &item.name),
            });
        }

        // A nested folder named 'index' makes every sibling unreachable:
        // the index route matches first and its owner cannot be exact.
        if nested_index_dir {
            entries.retain(|meta| {
                if meta.stem == "index" {
                    return true;
                }
                info!(
                    "skipping {} '{}' (the nested index route makes it unreachable)",
                    if meta.is_dir { "folder" } else { "file" },
                    meta.path.display()
                );
                false
            });
        }

        Level {
            entries,
            dynamic_file_count,
        }
    }

    /// Batch-inspect the level's files, through the cache.
    ///
    /// Uncached files are scanned in parallel; results are folded into the
    /// cache sequentially afterwards, so the cache itself needs no locks
    /// (re-inspection is idempotent anyway).
    fn inspect_files(&mut self, files: &[ScoredEntry]) -> HashMap<PathBuf, ExportMap> {
        let mut out = HashMap::new();
        if self.keywords.is_empty() {
            return out;
        }

        let mut missing: Vec<PathBuf> = Vec::new();
        for entry in files {
            let abs = absolutize(&entry.meta.path);
            match self.cache.get(&abs) {
                Some(scope) => {
                    out.insert(abs, scope);
                }
                None => missing.push(abs),
            }
        }

        let fresh: Vec<(PathBuf, ExportMap)> = missing
            .into_par_iter()
            .map(|abs| {
                let scope = inspect::inspect(&abs, self.keywords);
                (abs, scope)
            })
            .collect();

        for (abs, scope) in fresh {
            self.cache.insert(abs.clone(), scope.clone());
            out.insert(abs, scope);
        }

        out
    }

    /// `componentPath` for a file: output-dir-relative prefix + the
    /// directory's position below the input root + the file name, joined
    /// with forward slashes.
    fn component_path(&self, dir: &Path, name: &str) -> String {
        let rel = dir.strip_prefix(&self.input_dir).unwrap_or(dir);
        let mut segments: Vec<String> = Vec::new();
        for c in self.relative_prefix.components().chain(rel.components()) {
            segments.push(c.as_os_str().to_string_lossy().to_string());
        }
        segments.push(name.to_string());
        segments.join("/")
    }
}

/// Make a path absolute against the current directory, without touching
/// the filesystem (the target may not exist yet).
pub fn absolutize(path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .map(|cwd| cwd.join(path))
            .unwrap_or_else(|_| path.to_path_buf())
    }
}

/// Relative path from `from` to `to` (`..` segments for the divergence).
fn relative_between(from: &Path, to: &Path) -> PathBuf {
    let from = absolutize(from);
    let to = absolutize(to);
    let from_parts: Vec<Component> = from.components().collect();
    let to_parts: Vec<Component> = to.components().collect();

    let common = from_parts
        .iter()
        .zip(to_parts.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let mut result = PathBuf::new();
    for _ in common..from_parts.len() {
        result.push("..");
    }
    for part in &to_parts[common..] {
        result.push(part);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{resolve_fixture, write_page};
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn lone_root_index_yields_root_route() {
        let tmp = TempDir::new().unwrap();
        write_page(tmp.path(), "index.js");

        let tree = resolve_fixture(tmp.path());
        assert_eq!(tree.routes.len(), 1);
        assert_eq!(tree.routes[0].path, "/");
        assert!(tree.routes[0].exact);
        assert!(tree.routes[0].routes.is_none());
    }

    #[test]
    fn index_sorts_first_then_files_then_folder_routes() {
        let tmp = TempDir::new().unwrap();
        write_page(tmp.path(), "zz.js");
        write_page(tmp.path(), "index.js");
        fs::create_dir(tmp.path().join("blog")).unwrap();
        write_page(&tmp.path().join("blog"), "post.js");

        let tree = resolve_fixture(tmp.path());
        let paths: Vec<&str> = tree.routes.iter().map(|r| r.path.as_str()).collect();
        assert_eq!(paths, vec!["/", "/zz", "/blog/post"]);
    }

    #[test]
    fn at_most_one_dynamic_file_survives_per_level() {
        let tmp = TempDir::new().unwrap();
        write_page(tmp.path(), "[a].js");
        write_page(tmp.path(), "[b].js");
        write_page(tmp.path(), "about.js");

        let tree = resolve_fixture(tmp.path());
        let dynamic: Vec<&str> = tree
            .routes
            .iter()
            .filter(|r| r.path.contains(':'))
            .map(|r| r.path.as_str())
            .collect();
        assert_eq!(dynamic.len(), 1);
        assert_eq!(tree.routes.len(), 2);
    }

    #[test]
    fn at_most_one_dynamic_folder_survives_per_level() {
        let tmp = TempDir::new().unwrap();
        for name in ["[a]", "[b]"] {
            let dir = tmp.path().join(name);
            fs::create_dir(&dir).unwrap();
            write_page(&dir, "leaf.js");
        }

        let tree = resolve_fixture(tmp.path());
        // Each surviving folder flattens one leaf route.
        assert_eq!(tree.routes.len(), 1);
        assert!(tree.routes[0].path.ends_with("/leaf"));
    }

    #[test]
    fn dynamic_file_and_dynamic_folder_both_survive() {
        // Independent counters: one dynamic file plus one dynamic folder
        // are not ambiguous with each other.
        let tmp = TempDir::new().unwrap();
        write_page(tmp.path(), "about.js");
        write_page(tmp.path(), "[id].js");
        let cat = tmp.path().join("[cat]");
        fs::create_dir(&cat).unwrap();
        write_page(&cat, "detail.js");

        let tree = resolve_fixture(tmp.path());
        let paths: Vec<&str> = tree.routes.iter().map(|r| r.path.as_str()).collect();
        // Static first, then the dynamic folder's subtree, then the
        // dynamic file — the catch-all must come last.
        assert_eq!(paths, vec!["/about", "/:cat/detail", "/:id"]);
    }

    #[test]
    fn matching_folder_nests_under_owning_file() {
        let tmp = TempDir::new().unwrap();
        write_page(tmp.path(), "shop.js");
        let shop = tmp.path().join("shop");
        fs::create_dir(&shop).unwrap();
        write_page(&shop, "cart.js");

        let tree = resolve_fixture(tmp.path());
        assert_eq!(tree.routes.len(), 1);
        let owner = &tree.routes[0];
        assert_eq!(owner.path, "/shop");
        assert!(!owner.exact);
        let sub = owner.routes.as_ref().unwrap();
        assert_eq!(sub.len(), 1);
        assert_eq!(sub[0].path, "/shop/cart");
    }

    #[test]
    fn dynamic_file_with_matching_folder_nests_its_index() {
        let tmp = TempDir::new().unwrap();
        write_page(tmp.path(), "[id].js");
        let dir = tmp.path().join("[id]");
        fs::create_dir(&dir).unwrap();
        write_page(&dir, "edit.js");

        let tree = resolve_fixture(tmp.path());
        assert_eq!(tree.routes.len(), 1);
        let owner = &tree.routes[0];
        assert_eq!(owner.path, "/:id");
        assert!(!owner.exact);
        let sub = owner.routes.as_ref().unwrap();
        assert_eq!(sub[0].path, "/:id/edit");
    }

    #[test]
    fn nested_index_folder_drops_all_siblings() {
        // pages/[cat]/index.js + pages/[cat]/index/ + pages/[cat]/other.js:
        // the nested index route matches everything first, so 'other' is
        // dead and must be dropped.
        let tmp = TempDir::new().unwrap();
        let cat = tmp.path().join("[cat]");
        fs::create_dir(&cat).unwrap();
        write_page(&cat, "index.js");
        write_page(&cat, "other.js");
        let index_dir = cat.join("index");
        fs::create_dir(&index_dir).unwrap();
        write_page(&index_dir, "a.js");

        let tree = resolve_fixture(tmp.path());
        assert_eq!(tree.routes.len(), 1);
        let owner = &tree.routes[0];
        assert_eq!(owner.path, "/:cat");
        assert!(!owner.exact);
        let sub = owner.routes.as_ref().unwrap();
        assert_eq!(sub.len(), 1);
        assert_eq!(sub[0].path, "/:cat/a");
    }

    #[test]
    fn index_under_dynamic_dir_skipped_when_parent_has_dynamic_file() {
        // test/[id].js resolves to /test/:id; test/[param]/index.js would
        // resolve to /test/:param — the same URL space. The index file is
        // dropped.
        let tmp = TempDir::new().unwrap();
        let test = tmp.path().join("test");
        fs::create_dir(&test).unwrap();
        write_page(&test, "[id].js");
        let param = test.join("[param]");
        fs::create_dir(&param).unwrap();
        write_page(&param, "index.js");
        write_page(&param, "leaf.js");

        let tree = resolve_fixture(tmp.path());
        let paths: Vec<&str> = tree.routes.iter().map(|r| r.path.as_str()).collect();
        assert!(paths.contains(&"/test/:param/leaf"));
        assert!(!paths.contains(&"/test/:param"));
        assert!(paths.contains(&"/test/:id"));
    }

    #[test]
    fn empty_folders_are_dropped() {
        let tmp = TempDir::new().unwrap();
        write_page(tmp.path(), "about.js");
        fs::create_dir(tmp.path().join("empty")).unwrap();

        let tree = resolve_fixture(tmp.path());
        assert_eq!(tree.routes.len(), 1);
    }

    #[test]
    fn empty_nested_folder_demotes_file_to_leaf() {
        let tmp = TempDir::new().unwrap();
        write_page(tmp.path(), "shop.js");
        fs::create_dir(tmp.path().join("shop")).unwrap();

        let tree = resolve_fixture(tmp.path());
        assert_eq!(tree.routes.len(), 1);
        assert!(tree.routes[0].exact);
        assert!(tree.routes[0].routes.is_none());
    }

    #[test]
    fn malformed_bracket_names_are_skipped_not_fatal() {
        let tmp = TempDir::new().unwrap();
        write_page(tmp.path(), "[a][b].js");
        write_page(tmp.path(), "a[b].js");
        write_page(tmp.path(), "[ok].js");
        write_page(tmp.path(), "plain.js");

        let tree = resolve_fixture(tmp.path());
        let paths: Vec<&str> = tree.routes.iter().map(|r| r.path.as_str()).collect();
        assert_eq!(paths, vec!["/plain", "/:ok"]);
    }

    #[test]
    fn reserved_star_name_is_skipped() {
        let tmp = TempDir::new().unwrap();
        write_page(tmp.path(), "*.js");
        write_page(tmp.path(), "about.js");

        let tree = resolve_fixture(tmp.path());
        assert_eq!(tree.routes.len(), 1);
        assert_eq!(tree.routes[0].path, "/about");
    }

    #[test]
    fn bracketed_wildcard_becomes_wildcard_route() {
        let tmp = TempDir::new().unwrap();
        write_page(tmp.path(), "[*].js");
        write_page(tmp.path(), "index.js");

        let tree = resolve_fixture(tmp.path());
        let paths: Vec<&str> = tree.routes.iter().map(|r| r.path.as_str()).collect();
        assert_eq!(paths, vec!["/", "/*"]);
    }

    #[test]
    fn resolution_is_idempotent() {
        let tmp = TempDir::new().unwrap();
        write_page(tmp.path(), "index.js");
        write_page(tmp.path(), "[id].js");
        let blog = tmp.path().join("blog");
        fs::create_dir(&blog).unwrap();
        write_page(&blog, "post.js");
        write_page(&blog, "index.js");

        let first = resolve_fixture(tmp.path());
        let second = resolve_fixture(tmp.path());
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn root_must_be_a_directory() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("not-a-dir.js");
        fs::write(&file, "x").unwrap();

        let exts = vec!["js".to_string()];
        let keywords: Vec<String> = Vec::new();
        let mut cache = InspectCache::new();
        let mut resolver = Resolver::new(&file, tmp.path(), &exts, &keywords, &mut cache);
        assert!(matches!(
            resolver.resolve(),
            Err(ResolveError::NotADirectory(_))
        ));
    }

    #[test]
    fn component_paths_are_output_relative() {
        let tmp = TempDir::new().unwrap();
        let pages = tmp.path().join("pages");
        let out = tmp.path().join("src").join("generated");
        fs::create_dir_all(&pages).unwrap();
        fs::create_dir_all(&out).unwrap();
        write_page(&pages, "about.js");

        let exts = vec!["js".to_string()];
        let keywords: Vec<String> = Vec::new();
        let mut cache = InspectCache::new();
        let mut resolver = Resolver::new(&pages, &out, &exts, &keywords, &mut cache);
        let tree = resolver.resolve().unwrap();
        assert_eq!(tree.routes[0].component_path, "../../pages/about.js");
    }

    #[test]
    fn exports_attach_to_leaf_routes() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("admin.js"),
            "export function secured() {}\nexport default {};\n",
        )
        .unwrap();

        let exts = vec!["js".to_string()];
        let keywords = vec!["secured".to_string()];
        let mut cache = InspectCache::new();
        let mut resolver = Resolver::new(tmp.path(), tmp.path(), &exts, &keywords, &mut cache);
        let tree = resolver.resolve().unwrap();
        assert_eq!(
            tree.routes[0].exports.get("secured"),
            Some(&crate::types::ExportValue::Bool(true))
        );
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn relative_between_computes_parent_hops() {
        let from = PathBuf::from("/work/src/generated");
        let to = PathBuf::from("/work/pages");
        assert_eq!(relative_between(&from, &to), PathBuf::from("../../pages"));
    }

    #[test]
    fn relative_between_identical_paths_is_empty() {
        let p = PathBuf::from("/work/pages");
        assert_eq!(relative_between(&p, &p), PathBuf::new());
    }
}
