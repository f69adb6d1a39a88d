//! # Routegen
//!
//! A file-based route generator for JS single-page apps. The pages
//! directory is the router config: files become routes, `[bracket]` names
//! become URL parameters, and a folder named after a file nests its
//! contents as sub-routes of that file.
//!
//! # Architecture: Resolve → Render → Write
//!
//! One pass runs three stages over the pages directory:
//!
//! ```text
//! 1. Resolve   pages/      →  RouteTree     (filesystem → ordered routes)
//! 2. Render    RouteTree   →  JS text       (tree → routes module source)
//! 3. Write     JS text     →  src/routes.js
//! ```
//!
//! Resolution does all the thinking: per directory it lists entries,
//! classifies names, drops conflicting or unreachable routes, scores the
//! survivors for precedence, and recurses. Rendering is mechanical — the
//! tree is serialized and rewritten line by line into a JS module. Watch
//! mode repeats the whole pass on every filesystem change, reusing the
//! inspector cache across passes.
//!
//! Skips are never fatal: a malformed file name or a shadowed route is
//! logged and excluded, and the rest of the tree still resolves. Only a
//! bad input root or a broken template set aborts a run.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`scan`] | Directory listing and the page-file convention filter |
//! | [`naming`] | Bracket-segment parsing and URL path synthesis |
//! | [`resolve`] | Conflict resolution, precedence scoring, route tree building |
//! | [`inspect`] | Static scan of page sources for requested named exports |
//! | [`cache`] | Inspector result cache, keyed by absolute path |
//! | [`render`] | Route tree → JS module text, via the template pair |
//! | [`watch`] | Recursive filesystem watcher with startup-event draining |
//! | [`engine`] | Pipeline orchestration: one-shot runs and the watch loop |
//! | [`config`] | `routegen.toml` loading, option normalization and validation |
//! | [`output`] | CLI output formatting — route inventory and summaries |
//! | [`types`] | Shared types: `RouteTree`, `RouteEntry`, export values |
//!
//! # Design Decisions
//!
//! ## Derived Precedence, Not Configured
//!
//! Route order is computed from what each entry *is* (index, static,
//! folder subtree, dynamic), never from user annotations. Two projects
//! with the same pages layout always get the same route order, and the
//! order is stable across runs because scoring sorts stably over the
//! filesystem listing.
//!
//! ## Line Rewriting Over a JS AST
//!
//! The generated module is produced by pretty-printing the tree as JSON
//! and rewriting it line by line (unquote keys, requote strings, expand
//! `componentPath` lines through the component template). The output
//! format is fixed and shallow, so a JS emitter would add a dependency
//! without changing a byte of output — and the intermediate JSON is
//! inspectable when debugging.
//!
//! ## Pattern-Matching Inspector, Not a Parser
//!
//! The export inspector matches `export function` / `export const`
//! declarations at line starts with regexes. Pages that declare route
//! metadata do so with flat literals in practice; anything fancier falls
//! back to `true` (the export exists). A real JS parser would be strictly
//! heavier for the same result, and inspection failures must never block
//! routing anyway.

pub mod cache;
pub mod config;
pub mod engine;
pub mod inspect;
pub mod naming;
pub mod output;
pub mod render;
pub mod resolve;
pub mod scan;
pub mod types;
pub mod watch;

#[cfg(test)]
pub(crate) mod test_helpers;
