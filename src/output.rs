//! CLI output formatting.
//!
//! The `scan` and `check` commands print the resolved tree as a readable
//! inventory: one line per route showing the URL and the component it maps
//! to, nested entries indented under their owner, inspector metadata as
//! secondary context lines.
//!
//! ```text
//! Routes
//! / → ../pages/index.js
//! /about → ../pages/about.js
//! /shop → ../pages/shop.js
//!     /shop/cart → ../pages/shop/cart.js
//! /:id → ../pages/[id].js
//!     Exports: secured=true
//!
//! 5 routes (4 exact)
//! ```
//!
//! Each report has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure — no I/O, no side effects.

use crate::cache::CacheStats;
use crate::types::{ExportValue, RouteEntry, RouteTree};
use std::path::Path;

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// One route line: URL, arrow, component source.
fn route_line(entry: &RouteEntry, depth: usize) -> String {
    format!("{}{} → {}", indent(depth), entry.path, entry.component_path)
}

/// Inspector metadata as a secondary context line, or `None` when the
/// entry carries no exports.
fn exports_line(entry: &RouteEntry, depth: usize) -> Option<String> {
    if entry.exports.is_empty() {
        return None;
    }
    let pairs: Vec<String> = entry
        .exports
        .iter()
        .map(|(k, v)| format!("{k}={}", export_value(v)))
        .collect();
    Some(format!("{}Exports: {}", indent(depth + 1), pairs.join(", ")))
}

fn export_value(value: &ExportValue) -> String {
    match value {
        ExportValue::Bool(b) => b.to_string(),
        ExportValue::Int(n) => n.to_string(),
        ExportValue::Float(n) => n.to_string(),
        ExportValue::String(s) => format!("'{s}'"),
        ExportValue::Array(items) => {
            let inner: Vec<String> = items.iter().map(export_value).collect();
            format!("[{}]", inner.join(", "))
        }
    }
}

fn walk(entries: &[RouteEntry], depth: usize, lines: &mut Vec<String>) {
    for entry in entries {
        lines.push(route_line(entry, depth));
        if let Some(line) = exports_line(entry, depth) {
            lines.push(line);
        }
        if let Some(sub) = &entry.routes {
            walk(sub, depth + 1, lines);
        }
    }
}

/// Count all routes in the tree, nested included, and how many are exact.
pub fn count_routes(tree: &RouteTree) -> (usize, usize) {
    fn count(entries: &[RouteEntry], total: &mut usize, exact: &mut usize) {
        for entry in entries {
            *total += 1;
            if entry.exact {
                *exact += 1;
            }
            if let Some(sub) = &entry.routes {
                count(sub, total, exact);
            }
        }
    }
    let (mut total, mut exact) = (0, 0);
    count(&tree.routes, &mut total, &mut exact);
    (total, exact)
}

/// Format the full route inventory: header, tree, blank line, summary.
pub fn format_route_tree(tree: &RouteTree) -> Vec<String> {
    let mut lines = vec!["Routes".to_string()];
    walk(&tree.routes, 0, &mut lines);
    let (total, exact) = count_routes(tree);
    lines.push(String::new());
    lines.push(format!("{} routes ({} exact)", total, exact));
    lines
}

/// One-line summary for a completed build pass.
pub fn format_build_summary(output_path: &Path, tree: &RouteTree) -> String {
    let (total, _) = count_routes(tree);
    format!("Generated {} ({} routes)", output_path.display(), total)
}

/// Inspector cache summary, shown in watch mode after each pass.
pub fn format_cache_summary(stats: &CacheStats) -> String {
    format!("Inspector: {stats}")
}

pub fn print_route_tree(tree: &RouteTree) {
    for line in format_route_tree(tree) {
        println!("{line}");
    }
}

pub fn print_build_summary(output_path: &Path, tree: &RouteTree) {
    println!("{}", format_build_summary(output_path, tree));
}

pub fn print_cache_summary(stats: &CacheStats) {
    println!("{}", format_cache_summary(stats));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ExportMap;

    fn leaf(path: &str, component: &str) -> RouteEntry {
        RouteEntry {
            exports: ExportMap::new(),
            component_path: component.to_string(),
            path: path.to_string(),
            routes: None,
            exact: true,
        }
    }

    fn sample_tree() -> RouteTree {
        let mut exports = ExportMap::new();
        exports.insert("secured".to_string(), ExportValue::Bool(true));
        RouteTree {
            routes: vec![
                leaf("/", "../pages/index.js"),
                RouteEntry {
                    exports: ExportMap::new(),
                    component_path: "../pages/shop.js".to_string(),
                    path: "/shop".to_string(),
                    routes: Some(vec![leaf("/shop/cart", "../pages/shop/cart.js")]),
                    exact: false,
                },
                RouteEntry {
                    exports,
                    component_path: "../pages/admin.js".to_string(),
                    path: "/admin".to_string(),
                    routes: None,
                    exact: true,
                },
            ],
        }
    }

    #[test]
    fn tree_listing_nests_sub_routes() {
        let lines = format_route_tree(&sample_tree());
        assert_eq!(lines[0], "Routes");
        assert_eq!(lines[1], "/ → ../pages/index.js");
        assert_eq!(lines[2], "/shop → ../pages/shop.js");
        assert_eq!(lines[3], "    /shop/cart → ../pages/shop/cart.js");
    }

    #[test]
    fn exports_show_as_context_line() {
        let lines = format_route_tree(&sample_tree());
        assert!(lines.contains(&"    Exports: secured=true".to_string()));
    }

    #[test]
    fn summary_counts_nested_routes() {
        let (total, exact) = count_routes(&sample_tree());
        assert_eq!(total, 4);
        assert_eq!(exact, 3);
        let lines = format_route_tree(&sample_tree());
        assert_eq!(lines.last().unwrap(), "4 routes (3 exact)");
    }

    #[test]
    fn build_summary_names_output_and_count() {
        let summary = format_build_summary(Path::new("src/routes.js"), &sample_tree());
        assert_eq!(summary, "Generated src/routes.js (4 routes)");
    }

    #[test]
    fn export_values_render_as_js_literals() {
        assert_eq!(export_value(&ExportValue::Int(3)), "3");
        assert_eq!(export_value(&ExportValue::String("a".into())), "'a'");
        assert_eq!(
            export_value(&ExportValue::Array(vec![
                ExportValue::Bool(true),
                ExportValue::String("x".into()),
            ])),
            "[true, 'x']"
        );
    }
}
