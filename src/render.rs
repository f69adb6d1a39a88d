//! Route file rendering: route tree in, JS module text out.
//!
//! The tree is first pretty-printed as JSON, then rewritten line by line
//! into a JS object literal:
//!
//! - object keys lose their quotes and string values switch to single
//!   quotes (the first two `"` on a line are dropped, the rest become `'`);
//! - every `componentPath` line is replaced by the component template,
//!   expanded with that path and re-indented to match;
//! - the object is wrapped as `const routes = { ... }` with a default
//!   export, preceded by the imports template.
//!
//! Templates are two plain text files, `imports` and `component`. The
//! embedded defaults can be overridden with a template directory; a
//! missing or empty template file there is fatal — rendering with half a
//! template set would produce a broken module.

use crate::types::RouteTree;
use std::fs;
use std::io;
use std::path::Path;
use thiserror::Error;

/// Placeholder expanded in each component template line.
const COMPONENT_PATH_VAR: &str = "{{componentPath}}";

const DEFAULT_IMPORTS: &str = include_str!("../templates/imports");
const DEFAULT_COMPONENT: &str = include_str!("../templates/component");

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("could not read template '{name}': {source}")]
    MissingTemplate {
        name: &'static str,
        #[source]
        source: io::Error,
    },
    #[error("template '{0}' is empty")]
    EmptyTemplate(&'static str),
    #[error("could not serialize route tree: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// The pair of templates a render pass needs.
#[derive(Debug, Clone)]
pub struct Templates {
    imports: Vec<String>,
    component: Vec<String>,
}

impl Templates {
    /// The defaults compiled into the binary.
    pub fn embedded() -> Self {
        Self {
            imports: lines_of(DEFAULT_IMPORTS),
            component: lines_of(DEFAULT_COMPONENT),
        }
    }

    /// Load both templates from a directory. Either file missing or empty
    /// is an error — overrides are all-or-nothing.
    pub fn from_dir(dir: &Path) -> Result<Self, RenderError> {
        Ok(Self {
            imports: read_template(dir, "imports")?,
            component: read_template(dir, "component")?,
        })
    }

    /// Directory override if given, embedded defaults otherwise.
    pub fn load(dir: Option<&Path>) -> Result<Self, RenderError> {
        match dir {
            Some(dir) => Self::from_dir(dir),
            None => Ok(Self::embedded()),
        }
    }
}

fn read_template(dir: &Path, name: &'static str) -> Result<Vec<String>, RenderError> {
    let text = fs::read_to_string(dir.join(name))
        .map_err(|source| RenderError::MissingTemplate { name, source })?;
    let lines = lines_of(&text);
    if lines.is_empty() {
        return Err(RenderError::EmptyTemplate(name));
    }
    Ok(lines)
}

fn lines_of(text: &str) -> Vec<String> {
    text.lines()
        .map(|l| l.to_string())
        .filter(|l| !l.trim().is_empty())
        .collect()
}

/// Render the route tree as the text of the generated routes module.
pub fn render(tree: &RouteTree, templates: &Templates) -> Result<String, RenderError> {
    let json = serde_json::to_string_pretty(tree)?;

    let mut body: Vec<String> = Vec::new();
    for line in json.lines() {
        let trimmed = line.trim_start();
        let indent = &line[..line.len() - trimmed.len()];

        if !trimmed.starts_with("\"componentPath\"") {
            body.push(js_line(line));
            continue;
        }

        let value = trimmed
            .trim_start_matches("\"componentPath\": \"")
            .trim_end_matches(',')
            .trim_end_matches('"');
        // Paths that don't already climb out of the output directory need
        // an explicit ./ to resolve as a relative import.
        let component_path = if value.starts_with("../") {
            value.to_string()
        } else {
            format!("./{value}")
        };

        for template_line in &templates.component {
            let expanded = template_line.replace(COMPONENT_PATH_VAR, &component_path);
            body.push(format!("{indent}{expanded}"));
        }
    }

    // The pretty-printed tree opens with a bare '{'.
    if let Some(first) = body.first_mut() {
        *first = "const routes = {".to_string();
    }

    let mut out: Vec<String> = templates.imports.clone();
    out.push(String::new());
    out.extend(body);
    out.push(String::new());
    out.push("export default routes;".to_string());

    let mut text = out.join("\n");
    text.push('\n');
    Ok(text)
}

/// Rewrite one JSON line as JS: the first two `"` (around the key) are
/// dropped, any further `"` become `'`.
fn js_line(line: &str) -> String {
    let mut count = 0;
    let mut out = String::with_capacity(line.len());
    for c in line.chars() {
        if c == '"' {
            count += 1;
            if count <= 2 {
                continue;
            }
            out.push('\'');
            continue;
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ExportMap, ExportValue, RouteEntry};
    use std::fs;
    use tempfile::TempDir;

    fn leaf(path: &str, component: &str) -> RouteEntry {
        RouteEntry {
            exports: ExportMap::new(),
            component_path: component.to_string(),
            path: path.to_string(),
            routes: None,
            exact: true,
        }
    }

    fn tree(routes: Vec<RouteEntry>) -> RouteTree {
        RouteTree { routes }
    }

    #[test]
    fn js_line_unquotes_keys_and_requotes_values() {
        assert_eq!(js_line("    \"path\": \"/about\","), "    path: '/about',");
        assert_eq!(js_line("  \"routes\": ["), "  routes: [");
        assert_eq!(js_line("  },"), "  },");
    }

    #[test]
    fn renders_wrapper_and_default_export() {
        let text = render(&tree(vec![leaf("/", "../pages/index.js")]), &Templates::embedded())
            .unwrap();
        assert!(text.starts_with("// Generated by routegen"));
        assert!(text.contains("const routes = {"));
        assert!(text.trim_end().ends_with("export default routes;"));
    }

    #[test]
    fn component_path_lines_become_template_lines() {
        let text = render(&tree(vec![leaf("/about", "../pages/about.js")]), &Templates::embedded())
            .unwrap();
        assert!(!text.contains("componentPath"));
        assert!(text.contains("component: lazy(() => import('../pages/about.js')),"));
    }

    #[test]
    fn same_dir_component_paths_get_dot_slash() {
        let text = render(&tree(vec![leaf("/about", "pages/about.js")]), &Templates::embedded())
            .unwrap();
        assert!(text.contains("import('./pages/about.js')"));
    }

    #[test]
    fn template_indent_matches_replaced_line() {
        let mut sub = leaf("/shop/cart", "../pages/shop/cart.js");
        sub.exact = true;
        let owner = RouteEntry {
            exports: ExportMap::new(),
            component_path: "../pages/shop.js".to_string(),
            path: "/shop".to_string(),
            routes: Some(vec![sub]),
            exact: false,
        };
        let text = render(&tree(vec![owner]), &Templates::embedded()).unwrap();
        // Nested entries sit deeper than their owner.
        let owner_line = text
            .lines()
            .find(|l| l.contains("import('../pages/shop.js')"))
            .unwrap();
        let sub_line = text
            .lines()
            .find(|l| l.contains("import('../pages/shop/cart.js')"))
            .unwrap();
        let indent = |l: &str| l.len() - l.trim_start().len();
        assert!(indent(sub_line) > indent(owner_line));
    }

    #[test]
    fn export_metadata_survives_as_js_literals() {
        let mut exports = ExportMap::new();
        exports.insert("secured".to_string(), ExportValue::Bool(true));
        exports.insert("layout".to_string(), ExportValue::String("wide".into()));
        let entry = RouteEntry {
            exports,
            component_path: "../pages/admin.js".to_string(),
            path: "/admin".to_string(),
            routes: None,
            exact: true,
        };
        let text = render(&tree(vec![entry]), &Templates::embedded()).unwrap();
        assert!(text.contains("secured: true,"));
        assert!(text.contains("layout: 'wide',"));
    }

    #[test]
    fn template_dir_override_is_used() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("imports"), "import Vue from 'vue';\n").unwrap();
        fs::write(tmp.path().join("component"), "page: '{{componentPath}}',\n").unwrap();

        let templates = Templates::load(Some(tmp.path())).unwrap();
        let text = render(&tree(vec![leaf("/a", "../pages/a.js")]), &templates).unwrap();
        assert!(text.contains("import Vue from 'vue';"));
        assert!(text.contains("page: '../pages/a.js',"));
    }

    #[test]
    fn missing_template_file_is_fatal() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("imports"), "import x;\n").unwrap();

        match Templates::from_dir(tmp.path()) {
            Err(RenderError::MissingTemplate { name, .. }) => assert_eq!(name, "component"),
            other => panic!("expected MissingTemplate, got {other:?}"),
        }
    }

    #[test]
    fn empty_template_file_is_fatal() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("imports"), "\n  \n").unwrap();
        fs::write(tmp.path().join("component"), "x\n").unwrap();

        assert!(matches!(
            Templates::from_dir(tmp.path()),
            Err(RenderError::EmptyTemplate("imports"))
        ));
    }
}
