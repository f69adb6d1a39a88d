//! Shared types serialized between pipeline stages.
//!
//! The resolver produces a [`RouteTree`]; the renderer consumes its JSON
//! form. These types are the compatibility surface of the whole tool — the
//! field names below are the keys consumers of the generated file see.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A value attached to a route entry by the source inspector.
///
/// Function exports are reported as `true`; variable exports carry their
/// literal value (boolean, number, string, or array of literals).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExportValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Array(Vec<ExportValue>),
}

/// Inspector result for one file: requested identifiers that the file
/// actually exports, mapped to their values.
pub type ExportMap = BTreeMap<String, ExportValue>;

/// One resolved route.
///
/// Invariant: `exact` is `true` iff `routes` is `None` — a route with
/// sub-routes cannot match exactly or the children would be unreachable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteEntry {
    /// Exported-identifier metadata, spread ahead of the fixed fields.
    #[serde(flatten)]
    pub exports: ExportMap,
    /// Path from the output directory to the page source file.
    #[serde(rename = "componentPath")]
    pub component_path: String,
    /// URL path for this route (`/`, `/about`, `/shop/:id`, ...).
    pub path: String,
    /// Sub-routes owned by this entry (nested folder contents).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub routes: Option<Vec<RouteEntry>>,
    pub exact: bool,
}

/// Top-level output of the resolver: the ordered route list under a
/// `routes` key, matching the shape of the generated file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteTree {
    pub routes: Vec<RouteEntry>,
}
