//! Run configuration.
//!
//! Options come from three layers, each overriding the previous:
//! built-in defaults, an optional `routegen.toml` next to the working
//! directory, and command-line flags.
//!
//! ```toml
//! # All keys are optional - defaults shown below
//!
//! input_dir = "pages"          # Directory scanned for page components
//! output_dir = "src"           # Directory the routes file is written to
//! output_filename = "routes.js"
//! # template_dir = "templates" # Override the built-in templates
//! extensions = ["js"]          # File extensions treated as pages
//! keywords = []                # Named exports copied onto route entries
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the optional config file, looked up in the working directory.
pub const CONFIG_FILE: &str = "routegen.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Fully resolved options for one run.
#[derive(Debug, Clone)]
pub struct Options {
    /// Directory scanned for page components.
    pub input_dir: PathBuf,
    /// Directory the generated routes file is written to.
    pub output_dir: PathBuf,
    /// Name of the generated file inside `output_dir`.
    pub output_filename: String,
    /// Directory holding `imports` and `component` template overrides.
    pub template_dir: Option<PathBuf>,
    /// Extensions a file must carry to count as a page.
    pub allowed_extensions: Vec<String>,
    /// Named exports the inspector copies onto route entries.
    pub keywords: Vec<String>,
    /// Keep running and regenerate on filesystem changes.
    pub watch: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("pages"),
            output_dir: PathBuf::from("src"),
            output_filename: "routes.js".to_string(),
            template_dir: None,
            allowed_extensions: vec!["js".to_string()],
            keywords: Vec::new(),
            watch: false,
        }
    }
}

impl Options {
    /// Overlay values from a config file. Absent keys keep their current
    /// value.
    pub fn merge_file(&mut self, file: FileConfig) {
        if let Some(v) = file.input_dir {
            self.input_dir = PathBuf::from(v);
        }
        if let Some(v) = file.output_dir {
            self.output_dir = PathBuf::from(v);
        }
        if let Some(v) = file.output_filename {
            self.output_filename = v;
        }
        if let Some(v) = file.template_dir {
            self.template_dir = Some(PathBuf::from(v));
        }
        if let Some(v) = file.extensions {
            self.allowed_extensions = v;
        }
        if let Some(v) = file.keywords {
            self.keywords = v;
        }
    }

    /// Clean up list options: trim whitespace and leading dots, drop
    /// empties, and fall back to the `js` default when nothing is left.
    pub fn normalize(&mut self) {
        self.allowed_extensions = normalize_extensions(std::mem::take(&mut self.allowed_extensions));
        self.keywords.retain(|k| !k.trim().is_empty());
        for k in &mut self.keywords {
            *k = k.trim().to_string();
        }
    }

    /// Validate option values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.input_dir.as_os_str().is_empty() {
            return Err(ConfigError::Validation("input_dir must not be empty".into()));
        }
        if self.output_filename.trim().is_empty() {
            return Err(ConfigError::Validation(
                "output_filename must not be empty".into(),
            ));
        }
        if self.output_filename.contains('/') || self.output_filename.contains('\\') {
            return Err(ConfigError::Validation(
                "output_filename must be a bare file name".into(),
            ));
        }
        Ok(())
    }

    /// Full path of the generated file.
    pub fn output_path(&self) -> PathBuf {
        self.output_dir.join(&self.output_filename)
    }
}

/// Extension list cleanup: `".js"`, `" js "` and `"js"` all mean `js`;
/// an empty result falls back to the default.
fn normalize_extensions(raw: Vec<String>) -> Vec<String> {
    let cleaned: Vec<String> = raw
        .into_iter()
        .map(|e| e.trim().trim_start_matches('.').to_string())
        .filter(|e| !e.is_empty())
        .collect();
    if cleaned.is_empty() {
        vec!["js".to_string()]
    } else {
        cleaned
    }
}

/// Sparse config file contents. Every key is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub input_dir: Option<String>,
    pub output_dir: Option<String>,
    pub output_filename: Option<String>,
    pub template_dir: Option<String>,
    pub extensions: Option<Vec<String>>,
    pub keywords: Option<Vec<String>>,
}

/// Load `routegen.toml` from a directory.
///
/// Returns `Ok(None)` if no config file exists. Returns `Err` if the file
/// exists but does not parse.
pub fn load_file_config(dir: &Path) -> Result<Option<FileConfig>, ConfigError> {
    let path = dir.join(CONFIG_FILE);
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&path)?;
    let config: FileConfig = toml::from_str(&content)?;
    Ok(Some(config))
}
