use anyhow::Context;
use pagecraft_model::Serializer;
use pagecraft_schema::Registry;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

pub const DEFAULT_CONFIG_NAME: &str = "pagecraft.config.json";

/// Pagecraft configuration file format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// JSON files with extra type definitions, relative to the config
    #[serde(default)]
    pub schema_paths: Vec<String>,

    /// Write every schema default into newly added components
    #[serde(default)]
    pub seed_default_props: bool,

    /// Spaces per indent level when writing pages
    #[serde(default = "default_indent")]
    pub indent: usize,

    /// Page file used when no --page is given
    #[serde(default = "default_page")]
    pub default_page: String,
}

fn default_indent() -> usize {
    2
}

fn default_page() -> String {
    "page.json".to_string()
}

impl Config {
    /// Load config from a directory
    pub fn load(cwd: &str) -> anyhow::Result<Self> {
        let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Invalid {}", config_path.display()))?;
            debug!(path = %config_path.display(), "Loaded config");
            Ok(config)
        } else {
            // Return default config if none exists
            Ok(Config::default())
        }
    }

    /// Built-in types plus every configured schema file
    pub fn registry(&self, cwd: &str) -> anyhow::Result<Registry> {
        let mut registry = Registry::builtin();

        for schema_path in &self.schema_paths {
            let path = PathBuf::from(cwd).join(schema_path);
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("Cannot read schema file {}", path.display()))?;
            registry
                .extend_from_json(&content)
                .with_context(|| format!("Invalid schema file {}", path.display()))?;
            debug!(path = %path.display(), types = registry.len(), "Loaded schema file");
        }

        Ok(registry)
    }

    /// Page to operate on: the explicit one, else `defaultPage`
    pub fn page_path(&self, cwd: &str, explicit: Option<&Path>) -> PathBuf {
        match explicit {
            Some(path) => PathBuf::from(cwd).join(path),
            None => PathBuf::from(cwd).join(&self.default_page),
        }
    }

    pub fn serializer(&self) -> Serializer {
        Serializer::with_indent(&" ".repeat(self.indent))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            schema_paths: vec![],
            seed_default_props: false,
            indent: default_indent(),
            default_page: default_page(),
        }
    }
}
