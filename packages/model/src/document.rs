use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::node::{ComponentNode, Descendants};

/// Root envelope of a page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub title: String,

    /// Root-level nodes, in page order
    #[serde(default)]
    pub components: Vec<ComponentNode>,

    #[serde(default)]
    pub theme: Theme,

    #[serde(default)]
    pub styles: Styles,
}

impl Default for Document {
    /// Envelope every new editing session starts from
    fn default() -> Self {
        Self {
            title: "My Blog Page".to_string(),
            components: Vec::new(),
            theme: Theme::Light,
            styles: Styles::default_palette(),
        }
    }
}

impl Document {
    /// Envelope with no title, tokens or components
    pub fn blank() -> Self {
        Self {
            title: String::new(),
            components: Vec::new(),
            theme: Theme::Light,
            styles: Styles::default(),
        }
    }

    pub fn with_components(mut self, components: Vec<ComponentNode>) -> Self {
        self.components = components;
        self
    }

    /// Every node of the tree, parent before children
    pub fn nodes(&self) -> Descendants<'_> {
        Descendants::new(&self.components)
    }

    pub fn node_count(&self) -> usize {
        self.nodes().count()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}

/// Page theme. Unrecognised names are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Theme {
    #[default]
    Light,
    Dark,
    Other(String),
}

impl Theme {
    pub fn as_str(&self) -> &str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
            Theme::Other(name) => name,
        }
    }
}

impl From<String> for Theme {
    fn from(value: String) -> Self {
        match value.as_str() {
            "light" => Theme::Light,
            "dark" => Theme::Dark,
            _ => Theme::Other(value),
        }
    }
}

impl From<Theme> for String {
    fn from(theme: Theme) -> Self {
        theme.as_str().to_string()
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Named style tokens of the page
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Styles {
    /// Color tokens, e.g. `primary -> #3b82f6`
    #[serde(default)]
    pub colors: BTreeMap<String, String>,
}

impl Styles {
    pub fn default_palette() -> Self {
        let colors = [
            ("primary", "#3b82f6"),
            ("secondary", "#6b7280"),
            ("background", "#ffffff"),
            ("text", "#000000"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        Self { colors }
    }
}
