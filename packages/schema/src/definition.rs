use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::SchemaError;

/// Input kind of a property, drives which editor the settings panel shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropKind {
    Text,
    Color,
    Select,
    Number,
}

/// Schema of a single visual property
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropSchema {
    #[serde(rename = "type")]
    pub kind: PropKind,

    pub label: String,

    /// Value shown when neither the node nor its parent sets one
    #[serde(default)]
    pub default: String,

    /// Allowed values, only for `select`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,

    /// Whether an unset value may be inherited from the parent
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub cascade: bool,
}

impl PropSchema {
    pub fn text(label: impl Into<String>, default: impl Into<String>) -> Self {
        Self::new(PropKind::Text, label, default)
    }

    pub fn color(label: impl Into<String>, default: impl Into<String>) -> Self {
        Self::new(PropKind::Color, label, default)
    }

    pub fn number(label: impl Into<String>, default: impl Into<String>) -> Self {
        Self::new(PropKind::Number, label, default)
    }

    pub fn select(label: impl Into<String>, options: &[&str], default: impl Into<String>) -> Self {
        Self {
            options: Some(options.iter().map(|o| o.to_string()).collect()),
            ..Self::new(PropKind::Select, label, default)
        }
    }

    fn new(kind: PropKind, label: impl Into<String>, default: impl Into<String>) -> Self {
        Self {
            kind,
            label: label.into(),
            default: default.into(),
            options: None,
            cascade: false,
        }
    }

    /// Mark the property as inheritable
    pub fn cascading(mut self) -> Self {
        self.cascade = true;
        self
    }

    /// Whether `value` is one of the declared options. Always true for non-select kinds.
    pub fn allows(&self, value: &str) -> bool {
        match (&self.kind, &self.options) {
            (PropKind::Select, Some(options)) => options.iter().any(|o| o == value),
            _ => true,
        }
    }
}

fn default_true() -> bool {
    true
}

/// Registry entry describing one component type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeDefinition {
    #[serde(rename = "type")]
    pub component_type: String,

    pub label: String,

    /// Grouping hint for the palette; structural checks use `accepts_children`
    #[serde(default)]
    pub is_container: bool,

    #[serde(default)]
    pub accepts_children: bool,

    #[serde(default = "default_true")]
    pub allow_root: bool,

    #[serde(default)]
    pub props_schema: BTreeMap<String, PropSchema>,
}

impl TypeDefinition {
    /// Structural container (groups children, accepts drops)
    pub fn container(component_type: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            component_type: component_type.into(),
            label: label.into(),
            is_container: true,
            accepts_children: true,
            allow_root: true,
            props_schema: BTreeMap::new(),
        }
    }

    /// Content element. Accepts children unless `leaf()` is called.
    pub fn element(component_type: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            is_container: false,
            ..Self::container(component_type, label)
        }
    }

    pub fn leaf(mut self) -> Self {
        self.accepts_children = false;
        self
    }

    pub fn root_disallowed(mut self) -> Self {
        self.allow_root = false;
        self
    }

    pub fn prop(mut self, key: impl Into<String>, schema: PropSchema) -> Self {
        self.props_schema.insert(key.into(), schema);
        self
    }

    pub fn accepts_children(&self) -> bool {
        self.accepts_children
    }

    pub fn allows_root(&self) -> bool {
        self.allow_root
    }

    pub fn get_prop(&self, key: &str) -> Option<&PropSchema> {
        self.props_schema.get(key)
    }

    pub fn cascades(&self, key: &str) -> bool {
        self.props_schema.get(key).map(|p| p.cascade).unwrap_or(false)
    }

    /// Keys whose unset values may be inherited from a parent
    pub fn cascading_keys(&self) -> impl Iterator<Item = &str> {
        self.props_schema
            .iter()
            .filter(|(_, schema)| schema.cascade)
            .map(|(key, _)| key.as_str())
    }

    /// Every schema key mapped to its default value
    pub fn default_props(&self) -> BTreeMap<String, String> {
        self.props_schema
            .iter()
            .map(|(key, schema)| (key.clone(), schema.default.clone()))
            .collect()
    }

    /// Check the definition is internally consistent
    pub fn validate(&self) -> Result<(), SchemaError> {
        if self.component_type.trim().is_empty() {
            return Err(SchemaError::EmptyType);
        }

        for (key, schema) in &self.props_schema {
            match (schema.kind, &schema.options) {
                (PropKind::Select, None) => {
                    return Err(SchemaError::MissingOptions {
                        component_type: self.component_type.clone(),
                        key: key.clone(),
                    });
                }
                (PropKind::Select, Some(options)) if options.is_empty() => {
                    return Err(SchemaError::MissingOptions {
                        component_type: self.component_type.clone(),
                        key: key.clone(),
                    });
                }
                (PropKind::Select, Some(_)) => {}
                (_, Some(_)) => {
                    return Err(SchemaError::UnexpectedOptions {
                        component_type: self.component_type.clone(),
                        key: key.clone(),
                    });
                }
                (_, None) => {}
            }
        }

        Ok(())
    }
}
