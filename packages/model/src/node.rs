use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Flat property map of a node. Sorted so serialization is deterministic.
pub type Props = BTreeMap<String, String>;

/// One element of the component tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentNode {
    /// Unique across the whole tree, never changes after creation
    #[serde(default)]
    pub id: String,

    /// Key into the schema registry. Unknown types stay structurally valid.
    #[serde(rename = "type", default)]
    pub component_type: String,

    /// Own property values. A missing key means "unset".
    #[serde(default, deserialize_with = "deserialize_props")]
    pub props: Props,

    #[serde(default, deserialize_with = "deserialize_children")]
    pub children: Vec<ComponentNode>,
}

impl ComponentNode {
    pub fn new(id: impl Into<String>, component_type: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            component_type: component_type.into(),
            props: Props::new(),
            children: Vec::new(),
        }
    }

    pub fn with_prop(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.props.insert(key.into(), value.into());
        self
    }

    pub fn with_props(mut self, props: Props) -> Self {
        self.props = props;
        self
    }

    pub fn with_child(mut self, child: ComponentNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_children(mut self, children: Vec<ComponentNode>) -> Self {
        self.children = children;
        self
    }

    /// Own value of a property, ignoring inheritance
    pub fn prop(&self, key: &str) -> Option<&str> {
        self.props.get(key).map(String::as_str)
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// This node followed by all of its descendants, parent before children
    pub fn subtree(&self) -> Descendants<'_> {
        Descendants {
            stack: vec![self],
        }
    }

    /// Number of nodes in this subtree, including the node itself
    pub fn subtree_size(&self) -> usize {
        self.subtree().count()
    }

    /// Whether `id` names this node or one of its descendants
    pub fn contains_id(&self, id: &str) -> bool {
        self.subtree().any(|node| node.id == id)
    }
}

/// Depth-first, pre-order iterator over a forest of nodes
#[derive(Debug, Clone)]
pub struct Descendants<'a> {
    stack: Vec<&'a ComponentNode>,
}

impl<'a> Descendants<'a> {
    pub fn new(roots: &'a [ComponentNode]) -> Self {
        Self {
            stack: roots.iter().rev().collect(),
        }
    }
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a ComponentNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

/// Accept string, number and boolean prop values; numbers and booleans are
/// stored as their JSON text. Null values are treated as unset.
fn deserialize_props<'de, D>(deserializer: D) -> Result<Props, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<BTreeMap<String, Value>> = Option::deserialize(deserializer)?;
    let mut props = Props::new();

    for (key, value) in raw.unwrap_or_default() {
        let value = match value {
            Value::String(s) => s,
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Null => continue,
            Value::Array(_) | Value::Object(_) => {
                return Err(D::Error::custom(format!(
                    "prop '{}' must be a flat value, found a nested structure",
                    key
                )));
            }
        };
        props.insert(key, value);
    }

    Ok(props)
}

fn deserialize_children<'de, D>(deserializer: D) -> Result<Vec<ComponentNode>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<ComponentNode>>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ComponentNode {
        ComponentNode::new("a", "div")
            .with_child(
                ComponentNode::new("b", "section").with_child(ComponentNode::new("c", "p")),
            )
            .with_child(ComponentNode::new("d", "image"))
    }

    #[test]
    fn test_subtree_is_preorder() {
        let ids: Vec<_> = sample().subtree().map(|n| n.id.clone()).collect();
        assert_eq!(ids, vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_descendants_over_forest() {
        let forest = vec![sample(), ComponentNode::new("e", "h1")];
        let ids: Vec<_> = Descendants::new(&forest).map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c", "d", "e"]);
    }

    #[test]
    fn test_contains_id() {
        let node = sample();
        assert!(node.contains_id("c"));
        assert!(node.contains_id("a"));
        assert!(!node.contains_id("z"));
        assert_eq!(node.subtree_size(), 4);
    }

    #[test]
    fn test_lenient_prop_values() {
        let json = r#"{ "id": "x", "type": "p", "props": { "text": "hi", "opacity": 0.5, "hidden": false, "gone": null } }"#;
        let node: ComponentNode = serde_json::from_str(json).unwrap();

        assert_eq!(node.prop("text"), Some("hi"));
        assert_eq!(node.prop("opacity"), Some("0.5"));
        assert_eq!(node.prop("hidden"), Some("false"));
        assert_eq!(node.prop("gone"), None);
        assert!(node.children.is_empty());
    }

    #[test]
    fn test_nested_prop_value_rejected() {
        let json = r#"{ "id": "x", "type": "p", "props": { "style": { "color": "red" } } }"#;
        assert!(serde_json::from_str::<ComponentNode>(json).is_err());
    }

    #[test]
    fn test_null_children_default_to_empty() {
        let json = r#"{ "id": "x", "type": "div", "props": null, "children": null }"#;
        let node: ComponentNode = serde_json::from_str(json).unwrap();
        assert!(node.props.is_empty());
        assert!(node.children.is_empty());
    }
}
