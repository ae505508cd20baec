//! # Prop Resolution
//!
//! A node's effective props are its own values plus, for every schema key
//! marked `cascade`, the parent's resolved value when the node leaves the key
//! unset. An empty string counts as unset on both sides. Schema defaults are
//! not filled in here; editors and renderers fall back to them at display time.

use pagecraft_model::{ComponentNode, Props};
use pagecraft_schema::{Registry, TypeDefinition};

use crate::tree::path_to;

/// Outcome of resolving a node's props
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Resolved(Props),

    /// The node's type is not in the registry; nothing was resolved
    UnknownType,
}

impl Resolution {
    pub fn props(&self) -> Option<&Props> {
        match self {
            Resolution::Resolved(props) => Some(props),
            Resolution::UnknownType => None,
        }
    }
}

/// Effective props of `node` given its parent's resolved props.
///
/// Returns `None` when the node's type is unknown.
pub fn effective_props(
    node: &ComponentNode,
    parent_props: Option<&Props>,
    registry: &Registry,
) -> Option<Props> {
    let def = registry.lookup(&node.component_type)?;
    Some(merge_inherited(node, def, parent_props))
}

/// Own props of `node` merged with the cascading values of `parent_props`
pub fn merge_inherited(
    node: &ComponentNode,
    def: &TypeDefinition,
    parent_props: Option<&Props>,
) -> Props {
    let mut merged = node.props.clone();
    let parent = match parent_props {
        Some(parent) => parent,
        None => return merged,
    };

    for key in def.cascading_keys() {
        let unset = node.prop(key).map_or(true, str::is_empty);
        if !unset {
            continue;
        }
        if let Some(value) = parent.get(key).filter(|v| !v.is_empty()) {
            merged.insert(key.to_string(), value.clone());
        }
    }

    merged
}

/// Resolve the node with `id` through its whole ancestor chain.
///
/// Returns `None` if the id is not in the tree.
pub fn resolve_by_id(tree: &[ComponentNode], id: &str, registry: &Registry) -> Option<Resolution> {
    let path = path_to(tree, id)?;
    let (target, ancestors) = path.split_last()?;

    let mut parent_props: Option<Props> = None;
    for ancestor in ancestors {
        parent_props = Some(passed_down(ancestor, parent_props.as_ref(), registry));
    }

    Some(match effective_props(target, parent_props.as_ref(), registry) {
        Some(props) => Resolution::Resolved(props),
        None => Resolution::UnknownType,
    })
}

/// The value set a node hands to its children. Unknown types pass their own props.
fn passed_down(node: &ComponentNode, parent_props: Option<&Props>, registry: &Registry) -> Props {
    effective_props(node, parent_props, registry).unwrap_or_else(|| node.props.clone())
}

/// One node of a resolved tree, as a renderer consumes it
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedNode<'a> {
    pub node: &'a ComponentNode,

    /// `None` for unknown types
    pub definition: Option<&'a TypeDefinition>,

    /// Effective props; the node's own props when the type is unknown
    pub props: Props,

    pub depth: usize,

    pub children: Vec<ResolvedNode<'a>>,
}

impl<'a> ResolvedNode<'a> {
    pub fn is_unknown(&self) -> bool {
        self.definition.is_none()
    }

    /// Effective value of `key`, or the schema default if unset
    pub fn display_value(&self, key: &str) -> Option<&str> {
        match self.definition {
            Some(def) => display_value(def, &self.props, key),
            None => self.props.get(key).map(String::as_str),
        }
    }
}

/// Resolve every node of the tree against its parent's resolved props
pub fn resolve_tree<'a>(tree: &'a [ComponentNode], registry: &'a Registry) -> Vec<ResolvedNode<'a>> {
    resolve_level(tree, None, 0, registry)
}

fn resolve_level<'a>(
    nodes: &'a [ComponentNode],
    parent_props: Option<&Props>,
    depth: usize,
    registry: &'a Registry,
) -> Vec<ResolvedNode<'a>> {
    nodes
        .iter()
        .map(|node| {
            let definition = registry.lookup(&node.component_type);
            let props = passed_down(node, parent_props, registry);
            let children = resolve_level(&node.children, Some(&props), depth + 1, registry);

            ResolvedNode {
                node,
                definition,
                props,
                depth,
                children,
            }
        })
        .collect()
}

/// What a property editor shows: the effective value, else the schema default
pub fn display_value<'a>(def: &'a TypeDefinition, effective: &'a Props, key: &str) -> Option<&'a str> {
    effective
        .get(key)
        .filter(|v| !v.is_empty())
        .map(String::as_str)
        .or_else(|| def.get_prop(key).map(|schema| schema.default.as_str()))
}
