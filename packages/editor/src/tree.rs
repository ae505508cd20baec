//! # Tree Operations
//!
//! Pure functions over a tree snapshot (`&[ComponentNode]`). Each one returns
//! a freshly built `Vec<ComponentNode>` and never touches its input, so a
//! failed or rejected operation can never leave a half-updated tree behind.
//!
//! ## Semantics
//!
//! - **find**: depth-first, parent before children, first match wins
//! - **remove**: drops the node together with its subtree; absent ids are a no-op
//! - **insert**: appends to the end of the destination's children (or the root)
//! - **move**: remove + re-insert of the located subtree; rejected moves
//!   return the input unchanged. An id carried by more than one node cannot
//!   be moved or reordered, since `remove` would drop every copy.
//!
//! Expected conflicts (missing ids, invalid drops) are not errors for the
//! plain functions. The `try_*` variants report them as `TreeError`.

use pagecraft_model::{ComponentNode, Descendants, Props};
use pagecraft_schema::Registry;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use tracing::debug;

/// Where a node is dropped
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind", content = "id")]
pub enum Destination {
    /// The page's root-level sequence
    Root,

    /// The children of the node with this id
    Node(String),
}

impl Destination {
    pub fn node(id: impl Into<String>) -> Self {
        Destination::Node(id.into())
    }

    pub fn is_root(&self) -> bool {
        matches!(self, Destination::Root)
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Destination::Root => f.write_str("root"),
            Destination::Node(id) => write!(f, "node {}", id),
        }
    }
}

/// Position of a node inside the tree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location<'a> {
    /// `None` when the node sits at the root
    pub parent: Option<&'a ComponentNode>,

    /// Index among its siblings
    pub index: usize,
}

impl Location<'_> {
    /// The sequence the node currently lives in
    pub fn destination(&self) -> Destination {
        match self.parent {
            Some(parent) => Destination::node(parent.id.clone()),
            None => Destination::Root,
        }
    }
}

/// Why a structural operation was refused
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    #[error("Node not found: {0}")]
    NodeNotFound(String),

    #[error("Parent not found: {0}")]
    ParentNotFound(String),

    #[error("Cannot drop node {0} onto itself")]
    SelfDrop(String),

    #[error("Cannot move node {node_id} into its own descendant {parent_id}")]
    IntoDescendant { node_id: String, parent_id: String },

    #[error("Node {parent_id} of type '{component_type}' does not accept children")]
    NotAContainer {
        parent_id: String,
        component_type: String,
    },

    #[error("Node {parent_id} has unknown type '{component_type}' and cannot receive children")]
    UnknownParentType {
        parent_id: String,
        component_type: String,
    },

    #[error("Type '{component_type}' may not be placed at the page root")]
    RootNotAllowed { component_type: String },

    #[error("Node id {0} is used by more than one node")]
    AmbiguousId(String),
}

/// Find the only node named `id`
pub fn find_unique<'a>(tree: &'a [ComponentNode], id: &str) -> Result<&'a ComponentNode, TreeError> {
    let mut matches = Descendants::new(tree).filter(|node| node.id == id);
    match (matches.next(), matches.next()) {
        (Some(node), None) => Ok(node),
        (Some(_), Some(_)) => Err(TreeError::AmbiguousId(id.to_string())),
        (None, _) => Err(TreeError::NodeNotFound(id.to_string())),
    }
}

/// Find a node by id
pub fn find<'a>(tree: &'a [ComponentNode], id: &str) -> Option<&'a ComponentNode> {
    for node in tree {
        if node.id == id {
            return Some(node);
        }
        if let Some(found) = find(&node.children, id) {
            return Some(found);
        }
    }
    None
}

pub fn contains(tree: &[ComponentNode], id: &str) -> bool {
    find(tree, id).is_some()
}

/// Find the parent and sibling index of a node
pub fn locate<'a>(tree: &'a [ComponentNode], id: &str) -> Option<Location<'a>> {
    locate_in(tree, id, None)
}

fn locate_in<'a>(
    tree: &'a [ComponentNode],
    id: &str,
    parent: Option<&'a ComponentNode>,
) -> Option<Location<'a>> {
    for (index, node) in tree.iter().enumerate() {
        if node.id == id {
            return Some(Location { parent, index });
        }
        if let Some(found) = locate_in(&node.children, id, Some(node)) {
            return Some(found);
        }
    }
    None
}

/// Nodes from the root down to and including the node with `id`
pub fn path_to<'a>(tree: &'a [ComponentNode], id: &str) -> Option<Vec<&'a ComponentNode>> {
    for node in tree {
        if node.id == id {
            return Some(vec![node]);
        }
        if let Some(mut path) = path_to(&node.children, id) {
            path.insert(0, node);
            return Some(path);
        }
    }
    None
}

/// Copy of `node` with a new children sequence
fn rebuild(node: &ComponentNode, children: Vec<ComponentNode>) -> ComponentNode {
    ComponentNode {
        id: node.id.clone(),
        component_type: node.component_type.clone(),
        props: node.props.clone(),
        children,
    }
}

/// Remove the node with `id` (and its subtree) wherever it occurs
pub fn remove(tree: &[ComponentNode], id: &str) -> Vec<ComponentNode> {
    tree.iter()
        .filter(|node| node.id != id)
        .map(|node| rebuild(node, remove(&node.children, id)))
        .collect()
}

/// Append `node` to the children of `parent_id`. Unchanged if the parent is missing.
///
/// Does not check whether the parent's type accepts children.
pub fn insert_as_child(
    tree: &[ComponentNode],
    parent_id: &str,
    node: ComponentNode,
) -> Vec<ComponentNode> {
    insert_at(tree, &Destination::node(parent_id), node, usize::MAX)
}

/// Append `node` to the root-level sequence
pub fn insert_at_root(tree: &[ComponentNode], node: ComponentNode) -> Vec<ComponentNode> {
    insert_at(tree, &Destination::Root, node, usize::MAX)
}

/// Insert `node` at `index` of the destination sequence, clamped to its length
pub fn insert_at(
    tree: &[ComponentNode],
    destination: &Destination,
    node: ComponentNode,
    index: usize,
) -> Vec<ComponentNode> {
    match destination {
        Destination::Root => {
            let mut out = tree.to_vec();
            out.insert(index.min(out.len()), node);
            out
        }
        Destination::Node(parent_id) => {
            let mut slot = Some(node);
            insert_into(tree, parent_id, &mut slot, index)
        }
    }
}

fn insert_into(
    tree: &[ComponentNode],
    parent_id: &str,
    slot: &mut Option<ComponentNode>,
    index: usize,
) -> Vec<ComponentNode> {
    tree.iter()
        .map(|node| {
            if node.id == parent_id {
                if let Some(child) = slot.take() {
                    let mut children = node.children.clone();
                    children.insert(index.min(children.len()), child);
                    return rebuild(node, children);
                }
            }
            rebuild(node, insert_into(&node.children, parent_id, slot, index))
        })
        .collect()
}

/// Check that `moving` may be dropped into `destination`
pub fn check_destination(
    tree: &[ComponentNode],
    moving: &ComponentNode,
    destination: &Destination,
    registry: &Registry,
) -> Result<(), TreeError> {
    match destination {
        Destination::Root => {
            if registry.allows_root(&moving.component_type) {
                Ok(())
            } else {
                Err(TreeError::RootNotAllowed {
                    component_type: moving.component_type.clone(),
                })
            }
        }
        Destination::Node(parent_id) => {
            if *parent_id == moving.id {
                return Err(TreeError::SelfDrop(moving.id.clone()));
            }
            if moving.contains_id(parent_id) {
                return Err(TreeError::IntoDescendant {
                    node_id: moving.id.clone(),
                    parent_id: parent_id.clone(),
                });
            }
            let parent =
                find(tree, parent_id).ok_or_else(|| TreeError::ParentNotFound(parent_id.clone()))?;
            check_accepts_children(parent, registry)
        }
    }
}

/// Check that `parent`'s type is a known children-accepting type
pub fn check_accepts_children(parent: &ComponentNode, registry: &Registry) -> Result<(), TreeError> {
    match registry.lookup(&parent.component_type) {
        Some(def) if def.accepts_children() => Ok(()),
        Some(_) => Err(TreeError::NotAContainer {
            parent_id: parent.id.clone(),
            component_type: parent.component_type.clone(),
        }),
        None => Err(TreeError::UnknownParentType {
            parent_id: parent.id.clone(),
            component_type: parent.component_type.clone(),
        }),
    }
}

/// Move a node (with its subtree) to the end of `destination`
pub fn try_move(
    tree: &[ComponentNode],
    id: &str,
    destination: &Destination,
    registry: &Registry,
) -> Result<Vec<ComponentNode>, TreeError> {
    try_move_at(tree, id, destination, usize::MAX, registry)
}

/// Move a node (with its subtree) to `index` of `destination`
pub fn try_move_at(
    tree: &[ComponentNode],
    id: &str,
    destination: &Destination,
    index: usize,
    registry: &Registry,
) -> Result<Vec<ComponentNode>, TreeError> {
    let moving = find_unique(tree, id)?;
    check_destination(tree, moving, destination, registry)?;

    let without = remove(tree, id);
    Ok(insert_at(&without, destination, moving.clone(), index))
}

/// Move a node to the end of `destination`; rejected moves return the tree unchanged
pub fn move_node(
    tree: &[ComponentNode],
    id: &str,
    destination: &Destination,
    registry: &Registry,
) -> Vec<ComponentNode> {
    match try_move(tree, id, destination, registry) {
        Ok(moved) => moved,
        Err(err) => {
            debug!(node_id = id, %destination, %err, "move rejected");
            tree.to_vec()
        }
    }
}

/// Move a node to `index` among its current siblings
pub fn try_reorder(
    tree: &[ComponentNode],
    id: &str,
    index: usize,
) -> Result<Vec<ComponentNode>, TreeError> {
    find_unique(tree, id)?;
    let location = locate(tree, id).ok_or_else(|| TreeError::NodeNotFound(id.to_string()))?;
    let destination = location.destination();
    let node = match location.parent {
        Some(parent) => parent.children[location.index].clone(),
        None => tree[location.index].clone(),
    };

    let without = remove(tree, id);
    Ok(insert_at(&without, &destination, node, index))
}

/// Move a node to `index` among its siblings; unchanged if the node is missing
pub fn reorder(tree: &[ComponentNode], id: &str, index: usize) -> Vec<ComponentNode> {
    try_reorder(tree, id, index).unwrap_or_else(|err| {
        debug!(node_id = id, index, %err, "reorder rejected");
        tree.to_vec()
    })
}

/// Rebuild the tree with `update` applied to the props of every node named `id`
fn map_props<F>(tree: &[ComponentNode], id: &str, update: &mut F) -> Vec<ComponentNode>
where
    F: FnMut(&Props) -> Props,
{
    tree.iter()
        .map(|node| {
            let children = map_props(&node.children, id, update);
            if node.id == id {
                ComponentNode {
                    props: update(&node.props),
                    ..rebuild(node, children)
                }
            } else {
                rebuild(node, children)
            }
        })
        .collect()
}

/// Replace the whole props map of a node
pub fn update_props(tree: &[ComponentNode], id: &str, props: Props) -> Vec<ComponentNode> {
    map_props(tree, id, &mut |_: &Props| props.clone())
}

/// Set a single property of a node
pub fn set_prop(tree: &[ComponentNode], id: &str, key: &str, value: &str) -> Vec<ComponentNode> {
    map_props(tree, id, &mut |props: &Props| {
        let mut props = props.clone();
        props.insert(key.to_string(), value.to_string());
        props
    })
}

/// Unset a single property of a node
pub fn clear_prop(tree: &[ComponentNode], id: &str, key: &str) -> Vec<ComponentNode> {
    map_props(tree, id, &mut |props: &Props| {
        let mut props = props.clone();
        props.remove(key);
        props
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree() -> Vec<ComponentNode> {
        vec![
            ComponentNode::new("a", "div")
                .with_child(ComponentNode::new("b", "section").with_child(ComponentNode::new("c", "p")))
                .with_child(ComponentNode::new("d", "image")),
            ComponentNode::new("e", "h1"),
        ]
    }

    #[test]
    fn test_duplicate_id_is_not_moved() {
        let tree = vec![
            ComponentNode::new("a", "div").with_child(ComponentNode::new("dup", "p")),
            ComponentNode::new("b", "div").with_child(ComponentNode::new("dup", "span")),
        ];
        let registry = Registry::builtin();

        assert_eq!(
            try_move(&tree, "dup", &Destination::Root, &registry),
            Err(TreeError::AmbiguousId("dup".to_string()))
        );
        assert_eq!(move_node(&tree, "dup", &Destination::Root, &registry), tree);
        assert_eq!(try_reorder(&tree, "dup", 0), Err(TreeError::AmbiguousId("dup".to_string())));
        assert_eq!(find_unique(&tree, "a").unwrap().id, "a");
        assert!(matches!(find_unique(&tree, "zz"), Err(TreeError::NodeNotFound(_))));
    }

    #[test]
    fn test_find_nested() {
        let tree = tree();
        assert_eq!(find(&tree, "c").unwrap().component_type, "p");
        assert!(find(&tree, "zz").is_none());
    }

    #[test]
    fn test_locate() {
        let tree = tree();
        let loc = locate(&tree, "d").unwrap();
        assert_eq!(loc.parent.unwrap().id, "a");
        assert_eq!(loc.index, 1);
        assert_eq!(loc.destination(), Destination::node("a"));

        let root = locate(&tree, "e").unwrap();
        assert!(root.parent.is_none());
        assert_eq!(root.destination(), Destination::Root);
    }

    #[test]
    fn test_path_to() {
        let tree = tree();
        let ids: Vec<_> = path_to(&tree, "c").unwrap().iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
        assert!(path_to(&tree, "zz").is_none());
    }

    #[test]
    fn test_insert_at_clamps_index() {
        let tree = tree();
        let out = insert_at(&tree, &Destination::node("a"), ComponentNode::new("x", "p"), 0);
        assert_eq!(find(&out, "a").unwrap().children[0].id, "x");

        let out = insert_at(&tree, &Destination::Root, ComponentNode::new("y", "p"), 99);
        assert_eq!(out.last().unwrap().id, "y");
    }

    #[test]
    fn test_insert_missing_parent_is_noop() {
        let tree = tree();
        let out = insert_as_child(&tree, "nope", ComponentNode::new("x", "p"));
        assert_eq!(out, tree);
    }

    #[test]
    fn test_reorder_within_parent() {
        let tree = tree();
        let out = try_reorder(&tree, "d", 0).unwrap();
        let ids: Vec<_> = find(&out, "a").unwrap().children.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["d", "b"]);

        let out = try_reorder(&tree, "a", 5).unwrap();
        assert_eq!(out[1].id, "a");
    }

    #[test]
    fn test_reorder_missing_is_noop() {
        let tree = tree();
        assert_eq!(reorder(&tree, "ghost", 0), tree);
        assert!(matches!(try_reorder(&tree, "ghost", 0), Err(TreeError::NodeNotFound(_))));
    }

    #[test]
    fn test_move_keeps_subtree() {
        let tree = tree();
        let registry = Registry::builtin();

        let out = move_node(&tree, "b", &Destination::Root, &registry);
        assert_eq!(out.last().unwrap().id, "b");
        assert_eq!(out.last().unwrap().children[0].id, "c");
        assert_eq!(find(&out, "a").unwrap().children.len(), 1);
    }

    #[test]
    fn test_rejected_moves() {
        let tree = tree();
        let registry = Registry::builtin();
        let attempt = |id: &str, dest: Destination| try_move(&tree, id, &dest, &registry);

        assert_eq!(attempt("b", Destination::node("b")), Err(TreeError::SelfDrop("b".to_string())));
        assert!(matches!(attempt("a", Destination::node("c")), Err(TreeError::IntoDescendant { .. })));
        assert!(matches!(attempt("e", Destination::node("d")), Err(TreeError::NotAContainer { .. })));
        assert_eq!(attempt("e", Destination::node("zz")), Err(TreeError::ParentNotFound("zz".to_string())));
        assert_eq!(attempt("zz", Destination::Root), Err(TreeError::NodeNotFound("zz".to_string())));

        assert_eq!(move_node(&tree, "a", &Destination::node("c"), &registry), tree);
    }

    #[test]
    fn test_set_and_clear_prop() {
        let tree = tree();
        let out = set_prop(&tree, "c", "text", "Hello");
        assert_eq!(find(&out, "c").unwrap().prop("text"), Some("Hello"));

        let out = clear_prop(&out, "c", "text");
        assert_eq!(find(&out, "c").unwrap().prop("text"), None);
        assert_eq!(out, tree);
    }

    #[test]
    fn test_destination_serde() {
        let json = serde_json::to_string(&Destination::node("a")).unwrap();
        assert_eq!(json, r#"{"kind":"node","id":"a"}"#);
        let root: Destination = serde_json::from_str(r#"{"kind":"root"}"#).unwrap();
        assert!(root.is_root());
    }
}
