//! # Tree Mutations
//!
//! Semantic operations an editing surface sends to a document.
//!
//! ## Design Principles
//!
//! 1. **Intent-preserving**: each mutation names one user action
//! 2. **Validated**: structural constraints are checked before anything is built
//! 3. **All-or-nothing**: a mutation yields a complete new snapshot or none
//!
//! ## Mutation Semantics
//!
//! ### InsertNode
//! - Appends a freshly created node (with its subtree) to the destination
//! - Fails if any id of the subtree is already in use
//! - Fails if the destination does not accept children or refuses the type at root
//!
//! ### MoveNode
//! - Relocates a node and its whole subtree to the end of the destination
//! - Fails on self-drop, drop into own descendant, non-container or root refusal
//!
//! ### RemoveNode
//! - Removes the node and all descendants (children are never orphaned to root)
//!
//! ### SetProp / ClearProp / ReplaceProps
//! - Atomic replacement of values, no merging
//! - Keys must belong to the node type's schema; unknown types are not editable

use pagecraft_model::{ComponentNode, Props};
use pagecraft_schema::Registry;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

use crate::tree::{self, Destination, TreeError};

/// Semantic mutations (intent-preserving operations)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Mutation {
    /// Insert a new node at the end of a destination
    InsertNode {
        destination: Destination,
        node: ComponentNode,
    },

    /// Move an existing node to the end of a new destination
    MoveNode {
        node_id: String,
        destination: Destination,
    },

    /// Move a node to a new index among its current siblings
    ReorderNode { node_id: String, index: usize },

    /// Remove a node and its subtree
    RemoveNode { node_id: String },

    /// Set one property value
    SetProp {
        node_id: String,
        key: String,
        value: String,
    },

    /// Unset one property
    ClearProp { node_id: String, key: String },

    /// Replace the whole props map
    ReplaceProps { node_id: String, props: Props },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MutationError {
    #[error(transparent)]
    Tree(#[from] TreeError),

    #[error("Node id is empty")]
    EmptyId,

    #[error("Node id already in use: {0}")]
    DuplicateId(String),

    #[error("Type '{0}' is unknown; its properties cannot be edited")]
    UnknownType(String),

    #[error("Property '{key}' is not part of the '{component_type}' schema")]
    UnknownProp { component_type: String, key: String },
}

/// Outcome of applying a mutation to a document
#[derive(Debug, Clone, PartialEq)]
pub struct MutationResult {
    /// Document version after the mutation
    pub version: u64,

    /// Whether the snapshot was replaced
    pub changed: bool,

    /// The node the mutation was about
    pub node_id: Option<String>,

    /// Why the mutation was refused, if it was
    pub rejection: Option<MutationError>,
}

impl MutationResult {
    pub fn is_rejected(&self) -> bool {
        self.rejection.is_some()
    }
}

impl Mutation {
    /// Short name for logs
    pub fn name(&self) -> &'static str {
        match self {
            Mutation::InsertNode { .. } => "InsertNode",
            Mutation::MoveNode { .. } => "MoveNode",
            Mutation::ReorderNode { .. } => "ReorderNode",
            Mutation::RemoveNode { .. } => "RemoveNode",
            Mutation::SetProp { .. } => "SetProp",
            Mutation::ClearProp { .. } => "ClearProp",
            Mutation::ReplaceProps { .. } => "ReplaceProps",
        }
    }

    /// Id of the node this mutation is about
    pub fn node_id(&self) -> &str {
        match self {
            Mutation::InsertNode { node, .. } => &node.id,
            Mutation::MoveNode { node_id, .. }
            | Mutation::ReorderNode { node_id, .. }
            | Mutation::RemoveNode { node_id }
            | Mutation::SetProp { node_id, .. }
            | Mutation::ClearProp { node_id, .. }
            | Mutation::ReplaceProps { node_id, .. } => node_id,
        }
    }

    /// Check the mutation against a snapshot without building anything
    pub fn validate(&self, tree: &[ComponentNode], registry: &Registry) -> Result<(), MutationError> {
        match self {
            Mutation::InsertNode { destination, node } => {
                Self::validate_new_ids(tree, node)?;
                tree::check_destination(tree, node, destination, registry)?;
                Ok(())
            }

            Mutation::MoveNode {
                node_id,
                destination,
            } => {
                let moving = tree::find_unique(tree, node_id)?;
                tree::check_destination(tree, moving, destination, registry)?;
                Ok(())
            }

            Mutation::ReorderNode { node_id, .. } => {
                tree::find_unique(tree, node_id)?;
                Ok(())
            }

            Mutation::RemoveNode { node_id }
            | Mutation::ClearProp { node_id, .. } => {
                Self::require(tree, node_id)?;
                Ok(())
            }

            Mutation::SetProp { node_id, key, .. } => {
                let node = Self::require(tree, node_id)?;
                Self::validate_keys(node, std::iter::once(key.as_str()), registry)
            }

            Mutation::ReplaceProps { node_id, props } => {
                let node = Self::require(tree, node_id)?;
                Self::validate_keys(node, props.keys().map(String::as_str), registry)
            }
        }
    }

    /// Apply to a snapshot, producing the next snapshot
    pub fn apply(
        &self,
        tree: &[ComponentNode],
        registry: &Registry,
    ) -> Result<Vec<ComponentNode>, MutationError> {
        self.validate(tree, registry)?;

        let next = match self {
            Mutation::InsertNode { destination, node } => {
                tree::insert_at(tree, destination, node.clone(), usize::MAX)
            }
            Mutation::MoveNode {
                node_id,
                destination,
            } => tree::try_move(tree, node_id, destination, registry)?,
            Mutation::ReorderNode { node_id, index } => tree::try_reorder(tree, node_id, *index)?,
            Mutation::RemoveNode { node_id } => tree::remove(tree, node_id),
            Mutation::SetProp {
                node_id,
                key,
                value,
            } => tree::set_prop(tree, node_id, key, value),
            Mutation::ClearProp { node_id, key } => tree::clear_prop(tree, node_id, key),
            Mutation::ReplaceProps { node_id, props } => {
                tree::update_props(tree, node_id, props.clone())
            }
        };

        Ok(next)
    }

    fn require<'a>(tree: &'a [ComponentNode], id: &str) -> Result<&'a ComponentNode, MutationError> {
        tree::find(tree, id).ok_or_else(|| TreeError::NodeNotFound(id.to_string()).into())
    }

    /// Every id of the new subtree must be non-empty, unused and unique within the subtree
    fn validate_new_ids(tree: &[ComponentNode], node: &ComponentNode) -> Result<(), MutationError> {
        let mut seen = HashSet::new();
        for candidate in node.subtree() {
            if candidate.id.is_empty() {
                return Err(MutationError::EmptyId);
            }
            if !seen.insert(candidate.id.as_str()) || tree::contains(tree, &candidate.id) {
                return Err(MutationError::DuplicateId(candidate.id.clone()));
            }
        }
        Ok(())
    }

    fn validate_keys<'k>(
        node: &ComponentNode,
        mut keys: impl Iterator<Item = &'k str>,
        registry: &Registry,
    ) -> Result<(), MutationError> {
        let def = registry
            .lookup(&node.component_type)
            .ok_or_else(|| MutationError::UnknownType(node.component_type.clone()))?;

        match keys.find(|key| def.get_prop(key).is_none()) {
            Some(key) => Err(MutationError::UnknownProp {
                component_type: node.component_type.clone(),
                key: key.to_string(),
            }),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree() -> Vec<ComponentNode> {
        vec![
            ComponentNode::new("a", "div").with_child(ComponentNode::new("b", "p")),
            ComponentNode::new("img", "image"),
            ComponentNode::new("x", "carousel"),
        ]
    }

    #[test]
    fn test_insert_rejects_duplicate_id() {
        let mutation = Mutation::InsertNode {
            destination: Destination::Root,
            node: ComponentNode::new("b", "p"),
        };

        assert_eq!(
            mutation.validate(&tree(), &Registry::builtin()),
            Err(MutationError::DuplicateId("b".to_string()))
        );
    }

    #[test]
    fn test_insert_rejects_duplicate_inside_subtree() {
        let mutation = Mutation::InsertNode {
            destination: Destination::Root,
            node: ComponentNode::new("n", "div").with_child(ComponentNode::new("n", "p")),
        };

        assert!(matches!(
            mutation.validate(&tree(), &Registry::builtin()),
            Err(MutationError::DuplicateId(_))
        ));
    }

    #[test]
    fn test_insert_into_leaf_rejected() {
        let mutation = Mutation::InsertNode {
            destination: Destination::node("img"),
            node: ComponentNode::new("n", "p"),
        };

        assert!(matches!(
            mutation.apply(&tree(), &Registry::builtin()),
            Err(MutationError::Tree(TreeError::NotAContainer { .. }))
        ));
    }

    #[test]
    fn test_set_prop_checks_schema() {
        let registry = Registry::builtin();
        let set = |node_id: &str, key: &str| Mutation::SetProp {
            node_id: node_id.to_string(),
            key: key.to_string(),
            value: "v".to_string(),
        };

        assert!(set("b", "text").validate(&tree(), &registry).is_ok());
        assert!(matches!(
            set("b", "gridCols").validate(&tree(), &registry),
            Err(MutationError::UnknownProp { .. })
        ));
        assert_eq!(
            set("x", "text").validate(&tree(), &registry),
            Err(MutationError::UnknownType("carousel".to_string()))
        );
    }

    #[test]
    fn test_remove_missing_is_not_found() {
        let mutation = Mutation::RemoveNode {
            node_id: "ghost".to_string(),
        };

        assert_eq!(
            mutation.apply(&tree(), &Registry::builtin()),
            Err(MutationError::Tree(TreeError::NodeNotFound("ghost".to_string())))
        );
    }

    #[test]
    fn test_move_of_duplicated_id_rejected() {
        let mut tree = tree();
        tree.push(ComponentNode::new("b", "span"));
        let mutation = Mutation::MoveNode {
            node_id: "b".to_string(),
            destination: Destination::node("a"),
        };

        assert_eq!(
            mutation.validate(&tree, &Registry::builtin()),
            Err(MutationError::Tree(TreeError::AmbiguousId("b".to_string())))
        );
    }

    #[test]
    fn test_mutation_serialization() {
        let mutation = Mutation::MoveNode {
            node_id: "b".to_string(),
            destination: Destination::Root,
        };

        let json = serde_json::to_string(&mutation).unwrap();
        let back: Mutation = serde_json::from_str(&json).unwrap();
        assert_eq!(back, mutation);
        assert_eq!(back.node_id(), "b");
        assert_eq!(back.name(), "MoveNode");
    }
}
