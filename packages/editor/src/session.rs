//! # Edit Session
//!
//! The only stateful holder of an editor: the live document, the schema
//! registry, the current selection and the id generator. Tree operations stay
//! pure; the session turns UI events (drops, property edits, delete, import)
//! into mutations and keeps the selection consistent with the tree.

use pagecraft_model::{ComponentNode, Document as PageDocument, IdGenerator, Props};
use pagecraft_schema::Registry;
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, info};

use crate::resolve::{resolve_by_id, resolve_tree, Resolution, ResolvedNode};
use crate::tree::{self, Destination};
use crate::{Document, EditorError, Mutation, MutationResult};

/// What a drag source hands over on drop
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DragPayload {
    /// An existing node being relocated
    Existing {
        id: String,
        #[serde(rename = "type")]
        component_type: String,
    },

    /// A new component from the palette
    New {
        #[serde(rename = "type")]
        component_type: String,
    },
}

/// Behaviour switches for a session
#[derive(Debug, Clone, Default)]
pub struct SessionOptions {
    /// Write every schema default into newly created nodes.
    ///
    /// Seeded values are own values, so they stop parent values from cascading.
    pub seed_default_props: bool,
}

/// Single edit session
pub struct EditSession {
    /// Unique session identifier
    pub id: String,

    /// Document being edited
    pub document: Document,

    registry: Registry,

    /// Currently selected node, if any
    selection: Option<String>,

    ids: IdGenerator,

    options: SessionOptions,
}

impl EditSession {
    /// Create new edit session
    pub fn new(id: impl Into<String>, document: Document, registry: Registry) -> Self {
        Self::with_options(id, document, registry, SessionOptions::default())
    }

    pub fn with_options(
        id: impl Into<String>,
        document: Document,
        registry: Registry,
        options: SessionOptions,
    ) -> Self {
        let id = id.into();
        let ids = IdGenerator::new(&id);

        Self {
            id,
            document,
            registry,
            selection: None,
            ids,
            options,
        }
    }

    /// Session over the default page with the built-in registry
    pub fn start() -> Self {
        Self::open(Document::new("untitled.json"), Registry::builtin(), SessionOptions::default())
    }

    /// Session with a time-based id, so ids it creates differ from earlier sessions
    pub fn open(document: Document, registry: Registry, options: SessionOptions) -> Self {
        let id = format!("session-{}", current_timestamp());
        Self::with_options(id, document, registry, options)
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn page(&self) -> &PageDocument {
        self.document.page()
    }

    pub fn components(&self) -> &[ComponentNode] {
        self.document.components()
    }

    pub fn find(&self, id: &str) -> Option<&ComponentNode> {
        tree::find(self.components(), id)
    }

    // Selection

    /// Select a node. Ids that are not in the tree are ignored.
    pub fn select(&mut self, id: &str) -> bool {
        if tree::contains(self.components(), id) {
            self.selection = Some(id.to_string());
            true
        } else {
            false
        }
    }

    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    pub fn selection(&self) -> Option<&str> {
        self.selection.as_deref()
    }

    pub fn selected(&self) -> Option<&ComponentNode> {
        self.selection.as_deref().and_then(|id| self.find(id))
    }

    /// Drop the selection if its node is gone
    fn reconcile_selection(&mut self) {
        if let Some(id) = &self.selection {
            if !tree::contains(self.document.components(), id) {
                debug!(node_id = %id, "Selected node no longer exists, clearing selection");
                self.selection = None;
            }
        }
    }

    // Editing

    /// Apply any mutation and keep the selection consistent
    pub fn apply(&mut self, mutation: Mutation) -> MutationResult {
        let result = self.document.apply(&mutation, &self.registry);
        if result.changed {
            self.reconcile_selection();
        }
        result
    }

    /// Build a node of `component_type` with a fresh id and no children
    pub fn create_node(&mut self, component_type: &str) -> ComponentNode {
        let components = self.document.components();
        let id = self
            .ids
            .new_id_where(|candidate| tree::contains(components, candidate));

        let props = match self.registry.lookup(component_type) {
            Some(def) if self.options.seed_default_props => def.default_props(),
            _ => Props::new(),
        };

        ComponentNode::new(id, component_type).with_props(props)
    }

    /// Create a component from the palette at the end of `destination`
    pub fn add_component(&mut self, component_type: &str, destination: Destination) -> MutationResult {
        let node = self.create_node(component_type);
        self.apply(Mutation::InsertNode { destination, node })
    }

    /// Handle a drop from a drag source
    pub fn drop_payload(&mut self, payload: DragPayload, destination: Destination) -> MutationResult {
        match payload {
            DragPayload::New { component_type } => self.add_component(&component_type, destination),
            DragPayload::Existing { id, .. } => self.move_component(&id, destination),
        }
    }

    pub fn move_component(&mut self, id: &str, destination: Destination) -> MutationResult {
        self.apply(Mutation::MoveNode {
            node_id: id.to_string(),
            destination,
        })
    }

    pub fn reorder_component(&mut self, id: &str, index: usize) -> MutationResult {
        self.apply(Mutation::ReorderNode {
            node_id: id.to_string(),
            index,
        })
    }

    /// Delete a node and everything below it
    pub fn delete_component(&mut self, id: &str) -> MutationResult {
        self.apply(Mutation::RemoveNode {
            node_id: id.to_string(),
        })
    }

    /// Delete the selected node, if any
    pub fn delete_selected(&mut self) -> Option<MutationResult> {
        let id = self.selection.clone()?;
        Some(self.delete_component(&id))
    }

    pub fn set_prop(&mut self, id: &str, key: &str, value: &str) -> MutationResult {
        self.apply(Mutation::SetProp {
            node_id: id.to_string(),
            key: key.to_string(),
            value: value.to_string(),
        })
    }

    pub fn clear_prop(&mut self, id: &str, key: &str) -> MutationResult {
        self.apply(Mutation::ClearProp {
            node_id: id.to_string(),
            key: key.to_string(),
        })
    }

    pub fn replace_props(&mut self, id: &str, props: Props) -> MutationResult {
        self.apply(Mutation::ReplaceProps {
            node_id: id.to_string(),
            props,
        })
    }

    // Import / export

    /// Replace the whole page from export text.
    ///
    /// The previous page and selection survive a parse failure.
    pub fn import(&mut self, text: &str) -> Result<(), EditorError> {
        self.document.import_str(text)?;
        self.reconcile_selection();
        info!(session = %self.id, nodes = self.page().node_count(), "Imported page");
        Ok(())
    }

    pub fn export(&self) -> Result<String, EditorError> {
        self.document.export()
    }

    // Resolution

    /// Effective props of a node, resolved through its ancestors
    pub fn effective_props(&self, id: &str) -> Option<Resolution> {
        resolve_by_id(self.components(), id, &self.registry)
    }

    /// The whole tree resolved for rendering
    pub fn resolved_tree(&self) -> Vec<ResolvedNode<'_>> {
        resolve_tree(self.components(), &self.registry)
    }
}

fn current_timestamp() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> EditSession {
        EditSession::new("test-session", Document::new("test.json"), Registry::builtin())
    }

    #[test]
    fn test_session_creation() {
        let session = session();

        assert_eq!(session.id, "test-session");
        assert!(session.selection().is_none());
        assert!(session.page().is_empty());
    }

    #[test]
    fn test_select_unknown_id_is_ignored() {
        let mut session = session();
        assert!(!session.select("ghost"));
        assert!(session.selection().is_none());
    }

    #[test]
    fn test_seeded_defaults() {
        let mut session = EditSession::with_options(
            "seeded",
            Document::new("test.json"),
            Registry::builtin(),
            SessionOptions {
                seed_default_props: true,
            },
        );

        let node = session.create_node("button");
        assert_eq!(node.prop("text"), Some("Click Me"));

        let unknown = session.create_node("carousel");
        assert!(unknown.props.is_empty());
    }

    #[test]
    fn test_drag_payload_shapes() {
        let new: DragPayload = serde_json::from_str(r#"{ "type": "h1" }"#).unwrap();
        assert_eq!(
            new,
            DragPayload::New {
                component_type: "h1".to_string()
            }
        );

        let existing: DragPayload = serde_json::from_str(r#"{ "id": "comp-1", "type": "div" }"#).unwrap();
        assert!(matches!(existing, DragPayload::Existing { ref id, .. } if id == "comp-1"));
    }
}
