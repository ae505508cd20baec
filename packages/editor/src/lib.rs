//! # Pagecraft Editor
//!
//! Core editing engine for Pagecraft pages.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ model: page JSON ↔ Document / ComponentNode │
//! │ schema: type registry + prop schemas        │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: tree ops + session                  │
//! │  - Pure tree operations over snapshots      │
//! │  - Mutations with validation                │
//! │  - Cascade resolution of props              │
//! │  - Selection, fresh ids, import/export      │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ renderer / property panel (not in here)     │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **Snapshots are values**: every edit builds a complete new tree
//! 2. **Rejections are not failures**: invalid drops leave the tree as it was
//! 3. **Schema drives structure**: only children-accepting types take children
//!
//! ## Usage
//!
//! ```rust,ignore
//! use pagecraft_editor::{Destination, EditSession};
//!
//! let mut session = EditSession::start();
//!
//! let added = session.add_component("div", Destination::Root);
//! let container = added.node_id.unwrap();
//! session.add_component("p", Destination::node(&container));
//!
//! session.set_prop(&container, "backgroundColor", "#111111");
//! let text = session.export()?;
//! ```

mod document;
mod errors;
mod mutations;
mod session;

pub mod resolve;
pub mod tree;

pub use document::{Document, DocumentStorage};
pub use errors::EditorError;
pub use mutations::{Mutation, MutationError, MutationResult};
pub use resolve::{display_value, effective_props, resolve_by_id, resolve_tree, Resolution, ResolvedNode};
pub use session::{DragPayload, EditSession, SessionOptions};
pub use tree::{Destination, Location, TreeError};

// Re-export model and schema types for convenience
pub use pagecraft_model::{ComponentNode, Document as PageDocument, Props};
pub use pagecraft_schema::{Registry, TypeDefinition};
