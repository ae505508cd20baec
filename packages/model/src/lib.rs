//! # Pagecraft Model
//!
//! The page document and its component tree, plus the JSON form used for
//! import and export.
//!
//! ```text
//! Document
//!  ├─ title, theme, styles.colors
//!  └─ components: [ComponentNode]
//!                    ├─ id, type, props
//!                    └─ children: [ComponentNode]
//! ```
//!
//! Every node is owned by exactly one parent sequence; there are no shared
//! or aliased nodes. Editing replaces whole snapshots, see `pagecraft-editor`.

pub mod document;
pub mod error;
pub mod id_generator;
pub mod node;
pub mod serializer;
pub mod visitor;

pub use document::{Document, Styles, Theme};
pub use error::{ParseError, ParseResult, SerializeError};
pub use id_generator::{get_session_seed, IdGenerator};
pub use node::{ComponentNode, Descendants, Props};
pub use serializer::{deserialize, serialize, Serializer};
pub use visitor::{walk_document, walk_node, NodeContext, Visitor};
