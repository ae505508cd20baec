//! # Pagecraft Schema
//!
//! Static catalog of component types. Each entry says whether the type
//! accepts children, whether it may sit at the page root, and which visual
//! properties it carries (kind, label, default, options, cascade flag).
//!
//! A lookup miss is a normal outcome: documents may reference types this
//! registry does not know, and callers degrade to an "unknown" presentation.

mod builtin;
mod definition;
mod error;
mod registry;

pub use definition::{PropKind, PropSchema, TypeDefinition};
pub use error::{SchemaError, SchemaResult};
pub use registry::Registry;
