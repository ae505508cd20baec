//! # Document Handle
//!
//! Owns the live page document of one editor.
//!
//! A Document can be:
//! - **Memory-backed**: temporary, for tests or pages that were never saved
//! - **File-backed**: loaded from and saved to a JSON file
//!
//! ## Lifecycle
//!
//! ```text
//! Load/Import → Mutate → Export/Save
//!      ↓           ↓          ↓
//!    JSON      snapshots     JSON
//! ```
//!
//! Every mutation produces a complete new snapshot that replaces the old one.
//! A rejected mutation leaves the snapshot and the version untouched.

use pagecraft_model::{deserialize, ComponentNode, Document as PageDocument, Serializer};
use pagecraft_schema::Registry;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::{EditorError, Mutation, MutationResult};

/// Editable page document
#[derive(Debug)]
pub struct Document {
    /// Path of the backing file (or a display name for memory documents)
    pub path: PathBuf,

    /// Increments whenever the snapshot is replaced
    pub version: u64,

    storage: DocumentStorage,
}

/// Storage backend for document
#[derive(Debug)]
pub enum DocumentStorage {
    /// In-memory only
    Memory { page: PageDocument },

    /// File-backed
    File { page: PageDocument, dirty: bool },
}

impl Document {
    /// Memory document holding the default page envelope
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::from_page(path, PageDocument::default())
    }

    /// Memory document holding `page`
    pub fn from_page(path: impl Into<PathBuf>, page: PageDocument) -> Self {
        Self {
            path: path.into(),
            version: 0,
            storage: DocumentStorage::Memory { page },
        }
    }

    /// Memory document parsed from export text
    pub fn from_source(path: impl Into<PathBuf>, source: &str) -> Result<Self, EditorError> {
        Ok(Self::from_page(path, deserialize(source)?))
    }

    /// File-backed document that is not on disk yet
    pub fn create(path: impl Into<PathBuf>, page: PageDocument) -> Self {
        Self {
            path: path.into(),
            version: 0,
            storage: DocumentStorage::File { page, dirty: true },
        }
    }

    /// Load document from file (file-backed)
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, EditorError> {
        let path = path.into();
        let source = std::fs::read_to_string(&path)?;
        let page = deserialize(&source)?;
        info!(path = %path.display(), nodes = page.node_count(), "Loaded page");

        Ok(Self {
            path,
            version: 0,
            storage: DocumentStorage::File { page, dirty: false },
        })
    }

    /// Current page
    pub fn page(&self) -> &PageDocument {
        match &self.storage {
            DocumentStorage::Memory { page } => page,
            DocumentStorage::File { page, .. } => page,
        }
    }

    /// Current tree snapshot
    pub fn components(&self) -> &[ComponentNode] {
        &self.page().components
    }

    fn page_mut(&mut self) -> &mut PageDocument {
        match &mut self.storage {
            DocumentStorage::Memory { page } => page,
            DocumentStorage::File { page, dirty } => {
                *dirty = true;
                page
            }
        }
    }

    /// Apply a mutation. Rejections are reported in the result, not as errors.
    pub fn apply(&mut self, mutation: &Mutation, registry: &Registry) -> MutationResult {
        let node_id = Some(mutation.node_id().to_string());

        match mutation.apply(self.components(), registry) {
            Ok(next) => {
                let changed = next != self.components();
                if changed {
                    self.version += 1;
                    self.page_mut().components = next;
                }
                debug!(
                    mutation = mutation.name(),
                    node_id = mutation.node_id(),
                    version = self.version,
                    changed,
                    "Applied mutation"
                );

                MutationResult {
                    version: self.version,
                    changed,
                    node_id,
                    rejection: None,
                }
            }
            Err(err) => {
                debug!(
                    mutation = mutation.name(),
                    node_id = mutation.node_id(),
                    %err,
                    "Mutation rejected"
                );

                MutationResult {
                    version: self.version,
                    changed: false,
                    node_id,
                    rejection: Some(err),
                }
            }
        }
    }

    /// Replace the whole page from export text.
    ///
    /// On a parse failure the current page is kept untouched.
    pub fn import_str(&mut self, text: &str) -> Result<(), EditorError> {
        let page = deserialize(text)?;
        self.replace_page(page);
        Ok(())
    }

    /// Replace the whole page
    pub fn replace_page(&mut self, page: PageDocument) {
        info!(nodes = page.node_count(), "Replacing page");
        *self.page_mut() = page;
        self.version += 1;
    }

    /// Export text with the default indent
    pub fn export(&self) -> Result<String, EditorError> {
        self.export_with(&Serializer::new())
    }

    pub fn export_with(&self, serializer: &Serializer) -> Result<String, EditorError> {
        Ok(serializer.serialize(self.page())?)
    }

    /// Check if document has unsaved changes
    pub fn is_dirty(&self) -> bool {
        match &self.storage {
            DocumentStorage::File { dirty, .. } => *dirty,
            _ => false,
        }
    }

    pub fn is_file_backed(&self) -> bool {
        matches!(self.storage, DocumentStorage::File { .. })
    }

    /// Save document to disk (if file-backed)
    pub fn save(&mut self) -> Result<(), EditorError> {
        self.save_with(&Serializer::new())
    }

    pub fn save_with(&mut self, serializer: &Serializer) -> Result<(), EditorError> {
        let text = match &self.storage {
            DocumentStorage::File { page, .. } => serializer.serialize(page)?,
            DocumentStorage::Memory { .. } => return Err(EditorError::NotFileBacked),
        };

        write_file(&self.path, &text)?;
        if let DocumentStorage::File { dirty, .. } = &mut self.storage {
            *dirty = false;
        }
        info!(path = %self.path.display(), "Saved page");
        Ok(())
    }
}

fn write_file(path: &Path, text: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, format!("{}\n", text))
}
