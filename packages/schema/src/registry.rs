use std::collections::HashMap;

use crate::builtin;
use crate::definition::TypeDefinition;
use crate::error::SchemaResult;

/// Catalog of component types, keyed by type name, kept in palette order
#[derive(Debug, Clone, Default)]
pub struct Registry {
    definitions: Vec<TypeDefinition>,
    index: HashMap<String, usize>,
}

impl Registry {
    /// Registry with no types at all
    pub fn empty() -> Self {
        Self::default()
    }

    /// The built-in page-builder palette
    pub fn builtin() -> Self {
        let mut registry = Self::empty();
        for def in builtin::definitions() {
            registry.insert_unchecked(def);
        }
        registry
    }

    /// Parse a JSON array of type definitions into a fresh registry
    pub fn from_json(json: &str) -> SchemaResult<Self> {
        let mut registry = Self::empty();
        registry.extend_from_json(json)?;
        Ok(registry)
    }

    /// Add (or replace) the definitions from a JSON array.
    ///
    /// All or nothing: one invalid definition leaves the registry untouched.
    pub fn extend_from_json(&mut self, json: &str) -> SchemaResult<()> {
        let definitions: Vec<TypeDefinition> = serde_json::from_str(json)?;
        definitions.iter().try_for_each(TypeDefinition::validate)?;
        for def in definitions {
            self.insert_unchecked(def);
        }
        Ok(())
    }

    /// Add a definition. An existing entry with the same type keeps its palette slot.
    pub fn insert(&mut self, def: TypeDefinition) -> SchemaResult<()> {
        def.validate()?;
        self.insert_unchecked(def);
        Ok(())
    }

    fn insert_unchecked(&mut self, def: TypeDefinition) {
        match self.index.get(&def.component_type) {
            Some(&slot) => self.definitions[slot] = def,
            None => {
                self.index
                    .insert(def.component_type.clone(), self.definitions.len());
                self.definitions.push(def);
            }
        }
    }

    /// Find the definition of a type. `None` means the type is unknown.
    pub fn lookup(&self, component_type: &str) -> Option<&TypeDefinition> {
        self.index
            .get(component_type)
            .map(|&slot| &self.definitions[slot])
    }

    pub fn contains(&self, component_type: &str) -> bool {
        self.index.contains_key(component_type)
    }

    /// Whether nodes of this type may receive children. Unknown types never do.
    pub fn accepts_children(&self, component_type: &str) -> bool {
        self.lookup(component_type)
            .map(TypeDefinition::accepts_children)
            .unwrap_or(false)
    }

    /// Whether nodes of this type may sit at the page root. Unknown types may.
    pub fn allows_root(&self, component_type: &str) -> bool {
        self.lookup(component_type)
            .map(TypeDefinition::allows_root)
            .unwrap_or(true)
    }

    pub fn definitions(&self) -> impl Iterator<Item = &TypeDefinition> {
        self.definitions.iter()
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}
