mod identity;
mod placement;
mod schema;

pub use identity::{DuplicateIdRule, EmptyIdRule};
pub use placement::{ChildrenNotAcceptedRule, RootNotAllowedRule};
pub use schema::{InvalidOptionRule, UnknownPropRule, UnknownTypeRule};

use crate::diagnostic::Diagnostic;
use pagecraft_model::{ComponentNode, Document, NodeContext};
use pagecraft_schema::Registry;

/// Trait for implementing lint rules
pub trait LintRule {
    /// Unique identifier for this rule
    fn name(&self) -> &'static str;

    /// Human-readable description
    fn description(&self) -> &'static str;

    /// Check the page as a whole
    fn check_document(&self, _doc: &Document, _schema: &Registry) -> Vec<Diagnostic> {
        Vec::new()
    }

    /// Check one node where it sits in the tree
    fn check_node(&self, _node: &ComponentNode, _ctx: NodeContext<'_>, _schema: &Registry) -> Vec<Diagnostic> {
        Vec::new()
    }
}

/// Registry of all available lint rules
pub struct RuleRegistry {
    rules: Vec<Box<dyn LintRule>>,
}

impl RuleRegistry {
    /// Create a new registry with all built-in rules
    pub fn new() -> Self {
        Self {
            rules: vec![
                Box::new(DuplicateIdRule),
                Box::new(EmptyIdRule),
                Box::new(ChildrenNotAcceptedRule),
                Box::new(RootNotAllowedRule),
                Box::new(UnknownTypeRule),
                Box::new(UnknownPropRule),
                Box::new(InvalidOptionRule),
            ],
        }
    }

    /// Get all registered rules
    pub fn rules(&self) -> &[Box<dyn LintRule>] {
        &self.rules
    }

    /// Create an empty registry
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// Add a custom rule to the registry
    pub fn add_rule(&mut self, rule: Box<dyn LintRule>) {
        self.rules.push(rule);
    }

    /// Drop the rules with the given names
    pub fn without(mut self, names: &[&str]) -> Self {
        self.rules.retain(|rule| !names.contains(&rule.name()));
        self
    }
}

impl Default for RuleRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for RuleRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleRegistry")
            .field("rules", &format!("{} rules", self.rules.len()))
            .finish()
    }
}
