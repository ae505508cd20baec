use crate::diagnostic::{Diagnostic, DiagnosticLevel};
use crate::rules::LintRule;
use pagecraft_model::{ComponentNode, Document, NodeContext};
use pagecraft_schema::Registry;
use std::collections::HashSet;

/// Every node id must occur once in the whole page
pub struct DuplicateIdRule;

impl LintRule for DuplicateIdRule {
    fn name(&self) -> &'static str {
        "duplicate-id"
    }

    fn description(&self) -> &'static str {
        "Disallow node ids that occur more than once in a page"
    }

    fn check_document(&self, doc: &Document, _schema: &Registry) -> Vec<Diagnostic> {
        let mut seen = HashSet::new();
        let mut reported = HashSet::new();
        let mut diagnostics = Vec::new();

        for node in doc.nodes().filter(|n| !n.id.is_empty()) {
            if !seen.insert(node.id.as_str()) && reported.insert(node.id.as_str()) {
                diagnostics.push(
                    Diagnostic::error(
                        "duplicate-id",
                        format!("Id '{}' is used by more than one node", node.id),
                        node.id.clone(),
                    )
                    .with_suggestion("Give each node its own id; lookups only ever reach the first match"),
                );
            }
        }

        diagnostics
    }
}

/// Nodes must carry an id
pub struct EmptyIdRule;

impl LintRule for EmptyIdRule {
    fn name(&self) -> &'static str {
        "empty-id"
    }

    fn description(&self) -> &'static str {
        "Disallow nodes without an id"
    }

    fn check_node(&self, node: &ComponentNode, ctx: NodeContext<'_>, _schema: &Registry) -> Vec<Diagnostic> {
        if !node.id.is_empty() {
            return Vec::new();
        }

        let location = match ctx.parent {
            Some(parent) => format!("child {} of '{}'", ctx.index, parent.id),
            None => format!("root node {}", ctx.index),
        };

        vec![Diagnostic::new(
            DiagnosticLevel::Error,
            "empty-id",
            format!("The '{}' node at {} has no id", node.component_type, location),
            None,
        )
        .with_suggestion("Re-add the component from the palette so it gets a fresh id")]
    }
}
