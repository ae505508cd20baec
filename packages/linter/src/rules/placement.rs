use crate::diagnostic::Diagnostic;
use crate::rules::LintRule;
use pagecraft_model::{ComponentNode, NodeContext};
use pagecraft_schema::Registry;

/// Only children-accepting types may have children
pub struct ChildrenNotAcceptedRule;

impl LintRule for ChildrenNotAcceptedRule {
    fn name(&self) -> &'static str {
        "children-not-accepted"
    }

    fn description(&self) -> &'static str {
        "Disallow children under types whose schema does not accept them"
    }

    fn check_node(&self, node: &ComponentNode, _ctx: NodeContext<'_>, schema: &Registry) -> Vec<Diagnostic> {
        let def = match schema.lookup(&node.component_type) {
            Some(def) => def,
            // unknown-type covers these
            None => return Vec::new(),
        };

        if def.accepts_children() || !node.has_children() {
            return Vec::new();
        }

        vec![Diagnostic::error(
            "children-not-accepted",
            format!(
                "'{}' ({}) does not accept children but has {}",
                node.id,
                def.label,
                node.children.len()
            ),
            node.id.clone(),
        )
        .with_suggestion(format!(
            "Move the children of '{}' into a container such as a div or section",
            node.id
        ))]
    }
}

/// Types with `allowRoot = false` must be nested
pub struct RootNotAllowedRule;

impl LintRule for RootNotAllowedRule {
    fn name(&self) -> &'static str {
        "root-not-allowed"
    }

    fn description(&self) -> &'static str {
        "Disallow root placement of types that must be nested"
    }

    fn check_node(&self, node: &ComponentNode, ctx: NodeContext<'_>, schema: &Registry) -> Vec<Diagnostic> {
        if !ctx.is_root() || schema.allows_root(&node.component_type) {
            return Vec::new();
        }

        vec![Diagnostic::error(
            "root-not-allowed",
            format!("'{}' of type '{}' may not sit at the page root", node.id, node.component_type),
            node.id.clone(),
        )
        .with_suggestion("Nest it inside a container")]
    }
}
