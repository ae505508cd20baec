use crate::diagnostic::Diagnostic;
use crate::rules::RuleRegistry;
use pagecraft_model::{walk_node, ComponentNode, Document, NodeContext, Visitor};
use pagecraft_schema::Registry;
use tracing::debug;

/// Options for configuring the linter
#[derive(Debug, Default)]
pub struct LintOptions {
    /// Custom rule registry (uses default if None)
    pub rules: Option<RuleRegistry>,
}

/// Lint a page against the type registry and return diagnostics
pub fn lint_document(document: &Document, schema: &Registry, options: LintOptions) -> Vec<Diagnostic> {
    let rules = options.rules.unwrap_or_default();
    let mut diagnostics = Vec::new();

    for rule in rules.rules() {
        diagnostics.extend(rule.check_document(document, schema));
    }

    let mut visitor = NodeLinter {
        rules: &rules,
        schema,
        diagnostics: Vec::new(),
    };
    visitor.visit_document(document);
    diagnostics.extend(visitor.diagnostics);

    debug!(
        nodes = document.node_count(),
        diagnostics = diagnostics.len(),
        "Linted page"
    );
    diagnostics
}

/// Runs every node-level rule on each node, parent before children
struct NodeLinter<'r> {
    rules: &'r RuleRegistry,
    schema: &'r Registry,
    diagnostics: Vec<Diagnostic>,
}

impl Visitor for NodeLinter<'_> {
    fn visit_node<'a>(&mut self, node: &'a ComponentNode, ctx: NodeContext<'a>) {
        for rule in self.rules.rules() {
            self.diagnostics.extend(rule.check_node(node, ctx, self.schema));
        }
        walk_node(self, node, ctx);
    }
}
