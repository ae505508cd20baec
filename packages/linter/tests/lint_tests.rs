use pagecraft_linter::{
    has_errors, lint_document, Diagnostic, DiagnosticLevel, LintOptions, LintRule, RuleRegistry,
};
use pagecraft_model::{deserialize, ComponentNode, Document, NodeContext};
use pagecraft_schema::Registry;

fn rules_of(diagnostics: &[Diagnostic]) -> Vec<&str> {
    let mut rules: Vec<_> = diagnostics.iter().map(|d| d.rule.as_str()).collect();
    rules.sort_unstable();
    rules
}

#[test]
fn test_clean_page_has_no_diagnostics() {
    let doc = Document::default().with_components(vec![ComponentNode::new("s", "section")
        .with_prop("padding", "p-12")
        .with_child(ComponentNode::new("h", "h1").with_prop("text", "Hello"))]);

    let diagnostics = lint_document(&doc, &Registry::builtin(), LintOptions::default());
    assert!(diagnostics.is_empty(), "{:?}", diagnostics);
}

#[test]
fn test_imported_page_with_problems() {
    let text = r#"{
        "title": "Broken",
        "components": [
            {
                "id": "img",
                "type": "image",
                "props": { "src": "/a.png" },
                "children": [ { "id": "dup", "type": "span", "props": {}, "children": [] } ]
            },
            { "id": "dup", "type": "p", "props": { "textAlign": "middle" }, "children": [] },
            { "id": "", "type": "carousel", "props": {}, "children": [] }
        ]
    }"#;
    let doc = deserialize(text).unwrap();

    let diagnostics = lint_document(&doc, &Registry::builtin(), LintOptions::default());
    assert_eq!(
        rules_of(&diagnostics),
        vec![
            "children-not-accepted",
            "duplicate-id",
            "empty-id",
            "invalid-option",
            "unknown-type"
        ]
    );
    assert!(has_errors(&diagnostics));
}

#[test]
fn test_warnings_alone_are_not_errors() {
    let doc = Document::default()
        .with_components(vec![ComponentNode::new("b", "button").with_prop("target", "_blank")]);

    let diagnostics = lint_document(&doc, &Registry::builtin(), LintOptions::default());
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].level, DiagnosticLevel::Warning);
    assert!(!has_errors(&diagnostics));
}

#[test]
fn test_rules_can_be_disabled() {
    let doc = Document::default().with_components(vec![ComponentNode::new("x", "carousel")]);

    let options = LintOptions {
        rules: Some(RuleRegistry::new().without(&["unknown-type"])),
    };
    assert!(lint_document(&doc, &Registry::builtin(), options).is_empty());
}

struct MaxDepthRule(usize);

impl LintRule for MaxDepthRule {
    fn name(&self) -> &'static str {
        "max-depth"
    }

    fn description(&self) -> &'static str {
        "Limit nesting depth"
    }

    fn check_node(&self, node: &ComponentNode, ctx: NodeContext<'_>, _schema: &Registry) -> Vec<Diagnostic> {
        if ctx.depth > self.0 {
            vec![Diagnostic::warning("max-depth", "Nested too deep", node.id.clone())]
        } else {
            Vec::new()
        }
    }
}

#[test]
fn test_custom_rule() {
    let doc = Document::default().with_components(vec![ComponentNode::new("a", "div")
        .with_child(ComponentNode::new("b", "div").with_child(ComponentNode::new("c", "p")))]);

    let mut rules = RuleRegistry::empty();
    rules.add_rule(Box::new(MaxDepthRule(1)));

    let diagnostics = lint_document(
        &doc,
        &Registry::builtin(),
        LintOptions { rules: Some(rules) },
    );
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].node_id.as_deref(), Some("c"));
}

#[test]
fn test_diagnostic_json_shape() {
    let diagnostic = Diagnostic::error("duplicate-id", "dup", "n1").with_suggestion("rename");
    let json = serde_json::to_value(&diagnostic).unwrap();

    assert_eq!(json["level"], "error");
    assert_eq!(json["nodeId"], "n1");
    assert_eq!(json["suggestion"], "rename");
}
