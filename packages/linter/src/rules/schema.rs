use crate::diagnostic::Diagnostic;
use crate::rules::LintRule;
use pagecraft_model::{ComponentNode, NodeContext};
use pagecraft_schema::Registry;

/// Node types should be registered
pub struct UnknownTypeRule;

impl LintRule for UnknownTypeRule {
    fn name(&self) -> &'static str {
        "unknown-type"
    }

    fn description(&self) -> &'static str {
        "Warn about nodes whose type is not in the registry"
    }

    fn check_node(&self, node: &ComponentNode, _ctx: NodeContext<'_>, schema: &Registry) -> Vec<Diagnostic> {
        if schema.contains(&node.component_type) {
            return Vec::new();
        }

        vec![Diagnostic::warning(
            "unknown-type",
            format!(
                "'{}' has unknown type '{}'; it is kept but cannot be edited or receive drops",
                node.id, node.component_type
            ),
            node.id.clone(),
        )
        .with_suggestion("Register the type through a schema file listed in schemaPaths")]
    }
}

/// Own props should be keys of the type's schema
pub struct UnknownPropRule;

impl LintRule for UnknownPropRule {
    fn name(&self) -> &'static str {
        "unknown-prop"
    }

    fn description(&self) -> &'static str {
        "Warn about props that the node type's schema does not declare"
    }

    fn check_node(&self, node: &ComponentNode, _ctx: NodeContext<'_>, schema: &Registry) -> Vec<Diagnostic> {
        let Some(def) = schema.lookup(&node.component_type) else {
            return Vec::new();
        };

        node.props
            .keys()
            .filter(|key| def.get_prop(key).is_none())
            .map(|key| {
                Diagnostic::warning(
                    "unknown-prop",
                    format!("'{}' ({}) sets undeclared prop '{}'", node.id, def.label, key),
                    node.id.clone(),
                )
                .with_suggestion(format!("Remove '{}' or add it to the '{}' schema", key, def.component_type))
            })
            .collect()
    }
}

/// Select props should hold one of their options
pub struct InvalidOptionRule;

impl LintRule for InvalidOptionRule {
    fn name(&self) -> &'static str {
        "invalid-option"
    }

    fn description(&self) -> &'static str {
        "Warn about select props set to a value outside their options"
    }

    fn check_node(&self, node: &ComponentNode, _ctx: NodeContext<'_>, schema: &Registry) -> Vec<Diagnostic> {
        let Some(def) = schema.lookup(&node.component_type) else {
            return Vec::new();
        };

        let mut diagnostics = Vec::new();

        for (key, value) in &node.props {
            let Some(prop) = def.get_prop(key) else {
                continue;
            };
            if value.is_empty() || prop.allows(value) {
                continue;
            }

            let options = prop.options.as_deref().unwrap_or_default().join(", ");
            diagnostics.push(
                Diagnostic::warning(
                    "invalid-option",
                    format!("'{}' has {}='{}', which is not one of its options", node.id, key, value),
                    node.id.clone(),
                )
                .with_suggestion(format!("Use one of: {}", options)),
            );
        }

        diagnostics
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> NodeContext<'static> {
        NodeContext {
            depth: 0,
            parent: None,
            index: 0,
        }
    }

    #[test]
    fn test_detects_unknown_type() {
        let node = ComponentNode::new("x", "carousel");
        let diagnostics = UnknownTypeRule.check_node(&node, ctx(), &Registry::builtin());

        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].rule, "unknown-type");
        assert!(!diagnostics[0].is_error());
    }

    #[test]
    fn test_detects_unknown_prop() {
        let node = ComponentNode::new("b", "button")
            .with_prop("text", "Go")
            .with_prop("href", "/home");

        let diagnostics = UnknownPropRule.check_node(&node, ctx(), &Registry::builtin());
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].message.contains("href"));
    }

    #[test]
    fn test_detects_invalid_option() {
        let node = ComponentNode::new("d", "div")
            .with_prop("padding", "p-5")
            .with_prop("display", "flex")
            .with_prop("margin", "");

        let diagnostics = InvalidOptionRule.check_node(&node, ctx(), &Registry::builtin());
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].message.contains("padding='p-5'"));
        assert!(diagnostics[0].suggestion.as_deref().unwrap().contains("p-8"));
    }

    #[test]
    fn test_free_text_props_are_not_checked() {
        let node = ComponentNode::new("h", "h1").with_prop("color", "not a color");
        assert!(InvalidOptionRule
            .check_node(&node, ctx(), &Registry::builtin())
            .is_empty());
    }
}
