use crate::document::Document;
use crate::node::ComponentNode;

/// Where a node sits while it is being visited
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeContext<'a> {
    /// 0 for root-level nodes
    pub depth: usize,

    /// `None` for root-level nodes
    pub parent: Option<&'a ComponentNode>,

    /// Position among siblings
    pub index: usize,
}

impl<'a> NodeContext<'a> {
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}

/// Visitor pattern for traversing the component tree immutably
///
/// Default implementations walk the entire tree, parent before children.
/// Override `visit_node` to act on nodes; call `walk_node` to keep descending.
pub trait Visitor: Sized {
    fn visit_document(&mut self, doc: &Document) {
        walk_document(self, doc);
    }

    fn visit_node<'a>(&mut self, node: &'a ComponentNode, ctx: NodeContext<'a>) {
        walk_node(self, node, ctx);
    }
}

pub fn walk_document<V: Visitor>(visitor: &mut V, doc: &Document) {
    for (index, node) in doc.components.iter().enumerate() {
        visitor.visit_node(
            node,
            NodeContext {
                depth: 0,
                parent: None,
                index,
            },
        );
    }
}

pub fn walk_node<'a, V: Visitor>(visitor: &mut V, node: &'a ComponentNode, ctx: NodeContext<'a>) {
    for (index, child) in node.children.iter().enumerate() {
        visitor.visit_node(
            child,
            NodeContext {
                depth: ctx.depth + 1,
                parent: Some(node),
                index,
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Collect(Vec<(String, usize, Option<String>)>);

    impl Visitor for Collect {
        fn visit_node<'a>(&mut self, node: &'a ComponentNode, ctx: NodeContext<'a>) {
            self.0.push((
                node.id.clone(),
                ctx.depth,
                ctx.parent.map(|p| p.id.clone()),
            ));
            walk_node(self, node, ctx);
        }
    }

    #[test]
    fn test_visit_order_and_context() {
        let doc = Document::blank().with_components(vec![
            ComponentNode::new("a", "div").with_child(ComponentNode::new("b", "p")),
            ComponentNode::new("c", "h1"),
        ]);

        let mut visitor = Collect(Vec::new());
        visitor.visit_document(&doc);

        assert_eq!(
            visitor.0,
            vec![
                ("a".to_string(), 0, None),
                ("b".to_string(), 1, Some("a".to_string())),
                ("c".to_string(), 0, None),
            ]
        );
    }
}
