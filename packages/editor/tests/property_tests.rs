//! Property-based invariant tests for tree operations.
//!
//! 1. Ids stay unique under any sequence of session inserts.
//! 2. A removed id can never be found again.
//! 3. Removing an absent id returns an equal tree.
//! 4. A successful move keeps the moved node's children intact.
//! 5. Rejected moves (self-drop, leaf target, own descendant) leave the tree equal.
//! 6. Export then import yields an equal page.

use pagecraft_editor::tree::{self, Destination};
use pagecraft_editor::{ComponentNode, Document, EditSession, PageDocument, Registry};
use pagecraft_model::{deserialize, serialize};
use proptest::prelude::*;
use std::collections::HashSet;

// ── Helpers ─────────────────────────────────────────────────────────────

const TYPES: &[&str] = &["div", "section", "h1", "p", "button", "image", "span"];

fn type_strategy() -> impl Strategy<Value = String> {
    prop::sample::select(TYPES).prop_map(str::to_string)
}

fn prop_value_strategy() -> impl Strategy<Value = String> {
    prop_oneof![Just(String::new()), "#[0-9a-f]{6}", "[a-z]{1,8}"]
}

/// Random tree shape; ids are assigned afterwards so they are unique
fn shape_strategy() -> impl Strategy<Value = Vec<ComponentNode>> {
    let leaf = (type_strategy(), prop::collection::btree_map("[a-zA-Z]{1,6}", prop_value_strategy(), 0..3))
        .prop_map(|(ty, props)| ComponentNode::new("", ty).with_props(props));

    let node = leaf.prop_recursive(4, 32, 4, |inner| {
        (type_strategy(), prop::collection::vec(inner, 0..4))
            .prop_map(|(ty, children)| ComponentNode::new("", ty).with_children(children))
    });

    prop::collection::vec(node, 0..5)
}

fn number_ids(nodes: &mut [ComponentNode], next: &mut usize) {
    for node in nodes {
        node.id = format!("n{}", next);
        *next += 1;
        number_ids(&mut node.children, next);
    }
}

fn tree_strategy() -> impl Strategy<Value = Vec<ComponentNode>> {
    shape_strategy().prop_map(|mut nodes| {
        let mut next = 0;
        number_ids(&mut nodes, &mut next);
        nodes
    })
}

fn all_ids(tree: &[ComponentNode]) -> Vec<String> {
    let mut ids = Vec::new();
    for node in tree {
        ids.extend(node.subtree().map(|n| n.id.clone()));
    }
    ids
}

/// Pick an index into a non-empty list of ids
fn pick(ids: &[String], seed: usize) -> Option<String> {
    if ids.is_empty() {
        None
    } else {
        Some(ids[seed % ids.len()].clone())
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Uniqueness
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn inserted_ids_are_unique(ops in prop::collection::vec((type_strategy(), any::<usize>(), any::<bool>()), 1..40)) {
        let mut session = EditSession::new("prop", Document::new("p.json"), Registry::builtin());

        for (ty, seed, at_root) in ops {
            let ids = all_ids(session.components());
            let destination = match pick(&ids, seed) {
                Some(id) if !at_root => Destination::Node(id),
                _ => Destination::Root,
            };
            session.add_component(&ty, destination);
        }

        let ids = all_ids(session.components());
        let unique: HashSet<_> = ids.iter().collect();
        prop_assert_eq!(unique.len(), ids.len(), "duplicate ids in {:?}", ids);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2-3. Remove
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn removed_id_is_never_found(tree in tree_strategy(), seed in any::<usize>()) {
        let ids = all_ids(&tree);
        if let Some(id) = pick(&ids, seed) {
            let after = tree::remove(&tree, &id);
            prop_assert!(tree::find(&after, &id).is_none());
        }
        prop_assert!(tree::find(&tree::remove(&tree, "absent"), "absent").is_none());
    }

    #[test]
    fn removing_absent_id_is_identity(tree in tree_strategy()) {
        prop_assert_eq!(tree::remove(&tree, "absent"), tree);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4-5. Move
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn move_preserves_subtree(tree in tree_strategy(), a in any::<usize>(), b in any::<usize>(), to_root in any::<bool>()) {
        let registry = Registry::builtin();
        let ids = all_ids(&tree);
        let (Some(id), Some(target)) = (pick(&ids, a), pick(&ids, b)) else {
            return Ok(());
        };
        let destination = if to_root { Destination::Root } else { Destination::Node(target) };
        let before = tree::find(&tree, &id).cloned();

        match tree::try_move(&tree, &id, &destination, &registry) {
            Ok(moved) => {
                let after = tree::find(&moved, &id);
                prop_assert_eq!(
                    after.map(|n| &n.children),
                    before.as_ref().map(|n| &n.children)
                );
                prop_assert_eq!(all_ids(&moved).len(), ids.len());
            }
            Err(_) => {
                prop_assert_eq!(tree::move_node(&tree, &id, &destination, &registry), tree);
            }
        }
    }

    #[test]
    fn rejected_moves_leave_tree_equal(tree in tree_strategy(), seed in any::<usize>()) {
        let registry = Registry::builtin();
        let ids = all_ids(&tree);
        let Some(id) = pick(&ids, seed) else {
            return Ok(());
        };

        let to_self = tree::move_node(&tree, &id, &Destination::Node(id.clone()), &registry);
        prop_assert_eq!(&to_self, &tree);

        for leaf in tree.iter().flat_map(|n| n.subtree()).filter(|n| n.component_type == "image") {
            if leaf.id != id {
                let moved = tree::move_node(&tree, &id, &Destination::Node(leaf.id.clone()), &registry);
                prop_assert_eq!(&moved, &tree);
            }
        }

        let node = tree::find(&tree, &id).cloned();
        if let Some(node) = node {
            for descendant in node.subtree().skip(1) {
                let moved = tree::move_node(&tree, &id, &Destination::Node(descendant.id.clone()), &registry);
                prop_assert_eq!(&moved, &tree);
            }
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 6. Round trip
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn export_import_round_trip(tree in tree_strategy(), title in "[ -~]{0,20}") {
        let mut page = PageDocument::default().with_components(tree);
        page.title = title;

        let text = serialize(&page).unwrap();
        let back = deserialize(&text).unwrap();
        prop_assert_eq!(back, page);
    }
}
