mod common;

use std::sync::Arc;

use common::{TestItem, item, items, labels};
use itemnav::{ItemRegistry, RegistryError};

// ============================================================================
// Replacement diffs
// ============================================================================

#[test]
fn test_first_set_adds_everything() {
    let mut registry = ItemRegistry::new();
    let abc = items(&["a", "b", "c"]);

    let diff = registry.set_items(abc.clone());

    assert_eq!(labels(&diff.added), vec!["a", "b", "c"]);
    assert!(diff.removed.is_empty());
    assert_eq!(registry.len(), 3);
}

#[test]
fn test_diff_follows_sequence_order() {
    let mut registry = ItemRegistry::new();
    let [a, b, c, d, e] = ["a", "b", "c", "d", "e"].map(item);
    registry.set_items(vec![a.clone(), b.clone(), c.clone()]);

    let diff = registry.set_items(vec![e.clone(), b.clone(), d.clone()]);

    // added in new order, removed in old order
    assert_eq!(labels(&diff.added), vec!["e", "d"]);
    assert_eq!(labels(&diff.removed), vec!["a", "c"]);
    assert_eq!(labels(registry.items()), vec!["e", "b", "d"]);
}

#[test]
fn test_reorder_is_not_a_change() {
    let mut registry = ItemRegistry::new();
    let abc = items(&["a", "b", "c"]);
    registry.set_items(abc.clone());

    let diff = registry.set_items(vec![abc[2].clone(), abc[0].clone(), abc[1].clone()]);

    assert!(diff.is_empty());
    assert_eq!(registry.index_of(&abc[2]), Some(0));
}

#[test]
fn test_identity_not_label() {
    let mut registry = ItemRegistry::new();
    let first = item("same");
    let second = item("same");
    registry.set_items(vec![first.clone()]);

    let diff = registry.set_items(vec![second.clone()]);

    assert!(Arc::ptr_eq(&diff.added[0], &second));
    assert!(Arc::ptr_eq(&diff.removed[0], &first));
}

#[test]
fn test_clear_removes_everything() {
    let mut registry = ItemRegistry::new();
    registry.set_items(items(&["a", "b"]));

    let diff = registry.set_items(Vec::new());

    assert_eq!(labels(&diff.removed), vec!["a", "b"]);
    assert!(registry.is_empty());
}

// ============================================================================
// Duplicates
// ============================================================================

#[test]
fn test_duplicates_keep_first_position() {
    let mut registry: ItemRegistry<TestItem> = ItemRegistry::new();
    let [a, b] = ["a", "b"].map(item);

    let diff = registry.set_items(vec![a.clone(), b.clone(), a.clone()]);

    assert_eq!(labels(registry.items()), vec!["a", "b"]);
    assert_eq!(labels(&diff.added), vec!["a", "b"]);
}

#[test]
fn test_strict_set_rejects_duplicates_unchanged() {
    let mut registry = ItemRegistry::new();
    let [a, b, c] = ["a", "b", "c"].map(item);
    registry.set_items(vec![c.clone()]);

    let result = registry.try_set_items(vec![a.clone(), b.clone(), a.clone()]);

    assert_eq!(
        result.map(|_| ()),
        Err(RegistryError::DuplicateItem { index: 2 })
    );
    assert_eq!(labels(registry.items()), vec!["c"]);
}

#[test]
fn test_strict_set_accepts_unique() {
    let mut registry = ItemRegistry::new();
    let result = registry.try_set_items(items(&["a", "b"]));
    assert_eq!(result.map(|diff| diff.added.len()), Ok(2));
}
