//! Property tests for navigation, selection and roving tab stop invariants.

mod common;

use std::sync::Arc;
use std::time::Duration;

use common::{TestItem, item, key};
use itemnav::{
    ActiveItemTracker, Item, ItemRegistry, Key, ManualClock, NavConfig, RovingTabIndex,
    SelectionCoordinator, TypeaheadMatcher,
};
use proptest::prelude::*;

/// Items named by position, disabled where `flags` is true.
fn flagged(flags: &[bool]) -> Vec<Arc<TestItem>> {
    flags
        .iter()
        .enumerate()
        .map(|(i, &disabled)| {
            let item = item(&format!("item {i}"));
            item.set_disabled(disabled);
            item
        })
        .collect()
}

fn nav_key() -> impl Strategy<Value = Key> {
    prop_oneof![
        Just(Key::Up),
        Just(Key::Down),
        Just(Key::Home),
        Just(Key::End),
        Just(Key::PageUp),
        Just(Key::PageDown),
    ]
}

#[derive(Debug, Clone)]
enum SelectionOp {
    Select(usize),
    Toggle(usize),
    Deselect(usize),
    External(usize, bool),
}

fn selection_op(len: usize) -> impl Strategy<Value = SelectionOp> {
    prop_oneof![
        (0..len).prop_map(SelectionOp::Select),
        (0..len).prop_map(SelectionOp::Toggle),
        (0..len).prop_map(SelectionOp::Deselect),
        (0..len, any::<bool>()).prop_map(|(i, selected)| SelectionOp::External(i, selected)),
    ]
}

#[derive(Debug, Clone)]
enum RovingOp {
    Press(Key),
    Replace(Vec<bool>),
}

fn roving_op(pool: usize) -> impl Strategy<Value = RovingOp> {
    prop_oneof![
        3 => nav_key().prop_map(RovingOp::Press),
        1 => prop::collection::vec(any::<bool>(), pool).prop_map(RovingOp::Replace),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// With wrap on, pressing Down once per reachable item comes back around.
    #[test]
    fn wrap_returns_to_start(flags in prop::collection::vec(any::<bool>(), 1..16)) {
        prop_assume!(flags.iter().any(|disabled| !disabled));
        let tracker = ActiveItemTracker::new(NavConfig::new().with_wrap(true));
        tracker.set_items(flagged(&flags));
        tracker.on_key_down(&key(Key::Down));
        let start = tracker.active_index();

        let reachable = flags.iter().filter(|disabled| !**disabled).count();
        for _ in 0..reachable {
            tracker.on_key_down(&key(Key::Down));
        }
        prop_assert_eq!(tracker.active_index(), start);
    }

    /// Keyboard navigation never lands on a skippable item.
    #[test]
    fn navigation_respects_skip(
        flags in prop::collection::vec(any::<bool>(), 0..16),
        wrap in any::<bool>(),
        keys in prop::collection::vec(nav_key(), 0..32),
    ) {
        let config = NavConfig::listbox().with_wrap(wrap).with_page_size(3);
        let tracker = ActiveItemTracker::new(config);
        tracker.set_items(flagged(&flags));

        for pressed in keys {
            tracker.on_key_down(&key(pressed));
            if let Some(active) = tracker.active_item() {
                prop_assert!(!active.is_disabled());
            }
        }
    }

    /// Single selection never holds more than one item.
    #[test]
    fn single_selection_is_exclusive(
        ops in (1usize..8).prop_flat_map(|len| {
            (Just(len), prop::collection::vec(selection_op(len), 0..32))
        }),
    ) {
        let (len, ops) = ops;
        let list = flagged(&vec![false; len]);
        let selection = SelectionCoordinator::single();
        selection.set_items(list.clone());

        for op in ops {
            match op {
                SelectionOp::Select(i) => { selection.select(&list[i]); }
                SelectionOp::Toggle(i) => { selection.toggle(&list[i]); }
                SelectionOp::Deselect(i) => { selection.deselect(&list[i]); }
                SelectionOp::External(i, selected) => {
                    list[i].set_selected_externally(selected);
                    selection.notify_selection_change(&list[i]);
                }
            }
            prop_assert!(selection.selected_items().len() <= 1);
        }
    }

    /// At most one registered item is a tab stop, whatever the keys and
    /// registry churn.
    #[test]
    fn roving_tab_stop_is_unique(
        ops in (1usize..10).prop_flat_map(|pool| {
            (
                prop::collection::vec(any::<bool>(), pool),
                prop::collection::vec(roving_op(pool), 0..24),
            )
        }),
    ) {
        let (flags, ops) = ops;
        let pool = flagged(&flags);
        let roving = RovingTabIndex::new(ActiveItemTracker::new(NavConfig::listbox()));
        roving.set_items(pool.clone());

        for op in ops {
            match op {
                RovingOp::Press(pressed) => { roving.on_key_down(&key(pressed)); }
                RovingOp::Replace(keep) => {
                    let subset = pool
                        .iter()
                        .zip(keep)
                        .filter(|(_, keep)| *keep)
                        .map(|(item, _)| Arc::clone(item))
                        .collect();
                    roving.set_items(subset);
                }
            }
            let stops = roving.items().iter().filter(|item| item.is_tab_stop()).count();
            prop_assert!(stops <= 1);
            if roving.items().iter().any(|item| !item.is_disabled()) {
                prop_assert_eq!(stops, 1);
            }
        }
    }

    /// Presses separated by more than the timeout behave like fresh searches.
    #[test]
    fn typeahead_after_timeout_is_fresh(
        labels in prop::collection::vec("[a-c][a-z]{0,3}", 1..10),
        c in prop::sample::select(vec!['a', 'b', 'c']),
        presses in 1usize..6,
    ) {
        let list: Vec<_> = labels.iter().map(|label| item(label)).collect();
        let clock = Arc::new(ManualClock::new());
        let timeout = Duration::from_millis(500);
        let mut matcher = TypeaheadMatcher::with_clock(timeout, clock.clone());

        let mut start = None;
        for _ in 0..presses {
            clock.advance(timeout + Duration::from_millis(1));
            let found = matcher.type_char(c, &list, start);
            let fresh = TypeaheadMatcher::new(timeout).type_char(c, &list, start);
            prop_assert_eq!(found, fresh);
            prop_assert_eq!(matcher.buffer(), c.to_string());
            start = found.or(start);
        }
    }

    /// Duplicate handles collapse to their first occurrence; strict
    /// replacement refuses them and keeps the old items.
    #[test]
    fn duplicates_keep_first_occurrence(
        picks in prop::collection::vec(0usize..5, 0..12),
    ) {
        let pool = flagged(&[false; 5]);
        let sequence: Vec<_> = picks.iter().map(|&i| Arc::clone(&pool[i])).collect();

        let mut expected: Vec<usize> = Vec::new();
        for &i in &picks {
            if !expected.contains(&i) {
                expected.push(i);
            }
        }

        let mut lenient = ItemRegistry::new();
        lenient.set_items(sequence.clone());
        prop_assert_eq!(lenient.len(), expected.len());
        for (slot, &i) in expected.iter().enumerate() {
            prop_assert!(Arc::ptr_eq(&lenient.items()[slot], &pool[i]));
        }

        let mut strict = ItemRegistry::new();
        strict.set_items(vec![Arc::clone(&pool[0])]);
        let result = strict.try_set_items(sequence);
        prop_assert_eq!(result.is_err(), expected.len() != picks.len());
        if result.is_err() {
            prop_assert_eq!(strict.len(), 1);
        }
    }
}
