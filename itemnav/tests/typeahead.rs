mod common;

use std::sync::Arc;
use std::time::Duration;

use common::{disabled, item, items};
use itemnav::{ManualClock, TypeaheadMatcher};

fn matcher() -> (TypeaheadMatcher, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new());
    let matcher = TypeaheadMatcher::with_clock(Duration::from_millis(500), clock.clone());
    (matcher, clock)
}

// ============================================================================
// Matching
// ============================================================================

#[test]
fn test_prefix_match_case_insensitive() {
    let (mut matcher, _clock) = matcher();
    let fruit = items(&["Apple", "Banana", "Cherry"]);

    assert_eq!(matcher.type_char('c', &fruit, None), Some(2));
}

#[test]
fn test_scan_starts_after_start_index() {
    let (mut matcher, _clock) = matcher();
    let fruit = items(&["Banana", "Apple", "Blueberry"]);

    assert_eq!(matcher.type_char('b', &fruit, Some(0)), Some(2));
}

#[test]
fn test_scan_wraps_to_start() {
    let (mut matcher, _clock) = matcher();
    let fruit = items(&["Banana", "Apple", "Cherry"]);

    assert_eq!(matcher.type_char('b', &fruit, Some(1)), Some(0));
}

#[test]
fn test_start_item_is_last_candidate() {
    let (mut matcher, _clock) = matcher();
    let fruit = items(&["Apple", "Banana", "Cherry"]);

    assert_eq!(matcher.type_char('b', &fruit, Some(1)), Some(1));
}

#[test]
fn test_multi_char_query_refines() {
    let (mut matcher, clock) = matcher();
    let fruit = items(&["Blackberry", "Blueberry", "Banana"]);

    assert_eq!(matcher.type_char('b', &fruit, None), Some(0));
    clock.advance(Duration::from_millis(100));
    assert_eq!(matcher.type_char('l', &fruit, Some(0)), Some(1));
    clock.advance(Duration::from_millis(100));
    assert_eq!(matcher.type_char('a', &fruit, Some(1)), Some(0));
    assert_eq!(matcher.buffer(), "bla");
}

#[test]
fn test_skippable_items_passed_over() {
    let (mut matcher, _clock) = matcher();
    let fruit = vec![item("Apple"), disabled("Banana"), item("Blueberry")];

    assert_eq!(matcher.type_char('b', &fruit, Some(0)), Some(2));
}

#[test]
fn test_hidden_items_passed_over() {
    let (mut matcher, _clock) = matcher();
    let fruit = items(&["Apple", "Banana"]);
    fruit[1].set_hidden(true);

    assert_eq!(matcher.type_char('b', &fruit, Some(0)), None);
}

#[test]
fn test_custom_skip_rule() {
    let (mut matcher, _clock) = matcher();
    let fruit = vec![item("Apple"), disabled("Banana")];

    let found = matcher.type_char_with('b', &fruit, None, |_| false);
    assert_eq!(found, Some(1));
}

// ============================================================================
// Buffer lifecycle
// ============================================================================

#[test]
fn test_empty_candidates() {
    let (mut matcher, _clock) = matcher();
    let fruit = items(&[]);

    assert_eq!(matcher.type_char('a', &fruit, None), None);
}

#[test]
fn test_no_match_keeps_buffer() {
    let (mut matcher, clock) = matcher();
    let fruit = items(&["Apple", "Avocado"]);

    assert_eq!(matcher.type_char('a', &fruit, None), Some(0));
    clock.advance(Duration::from_millis(100));
    assert_eq!(matcher.type_char('x', &fruit, Some(0)), None);
    assert_eq!(matcher.buffer(), "ax");
}

#[test]
fn test_repeated_char_cycles() {
    let (mut matcher, clock) = matcher();
    let fruit = items(&["Banana", "Apple", "Blueberry", "Boysenberry"]);

    let mut active = matcher.type_char('b', &fruit, None);
    assert_eq!(active, Some(0));
    clock.advance(Duration::from_millis(100));
    active = matcher.type_char('b', &fruit, active);
    assert_eq!(active, Some(2));
    clock.advance(Duration::from_millis(100));
    active = matcher.type_char('b', &fruit, active);
    assert_eq!(active, Some(3));
    clock.advance(Duration::from_millis(100));
    active = matcher.type_char('b', &fruit, active);
    assert_eq!(active, Some(0));
    assert_eq!(matcher.buffer(), "bbbb");
}

#[test]
fn test_timeout_restarts_query() {
    let (mut matcher, clock) = matcher();
    let fruit = items(&["Apple", "Banana"]);

    assert_eq!(matcher.type_char('a', &fruit, None), Some(0));
    clock.advance(Duration::from_millis(600));
    assert_eq!(matcher.type_char('b', &fruit, Some(0)), Some(1));
    assert_eq!(matcher.buffer(), "b");
}

#[test]
fn test_reset_clears_buffer() {
    let (mut matcher, _clock) = matcher();
    let fruit = items(&["Apple"]);

    matcher.type_char('a', &fruit, None);
    matcher.reset();
    assert_eq!(matcher.buffer(), "");
}

#[test]
fn test_pending_until_timeout() {
    let (mut matcher, clock) = matcher();
    let fruit = items(&["Apple"]);
    assert!(!matcher.is_pending());

    matcher.type_char('a', &fruit, None);
    clock.advance(Duration::from_millis(500));
    assert!(matcher.is_pending());

    clock.advance(Duration::from_millis(1));
    assert!(!matcher.is_pending());
    assert_eq!(matcher.buffer(), "a");
}
