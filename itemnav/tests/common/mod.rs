//! Shared item fixture for integration tests.

#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use itemnav::{Item, Key, KeyCombo};

/// Item with observable flags and side-effect counters.
#[derive(Debug, Default)]
pub struct TestItem {
    pub name: String,
    disabled: AtomicBool,
    hidden: AtomicBool,
    selected: AtomicBool,
    tab_stop: AtomicBool,
    focus_count: AtomicUsize,
    tab_stop_writes: AtomicUsize,
}

impl TestItem {
    pub fn set_disabled(&self, disabled: bool) {
        self.disabled.store(disabled, Ordering::SeqCst);
    }

    pub fn set_hidden(&self, hidden: bool) {
        self.hidden.store(hidden, Ordering::SeqCst);
    }

    /// Change the selected flag directly, bypassing any coordinator.
    pub fn set_selected_externally(&self, selected: bool) {
        self.selected.store(selected, Ordering::SeqCst);
    }

    pub fn set_tab_stop_externally(&self, tab_stop: bool) {
        self.tab_stop.store(tab_stop, Ordering::SeqCst);
    }

    pub fn is_tab_stop(&self) -> bool {
        self.tab_stop.load(Ordering::SeqCst)
    }

    pub fn focus_count(&self) -> usize {
        self.focus_count.load(Ordering::SeqCst)
    }

    pub fn tab_stop_writes(&self) -> usize {
        self.tab_stop_writes.load(Ordering::SeqCst)
    }
}

impl Item for TestItem {
    fn label(&self) -> String {
        self.name.clone()
    }

    fn is_disabled(&self) -> bool {
        self.disabled.load(Ordering::SeqCst)
    }

    fn is_hidden(&self) -> bool {
        self.hidden.load(Ordering::SeqCst)
    }

    fn is_selected(&self) -> bool {
        self.selected.load(Ordering::SeqCst)
    }

    fn set_selected(&self, selected: bool) {
        self.selected.store(selected, Ordering::SeqCst);
    }

    fn focus(&self) {
        self.focus_count.fetch_add(1, Ordering::SeqCst);
    }

    fn set_tab_stop(&self, tab_stop: bool) {
        self.tab_stop.store(tab_stop, Ordering::SeqCst);
        self.tab_stop_writes.fetch_add(1, Ordering::SeqCst);
    }
}

pub fn item(name: &str) -> Arc<TestItem> {
    Arc::new(TestItem {
        name: name.to_string(),
        ..Default::default()
    })
}

pub fn disabled(name: &str) -> Arc<TestItem> {
    let item = item(name);
    item.set_disabled(true);
    item
}

pub fn selected(name: &str) -> Arc<TestItem> {
    let item = item(name);
    item.set_selected_externally(true);
    item
}

pub fn items(names: &[&str]) -> Vec<Arc<TestItem>> {
    names.iter().map(|name| item(name)).collect()
}

pub fn labels(items: &[Arc<TestItem>]) -> Vec<String> {
    items.iter().map(|item| item.name.clone()).collect()
}

pub fn key(key: Key) -> KeyCombo {
    KeyCombo::key(key)
}

/// Counter bumped by a change handler.
pub fn counter() -> Arc<AtomicUsize> {
    Arc::new(AtomicUsize::new(0))
}

pub fn count(counter: &Arc<AtomicUsize>) -> usize {
    counter.load(Ordering::SeqCst)
}

pub fn bump(counter: &Arc<AtomicUsize>) -> impl Fn() + Send + Sync + 'static {
    let counter = Arc::clone(counter);
    move || {
        counter.fetch_add(1, Ordering::SeqCst);
    }
}
