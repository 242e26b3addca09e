//! Demo item handle.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use itemnav::Item;

/// A labelled row with flags the engines read and write.
#[derive(Debug, Default)]
pub struct DemoItem {
    name: String,
    disabled: AtomicBool,
    selected: AtomicBool,
    tab_stop: AtomicBool,
}

impl DemoItem {
    pub fn new(name: &str) -> Arc<Self> {
        Arc::new(Self {
            name: name.to_string(),
            ..Default::default()
        })
    }

    pub fn set_disabled(&self, disabled: bool) {
        self.disabled.store(disabled, Ordering::Relaxed);
    }

    pub fn is_tab_stop(&self) -> bool {
        self.tab_stop.load(Ordering::Relaxed)
    }
}

impl Item for DemoItem {
    fn label(&self) -> String {
        self.name.clone()
    }

    fn is_disabled(&self) -> bool {
        self.disabled.load(Ordering::Relaxed)
    }

    fn is_selected(&self) -> bool {
        self.selected.load(Ordering::Relaxed)
    }

    fn set_selected(&self, selected: bool) {
        self.selected.store(selected, Ordering::Relaxed);
    }

    fn focus(&self) {
        log::debug!("[demo] focus {:?}", self.name);
    }

    fn set_tab_stop(&self, tab_stop: bool) {
        self.tab_stop.store(tab_stop, Ordering::Relaxed);
    }
}
