//! Active-item tracking (the list key manager).
//!
//! An [`ActiveItemTracker`] owns the single "active" item of an ordered,
//! mutable collection and moves it in response to arrow, Home/End,
//! PageUp/PageDown and typeahead keys, according to a [`NavConfig`].
//!
//! The tracker is a cheap `Clone` handle: clones share the same state, so a
//! host widget can keep one in a field and hand others to event closures.

mod events;
mod state;

use std::sync::{Arc, RwLock};

use crate::clock::{Clock, SystemClock};
use crate::config::NavConfig;
use crate::item::Item;
use crate::notify::Notifier;
use crate::registry::{ItemDiff, ItemRegistry};
use crate::typeahead::TypeaheadMatcher;

use state::TrackerInner;

/// Decides which items keyboard navigation passes over.
pub type SkipPredicate<I> = Arc<dyn Fn(&I) -> bool + Send + Sync>;

/// A movement intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Next,
    Previous,
    First,
    Last,
    PageUp,
    PageDown,
}

/// Tracks one active item among a dynamic collection.
///
/// # Example
///
/// ```ignore
/// let tracker = ActiveItemTracker::new(NavConfig::listbox().with_wrap(true));
/// tracker.set_items(vec![apple.clone(), banana.clone(), cherry.clone()]);
/// tracker.set_active_item(Some(&apple));
///
/// let result = tracker.on_key_down(&KeyCombo::key(Key::Down));
/// assert_eq!(result, EventResult::Consumed);
/// ```
pub struct ActiveItemTracker<I: ?Sized> {
    inner: Arc<RwLock<TrackerInner<I>>>,
    notifier: Notifier,
}

impl<I: ?Sized> Clone for ActiveItemTracker<I> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            notifier: self.notifier.clone(),
        }
    }
}

impl<I: Item + ?Sized> std::fmt::Debug for ActiveItemTracker<I> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActiveItemTracker")
            .field("len", &self.len())
            .field("active_index", &self.active_index())
            .field("config", &self.config())
            .finish()
    }
}

impl<I: Item + ?Sized> ActiveItemTracker<I> {
    /// Create a tracker with no items.
    pub fn new(config: NavConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock::new()))
    }

    /// Create a tracker whose typeahead buffer expires on `clock`.
    pub fn with_clock(config: NavConfig, clock: Arc<dyn Clock>) -> Self {
        let typeahead = TypeaheadMatcher::with_clock(config.typeahead_timeout(), clock);
        Self {
            inner: Arc::new(RwLock::new(TrackerInner {
                registry: ItemRegistry::new(),
                active: None,
                config,
                skip: None,
                typeahead,
                viewport_items: None,
            })),
            notifier: Notifier::default(),
        }
    }

    // -------------------------------------------------------------------------
    // Read methods
    // -------------------------------------------------------------------------

    /// Current items in navigation order.
    pub fn items(&self) -> Vec<Arc<I>> {
        self.inner
            .read()
            .map(|guard| guard.registry.items().to_vec())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.inner
            .read()
            .map(|guard| guard.registry.len())
            .unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The active item, if any.
    pub fn active_item(&self) -> Option<Arc<I>> {
        self.inner
            .read()
            .ok()
            .and_then(|guard| guard.active.clone())
    }

    /// Position of the active item, if any.
    pub fn active_index(&self) -> Option<usize> {
        self.inner
            .read()
            .ok()
            .and_then(|guard| guard.active_index())
    }

    pub fn config(&self) -> NavConfig {
        self.inner
            .read()
            .map(|guard| guard.config.clone())
            .unwrap_or_default()
    }

    /// Whether keyboard navigation can land on `item`.
    pub fn is_reachable(&self, item: &I) -> bool {
        self.inner
            .read()
            .map(|guard| !guard.is_skipped(item))
            .unwrap_or(false)
    }

    /// Current typeahead buffer contents.
    pub fn typeahead_buffer(&self) -> String {
        self.inner
            .read()
            .map(|guard| guard.typeahead.buffer().to_string())
            .unwrap_or_default()
    }

    /// Whether a typeahead query is in progress (typed within the timeout).
    pub fn is_typing(&self) -> bool {
        self.inner
            .read()
            .map(|guard| guard.typeahead.is_pending())
            .unwrap_or(false)
    }

    // -------------------------------------------------------------------------
    // Configuration
    // -------------------------------------------------------------------------

    pub fn set_config(&self, config: NavConfig) {
        if let Ok(mut guard) = self.inner.write() {
            guard.typeahead.set_timeout(config.typeahead_timeout());
            guard.config = config;
        }
    }

    /// Replace the default `Item::is_skippable` rule.
    pub fn set_skip_predicate(&self, predicate: impl Fn(&I) -> bool + Send + Sync + 'static) {
        if let Ok(mut guard) = self.inner.write() {
            guard.skip = Some(Arc::new(predicate));
        }
    }

    /// Go back to `Item::is_skippable`.
    pub fn clear_skip_predicate(&self) {
        if let Ok(mut guard) = self.inner.write() {
            guard.skip = None;
        }
    }

    /// Report how many items fit in the host's viewport. Used as the page
    /// size when the config has none.
    pub fn set_viewport_size(&self, items: usize) {
        if let Ok(mut guard) = self.inner.write() {
            guard.viewport_items = (items > 0).then_some(items);
        }
    }

    // -------------------------------------------------------------------------
    // Write methods
    // -------------------------------------------------------------------------

    /// Replace the items and repair the active item if it was removed.
    ///
    /// A repair that changes the active item notifies the change handler.
    pub fn set_items(&self, items: Vec<Arc<I>>) -> ItemDiff<I> {
        let (diff, changed) = self.replace_items(items);
        if changed {
            self.notifier.notify();
        }
        diff
    }

    /// Replace the items and repair without notifying. Returns the diff and
    /// whether the active item changed.
    pub(crate) fn replace_items(&self, items: Vec<Arc<I>>) -> (ItemDiff<I>, bool) {
        let Ok(mut guard) = self.inner.write() else {
            return (ItemDiff::empty(), false);
        };
        let old_index = guard.active_index();
        let diff = guard.registry.set_items(items);
        let changed = guard.repair(old_index);
        (diff, changed)
    }

    /// Make `item` active, or clear the active item with `None`, and notify.
    ///
    /// Items that are not registered or not reachable are ignored. Returns
    /// true if the active item changed.
    pub fn set_active_item(&self, item: Option<&Arc<I>>) -> bool {
        let changed = self.assign(item);
        if changed {
            self.notifier.notify();
        }
        changed
    }

    /// Same as [`set_active_item`](Self::set_active_item) without notifying.
    /// Used for silent resynchronization.
    pub fn update_active_item(&self, item: Option<&Arc<I>>) -> bool {
        self.assign(item)
    }

    pub(crate) fn assign(&self, item: Option<&Arc<I>>) -> bool {
        let Ok(mut guard) = self.inner.write() else {
            return false;
        };
        match item {
            None => guard.assign(None),
            Some(item) => {
                if !guard.registry.contains(item) || guard.is_skipped(item) {
                    return false;
                }
                guard.assign(Some(Arc::clone(item)))
            }
        }
    }

    /// Apply a movement intent. Returns true if the active item changed.
    pub fn navigate(&self, navigation: Navigation) -> bool {
        let changed = self.move_active(navigation);
        if changed {
            self.notifier.notify();
        }
        changed
    }

    /// Apply a movement intent without notifying.
    pub(crate) fn move_active(&self, navigation: Navigation) -> bool {
        let Ok(mut guard) = self.inner.write() else {
            return false;
        };
        guard
            .navigation_target(navigation)
            .is_some_and(|target| guard.activate_index(target))
    }

    // -------------------------------------------------------------------------
    // Notification
    // -------------------------------------------------------------------------

    /// Register the handler run after every active-item change. Replaces any
    /// previous handler.
    pub fn on_active_item_change(&self, callback: impl Fn() + Send + Sync + 'static) {
        self.notifier.set(Arc::new(callback));
    }

    pub fn clear_active_item_change(&self) {
        self.notifier.clear();
    }

    /// Run the change handler for a transition made through a silent path.
    pub(crate) fn notify_active_item_change(&self) {
        self.notifier.notify();
    }

    /// Check if the active item changed since the last `clear_dirty`.
    pub fn is_dirty(&self) -> bool {
        self.notifier.is_dirty()
    }

    pub fn clear_dirty(&self) {
        self.notifier.clear_dirty();
    }
}
