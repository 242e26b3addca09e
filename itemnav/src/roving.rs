//! Roving tabindex: exactly one item is the sequential tab stop.
//!
//! The tab stop follows the active item. When the active item is missing or
//! unreachable the first reachable item takes over; with nothing reachable
//! there is no tab stop. Recomputing without a change touches no item.

use std::sync::{Arc, RwLock};

use crate::item::{Item, position_of, same, same_opt};
use crate::keys::{EventResult, KeyCombo};
use crate::registry::ItemDiff;
use crate::tracker::{ActiveItemTracker, Navigation};

#[derive(Debug)]
struct RovingInner<I: ?Sized> {
    /// Item currently holding the tab stop.
    tab_stop: Option<Arc<I>>,
    /// Whether the controller manages tab stops at all.
    enabled: bool,
    /// Whether every item has been assigned a tab stop state yet.
    initialized: bool,
}

/// Keeps one item focusable by Tab, synchronized to an [`ActiveItemTracker`].
pub struct RovingTabIndex<I: ?Sized> {
    tracker: ActiveItemTracker<I>,
    inner: Arc<RwLock<RovingInner<I>>>,
}

impl<I: ?Sized> Clone for RovingTabIndex<I> {
    fn clone(&self) -> Self {
        Self {
            tracker: self.tracker.clone(),
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<I: Item + ?Sized> std::fmt::Debug for RovingTabIndex<I> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RovingTabIndex")
            .field("tracker", &self.tracker)
            .field("enabled", &self.is_enabled())
            .finish_non_exhaustive()
    }
}

impl<I: Item + ?Sized> RovingTabIndex<I> {
    /// Manage tab stops for the items of `tracker`.
    pub fn new(tracker: ActiveItemTracker<I>) -> Self {
        Self {
            tracker,
            inner: Arc::new(RwLock::new(RovingInner {
                tab_stop: None,
                enabled: true,
                initialized: false,
            })),
        }
    }

    /// The underlying tracker (shares state with this controller).
    pub fn tracker(&self) -> &ActiveItemTracker<I> {
        &self.tracker
    }

    pub fn items(&self) -> Vec<Arc<I>> {
        self.tracker.items()
    }

    pub fn active_item(&self) -> Option<Arc<I>> {
        self.tracker.active_item()
    }

    /// The item currently holding the tab stop.
    pub fn tab_stop(&self) -> Option<Arc<I>> {
        self.inner
            .read()
            .ok()
            .and_then(|guard| guard.tab_stop.clone())
    }

    pub fn is_enabled(&self) -> bool {
        self.inner
            .read()
            .map(|guard| guard.enabled)
            .unwrap_or(false)
    }

    // -------------------------------------------------------------------------
    // Forwarded operations
    // -------------------------------------------------------------------------

    /// Replace the items and recompute the tab stop.
    ///
    /// If the active item was repaired, the tracker's change handler runs
    /// after the tab stop has moved.
    pub fn set_items(&self, items: Vec<Arc<I>>) -> ItemDiff<I> {
        let (diff, changed) = self.tracker.replace_items(items);
        self.sync_with(&diff.added);
        if changed {
            self.tracker.notify_active_item_change();
        }
        diff
    }

    /// Forward a key to the tracker. A keyboard move also moves focus.
    pub fn on_key_down(&self, key: &KeyCombo) -> EventResult {
        let (result, changed) = self.tracker.handle_key(key);
        self.settle(changed);
        result
    }

    /// Apply a movement intent, moving focus with it.
    pub fn navigate(&self, navigation: Navigation) -> bool {
        let changed = self.tracker.move_active(navigation);
        self.settle(changed);
        changed
    }

    /// Activate `item`, make it the tab stop and focus it.
    pub fn set_active_item(&self, item: Option<&Arc<I>>) -> bool {
        let changed = self.tracker.assign(item);
        self.settle(changed);
        changed
    }

    /// Activate `item` silently and make it the tab stop, without focusing.
    pub fn update_active_item(&self, item: Option<&Arc<I>>) -> bool {
        let changed = self.tracker.update_active_item(item);
        self.sync();
        changed
    }

    // -------------------------------------------------------------------------
    // Tab stop management
    // -------------------------------------------------------------------------

    /// Stop managing tab stops. Every item becomes a tab stop so the widget
    /// can keep its own sequential order.
    pub fn disable_roving_tab_index(&self) {
        let Ok(mut guard) = self.inner.write() else {
            return;
        };
        if !guard.enabled {
            return;
        }
        guard.enabled = false;
        guard.initialized = false;
        guard.tab_stop = None;
        drop(guard);

        for item in self.tracker.items() {
            item.set_tab_stop(true);
        }
    }

    /// Resume managing tab stops.
    pub fn enable_roving_tab_index(&self) {
        if let Ok(mut guard) = self.inner.write() {
            guard.enabled = true;
        }
        self.sync();
    }

    /// Recompute the tab stop.
    pub fn sync(&self) {
        self.sync_with(&[]);
    }

    /// Recompute the tab stop, then focus the new active item and run the
    /// tracker's change handler if the active item moved.
    fn settle(&self, changed: bool) {
        self.sync();
        if !changed {
            return;
        }
        if let Some(active) = self.tracker.active_item() {
            active.focus();
        }
        self.tracker.notify_active_item_change();
    }

    /// Recompute the tab stop, also clearing it on `added` items.
    fn sync_with(&self, added: &[Arc<I>]) {
        let items = self.tracker.items();
        let target = self
            .tracker
            .active_item()
            .filter(|active| self.tracker.is_reachable(active))
            .or_else(|| {
                items
                    .iter()
                    .find(|item| self.tracker.is_reachable(item))
                    .cloned()
            });

        let mut updates: Vec<(Arc<I>, bool)> = Vec::new();
        {
            let Ok(mut guard) = self.inner.write() else {
                return;
            };
            if !guard.enabled {
                return;
            }

            let is_target = |item: &Arc<I>| target.as_ref().is_some_and(|t| same(t, item));

            if !guard.initialized {
                updates.extend(items.iter().map(|item| (Arc::clone(item), is_target(item))));
                guard.initialized = true;
            } else {
                for item in added {
                    updates.push((Arc::clone(item), is_target(item)));
                }
                if !same_opt(guard.tab_stop.as_ref(), target.as_ref()) {
                    if let Some(previous) = guard.tab_stop.as_ref()
                        && position_of(&items, previous).is_some()
                    {
                        updates.push((Arc::clone(previous), false));
                    }
                    if let Some(target) = target.as_ref()
                        && position_of(added, target).is_none()
                    {
                        updates.push((Arc::clone(target), true));
                    }
                }
            }

            if !same_opt(guard.tab_stop.as_ref(), target.as_ref()) {
                log::debug!(
                    "[roving] tab stop {:?} -> {:?}",
                    guard.tab_stop.as_ref().map(|item| item.label()),
                    target.as_ref().map(|item| item.label())
                );
            }
            guard.tab_stop = target;
        }

        for (item, tab_stop) in updates {
            item.set_tab_stop(tab_stop);
        }
    }
}
