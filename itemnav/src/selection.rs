//! Selection state management (the selection manager).
//!
//! Selection lives on the items themselves (`Item::is_selected`); the
//! coordinator decides who may change it and keeps single-selection
//! exclusive. Selection operations report `(added, removed)` as an
//! [`ItemDiff`], like the list widgets' selection model.

use std::sync::{Arc, RwLock};

use crate::item::{Item, same};
use crate::notify::Notifier;
use crate::registry::{ItemDiff, ItemRegistry};

/// Selection mode for list-like widgets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionMode {
    /// No selection allowed.
    #[default]
    None,
    /// At most one selected item (radio-button style).
    Single,
    /// Any number of selected items (checkbox style).
    Multiple,
}

#[derive(Debug)]
struct SelectionInner<I: ?Sized> {
    registry: ItemRegistry<I>,
    mode: SelectionMode,
    /// Suppresses user-driven changes; programmatic calls still apply.
    disabled: bool,
    /// At least one item must be selected for the group to be valid.
    required: bool,
}

/// Owns the selected subset of a collection.
///
/// # Example
///
/// ```ignore
/// let selection = SelectionCoordinator::single();
/// selection.set_items(vec![x.clone(), y.clone()]);
///
/// selection.select(&x);
/// selection.select(&y);
/// assert_eq!(selection.selected_items().len(), 1);
/// assert!(!x.is_selected());
/// ```
pub struct SelectionCoordinator<I: ?Sized> {
    inner: Arc<RwLock<SelectionInner<I>>>,
    notifier: Notifier,
}

impl<I: ?Sized> Clone for SelectionCoordinator<I> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            notifier: self.notifier.clone(),
        }
    }
}

impl<I: Item + ?Sized> std::fmt::Debug for SelectionCoordinator<I> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SelectionCoordinator")
            .field("mode", &self.mode())
            .field("selected", &self.selected_items().len())
            .field("disabled", &self.is_disabled())
            .finish_non_exhaustive()
    }
}

impl<I: Item + ?Sized> SelectionCoordinator<I> {
    pub fn new(mode: SelectionMode) -> Self {
        Self {
            inner: Arc::new(RwLock::new(SelectionInner {
                registry: ItemRegistry::new(),
                mode,
                disabled: false,
                required: false,
            })),
            notifier: Notifier::default(),
        }
    }

    pub fn single() -> Self {
        Self::new(SelectionMode::Single)
    }

    pub fn multiple() -> Self {
        Self::new(SelectionMode::Multiple)
    }

    // -------------------------------------------------------------------------
    // Read methods
    // -------------------------------------------------------------------------

    pub fn items(&self) -> Vec<Arc<I>> {
        self.inner
            .read()
            .map(|guard| guard.registry.items().to_vec())
            .unwrap_or_default()
    }

    pub fn mode(&self) -> SelectionMode {
        self.inner
            .read()
            .map(|guard| guard.mode)
            .unwrap_or_default()
    }

    /// Selected items in registry order.
    pub fn selected_items(&self) -> Vec<Arc<I>> {
        self.items()
            .into_iter()
            .filter(|item| item.is_selected())
            .collect()
    }

    /// First selected item in registry order.
    pub fn selected_item(&self) -> Option<Arc<I>> {
        self.items().into_iter().find(|item| item.is_selected())
    }

    pub fn contains(&self, item: &Arc<I>) -> bool {
        self.inner
            .read()
            .map(|guard| guard.registry.contains(item))
            .unwrap_or(false)
    }

    pub fn is_disabled(&self) -> bool {
        self.inner
            .read()
            .map(|guard| guard.disabled)
            .unwrap_or(false)
    }

    pub fn is_required(&self) -> bool {
        self.inner
            .read()
            .map(|guard| guard.required)
            .unwrap_or(false)
    }

    /// False when selection is required and nothing is selected.
    pub fn is_valid(&self) -> bool {
        !self.is_required() || self.selected_item().is_some()
    }

    // -------------------------------------------------------------------------
    // Configuration
    // -------------------------------------------------------------------------

    /// Change the mode. Entering `Single` keeps only the first selected item.
    pub fn set_mode(&self, mode: SelectionMode) {
        if let Ok(mut guard) = self.inner.write() {
            guard.mode = mode;
        }
        if mode == SelectionMode::Single {
            let keep = self.selected_item();
            let removed = self.deselect_others(keep.as_ref());
            self.finish(ItemDiff {
                added: Vec::new(),
                removed,
            });
        }
    }

    /// Disable user-driven selection changes. Existing selection is kept.
    pub fn set_disabled(&self, disabled: bool) {
        if let Ok(mut guard) = self.inner.write() {
            guard.disabled = disabled;
        }
    }

    pub fn set_required(&self, required: bool) {
        if let Ok(mut guard) = self.inner.write() {
            guard.required = required;
        }
    }

    // -------------------------------------------------------------------------
    // Write methods
    // -------------------------------------------------------------------------

    /// Replace the items.
    ///
    /// In single mode, incoming items that are already selected are
    /// reconciled: the last newly added selected item wins, otherwise the
    /// first selected item in order. The change handler runs if the
    /// selected view changed.
    pub fn set_items(&self, items: Vec<Arc<I>>) -> ItemDiff<I> {
        let before = self.selected_items();
        let (diff, mode) = {
            let Ok(mut guard) = self.inner.write() else {
                return ItemDiff::empty();
            };
            (guard.registry.set_items(items), guard.mode)
        };

        if mode == SelectionMode::Single {
            let keep = diff
                .added
                .iter()
                .rev()
                .find(|item| item.is_selected())
                .cloned()
                .or_else(|| self.selected_item());
            self.deselect_others(keep.as_ref());
        }

        let after = self.selected_items();
        let unchanged = before.len() == after.len()
            && before.iter().zip(&after).all(|(a, b)| same(a, b));
        if !unchanged {
            log::debug!("[selection] {} selected after set_items", after.len());
            self.notifier.notify();
        }
        diff
    }

    /// Select `item`. In single mode every other item is deselected first.
    ///
    /// Items not in the registry are ignored.
    pub fn select(&self, item: &Arc<I>) -> ItemDiff<I> {
        let mode = self.mode();
        if mode == SelectionMode::None || !self.contains(item) {
            return ItemDiff::empty();
        }

        let removed = if mode == SelectionMode::Single {
            self.deselect_others(Some(item))
        } else {
            Vec::new()
        };
        let mut added = Vec::new();
        if !item.is_selected() {
            item.set_selected(true);
            added.push(Arc::clone(item));
        }
        self.finish(ItemDiff { added, removed })
    }

    /// Deselect `item`. Items not in the registry are ignored.
    pub fn deselect(&self, item: &Arc<I>) -> ItemDiff<I> {
        if self.mode() == SelectionMode::None || !self.contains(item) || !item.is_selected() {
            return ItemDiff::empty();
        }
        item.set_selected(false);
        self.finish(ItemDiff {
            added: Vec::new(),
            removed: vec![Arc::clone(item)],
        })
    }

    /// Flip `item`'s selection.
    pub fn toggle(&self, item: &Arc<I>) -> ItemDiff<I> {
        if item.is_selected() {
            self.deselect(item)
        } else {
            self.select(item)
        }
    }

    /// Select every enabled item. Multiple mode only.
    pub fn select_all(&self) -> ItemDiff<I> {
        if self.mode() != SelectionMode::Multiple {
            return ItemDiff::empty();
        }
        let mut added = Vec::new();
        for item in self.items() {
            if !item.is_selected() && !item.is_disabled() {
                item.set_selected(true);
                added.push(item);
            }
        }
        self.finish(ItemDiff {
            added,
            removed: Vec::new(),
        })
    }

    /// Deselect everything.
    pub fn clear_selection(&self) -> ItemDiff<I> {
        let removed = self.deselect_others(None);
        self.finish(ItemDiff {
            added: Vec::new(),
            removed,
        })
    }

    /// Reconcile after the host changed `item.selected` directly (e.g. from
    /// the item's own click handler). In single mode a newly selected item
    /// deselects its siblings. The change handler always runs.
    pub fn notify_selection_change(&self, item: &Arc<I>) -> ItemDiff<I> {
        if !self.contains(item) {
            return ItemDiff::empty();
        }
        let removed = if self.mode() == SelectionMode::Single && item.is_selected() {
            self.deselect_others(Some(item))
        } else {
            Vec::new()
        };
        log::debug!(
            "[selection] external change on {:?} (selected={})",
            item.label(),
            item.is_selected()
        );
        self.notifier.notify();
        ItemDiff {
            added: Vec::new(),
            removed,
        }
    }

    // -------------------------------------------------------------------------
    // User-driven changes
    // -------------------------------------------------------------------------

    /// Select on behalf of keyboard or pointer input. Refused when the
    /// coordinator or the item is disabled.
    pub fn select_by_user(&self, item: &Arc<I>) -> ItemDiff<I> {
        if self.is_disabled() || item.is_disabled() {
            return ItemDiff::empty();
        }
        self.select(item)
    }

    /// Toggle on behalf of keyboard or pointer input. Refused when the
    /// coordinator is disabled, or when it would select a disabled item.
    pub fn toggle_by_user(&self, item: &Arc<I>) -> ItemDiff<I> {
        if self.is_disabled() || (item.is_disabled() && !item.is_selected()) {
            return ItemDiff::empty();
        }
        self.toggle(item)
    }

    /// Select all on behalf of keyboard input.
    pub fn select_all_by_user(&self) -> ItemDiff<I> {
        if self.is_disabled() {
            return ItemDiff::empty();
        }
        self.select_all()
    }

    // -------------------------------------------------------------------------
    // Notification
    // -------------------------------------------------------------------------

    /// Register the handler run after every selection change.
    pub fn on_selected_items_change(&self, callback: impl Fn() + Send + Sync + 'static) {
        self.notifier.set(Arc::new(callback));
    }

    pub fn clear_selected_items_change(&self) {
        self.notifier.clear();
    }

    pub fn is_dirty(&self) -> bool {
        self.notifier.is_dirty()
    }

    pub fn clear_dirty(&self) {
        self.notifier.clear_dirty();
    }

    // -------------------------------------------------------------------------
    // Helpers
    // -------------------------------------------------------------------------

    /// Deselect every registered item except `keep`. Returns the deselected.
    fn deselect_others(&self, keep: Option<&Arc<I>>) -> Vec<Arc<I>> {
        let mut removed = Vec::new();
        for item in self.items() {
            if keep.is_some_and(|keep| same(keep, &item)) || !item.is_selected() {
                continue;
            }
            item.set_selected(false);
            removed.push(item);
        }
        removed
    }

    fn finish(&self, diff: ItemDiff<I>) -> ItemDiff<I> {
        if !diff.is_empty() {
            log::debug!(
                "[selection] +{:?} -{:?}",
                diff.added.iter().map(|item| item.label()).collect::<Vec<_>>(),
                diff.removed.iter().map(|item| item.label()).collect::<Vec<_>>()
            );
            self.notifier.notify();
        }
        diff
    }
}
