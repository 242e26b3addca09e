//! Combined active + selected behavior.
//!
//! Radio groups, tabs, nav bars and listboxes need both an active item
//! (with roving focus) and a selection. [`NavigableSelection`] owns one of
//! each engine and forwards items, keys and queries to them; it adds the
//! keys that change selection and the "selection follows focus" policy.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::clock::{Clock, SystemClock};
use crate::config::NavConfig;
use crate::item::{Item, same_opt};
use crate::keys::{EventResult, Key, KeyCombo};
use crate::registry::ItemDiff;
use crate::roving::RovingTabIndex;
use crate::selection::{SelectionCoordinator, SelectionMode};
use crate::tracker::ActiveItemTracker;

/// Active-item navigation, roving tab stop and selection for one widget.
pub struct NavigableSelection<I: ?Sized> {
    roving: RovingTabIndex<I>,
    selection: SelectionCoordinator<I>,
    follows_focus: Arc<AtomicBool>,
}

impl<I: ?Sized> Clone for NavigableSelection<I> {
    fn clone(&self) -> Self {
        Self {
            roving: self.roving.clone(),
            selection: self.selection.clone(),
            follows_focus: Arc::clone(&self.follows_focus),
        }
    }
}

impl<I: Item + ?Sized> std::fmt::Debug for NavigableSelection<I> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NavigableSelection")
            .field("roving", &self.roving)
            .field("selection", &self.selection)
            .field("follows_focus", &self.selection_follows_focus())
            .finish()
    }
}

impl<I: Item + ?Sized> NavigableSelection<I> {
    pub fn new(config: NavConfig, mode: SelectionMode) -> Self {
        Self::with_clock(config, mode, Arc::new(SystemClock::new()))
    }

    pub fn with_clock(config: NavConfig, mode: SelectionMode, clock: Arc<dyn Clock>) -> Self {
        let tracker = ActiveItemTracker::with_clock(config, clock);
        Self::from_parts(RovingTabIndex::new(tracker), SelectionCoordinator::new(mode))
    }

    /// Compose existing engines.
    pub fn from_parts(roving: RovingTabIndex<I>, selection: SelectionCoordinator<I>) -> Self {
        Self {
            roving,
            selection,
            follows_focus: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Select the active item whenever the keyboard moves it.
    pub fn with_selection_follows_focus(self, follows: bool) -> Self {
        self.follows_focus.store(follows, Ordering::SeqCst);
        self
    }

    // -------------------------------------------------------------------------
    // Widget presets
    // -------------------------------------------------------------------------

    pub fn radio_group() -> Self {
        Self::new(NavConfig::radio_group(), SelectionMode::Single).with_selection_follows_focus(true)
    }

    pub fn tabs() -> Self {
        Self::new(NavConfig::tabs(), SelectionMode::Single).with_selection_follows_focus(true)
    }

    pub fn nav_bar() -> Self {
        Self::new(NavConfig::nav_bar(), SelectionMode::Single).with_selection_follows_focus(true)
    }

    pub fn listbox(mode: SelectionMode) -> Self {
        Self::new(NavConfig::listbox(), mode)
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    pub fn tracker(&self) -> &ActiveItemTracker<I> {
        self.roving.tracker()
    }

    pub fn roving(&self) -> &RovingTabIndex<I> {
        &self.roving
    }

    pub fn selection(&self) -> &SelectionCoordinator<I> {
        &self.selection
    }

    pub fn selection_follows_focus(&self) -> bool {
        self.follows_focus.load(Ordering::SeqCst)
    }

    pub fn set_selection_follows_focus(&self, follows: bool) {
        self.follows_focus.store(follows, Ordering::SeqCst);
    }

    pub fn items(&self) -> Vec<Arc<I>> {
        self.roving.items()
    }

    pub fn active_item(&self) -> Option<Arc<I>> {
        self.roving.active_item()
    }

    pub fn selected_items(&self) -> Vec<Arc<I>> {
        self.selection.selected_items()
    }

    pub fn tab_stop(&self) -> Option<Arc<I>> {
        self.roving.tab_stop()
    }

    // -------------------------------------------------------------------------
    // Forwarded operations
    // -------------------------------------------------------------------------

    /// Replace the items in both engines.
    ///
    /// The selection receives the tracker's items as they stand after its
    /// change handler ran, so a handler that replaces the items again wins
    /// in both engines. With no active item, a selected reachable item
    /// silently becomes active so the tab stop lands on it.
    pub fn set_items(&self, items: Vec<Arc<I>>) -> ItemDiff<I> {
        let diff = self.roving.set_items(items);
        self.selection.set_items(self.roving.items());

        if self.roving.active_item().is_none()
            && let Some(selected) = self
                .selection
                .selected_items()
                .into_iter()
                .find(|item| self.tracker().is_reachable(item))
        {
            self.roving.update_active_item(Some(&selected));
        }
        diff
    }

    /// Activate `item` from pointer input: it becomes active, takes focus,
    /// and is selected (single) or toggled (multiple).
    pub fn activate_item(&self, item: &Arc<I>) -> bool {
        if self.selection.is_disabled() {
            return false;
        }
        let moved = self.roving.set_active_item(Some(item));
        let diff = match self.selection.mode() {
            SelectionMode::None => ItemDiff::empty(),
            SelectionMode::Single => self.selection.select_by_user(item),
            SelectionMode::Multiple => self.selection.toggle_by_user(item),
        };
        moved || !diff.is_empty()
    }

    /// Handle a key press.
    ///
    /// Space/Enter select (single) or toggle (multiple) the active item and
    /// Ctrl+A selects everything (multiple). While a typeahead query is in
    /// progress Space is typed into it instead. Other keys go to the roving
    /// controller; with selection following focus, a move selects the new
    /// active item. Everything is ignored while selection is disabled.
    pub fn on_key_down(&self, key: &KeyCombo) -> EventResult {
        if self.selection.is_disabled() {
            return EventResult::Ignored;
        }
        let mode = self.selection.mode();

        if let Some(result) = self.handle_selection_key(key, mode) {
            return result;
        }

        let before = self.roving.active_item();
        let result = self.roving.on_key_down(key);
        let after = self.roving.active_item();

        if self.selection_follows_focus()
            && mode != SelectionMode::None
            && !same_opt(before.as_ref(), after.as_ref())
            && let Some(active) = after
        {
            self.selection.select_by_user(&active);
        }
        result
    }

    fn handle_selection_key(&self, key: &KeyCombo, mode: SelectionMode) -> Option<EventResult> {
        if mode == SelectionMode::None || key.modifiers.alt {
            return None;
        }
        match key.key {
            Key::Char('a') | Key::Char('A')
                if key.modifiers.ctrl && mode == SelectionMode::Multiple =>
            {
                self.selection.select_all_by_user();
                Some(EventResult::Consumed)
            }
            Key::Char(' ') if self.tracker().is_typing() => None,
            Key::Char(' ') | Key::Enter if !key.modifiers.ctrl => {
                let active = self.roving.active_item()?;
                match mode {
                    SelectionMode::Single => self.selection.select_by_user(&active),
                    _ => self.selection.toggle_by_user(&active),
                };
                Some(EventResult::Consumed)
            }
            _ => None,
        }
    }
}
