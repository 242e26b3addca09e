//! Item handles.
//!
//! An item is a widget-owned element (a listbox option, a tab, a radio
//! button, ...) that the engines only see through this trait. Handles are
//! shared as `Arc<I>` and compared by pointer identity; the engines never
//! clone or wrap the underlying item.

use std::sync::Arc;

/// Capabilities the engines need from a widget-owned item.
///
/// State setters take `&self`: items are expected to keep their flags in
/// interior-mutable cells, the same way widget state is shared between the
/// widget and its event handlers.
///
/// # Example
///
/// ```
/// use std::sync::atomic::{AtomicBool, Ordering};
/// use itemnav::Item;
///
/// struct Tab {
///     title: String,
///     selected: AtomicBool,
///     tab_stop: AtomicBool,
/// }
///
/// impl Item for Tab {
///     fn label(&self) -> String {
///         self.title.clone()
///     }
///
///     fn is_disabled(&self) -> bool {
///         false
///     }
///
///     fn is_selected(&self) -> bool {
///         self.selected.load(Ordering::SeqCst)
///     }
///
///     fn set_selected(&self, selected: bool) {
///         self.selected.store(selected, Ordering::SeqCst);
///     }
///
///     fn focus(&self) {}
///
///     fn set_tab_stop(&self, tab_stop: bool) {
///         self.tab_stop.store(tab_stop, Ordering::SeqCst);
///     }
/// }
/// ```
pub trait Item {
    /// Text used for typeahead matching.
    fn label(&self) -> String;

    /// Whether the item is disabled.
    fn is_disabled(&self) -> bool;

    /// Whether the item is explicitly hidden.
    fn is_hidden(&self) -> bool {
        false
    }

    /// Whether keyboard navigation should pass over this item.
    ///
    /// Skippable items stay addressable by index.
    fn is_skippable(&self) -> bool {
        self.is_disabled() || self.is_hidden()
    }

    /// Whether the item is currently selected.
    fn is_selected(&self) -> bool;

    /// Set the selected flag. Only the selection coordinator should call this.
    fn set_selected(&self, selected: bool);

    /// Move input focus to this item.
    fn focus(&self);

    /// Include or exclude the item from sequential tab navigation.
    fn set_tab_stop(&self, tab_stop: bool);
}

/// Identity comparison for item handles.
pub(crate) fn same<I: ?Sized>(a: &Arc<I>, b: &Arc<I>) -> bool {
    addr(a) == addr(b)
}

/// Thin address of a handle, used as a hash key for identity sets.
pub(crate) fn addr<I: ?Sized>(item: &Arc<I>) -> *const () {
    Arc::as_ptr(item).cast::<()>()
}

/// Index of `item` in `items`, by identity.
pub(crate) fn position_of<I: ?Sized>(items: &[Arc<I>], item: &Arc<I>) -> Option<usize> {
    items.iter().position(|candidate| same(candidate, item))
}

/// Identity comparison for optional handles.
pub(crate) fn same_opt<I: ?Sized>(a: Option<&Arc<I>>, b: Option<&Arc<I>>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => same(a, b),
        (None, None) => true,
        _ => false,
    }
}
