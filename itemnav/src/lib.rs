//! Keyboard navigation, roving focus and selection for list-like widgets.
//!
//! Listboxes, selects, menus, radio groups, tabs, nav bars and tables of
//! contents all need the same coordination: one *active* item among an
//! ordered, changing collection; arrow/Home/End/Page/typeahead keys that
//! move it while passing over disabled items; exactly one item acting as
//! the Tab stop; and a single or multiple *selection* kept consistent with
//! all of that. This crate implements that engine. It renders nothing and
//! only touches items through the [`Item`] trait.
//!
//! Engines, bottom-up:
//!
//! - [`ItemRegistry`] - ordered item handles, identity diffs on replacement
//! - [`TypeaheadMatcher`] - typed characters to a label-prefix match
//! - [`ActiveItemTracker`] - the active item and key-driven movement
//! - [`RovingTabIndex`] - the single Tab stop, following the active item
//! - [`SelectionCoordinator`] - single/multiple selection
//! - [`NavigableSelection`] - the last three composed for one widget
//!
//! Host widgets keep engines as plain fields, push their items with
//! `set_items` whenever their children change, forward key presses to
//! `on_key_down`, and re-read `active_item`/`selected_items` from change
//! handlers.

mod clock;
mod config;
mod error;
mod item;
mod keys;
mod navigator;
mod notify;
mod registry;
mod roving;
mod selection;
mod tracker;
mod typeahead;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{
    DEFAULT_PAGE_SIZE, DEFAULT_TYPEAHEAD_TIMEOUT_MS, NavConfig, Orientation, TextDirection,
};
pub use error::{ConfigError, RegistryError};
pub use item::Item;
pub use keys::{EventResult, Key, KeyCombo, Modifiers};
pub use navigator::NavigableSelection;
pub use notify::ChangeCallback;
pub use registry::{ItemDiff, ItemRegistry};
pub use roving::RovingTabIndex;
pub use selection::{SelectionCoordinator, SelectionMode};
pub use tracker::{ActiveItemTracker, Navigation, SkipPredicate};
pub use typeahead::TypeaheadMatcher;

pub mod prelude {
    pub use crate::{
        ActiveItemTracker, EventResult, Item, Key, KeyCombo, Modifiers, NavConfig,
        NavigableSelection, Navigation, Orientation, RovingTabIndex, SelectionCoordinator,
        SelectionMode,
    };
}
