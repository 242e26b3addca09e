//! Key handling for the ActiveItemTracker.

use crate::config::{NavConfig, Orientation, TextDirection};
use crate::item::Item;
use crate::keys::{EventResult, Key, KeyCombo};

use super::{ActiveItemTracker, Navigation};

/// What a key press means under the current config.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Intent {
    Navigate(Navigation),
    Typeahead(char),
}

/// Classify a key press. Priority: Home/End, PageUp/PageDown, arrows,
/// printable characters.
fn classify(config: &NavConfig, key: &KeyCombo) -> Option<Intent> {
    if key.modifiers.ctrl || key.modifiers.alt {
        return None;
    }

    let navigation = match key.key {
        Key::Home if config.home_and_end => Some(Navigation::First),
        Key::End if config.home_and_end => Some(Navigation::Last),
        Key::PageUp if config.page_up_and_down => Some(Navigation::PageUp),
        Key::PageDown if config.page_up_and_down => Some(Navigation::PageDown),
        Key::Up | Key::Down | Key::Left | Key::Right => arrow(config, key.key),
        _ => None,
    };
    if let Some(navigation) = navigation {
        return Some(Intent::Navigate(navigation));
    }

    if config.typeahead {
        return key.printable().map(Intent::Typeahead);
    }
    None
}

fn arrow(config: &NavConfig, key: Key) -> Option<Navigation> {
    let vertical = matches!(config.orientation, Orientation::Vertical | Orientation::Both);
    let horizontal = matches!(config.orientation, Orientation::Horizontal | Orientation::Both);
    let rtl = config.direction == TextDirection::Rtl;

    match key {
        Key::Up if vertical => Some(Navigation::Previous),
        Key::Down if vertical => Some(Navigation::Next),
        Key::Left if horizontal => Some(if rtl {
            Navigation::Next
        } else {
            Navigation::Previous
        }),
        Key::Right if horizontal => Some(if rtl {
            Navigation::Previous
        } else {
            Navigation::Next
        }),
        _ => None,
    }
}

impl<I: Item + ?Sized> ActiveItemTracker<I> {
    /// Interpret a key press and move the active item.
    ///
    /// Returns `Consumed` when the key maps to a movement (or typeahead) and
    /// some reachable item exists, even if the active item stays put at a
    /// boundary. With nothing reachable the key is `Ignored` so it can
    /// bubble out of the widget. At most one transition happens per call.
    pub fn on_key_down(&self, key: &KeyCombo) -> EventResult {
        let (result, changed) = self.handle_key(key);
        if changed {
            self.notifier.notify();
        }
        result
    }

    /// Key handling without notifying. Returns the outcome and whether the
    /// active item changed.
    pub(crate) fn handle_key(&self, key: &KeyCombo) -> (EventResult, bool) {
        let Ok(mut guard) = self.inner.write() else {
            return (EventResult::Ignored, false);
        };
        let Some(intent) = classify(&guard.config, key) else {
            return (EventResult::Ignored, false);
        };
        log::trace!("[tracker] {:?} -> {:?}", key, intent);

        let target = match intent {
            Intent::Navigate(navigation) => {
                guard.typeahead.reset();
                if !guard.has_reachable() {
                    return (EventResult::Ignored, false);
                }
                guard.navigation_target(navigation)
            }
            Intent::Typeahead(c) => {
                if !guard.has_reachable() {
                    return (EventResult::Ignored, false);
                }
                guard.typeahead_target(c)
            }
        };
        let changed = target.is_some_and(|index| guard.activate_index(index));
        (EventResult::Consumed, changed)
    }
}
