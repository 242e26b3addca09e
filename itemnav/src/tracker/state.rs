//! Active-item state and movement rules.

use std::sync::Arc;

use crate::config::{DEFAULT_PAGE_SIZE, NavConfig};
use crate::item::{Item, same_opt};
use crate::registry::ItemRegistry;
use crate::typeahead::TypeaheadMatcher;

use super::{Navigation, SkipPredicate};

/// Internal state for an ActiveItemTracker.
pub(super) struct TrackerInner<I: ?Sized> {
    /// Items in navigation order.
    pub registry: ItemRegistry<I>,
    /// The active item, if any. Always registered.
    pub active: Option<Arc<I>>,
    /// Navigation policy.
    pub config: NavConfig,
    /// Overrides `Item::is_skippable` when set.
    pub skip: Option<SkipPredicate<I>>,
    /// Typed-character buffer.
    pub typeahead: TypeaheadMatcher,
    /// Items visible in the host's viewport (page size fallback).
    pub viewport_items: Option<usize>,
}

fn skipped<I: Item + ?Sized>(skip: &Option<SkipPredicate<I>>, item: &I) -> bool {
    match skip {
        Some(predicate) => predicate(item),
        None => item.is_skippable(),
    }
}

impl<I: Item + ?Sized> TrackerInner<I> {
    pub fn is_skipped(&self, item: &I) -> bool {
        skipped(&self.skip, item)
    }

    fn reachable(&self, index: usize) -> bool {
        self.registry
            .get(index)
            .is_some_and(|item| !self.is_skipped(item))
    }

    pub fn active_index(&self) -> Option<usize> {
        self.active
            .as_ref()
            .and_then(|active| self.registry.index_of(active))
    }

    pub fn has_reachable(&self) -> bool {
        self.first_reachable().is_some()
    }

    fn first_reachable(&self) -> Option<usize> {
        (0..self.registry.len()).find(|&i| self.reachable(i))
    }

    fn last_reachable(&self) -> Option<usize> {
        (0..self.registry.len()).rev().find(|&i| self.reachable(i))
    }

    fn page_size(&self) -> usize {
        self.config
            .page_size
            .or(self.viewport_items)
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .max(1)
    }

    /// Index the given movement lands on, or `None` if there is nowhere to go.
    pub fn navigation_target(&self, navigation: Navigation) -> Option<usize> {
        let from = self.active_index();
        match navigation {
            Navigation::Next => self.step(from, true),
            Navigation::Previous => self.step(from, false),
            Navigation::First => self.first_reachable(),
            Navigation::Last => self.last_reachable(),
            Navigation::PageDown => self.page(from, true),
            Navigation::PageUp => self.page(from, false),
        }
    }

    /// Next reachable item in one direction, honoring wrap.
    ///
    /// With wrap on, a full lap may come back to `from` itself.
    fn step(&self, from: Option<usize>, forward: bool) -> Option<usize> {
        let len = self.registry.len();
        let Some(from) = from else {
            return if forward {
                self.first_reachable()
            } else {
                self.last_reachable()
            };
        };

        if self.config.wrap {
            (1..=len)
                .map(|offset| {
                    if forward {
                        (from + offset) % len
                    } else {
                        (from + len - offset % len) % len
                    }
                })
                .find(|&i| self.reachable(i))
        } else if forward {
            (from + 1..len).find(|&i| self.reachable(i))
        } else {
            (0..from).rev().find(|&i| self.reachable(i))
        }
    }

    /// Move by a page, clamped to the ends.
    ///
    /// Lands on the furthest reachable item within the page; if the whole
    /// page is skippable, on the first reachable item beyond it.
    fn page(&self, from: Option<usize>, forward: bool) -> Option<usize> {
        let len = self.registry.len();
        let Some(from) = from else {
            return self.step(None, forward);
        };
        let page = self.page_size();

        if forward {
            let target = from.saturating_add(page).min(len.saturating_sub(1));
            (from + 1..=target)
                .rev()
                .find(|&i| self.reachable(i))
                .or_else(|| (target + 1..len).find(|&i| self.reachable(i)))
        } else {
            let target = from.saturating_sub(page);
            (target..from)
                .find(|&i| self.reachable(i))
                .or_else(|| (0..target).rev().find(|&i| self.reachable(i)))
        }
    }

    /// Feed a typed character to the matcher.
    pub fn typeahead_target(&mut self, c: char) -> Option<usize> {
        let start = self.active_index();
        let TrackerInner {
            registry,
            skip,
            typeahead,
            ..
        } = self;
        let skip = &*skip;
        typeahead.type_char_with(c, registry.items(), start, |item| skipped(skip, item))
    }

    /// Make the item at `index` active. Returns true if the active item changed.
    pub fn activate_index(&mut self, index: usize) -> bool {
        let Some(item) = self.registry.get(index).cloned() else {
            return false;
        };
        self.assign(Some(item))
    }

    /// Replace the active item. Returns true if it changed.
    pub fn assign(&mut self, item: Option<Arc<I>>) -> bool {
        if same_opt(self.active.as_ref(), item.as_ref()) {
            return false;
        }
        log::debug!(
            "[tracker] active {:?} -> {:?}",
            self.active.as_ref().map(|a| a.label()),
            item.as_ref().map(|a| a.label())
        );
        self.active = item;
        true
    }

    /// Re-home the active item after the registry was replaced.
    ///
    /// `old_index` is where the active item sat before the replacement. If
    /// it is gone, that index is clamped into the new sequence and the
    /// nearest reachable item wins, searching the clamped slot first and
    /// then alternating after/before. Returns true if the active item
    /// changed.
    pub fn repair(&mut self, old_index: Option<usize>) -> bool {
        let Some(active) = self.active.as_ref() else {
            return false;
        };
        if self.registry.contains(active) {
            return false;
        }

        let len = self.registry.len();
        let replacement = if len == 0 {
            None
        } else {
            let clamped = old_index.unwrap_or(0).min(len - 1);
            (0..len)
                .flat_map(|distance| {
                    let after = clamped.checked_add(distance).filter(|&i| i < len);
                    let before = if distance == 0 {
                        None
                    } else {
                        clamped.checked_sub(distance)
                    };
                    after.into_iter().chain(before)
                })
                .find(|&i| self.reachable(i))
        };

        log::debug!(
            "[tracker] active item removed (was at {:?}), repaired to {:?}",
            old_index,
            replacement
        );
        let item = replacement.and_then(|i| self.registry.get(i).cloned());
        self.active = item;
        true
    }
}
