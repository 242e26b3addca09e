//! Ordered item registry with identity diffs.

use std::collections::HashSet;
use std::sync::Arc;

use crate::error::RegistryError;
use crate::item::{addr, position_of};

/// Items that entered and left a sequence.
///
/// Returned by registry replacement and by selection operations. `added`
/// follows the order of the new sequence, `removed` the order of the old one.
#[derive(Debug)]
pub struct ItemDiff<I: ?Sized> {
    pub added: Vec<Arc<I>>,
    pub removed: Vec<Arc<I>>,
}

impl<I: ?Sized> ItemDiff<I> {
    /// A diff with nothing added or removed.
    pub fn empty() -> Self {
        Self {
            added: Vec::new(),
            removed: Vec::new(),
        }
    }

    /// Check if nothing changed.
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

impl<I: ?Sized> Default for ItemDiff<I> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<I: ?Sized> Clone for ItemDiff<I> {
    fn clone(&self) -> Self {
        Self {
            added: self.added.clone(),
            removed: self.removed.clone(),
        }
    }
}

/// The current ordered sequence of item handles.
///
/// Insertion order is navigation order. The registry holds no other state.
#[derive(Debug)]
pub struct ItemRegistry<I: ?Sized> {
    items: Vec<Arc<I>>,
}

impl<I: ?Sized> Default for ItemRegistry<I> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<I: ?Sized> ItemRegistry<I> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current items in navigation order.
    pub fn items(&self) -> &[Arc<I>] {
        &self.items
    }

    /// Number of registered items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Item at `index`.
    pub fn get(&self, index: usize) -> Option<&Arc<I>> {
        self.items.get(index)
    }

    /// Index of `item`, by identity.
    pub fn index_of(&self, item: &Arc<I>) -> Option<usize> {
        position_of(&self.items, item)
    }

    /// Check if `item` is registered.
    pub fn contains(&self, item: &Arc<I>) -> bool {
        self.index_of(item).is_some()
    }

    /// Replace the sequence and return what was added and removed.
    ///
    /// Repeated handles keep their first position; later repeats are dropped.
    pub fn set_items(&mut self, items: Vec<Arc<I>>) -> ItemDiff<I> {
        let mut seen = HashSet::with_capacity(items.len());
        let mut unique = Vec::with_capacity(items.len());
        for (index, item) in items.into_iter().enumerate() {
            if seen.insert(addr(&item)) {
                unique.push(item);
            } else {
                log::warn!("[registry] dropping duplicate item handle at index {}", index);
            }
        }
        self.replace(unique)
    }

    /// Replace the sequence, rejecting it if any handle appears twice.
    ///
    /// On error the registry is left unchanged.
    pub fn try_set_items(&mut self, items: Vec<Arc<I>>) -> Result<ItemDiff<I>, RegistryError> {
        let mut seen = HashSet::with_capacity(items.len());
        if let Some(index) = items.iter().position(|item| !seen.insert(addr(item))) {
            return Err(RegistryError::DuplicateItem { index });
        }
        Ok(self.replace(items))
    }

    fn replace(&mut self, items: Vec<Arc<I>>) -> ItemDiff<I> {
        let old: HashSet<_> = self.items.iter().map(addr).collect();
        let new: HashSet<_> = items.iter().map(addr).collect();

        let added = items
            .iter()
            .filter(|item| !old.contains(&addr(*item)))
            .cloned()
            .collect();
        let removed = self
            .items
            .iter()
            .filter(|item| !new.contains(&addr(*item)))
            .cloned()
            .collect();

        self.items = items;
        ItemDiff { added, removed }
    }
}
