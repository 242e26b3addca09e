//! Typeahead: resolve typed characters to an item by label prefix.

use std::sync::Arc;
use std::time::Duration;

use crate::clock::{Clock, SystemClock};
use crate::config::DEFAULT_TYPEAHEAD_TIMEOUT_MS;
use crate::item::Item;

/// Rolling buffer of recently typed characters.
///
/// Expiry is evaluated lazily on the next keystroke; nothing runs in the
/// background.
///
/// # Example
///
/// ```ignore
/// let mut matcher = TypeaheadMatcher::new(Duration::from_millis(500));
/// // Active item is index 0; find the next item starting with "b".
/// let next = matcher.type_char('b', &items, Some(0));
/// ```
pub struct TypeaheadMatcher {
    buffer: String,
    last_keystroke: Option<Duration>,
    timeout: Duration,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for TypeaheadMatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypeaheadMatcher")
            .field("buffer", &self.buffer)
            .field("last_keystroke", &self.last_keystroke)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl Default for TypeaheadMatcher {
    fn default() -> Self {
        Self::new(Duration::from_millis(DEFAULT_TYPEAHEAD_TIMEOUT_MS))
    }
}

impl TypeaheadMatcher {
    /// Create a matcher on the system clock.
    pub fn new(timeout: Duration) -> Self {
        Self::with_clock(timeout, Arc::new(SystemClock::new()))
    }

    /// Create a matcher on a custom clock.
    pub fn with_clock(timeout: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            buffer: String::new(),
            last_keystroke: None,
            timeout,
            clock,
        }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn set_timeout(&mut self, timeout: Duration) {
        self.timeout = timeout;
    }

    /// Characters typed since the buffer last started over.
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// Check if the buffer holds characters typed within the timeout.
    pub fn is_pending(&self) -> bool {
        match self.last_keystroke {
            Some(last) => {
                !self.buffer.is_empty() && self.clock.now().saturating_sub(last) <= self.timeout
            }
            None => false,
        }
    }

    /// Forget the typed characters.
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.last_keystroke = None;
    }

    /// Type a character and find the next matching item after `start`,
    /// passing over skippable items.
    pub fn type_char<I: Item + ?Sized>(
        &mut self,
        c: char,
        candidates: &[Arc<I>],
        start: Option<usize>,
    ) -> Option<usize> {
        self.type_char_with(c, candidates, start, |item| item.is_skippable())
    }

    /// Like [`type_char`](Self::type_char) with a custom skip rule.
    ///
    /// The scan begins right after `start` (or at the first item when there
    /// is no start) and wraps, so `start` itself is the last candidate.
    /// When nothing matches the buffer is kept so further typing can refine
    /// the query.
    pub fn type_char_with<I, F>(
        &mut self,
        c: char,
        candidates: &[Arc<I>],
        start: Option<usize>,
        skip: F,
    ) -> Option<usize>
    where
        I: Item + ?Sized,
        F: Fn(&I) -> bool,
    {
        self.push(c);

        let len = candidates.len();
        if len == 0 {
            return None;
        }

        let query = self.query();
        let first = start.map(|index| (index + 1) % len).unwrap_or(0);
        let found = (0..len)
            .map(|offset| (first + offset) % len)
            .find(|&index| {
                let item = &candidates[index];
                !skip(item) && item.label().to_lowercase().starts_with(&query)
            });

        log::trace!(
            "[typeahead] buffer={:?} query={:?} start={:?} -> {:?}",
            self.buffer,
            query,
            start,
            found
        );
        found
    }

    fn push(&mut self, c: char) {
        let now = self.clock.now();
        let expired = match self.last_keystroke {
            Some(last) => now.saturating_sub(last) > self.timeout,
            None => true,
        };
        if expired {
            self.buffer.clear();
        }
        self.buffer.push(c);
        self.last_keystroke = Some(now);
    }

    /// Lowercased search string. A run of one repeated character ("bbb")
    /// searches for that single character, so repeated presses cycle
    /// through the items sharing an initial.
    fn query(&self) -> String {
        let lowered = self.buffer.to_lowercase();
        let mut chars = lowered.chars();
        match chars.next() {
            Some(first) if chars.all(|c| c == first) => first.to_string(),
            _ => lowered,
        }
    }
}
