//! Change notification shared by the engines.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

/// Handler invoked after a state change. It receives no arguments; the host
/// re-reads whatever state it needs.
pub type ChangeCallback = Arc<dyn Fn() + Send + Sync>;

/// Single registered change handler plus a dirty flag.
///
/// The handler is cloned out of its lock before being called, and engines
/// only call [`notify`](Notifier::notify) after releasing their own state
/// lock, so a handler may call back into the engine that notified it.
#[derive(Clone, Default)]
pub(crate) struct Notifier {
    callback: Arc<RwLock<Option<ChangeCallback>>>,
    dirty: Arc<AtomicBool>,
}

impl std::fmt::Debug for Notifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Notifier")
            .field("registered", &self.is_registered())
            .field("dirty", &self.is_dirty())
            .finish()
    }
}

impl Notifier {
    pub fn set(&self, callback: ChangeCallback) {
        if let Ok(mut guard) = self.callback.write() {
            *guard = Some(callback);
        }
    }

    pub fn clear(&self) {
        if let Ok(mut guard) = self.callback.write() {
            *guard = None;
        }
    }

    pub fn is_registered(&self) -> bool {
        self.callback
            .read()
            .map(|guard| guard.is_some())
            .unwrap_or(false)
    }

    /// Mark dirty and run the handler, if any.
    pub fn notify(&self) {
        self.dirty.store(true, Ordering::SeqCst);
        let callback = self
            .callback
            .read()
            .ok()
            .and_then(|guard| guard.as_ref().map(Arc::clone));
        if let Some(callback) = callback {
            callback();
        }
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::SeqCst)
    }

    pub fn clear_dirty(&self) {
        self.dirty.store(false, Ordering::SeqCst);
    }
}
