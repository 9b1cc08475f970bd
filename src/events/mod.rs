//! Ordered listener registry.
//!
//! `Emitter` is the event-sequence primitive the model's event channel is
//! built on: per name, an insertion-ordered list of callbacks with an
//! optional bound context. It is instance-local state; nothing here is
//! shared across emitters.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use serde_json::Value;

/// A listener callback.
///
/// The first argument is the receiver: the bound context supplied at
/// registration, or the emitting instance when none was. Remaining emit
/// arguments are forwarded as the slice.
pub type Callback<C> = Arc<dyn Fn(&C, &[Value]) + Send + Sync>;

struct Entry<C> {
    callback: Callback<C>,
    context: Option<C>,
}

impl<C: Clone> Clone for Entry<C> {
    fn clone(&self) -> Self {
        Self {
            callback: Arc::clone(&self.callback),
            context: self.context.clone(),
        }
    }
}

/// Ordered listener registry keyed by event name.
///
/// `C` is the receiver type delivered to callbacks. Listener removal
/// matches on callback pointer identity, so binding the same `Arc` twice
/// yields two invocations per emit and a single `off` removes both.
pub struct Emitter<C> {
    listeners: Mutex<HashMap<String, Vec<Entry<C>>>>,
}

impl<C: Clone> Emitter<C> {
    pub fn new() -> Self {
        Self {
            listeners: Mutex::new(HashMap::new()),
        }
    }

    /// Append a listener for `event`, creating the list if absent.
    /// No de-duplication.
    pub fn on(&self, event: &str, callback: Callback<C>, context: Option<C>) {
        self.listeners
            .lock()
            .entry(event.to_string())
            .or_default()
            .push(Entry { callback, context });
    }

    /// Remove every listener for `event` whose callback is pointer-equal
    /// to `callback`. Unknown event or unbound callback: no-op.
    pub fn off(&self, event: &str, callback: &Callback<C>) {
        let mut listeners = self.listeners.lock();
        let mut drained = false;
        if let Some(entries) = listeners.get_mut(event) {
            entries.retain(|entry| !Arc::ptr_eq(&entry.callback, callback));
            drained = entries.is_empty();
        }
        if drained {
            listeners.remove(event);
        }
    }

    /// Invoke every listener currently bound for `event`, in insertion
    /// order, forwarding `args`. Listeners bound with a context receive
    /// it as the receiver; the rest receive `receiver`.
    ///
    /// The listener list is snapshotted before invocation, so a callback
    /// may re-enter `on`/`off` without affecting the in-flight emit.
    pub fn emit(&self, event: &str, receiver: &C, args: &[Value]) {
        let entries: Vec<Entry<C>> = match self.listeners.lock().get(event) {
            Some(entries) => entries.clone(),
            None => return,
        };
        tracing::trace!(event, listeners = entries.len(), "emit");
        for entry in &entries {
            let target = entry.context.as_ref().unwrap_or(receiver);
            (entry.callback)(target, args);
        }
    }

    /// Number of listeners currently bound for `event`.
    pub fn listener_count(&self, event: &str) -> usize {
        self.listeners.lock().get(event).map_or(0, Vec::len)
    }
}

impl<C: Clone> Default for Emitter<C> {
    fn default() -> Self {
        Self::new()
    }
}
