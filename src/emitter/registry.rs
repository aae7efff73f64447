//! Per-emitter listener storage.
//!
//! The registry maps event names to listeners in registration order. It never
//! runs callbacks itself: dispatch takes a snapshot of one list and walks it
//! with the registry unborrowed, so callbacks are free to re-enter the
//! emitter. Removed listeners are tombstoned as well as unlinked, which is
//! how an in-flight snapshot learns to skip them.

use std::cell::Cell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::count::Count;

use super::handle::{Handle, SubscriptionId};
use super::Emitter;

/// Listener signature: the emitting emitter as context, then the arguments.
pub(crate) type Callback<A> = dyn Fn(&Emitter<A>, &A);

/// One registered listener.
pub(crate) struct Subscription<A> {
    id: SubscriptionId,
    event_name: Rc<str>,
    callback: Box<Callback<A>>,
    remaining: Cell<Count>,
    active: Cell<bool>,
}

impl<A> Subscription<A> {
    pub(crate) const fn id(&self) -> SubscriptionId {
        self.id
    }

    pub(crate) fn event_name(&self) -> &str {
        &self.event_name
    }

    pub(crate) fn is_active(&self) -> bool {
        self.active.get()
    }

    /// Reserves one invocation.
    ///
    /// Returns `None` if the listener was already removed, otherwise whether
    /// this invocation was its last. An exhausted listener is tombstoned here,
    /// before its callback runs, so a reentrant dispatch cannot fire it again.
    pub(crate) fn claim(&self) -> Option<bool> {
        if !self.is_active() {
            return None;
        }
        match self.remaining.get().consume() {
            Some(left) => {
                self.remaining.set(left);
                Some(false)
            }
            None => {
                self.active.set(false);
                Some(true)
            }
        }
    }

    pub(crate) fn invoke(&self, emitter: &Emitter<A>, args: &A) {
        (self.callback)(emitter, args);
    }

    fn cancel(&self) {
        self.active.set(false);
    }
}

impl<A> fmt::Debug for Subscription<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("event_name", &self.event_name)
            .field("remaining", &self.remaining.get())
            .field("active", &self.active.get())
            .finish_non_exhaustive()
    }
}

pub(crate) struct Registry<A> {
    events: HashMap<Rc<str>, Vec<Rc<Subscription<A>>>>,
    listener_capacity: usize,
}

impl<A> Registry<A> {
    pub(crate) fn with_capacity(event_capacity: usize, listener_capacity: usize) -> Self {
        Self {
            events: HashMap::with_capacity(event_capacity),
            listener_capacity,
        }
    }

    /// Appends a listener to `event_name`, creating the list if needed.
    ///
    /// Returns the handle and the list's new length.
    pub(crate) fn insert(
        &mut self,
        event_name: &str,
        callback: Box<Callback<A>>,
        count: Count,
    ) -> (Handle, usize) {
        let event_name = match self.events.get_key_value(event_name) {
            Some((key, _)) => Rc::clone(key),
            None => Rc::from(event_name),
        };
        let id = SubscriptionId::new();

        let subscription = Rc::new(Subscription {
            id,
            event_name: Rc::clone(&event_name),
            callback,
            remaining: Cell::new(count),
            active: Cell::new(true),
        });

        let capacity = self.listener_capacity;
        let list = self
            .events
            .entry(Rc::clone(&event_name))
            .or_insert_with(|| Vec::with_capacity(capacity));
        list.push(subscription);
        let len = list.len();

        (Handle::new(id, event_name), len)
    }

    /// Unlinks and tombstones one listener. Missing lists and ids are not errors.
    pub(crate) fn remove(&mut self, event_name: &str, id: SubscriptionId) -> Option<Rc<Subscription<A>>> {
        let list = self.events.get_mut(event_name)?;
        let pos = list.iter().position(|s| s.id == id)?;
        let removed = list.remove(pos);
        removed.cancel();
        if list.is_empty() {
            self.events.remove(event_name);
        }
        Some(removed)
    }

    /// Unlinks and tombstones every listener of one event.
    pub(crate) fn remove_event(&mut self, event_name: &str) -> Vec<Rc<Subscription<A>>> {
        let removed = self.events.remove(event_name).unwrap_or_default();
        removed.iter().for_each(|s| s.cancel());
        removed
    }

    /// Unlinks and tombstones every listener.
    pub(crate) fn clear(&mut self) -> Vec<Rc<Subscription<A>>> {
        let removed: Vec<_> = self.events.drain().flat_map(|(_, list)| list).collect();
        removed.iter().for_each(|s| s.cancel());
        removed
    }

    /// Point-in-time copy of one event's listeners, in registration order.
    pub(crate) fn snapshot(&self, event_name: &str) -> Vec<Rc<Subscription<A>>> {
        self.events.get(event_name).cloned().unwrap_or_default()
    }

    pub(crate) fn contains(&self, event_name: &str, id: SubscriptionId) -> bool {
        self.events
            .get(event_name)
            .is_some_and(|list| list.iter().any(|s| s.id == id))
    }

    pub(crate) fn len(&self, event_name: &str) -> usize {
        self.events.get(event_name).map_or(0, Vec::len)
    }

    pub(crate) fn total(&self) -> usize {
        self.events.values().map(Vec::len).sum()
    }

    pub(crate) fn event_names(&self) -> Vec<String> {
        self.events.keys().map(|k| k.to_string()).collect()
    }
}
