//! The event emitter.
//!
//! An [`Emitter`] keeps, per event name, an ordered list of listeners. Each
//! listener is called with the emitter itself as context and the arguments
//! passed to [`Emitter::trigger`], and may be limited to a number of
//! invocations after which it removes itself.
//!
//! Everything is synchronous and single-threaded. Callbacks may re-enter the
//! emitter (register, remove, trigger) while a dispatch is in progress:
//! every dispatch walks a snapshot of the listener list taken when it
//! started, skipping entries removed in the meantime.

mod handle;
mod registry;

use std::cell::RefCell;
use std::fmt;

use tracing::{debug, trace, warn};

use crate::config::EmitterConfig;
use crate::count::{Count, IntoCount};
use crate::error::EmitterResult;

pub use handle::Handle;

use registry::{Callback, Registry};

/// Named-event registry with synchronous dispatch.
///
/// `A` is the argument type every listener receives; use a tuple, a `Vec`
/// or an enum to carry several positional values.
///
/// # Examples
///
/// ```
/// use std::cell::Cell;
/// use std::rc::Rc;
///
/// use vertebrate::Emitter;
///
/// let emitter: Emitter<(i32, i32)> = Emitter::new();
/// let total = Rc::new(Cell::new(0));
///
/// let sink = Rc::clone(&total);
/// let handle = emitter.on("add", move |_, &(a, b)| sink.set(sink.get() + a + b));
/// emitter.on_limited("add", |_, _| {}, 1).unwrap();
///
/// assert_eq!(emitter.trigger("add", &(1, 2)), 2);
/// assert_eq!(emitter.emit("add", &(3, 4)), 1);
/// assert_eq!(total.get(), 10);
///
/// emitter.off(&handle);
/// assert_eq!(emitter.trigger("add", &(5, 6)), 0);
/// ```
pub struct Emitter<A> {
    registry: RefCell<Registry<A>>,
    config: EmitterConfig,
}

impl<A> Emitter<A> {
    /// Creates an empty emitter with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(EmitterConfig::default())
    }

    /// Creates an empty emitter.
    #[must_use]
    pub fn with_config(config: EmitterConfig) -> Self {
        let registry = Registry::with_capacity(config.event_capacity, config.listener_capacity);
        Self {
            registry: RefCell::new(registry),
            config,
        }
    }

    /// The configuration this emitter was built with.
    #[must_use]
    pub const fn config(&self) -> &EmitterConfig {
        &self.config
    }

    /// Registers a listener that fires on every trigger of `event_name`
    /// until it is removed.
    ///
    /// Registering the same callback twice creates two independent listeners.
    pub fn on<F>(&self, event_name: &str, callback: F) -> Handle
    where
        F: Fn(&Self, &A) + 'static,
    {
        self.register(event_name, Box::new(callback), Count::Unbounded)
    }

    /// Registers a listener that fires at most `count` times.
    ///
    /// `count` may be anything implementing [`IntoCount`]; `Count::Unbounded`
    /// and `f64::INFINITY` mean no limit.
    ///
    /// # Errors
    ///
    /// Returns a validation error if `count` is not numeric, or is zero,
    /// negative or fractional. Nothing is registered in that case.
    pub fn on_limited<F, C>(&self, event_name: &str, callback: F, count: C) -> EmitterResult<Handle>
    where
        F: Fn(&Self, &A) + 'static,
        C: IntoCount,
    {
        let count = count.into_count()?;
        Ok(self.register(event_name, Box::new(callback), count))
    }

    /// Registers a listener that fires on the next trigger only.
    pub fn once<F>(&self, event_name: &str, callback: F) -> Handle
    where
        F: Fn(&Self, &A) + 'static,
    {
        self.register(event_name, Box::new(callback), Count::ONCE)
    }

    fn register(&self, event_name: &str, callback: Box<Callback<A>>, count: Count) -> Handle {
        let (handle, listeners) = self.registry.borrow_mut().insert(event_name, callback, count);

        trace!(
            event = event_name,
            subscription = %handle.id(),
            count = %count,
            "listener registered"
        );

        if let Some(max) = self.config.max_listeners {
            if listeners > max {
                warn!(
                    event = event_name,
                    listeners,
                    max_listeners = max,
                    "possible listener leak: listener count exceeds max_listeners"
                );
            }
        }

        handle
    }

    /// Removes the listener identified by `handle`.
    ///
    /// Stale handles (already removed, exhausted, cleared, or minted by
    /// another emitter) are ignored. Returns whether a listener was removed.
    pub fn off(&self, handle: &Handle) -> bool {
        let removed = self
            .registry
            .borrow_mut()
            .remove(handle.event_name(), handle.id());

        match removed {
            Some(_) => {
                trace!(event = handle.event_name(), subscription = %handle.id(), "listener removed");
                true
            }
            None => false,
        }
    }

    /// Removes every listener of `event_name`, or of every event when `None`.
    ///
    /// Returns how many listeners were removed. Other emitters are untouched.
    pub fn all_off(&self, event_name: Option<&str>) -> usize {
        let removed = {
            let mut registry = self.registry.borrow_mut();
            match event_name {
                Some(name) => registry.remove_event(name),
                None => registry.clear(),
            }
        };

        debug!(event = event_name, removed = removed.len(), "listeners cleared");
        removed.len()
    }

    /// Calls every listener of `event_name`, in registration order, with
    /// `args`. Unknown events are a no-op.
    ///
    /// Bounded listeners are removed as soon as their last invocation starts.
    /// Listeners added during this call are not called by it; listeners
    /// removed during it are skipped if their turn has not come yet.
    ///
    /// Returns how many callbacks ran.
    pub fn trigger(&self, event_name: &str, args: &A) -> usize {
        let snapshot = self.registry.borrow().snapshot(event_name);

        let mut invoked = 0;
        for subscription in &snapshot {
            let Some(exhausted) = subscription.claim() else {
                continue;
            };
            if exhausted {
                let _ = self
                    .registry
                    .borrow_mut()
                    .remove(subscription.event_name(), subscription.id());
                trace!(event = event_name, subscription = %subscription.id(), "listener exhausted");
            }
            subscription.invoke(self, args);
            invoked += 1;
        }

        trace!(event = event_name, invoked, "event dispatched");
        invoked
    }

    /// Alias of [`Emitter::trigger`].
    pub fn emit(&self, event_name: &str, args: &A) -> usize {
        self.trigger(event_name, args)
    }

    /// Number of listeners currently registered for `event_name`.
    #[must_use]
    pub fn listener_count(&self, event_name: &str) -> usize {
        self.registry.borrow().len(event_name)
    }

    /// Returns true if at least one listener is registered for `event_name`.
    #[must_use]
    pub fn has_listeners(&self, event_name: &str) -> bool {
        self.listener_count(event_name) > 0
    }

    /// Event names that currently have listeners, in no particular order.
    #[must_use]
    pub fn event_names(&self) -> Vec<String> {
        self.registry.borrow().event_names()
    }

    /// Returns true if the listener behind `handle` is still registered here.
    #[must_use]
    pub fn is_subscribed(&self, handle: &Handle) -> bool {
        self.registry.borrow().contains(handle.event_name(), handle.id())
    }
}

impl<A> Default for Emitter<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> fmt::Debug for Emitter<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (events, listeners) = match self.registry.try_borrow() {
            Ok(registry) => (registry.event_names().len(), registry.total()),
            Err(_) => (0, 0),
        };
        f.debug_struct("Emitter")
            .field("events", &events)
            .field("listeners", &listeners)
            .field("config", &self.config)
            .finish()
    }
}
