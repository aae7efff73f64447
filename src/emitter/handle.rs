//! Subscription identity.

use std::fmt;
use std::rc::Rc;

use uuid::Uuid;

/// Unique identifier for a subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(Uuid);

impl SubscriptionId {
    /// Create a new random subscription id.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SubscriptionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque token returned by registration, used to cancel that one listener.
///
/// Every registration mints a fresh handle, so registering the same callback
/// twice yields two handles that compare unequal and cancel independently.
/// A handle keeps neither the emitter nor the listener alive; once the
/// listener is gone, passing the handle to [`Emitter::off`](crate::Emitter::off)
/// does nothing.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Handle {
    id: SubscriptionId,
    event_name: Rc<str>,
}

impl Handle {
    pub(crate) const fn new(id: SubscriptionId, event_name: Rc<str>) -> Self {
        Self { id, event_name }
    }

    pub(crate) const fn id(&self) -> SubscriptionId {
        self.id
    }

    pub(crate) fn event_name(&self) -> &str {
        &self.event_name
    }
}
