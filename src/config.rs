//! Emitter configuration.

use serde::{Deserialize, Serialize};

/// Default listener count per event above which a warning is logged.
pub const DEFAULT_MAX_LISTENERS: usize = 10;

/// Tuning knobs for an [`Emitter`](crate::Emitter).
///
/// None of these change dispatch semantics. Missing fields take their
/// defaults when deserializing, so a partial JSON object is a valid config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmitterConfig {
    /// Initial capacity of the event-name map.
    pub event_capacity: usize,
    /// Initial capacity of each newly created per-event listener list.
    pub listener_capacity: usize,
    /// Listener count per event above which a leak warning is logged.
    /// `None` disables the warning.
    pub max_listeners: Option<usize>,
}

impl Default for EmitterConfig {
    fn default() -> Self {
        Self {
            event_capacity: 0,
            listener_capacity: 0,
            max_listeners: Some(DEFAULT_MAX_LISTENERS),
        }
    }
}
