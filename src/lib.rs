//! # vertebrate - a minimal synchronous event emitter
//!
//! Listeners are registered under an event name, optionally limited to a
//! number of invocations, and called in registration order whenever that
//! event is triggered. Each registration returns a [`Handle`] that cancels
//! exactly that listener.
//!
//! ## Core Concepts
//!
//! - **Emitter**: owns the per-event listener lists and dispatches events
//! - **Handle**: opaque token identifying one registration
//! - **Count**: how many more times a listener may fire, or unbounded
//!
//! ## Usage
//!
//! ```rust
//! use vertebrate::{Count, Emitter};
//!
//! let emitter: Emitter<Vec<i32>> = Emitter::new();
//!
//! let handle = emitter.on("test-event", |_, args| println!("got {args:?}"));
//! emitter.on_limited("test-event", |_, _| {}, 2)?;
//! emitter.on_limited("test-event", |_, _| {}, Count::Unbounded)?;
//!
//! assert_eq!(emitter.trigger("test-event", &vec![1, 2, 3]), 3);
//!
//! emitter.off(&handle);
//! emitter.all_off(Some("test-event"));
//! assert!(!emitter.has_listeners("test-event"));
//! # Ok::<(), vertebrate::EmitterError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod count;
pub mod emitter;
pub mod error;

// Re-export primary types at crate root for convenience
pub use config::EmitterConfig;
pub use count::{Count, IntoCount};
pub use emitter::{Emitter, Handle};
pub use error::{EmitterError, EmitterResult, ValidationError};
