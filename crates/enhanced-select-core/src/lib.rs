//! Core systems for Enhanced Select.
//!
//! This crate provides the foundational plumbing used by the
//! `enhanced-select` engine, with no selection semantics of its own:
//!
//! - **Signal/Slot System**: Type-safe change notification
//! - **Scheduler**: One-shot task scheduling, the primitive behind
//!   debounced filter input
//! - **Errors**: Shared error types
//! - **Logging**: `tracing` target names for log filtering
//!
//! # Signal/Slot Example
//!
//! ```
//! use enhanced_select_core::Signal;
//!
//! // Create a signal that notifies when a value changes
//! let value_changed = Signal::<i32>::new();
//!
//! // Connect a slot to handle the signal
//! let conn_id = value_changed.connect(|value| {
//!     println!("Value changed to: {}", value);
//! });
//!
//! // Emit the signal
//! value_changed.emit(42);
//!
//! // Disconnect when done
//! value_changed.disconnect(conn_id);
//! ```

mod error;
pub mod logging;
mod scheduler;
mod signal;

pub use error::{Error, Result};
pub use scheduler::{ScheduledTaskId, SharedTaskScheduler, TaskScheduler};
pub use signal::{ConnectionGuard, ConnectionId, Signal};
