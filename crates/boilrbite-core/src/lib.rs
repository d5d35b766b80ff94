//! Core systems for BoilrBite.
//!
//! This crate provides the infrastructure the list layer is built on:
//!
//! - **Signal/Slot System**: Type-safe observer notifications
//! - **Errors**: The configuration error taxonomy
//! - **Logging**: `tracing` targets and span names per subsystem
//! - **Thread Checks**: Affinity assertions for single-threaded state
//!
//! # Signal/Slot Example
//!
//! ```
//! use boilrbite_core::Signal;
//!
//! let selection_changed = Signal::<Option<usize>>::new();
//!
//! let conn_id = selection_changed.connect(|index| {
//!     println!("Selection is now {:?}", index);
//! });
//!
//! selection_changed.emit(Some(2));
//! selection_changed.disconnect(conn_id);
//! ```

mod error;
pub mod logging;
pub mod signal;
pub mod thread_check;

pub use error::{BoilrBiteError, Result, SignalError};
pub use logging::PerfSpan;
pub use signal::{ConnectionGuard, ConnectionId, Signal};
pub use thread_check::ThreadAffinity;
