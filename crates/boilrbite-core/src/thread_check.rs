//! Owner-thread checks for list state.
//!
//! A reconciler is `Send + Sync` so observers can hold it, but its mutations
//! are only valid from the thread that created it (the host's UI thread).
//! [`ThreadAffinity`] records that owner and, in debug builds, panics when a
//! mutation arrives from anywhere else. Release builds skip the check.
//!
//! ```
//! use boilrbite_core::ThreadAffinity;
//!
//! let affinity = ThreadAffinity::current();
//! assert!(affinity.is_owner());
//! affinity.debug_assert_same_thread();
//! ```

use std::thread::{self, ThreadId};

/// The thread that owns a piece of list state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThreadAffinity {
    owner: ThreadId,
}

impl ThreadAffinity {
    /// Binds to the calling thread.
    pub fn current() -> Self {
        Self {
            owner: thread::current().id(),
        }
    }

    /// Returns `true` when called from the owning thread.
    #[inline]
    pub fn is_owner(&self) -> bool {
        thread::current().id() == self.owner
    }

    /// Panics in debug builds when called off the owning thread.
    #[inline]
    #[track_caller]
    pub fn debug_assert_same_thread(&self) {
        debug_assert!(
            self.is_owner(),
            "list state owned by {:?} was mutated from thread {:?} ({})",
            self.owner,
            thread::current().id(),
            thread::current().name().unwrap_or("<unnamed>"),
        );
    }
}
