// Copyright (c) 2026 FreeRTOS Rust Contributors
// SPDX-License-Identifier: Apache-2.0

//! Higher level synchronization primitives.
//!
//! These are modeled after the synchronization primitives in
//! [`std::sync`](https://doc.rust-lang.org/stable/std/sync/index.html), in
//! as much as it makes sense on a kernel of this kind: [`Mutex`] owns the
//! data it protects and hands out an RAII guard, and [`Condvar`] pairs with
//! it for monitor-style waiting.
//!
//! [`CondFlags`] has no std counterpart.  It is the level-triggered sibling
//! of [`Condvar`]: instead of consuming transient wake tokens, waiters block
//! on persistent event bits, choosing per call whether any or all requested
//! bits must be present and whether to consume them.  The two are different
//! trade-offs, not redundant — `Condvar` delivers edge-triggered single
//! events exactly once per waiter, `CondFlags` keeps state until someone
//! clears it.

pub mod atomic {
    //! Re-export portable atomic.
    //!
    //! Although `core` contains a
    //! [`sync::atomic`](https://doc.rust-lang.org/stable/core/sync/atomic/index.html)
    //! module, these are dependent on the target having atomic instructions,
    //! and the types are missing when the platform cannot support them.  In
    //! the Rust-embedded world this is papered over by the
    //! [`portable-atomic`](https://crates.io/crates/portable-atomic) crate,
    //! which will either just re-export the types from core, or provide an
    //! implementation using critical sections when those aren't available.

    pub use portable_atomic::*;
}

mod condvar;
mod flags;
mod mutex;

pub use condvar::{Condvar, WaitTimeoutResult};
pub use flags::{CondFlags, Flags};
pub use mutex::{LockResult, Mutex, MutexGuard, TryLockError, TryLockResult};
