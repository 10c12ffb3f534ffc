// Copyright (c) 2026 FreeRTOS Rust Contributors
// SPDX-License-Identifier: Apache-2.0

//! Kernel mutex wrapper.
//!
//! A thin wrapper around the kernel mutex.  This is not recursive: a thread
//! that tries to re-lock a mutex it already holds will wait on itself.
//! Mutexes are thread-context objects and are never usable from interrupt
//! handlers.
//!
//! Note that memory safety is not what this type protects — there is no
//! data inside.  For a mutex that owns the data it guards, see
//! [`crate::sync::Mutex`].

use core::fmt;

use crate::cpu::{self, ThreadId};
use crate::error::{to_result, Error, Result};
use crate::port;
use crate::time::Timeout;

/// A kernel mutex with priority inheritance and an owner query.
pub struct Mutex {
    raw: port::RawMutex,
}

unsafe impl Send for Mutex {}
unsafe impl Sync for Mutex {}

impl Mutex {
    /// Create a new, unlocked mutex.
    ///
    /// Thread context only.
    pub fn new() -> Result<Mutex> {
        assert!(!cpu::is_in_isr(), "cannot create kernel objects in an ISR");
        match port::RawMutex::new() {
            Some(raw) => Ok(Mutex { raw }),
            None => Err(Error::NoMemory),
        }
    }

    /// Acquire the mutex, waiting up to `timeout` for the current holder to
    /// release it.
    ///
    /// Thread context only.
    pub fn lock<D>(&self, timeout: D) -> Result<()>
    where
        D: Into<Timeout>,
    {
        assert!(!cpu::is_in_isr(), "mutexes are not ISR callable");
        to_result(self.raw.lock(timeout.into()), Error::Timeout)
    }

    /// Release the mutex.
    ///
    /// The same thread must unlock the mutex that has locked it; anything
    /// else is a programming error and asserts.
    pub fn unlock(&self) {
        assert!(!cpu::is_in_isr(), "mutexes are not ISR callable");
        assert!(
            self.held_by_current_thread(),
            "mutex unlocked by a thread that does not hold it"
        );
        let released = self.raw.unlock();
        debug_assert!(released);
    }

    /// The thread currently holding the mutex, if any.
    pub fn owner(&self) -> Option<ThreadId> {
        self.raw.holder().map(ThreadId)
    }

    /// Does the calling thread hold the mutex?
    pub fn held_by_current_thread(&self) -> bool {
        self.owner() == Some(cpu::current_thread())
    }
}

impl fmt::Debug for Mutex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sys::Mutex")
    }
}
