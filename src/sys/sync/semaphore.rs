// Copyright (c) 2026 FreeRTOS Rust Contributors
// SPDX-License-Identifier: Apache-2.0

//! Counting semaphore wrapper.
//!
//! Note that giving a semaphore that is already at its count limit discards
//! the give; where exact counting matters the caller must check the result.

use core::fmt;

use crate::cpu;
use crate::error::{to_result, Error, Result};
use crate::port;
use crate::time::Timeout;

/// A counting semaphore.
pub struct Semaphore {
    raw: port::RawSemaphore,
}

unsafe impl Send for Semaphore {}
unsafe impl Sync for Semaphore {}

impl Semaphore {
    /// Create a counting semaphore with the given initial count and count
    /// limit.
    ///
    /// Thread context only.
    pub fn new(initial: u32, limit: u32) -> Result<Semaphore> {
        assert!(!cpu::is_in_isr(), "cannot create kernel objects in an ISR");
        debug_assert!(initial <= limit);
        match port::RawSemaphore::new(initial, limit) {
            Some(raw) => Ok(Semaphore { raw }),
            None => Err(Error::NoMemory),
        }
    }

    /// Create a binary semaphore, initially not available.
    pub fn binary() -> Result<Semaphore> {
        Semaphore::new(0, 1)
    }

    /// Take the semaphore, waiting up to `timeout` for a count to become
    /// available.
    ///
    /// Thread and ISR context callable (ISR only with a zero timeout).
    pub fn take<D>(&self, timeout: D) -> Result<()>
    where
        D: Into<Timeout>,
    {
        let timeout = timeout.into();
        if !cpu::is_in_isr() {
            to_result(self.raw.take(timeout), Error::Timeout)
        } else {
            // cannot wait in ISR
            assert!(timeout.is_no_wait(), "ISR calls must not wait");
            let (ok, needs_yield) = self.raw.take_isr();
            cpu::yield_from_isr(needs_yield);
            to_result(ok, Error::Timeout)
        }
    }

    /// Give the semaphore, incrementing its count.
    ///
    /// Fails with [`Error::QueueFull`] at the count limit.  Thread and ISR
    /// context callable.
    pub fn give(&self) -> Result<()> {
        if !cpu::is_in_isr() {
            to_result(self.raw.give(), Error::QueueFull)
        } else {
            let (ok, needs_yield) = self.raw.give_isr();
            cpu::yield_from_isr(needs_yield);
            to_result(ok, Error::QueueFull)
        }
    }

    /// The current count.
    pub fn count(&self) -> usize {
        self.raw.count()
    }
}

impl fmt::Debug for Semaphore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sys::Semaphore")
    }
}
