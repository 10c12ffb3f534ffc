// Copyright (c) 2026 FreeRTOS Rust Contributors
// SPDX-License-Identifier: Apache-2.0

//! Shallow-copy message queue.
//!
//! A wrapper around the kernel queue.  The queue stores up to `N` items of
//! type `T` by copy — the kernel moves raw bytes, which is why items are
//! bounded to `T: Copy`.  Blocking sends and receives may only be used from
//! thread context; in interrupt context every operation must be called with
//! a zero timeout and is routed to the FromISR variant of the kernel call,
//! requesting a context switch on interrupt exit when it unblocked a higher
//! priority thread.
//!
//! The single-slot instantiation `Queue<T, 1>` doubles as a rendezvous
//! channel: [`replace`] overwrites any undelivered item instead of waiting
//! for space, which is the delivery mechanism the condition variable in
//! [`crate::sync`] is built on.
//!
//! [`replace`]: Queue::replace

use core::fmt;

use crate::cpu;
use crate::error::{to_result, Error, Result};
use crate::port;
use crate::time::Timeout;

/// A thread- and ISR-safe bounded queue storing shallow copies of its
/// elements.
pub struct Queue<T: Copy, const N: usize> {
    raw: port::RawQueue<T, N>,
}

// The kernel (or the hosted simulation) serializes all access internally.
unsafe impl<T: Copy + Send, const N: usize> Send for Queue<T, N> {}
unsafe impl<T: Copy + Send, const N: usize> Sync for Queue<T, N> {}

impl<T: Copy, const N: usize> Queue<T, N> {
    /// Create a new queue with room for `N` elements.
    ///
    /// Thread context only.  Fails only when the kernel cannot allocate the
    /// queue storage.
    pub fn new() -> Result<Queue<T, N>> {
        assert!(!cpu::is_in_isr(), "cannot create kernel objects in an ISR");
        match port::RawQueue::new() {
            Some(raw) => Ok(Queue { raw }),
            None => Err(Error::NoMemory),
        }
    }

    /// Copy `value` to the back of the queue, waiting up to `timeout` for
    /// space.
    ///
    /// Thread and ISR context callable (ISR only with a zero timeout).
    pub fn send<D>(&self, value: T, timeout: D) -> Result<()>
    where
        D: Into<Timeout>,
    {
        let timeout = timeout.into();
        if !cpu::is_in_isr() {
            to_result(self.raw.send_back(value, timeout), full_error(timeout))
        } else {
            // cannot wait in ISR
            assert!(timeout.is_no_wait(), "ISR calls must not wait");
            let (ok, needs_yield) = self.raw.send_back_isr(value);
            cpu::yield_from_isr(needs_yield);
            to_result(ok, Error::QueueFull)
        }
    }

    /// Copy `value` to the front of the queue, waiting up to `timeout` for
    /// space.  The value will be the next one received.
    ///
    /// Thread and ISR context callable (ISR only with a zero timeout).
    pub fn send_front<D>(&self, value: T, timeout: D) -> Result<()>
    where
        D: Into<Timeout>,
    {
        let timeout = timeout.into();
        if !cpu::is_in_isr() {
            to_result(self.raw.send_front(value, timeout), full_error(timeout))
        } else {
            // cannot wait in ISR
            assert!(timeout.is_no_wait(), "ISR calls must not wait");
            let (ok, needs_yield) = self.raw.send_front_isr(value);
            cpu::yield_from_isr(needs_yield);
            to_result(ok, Error::QueueFull)
        }
    }

    /// Copy `value` into the queue, overwriting the current element.
    ///
    /// Never waits and never fails.  Meant for single-slot queues only,
    /// where the queue acts as a mailbox holding the most recent value.
    ///
    /// Thread and ISR context callable.
    pub fn replace(&self, value: T) {
        debug_assert!(N == 1, "replace is for single-slot queues");
        let displaced = if !cpu::is_in_isr() {
            self.raw.replace(value)
        } else {
            let (displaced, needs_yield) = self.raw.replace_isr(value);
            cpu::yield_from_isr(needs_yield);
            displaced
        };
        if displaced {
            log::trace!("queue replace discarded an undelivered message");
        }
    }

    /// Copy the front element out of the queue and remove it, waiting up to
    /// `timeout` for one to arrive.
    ///
    /// Thread and ISR context callable (ISR only with a zero timeout).
    pub fn recv<D>(&self, timeout: D) -> Result<T>
    where
        D: Into<Timeout>,
    {
        let timeout = timeout.into();
        let value = if !cpu::is_in_isr() {
            self.raw.recv(timeout)
        } else {
            // cannot wait in ISR
            assert!(timeout.is_no_wait(), "ISR calls must not wait");
            let (value, needs_yield) = self.raw.recv_isr();
            cpu::yield_from_isr(needs_yield);
            value
        };
        value.ok_or(empty_error(timeout))
    }

    /// Copy the front element without removing it.
    ///
    /// Thread and ISR context callable (ISR only with a zero timeout).
    pub fn peek<D>(&self, timeout: D) -> Result<T>
    where
        D: Into<Timeout>,
    {
        let timeout = timeout.into();
        let value = if !cpu::is_in_isr() {
            self.raw.peek(timeout)
        } else {
            // cannot wait in ISR
            assert!(timeout.is_no_wait(), "ISR calls must not wait");
            self.raw.peek_isr()
        };
        value.ok_or(empty_error(timeout))
    }

    /// Send without waiting; fails with [`Error::QueueFull`] when there is
    /// no space.
    pub fn try_send(&self, value: T) -> Result<()> {
        self.send(value, Timeout(0))
    }

    /// Receive without waiting; fails with [`Error::QueueEmpty`] when there
    /// is nothing queued.
    pub fn try_recv(&self) -> Result<T> {
        self.recv(Timeout(0))
    }

    /// Number of elements currently queued.
    pub fn len(&self) -> usize {
        self.raw.len()
    }

    /// Number of free element slots.
    pub fn available(&self) -> usize {
        self.raw.spaces()
    }

    /// Maximum number of elements.
    pub fn capacity(&self) -> usize {
        N
    }

    /// Is the queue empty?
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Is the queue full?
    pub fn is_full(&self) -> bool {
        self.len() == N
    }

    /// Flush the queue back to its initial empty state.
    ///
    /// Thread context only.
    pub fn reset(&self) {
        assert!(!cpu::is_in_isr(), "reset is not ISR callable");
        self.raw.reset();
    }
}

fn full_error(timeout: Timeout) -> Error {
    if timeout.is_no_wait() {
        Error::QueueFull
    } else {
        Error::Timeout
    }
}

fn empty_error(timeout: Timeout) -> Error {
    if timeout.is_no_wait() {
        Error::QueueEmpty
    } else {
        Error::Timeout
    }
}

impl<T: Copy, const N: usize> fmt::Debug for Queue<T, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sys::Queue<{}>", N)
    }
}
