// Copyright (c) 2026 FreeRTOS Rust Contributors
// SPDX-License-Identifier: Apache-2.0

//! Event group wrapper.
//!
//! An event group is a register of event bits that threads can block on.
//! Bits compose by OR regardless of the calling context, so no set is ever
//! lost; they persist until explicitly cleared or consumed by an exclusive
//! wait.  The kernel reserves the highest byte of the register for its own
//! bookkeeping, leaving [`EVENT_BITS_MAX`] as the usable range.

use core::fmt;

use crate::cpu;
use crate::error::{Error, Result};
use crate::port;
use crate::time::Timeout;

/// The event register value type (`EventBits_t`).
pub type EventBits = u32;

/// Highest usable event bits value; the top byte of the register is
/// reserved for kernel-internal flags.
pub const EVENT_BITS_MAX: EventBits = (1 << 24) - 1;

/// A register of event bits that threads can wait on.
pub struct EventGroup {
    raw: port::RawEventGroup,
}

unsafe impl Send for EventGroup {}
unsafe impl Sync for EventGroup {}

impl EventGroup {
    /// Create a new event group with all bits clear.
    ///
    /// Thread context only.
    pub fn new() -> Result<EventGroup> {
        assert!(!cpu::is_in_isr(), "cannot create kernel objects in an ISR");
        match port::RawEventGroup::new() {
            Some(raw) => Ok(EventGroup { raw }),
            None => Err(Error::NoMemory),
        }
    }

    /// Read the current register value.
    ///
    /// Thread and ISR context callable.
    pub fn get(&self) -> EventBits {
        if !cpu::is_in_isr() {
            self.raw.get()
        } else {
            self.raw.get_isr()
        }
    }

    /// OR the given bits into the register, waking any thread whose wait
    /// condition becomes satisfied.
    ///
    /// Thread and ISR context callable; from an ISR a context switch is
    /// requested on interrupt exit if a higher priority thread unblocked.
    pub fn set(&self, bits: EventBits) {
        debug_assert_eq!(bits & !EVENT_BITS_MAX, 0, "reserved event bits");
        if !cpu::is_in_isr() {
            self.raw.set(bits);
        } else {
            let needs_yield = self.raw.set_isr(bits);
            cpu::yield_from_isr(needs_yield);
        }
    }

    /// Clear the given bits in the register.
    ///
    /// Thread and ISR context callable.
    pub fn clear(&self, bits: EventBits) {
        debug_assert_eq!(bits & !EVENT_BITS_MAX, 0, "reserved event bits");
        if !cpu::is_in_isr() {
            self.raw.clear(bits);
        } else {
            self.raw.clear_isr(bits);
        }
    }

    /// Block until the requested `bits` satisfy the match policy, or the
    /// timeout passes.
    ///
    /// With `match_all` every requested bit must be set at once; otherwise
    /// any one of them suffices.  With `exclusive` the requested bits are
    /// cleared from the register when the condition is met; nothing is
    /// cleared on the timeout path.
    ///
    /// Returns the satisfying bits masked to the request, or `None` on
    /// timeout.  Thread context only.
    pub fn wait<D>(
        &self,
        bits: EventBits,
        timeout: D,
        exclusive: bool,
        match_all: bool,
    ) -> Option<EventBits>
    where
        D: Into<Timeout>,
    {
        assert!(!cpu::is_in_isr(), "cannot wait on an event group in an ISR");
        debug_assert_ne!(bits, 0, "waiting on no bits");
        debug_assert_eq!(bits & !EVENT_BITS_MAX, 0, "reserved event bits");

        let observed = self.raw.wait(bits, exclusive, match_all, timeout.into());
        let satisfied = if match_all {
            observed & bits == bits
        } else {
            observed & bits != 0
        };
        // only return the bits that are relevant to the wait operation
        if satisfied {
            Some(observed & bits)
        } else {
            None
        }
    }
}

impl fmt::Debug for EventGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sys::EventGroup")
    }
}
