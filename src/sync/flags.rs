// Copyright (c) 2026 FreeRTOS Rust Contributors
// SPDX-License-Identifier: Apache-2.0

//! Flag-based condition signaling.
//!
//! [`CondFlags`] is a lightweight condition variable over an event group:
//! threads block until a combination of flags has been raised.  The key
//! difference to [`Condvar`] is that the *waiting* side chooses the wake
//! strategy:
//!
//! 1. whether to wait for all of the requested flags or any one of them,
//! 2. whether to consume the flags on receipt (the default) or leave them
//!    in place for other observers (the `shared_` forms).
//!
//! Because flags accumulate in a register until cleared, nothing is lost
//! when a flag is raised with no one waiting — the next waiter sees it
//! immediately.  That makes this the right shape for level-triggered
//! conditions ("data available", "shutdown requested"), where [`Condvar`]
//! is the right shape for edge-triggered events consumed exactly once.
//!
//! No external mutex is involved; raising, clearing and reading flags is
//! legal from interrupt handlers, waiting is not.
//!
//! [`Condvar`]: crate::sync::Condvar

use core::fmt;
use core::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, Not};

use crate::sys::event::{EventBits, EventGroup, EVENT_BITS_MAX};
use crate::time::{self, Instant, Timeout};

/// A combination of condition flags.
///
/// Thin value wrapper over the event register bits.  The usable range is
/// [`Flags::min`]`..=`[`Flags::max`]; the highest byte of the register is
/// reserved for kernel-internal flags.
#[derive(Clone, Copy, PartialEq, Eq, Default)]
pub struct Flags(EventBits);

impl Flags {
    /// Wrap a raw bit pattern.
    pub const fn new(bits: EventBits) -> Flags {
        Flags(bits)
    }

    /// The raw bit pattern.
    pub const fn bits(self) -> EventBits {
        self.0
    }

    /// The highest usable flag combination.
    pub const fn max() -> Flags {
        Flags(EVENT_BITS_MAX)
    }

    /// The empty flag combination.
    pub const fn min() -> Flags {
        Flags(0)
    }

    /// Is no flag set?
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Are all flags of `other` set in `self`?
    pub const fn contains(self, other: Flags) -> bool {
        self.0 & other.0 == other.0
    }

    /// Is any flag of `other` set in `self`?
    pub const fn intersects(self, other: Flags) -> bool {
        self.0 & other.0 != 0
    }
}

impl BitOr for Flags {
    type Output = Flags;

    fn bitor(self, rhs: Flags) -> Flags {
        Flags(self.0 | rhs.0)
    }
}

impl BitOrAssign for Flags {
    fn bitor_assign(&mut self, rhs: Flags) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for Flags {
    type Output = Flags;

    fn bitand(self, rhs: Flags) -> Flags {
        Flags(self.0 & rhs.0)
    }
}

impl BitAndAssign for Flags {
    fn bitand_assign(&mut self, rhs: Flags) {
        self.0 &= rhs.0;
    }
}

impl Not for Flags {
    type Output = Flags;

    /// Complement within the usable range; reserved register bits stay
    /// clear.
    fn not(self) -> Flags {
        Flags(!self.0 & EVENT_BITS_MAX)
    }
}

impl From<EventBits> for Flags {
    fn from(bits: EventBits) -> Flags {
        Flags(bits)
    }
}

impl From<Flags> for EventBits {
    fn from(flags: Flags) -> EventBits {
        flags.0
    }
}

impl fmt::Debug for Flags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Flags({:#x})", self.0)
    }
}

/// A lightweight, flag-based condition variable.
///
/// See the [module documentation](self) for how this compares to
/// [`Condvar`](crate::sync::Condvar).
pub struct CondFlags {
    group: EventGroup,
}

impl CondFlags {
    /// Construct a new condition with all flags clear.
    ///
    /// Thread context only.
    pub fn new() -> CondFlags {
        CondFlags {
            group: EventGroup::new().unwrap(),
        }
    }

    /// Read the currently active flags.
    ///
    /// Thread and ISR context callable.
    pub fn get(&self) -> Flags {
        Flags(self.group.get())
    }

    /// Raise the given flags, waking any thread whose wait condition
    /// becomes satisfied.
    ///
    /// Thread and ISR context callable.
    pub fn set(&self, flags: Flags) {
        self.group.set(flags.bits());
    }

    /// Remove the given flags from the condition.
    ///
    /// Thread and ISR context callable.
    pub fn clear(&self, flags: Flags) {
        self.group.clear(flags.bits());
    }

    /// Block until any of `flags` is raised, consuming the matched flags.
    ///
    /// Returns the raised flag(s) that caused the wake, or `None` if the
    /// wait timed out.  Thread context only.
    pub fn wait_any_for<D>(&self, flags: Flags, timeout: D) -> Option<Flags>
    where
        D: Into<Timeout>,
    {
        self.wait(flags, timeout.into(), true, false)
    }

    /// Block until any of `flags` is raised, consuming the matched flags,
    /// giving up at `deadline`.
    pub fn wait_any_until(&self, flags: Flags, deadline: Instant) -> Option<Flags> {
        self.wait_any_for(flags, time::remaining(deadline))
    }

    /// Block until all of `flags` are raised at once, consuming them.
    ///
    /// Returns the raised flags, or `None` if the wait timed out.  Thread
    /// context only.
    pub fn wait_all_for<D>(&self, flags: Flags, timeout: D) -> Option<Flags>
    where
        D: Into<Timeout>,
    {
        self.wait(flags, timeout.into(), true, true)
    }

    /// Block until all of `flags` are raised at once, consuming them,
    /// giving up at `deadline`.
    pub fn wait_all_until(&self, flags: Flags, deadline: Instant) -> Option<Flags> {
        self.wait_all_for(flags, time::remaining(deadline))
    }

    /// Block until any of `flags` is raised, leaving the register
    /// untouched.
    ///
    /// Used when several waiters must observe the same persistent flag.
    /// Thread context only.
    pub fn shared_wait_any_for<D>(&self, flags: Flags, timeout: D) -> Option<Flags>
    where
        D: Into<Timeout>,
    {
        self.wait(flags, timeout.into(), false, false)
    }

    /// Block until any of `flags` is raised, leaving the register
    /// untouched, giving up at `deadline`.
    pub fn shared_wait_any_until(&self, flags: Flags, deadline: Instant) -> Option<Flags> {
        self.shared_wait_any_for(flags, time::remaining(deadline))
    }

    /// Block until all of `flags` are raised at once, leaving the register
    /// untouched.
    ///
    /// Thread context only.
    pub fn shared_wait_all_for<D>(&self, flags: Flags, timeout: D) -> Option<Flags>
    where
        D: Into<Timeout>,
    {
        self.wait(flags, timeout.into(), false, true)
    }

    /// Block until all of `flags` are raised at once, leaving the register
    /// untouched, giving up at `deadline`.
    pub fn shared_wait_all_until(&self, flags: Flags, deadline: Instant) -> Option<Flags> {
        self.shared_wait_all_for(flags, time::remaining(deadline))
    }

    fn wait(&self, flags: Flags, timeout: Timeout, exclusive: bool, match_all: bool) -> Option<Flags> {
        self.group
            .wait(flags.bits(), timeout, exclusive, match_all)
            .map(Flags)
    }
}

impl Default for CondFlags {
    fn default() -> CondFlags {
        CondFlags::new()
    }
}

impl fmt::Debug for CondFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CondFlags({:?})", self.get())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_type_ops() {
        let a = Flags::new(0b0101);
        let b = Flags::new(0b0011);
        assert_eq!((a | b).bits(), 0b0111);
        assert_eq!((a & b).bits(), 0b0001);
        assert!(a.intersects(b));
        assert!(!a.contains(b));
        assert!((a | b).contains(b));
        assert_eq!((!Flags::min()).bits(), Flags::max().bits());
        assert!(Flags::min().is_empty());
    }
}
