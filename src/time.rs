// Copyright (c) 2026 FreeRTOS Rust Contributors
// SPDX-License-Identifier: Apache-2.0

//! Time handling based on the kernel tick.
//!
//! The kernel schedules in ticks of its tick interrupt.  This module wraps
//! the tick counter as a [`fugit`] clock: [`Duration`] and [`Instant`] are
//! tick-based time types, and [`Timeout`] is the raw tick count handed to
//! blocking kernel calls.  All blocking operations in this crate accept
//! `impl Into<Timeout>`, so they can be given a [`Duration`], [`NoWait`], or
//! [`Forever`] directly.
//!
//! Waiting "forever" is expressed, as in the kernel itself, by the all-ones
//! tick value (`portMAX_DELAY`).  A [`Duration`] of that many ticks
//! therefore converts to an unbounded wait.

use crate::cpu;
use crate::port;

/// The underlying tick count type (`TickType_t`).
pub type Tick = u32;

/// Frequency of the kernel tick interrupt, in Hz.
///
/// On a native build this must agree with `configTICK_RATE_HZ`; the hosted
/// simulation runs its clock at this rate.
pub const TICK_RATE_HZ: Tick = 1000;

/// A tick-based duration.
pub type Duration = fugit::Duration<Tick, 1, { TICK_RATE_HZ }>;

/// A point in time, counted in ticks since the scheduler started.
pub type Instant = fugit::Instant<Tick, 1, { TICK_RATE_HZ }>;

/// Tick value the kernel interprets as an unbounded wait (`portMAX_DELAY`).
pub const FOREVER_TICKS: Tick = Tick::MAX;

/// A raw timeout, as handed to the kernel.
///
/// The value is a tick count, with [`FOREVER_TICKS`] meaning wait forever
/// and zero meaning do not wait at all.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Timeout(pub Tick);

impl Timeout {
    /// The number of ticks to wait.
    pub const fn ticks(self) -> Tick {
        self.0
    }

    /// Does this timeout indicate an unbounded wait?
    pub const fn is_forever(self) -> bool {
        self.0 == FOREVER_TICKS
    }

    /// Does this timeout indicate no waiting at all?
    pub const fn is_no_wait(self) -> bool {
        self.0 == 0
    }
}

/// A timeout that does not wait: the operation either completes immediately
/// or fails.  This is the only timeout permitted in interrupt context.
#[derive(Clone, Copy, Debug)]
pub struct NoWait;

/// A timeout that waits as long as necessary for the operation to complete.
#[derive(Clone, Copy, Debug)]
pub struct Forever;

impl From<NoWait> for Timeout {
    fn from(_: NoWait) -> Timeout {
        Timeout(0)
    }
}

impl From<Forever> for Timeout {
    fn from(_: Forever) -> Timeout {
        Timeout(FOREVER_TICKS)
    }
}

impl From<Duration> for Timeout {
    fn from(duration: Duration) -> Timeout {
        // A duration of FOREVER_TICKS ticks saturates into an unbounded
        // wait, matching the kernel's own interpretation of the value.
        Timeout(duration.ticks())
    }
}

/// Read the current tick count as an [`Instant`].
///
/// Thread and ISR context callable; the appropriate tick getter is selected
/// for the current context.
pub fn now() -> Instant {
    let ticks = if !cpu::is_in_isr() {
        port::tick_count()
    } else {
        port::tick_count_isr()
    };
    Instant::from_ticks(ticks)
}

/// Remaining time from now until `deadline`, as a [`Timeout`].
///
/// A deadline that has already passed yields a zero timeout, so a blocking
/// call made with the result returns immediately.
pub fn remaining(deadline: Instant) -> Timeout {
    match deadline.checked_duration_since(now()) {
        Some(left) => left.into(),
        None => NoWait.into(),
    }
}

/// Block the current thread for the given time.
///
/// Thread context only.
pub fn sleep<T>(timeout: T)
where
    T: Into<Timeout>,
{
    assert!(!cpu::is_in_isr(), "cannot sleep in interrupt context");
    port::delay(timeout.into().ticks());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeout_conversions() {
        assert!(Timeout::from(NoWait).is_no_wait());
        assert!(Timeout::from(Forever).is_forever());
        assert_eq!(Timeout::from(Duration::millis(25)).ticks(), 25);
        assert!(Timeout::from(Duration::from_ticks(FOREVER_TICKS)).is_forever());
    }

    #[test]
    fn passed_deadline_is_no_wait() {
        let deadline = now();
        assert!(!remaining(deadline).is_forever());
        assert!(remaining(Instant::from_ticks(0)).is_no_wait());
    }
}
