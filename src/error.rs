// Copyright (c) 2026 FreeRTOS Rust Contributors
// SPDX-License-Identifier: Apache-2.0

//! # Kernel call errors
//!
//! This module contains an `Error` and `Result` type for use in wrapped
//! kernel calls.  FreeRTOS calls report failure through pass/fail return
//! values, with the reason implied by the operation: a bounded wait that
//! fails has timed out, a zero-wait push onto a full queue is rejected, and
//! object creation fails only when the kernel is out of memory.  Those few
//! conditions are captured here as an enum rather than a numeric code.
//!
//! Timeouts are ordinary results that callers are expected to inspect and
//! handle; none of these values indicate a programming error.  Misuse of the
//! primitives (blocking in an interrupt handler, unlocking a mutex from the
//! wrong thread) is asserted, not reported.

use core::fmt;

/// An error result from a wrapped kernel call.
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A bounded wait elapsed before the operation could complete.
    Timeout,
    /// A zero-wait send found the queue full.
    QueueFull,
    /// A zero-wait receive found the queue empty.
    QueueEmpty,
    /// The kernel could not allocate the requested object.
    NoMemory,
}

impl core::error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let desc = match self {
            Error::Timeout => "operation timed out",
            Error::QueueFull => "queue full",
            Error::QueueEmpty => "queue empty",
            Error::NoMemory => "kernel allocation failed",
        };
        write!(f, "freertos error: {}", desc)
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

/// Wraps a value with a possible kernel error.
pub type Result<T> = core::result::Result<T, Error>;

/// Map a pass/fail return from the kernel into a `Result`.
#[inline(always)]
pub fn to_result(success: bool, err: Error) -> Result<()> {
    if success {
        Ok(())
    } else {
        Err(err)
    }
}
