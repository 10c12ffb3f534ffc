// Copyright (c) 2026 FreeRTOS Rust Contributors
// SPDX-License-Identifier: Apache-2.0

//! Execution context queries and critical sections.
//!
//! The kernel distinguishes two execution contexts: threads, which may
//! block, and interrupt service routines, which may not.  Most wrappers in
//! this crate dispatch on [`is_in_isr`] to pick the ISR-safe variant of the
//! underlying kernel call, and assert it where an operation is not legal in
//! interrupt context at all.
//!
//! Critical sections are provided through the
//! [`critical-section`](https://crates.io/crates/critical-section) crate.
//! The active port supplies the implementation: the hosted port through
//! `critical-section/std`, the native port over the kernel's
//! `vPortEnterCritical`/`vPortExitCritical` pair.

use crate::port;

/// Determines whether the current execution context is an interrupt service
/// routine.
#[inline]
pub fn is_in_isr() -> bool {
    port::in_isr()
}

/// An opaque identifier for a thread known to the kernel.
///
/// Only comparison is supported; the id is valid for as long as the thread
/// exists.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct ThreadId(pub(crate) port::RawThreadId);

// The id is only ever compared, never dereferenced, so it is safe to move
// between threads even when it wraps a raw task handle.
unsafe impl Send for ThreadId {}
unsafe impl Sync for ThreadId {}

/// The id of the calling thread.
///
/// Thread context only; interrupt handlers do not have an identity.
pub fn current_thread() -> ThreadId {
    ThreadId(port::current_thread())
}

/// Run `f` inside a critical section, with thread and interrupt switches
/// disabled.
///
/// The closure must be short and must not block.
pub fn with_critical_section<R>(f: impl FnOnce() -> R) -> R {
    critical_section::with(|_| f())
}

/// Request a context switch on interrupt exit if an ISR-side operation
/// unblocked a higher priority thread.
///
/// Platform convention: the flag is collected from the FromISR kernel call
/// and acted on once, never mid-handler.
#[inline]
pub(crate) fn yield_from_isr(needs_yield: bool) {
    port::yield_from_isr(needs_yield);
}
