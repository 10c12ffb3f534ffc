// Copyright (c) 2026 FreeRTOS Rust Contributors
// SPDX-License-Identifier: Apache-2.0

//! FreeRTOS `sys` module.
//!
//! This module contains thin wrappers around the kernel primitives, kept as
//! unchanged as possible: the operations, timeouts and failure modes are
//! the kernel's own, with two Rust-side additions.  Objects are owned (the
//! kernel object is deleted on drop), and each call dispatches on the
//! execution context, so the same method is usable from threads and from
//! interrupt handlers where the kernel permits it.
//!
//! Most applications will prefer the higher level types in [`crate::sync`],
//! which are built on these wrappers.

pub mod event;
pub mod queue;
pub mod sync;
