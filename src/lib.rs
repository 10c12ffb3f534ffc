// Copyright (c) 2026 FreeRTOS Rust Contributors
// SPDX-License-Identifier: Apache-2.0

//! FreeRTOS synchronization support for Rust
//!
//! This crate provides the synchronization and timing functionality for
//! applications written in Rust that run on top of the FreeRTOS kernel:
//! mutexes, semaphores, message queues, event groups, condition variables,
//! and tick-based time handling.
//!
//! The layering follows the kernel wrapper convention: [`sys`] contains thin
//! wrappers around the kernel objects, kept as unchanged as possible, while
//! [`sync`] provides higher level types modeled after
//! [`std::sync`](https://doc.rust-lang.org/stable/std/sync/index.html).
//!
//! By default the crate is built with the `hosted` feature, which backs the
//! kernel primitives with a std-based simulation so that library code and
//! tests can run on a development host.  Firmware builds disable default
//! features and link against the FreeRTOS kernel through the `raw`
//! bindings.

#![no_std]
#![deny(missing_docs)]

#[cfg(feature = "hosted")]
extern crate std;

pub mod cpu;
pub mod error;
pub mod sync;
pub mod sys;
pub mod time;

mod port;

#[cfg(not(feature = "hosted"))]
pub mod raw;

pub use error::{Error, Result};
