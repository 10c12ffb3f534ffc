// Copyright (c) 2026 FreeRTOS Rust Contributors
// SPDX-License-Identifier: Apache-2.0

// Kernel port layer.
//
// Everything above this module is backend-agnostic: the `sys` wrappers are
// written against the small primitive surface defined here (queue, event
// group, mutex, semaphore, tick counter, context queries), and the port
// provides it either from the real kernel or from a std-backed simulation.

cfg_if::cfg_if! {
    if #[cfg(feature = "hosted")] {
        mod hosted;
        pub(crate) use hosted::*;
    } else {
        mod freertos;
        pub(crate) use freertos::*;
    }
}
