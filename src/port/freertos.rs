// Copyright (c) 2026 FreeRTOS Rust Contributors
// SPDX-License-Identifier: Apache-2.0

//! Native port: the kernel primitives over the [`raw`] C bindings.
//!
//! Kernel objects are created through the dynamic-allocation API and owned
//! by handle; dropping a wrapper deletes the kernel object.  The `*_isr`
//! entry points call the FromISR variants and report the deferred yield
//! request to the caller.
//!
//! [`raw`]: crate::raw

use core::marker::PhantomData;
use core::mem::{size_of, MaybeUninit};
use core::ffi::c_void;

use crate::raw;
use crate::time::{Tick, Timeout};

pub type RawThreadId = raw::TaskHandle_t;

pub fn current_thread() -> RawThreadId {
    unsafe { raw::xTaskGetCurrentTaskHandle() }
}

pub fn in_isr() -> bool {
    unsafe { raw::freertos_rs_in_isr() != raw::pdFALSE }
}

pub fn yield_from_isr(needs_yield: bool) {
    if needs_yield {
        unsafe { raw::freertos_rs_yield_from_isr() }
    }
}

pub fn tick_count() -> Tick {
    unsafe { raw::xTaskGetTickCount() }
}

pub fn tick_count_isr() -> Tick {
    unsafe { raw::xTaskGetTickCountFromISR() }
}

pub fn delay(ticks: Tick) {
    unsafe { raw::vTaskDelay(ticks) }
}

fn wait_ticks(timeout: Timeout) -> raw::TickType_t {
    // Timeout already uses the kernel convention: all-ones is portMAX_DELAY
    timeout.ticks()
}

// Critical sections for the `critical-section` crate.  vPortEnterCritical
// nests, so no restore state is carried.  Thread context only; ISR-side
// masking goes through the port macros in C.
struct FreertosCriticalSection;
critical_section::set_impl!(FreertosCriticalSection);

unsafe impl critical_section::Impl for FreertosCriticalSection {
    unsafe fn acquire() -> critical_section::RawRestoreState {
        raw::vPortEnterCritical();
    }

    unsafe fn release(_restore_state: critical_section::RawRestoreState) {
        raw::vPortExitCritical();
    }
}

/// Bounded shallow-copy kernel queue.
pub struct RawQueue<T: Copy, const N: usize> {
    handle: raw::QueueHandle_t,
    _marker: PhantomData<T>,
}

// The kernel serializes access to the queue; the handle itself is freely
// shareable as long as the items are.
unsafe impl<T: Copy + Send, const N: usize> Send for RawQueue<T, N> {}
unsafe impl<T: Copy + Send, const N: usize> Sync for RawQueue<T, N> {}

impl<T: Copy, const N: usize> RawQueue<T, N> {
    pub fn new() -> Option<Self> {
        let handle = unsafe {
            raw::xQueueGenericCreate(
                N as raw::UBaseType_t,
                size_of::<T>() as raw::UBaseType_t,
                raw::queueQUEUE_TYPE_BASE,
            )
        };
        if handle.is_null() {
            return None;
        }
        Some(RawQueue {
            handle,
            _marker: PhantomData,
        })
    }

    fn send(&self, value: &T, timeout: Timeout, position: raw::BaseType_t) -> bool {
        unsafe {
            raw::xQueueGenericSend(
                self.handle,
                value as *const T as *const c_void,
                wait_ticks(timeout),
                position,
            ) == raw::pdTRUE
        }
    }

    fn send_isr(&self, value: &T, position: raw::BaseType_t) -> (bool, bool) {
        let mut woken: raw::BaseType_t = raw::pdFALSE;
        let ok = unsafe {
            raw::xQueueGenericSendFromISR(
                self.handle,
                value as *const T as *const c_void,
                &mut woken,
                position,
            ) == raw::pdTRUE
        };
        (ok, woken != raw::pdFALSE)
    }

    pub fn send_back(&self, value: T, timeout: Timeout) -> bool {
        self.send(&value, timeout, raw::queueSEND_TO_BACK)
    }

    pub fn send_front(&self, value: T, timeout: Timeout) -> bool {
        self.send(&value, timeout, raw::queueSEND_TO_FRONT)
    }

    pub fn send_back_isr(&self, value: T) -> (bool, bool) {
        self.send_isr(&value, raw::queueSEND_TO_BACK)
    }

    pub fn send_front_isr(&self, value: T) -> (bool, bool) {
        self.send_isr(&value, raw::queueSEND_TO_FRONT)
    }

    pub fn replace(&self, value: T) -> bool {
        let displaced = self.len() == N;
        // overwrite never fails on a single slot queue
        self.send(&value, Timeout(0), raw::queueOVERWRITE);
        displaced
    }

    pub fn replace_isr(&self, value: T) -> (bool, bool) {
        let displaced = self.len() == N;
        let (_, needs_yield) = self.send_isr(&value, raw::queueOVERWRITE);
        (displaced, needs_yield)
    }

    pub fn recv(&self, timeout: Timeout) -> Option<T> {
        let mut value = MaybeUninit::<T>::uninit();
        let ok = unsafe {
            raw::xQueueReceive(
                self.handle,
                value.as_mut_ptr() as *mut c_void,
                wait_ticks(timeout),
            ) == raw::pdTRUE
        };
        if ok {
            // SAFETY: the kernel copied a full item into the buffer.
            Some(unsafe { value.assume_init() })
        } else {
            None
        }
    }

    pub fn recv_isr(&self) -> (Option<T>, bool) {
        let mut woken: raw::BaseType_t = raw::pdFALSE;
        let mut value = MaybeUninit::<T>::uninit();
        let ok = unsafe {
            raw::xQueueReceiveFromISR(self.handle, value.as_mut_ptr() as *mut c_void, &mut woken)
                == raw::pdTRUE
        };
        let value = if ok {
            // SAFETY: as above.
            Some(unsafe { value.assume_init() })
        } else {
            None
        };
        (value, woken != raw::pdFALSE)
    }

    pub fn peek(&self, timeout: Timeout) -> Option<T> {
        let mut value = MaybeUninit::<T>::uninit();
        let ok = unsafe {
            raw::xQueuePeek(
                self.handle,
                value.as_mut_ptr() as *mut c_void,
                wait_ticks(timeout),
            ) == raw::pdTRUE
        };
        if ok {
            // SAFETY: as above.
            Some(unsafe { value.assume_init() })
        } else {
            None
        }
    }

    pub fn peek_isr(&self) -> Option<T> {
        let mut value = MaybeUninit::<T>::uninit();
        let ok = unsafe {
            raw::xQueuePeekFromISR(self.handle, value.as_mut_ptr() as *mut c_void) == raw::pdTRUE
        };
        if ok {
            // SAFETY: as above.
            Some(unsafe { value.assume_init() })
        } else {
            None
        }
    }

    pub fn len(&self) -> usize {
        unsafe { raw::uxQueueMessagesWaiting(self.handle) as usize }
    }

    pub fn spaces(&self) -> usize {
        unsafe { raw::uxQueueSpacesAvailable(self.handle) as usize }
    }

    pub fn reset(&self) {
        unsafe {
            raw::xQueueGenericReset(self.handle, raw::pdFALSE);
        }
    }
}

impl<T: Copy, const N: usize> Drop for RawQueue<T, N> {
    fn drop(&mut self) {
        unsafe { raw::vQueueDelete(self.handle) }
    }
}

/// Kernel event group.
pub struct RawEventGroup {
    handle: raw::EventGroupHandle_t,
}

unsafe impl Send for RawEventGroup {}
unsafe impl Sync for RawEventGroup {}

impl RawEventGroup {
    pub fn new() -> Option<Self> {
        let handle = unsafe { raw::xEventGroupCreate() };
        if handle.is_null() {
            return None;
        }
        Some(RawEventGroup { handle })
    }

    pub fn get(&self) -> u32 {
        // xEventGroupGetBits is a macro over clearing nothing
        unsafe { raw::xEventGroupClearBits(self.handle, 0) }
    }

    pub fn get_isr(&self) -> u32 {
        unsafe { raw::xEventGroupGetBitsFromISR(self.handle) }
    }

    pub fn set(&self, bits: u32) {
        unsafe {
            raw::xEventGroupSetBits(self.handle, bits);
        }
    }

    pub fn set_isr(&self, bits: u32) -> bool {
        let mut woken: raw::BaseType_t = raw::pdFALSE;
        unsafe {
            raw::xEventGroupSetBitsFromISR(self.handle, bits, &mut woken);
        }
        woken != raw::pdFALSE
    }

    pub fn clear(&self, bits: u32) {
        unsafe {
            raw::xEventGroupClearBits(self.handle, bits);
        }
    }

    pub fn clear_isr(&self, bits: u32) {
        unsafe {
            raw::xEventGroupClearBitsFromISR(self.handle, bits);
        }
    }

    pub fn wait(&self, bits: u32, clear_on_exit: bool, wait_all: bool, timeout: Timeout) -> u32 {
        unsafe {
            raw::xEventGroupWaitBits(
                self.handle,
                bits,
                clear_on_exit as raw::BaseType_t,
                wait_all as raw::BaseType_t,
                wait_ticks(timeout),
            )
        }
    }
}

impl Drop for RawEventGroup {
    fn drop(&mut self) {
        unsafe { raw::vEventGroupDelete(self.handle) }
    }
}

/// Kernel mutex (non-recursive).
pub struct RawMutex {
    handle: raw::QueueHandle_t,
}

unsafe impl Send for RawMutex {}
unsafe impl Sync for RawMutex {}

impl RawMutex {
    pub fn new() -> Option<Self> {
        let handle = unsafe { raw::xQueueCreateMutex(raw::queueQUEUE_TYPE_MUTEX) };
        if handle.is_null() {
            return None;
        }
        Some(RawMutex { handle })
    }

    pub fn lock(&self, timeout: Timeout) -> bool {
        unsafe { raw::xQueueSemaphoreTake(self.handle, wait_ticks(timeout)) == raw::pdTRUE }
    }

    pub fn unlock(&self) -> bool {
        unsafe {
            raw::xQueueGenericSend(
                self.handle,
                core::ptr::null(),
                0,
                raw::queueSEND_TO_BACK,
            ) == raw::pdTRUE
        }
    }

    pub fn holder(&self) -> Option<RawThreadId> {
        let holder = unsafe { raw::xQueueGetMutexHolder(self.handle) };
        if holder.is_null() {
            None
        } else {
            Some(holder)
        }
    }
}

impl Drop for RawMutex {
    fn drop(&mut self) {
        unsafe { raw::vQueueDelete(self.handle) }
    }
}

/// Kernel counting semaphore.
pub struct RawSemaphore {
    handle: raw::QueueHandle_t,
}

unsafe impl Send for RawSemaphore {}
unsafe impl Sync for RawSemaphore {}

impl RawSemaphore {
    pub fn new(initial: u32, limit: u32) -> Option<Self> {
        let handle = unsafe {
            raw::xQueueCreateCountingSemaphore(
                limit as raw::UBaseType_t,
                initial as raw::UBaseType_t,
            )
        };
        if handle.is_null() {
            return None;
        }
        Some(RawSemaphore { handle })
    }

    pub fn take(&self, timeout: Timeout) -> bool {
        unsafe { raw::xQueueSemaphoreTake(self.handle, wait_ticks(timeout)) == raw::pdTRUE }
    }

    pub fn take_isr(&self) -> (bool, bool) {
        let mut woken: raw::BaseType_t = raw::pdFALSE;
        let ok = unsafe {
            raw::xQueueReceiveFromISR(self.handle, core::ptr::null_mut(), &mut woken)
                == raw::pdTRUE
        };
        (ok, woken != raw::pdFALSE)
    }

    pub fn give(&self) -> bool {
        unsafe {
            raw::xQueueGenericSend(
                self.handle,
                core::ptr::null(),
                0,
                raw::queueSEND_TO_BACK,
            ) == raw::pdTRUE
        }
    }

    pub fn give_isr(&self) -> (bool, bool) {
        let mut woken: raw::BaseType_t = raw::pdFALSE;
        let ok = unsafe { raw::xQueueGiveFromISR(self.handle, &mut woken) == raw::pdTRUE };
        (ok, woken != raw::pdFALSE)
    }

    pub fn count(&self) -> usize {
        unsafe { raw::uxQueueMessagesWaiting(self.handle) as usize }
    }
}

impl Drop for RawSemaphore {
    fn drop(&mut self) {
        unsafe { raw::vQueueDelete(self.handle) }
    }
}
