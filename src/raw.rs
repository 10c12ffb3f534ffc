// Copyright (c) 2026 FreeRTOS Rust Contributors
// SPDX-License-Identifier: Apache-2.0

//! Direct C bindings to the FreeRTOS kernel.
//!
//! All of these are unsafe.  The declarations are hand-maintained against
//! the kernel's public API rather than generated, and cover only the surface
//! the wrappers in this crate use.  Kernel objects are referred to through
//! their opaque handles; this crate never relies on the layout of a kernel
//! control block.
//!
//! Two `freertos_rs_*` symbols wrap operations that exist only as port-layer
//! macros in C (`xPortIsInsideInterrupt`, `portYIELD_FROM_ISR`); they are
//! expected from a small C shim compiled into the firmware alongside the
//! kernel.

#![allow(missing_docs)]
#![allow(non_camel_case_types)]
#![allow(non_snake_case)]
#![allow(non_upper_case_globals)]

use core::ffi::c_void;

pub type BaseType_t = i32;
pub type UBaseType_t = u32;
pub type TickType_t = u32;
pub type EventBits_t = TickType_t;

pub const pdFALSE: BaseType_t = 0;
pub const pdTRUE: BaseType_t = 1;

pub const portMAX_DELAY: TickType_t = TickType_t::MAX;

pub const queueSEND_TO_BACK: BaseType_t = 0;
pub const queueSEND_TO_FRONT: BaseType_t = 1;
pub const queueOVERWRITE: BaseType_t = 2;

pub const queueQUEUE_TYPE_BASE: u8 = 0;
pub const queueQUEUE_TYPE_MUTEX: u8 = 1;

#[repr(C)]
pub struct QueueDefinition {
    _private: [u8; 0],
}
pub type QueueHandle_t = *mut QueueDefinition;

#[repr(C)]
pub struct EventGroupDef_t {
    _private: [u8; 0],
}
pub type EventGroupHandle_t = *mut EventGroupDef_t;

#[repr(C)]
pub struct tskTaskControlBlock {
    _private: [u8; 0],
}
pub type TaskHandle_t = *mut tskTaskControlBlock;

extern "C" {
    // queue.c
    pub fn xQueueGenericCreate(
        uxQueueLength: UBaseType_t,
        uxItemSize: UBaseType_t,
        ucQueueType: u8,
    ) -> QueueHandle_t;
    pub fn xQueueGenericSend(
        xQueue: QueueHandle_t,
        pvItemToQueue: *const c_void,
        xTicksToWait: TickType_t,
        xCopyPosition: BaseType_t,
    ) -> BaseType_t;
    pub fn xQueueGenericSendFromISR(
        xQueue: QueueHandle_t,
        pvItemToQueue: *const c_void,
        pxHigherPriorityTaskWoken: *mut BaseType_t,
        xCopyPosition: BaseType_t,
    ) -> BaseType_t;
    pub fn xQueueReceive(
        xQueue: QueueHandle_t,
        pvBuffer: *mut c_void,
        xTicksToWait: TickType_t,
    ) -> BaseType_t;
    pub fn xQueueReceiveFromISR(
        xQueue: QueueHandle_t,
        pvBuffer: *mut c_void,
        pxHigherPriorityTaskWoken: *mut BaseType_t,
    ) -> BaseType_t;
    pub fn xQueuePeek(
        xQueue: QueueHandle_t,
        pvBuffer: *mut c_void,
        xTicksToWait: TickType_t,
    ) -> BaseType_t;
    pub fn xQueuePeekFromISR(xQueue: QueueHandle_t, pvBuffer: *mut c_void) -> BaseType_t;
    pub fn uxQueueMessagesWaiting(xQueue: QueueHandle_t) -> UBaseType_t;
    pub fn uxQueueSpacesAvailable(xQueue: QueueHandle_t) -> UBaseType_t;
    pub fn xQueueGenericReset(xQueue: QueueHandle_t, xNewQueue: BaseType_t) -> BaseType_t;
    pub fn vQueueDelete(xQueue: QueueHandle_t);

    // semphr.h entry points (mutexes and semaphores are queues underneath)
    pub fn xQueueCreateMutex(ucQueueType: u8) -> QueueHandle_t;
    pub fn xQueueGetMutexHolder(xSemaphore: QueueHandle_t) -> TaskHandle_t;
    pub fn xQueueSemaphoreTake(xQueue: QueueHandle_t, xTicksToWait: TickType_t) -> BaseType_t;
    pub fn xQueueGiveFromISR(
        xQueue: QueueHandle_t,
        pxHigherPriorityTaskWoken: *mut BaseType_t,
    ) -> BaseType_t;
    pub fn xQueueCreateCountingSemaphore(
        uxMaxCount: UBaseType_t,
        uxInitialCount: UBaseType_t,
    ) -> QueueHandle_t;

    // event_groups.c
    pub fn xEventGroupCreate() -> EventGroupHandle_t;
    pub fn vEventGroupDelete(xEventGroup: EventGroupHandle_t);
    pub fn xEventGroupWaitBits(
        xEventGroup: EventGroupHandle_t,
        uxBitsToWaitFor: EventBits_t,
        xClearOnExit: BaseType_t,
        xWaitForAllBits: BaseType_t,
        xTicksToWait: TickType_t,
    ) -> EventBits_t;
    pub fn xEventGroupSetBits(xEventGroup: EventGroupHandle_t, uxBitsToSet: EventBits_t)
        -> EventBits_t;
    pub fn xEventGroupSetBitsFromISR(
        xEventGroup: EventGroupHandle_t,
        uxBitsToSet: EventBits_t,
        pxHigherPriorityTaskWoken: *mut BaseType_t,
    ) -> BaseType_t;
    pub fn xEventGroupClearBits(
        xEventGroup: EventGroupHandle_t,
        uxBitsToClear: EventBits_t,
    ) -> EventBits_t;
    pub fn xEventGroupClearBitsFromISR(
        xEventGroup: EventGroupHandle_t,
        uxBitsToClear: EventBits_t,
    ) -> BaseType_t;
    pub fn xEventGroupGetBitsFromISR(xEventGroup: EventGroupHandle_t) -> EventBits_t;

    // tasks.c
    pub fn xTaskGetTickCount() -> TickType_t;
    pub fn xTaskGetTickCountFromISR() -> TickType_t;
    pub fn xTaskGetCurrentTaskHandle() -> TaskHandle_t;
    pub fn vTaskDelay(xTicksToDelay: TickType_t);

    // port.c
    pub fn vPortEnterCritical();
    pub fn vPortExitCritical();

    // C shim: wrappers for port-layer macros
    pub fn freertos_rs_in_isr() -> BaseType_t;
    pub fn freertos_rs_yield_from_isr();
}
