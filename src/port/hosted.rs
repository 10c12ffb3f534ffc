// Copyright (c) 2026 FreeRTOS Rust Contributors
// SPDX-License-Identifier: Apache-2.0

//! Hosted port: a std-backed simulation of the kernel primitives.
//!
//! This port exists so the crate builds and its concurrency tests run on a
//! development host, without a kernel underneath.  It reproduces the
//! primitive semantics the wrappers rely on — bounded shallow-copy queues
//! with front/back/overwrite insertion, event bit groups, owner-tracked
//! mutexes, counting semaphores, and a monotonic tick counter — on top of
//! `std::sync`.
//!
//! There is no interrupt context on a host: [`in_isr`] is always false, the
//! `*_isr` entry points delegate to the zero-wait thread forms, and a yield
//! request is a no-op.  Wake order among equally blocked threads follows the
//! host scheduler rather than kernel priority, which is within the ordering
//! the wrappers promise.

use std::collections::VecDeque;
use std::sync::{Condvar, Mutex, MutexGuard, OnceLock};
use std::time::{Duration as StdDuration, Instant as StdInstant};

use crate::time::{Tick, Timeout, TICK_RATE_HZ};

pub type RawThreadId = std::thread::ThreadId;

pub fn current_thread() -> RawThreadId {
    std::thread::current().id()
}

pub fn in_isr() -> bool {
    false
}

pub fn yield_from_isr(_needs_yield: bool) {}

fn epoch() -> StdInstant {
    static EPOCH: OnceLock<StdInstant> = OnceLock::new();
    *EPOCH.get_or_init(StdInstant::now)
}

fn ticks_to_std(ticks: Tick) -> StdDuration {
    StdDuration::from_micros(u64::from(ticks) * 1_000_000 / u64::from(TICK_RATE_HZ))
}

pub fn tick_count() -> Tick {
    let elapsed = epoch().elapsed();
    (elapsed.as_micros() * u128::from(TICK_RATE_HZ) / 1_000_000) as Tick
}

pub fn tick_count_isr() -> Tick {
    tick_count()
}

pub fn delay(ticks: Tick) {
    if ticks == Tick::MAX {
        // portMAX_DELAY: no bounded equivalent on a host, just park for a
        // very long time at a stretch
        loop {
            std::thread::sleep(StdDuration::from_secs(3600));
        }
    }
    std::thread::sleep(ticks_to_std(ticks));
}

/// An absolute limit on a blocking call.
enum Deadline {
    /// Zero-wait: only the immediate attempt is made.
    Expired,
    /// Unbounded wait.
    Never,
    /// Wait until the given host instant.
    At(StdInstant),
}

impl Deadline {
    fn new(timeout: Timeout) -> Deadline {
        if timeout.is_forever() {
            Deadline::Never
        } else if timeout.is_no_wait() {
            Deadline::Expired
        } else {
            Deadline::At(StdInstant::now() + ticks_to_std(timeout.ticks()))
        }
    }
}

/// Block on `cond` until `attempt` produces a value or the deadline passes.
///
/// `attempt` runs with the state lock held, both for the immediate try and
/// after every wakeup, so its side effects are atomic with the decision to
/// return.  The final attempt on the timeout path has already happened when
/// `None` is returned.
fn block_until<'a, S, R>(
    cond: &Condvar,
    mut state: MutexGuard<'a, S>,
    deadline: Deadline,
    mut attempt: impl FnMut(&mut S) -> Option<R>,
) -> (MutexGuard<'a, S>, Option<R>) {
    loop {
        if let Some(result) = attempt(&mut state) {
            return (state, Some(result));
        }
        match deadline {
            Deadline::Expired => return (state, None),
            Deadline::Never => state = cond.wait(state).unwrap(),
            Deadline::At(at) => {
                let now = StdInstant::now();
                if now >= at {
                    return (state, None);
                }
                let (guard, _) = cond.wait_timeout(state, at - now).unwrap();
                state = guard;
            }
        }
    }
}

/// Bounded shallow-copy queue, the simulation of a kernel message queue.
pub struct RawQueue<T: Copy, const N: usize> {
    items: Mutex<VecDeque<T>>,
    space_freed: Condvar,
    item_queued: Condvar,
}

impl<T: Copy, const N: usize> RawQueue<T, N> {
    pub fn new() -> Option<Self> {
        Some(RawQueue {
            items: Mutex::new(VecDeque::with_capacity(N)),
            space_freed: Condvar::new(),
            item_queued: Condvar::new(),
        })
    }

    fn push(&self, value: T, timeout: Timeout, front: bool) -> bool {
        let items = self.items.lock().unwrap();
        let (items, pushed) =
            block_until(&self.space_freed, items, Deadline::new(timeout), |queue| {
                if queue.len() < N {
                    if front {
                        queue.push_front(value);
                    } else {
                        queue.push_back(value);
                    }
                    Some(())
                } else {
                    None
                }
            });
        drop(items);
        if pushed.is_some() {
            // notify_all: a woken receiver that happens to time out must not
            // strand the item while another receiver keeps sleeping
            self.item_queued.notify_all();
        }
        pushed.is_some()
    }

    pub fn send_back(&self, value: T, timeout: Timeout) -> bool {
        self.push(value, timeout, false)
    }

    pub fn send_front(&self, value: T, timeout: Timeout) -> bool {
        self.push(value, timeout, true)
    }

    pub fn send_back_isr(&self, value: T) -> (bool, bool) {
        (self.push(value, Timeout(0), false), false)
    }

    pub fn send_front_isr(&self, value: T) -> (bool, bool) {
        (self.push(value, Timeout(0), true), false)
    }

    /// Overwrite-in-place; reports whether an undelivered item was
    /// discarded.
    pub fn replace(&self, value: T) -> bool {
        let mut items = self.items.lock().unwrap();
        let displaced = !items.is_empty();
        items.clear();
        items.push_back(value);
        drop(items);
        self.item_queued.notify_all();
        displaced
    }

    pub fn replace_isr(&self, value: T) -> (bool, bool) {
        (self.replace(value), false)
    }

    pub fn recv(&self, timeout: Timeout) -> Option<T> {
        let items = self.items.lock().unwrap();
        let (items, received) =
            block_until(&self.item_queued, items, Deadline::new(timeout), |queue| {
                queue.pop_front()
            });
        drop(items);
        if received.is_some() {
            self.space_freed.notify_all();
        }
        received
    }

    pub fn recv_isr(&self) -> (Option<T>, bool) {
        (self.recv(Timeout(0)), false)
    }

    pub fn peek(&self, timeout: Timeout) -> Option<T> {
        let items = self.items.lock().unwrap();
        let (items, value) =
            block_until(&self.item_queued, items, Deadline::new(timeout), |queue| {
                queue.front().copied()
            });
        drop(items);
        value
    }

    pub fn peek_isr(&self) -> Option<T> {
        self.peek(Timeout(0))
    }

    pub fn len(&self) -> usize {
        self.items.lock().unwrap().len()
    }

    pub fn spaces(&self) -> usize {
        N - self.len()
    }

    pub fn reset(&self) {
        self.items.lock().unwrap().clear();
        self.space_freed.notify_all();
    }
}

/// Event bit group simulation.
pub struct RawEventGroup {
    bits: Mutex<u32>,
    changed: Condvar,
}

impl RawEventGroup {
    pub fn new() -> Option<Self> {
        Some(RawEventGroup {
            bits: Mutex::new(0),
            changed: Condvar::new(),
        })
    }

    pub fn get(&self) -> u32 {
        *self.bits.lock().unwrap()
    }

    pub fn get_isr(&self) -> u32 {
        self.get()
    }

    pub fn set(&self, bits: u32) {
        *self.bits.lock().unwrap() |= bits;
        self.changed.notify_all();
    }

    /// Returns the yield request flag, always false on a host.
    pub fn set_isr(&self, bits: u32) -> bool {
        self.set(bits);
        false
    }

    pub fn clear(&self, bits: u32) {
        *self.bits.lock().unwrap() &= !bits;
    }

    pub fn clear_isr(&self, bits: u32) {
        self.clear(bits);
    }

    /// Block until the requested bits satisfy the match policy, or the
    /// timeout passes.  Returns the register value observed at the decision
    /// point; exclusive (`clear_on_exit`) waits clear the requested bits
    /// only when the condition was met.
    pub fn wait(&self, bits: u32, clear_on_exit: bool, wait_all: bool, timeout: Timeout) -> u32 {
        let state = self.bits.lock().unwrap();
        let (state, satisfied) =
            block_until(&self.changed, state, Deadline::new(timeout), |value| {
                let hit = if wait_all {
                    *value & bits == bits
                } else {
                    *value & bits != 0
                };
                if hit {
                    let snapshot = *value;
                    if clear_on_exit {
                        *value &= !bits;
                    }
                    Some(snapshot)
                } else {
                    None
                }
            });
        match satisfied {
            Some(snapshot) => snapshot,
            // timed out: report the register as last seen, nothing cleared
            None => *state,
        }
    }
}

/// Owner-tracked mutex simulation.  Not recursive, matching the plain
/// kernel mutex.
pub struct RawMutex {
    owner: Mutex<Option<RawThreadId>>,
    released: Condvar,
}

impl RawMutex {
    pub fn new() -> Option<Self> {
        Some(RawMutex {
            owner: Mutex::new(None),
            released: Condvar::new(),
        })
    }

    pub fn lock(&self, timeout: Timeout) -> bool {
        let me = current_thread();
        let owner = self.owner.lock().unwrap();
        let (_owner, locked) =
            block_until(&self.released, owner, Deadline::new(timeout), |owner| {
                if owner.is_none() {
                    *owner = Some(me);
                    Some(())
                } else {
                    None
                }
            });
        locked.is_some()
    }

    /// Fails (returning false) when the caller is not the holder.
    pub fn unlock(&self) -> bool {
        let mut owner = self.owner.lock().unwrap();
        if *owner != Some(current_thread()) {
            return false;
        }
        *owner = None;
        drop(owner);
        self.released.notify_all();
        true
    }

    pub fn holder(&self) -> Option<RawThreadId> {
        *self.owner.lock().unwrap()
    }
}

/// Counting semaphore simulation.
pub struct RawSemaphore {
    count: Mutex<u32>,
    limit: u32,
    given: Condvar,
}

impl RawSemaphore {
    pub fn new(initial: u32, limit: u32) -> Option<Self> {
        Some(RawSemaphore {
            count: Mutex::new(initial),
            limit,
            given: Condvar::new(),
        })
    }

    pub fn take(&self, timeout: Timeout) -> bool {
        let count = self.count.lock().unwrap();
        let (_count, taken) = block_until(&self.given, count, Deadline::new(timeout), |count| {
            if *count > 0 {
                *count -= 1;
                Some(())
            } else {
                None
            }
        });
        taken.is_some()
    }

    pub fn take_isr(&self) -> (bool, bool) {
        (self.take(Timeout(0)), false)
    }

    /// Fails at the count limit, discarding the give.
    pub fn give(&self) -> bool {
        let mut count = self.count.lock().unwrap();
        if *count >= self.limit {
            return false;
        }
        *count += 1;
        drop(count);
        self.given.notify_all();
        true
    }

    pub fn give_isr(&self) -> (bool, bool) {
        (self.give(), false)
    }

    pub fn count(&self) -> usize {
        *self.count.lock().unwrap() as usize
    }
}
