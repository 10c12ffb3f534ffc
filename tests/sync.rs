// Copyright (c) 2026 FreeRTOS Rust Contributors
// SPDX-License-Identifier: Apache-2.0

//! Behavior of the collaborator primitives the condition variables are
//! built on: queue ordering and overwrite, mutex ownership, semaphore
//! counting, tick clock.

use std::sync::Arc;
use std::thread;
use std::time::{Duration as StdDuration, Instant as StdInstant};

use freertos::sync::{Mutex, TryLockError};
use freertos::sys::queue::Queue;
use freertos::sys::sync::{Mutex as SysMutex, Semaphore};
use freertos::time::{now, sleep, Duration, NoWait};
use freertos::Error;

#[test]
fn queue_is_fifo_and_bounded() {
    let queue: Queue<u32, 4> = Queue::new().unwrap();
    assert!(queue.is_empty());
    assert_eq!(queue.try_recv().unwrap_err(), Error::QueueEmpty);

    for value in 1..=4 {
        queue.send(value, NoWait).unwrap();
    }
    assert!(queue.is_full());
    assert_eq!(queue.available(), 0);
    assert_eq!(queue.try_send(5).unwrap_err(), Error::QueueFull);

    for expected in 1..=4 {
        assert_eq!(queue.recv(NoWait).unwrap(), expected);
    }
    assert!(queue.is_empty());
}

#[test]
fn queue_send_front_jumps_the_line() {
    let queue: Queue<u32, 4> = Queue::new().unwrap();
    queue.send(1, NoWait).unwrap();
    queue.send(2, NoWait).unwrap();
    queue.send_front(9, NoWait).unwrap();

    assert_eq!(queue.peek(NoWait).unwrap(), 9);
    assert_eq!(queue.recv(NoWait).unwrap(), 9);
    assert_eq!(queue.recv(NoWait).unwrap(), 1);
    assert_eq!(queue.recv(NoWait).unwrap(), 2);
}

#[test]
fn single_slot_replace_overwrites() {
    let slot: Queue<u32, 1> = Queue::new().unwrap();
    slot.replace(7);
    slot.replace(9);
    assert_eq!(slot.len(), 1);
    assert_eq!(slot.recv(NoWait).unwrap(), 9);
    assert_eq!(slot.try_recv().unwrap_err(), Error::QueueEmpty);
}

#[test]
fn queue_blocking_send_waits_for_space() {
    let slot: Arc<Queue<u32, 1>> = Arc::new(Queue::new().unwrap());
    slot.send(1, NoWait).unwrap();

    let slot2 = slot.clone();
    let drainer = thread::spawn(move || {
        thread::sleep(StdDuration::from_millis(30));
        slot2.recv(NoWait).unwrap()
    });

    slot.send(2, Duration::secs(2)).unwrap();
    assert_eq!(drainer.join().unwrap(), 1);
    assert_eq!(slot.recv(NoWait).unwrap(), 2);
}

#[test]
fn queue_recv_times_out() {
    let queue: Queue<u32, 2> = Queue::new().unwrap();
    let start = StdInstant::now();
    assert_eq!(
        queue.recv(Duration::millis(50)).unwrap_err(),
        Error::Timeout
    );
    assert!(start.elapsed() >= StdDuration::from_millis(40));
}

#[test]
fn sys_mutex_tracks_its_owner() {
    let mutex = Arc::new(SysMutex::new().unwrap());
    assert_eq!(mutex.owner(), None);

    mutex.lock(NoWait).unwrap();
    assert!(mutex.held_by_current_thread());

    let mutex2 = mutex.clone();
    let contender = thread::spawn(move || {
        assert!(!mutex2.held_by_current_thread());
        mutex2.lock(NoWait).is_err()
    });
    assert!(contender.join().unwrap(), "lock should be unavailable");

    mutex.unlock();
    assert_eq!(mutex.owner(), None);
}

#[test]
fn mutex_try_lock_reports_contention() {
    let mutex = Arc::new(Mutex::new(0u32));

    let guard = mutex.lock().unwrap();
    let mutex2 = mutex.clone();
    let contender = thread::spawn(move || {
        matches!(mutex2.try_lock(), Err(TryLockError::WouldBlock))
    });
    assert!(contender.join().unwrap());
    drop(guard);

    *mutex.try_lock().unwrap() = 3;
    assert_eq!(*mutex.lock().unwrap(), 3);
}

#[test]
fn mutex_timed_lock_expires_and_recovers() {
    let mutex = Arc::new(Mutex::new(()));

    let guard = mutex.lock().unwrap();
    let mutex2 = mutex.clone();
    let contender = thread::spawn(move || {
        let start = StdInstant::now();
        let denied = mutex2.try_lock_for(Duration::millis(50)).is_err();
        denied && start.elapsed() >= StdDuration::from_millis(40)
    });
    assert!(contender.join().unwrap());
    drop(guard);

    assert!(mutex.try_lock_for(Duration::millis(50)).is_ok());
}

#[test]
fn semaphore_counts_to_its_limit() {
    let sem = Semaphore::new(0, 2).unwrap();
    assert_eq!(sem.take(NoWait).unwrap_err(), Error::Timeout);

    sem.give().unwrap();
    sem.give().unwrap();
    assert_eq!(sem.count(), 2);
    // a give at the limit is discarded
    assert_eq!(sem.give().unwrap_err(), Error::QueueFull);

    sem.take(NoWait).unwrap();
    sem.take(NoWait).unwrap();
    assert_eq!(sem.count(), 0);

    let start = StdInstant::now();
    assert_eq!(sem.take(Duration::millis(40)).unwrap_err(), Error::Timeout);
    assert!(start.elapsed() >= StdDuration::from_millis(30));
}

#[test]
fn binary_semaphore_signals_across_threads() {
    let sem = Arc::new(Semaphore::binary().unwrap());
    let sem2 = sem.clone();

    let giver = thread::spawn(move || {
        thread::sleep(StdDuration::from_millis(20));
        sem2.give().unwrap();
    });

    sem.take(Duration::secs(2)).unwrap();
    giver.join().unwrap();
}

#[test]
fn sleep_advances_the_tick_clock() {
    let before = now();
    sleep(Duration::millis(30));
    let elapsed = now() - before;
    assert!(elapsed.ticks() >= 25);
}
