// Copyright (c) 2026 FreeRTOS Rust Contributors
// SPDX-License-Identifier: Apache-2.0

//! Condition variable behavior, run against the hosted port with real
//! threads.  The scenarios of interest: a broadcast must chain through every
//! parked waiter exactly once, a single notify must wake a single thread, a
//! notify with nobody waiting must leave no residue, and timeouts must
//! return with the lock held.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration as StdDuration, Instant as StdInstant};

use rand::Rng;
use rand_pcg::Pcg32;

use freertos::sync::{Condvar, Mutex};
use freertos::time::{now, Duration, NoWait};

/// Spawn `n` threads that bump the shared counter under the lock and then
/// park on the condvar, and wait until every one of them is registered.
fn park_waiters(
    state: &Arc<(Mutex<usize>, Condvar)>,
    woken: &Arc<AtomicUsize>,
    n: usize,
) -> Vec<thread::JoinHandle<()>> {
    let handles: Vec<_> = (0..n)
        .map(|_| {
            let state = state.clone();
            let woken = woken.clone();
            thread::spawn(move || {
                let (lock, cv) = &*state;
                let mut parked = lock.lock().unwrap();
                *parked += 1;
                let parked = cv.wait(parked).unwrap();
                drop(parked);
                woken.fetch_add(1, Ordering::SeqCst);
            })
        })
        .collect();

    // Once the parked count reads `n` under the lock, every thread has
    // passed its registration step; the lock hand-off guarantees they are
    // all in (or entering) the channel wait.
    loop {
        let (lock, _) = &**state;
        let parked = lock.lock().unwrap();
        if *parked == n {
            break;
        }
        drop(parked);
        thread::sleep(StdDuration::from_millis(1));
    }
    handles
}

#[test]
fn zero_timeout_returns_immediately_with_lock_held() {
    let lock = Mutex::new(0u32);
    let cv = Condvar::new();

    let guard = lock.lock().unwrap();
    let (mut guard, result) = cv.wait_timeout(guard, NoWait).unwrap();
    assert!(result.timed_out());
    // the lock is held again on return
    *guard = 7;
    drop(guard);
    assert_eq!(*lock.lock().unwrap(), 7);
}

#[test]
fn bounded_wait_times_out() {
    let lock = Mutex::new(());
    let cv = Condvar::new();

    let start = StdInstant::now();
    let guard = lock.lock().unwrap();
    let (_guard, result) = cv.wait_timeout(guard, Duration::millis(60)).unwrap();
    assert!(result.timed_out());
    assert!(start.elapsed() >= StdDuration::from_millis(50));
}

#[test]
fn notify_without_waiters_is_a_no_op() {
    let lock = Mutex::new(());
    let cv = Condvar::new();

    // nobody is waiting; these must not leave a wake token behind
    cv.notify_one();
    cv.notify_all();

    let guard = lock.lock().unwrap();
    let (_guard, result) = cv.wait_timeout(guard, Duration::millis(50)).unwrap();
    assert!(result.timed_out());
}

#[test]
fn wakeup_round_trip() {
    // Thread A parks; thread B flips the flag under the lock and notifies;
    // A must come back holding the lock and seeing the flag.
    let pair = Arc::new((Mutex::new(false), Condvar::new()));
    let pair2 = pair.clone();

    let waiter = thread::spawn(move || {
        let (lock, cv) = &*pair2;
        let mut ready = lock.lock().unwrap();
        while !*ready {
            ready = cv.wait(ready).unwrap();
        }
        assert!(*ready);
    });

    thread::sleep(StdDuration::from_millis(20));
    let (lock, cv) = &*pair;
    {
        let mut ready = lock.lock().unwrap();
        *ready = true;
        cv.notify_one();
    }
    waiter.join().unwrap();
}

#[test]
fn notify_all_wakes_every_parked_waiter() {
    const N: usize = 5;
    let state = Arc::new((Mutex::new(0usize), Condvar::new()));
    let woken = Arc::new(AtomicUsize::new(0));

    let handles = park_waiters(&state, &woken, N);

    {
        let (lock, cv) = &*state;
        let parked = lock.lock().unwrap();
        assert_eq!(*parked, N);
        // a single broadcast, issued while holding the lock
        cv.notify_all();
    }

    for handle in handles {
        handle.join().unwrap();
    }
    // each waiter returned exactly once
    assert_eq!(woken.load(Ordering::SeqCst), N);
}

#[test]
fn notify_one_wakes_exactly_one() {
    const N: usize = 3;
    let state = Arc::new((Mutex::new(0usize), Condvar::new()));
    let woken = Arc::new(AtomicUsize::new(0));

    let handles = park_waiters(&state, &woken, N);

    {
        let (lock, cv) = &*state;
        let _parked = lock.lock().unwrap();
        cv.notify_one();
    }

    thread::sleep(StdDuration::from_millis(100));
    assert_eq!(woken.load(Ordering::SeqCst), 1, "one notify, one wake");

    // release the rest
    let mut rounds = 0;
    while woken.load(Ordering::SeqCst) < N {
        let (lock, cv) = &*state;
        let _parked = lock.lock().unwrap();
        cv.notify_all();
        drop(_parked);
        thread::sleep(StdDuration::from_millis(5));
        rounds += 1;
        assert!(rounds < 200, "waiters never drained");
    }
    for handle in handles {
        handle.join().unwrap();
    }
}

#[test]
fn wait_timeout_while_observes_predicate() {
    let pair = Arc::new((Mutex::new(true), Condvar::new()));
    let pair2 = pair.clone();

    let setter = thread::spawn(move || {
        thread::sleep(StdDuration::from_millis(30));
        let (lock, cv) = &*pair2;
        let mut pending = lock.lock().unwrap();
        *pending = false;
        cv.notify_one();
    });

    let (lock, cv) = &*pair;
    let guard = lock.lock().unwrap();
    let (guard, result) = cv
        .wait_timeout_while(guard, Duration::secs(2), |pending| *pending)
        .unwrap();
    assert!(!result.timed_out());
    assert!(!*guard);
    drop(guard);
    setter.join().unwrap();
}

#[test]
fn wait_timeout_while_reports_unmet_predicate() {
    let lock = Mutex::new(true);
    let cv = Condvar::new();

    let guard = lock.lock().unwrap();
    let (guard, result) = cv
        .wait_timeout_while(guard, Duration::millis(50), |pending| *pending)
        .unwrap();
    assert!(result.timed_out());
    assert!(*guard);
}

#[test]
fn wait_until_past_deadline_times_out() {
    let lock = Mutex::new(());
    let cv = Condvar::new();

    let deadline = now();
    let start = StdInstant::now();
    let guard = lock.lock().unwrap();
    let (_guard, result) = cv.wait_until(guard, deadline).unwrap();
    assert!(result.timed_out());
    assert!(start.elapsed() < StdDuration::from_millis(500));
}

#[test]
fn randomized_notify_stress() {
    const CONSUMERS: usize = 4;
    const TOTAL: usize = 200;

    struct Shared {
        tokens: u32,
        stop: bool,
    }

    let mut rng = Pcg32::new(1, 1);
    let state = Arc::new((
        Mutex::new(Shared {
            tokens: 0,
            stop: false,
        }),
        Condvar::new(),
    ));
    let consumed = Arc::new(AtomicUsize::new(0));

    let handles: Vec<_> = (0..CONSUMERS)
        .map(|_| {
            let state = state.clone();
            let consumed = consumed.clone();
            thread::spawn(move || {
                let (lock, cv) = &*state;
                loop {
                    let guard = lock.lock().unwrap();
                    // bounded wait so a missed wakeup would fail the test
                    // rather than hang it
                    let (mut guard, _) = cv
                        .wait_timeout_while(guard, Duration::millis(100), |shared| {
                            shared.tokens == 0 && !shared.stop
                        })
                        .unwrap();
                    if guard.tokens > 0 {
                        guard.tokens -= 1;
                        consumed.fetch_add(1, Ordering::SeqCst);
                    } else if guard.stop {
                        break;
                    }
                }
            })
        })
        .collect();

    let (lock, cv) = &*state;
    for _ in 0..TOTAL {
        {
            let mut shared = lock.lock().unwrap();
            shared.tokens += 1;
            if rng.gen_range(0..4) == 0 {
                cv.notify_all();
            } else {
                cv.notify_one();
            }
        }
        if rng.gen_range(0..8) == 0 {
            thread::sleep(StdDuration::from_millis(1));
        }
    }

    let start = StdInstant::now();
    while consumed.load(Ordering::SeqCst) < TOTAL {
        assert!(
            start.elapsed() < StdDuration::from_secs(10),
            "tokens were lost"
        );
        {
            let _shared = lock.lock().unwrap();
            cv.notify_all();
        }
        thread::sleep(StdDuration::from_millis(2));
    }

    {
        let mut shared = lock.lock().unwrap();
        shared.stop = true;
        cv.notify_all();
    }
    for handle in handles {
        handle.join().unwrap();
    }
    assert_eq!(consumed.load(Ordering::SeqCst), TOTAL);
}
