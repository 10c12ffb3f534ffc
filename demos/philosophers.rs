// Copyright (c) 2026 FreeRTOS Rust Contributors
// SPDX-License-Identifier: Apache-2.0

//! Dining philosophers, coordinated by a single Mutex/Condvar pair.
//!
//! The forks live in one array protected by a [`Mutex`]; a philosopher that
//! finds a fork taken waits on the [`Condvar`], and every release is a
//! broadcast since there is no telling which neighbor is hungry.  Runs
//! against the hosted port:
//!
//! ```console
//! cargo run --example philosophers
//! ```

use std::sync::Arc;
use std::thread;

use freertos::sync::{Condvar, Mutex};
use freertos::time::{sleep, Duration};

/// How many philosophers.  There will be the same number of forks.
const NUM_PHIL: usize = 6;

/// How many times each philosopher eats before leaving the table.
const ROUNDS: usize = 4;

struct ForkSync {
    /// One flag per fork: true while some philosopher holds it.
    forks: Mutex<[bool; NUM_PHIL]>,
    /// Wakes fork-waiters after a release.
    cond: Condvar,
}

impl ForkSync {
    fn take(&self, index: usize) {
        let mut forks = self.forks.lock().unwrap();
        forks = self.cond.wait_while(forks, |forks| forks[index]).unwrap();
        forks[index] = true;
    }

    fn release(&self, index: usize) {
        let mut forks = self.forks.lock().unwrap();
        forks[index] = false;
        // No predictable waiter, so must wake everyone.
        self.cond.notify_all();
    }
}

fn phil_thread(n: usize, syncer: Arc<ForkSync>) {
    // the last philosopher reaches across, which breaks the deadlock cycle
    let (first, second) = if n == NUM_PHIL - 1 { (0, n) } else { (n, n + 1) };
    for round in 0..ROUNDS {
        syncer.take(first);
        syncer.take(second);
        println!("philosopher {} is eating (round {})", n, round);
        sleep(Duration::millis(20));
        syncer.release(second);
        syncer.release(first);
        println!("philosopher {} is thinking", n);
        sleep(Duration::millis(10));
    }
}

fn main() {
    let syncer = Arc::new(ForkSync {
        forks: Mutex::new([false; NUM_PHIL]),
        cond: Condvar::new(),
    });

    let handles: Vec<_> = (0..NUM_PHIL)
        .map(|i| {
            let syncer = syncer.clone();
            thread::spawn(move || phil_thread(i, syncer))
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
    println!("All philosophers are done eating");
}
