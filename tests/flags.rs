// Copyright (c) 2026 FreeRTOS Rust Contributors
// SPDX-License-Identifier: Apache-2.0

//! Flag-based condition behavior: match policies, consumption policies, and
//! the purity of the timeout path.

use std::sync::Arc;
use std::thread;
use std::time::{Duration as StdDuration, Instant as StdInstant};

use freertos::sync::{CondFlags, Flags};
use freertos::time::{now, Duration, NoWait};

const DATA: Flags = Flags::new(0b0001);
const SPACE: Flags = Flags::new(0b0010);
const SHUTDOWN: Flags = Flags::new(0b0100);

#[test]
fn get_set_clear_roundtrip() {
    let cf = CondFlags::new();
    let cases = [
        (Flags::new(0b1010), Flags::new(0b0110)),
        (Flags::max(), Flags::new(0b0001)),
        (Flags::new(0b0001), Flags::max()),
    ];
    for (set, clear) in cases {
        cf.set(set);
        cf.clear(clear);
        assert_eq!(cf.get(), set & !clear);
        cf.clear(Flags::max());
    }
    assert!(cf.get().is_empty());
}

#[test]
fn wait_any_consumes_only_matched_bits() {
    let cf = CondFlags::new();
    cf.set(DATA | SHUTDOWN);

    let woke = cf.wait_any_for(DATA | SPACE, NoWait);
    assert_eq!(woke, Some(DATA));
    // only the matched bit was consumed; the unrelated one survives
    assert_eq!(cf.get(), SHUTDOWN);
}

#[test]
fn wait_all_times_out_on_partial_match() {
    let cf = CondFlags::new();
    cf.set(DATA);

    let woke = cf.wait_all_for(DATA | SPACE, Duration::millis(50));
    assert_eq!(woke, None);
    // nothing was cleared on the timeout path
    assert_eq!(cf.get(), DATA);
}

#[test]
fn wait_all_completes_when_last_bit_arrives() {
    let cf = Arc::new(CondFlags::new());
    cf.set(DATA | SHUTDOWN);

    let cf2 = cf.clone();
    let setter = thread::spawn(move || {
        thread::sleep(StdDuration::from_millis(30));
        cf2.set(SPACE);
    });

    let woke = cf.wait_all_for(DATA | SPACE, Duration::secs(2));
    assert_eq!(woke, Some(DATA | SPACE));
    setter.join().unwrap();
    // both requested bits consumed, the bystander left alone
    assert_eq!(cf.get(), SHUTDOWN);
}

#[test]
fn exclusive_wait_blocks_until_set() {
    let cf = Arc::new(CondFlags::new());
    let cf2 = cf.clone();

    let start = StdInstant::now();
    let setter = thread::spawn(move || {
        thread::sleep(StdDuration::from_millis(30));
        cf2.set(DATA);
    });

    let woke = cf.wait_any_for(DATA, Duration::secs(2));
    assert_eq!(woke, Some(DATA));
    assert!(start.elapsed() >= StdDuration::from_millis(25));
    setter.join().unwrap();
}

#[test]
fn shared_wait_fans_out_and_leaves_flag() {
    let cf = Arc::new(CondFlags::new());

    let observers: Vec<_> = (0..2)
        .map(|_| {
            let cf = cf.clone();
            thread::spawn(move || cf.shared_wait_any_for(SHUTDOWN, Duration::secs(2)))
        })
        .collect();

    thread::sleep(StdDuration::from_millis(20));
    cf.set(SHUTDOWN);

    for observer in observers {
        assert_eq!(observer.join().unwrap(), Some(SHUTDOWN));
    }
    // a shared wait is an observation, not a consumption
    assert_eq!(cf.get(), SHUTDOWN);
}

#[test]
fn until_variant_with_past_deadline_returns_immediately() {
    let cf = CondFlags::new();
    let start = StdInstant::now();
    assert_eq!(cf.wait_any_until(DATA, now()), None);
    assert!(start.elapsed() < StdDuration::from_millis(500));
}
