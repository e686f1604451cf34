// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Runner status polling paced by the backoff ladder.

use gantry_core::backoff::Backoff;
use gantry_core::clock::{Clock, FakeClock};

#[test]
fn poll_delays_climb_the_ladder_and_stay_capped() {
    let clock = FakeClock::new();
    let backoff = Backoff::new(clock.now(), clock.clone()).unwrap();

    let mut delays = Vec::new();
    for _ in 0..16 {
        let delay = backoff.to_seconds();
        delays.push(delay);
        clock.advance_secs(delay);
    }

    assert_eq!(
        delays,
        vec![1, 1, 1, 1, 2, 2, 4, 4, 8, 8, 16, 16, 32, 32, 64, 64]
    );
}

#[test]
fn independent_runners_pace_independently() {
    let clock = FakeClock::new();
    let early = Backoff::new(clock.now(), clock.clone()).unwrap();
    clock.advance_secs(100);
    let late = Backoff::new(clock.now(), clock.clone()).unwrap();

    assert_eq!(early.to_seconds(), 32);
    assert_eq!(late.to_seconds(), 1);
}
