use std::collections::HashSet;
use std::sync::{Arc, Barrier};
use std::thread;

use lease_lock::OwnershipCode;

use crate::support::Fixture;

const CONTENDERS: usize = 16;

/// Run `acquire` on `CONTENDERS` threads released together.
fn race(fx: &Fixture, name: &str, lease_ms: i64) -> Vec<Option<OwnershipCode>> {
    let barrier = Arc::new(Barrier::new(CONTENDERS));
    let workers: Vec<_> = (0..CONTENDERS)
        .map(|_| {
            let lock = fx.handle(name, lease_ms);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                lock.acquire().unwrap()
            })
        })
        .collect();

    workers.into_iter().map(|w| w.join().unwrap()).collect()
}

#[test]
fn concurrent_acquire_on_fresh_lock_has_one_winner() {
    let fx = Fixture::new();
    let results = race(&fx, "reports", 60_000);

    let winners: Vec<_> = results.into_iter().flatten().collect();
    assert_eq!(winners.len(), 1);
    assert_eq!(fx.live_records("reports").len(), 1);
}

#[test]
fn reap_then_claim_race_has_one_winner() {
    let fx = Fixture::new();
    let stale = fx.handle("reports", 1_000).acquire().unwrap().unwrap();
    fx.clock.advance(1_001);

    let results = race(&fx, "reports", 1_000);
    let winners: Vec<_> = results.into_iter().flatten().collect();

    assert_eq!(winners.len(), 1);
    assert_ne!(winners[0], stale);

    let live = fx.live_records("reports");
    assert_eq!(live.len(), 1);
    assert_eq!(live[0].code, winners[0].as_str());
}

#[test]
fn codes_never_repeat_across_resources() {
    let fx = Fixture::new();
    let mut seen = HashSet::new();

    for round in 0..50 {
        let name = format!("resource-{}", round);
        for code in race(&fx, &name, 60_000).into_iter().flatten() {
            assert!(seen.insert(code));
        }
    }
    assert_eq!(seen.len(), 50);
}

#[test]
fn hand_off_under_contention_keeps_one_holder() {
    let fx = Arc::new(Fixture::new());
    let barrier = Arc::new(Barrier::new(CONTENDERS));

    let workers: Vec<_> = (0..CONTENDERS)
        .map(|_| {
            let fx = Arc::clone(&fx);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                let lock = fx.handle("queue", 60_000);
                barrier.wait();
                let mut wins = 0;
                for _ in 0..50 {
                    if let Some(code) = lock.acquire().unwrap() {
                        assert!(fx.live_records("queue").len() <= 1);
                        assert!(lock.release(&code).unwrap());
                        wins += 1;
                    }
                }
                wins
            })
        })
        .collect();

    let total: usize = workers.into_iter().map(|w| w.join().unwrap()).sum();
    assert!(total >= 1);
    assert!(fx.live_records("queue").is_empty());
    assert_eq!(fx.records("queue").len(), total);
}
