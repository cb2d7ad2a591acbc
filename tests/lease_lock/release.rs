use crate::support::Fixture;

#[test]
fn release_frees_the_lock_immediately() {
    let fx = Fixture::new();
    let lock = fx.handle("reports", 60_000);

    let c1 = lock.acquire().unwrap().unwrap();
    assert!(lock.release(&c1).unwrap());

    let c2 = lock.acquire().unwrap().expect("released lock should be free");
    assert_ne!(c1, c2);
}

#[test]
fn double_release_returns_false_and_spares_the_new_holder() {
    let fx = Fixture::new();
    let lock = fx.handle("reports", 60_000);

    let c1 = lock.acquire().unwrap().unwrap();
    assert!(lock.release(&c1).unwrap());
    assert!(!lock.release(&c1).unwrap());

    let c2 = lock.acquire().unwrap().unwrap();
    assert!(!lock.release(&c1).unwrap());

    let live = fx.live_records("reports");
    assert_eq!(live.len(), 1);
    assert_eq!(live[0].code, c2.as_str());
}

#[test]
fn release_with_unknown_code_is_a_no_op() {
    let fx = Fixture::new();
    let lock = fx.handle("reports", 60_000);

    let code = lock.acquire().unwrap().unwrap();
    assert!(!lock.release("not-a-real-code").unwrap());

    let live = fx.live_records("reports");
    assert_eq!(live.len(), 1);
    assert_eq!(live[0].code, code.as_str());
}

#[test]
fn release_after_lease_lapsed_returns_false() {
    let fx = Fixture::new();
    let lock = fx.handle("reports", 1_000);

    let code = lock.acquire().unwrap().unwrap();
    fx.clock.advance(1_500);
    assert!(!lock.release(&code).unwrap());
}

#[test]
fn release_after_being_reaped_returns_false() {
    let fx = Fixture::new();
    let lock = fx.handle("reports", 1_000);

    let stale = lock.acquire().unwrap().unwrap();
    fx.clock.advance(1_001);
    let fresh = lock.acquire().unwrap().unwrap();

    assert!(!lock.release(&stale).unwrap());
    assert_eq!(fx.live_records("reports")[0].code, fresh.as_str());
}

#[test]
fn code_cannot_release_another_resource() {
    let fx = Fixture::new();
    let a = fx.handle("a", 60_000);
    let b = fx.handle("b", 60_000);

    let code_a = a.acquire().unwrap().unwrap();
    assert!(!b.release(&code_a).unwrap());
    assert_eq!(fx.live_records("a").len(), 1);
}

#[test]
fn release_keeps_the_record_as_retired() {
    let fx = Fixture::new();
    let lock = fx.handle("reports", 60_000);

    let code = lock.acquire().unwrap().unwrap();
    fx.clock.advance(5);
    assert!(lock.release(&code).unwrap());

    let records = fx.records("reports");
    assert_eq!(records.len(), 1);
    assert_ne!(records[0].name, "reports");
    assert_eq!(records[0].expired, Some(crate::support::START + 5));
}

#[test]
fn quick_release_cycles_do_not_collide_on_retired_names() {
    let fx = Fixture::new();
    let lock = fx.handle("reports", 60_000);

    // the clock never moves, so every retirement shares a timestamp
    for _ in 0..20 {
        let code = lock.acquire().unwrap().unwrap();
        assert!(lock.release(&code).unwrap());
    }
    assert_eq!(fx.records("reports").len(), 20);
}
