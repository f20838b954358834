use super::*;
use dwf_core::test_support::workflow_id;
use std::sync::{Arc as StdArc, Mutex as StdMutex};
use std::thread;
use std::time::Duration;

#[test]
fn lock_is_released_on_drop_and_reacquirable() {
    let registry = new_registry();
    let id = workflow_id("w1");

    let guard = hold(&registry, &id);
    drop(guard);

    let _guard = hold(&registry, &id);
}

#[test]
fn uncontended_identifier_is_pruned_from_the_registry() {
    let registry = new_registry();
    let id = workflow_id("w1");

    drop(hold(&registry, &id));
    assert!(!registry.lock().contains_key(&id));
}

/// Scenario E: two threads contend for the same workflow's lock. The
/// second blocks until the first releases.
#[test]
fn contended_acquisition_blocks_until_release() {
    let registry = new_registry();
    let id = workflow_id("w1");
    let trace: StdArc<StdMutex<Vec<&'static str>>> = StdArc::new(StdMutex::new(Vec::new()));

    let guard_a = hold(&registry, &id);
    trace.lock().unwrap_or_else(|e| e.into_inner()).push("in A");

    let registry_b = registry.clone();
    let id_b = id.clone();
    let trace_b = trace.clone();
    let handle = thread::spawn(move || {
        trace_b.lock().unwrap_or_else(|e| e.into_inner()).push("start B");
        let _guard_b = hold(&registry_b, &id_b);
        trace_b.lock().unwrap_or_else(|e| e.into_inner()).push("in B");
    });

    // Give thread B a chance to observe contention before A releases.
    thread::sleep(Duration::from_millis(50));
    trace.lock().unwrap_or_else(|e| e.into_inner()).push("out A");
    drop(guard_a);

    handle.join().expect("thread B panicked");

    let observed = trace.lock().unwrap_or_else(|e| e.into_inner()).clone();
    assert_eq!(observed, vec!["in A", "start B", "out A", "in B"]);
}

#[test]
fn different_identifiers_do_not_contend() {
    let registry = new_registry();
    let a = workflow_id("w1");
    let b = workflow_id("w2");

    let _guard_a = hold(&registry, &a);
    // Must not block: distinct identifier, distinct lock.
    let _guard_b = hold(&registry, &b);
}
