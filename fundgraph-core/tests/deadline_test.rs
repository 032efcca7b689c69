use std::sync::mpsc;
use std::time::Duration;

use fundgraph_core::deadline::{run_with_deadline, DeadlineGuard};
use fundgraph_core::errors::RetrievalError;

#[test]
fn fast_call_returns_value() {
    let out = run_with_deadline(Duration::from_secs(5), "fast", || 21 * 2).unwrap();
    assert_eq!(out, 42);
}

#[test]
fn slow_call_times_out() {
    let err = run_with_deadline(Duration::from_millis(20), "slow", || {
        std::thread::sleep(Duration::from_millis(500));
        1
    })
    .unwrap_err();
    assert!(matches!(err, RetrievalError::Timeout { ref operation, .. } if operation == "slow"));
}

// ── Deadline guard ───────────────────────────────────────────────────────

#[test]
fn guard_passes_fast_calls_through() {
    let guard = DeadlineGuard::new(Duration::from_secs(5));
    assert_eq!(guard.run("fast", || 7).unwrap(), 7);
    assert_eq!(guard.run("fast", || 8).unwrap(), 8);
    assert_eq!(guard.stragglers(), 0);
    assert!(!guard.is_open());
}

#[test]
fn guard_refuses_calls_while_a_timed_out_worker_runs() {
    let guard = DeadlineGuard::new(Duration::from_millis(20));
    let (release, blocked) = mpsc::channel::<()>();
    let (done_tx, done) = mpsc::channel::<()>();

    let err = guard
        .run("stuck", move || {
            let _ = blocked.recv();
            let _ = done_tx.send(());
        })
        .unwrap_err();
    assert!(matches!(err, RetrievalError::Timeout { .. }));
    assert_eq!(guard.stragglers(), 1);
    assert!(guard.is_open());

    let err = guard.run("stuck", || 1).unwrap_err();
    assert!(matches!(
        err,
        RetrievalError::WorkerUnavailable { ref operation, .. } if operation == "stuck"
    ));

    // Letting the straggler finish closes the guard again.
    release.send(()).unwrap();
    done.recv_timeout(Duration::from_secs(5)).unwrap();
    let mut closed = false;
    for _ in 0..200 {
        if !guard.is_open() {
            closed = true;
            break;
        }
        std::thread::sleep(Duration::from_millis(5));
    }
    assert!(closed);
    assert_eq!(guard.run("stuck", || 2).unwrap(), 2);
}

#[test]
fn guard_tolerates_configured_number_of_stragglers() {
    let guard = DeadlineGuard::with_max_stragglers(Duration::from_millis(10), 2);
    let (_hold, blocked) = mpsc::channel::<()>();
    let blocked = std::sync::Arc::new(std::sync::Mutex::new(blocked));

    for _ in 0..2 {
        let blocked = std::sync::Arc::clone(&blocked);
        let err = guard
            .run("slow", move || {
                let _ = blocked.lock().map(|rx| rx.recv_timeout(Duration::from_secs(2)));
            })
            .unwrap_err();
        assert!(matches!(err, RetrievalError::Timeout { .. }));
    }
    assert_eq!(guard.stragglers(), 2);
    let err = guard.run("slow", || ()).unwrap_err();
    assert!(matches!(err, RetrievalError::WorkerUnavailable { .. }));
}
