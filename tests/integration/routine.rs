//! Routine integration tests
//!
//! Drives routines through the public API the way an owner would.

use std::cell::RefCell;

use coroutines::{suspend, CoError, Routine};

/// A routine that waits for `ticks` external steps, then reports how many
/// items the caller pushed meanwhile.
fn collector(
    inbox: &RefCell<Vec<u32>>,
    ticks: usize,
) -> Routine<'_, usize> {
    Routine::new(async move {
        for _ in 0..ticks {
            suspend().await;
        }
        Ok(inbox.borrow().len())
    })
}

#[test]
fn test_two_suspensions_final_value() {
    let mut r = Routine::new(async {
        suspend().await;
        suspend().await;
        Ok(42)
    });

    assert!(r.step().unwrap());
    assert!(r.step().unwrap());
    assert!(!r.step().unwrap());
    assert_eq!(r.result(), 42);
    assert!(!r.step().unwrap());
}

#[test]
fn test_owner_interleaves_with_routine() {
    let inbox = RefCell::new(Vec::new());
    let mut r = collector(&inbox, 3);

    let mut n = 0;
    while r.step().unwrap() {
        inbox.borrow_mut().push(n);
        n += 1;
    }
    assert_eq!(r.result(), 3);
    assert_eq!(*inbox.borrow(), [0, 1, 2]);
}

#[test]
fn test_nested_routines() {
    // An outer routine that drives an inner one to completion.
    let mut outer = Routine::new(async {
        let mut inner = Routine::new(async {
            suspend().await;
            Ok(20)
        });
        let mut total = 0;
        while inner.step()? {
            total += 1;
            suspend().await;
        }
        Ok(total + inner.take_result())
    });

    assert!(outer.step().unwrap());
    assert!(!outer.step().unwrap());
    assert_eq!(outer.result(), 21);
}

#[test]
fn test_fault_reaches_owner_once() {
    #[derive(Debug, thiserror::Error)]
    #[error("disk on fire")]
    struct DiskFault;

    let mut r = Routine::<'_, ()>::new(async {
        suspend().await;
        Err(DiskFault.into())
    });

    assert!(r.step().unwrap());
    match r.step() {
        Err(CoError::Fault(err)) => assert!(err.is::<DiskFault>()),
        other => panic!("expected a fault, got {:?}", other),
    }
    assert!(!r.step().unwrap());
    assert!(!r.step().unwrap());
}

#[test]
fn test_moved_routine_continues() {
    let mut r1 = Routine::new(async {
        suspend().await;
        suspend().await;
        Ok(String::from("moved"))
    });
    assert!(r1.step().unwrap());

    let mut r2 = std::mem::take(&mut r1);
    assert!(r1.is_inert());
    assert!(r2.step().unwrap());
    assert!(!r2.step().unwrap());
    assert_eq!(r2.take_result(), "moved");
}
