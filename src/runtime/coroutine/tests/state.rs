//! 完成状态机单元测试
//!
//! Suspension futures, state transitions and error accessors.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures_util::task::noop_waker_ref;

use super::fixtures::*;
use crate::runtime::coroutine::{suspend, CoError, Routine, Suspend, UnitConfig, UnitKind, UnitState};

fn poll_once<F: Future + Unpin>(fut: &mut F) -> Poll<F::Output> {
    let mut cx = Context::from_waker(noop_waker_ref());
    Pin::new(fut).poll(&mut cx)
}

#[cfg(test)]
mod suspend_tests {
    use super::*;

    #[test]
    fn test_suspend_is_pending_once() {
        let mut s = suspend();
        assert!(poll_once(&mut s).is_pending());
        assert!(poll_once(&mut s).is_ready());
        assert!(poll_once(&mut s).is_ready());
    }

    #[test]
    fn test_suspend_never_is_ready() {
        let mut s = Suspend::never();
        assert!(poll_once(&mut s).is_ready());
    }

    #[test]
    fn test_suspend_debug() {
        let debug = format!("{:?}", suspend());
        assert!(debug.contains("Suspend"));
    }
}

#[cfg(test)]
mod state_transition_tests {
    use super::*;

    #[test]
    fn test_routine_states() {
        let mut r = step_routine(1);
        assert_eq!(r.state(), UnitState::Suspended);
        r.step().unwrap();
        assert_eq!(r.state(), UnitState::Suspended);
        r.run_to_end().unwrap();
        assert_eq!(r.state(), UnitState::Completed);
    }

    #[test]
    fn test_fault_completes_unit() {
        let mut r = throw_routine();
        r.step().unwrap();
        assert_eq!(r.state(), UnitState::Suspended);
        let _ = r.step();
        assert_eq!(r.state(), UnitState::Completed);
    }

    #[test]
    fn test_default_is_inert() {
        let r: Routine<'static, ()> = Routine::default();
        assert_eq!(r.state(), UnitState::Inert);
        assert!(r.is_inert());
        assert!(!r.is_done());
    }

    #[test]
    fn test_generator_state_after_last_yield() {
        let mut g = range_generator(1);
        g.next_value().unwrap();
        // The body has not returned yet; only the next pull finds that out.
        assert_eq!(g.state(), UnitState::Suspended);
        assert!(g.next_value().is_err());
        assert_eq!(g.state(), UnitState::Completed);
    }

    #[test]
    fn test_debug_output() {
        let r = simple_routine().named("dbg");
        let debug = format!("{:?}", r);
        assert!(debug.contains("Routine"));
        assert!(debug.contains("Suspended"));
        assert!(debug.contains("dbg"));
    }

    #[test]
    fn test_unit_kind_display() {
        assert_eq!(UnitKind::Routine.to_string(), "routine");
        assert_eq!(UnitKind::Generator.to_string(), "generator");
    }

    #[test]
    fn test_unit_kind_accessor() {
        assert_eq!(simple_routine().kind(), UnitKind::Routine);
        assert_eq!(range_generator(2).kind(), UnitKind::Generator);

        let r: Routine<'static, i32> = Routine::default();
        assert_eq!(r.kind(), UnitKind::Routine);
        let g: crate::runtime::coroutine::Generator<'static, i32> = Default::default();
        assert_eq!(g.kind(), UnitKind::Generator);
    }

    #[test]
    fn test_unit_config_default() {
        let config = UnitConfig::default();
        assert!(config.name.is_none());
        assert!(!config.trace);
        assert_eq!(UnitConfig::named("x").name.as_deref(), Some("x"));
    }
}

#[cfg(test)]
mod error_tests {
    use super::*;

    #[test]
    fn test_exhausted_accessors() {
        let err = CoError::Exhausted;
        assert!(err.is_exhausted());
        assert!(!err.is_fault());
        assert!(err.as_fault().is_none());
        assert!(err.into_fault().is_none());
    }

    #[test]
    fn test_fault_is_transparent() {
        let err = CoError::Fault(anyhow::anyhow!("inner message"));
        assert!(err.is_fault());
        assert_eq!(err.to_string(), "inner message");
        assert_eq!(err.into_fault().unwrap().to_string(), "inner message");
    }
}
