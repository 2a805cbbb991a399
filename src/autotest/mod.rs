//! Self-test suite
//!
//! Scenario checks over routines and generators, run by the `autotest`
//! subcommand of the CLI. Each group logs a line at `info` when it passes and
//! returns the first failed check as an error.

use std::cell::Cell;
use std::panic::{self, AssertUnwindSafe};

use anyhow::{anyhow, ensure, Context, Result};
use tracing::info;

use crate::runtime::coroutine::{suspend, CoError, Generator, Routine};

// Units under test

fn simple_routine() -> Routine<'static, i32> {
    Routine::new(async { Ok(42) })
}

fn step_routine() -> Routine<'static, i32> {
    Routine::new(async {
        suspend().await;
        suspend().await;
        Ok(7)
    })
}

fn void_routine(flag: &Cell<bool>) -> Routine<'_, ()> {
    Routine::new(async move {
        suspend().await;
        flag.set(true);
        Ok(())
    })
}

fn throw_routine() -> Routine<'static, i32> {
    Routine::new(async {
        suspend().await;
        Err(anyhow!("boom"))
    })
}

fn simple_generator() -> Generator<'static, i32> {
    Generator::new(|co| async move {
        co.yield_(1).await;
        co.yield_(2).await;
        co.yield_(3).await;
        Ok(())
    })
}

fn range_generator(n: i32) -> Generator<'static, i32> {
    Generator::new(move |co| async move {
        for i in 0..n {
            co.yield_(i).await;
        }
        Ok(())
    })
}

fn throw_generator() -> Generator<'static, i32> {
    Generator::new(|co| async move {
        co.yield_(1).await;
        Err(anyhow!("gen boom"))
    })
}

fn expect_exhausted(result: Result<i32, CoError>) -> Result<()> {
    match result {
        Err(CoError::Exhausted) => Ok(()),
        Err(err) => Err(anyhow!("expected exhaustion, got fault: {err}")),
        Ok(value) => Err(anyhow!("expected exhaustion, got value {value}")),
    }
}

/// Routine behaviour: completion, stepping, faults and moves.
pub fn routine_scenarios() -> Result<()> {
    // Immediate completion
    {
        let mut r = simple_routine();
        ensure!(!r.step()?, "simple routine should finish on the first step");
        ensure!(r.result() == 42, "simple routine result");
        ensure!(!r.step()?, "simple routine should stay finished");
    }

    // Two suspension points
    {
        let mut r = step_routine();
        ensure!(r.step()?, "first suspension");
        ensure!(r.step()?, "second suspension");
        ensure!(!r.step()?, "completion");
        ensure!(r.result() == 7, "step routine result");
        ensure!(!r.step()?, "stable after completion");
    }

    // Routine producing nothing
    {
        let flag = Cell::new(false);
        let mut r = void_routine(&flag);
        ensure!(r.step()?, "void routine suspends");
        ensure!(!flag.get(), "flag set too early");
        ensure!(!r.step()?, "void routine finishes");
        ensure!(flag.get(), "flag not set");
        ensure!(!r.step()?, "void routine stays finished");
    }

    // Fault propagation
    {
        let mut r = throw_routine();
        ensure!(r.step()?, "throwing routine suspends first");
        let caught = r.step().is_err();
        ensure!(caught, "fault was not propagated");
        ensure!(!r.step()?, "routine must be done after a fault");
    }

    // Ownership transfer
    {
        let mut r1 = step_routine();
        let mut r2 = std::mem::take(&mut r1);
        ensure!(r1.is_inert(), "moved-from routine should be inert");
        ensure!(r2.step()?, "moved routine suspension 1");
        ensure!(r2.step()?, "moved routine suspension 2");
        ensure!(!r2.step()?, "moved routine completion");
        ensure!(r2.result() == 7, "moved routine result");
    }

    info!("Routine: All tests passed.");
    Ok(())
}

/// Generator behaviour: pulls, exhaustion, iteration, faults and moves.
pub fn generator_scenarios() -> Result<()> {
    // Simple sequence
    {
        let mut g = simple_generator();
        for expected in 1..=3 {
            let value = g.next_value().context("simple generator pull")?;
            ensure!(value == expected, "expected {expected}, got {value}");
        }
        expect_exhausted(g.next_value())?;
    }

    // Range
    {
        let mut g = range_generator(5);
        for expected in 0..5 {
            let value = g.next_value().context("range generator pull")?;
            ensure!(value == expected, "expected {expected}, got {value}");
        }
        expect_exhausted(g.next_value())?;
    }

    // Iteration
    {
        let mut g = range_generator(4);
        let mut expected = 0;
        for value in &mut g {
            let value = value?;
            ensure!(value == expected, "expected {expected}, got {value}");
            expected += 1;
        }
        ensure!(expected == 4, "iteration produced {expected} values");
    }

    // Fault propagation
    {
        let mut g = throw_generator();
        ensure!(g.next_value()? == 1, "value before the fault");
        let caught = matches!(g.next_value(), Err(CoError::Fault(_)));
        ensure!(caught, "fault was not propagated");
    }

    // Ownership transfer
    {
        let mut g1 = range_generator(3);
        let mut g2 = std::mem::take(&mut g1);
        ensure!(g1.is_inert(), "moved-from generator should be inert");
        for expected in 0..3 {
            ensure!(g2.next_value()? == expected, "moved generator value");
        }
    }

    info!("Generator: All tests passed.");
    Ok(())
}

/// Stability once units have finished.
pub fn edge_scenarios() -> Result<()> {
    // Repeated steps after completion
    {
        let mut r = simple_routine();
        for _ in 0..3 {
            ensure!(!r.step()?, "completed routine stepped again");
        }
    }

    // Exhaustion is stable
    {
        let mut g = range_generator(1);
        ensure!(g.next_value()? == 0, "single value");
        expect_exhausted(g.next_value())?;
        expect_exhausted(g.next_value())?;
    }

    // A panicking body is re-raised in the caller and leaves the unit done
    {
        let mut r: Routine<'static, i32> = Routine::new(async {
            suspend().await;
            Ok(detonate())
        });
        ensure!(r.step()?, "panicking routine suspends first");
        let unwound = panic::catch_unwind(AssertUnwindSafe(|| r.step())).is_err();
        ensure!(unwound, "panic was not re-raised");
        ensure!(!r.step()?, "routine must be done after a panic");
    }

    info!("Edge cases: All tests passed.");
    Ok(())
}

fn detonate() -> i32 {
    panic!("detonated")
}

/// Run every scenario group in order.
pub fn run_all() -> Result<()> {
    routine_scenarios().context("routine scenarios failed")?;
    generator_scenarios().context("generator scenarios failed")?;
    edge_scenarios().context("edge scenarios failed")?;
    info!("All coroutine tests passed.");
    Ok(())
}
