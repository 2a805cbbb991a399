//! Deferred-result routines.

use std::fmt;
use std::future::Future;
use std::ops::Deref;

use super::error::CoResult;
use super::state::{Completion, UnitConfig, UnitKind, UnitState};

/// A resumable computation that runs to one final value.
///
/// The body is an `async` block returning `anyhow::Result<T>`. It does not
/// start until the first [`step`](Routine::step), and it only makes progress
/// inside `step` calls. Each `.await` on [`suspend()`](super::suspend) is a
/// point where `step` returns `Ok(true)` to the owner.
///
/// `Routine<'_, ()>` is the routine that produces nothing.
///
/// # Example
///
/// ```rust
/// use coroutines::{suspend, Routine};
///
/// let mut r = Routine::new(async {
///     suspend().await;
///     suspend().await;
///     Ok(42)
/// });
///
/// assert!(r.step().unwrap());
/// assert!(r.step().unwrap());
/// assert!(!r.step().unwrap());
/// assert_eq!(r.result(), 42);
/// assert!(!r.step().unwrap());
/// ```
pub struct Routine<'a, T> {
    state: Completion<'a, T>,
}

impl<'a, T: 'a> Routine<'a, T> {
    /// Wrap a routine body. No body code runs here.
    pub fn new<F>(body: F) -> Self
    where
        F: Future<Output = anyhow::Result<T>> + 'a,
    {
        let body = Box::pin(async move { body.await.map(Some) });
        Self {
            state: Completion::new(UnitKind::Routine, body, None),
        }
    }
}

impl<'a, T> Routine<'a, T> {
    /// Replace the unit's settings.
    pub fn with_config(
        mut self,
        config: UnitConfig,
    ) -> Self {
        self.state.set_config(config);
        self
    }

    /// Name the routine in log events.
    pub fn named(
        self,
        name: impl Into<String>,
    ) -> Self {
        self.with_config(UnitConfig::named(name))
    }

    /// The unit's settings.
    #[inline]
    pub fn config(&self) -> &UnitConfig {
        self.state.config()
    }

    /// Resume the routine once.
    ///
    /// Returns `Ok(true)` if the body stopped at a suspension point and
    /// `Ok(false)` once it has completed. After completion this is a no-op
    /// that keeps returning `Ok(false)`.
    ///
    /// A fault raised by the body during this resumption is returned as
    /// [`CoError::Fault`](super::CoError::Fault) (or, for a panic, resumes
    /// unwinding from this call). It is reported once; the routine is
    /// completed afterwards.
    ///
    /// # Panics
    ///
    /// Panics if the routine is inert.
    pub fn step(&mut self) -> CoResult<bool> {
        self.state.assert_owned("step");
        if self.state.is_done() {
            return Ok(false);
        }
        self.state.resume()
    }

    /// Step until the routine completes.
    pub fn run_to_end(&mut self) -> CoResult<()> {
        while self.step()? {}
        Ok(())
    }

    /// Borrow the final value.
    ///
    /// # Panics
    ///
    /// Panics if the routine has not completed, if it completed with a
    /// fault, or if the value was already taken.
    pub fn get(&self) -> &T {
        self.assert_finished("get");
        match self.state.pending() {
            Some(value) => value,
            None => panic!("routine has no final value (faulted, or the value was taken)"),
        }
    }

    /// Copy of the final value. Repeatable.
    ///
    /// # Panics
    ///
    /// Same conditions as [`get`](Routine::get).
    pub fn result(&self) -> T
    where
        T: Clone,
    {
        self.get().clone()
    }

    /// Move the final value out of the routine.
    ///
    /// # Panics
    ///
    /// Same conditions as [`get`](Routine::get); a second call panics.
    pub fn take_result(&mut self) -> T {
        self.assert_finished("take_result");
        match self.state.take_pending() {
            Some(value) => value,
            None => panic!("routine has no final value (faulted, or the value was taken)"),
        }
    }

    #[inline]
    pub fn is_done(&self) -> bool {
        self.state.is_done()
    }

    /// Whether the routine holds no body (moved-from or default).
    #[inline]
    pub fn is_inert(&self) -> bool {
        self.state.is_inert()
    }

    #[inline]
    pub fn state(&self) -> UnitState {
        self.state.state()
    }

    /// Always [`UnitKind::Routine`], including for an inert routine.
    #[inline]
    pub fn kind(&self) -> UnitKind {
        self.state.kind()
    }

    /// Number of resumptions performed so far.
    #[inline]
    pub fn resumptions(&self) -> u64 {
        self.state.resumptions()
    }

    fn assert_finished(
        &self,
        op: &str,
    ) {
        self.state.assert_owned(op);
        assert!(
            self.state.is_done(),
            "{op}() called before the routine completed"
        );
        assert!(
            !self.state.has_fault(),
            "{op}() called while a fault is pending"
        );
    }
}

impl<T> Default for Routine<'_, T> {
    /// An inert routine.
    fn default() -> Self {
        Self {
            state: Completion::inert(UnitKind::Routine),
        }
    }
}

impl<T> Deref for Routine<'_, T> {
    type Target = T;

    /// Shorthand for [`get`](Routine::get), with the same panics.
    fn deref(&self) -> &T {
        self.get()
    }
}

impl<T> fmt::Debug for Routine<'_, T> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.debug_struct("Routine").field("state", &self.state).finish()
    }
}
