//! Lazy sequence generators.

use std::cell::Cell;
use std::fmt;
use std::future::Future;
use std::rc::Rc;

use super::error::{CoError, CoResult};
use super::iter::{Cursor, IntoIter, Iter};
use super::state::{Completion, UnitConfig, UnitKind, UnitState};
use super::suspend::Yielder;

/// A resumable computation that produces one value per resumption.
///
/// The body receives a [`Yielder`] and awaits
/// [`yield_`](Yielder::yield_) for every value it produces. It must not await
/// anything else that suspends; doing so panics on the pull that observes it.
///
/// Pulling past the last value is an error ([`CoError::Exhausted`]). Use the
/// iterator adapters when the length is not known up front.
///
/// # Example
///
/// ```rust
/// use coroutines::Generator;
///
/// let mut g = Generator::new(|co| async move {
///     for i in 0..3 {
///         co.yield_(i).await;
///     }
///     Ok(())
/// });
///
/// assert_eq!(g.next_value().unwrap(), 0);
/// assert_eq!(g.next_value().unwrap(), 1);
/// assert_eq!(g.next_value().unwrap(), 2);
/// assert!(g.next_value().unwrap_err().is_exhausted());
/// ```
pub struct Generator<'a, T> {
    pub(super) state: Completion<'a, T>,
}

impl<'a, T: 'a> Generator<'a, T> {
    /// Build a generator from a body. The closure is called right away to
    /// produce the body future, but the future is not polled.
    pub fn new<F, Fut>(body: F) -> Self
    where
        F: FnOnce(Yielder<T>) -> Fut,
        Fut: Future<Output = anyhow::Result<()>> + 'a,
    {
        let slot = Rc::new(Cell::new(None));
        let body = body(Yielder::new(Rc::clone(&slot)));
        let body = Box::pin(async move { body.await.map(|()| None::<T>) });
        Self {
            state: Completion::new(UnitKind::Generator, body, Some(slot)),
        }
    }
}

impl<'a, T> Generator<'a, T> {
    /// Replace the unit's settings.
    pub fn with_config(
        mut self,
        config: UnitConfig,
    ) -> Self {
        self.state.set_config(config);
        self
    }

    /// Name the generator in log events.
    pub fn named(
        self,
        name: impl Into<String>,
    ) -> Self {
        self.with_config(UnitConfig::named(name))
    }

    #[inline]
    pub fn config(&self) -> &UnitConfig {
        self.state.config()
    }

    /// Resume once and return a copy of the value produced.
    ///
    /// Fails with [`CoError::Exhausted`] if the generator had already
    /// completed, or if this resumption completed it without yielding. A body
    /// fault is returned (or re-panicked) from the call that triggered it;
    /// later calls see `Exhausted`.
    ///
    /// # Panics
    ///
    /// Panics if the generator is inert.
    pub fn next_value(&mut self) -> CoResult<T>
    where
        T: Clone,
    {
        self.pull_once("next_value")?;
        match self.state.pending() {
            Some(value) => Ok(value.clone()),
            None => unreachable!("suspended generator without a pending value"),
        }
    }

    /// Like [`next_value`](Generator::next_value), but moves the value out.
    pub fn take_next(&mut self) -> CoResult<T> {
        self.pull_once("take_next")?;
        match self.state.take_pending() {
            Some(value) => Ok(value),
            None => unreachable!("suspended generator without a pending value"),
        }
    }

    /// Shorthand for [`next_value`](Generator::next_value).
    #[inline]
    pub fn pull(&mut self) -> CoResult<T>
    where
        T: Clone,
    {
        self.next_value()
    }

    /// Begin/end style view. Resumes once to prime the first value unless the
    /// generator has already completed.
    pub fn cursor(&mut self) -> CoResult<Cursor<'_, 'a, T>> {
        Cursor::new(self)
    }

    /// Borrowing iterator over the remaining values.
    pub fn iter(&mut self) -> Iter<'_, 'a, T> {
        Iter::new(self)
    }

    #[inline]
    pub fn is_done(&self) -> bool {
        self.state.is_done()
    }

    /// Whether the generator holds no body (moved-from or default).
    #[inline]
    pub fn is_inert(&self) -> bool {
        self.state.is_inert()
    }

    #[inline]
    pub fn state(&self) -> UnitState {
        self.state.state()
    }

    /// Always [`UnitKind::Generator`], including for an inert generator.
    #[inline]
    pub fn kind(&self) -> UnitKind {
        self.state.kind()
    }

    /// Number of resumptions performed so far.
    #[inline]
    pub fn resumptions(&self) -> u64 {
        self.state.resumptions()
    }

    fn pull_once(
        &mut self,
        op: &str,
    ) -> CoResult<()> {
        self.state.assert_owned(op);
        if self.state.is_done() {
            return Err(CoError::Exhausted);
        }
        if self.state.resume()? {
            Ok(())
        } else {
            Err(CoError::Exhausted)
        }
    }
}

impl<T> Default for Generator<'_, T> {
    /// An inert generator.
    fn default() -> Self {
        Self {
            state: Completion::inert(UnitKind::Generator),
        }
    }
}

impl<'g, 'a, T> IntoIterator for &'g mut Generator<'a, T> {
    type Item = CoResult<T>;
    type IntoIter = Iter<'g, 'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        Iter::new(self)
    }
}

impl<'a, T> IntoIterator for Generator<'a, T> {
    type Item = CoResult<T>;
    type IntoIter = IntoIter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self)
    }
}

impl<T> fmt::Debug for Generator<'_, T> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.debug_struct("Generator")
            .field("state", &self.state)
            .finish()
    }
}
