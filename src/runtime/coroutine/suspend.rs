//! Suspension points.
//!
//! A unit body is an `async` block. It gives control back to its owner by
//! awaiting one of the futures in this module, each of which reports
//! `Pending` exactly once. There is no waker involved: the owner polls again
//! on its next advance call.

use std::cell::Cell;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll};

/// Shared slot a generator body writes yielded values into.
pub(crate) type YieldSlot<T> = Rc<Cell<Option<T>>>;

/// Suspend the current routine until its owner advances it again.
///
/// ```rust
/// use coroutines::{suspend, Routine};
///
/// let mut r = Routine::new(async {
///     suspend().await;
///     Ok(7)
/// });
/// assert!(r.step().unwrap());
/// assert!(!r.step().unwrap());
/// assert_eq!(r.result(), 7);
/// ```
#[inline]
pub fn suspend() -> Suspend {
    Suspend { pending: true }
}

/// Future returned by [`suspend`].
#[derive(Debug, Clone, Copy)]
#[must_use = "suspension points do nothing unless awaited"]
pub struct Suspend {
    pending: bool,
}

impl Suspend {
    /// A suspension point that never suspends.
    #[inline]
    pub fn never() -> Self {
        Self { pending: false }
    }
}

impl Future for Suspend {
    type Output = ();

    fn poll(
        mut self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
    ) -> Poll<()> {
        if self.pending {
            self.pending = false;
            Poll::Pending
        } else {
            Poll::Ready(())
        }
    }
}

/// Handle given to a generator body for producing values.
pub struct Yielder<T> {
    slot: YieldSlot<T>,
}

impl<T> Yielder<T> {
    pub(crate) fn new(slot: YieldSlot<T>) -> Self {
        Self { slot }
    }

    /// Hand `value` to the owner and suspend until the next pull.
    pub fn yield_(
        &self,
        value: T,
    ) -> Yield<'_, T> {
        Yield {
            slot: &self.slot,
            value: Some(value),
        }
    }
}

impl<T> Clone for Yielder<T> {
    fn clone(&self) -> Self {
        Self {
            slot: Rc::clone(&self.slot),
        }
    }
}

impl<T> fmt::Debug for Yielder<T> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.debug_struct("Yielder").finish_non_exhaustive()
    }
}

/// Future returned by [`Yielder::yield_`].
#[must_use = "values are only yielded when awaited"]
pub struct Yield<'y, T> {
    slot: &'y Cell<Option<T>>,
    value: Option<T>,
}

// The value is moved out on first poll and never pinned in place.
impl<T> Unpin for Yield<'_, T> {}

impl<T> Future for Yield<'_, T> {
    type Output = ();

    fn poll(
        mut self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
    ) -> Poll<()> {
        match self.value.take() {
            Some(value) => {
                self.slot.set(Some(value));
                Poll::Pending
            }
            None => Poll::Ready(()),
        }
    }
}

impl<T> fmt::Debug for Yield<'_, T> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.debug_struct("Yield")
            .field("pending", &self.value.is_some())
            .finish()
    }
}
