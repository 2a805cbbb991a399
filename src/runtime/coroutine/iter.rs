//! Iteration over generators.
//!
//! - [`Cursor`] is a begin/end style view: priming on construction, a
//!   repeatable [`current`](Cursor::current), explicit
//!   [`advance`](Cursor::advance), and comparison against [`End`].
//! - [`Iter`] and [`IntoIter`] plug generators into `for` loops.
//!
//! None of them own state beyond the generator they drive, so only one of
//! them should be driving a given generator at a time.

use std::iter::FusedIterator;

use super::error::CoResult;
use super::generator::Generator;

/// End sentinel for [`Cursor`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct End;

/// Begin/end style cursor over a generator.
///
/// ```rust
/// use coroutines::{End, Generator};
///
/// let mut g = Generator::new(|co| async move {
///     co.yield_("a").await;
///     co.yield_("b").await;
///     Ok(())
/// });
///
/// let mut seen = Vec::new();
/// let mut cursor = g.cursor().unwrap();
/// while cursor != End {
///     seen.push(*cursor.current().unwrap());
///     cursor.advance().unwrap();
/// }
/// assert_eq!(seen, ["a", "b"]);
/// ```
#[derive(Debug)]
pub struct Cursor<'g, 'a, T> {
    /// `None` once the generator has completed.
    gen: Option<&'g mut Generator<'a, T>>,
}

impl<'g, 'a, T> Cursor<'g, 'a, T> {
    pub(crate) fn new(gen: &'g mut Generator<'a, T>) -> CoResult<Self> {
        gen.state.assert_owned("cursor");
        let mut cursor = Self { gen: Some(gen) };
        cursor.resume()?;
        Ok(cursor)
    }

    /// The current value, or `None` at the end. Does not advance.
    pub fn current(&self) -> Option<&T> {
        self.gen.as_ref().and_then(|gen| gen.state.pending())
    }

    /// Resume the generator once. Reaching completion moves the cursor to
    /// the end; a body fault is returned and also moves it to the end.
    ///
    /// # Panics
    ///
    /// Panics if the cursor is already at the end.
    pub fn advance(&mut self) -> CoResult<()> {
        assert!(!self.is_end(), "advance() called on an exhausted cursor");
        self.resume()
    }

    #[inline]
    pub fn is_end(&self) -> bool {
        self.gen.is_none()
    }

    fn resume(&mut self) -> CoResult<()> {
        let Some(gen) = self.gen.as_mut() else {
            return Ok(());
        };
        match gen.state.resume() {
            Ok(true) => Ok(()),
            Ok(false) => {
                self.gen = None;
                Ok(())
            }
            Err(err) => {
                self.gen = None;
                Err(err)
            }
        }
    }
}

impl<T> PartialEq<End> for Cursor<'_, '_, T> {
    fn eq(
        &self,
        _: &End,
    ) -> bool {
        self.is_end()
    }
}

impl<T> PartialEq<Cursor<'_, '_, T>> for End {
    fn eq(
        &self,
        other: &Cursor<'_, '_, T>,
    ) -> bool {
        other.is_end()
    }
}

/// Borrowing iterator returned by [`Generator::iter`].
///
/// Yields `Ok` for every value the generator produces and then stops; it
/// never reports [`CoError::Exhausted`](super::CoError::Exhausted). A body
/// fault comes out as one `Err`, after which the iterator is finished.
#[derive(Debug)]
pub struct Iter<'g, 'a, T> {
    gen: Option<&'g mut Generator<'a, T>>,
}

impl<'g, 'a, T> Iter<'g, 'a, T> {
    pub(crate) fn new(gen: &'g mut Generator<'a, T>) -> Self {
        gen.state.assert_owned("iter");
        Self { gen: Some(gen) }
    }
}

impl<T> Iterator for Iter<'_, '_, T> {
    type Item = CoResult<T>;

    fn next(&mut self) -> Option<Self::Item> {
        let gen = self.gen.as_mut()?;
        match gen.state.resume() {
            Ok(true) => gen.state.take_pending().map(Ok),
            Ok(false) => {
                self.gen = None;
                None
            }
            Err(err) => {
                self.gen = None;
                Some(Err(err))
            }
        }
    }
}

impl<T> FusedIterator for Iter<'_, '_, T> {}

/// Owning iterator, from `Generator::into_iter`.
#[derive(Debug)]
pub struct IntoIter<'a, T> {
    gen: Generator<'a, T>,
    finished: bool,
}

impl<'a, T> IntoIter<'a, T> {
    pub(crate) fn new(gen: Generator<'a, T>) -> Self {
        gen.state.assert_owned("into_iter");
        Self {
            gen,
            finished: false,
        }
    }

    /// Give the generator back, e.g. to inspect its state.
    pub fn into_inner(self) -> Generator<'a, T> {
        self.gen
    }
}

impl<T> Iterator for IntoIter<'_, T> {
    type Item = CoResult<T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        match self.gen.state.resume() {
            Ok(true) => self.gen.state.take_pending().map(Ok),
            Ok(false) => {
                self.finished = true;
                None
            }
            Err(err) => {
                self.finished = true;
                Some(Err(err))
            }
        }
    }
}

impl<T> FusedIterator for IntoIter<'_, T> {}
