//! Completion state machine.
//!
//! One [`Completion`] lives inside every unit. It owns the suspended body
//! (the frame), the most recently produced value, and any fault captured
//! during the last resumption.
//!
//! ```text
//! Suspended --resume--> Suspended        (hit a suspension point)
//! Suspended --resume--> Completed        (returned, or faulted)
//! Completed --resume--> Completed        (no-op)
//! ```
//!
//! `NotStarted` is not tracked separately: a fresh frame has simply never
//! been polled, which callers cannot tell apart from `Suspended`.

use std::fmt;
use std::future::Future;
use std::panic::{self, AssertUnwindSafe};
use std::pin::Pin;
use std::task::{Context, Poll};

use futures_util::task::noop_waker_ref;
use tracing::debug;

use super::error::{panic_message, CoResult, Fault};
use super::suspend::YieldSlot;

/// Boxed unit body. Generator bodies finish with `None`, routines with
/// `Some(value)`.
pub(crate) type Body<'a, T> = Pin<Box<dyn Future<Output = anyhow::Result<Option<T>>> + 'a>>;

/// Which capability set a unit was built with. Fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitKind {
    /// Runs to one final value (possibly `()`).
    Routine,
    /// Produces a value per resumption.
    Generator,
}

impl fmt::Display for UnitKind {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            UnitKind::Routine => write!(f, "routine"),
            UnitKind::Generator => write!(f, "generator"),
        }
    }
}

/// Observable state of a unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitState {
    /// Holds a body that can be resumed (including one never resumed yet).
    Suspended,
    /// The body returned or faulted.
    Completed,
    /// Moved-from or default-constructed; holds no body.
    Inert,
}

/// Per-unit settings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UnitConfig {
    /// Name attached to log events.
    pub name: Option<String>,
    /// Log every resumption at `debug` instead of `trace`.
    pub trace: bool,
}

impl UnitConfig {
    /// Config with just a name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            trace: false,
        }
    }
}

macro_rules! step_event {
    ($loud:expr, $($arg:tt)+) => {
        if $loud {
            tracing::debug!($($arg)+)
        } else {
            tracing::trace!($($arg)+)
        }
    };
}

enum Frame<'a, T> {
    Inert,
    Live(Body<'a, T>),
    Completed,
}

/// Completion state of one resumable unit.
pub(crate) struct Completion<'a, T> {
    kind: UnitKind,
    frame: Frame<'a, T>,
    pending: Option<T>,
    fault: Option<Fault>,
    /// Present for generators only.
    slot: Option<YieldSlot<T>>,
    config: UnitConfig,
    resumptions: u64,
}

impl<'a, T> Completion<'a, T> {
    pub(crate) fn new(
        kind: UnitKind,
        body: Body<'a, T>,
        slot: Option<YieldSlot<T>>,
    ) -> Self {
        Self {
            kind,
            frame: Frame::Live(body),
            pending: None,
            fault: None,
            slot,
            config: UnitConfig::default(),
            resumptions: 0,
        }
    }

    pub(crate) fn inert(kind: UnitKind) -> Self {
        Self {
            kind,
            frame: Frame::Inert,
            pending: None,
            fault: None,
            slot: None,
            config: UnitConfig::default(),
            resumptions: 0,
        }
    }

    #[inline]
    pub(crate) fn kind(&self) -> UnitKind {
        self.kind
    }

    pub(crate) fn state(&self) -> UnitState {
        match self.frame {
            Frame::Inert => UnitState::Inert,
            Frame::Live(_) => UnitState::Suspended,
            Frame::Completed => UnitState::Completed,
        }
    }

    #[inline]
    pub(crate) fn is_done(&self) -> bool {
        matches!(self.frame, Frame::Completed)
    }

    #[inline]
    pub(crate) fn is_inert(&self) -> bool {
        matches!(self.frame, Frame::Inert)
    }

    #[inline]
    pub(crate) fn has_fault(&self) -> bool {
        self.fault.is_some()
    }

    #[inline]
    pub(crate) fn resumptions(&self) -> u64 {
        self.resumptions
    }

    pub(crate) fn config(&self) -> &UnitConfig {
        &self.config
    }

    pub(crate) fn set_config(
        &mut self,
        config: UnitConfig,
    ) {
        self.config = config;
    }

    /// Panic unless this unit holds (or held) a body.
    pub(crate) fn assert_owned(
        &self,
        op: &str,
    ) {
        assert!(!self.is_inert(), "{op}() called on an inert {}", self.kind);
    }

    #[inline]
    pub(crate) fn pending(&self) -> Option<&T> {
        self.pending.as_ref()
    }

    #[inline]
    pub(crate) fn take_pending(&mut self) -> Option<T> {
        self.pending.take()
    }

    /// Resume once and re-raise anything the body raised.
    ///
    /// Returns whether the unit is still suspended afterwards. A completed
    /// unit is left alone and reports `false`.
    pub(crate) fn resume(&mut self) -> CoResult<bool> {
        self.assert_owned("resume");
        self.poll_body();
        self.rethrow()?;
        Ok(!self.is_done())
    }

    /// Surface a captured fault exactly once.
    pub(crate) fn rethrow(&mut self) -> CoResult<()> {
        match self.fault.take() {
            Some(fault) => Err(fault.raise()),
            None => Ok(()),
        }
    }

    fn poll_body(&mut self) {
        let Frame::Live(body) = &mut self.frame else {
            return;
        };

        self.resumptions += 1;
        step_event!(
            self.config.trace,
            kind = %self.kind,
            name = ?self.config.name,
            resumption = self.resumptions,
            "resuming unit"
        );

        let mut cx = Context::from_waker(noop_waker_ref());
        let polled = panic::catch_unwind(AssertUnwindSafe(|| body.as_mut().poll(&mut cx)));

        match polled {
            Ok(Poll::Pending) => self.suspended(),
            Ok(Poll::Ready(Ok(value))) => {
                self.frame = Frame::Completed;
                if value.is_some() {
                    self.pending = value;
                }
                debug!(
                    kind = %self.kind,
                    name = ?self.config.name,
                    resumptions = self.resumptions,
                    "unit completed"
                );
            }
            Ok(Poll::Ready(Err(err))) => self.capture(Fault::Error(err)),
            Err(payload) => self.capture(Fault::Panic(payload)),
        }
    }

    fn suspended(&mut self) {
        if let Some(slot) = &self.slot {
            match slot.take() {
                Some(value) => self.pending = Some(value),
                None => {
                    // The body broke the yield-only rule; it must not run again.
                    self.frame = Frame::Completed;
                    self.pending = None;
                    debug!(
                        kind = %self.kind,
                        name = ?self.config.name,
                        resumptions = self.resumptions,
                        "generator suspended without yielding"
                    );
                    panic!(
                        "generator suspended without yielding a value; generator bodies may only await their own yield points"
                    );
                }
            }
        }
        step_event!(
            self.config.trace,
            kind = %self.kind,
            name = ?self.config.name,
            "unit suspended"
        );
    }

    fn capture(
        &mut self,
        fault: Fault,
    ) {
        // Tear the body down before anything else observes the unit.
        self.frame = Frame::Completed;
        self.pending = None;
        match &fault {
            Fault::Error(err) => debug!(
                kind = %self.kind,
                name = ?self.config.name,
                fault = fault.kind(),
                error = %err,
                "captured fault"
            ),
            Fault::Panic(payload) => debug!(
                kind = %self.kind,
                name = ?self.config.name,
                fault = fault.kind(),
                message = panic_message(&**payload),
                "captured fault"
            ),
        }
        self.fault = Some(fault);
    }
}

impl<T> Drop for Completion<'_, T> {
    fn drop(&mut self) {
        if matches!(self.frame, Frame::Live(_)) {
            step_event!(
                self.config.trace,
                kind = %self.kind,
                name = ?self.config.name,
                resumptions = self.resumptions,
                "abandoning suspended unit"
            );
        }
    }
}

impl<T> fmt::Debug for Completion<'_, T> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.debug_struct("Completion")
            .field("kind", &self.kind)
            .field("state", &self.state())
            .field("has_value", &self.pending.is_some())
            .field("fault", &self.fault)
            .field("config", &self.config)
            .field("resumptions", &self.resumptions)
            .finish()
    }
}
