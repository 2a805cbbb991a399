//! Errors surfaced by resumable units.

use std::any::Any;

/// Error returned by the advance/pull operations of a unit.
#[derive(Debug, thiserror::Error)]
pub enum CoError {
    /// The unit body returned an error. The inner error is passed through
    /// untouched so callers can downcast it.
    #[error(transparent)]
    Fault(anyhow::Error),

    /// A generator was pulled after it had already run to completion.
    #[error("generator exhausted")]
    Exhausted,
}

impl CoError {
    /// Whether this is [`CoError::Exhausted`].
    #[inline]
    pub fn is_exhausted(&self) -> bool {
        matches!(self, CoError::Exhausted)
    }

    /// Whether this is a body fault.
    #[inline]
    pub fn is_fault(&self) -> bool {
        matches!(self, CoError::Fault(_))
    }

    /// Borrow the body error, if this is a fault.
    pub fn as_fault(&self) -> Option<&anyhow::Error> {
        match self {
            CoError::Fault(err) => Some(err),
            CoError::Exhausted => None,
        }
    }

    /// Unwrap into the body error, if this is a fault.
    pub fn into_fault(self) -> Option<anyhow::Error> {
        match self {
            CoError::Fault(err) => Some(err),
            CoError::Exhausted => None,
        }
    }
}

/// Result alias for unit operations.
pub type CoResult<T> = std::result::Result<T, CoError>;

/// A failure captured during a resumption, held until the owner observes it.
pub(crate) enum Fault {
    /// The body returned `Err`.
    Error(anyhow::Error),
    /// The body panicked; the payload is re-raised with `resume_unwind`.
    Panic(Box<dyn Any + Send + 'static>),
}

impl Fault {
    /// Re-raise in the caller's context.
    ///
    /// Errors come back as `Err`, panics resume unwinding from here.
    pub(crate) fn raise(self) -> CoError {
        match self {
            Fault::Error(err) => CoError::Fault(err),
            Fault::Panic(payload) => std::panic::resume_unwind(payload),
        }
    }

    pub(crate) fn kind(&self) -> &'static str {
        match self {
            Fault::Error(_) => "error",
            Fault::Panic(_) => "panic",
        }
    }
}

impl std::fmt::Debug for Fault {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        match self {
            Fault::Error(err) => f.debug_tuple("Error").field(err).finish(),
            Fault::Panic(payload) => f
                .debug_tuple("Panic")
                .field(&panic_message(&**payload))
                .finish(),
        }
    }
}

/// Best-effort text of a panic payload.
pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&'static str>() {
        *s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.as_str()
    } else {
        "<non-string panic payload>"
    }
}
