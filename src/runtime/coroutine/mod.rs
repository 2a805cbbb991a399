//! Resumable units
//!
//! A typed layer over Rust's native suspend/resume machinery (`async`
//! blocks), driven synchronously by the unit's owner. There is no executor:
//! a unit only runs inside one of its owner's advance calls, and between
//! calls it sits frozen at its last suspension point.
//!
//! # Architecture
//!
//! - `state::Completion` - per-unit state: the suspended body,
//!   the latest produced value and any captured fault
//! - [`Routine`] - runs to a single final value across any number of
//!   suspensions
//! - [`Generator`] - produces a value per resumption, pulled on demand
//! - [`Cursor`], [`Iter`], [`IntoIter`] - iteration views over a generator
//! - [`suspend()`] and [`Yielder`] - the suspension points a body awaits
//!
//! Faults raised by a body, either an `Err` return or a panic, are captured
//! during the resumption that hit them and re-raised from that same call.

pub mod error;
pub mod generator;
pub mod iter;
pub mod routine;
pub mod state;
pub mod suspend;

pub use error::{CoError, CoResult};
pub use generator::Generator;
pub use iter::{Cursor, End, IntoIter, Iter};
pub use routine::Routine;
pub use state::{UnitConfig, UnitKind, UnitState};
pub use suspend::{suspend, Suspend, Yield, Yielder};

#[cfg(test)]
mod tests;
