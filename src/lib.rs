//! Coroutines
//!
//! Resumable computations driven synchronously by their owner, in two
//! shapes built on one mechanism:
//!
//! - [`Routine`]: runs to a single final value, possibly after several
//!   suspensions
//! - [`Generator`]: produces a lazy sequence, one value per pull
//!
//! Bodies are ordinary `async` blocks. There is no executor and no
//! background progress; a unit only runs inside its owner's calls.
//!
//! # Example
//!
//! ```rust
//! use coroutines::{suspend, Generator, Routine};
//!
//! let mut r = Routine::new(async {
//!     suspend().await;
//!     Ok("done")
//! });
//! while r.step().unwrap() {}
//! assert_eq!(r.result(), "done");
//!
//! let evens = Generator::new(|co| async move {
//!     for i in 0..5 {
//!         co.yield_(i * 2).await;
//!     }
//!     Ok(())
//! });
//! let values: Vec<i32> = evens.into_iter().map(Result::unwrap).collect();
//! assert_eq!(values, [0, 2, 4, 6, 8]);
//! ```

#![doc(html_root_url = "https://docs.rs/coroutines")]
#![warn(rust_2018_idioms)]

// Public modules
pub mod autotest;
pub mod runtime;

// Utility modules
pub mod util;

// Re-exports
pub use anyhow::{Context, Result};
pub use runtime::coroutine::{
    suspend, CoError, CoResult, Cursor, End, Generator, IntoIter, Iter, Routine, Suspend,
    UnitConfig, UnitKind, UnitState, Yield, Yielder,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = "coroutines";
