//! Resumable unit tests
//!
//! Routines, generators, iteration views and the properties that tie them
//! together.

pub mod state;
