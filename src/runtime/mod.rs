//! Runtime system
//!
//! This module contains the resumable unit machinery.

pub mod coroutine;
