//! Domain layer - Pure computational logic
//!
//! This module contains pure functions and algorithms without I/O dependencies.

pub mod password;
pub mod query;
pub mod rate;
pub mod rng;
pub mod tripcode;
