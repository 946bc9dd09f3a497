//! Infrastructure layer - I/O and external dependencies
//!
//! This module wraps the crypt primitive and the console output.

pub mod crypt;
pub mod output;
