//! tripsearch-engine - Brute-force tripcode search for futaba-type imageboards
//!
//! This crate provides functionality to:
//! - Generate random 8-character passwords from independent per-worker LCG streams
//! - Derive the crypt salt and compute the DES-based tripcode for each password
//! - Match tripcodes against a validated query and report hits with a live rate

pub mod app;
pub mod constants;
pub mod domain;
pub mod infra;

// Re-export commonly used types
pub use app::searcher::{
    CancelToken, SearchConfig, SearchError, SearchSummary, Worker, run_search,
};
pub use app::throughput::RateTracker;
pub use constants::*;
pub use domain::password::{Password, Salt};
pub use domain::query::{MatchMode, Query, QueryError};
pub use domain::rate::{CondensedRate, condense_rate};
pub use domain::rng::{Lcg, seed_streams};
pub use domain::tripcode::{RawHash, SearchResult, Tripcode};
pub use infra::crypt::{DesCrypt, HashError, HashPrimitive};
pub use infra::output::OutputSink;
