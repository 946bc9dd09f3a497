//! Search workflow implementation
//!
//! This module runs the generate -> salt -> hash -> extract -> match loop on
//! one rayon thread per worker. Workers share nothing mutable except the
//! rate tracker (atomics) and the output sink (one lock per printed line).

use crate::app::throughput::RateTracker;
use crate::domain::password::Password;
use crate::domain::query::Query;
use crate::domain::rng::{Lcg, seed_streams};
use crate::domain::tripcode::{SearchResult, Tripcode};
use crate::infra::crypt::{HashError, HashPrimitive};
use crate::infra::output::OutputSink;
use log::{debug, error, info};
use rayon::prelude::*;
use std::io::{self, Write};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};
use thiserror::Error;

/// Errors that stop a running search
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("worker {worker}: {source}")]
    Hash {
        worker: usize,
        #[source]
        source: HashError,
    },
    #[error("failed to write result: {0}")]
    Output(#[from] io::Error),
    #[error("failed to start worker pool: {0}")]
    ThreadPool(String),
}

/// Search parameters
#[derive(Clone, Debug)]
pub struct SearchConfig {
    pub query: Query,
    /// Number of concurrent workers (at least 1)
    pub workers: usize,
    /// Root seed for [`seed_streams`]
    pub root_seed: u32,
    /// Iterations per worker (None = until cancelled)
    pub attempt_limit: Option<u64>,
}

impl SearchConfig {
    /// One worker per logical core, seeded from the wall clock
    pub fn new(query: Query) -> Self {
        Self {
            query,
            workers: default_worker_count(),
            root_seed: clock_seed(),
            attempt_limit: None,
        }
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    pub fn with_root_seed(mut self, root_seed: u32) -> Self {
        self.root_seed = root_seed;
        self
    }

    pub fn with_attempt_limit(mut self, limit: u64) -> Self {
        self.attempt_limit = Some(limit);
        self
    }
}

/// Logical core count, falling back to 1
pub fn default_worker_count() -> usize {
    num_cpus::get().max(1)
}

/// Wall-clock seconds truncated to 32 bits
pub fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as u32)
        .unwrap_or(0)
}

/// Cooperative stop flag, checked once per iteration
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Per-worker counters returned when a worker stops
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WorkerStats {
    pub attempts: u64,
    pub matches: u64,
}

/// Totals over all workers
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchSummary {
    pub workers: usize,
    pub attempts: u64,
    pub matches: u64,
    pub elapsed: Duration,
}

/// One search pipeline with its private RNG stream
pub struct Worker<'a, H: HashPrimitive> {
    id: usize,
    rng: Lcg,
    query: &'a Query,
    hasher: &'a H,
    tracker: &'a RateTracker,
}

impl<'a, H: HashPrimitive> Worker<'a, H> {
    pub fn new(
        id: usize,
        seed: u32,
        query: &'a Query,
        hasher: &'a H,
        tracker: &'a RateTracker,
    ) -> Self {
        Self {
            id,
            rng: Lcg::new(seed),
            query,
            hasher,
            tracker,
        }
    }

    /// Run a single iteration; `Some` on a match
    #[inline]
    pub fn step(&mut self) -> Result<Option<SearchResult>, SearchError> {
        let password = Password::generate(&mut self.rng);
        let salt = password.salt();
        let raw = self
            .hasher
            .hash(&password, &salt)
            .map_err(|source| SearchError::Hash {
                worker: self.id,
                source,
            })?;
        let tripcode = Tripcode::extract(&raw);

        self.tracker.record_attempt();

        if !self.query.matches(&tripcode) {
            return Ok(None);
        }

        Ok(Some(SearchResult {
            tripcode,
            password,
            rate: self.tracker.condensed_rate(),
        }))
    }

    /// Loop until cancelled or `limit` iterations have run
    pub fn run<W: Write + Send>(
        &mut self,
        sink: &OutputSink<W>,
        cancel: &CancelToken,
        limit: Option<u64>,
    ) -> Result<WorkerStats, SearchError> {
        let mut stats = WorkerStats::default();

        while !cancel.is_cancelled() && limit.is_none_or(|limit| stats.attempts < limit) {
            let found = self.step()?;
            stats.attempts += 1;

            if let Some(result) = found {
                sink.report(&result)?;
                stats.matches += 1;
            }
        }

        Ok(stats)
    }
}

/// Run `config.workers` workers until cancelled (or the attempt limit is hit)
///
/// A failing worker cancels the others; its error is returned.
pub fn run_search<H, W>(
    config: &SearchConfig,
    hasher: &H,
    sink: &OutputSink<W>,
    tracker: &RateTracker,
    cancel: &CancelToken,
) -> Result<SearchSummary, SearchError>
where
    H: HashPrimitive,
    W: Write + Send,
{
    let workers = config.workers.max(1);
    let seeds = seed_streams(config.root_seed, workers);
    info!(
        "starting {} worker(s), root seed {:#010x}",
        workers, config.root_seed
    );

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .thread_name(|i| format!("trip-worker-{}", i))
        .build()
        .map_err(|e| SearchError::ThreadPool(e.to_string()))?;

    let start = Instant::now();

    // with_max_len(1): every worker is its own rayon job
    let outcomes: Vec<Result<WorkerStats, SearchError>> = pool.install(|| {
        seeds
            .par_iter()
            .with_max_len(1)
            .enumerate()
            .map(|(id, &seed)| {
                debug!("worker {} seeded with {:#06x}", id, seed);
                let mut worker = Worker::new(id, seed, &config.query, hasher, tracker);
                let outcome = worker.run(sink, cancel, config.attempt_limit);
                match &outcome {
                    Ok(stats) => debug!("worker {} stopped after {} attempts", id, stats.attempts),
                    Err(e) => {
                        error!("{}", e);
                        cancel.cancel();
                    }
                }
                outcome
            })
            .collect()
    });

    let mut summary = SearchSummary {
        workers,
        attempts: 0,
        matches: 0,
        elapsed: start.elapsed(),
    };
    for outcome in outcomes {
        let stats = outcome?;
        summary.attempts += stats.attempts;
        summary.matches += stats.matches;
    }

    info!(
        "search stopped: {} attempts, {} matches in {:.2}s",
        summary.attempts,
        summary.matches,
        summary.elapsed.as_secs_f64()
    );
    Ok(summary)
}
