//! Frequency aggregation service
//!
//! Splits the text into one partition per worker and counts symbols on a
//! dedicated rayon pool of exactly that many threads. The call returns only
//! after every worker has been joined.

use std::fmt;
use std::num::NonZeroUsize;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use rayon::prelude::*;
use rayon::ThreadPoolBuilder;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::{partitions, FrequencyTable, Partition, Symbol, ALPHABET_SIZE};

/// How workers combine their counts.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum AggregationStrategy {
    /// Private table per worker, summed after the join
    #[default]
    Merge,
    /// Shared table of per-symbol atomic counters
    Atomic,
    /// Shared table behind one mutex, locked per increment
    Mutex,
}

impl fmt::Display for AggregationStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AggregationStrategy::Merge => "merge",
            AggregationStrategy::Atomic => "atomic",
            AggregationStrategy::Mutex => "mutex",
        };
        f.write_str(name)
    }
}

/// Parse a user-supplied worker count. Zero, negative and non-numeric
/// values are rejected.
pub fn parse_worker_count(raw: &str) -> ApplicationResult<NonZeroUsize> {
    let trimmed = raw.trim();
    trimmed
        .parse::<usize>()
        .ok()
        .and_then(NonZeroUsize::new)
        .ok_or_else(|| ApplicationError::InvalidWorkerCount(trimmed.to_string()))
}

/// What one worker did.
#[derive(Debug, Clone)]
pub struct WorkerStat {
    pub partition: Partition,
    /// Name of the pool thread that ran the worker
    pub thread: String,
    pub elapsed: Duration,
}

impl WorkerStat {
    pub fn worker(&self) -> usize {
        self.partition.worker
    }
}

/// Result of a completed aggregation.
#[derive(Debug, Clone)]
pub struct Aggregation {
    pub table: FrequencyTable,
    /// One entry per worker, in worker order
    pub workers: Vec<WorkerStat>,
}

struct AtomicFrequencyTable {
    counts: [AtomicU64; ALPHABET_SIZE],
}

impl AtomicFrequencyTable {
    fn new() -> Self {
        Self {
            counts: std::array::from_fn(|_| AtomicU64::new(0)),
        }
    }

    fn increment(&self, symbol: Symbol) {
        self.counts[symbol as usize].fetch_add(1, Ordering::Relaxed);
    }

    fn snapshot(&self) -> FrequencyTable {
        FrequencyTable::from(std::array::from_fn(|i| {
            self.counts[i].load(Ordering::Acquire)
        }))
    }
}

/// Counts symbol frequencies with a fixed number of parallel workers.
#[derive(Debug, Clone, Copy)]
pub struct FrequencyAggregator {
    workers: NonZeroUsize,
    strategy: AggregationStrategy,
}

impl FrequencyAggregator {
    /// Create an aggregator; a worker count of zero is rejected here, before
    /// any thread is started.
    pub fn new(workers: usize, strategy: AggregationStrategy) -> ApplicationResult<Self> {
        let workers = NonZeroUsize::new(workers)
            .ok_or_else(|| ApplicationError::InvalidWorkerCount(workers.to_string()))?;
        Ok(Self::with_workers(workers, strategy))
    }

    pub fn with_workers(workers: NonZeroUsize, strategy: AggregationStrategy) -> Self {
        Self { workers, strategy }
    }

    pub fn workers(&self) -> NonZeroUsize {
        self.workers
    }

    pub fn strategy(&self) -> AggregationStrategy {
        self.strategy
    }

    /// Count every symbol of `text`.
    ///
    /// Blocks until all workers finish. The first worker failure, in worker
    /// order, is returned after the join.
    #[instrument(level = "debug", skip(self, text), fields(len = text.len(), workers = self.workers.get(), strategy = %self.strategy))]
    pub fn aggregate(&self, text: &[u8]) -> ApplicationResult<Aggregation> {
        let parts = partitions(text.len(), self.workers);
        let pool = ThreadPoolBuilder::new()
            .num_threads(self.workers.get())
            .thread_name(|i| format!("worker-{}", i + 1))
            .build()
            .map_err(|e| ApplicationError::ThreadPool(e.to_string()))?;

        let aggregation = match self.strategy {
            AggregationStrategy::Merge => {
                let results: Vec<ApplicationResult<(FrequencyTable, WorkerStat)>> =
                    pool.install(|| {
                        parts
                            .par_iter()
                            .with_max_len(1)
                            .map(|part| {
                                run_worker(part, || {
                                    Ok(FrequencyTable::from_text(worker_slice(part, text)?))
                                })
                            })
                            .collect()
                    });

                // single-threaded reduction after the join
                let mut table = FrequencyTable::new();
                let mut workers = Vec::with_capacity(results.len());
                for result in results {
                    let (partial, stat) = result?;
                    table.merge(&partial);
                    workers.push(stat);
                }
                Aggregation { table, workers }
            }
            AggregationStrategy::Atomic => {
                let shared = AtomicFrequencyTable::new();
                let results: Vec<ApplicationResult<((), WorkerStat)>> = pool.install(|| {
                    parts
                        .par_iter()
                        .with_max_len(1)
                        .map(|part| {
                            run_worker(part, || {
                                for &symbol in worker_slice(part, text)? {
                                    shared.increment(symbol);
                                }
                                Ok(())
                            })
                        })
                        .collect()
                });
                let workers = collect_stats(results)?;
                Aggregation {
                    table: shared.snapshot(),
                    workers,
                }
            }
            AggregationStrategy::Mutex => {
                let shared = Mutex::new(FrequencyTable::new());
                let results: Vec<ApplicationResult<((), WorkerStat)>> = pool.install(|| {
                    parts
                        .par_iter()
                        .with_max_len(1)
                        .map(|part| {
                            run_worker(part, || {
                                for &symbol in worker_slice(part, text)? {
                                    shared
                                        .lock()
                                        .map_err(|_| ApplicationError::LockPoisoned)?
                                        .increment(symbol);
                                }
                                Ok(())
                            })
                        })
                        .collect()
                });
                let workers = collect_stats(results)?;
                let table = shared
                    .into_inner()
                    .map_err(|_| ApplicationError::LockPoisoned)?;
                Aggregation { table, workers }
            }
        };

        debug!(
            "aggregate: {} symbols, {} distinct",
            aggregation.table.total(),
            aggregation.table.distinct()
        );
        Ok(aggregation)
    }
}

fn worker_slice<'a>(part: &Partition, text: &'a [u8]) -> ApplicationResult<&'a [u8]> {
    part.slice(text)
        .map_err(|source| ApplicationError::WorkerFailed {
            worker: part.worker,
            source,
        })
}

fn run_worker<T, F>(part: &Partition, count: F) -> ApplicationResult<(T, WorkerStat)>
where
    F: FnOnce() -> ApplicationResult<T>,
{
    let thread = std::thread::current()
        .name()
        .unwrap_or("unnamed")
        .to_string();
    info!(
        "{} start: partition {} [{}, {})",
        thread, part.worker, part.start, part.end
    );

    let started = Instant::now();
    let outcome = panic::catch_unwind(AssertUnwindSafe(count))
        .map_err(|_| ApplicationError::WorkerPanicked(part.worker))??;
    let elapsed = started.elapsed();

    info!("{} end: counted {} symbols", thread, part.len());
    Ok((
        outcome,
        WorkerStat {
            partition: *part,
            thread,
            elapsed,
        },
    ))
}

fn collect_stats(results: Vec<ApplicationResult<((), WorkerStat)>>) -> ApplicationResult<Vec<WorkerStat>> {
    let mut workers = Vec::with_capacity(results.len());
    for result in results {
        let ((), stat) = result?;
        workers.push(stat);
    }
    Ok(workers)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEXT: &[u8] = b"the quick brown fox jumps over the lazy dog, ABRACADABRA\n";

    #[test]
    fn test_every_strategy_matches_sequential_count() {
        let expected = FrequencyTable::from_text(TEXT);
        for strategy in [
            AggregationStrategy::Merge,
            AggregationStrategy::Atomic,
            AggregationStrategy::Mutex,
        ] {
            for workers in [1, 2, 3, 7, TEXT.len(), TEXT.len() + 5] {
                let aggregator = FrequencyAggregator::new(workers, strategy).unwrap();
                let result = aggregator.aggregate(TEXT).unwrap();
                assert_eq!(result.table, expected, "{} with {} workers", strategy, workers);
                assert_eq!(result.workers.len(), workers);
            }
        }
    }

    #[test]
    fn test_zero_workers_rejected_before_start() {
        let err = FrequencyAggregator::new(0, AggregationStrategy::Merge).unwrap_err();
        assert!(matches!(err, ApplicationError::InvalidWorkerCount(ref s) if s == "0"));
    }

    #[test]
    fn test_empty_text_gives_empty_table() {
        let aggregator = FrequencyAggregator::new(4, AggregationStrategy::Atomic).unwrap();
        let result = aggregator.aggregate(b"").unwrap();
        assert!(result.table.is_empty());
        assert!(result.workers.iter().all(|w| w.partition.is_empty()));
    }

    #[test]
    fn test_workers_run_on_named_pool_threads() {
        let aggregator = FrequencyAggregator::new(3, AggregationStrategy::Merge).unwrap();
        let result = aggregator.aggregate(TEXT).unwrap();
        let ids: Vec<usize> = result.workers.iter().map(WorkerStat::worker).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert!(result.workers.iter().all(|w| w.thread.starts_with("worker-")));
    }

    #[test]
    fn test_out_of_range_partition_surfaces_as_worker_failure() {
        let bad = Partition {
            worker: 2,
            start: 3,
            end: 99,
        };
        let err = run_worker(&bad, || worker_slice(&bad, b"abcd").map(|_| ())).unwrap_err();
        assert!(matches!(err, ApplicationError::WorkerFailed { worker: 2, .. }));
    }

    #[test]
    fn test_worker_panic_is_reported() {
        let part = Partition {
            worker: 5,
            start: 0,
            end: 0,
        };
        let err = run_worker::<(), _>(&part, || panic!("boom")).unwrap_err();
        assert!(matches!(err, ApplicationError::WorkerPanicked(5)));
    }

    #[test]
    fn test_parse_worker_count() {
        assert_eq!(parse_worker_count(" 4\n").unwrap().get(), 4);
        for bad in ["0", "-2", "four", ""] {
            assert!(
                matches!(parse_worker_count(bad), Err(ApplicationError::InvalidWorkerCount(_))),
                "{:?} should be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_strategy_display_matches_serde_name() {
        assert_eq!(AggregationStrategy::Atomic.to_string(), "atomic");
        assert_eq!(AggregationStrategy::default(), AggregationStrategy::Merge);
    }
}
