//! Application services
//!
//! Concrete service implementations that orchestrate domain logic.

mod aggregator;
mod huffman;

pub use aggregator::{
    parse_worker_count, Aggregation, AggregationStrategy, FrequencyAggregator, WorkerStat,
};
pub use huffman::{CodeReport, HuffmanService};
