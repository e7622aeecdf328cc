//! # parhuff
//!
//! Counts symbol frequencies with a fixed number of parallel workers, then
//! builds a deterministic Huffman tree from the counts and derives a prefix
//! code for every symbol.
//!
//! ```rust
//! use parhuff::application::services::{AggregationStrategy, FrequencyAggregator, HuffmanService};
//!
//! let aggregator = FrequencyAggregator::new(4, AggregationStrategy::Merge)?;
//! let report = HuffmanService::new(aggregator).analyze(b"ABRACADABRA")?;
//! for record in &report.records {
//!     println!("{}", record);
//! }
//! # Ok::<(), parhuff::application::ApplicationError>(())
//! ```
//!
//! Layers, innermost first: `domain` (tables, partitions, trees), `application`
//! (parallel aggregation and the code table service), `infrastructure` (file and
//! stdin input), `cli`.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
