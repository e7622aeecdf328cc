//! Code table service
//!
//! Runs the aggregator to completion, then builds the Huffman tree from the
//! finished table and reads the code table off it.

use tracing::{debug, instrument};

use crate::application::services::aggregator::{Aggregation, FrequencyAggregator};
use crate::application::ApplicationResult;
use crate::domain::{CodeRecord, DomainError, FrequencyTable, HuffmanTree};

/// Everything computed for one input text.
#[derive(Debug, Clone)]
pub struct CodeReport {
    pub aggregation: Aggregation,
    /// `None` when the text was empty
    pub tree: Option<HuffmanTree>,
    /// Traversal-ordered code table; empty when `tree` is `None`
    pub records: Vec<CodeRecord>,
}

impl CodeReport {
    pub fn table(&self) -> &FrequencyTable {
        &self.aggregation.table
    }

    pub fn is_empty(&self) -> bool {
        self.tree.is_none()
    }

    /// Total encoded length in bits.
    pub fn weighted_path_length(&self) -> u64 {
        self.tree
            .as_ref()
            .map(HuffmanTree::weighted_path_length)
            .unwrap_or(0)
    }
}

pub struct HuffmanService {
    aggregator: FrequencyAggregator,
}

impl HuffmanService {
    pub fn new(aggregator: FrequencyAggregator) -> Self {
        Self { aggregator }
    }

    pub fn aggregator(&self) -> &FrequencyAggregator {
        &self.aggregator
    }

    /// Parallel frequency count only.
    pub fn frequencies(&self, text: &[u8]) -> ApplicationResult<Aggregation> {
        self.aggregator.aggregate(text)
    }

    /// Build a tree from a finished table. An all-zero table yields `None`.
    pub fn build(&self, table: &FrequencyTable) -> ApplicationResult<Option<HuffmanTree>> {
        match HuffmanTree::build(table) {
            Ok(tree) => Ok(Some(tree)),
            Err(DomainError::EmptyFrequencyTable) => {
                debug!("build: no data, skipping tree");
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Count, build and traverse.
    #[instrument(level = "debug", skip(self, text), fields(len = text.len()))]
    pub fn analyze(&self, text: &[u8]) -> ApplicationResult<CodeReport> {
        let aggregation = self.aggregator.aggregate(text)?;
        let tree = self.build(&aggregation.table)?;
        let records = tree
            .as_ref()
            .map(HuffmanTree::code_records)
            .unwrap_or_default();
        debug!("analyze: {} code records", records.len());

        Ok(CodeReport {
            aggregation,
            tree,
            records,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::aggregator::AggregationStrategy;

    fn service(workers: usize) -> HuffmanService {
        HuffmanService::new(FrequencyAggregator::new(workers, AggregationStrategy::Merge).unwrap())
    }

    #[test]
    fn test_analyze_empty_text_is_not_an_error() {
        let report = service(3).analyze(b"").unwrap();
        assert!(report.is_empty());
        assert!(report.records.is_empty());
        assert!(report.table().is_empty());
        assert_eq!(report.weighted_path_length(), 0);
    }

    #[test]
    fn test_analyze_covers_every_symbol_once() {
        let report = service(4).analyze(b"mississippi").unwrap();
        let mut symbols: Vec<u8> = report.records.iter().map(|r| r.symbol).collect();
        symbols.sort_unstable();
        assert_eq!(symbols, vec![b'i', b'm', b'p', b's']);
        assert_eq!(report.weighted_path_length(), 21);
    }
}
