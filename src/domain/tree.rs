//! Huffman tree construction and code extraction.

use std::collections::BTreeMap;

use tracing::{debug, instrument, trace};

use crate::domain::entities::{CodeRecord, FrequencyTable, Symbol};
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::queue::NodeQueue;

/// Code assigned to the only symbol of a single-leaf tree.
pub const SINGLE_LEAF_CODE: &str = "0";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HuffNode {
    Leaf {
        symbol: Symbol,
        weight: u64,
    },
    Internal {
        weight: u64,
        left: Box<HuffNode>,
        right: Box<HuffNode>,
    },
}

impl HuffNode {
    pub fn leaf(symbol: Symbol, weight: u64) -> Self {
        HuffNode::Leaf { symbol, weight }
    }

    /// Join two subtrees; `left` is the one popped first.
    pub fn merge(left: Self, right: Self) -> Self {
        HuffNode::Internal {
            weight: left.weight() + right.weight(),
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn weight(&self) -> u64 {
        match self {
            HuffNode::Leaf { weight, .. } => *weight,
            HuffNode::Internal { weight, .. } => *weight,
        }
    }

    fn leaf_count(&self) -> usize {
        match self {
            HuffNode::Leaf { .. } => 1,
            HuffNode::Internal { left, right, .. } => left.leaf_count() + right.leaf_count(),
        }
    }

    fn depth(&self) -> usize {
        match self {
            HuffNode::Leaf { .. } => 0,
            HuffNode::Internal { left, right, .. } => 1 + left.depth().max(right.depth()),
        }
    }

    // Left = 0, Right = 1; leaves are emitted left to right
    fn collect_codes(&self, prefix: &mut String, records: &mut Vec<CodeRecord>) {
        match self {
            HuffNode::Leaf { symbol, weight } => {
                records.push(CodeRecord {
                    symbol: *symbol,
                    frequency: *weight,
                    code: prefix.clone(),
                });
            }
            HuffNode::Internal { left, right, .. } => {
                prefix.push('0');
                left.collect_codes(prefix, records);
                prefix.pop();

                prefix.push('1');
                right.collect_codes(prefix, records);
                prefix.pop();
            }
        }
    }
}

/// A complete prefix-code tree over the non-zero symbols of a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTree {
    root: HuffNode,
}

impl HuffmanTree {
    /// Build the tree by repeatedly merging the two lightest subtrees.
    ///
    /// Leaves are seeded in ascending symbol order; ties between equal
    /// weights resolve by insertion order in the node queue, so the same
    /// table always yields the same tree.
    ///
    /// # Errors
    /// `EmptyFrequencyTable` if no symbol has a non-zero count.
    #[instrument(level = "debug", skip_all, fields(distinct = table.distinct()))]
    pub fn build(table: &FrequencyTable) -> DomainResult<Self> {
        let mut queue = NodeQueue::new();
        for (symbol, count) in table.iter_nonzero() {
            queue.push(HuffNode::leaf(symbol, count));
        }
        debug!("build: seeded {} leaves", queue.len());

        loop {
            let first = queue.pop().ok_or(DomainError::EmptyFrequencyTable)?;
            match queue.pop() {
                None => return Ok(HuffmanTree { root: first }),
                Some(second) => {
                    trace!("merge: {} + {}", first.weight(), second.weight());
                    queue.push(HuffNode::merge(first, second));
                }
            }
        }
    }

    pub fn root(&self) -> &HuffNode {
        &self.root
    }

    pub fn weight(&self) -> u64 {
        self.root.weight()
    }

    pub fn leaf_count(&self) -> usize {
        self.root.leaf_count()
    }

    /// Longest root-to-leaf path; 0 for a single leaf.
    pub fn depth(&self) -> usize {
        self.root.depth()
    }

    /// One record per leaf in depth-first, left-to-right order.
    ///
    /// A lone leaf gets [`SINGLE_LEAF_CODE`] since it has no branch to
    /// derive a bit from.
    pub fn code_records(&self) -> Vec<CodeRecord> {
        let mut records = Vec::with_capacity(self.leaf_count());
        match &self.root {
            HuffNode::Leaf { symbol, weight } => records.push(CodeRecord {
                symbol: *symbol,
                frequency: *weight,
                code: SINGLE_LEAF_CODE.to_string(),
            }),
            internal => {
                let mut prefix = String::new();
                internal.collect_codes(&mut prefix, &mut records);
            }
        }
        records
    }

    pub fn code_table(&self) -> BTreeMap<Symbol, String> {
        self.code_records()
            .into_iter()
            .map(|r| (r.symbol, r.code))
            .collect()
    }

    /// Sum of `frequency * code length` over all leaves.
    pub fn weighted_path_length(&self) -> u64 {
        self.code_records()
            .iter()
            .map(|r| r.frequency * r.code_len() as u64)
            .sum()
    }

    /// Concatenate the codes of `text`, as a string of `'0'`/`'1'`.
    pub fn encode(&self, text: &[u8]) -> DomainResult<String> {
        let table = self.code_table();
        let mut bits = String::new();
        for &symbol in text {
            let code = table
                .get(&symbol)
                .ok_or(DomainError::UnknownSymbol(symbol))?;
            bits.push_str(code);
        }
        Ok(bits)
    }

    /// Walk the tree from the root for each code in `bits`.
    pub fn decode(&self, bits: &str) -> DomainResult<Vec<u8>> {
        let mut out = Vec::new();

        if let HuffNode::Leaf { symbol, .. } = &self.root {
            for (position, bit) in bits.chars().enumerate() {
                if bit != '0' {
                    return Err(DomainError::InvalidCode { position });
                }
                out.push(*symbol);
            }
            return Ok(out);
        }

        let mut node = &self.root;
        let mut pending = 0usize;
        for (position, bit) in bits.chars().enumerate() {
            node = match (node, bit) {
                (HuffNode::Internal { left, .. }, '0') => left,
                (HuffNode::Internal { right, .. }, '1') => right,
                _ => return Err(DomainError::InvalidCode { position }),
            };
            pending += 1;
            if let HuffNode::Leaf { symbol, .. } = node {
                out.push(*symbol);
                node = &self.root;
                pending = 0;
            }
        }

        if pending > 0 {
            return Err(DomainError::TruncatedCode {
                position: bits.chars().count(),
            });
        }
        Ok(out)
    }
}
