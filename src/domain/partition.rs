//! Contiguous text partitions, one per worker.
//!
//! Partition `i` (1-indexed) covers `[(i-1)*chunk, i*chunk)` with
//! `chunk = len / workers`; the last partition runs to the end of the text
//! and absorbs the division remainder.

use std::num::NonZeroUsize;
use std::ops::Range;

use crate::domain::error::{DomainError, DomainResult};

/// Index range of the text assigned to one worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Partition {
    /// 1-indexed worker number
    pub worker: usize,
    pub start: usize,
    pub end: usize,
}

impl Partition {
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Borrow this partition's bytes.
    ///
    /// A range outside `text` is a partitioning bug and is reported as
    /// `PartitionOutOfRange`, never clamped.
    pub fn slice<'a>(&self, text: &'a [u8]) -> DomainResult<&'a [u8]> {
        text.get(self.range())
            .ok_or(DomainError::PartitionOutOfRange {
                worker: self.worker,
                start: self.start,
                end: self.end,
                len: text.len(),
            })
    }
}

/// Split `len` symbols into exactly `workers` partitions.
pub fn partitions(len: usize, workers: NonZeroUsize) -> Vec<Partition> {
    let n = workers.get();
    let chunk = len / n;
    (1..=n)
        .map(|worker| {
            let start = (worker - 1) * chunk;
            let end = if worker == n { len } else { worker * chunk };
            Partition { worker, start, end }
        })
        .collect()
}
