//! Domain-level errors (no external dependencies)

use thiserror::Error;

use crate::domain::Symbol;

/// Domain errors represent violations of the counting and tree invariants.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("empty frequency table: no symbol has a non-zero count")]
    EmptyFrequencyTable,

    #[error("worker {worker}: partition [{start}, {end}) is outside text of length {len}")]
    PartitionOutOfRange {
        worker: usize,
        start: usize,
        end: usize,
        len: usize,
    },

    #[error("symbol {0:#04x} has no code in this tree")]
    UnknownSymbol(Symbol),

    #[error("invalid code bit at position {position}")]
    InvalidCode { position: usize },

    #[error("bit sequence ends inside a code at position {position}")]
    TruncatedCode { position: usize },
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
