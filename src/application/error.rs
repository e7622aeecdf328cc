//! Errors from aggregation, worker management and settings.

use thiserror::Error;

use crate::domain::DomainError;

/// Domain errors plus the failures of running workers and loading settings.
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("invalid worker count: {0} (expected a positive integer)")]
    InvalidWorkerCount(String),

    #[error("worker {worker} failed: {source}")]
    WorkerFailed {
        worker: usize,
        #[source]
        source: DomainError,
    },

    #[error("worker {0} panicked")]
    WorkerPanicked(usize),

    #[error("shared frequency table lock poisoned")]
    LockPoisoned,

    #[error("cannot start worker pool: {0}")]
    ThreadPool(String),

    #[error("config error: {message}")]
    Config { message: String },

    #[error("operation failed: {context}")]
    OperationFailed {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// Result type for application layer operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
