//! Aggregation and tree-building services
//!
//! Runs the domain logic on worker threads. Config file reads are the
//! only I/O here.

pub mod error;
pub mod error_ext;
pub mod services;

pub use error::{ApplicationError, ApplicationResult};
pub use error_ext::IoResultExt;
