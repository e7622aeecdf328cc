//! Infrastructure layer: I/O implementations
//!
//! This layer implements I/O boundary traits and resolves program input.

pub mod error;
pub mod input;
pub mod traits;

pub use error::{InfraError, InfraResult};
pub use input::InputResolver;
