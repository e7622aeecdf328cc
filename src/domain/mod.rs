//! Domain layer: entities and business logic
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod display;
pub mod entities;
pub mod error;
pub mod partition;
mod queue;
pub mod tree;

pub use display::TreeDisplay;
pub use entities::*;
pub use error::{DomainError, DomainResult};
pub use partition::{partitions, Partition};
pub use tree::{HuffNode, HuffmanTree, SINGLE_LEAF_CODE};
