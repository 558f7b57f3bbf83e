//! Domain layer: document tree and the builder that fills it
//!
//! This layer is independent of external concerns (no I/O, no config loading).

pub mod arena;
pub mod builder;
pub mod entities;
pub mod error;

pub use arena::{DocumentArena, ElementData, TreeNode};
pub use builder::DocumentBuilder;
pub use entities::*;
pub use error::{DomainError, DomainResult};
