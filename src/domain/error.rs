//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Errors raised while assembling the document tree.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A mutant referenced a method that was never added as a subject.
    #[error("no subject registered for method: {method}")]
    SubjectNotFound { method: String },

    /// The tree is missing a node the builder created itself.
    #[error("document construction failed: {0}")]
    Construction(String),
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
