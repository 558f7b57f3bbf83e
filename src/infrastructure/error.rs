//! Infrastructure-level errors (wraps domain errors)

use thiserror::Error;

use crate::domain::DomainError;

/// Infrastructure errors wrap domain errors and add I/O-level concerns.
#[derive(Error, Debug)]
pub enum InfraError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("serialization failed: {context}")]
    Serialization {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot serialize character {character:?} in {context}")]
    UnsupportedCharacter { character: char, context: String },

    #[error("config error: {message}")]
    Config { message: String },
}

impl InfraError {
    /// Create a serialization error with context.
    pub fn serialization(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Serialization {
            context: context.into(),
            source,
        }
    }

    /// True for failures while rendering the document.
    pub fn is_serialization(&self) -> bool {
        matches!(
            self,
            Self::Serialization { .. } | Self::UnsupportedCharacter { .. }
        )
    }
}

/// Result type for infrastructure layer operations.
pub type InfraResult<T> = Result<T, InfraError>;
