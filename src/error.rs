use std::fmt::Debug;
use thiserror::Error;

/// Enum with all errors in this crate.
#[derive(Error, Debug)]
pub enum IndexError {
    #[error("General error: {0}")]
    General(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid dataset {name}: {reason}")]
    InvalidDataset { name: String, reason: String },

    #[error("Index has no items to search")]
    EmptyIndex,

    #[error("Expected {expected} coordinates, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },
}

impl IndexError {
    pub(crate) fn invalid_dataset(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidDataset {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, IndexError>;
