use std::{io, path::PathBuf};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("File content verification failed - content mismatch")]
    Verification,

    #[error("No record named {0}")]
    NotFound(String),
}

impl StoreError {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        StoreError::Io {
            path: path.into(),
            source,
        }
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum DraftError {
    #[error("Name is required")]
    MissingName,

    #[error("Select at least one item")]
    EmptySelection,

    #[error("Invalid price: {0:?}")]
    InvalidPrice(String),

    #[error("Unknown ingredient: {0}")]
    UnknownIngredient(String),

    #[error("Unknown dish: {0}")]
    UnknownDish(String),
}
