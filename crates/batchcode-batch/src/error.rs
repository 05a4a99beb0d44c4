//! Batch run errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BatchError {
    #[error("batch contains no codes")]
    Empty,

    #[error("{0}")]
    Other(String),
}
