//! Error types shared by the metrics engine and the FASTA tools.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AsmError {
    /// Empty or out-of-range input handed to a calculation
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A statistic with no defined value for the given data (e.g. GC% of zero bases)
    #[error("undefined statistic: {0}")]
    UndefinedStatistic(String),

    /// A requested identifier is missing from a lookup set
    #[error("not found: {0}")]
    ResourceNotFound(String),

    /// Malformed FASTA record or lookup table line
    #[error("parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, AsmError>;
