use cfl_crypto::{ChainError, HasherError};

/// Errors produced by ledger operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    #[error("record out of sequence: expected index {expected}, found {found}")]
    OutOfSequence { expected: u64, found: u64 },

    #[error("chain integrity violation at index {index}: {reason}")]
    ChainIntegrityViolation { index: u64, reason: String },

    #[error("ledger holds no records")]
    EmptyLedger,

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("ledger lock poisoned")]
    LockPoisoned,
}

impl From<HasherError> for LedgerError {
    fn from(error: HasherError) -> Self {
        match error {
            HasherError::Serialization(reason) => Self::Serialization(reason),
        }
    }
}

impl From<ChainError> for LedgerError {
    fn from(error: ChainError) -> Self {
        Self::ChainIntegrityViolation {
            index: error.index() as u64,
            reason: error.to_string(),
        }
    }
}
