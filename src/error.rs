use thiserror::Error;

/// Error taxonomy shared by every engine operation.
///
/// Operations never panic on bad input: every failure mode is a distinct,
/// matchable variant carrying a human-readable reason.
#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("{entity} '{id}' not found")]
    NotFound { entity: &'static str, id: u32 },

    #[error("invalid reference: {0}")]
    InvalidReferenceType(String),

    #[error("insufficient funds")]
    InsufficientFunds,

    #[error("credit limit exceeded")]
    CreditLimitExceeded,

    #[error("invalid date: {0}")]
    InvalidDate(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl LedgerError {
    pub fn not_found(entity: &'static str, id: u32) -> Self {
        Self::NotFound { entity, id }
    }

    pub fn invalid_argument(reason: impl Into<String>) -> Self {
        Self::InvalidArgument(reason.into())
    }
}

pub type Result<T> = std::result::Result<T, LedgerError>;
