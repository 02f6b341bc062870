use crate::common::money::Money;

/// Recoverable failures of a single ledger operation. None of these leave the
/// ledger changed; the menu reports them and returns to the prompt.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("insufficient funds: balance {balance}, change requires {required}")]
    InsufficientFunds { balance: Money, required: Money },
    #[error("record not found: no entry with id {0}")]
    NotFound(usize),
    #[error("cannot read {field} from {value:?}")]
    InputFormat { field: String, value: String },
}

impl LedgerError {
    pub fn validation(msg: impl Into<String>) -> Self {
        LedgerError::Validation(msg.into())
    }
}

#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("parse error: {0}")]
    Parse(String),
    #[error(transparent)]
    Ledger(#[from] LedgerError),
}
