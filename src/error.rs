use rust_decimal::Decimal;
use thiserror::Error;

/// Errors produced while executing pool commands.
///
/// The protocol variants map one-to-one onto operation preconditions: each
/// aborts its operation before any state is touched, so callers observe
/// either full success or an unchanged pool plus one specific variant.
#[derive(Error, Debug)]
pub enum PoolError {
    #[error("caller is not the pool manager")]
    Unauthorized,
    #[error("contribution {amount} does not exceed the minimum of {minimum}")]
    BelowMinimum { amount: Decimal, minimum: Decimal },
    #[error("the manager cannot be the recipient of a spend request")]
    InvalidRecipient,
    #[error("requested value {value} exceeds the pool balance {balance}")]
    InsufficientBalance { value: Decimal, balance: Decimal },
    #[error("caller has already approved this request")]
    AlreadyApproved,
    #[error("caller has not contributed above the minimum")]
    NotApprover,
    #[error("request is already complete")]
    RequestComplete,
    #[error("{approvals} of {approvers} approvers approved, quorum not met")]
    QuorumNotMet { approvals: usize, approvers: usize },
    #[error("no request at index {0}")]
    InvalidIndex(u32),

    #[error("no pool with id {0}")]
    PoolNotFound(u64),
    #[error("invalid command: {0}")]
    Validation(String),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("internal error: {0}")]
    Internal(#[source] Box<dyn std::error::Error + Send + Sync>),
}

#[cfg(feature = "storage-rocksdb")]
impl From<rocksdb::Error> for PoolError {
    fn from(e: rocksdb::Error) -> Self {
        PoolError::Internal(Box::new(e))
    }
}

pub type Result<T> = std::result::Result<T, PoolError>;
