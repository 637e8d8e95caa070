use thiserror::Error;
use uuid::Uuid;

use crate::types::RecordKind;

#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("{kind} not found: {id}")]
    NotFound {
        kind: RecordKind,
        id: Uuid,
    },

    #[error("{kind} already exists: {id}")]
    DuplicateId {
        kind: RecordKind,
        id: Uuid,
    },

    #[error("invalid installment count: {count}")]
    InvalidInstallmentCount {
        count: u32,
    },

    #[error("loan {id} is marked paid but has no payment date")]
    MissingPaymentDate {
        id: Uuid,
    },

    #[error("invalid date: {message}")]
    InvalidDate {
        message: String,
    },

    #[error("invalid amount: {message}")]
    InvalidAmount {
        message: String,
    },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration {
        message: String,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, LedgerError>;
