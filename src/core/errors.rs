use crate::core::models::{MoneyError, RecordId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub title: String,
    pub description: String,
}

/// Rejection of a proposed split. No shares are produced when this is returned.
#[derive(Error, Debug, Clone, PartialEq, Serialize)]
pub enum SplitError {
    #[error("Invalid participants: {0}")]
    InvalidParticipants(String),
    #[error("Split does not reconcile: expected {expected}, got {actual}")]
    SplitMismatch { expected: Decimal, actual: Decimal },
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Unknown split method `{0}`")]
    InvalidMethod(String),
}

impl From<MoneyError> for SplitError {
    fn from(err: MoneyError) -> Self {
        SplitError::InvalidAmount(err.to_string())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    Expense,
    Payment,
}

/// A stored record that failed structural checks during aggregation.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[error("Malformed {kind:?} record {record_id}: {reason}")]
pub struct MalformedRecordError {
    pub record_id: RecordId,
    pub kind: RecordKind,
    pub reason: String,
}

impl MalformedRecordError {
    pub fn expense(record_id: &RecordId, reason: impl Into<String>) -> Self {
        MalformedRecordError {
            record_id: record_id.clone(),
            kind: RecordKind::Expense,
            reason: reason.into(),
        }
    }

    pub fn payment(record_id: &RecordId, reason: impl Into<String>) -> Self {
        MalformedRecordError {
            record_id: record_id.clone(),
            kind: RecordKind::Payment,
            reason: reason.into(),
        }
    }
}

#[derive(Error, Debug, Serialize)]
pub enum CentsibleError {
    #[error(transparent)]
    Split(#[from] SplitError),
    #[error("Invalid input for field `{0}`: {1:?}")]
    InvalidInput(String, FieldError),
    #[error("Member {0} not found")]
    MemberNotFound(String),
    #[error("Member {0} already exists")]
    MemberAlreadyExists(String),
    #[error("Group {0} not found")]
    GroupNotFound(String),
    #[error("Member {0} is not a group member")]
    NotGroupMember(String),
    #[error("Member {0} is already a group member")]
    AlreadyGroupMember(String),
    #[error("Cannot record a payment to self")]
    SelfPayment,
    #[error("Storage error: {0}")]
    StorageError(String),
    #[error("Logging error: {0}")]
    LoggingError(String),
    #[error("Configuration error: {0}")]
    ConfigError(String),
}
