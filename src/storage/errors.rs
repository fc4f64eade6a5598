use crate::models::{TransactionKind, ValidationError};
use crate::types::RecordId;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum StorageError {
    #[error("Category [{category_id}] was not found")]
    CategoryNotFound {
        category_id: RecordId
    },
    #[error("Transaction [{transaction_id}]:[{kind}] was not found")]
    TransactionNotFound {
        transaction_id: RecordId,
        kind: TransactionKind
    },
    #[error(transparent)]
    Validation(#[from] ValidationError)
}

impl StorageError {
    pub fn category_not_found(category_id: RecordId) -> Self {
        Self::CategoryNotFound { category_id }
    }

    pub fn transaction_not_found(kind: TransactionKind, transaction_id: RecordId) -> Self {
        Self::TransactionNotFound { transaction_id, kind }
    }
}
