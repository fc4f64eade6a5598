use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::TransactionKind;
use crate::types::{Amount, RecordId, UserId};

/// A single income or expense owned by one user.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transaction {
    pub id: RecordId,
    pub kind: TransactionKind,
    pub amount: Amount,
    pub date: NaiveDate,
    #[serde(rename = "category")]
    pub category_id: RecordId,
    pub description: String,
    #[serde(skip)]
    pub user_id: UserId
}

/// Client supplied fields for creating or updating an income or expense.
///
/// The amount is validated while deserializing; the category reference is
/// checked against the owner's categories by the storage layer.
#[derive(Debug, Clone, Deserialize)]
pub struct TransactionDraft {
    pub amount: Amount,
    pub date: NaiveDate,
    pub category: RecordId,
    #[serde(default)]
    pub description: String
}

impl TransactionDraft {
    pub fn new(amount: Amount, date: NaiveDate, category: RecordId, description: &str) -> Self {
        Self { amount, date, category, description: description.to_string() }
    }
}
