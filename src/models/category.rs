use serde::{Deserialize, Serialize};

use crate::models::{TransactionKind, ValidationError};
use crate::types::{RecordId, UserId};

const MAX_NAME_LENGTH: usize = 100;

/// A user-owned label that incomes or expenses are filed under.
///
/// The `kind` decides which transactions may reference the category: an
/// income category only ever holds incomes and vice versa.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Category {
    pub id: RecordId,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    #[serde(skip)]
    pub user_id: UserId
}

/// Client supplied fields for creating or updating a category.
#[derive(Debug, Clone, Deserialize)]
pub struct CategoryDraft {
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: TransactionKind
}

impl CategoryDraft {
    pub fn new(name: &str, kind: TransactionKind) -> Self {
        Self { name: name.to_string(), kind }
    }

    /// Trims the name and checks it is present and within bounds.
    pub fn validate(self) -> Result<Self, ValidationError> {
        let name = self.name.trim().to_string();

        if name.is_empty() {
            return Err(ValidationError::NameRequired);
        }

        let length = name.chars().count();

        if length > MAX_NAME_LENGTH {
            return Err(ValidationError::NameTooLong { max: MAX_NAME_LENGTH, length });
        }

        Ok(Self { name, kind: self.kind })
    }
}
