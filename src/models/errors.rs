use crate::models::{TransactionDraft, TransactionKind};
use crate::types::RecordId;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("Category name is required")]
    NameRequired,
    #[error("Category name must be at most [{max}] characters, got [{length}]")]
    NameTooLong {
        max: usize,
        length: usize
    },
    #[error("Category [{category_id}] is not an available {kind} category")]
    CategoryUnavailable {
        category_id: RecordId,
        kind: TransactionKind
    },
    #[error("Category [{category_id}] cannot become {requested} while [{count}] {current} record(s) reference it")]
    CategoryInUse {
        category_id: RecordId,
        current: TransactionKind,
        requested: TransactionKind,
        count: usize
    }
}

impl ValidationError {
    pub fn category_unavailable(draft: &TransactionDraft, kind: TransactionKind) -> Self {
        Self::CategoryUnavailable {
            category_id: draft.category,
            kind
        }
    }

    pub fn category_in_use(category_id: RecordId, current: TransactionKind, requested: TransactionKind, count: usize) -> Self {
        Self::CategoryInUse {
            category_id,
            current,
            requested,
            count
        }
    }
}
