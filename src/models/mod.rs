mod category;
mod errors;
mod summary;
mod transaction;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fmt::{Display, Formatter};

pub use category::{Category, CategoryDraft};
pub use errors::ValidationError;
pub use summary::{Summary, Totals};
pub use transaction::{Transaction, TransactionDraft};

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    #[default]
    Expense
}

impl Display for TransactionKind {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        match self {
            TransactionKind::Income => write!(formatter, "income"),
            TransactionKind::Expense => write!(formatter, "expense")
        }
    }
}
