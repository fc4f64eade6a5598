mod errors;
mod filter;
mod memory_storage;

use rust_decimal::Decimal;

use crate::models::{Category, CategoryDraft, Transaction, TransactionDraft, TransactionKind};
use crate::types::{RecordId, UserId};

pub use errors::StorageError;
pub use filter::{DateOrder, TransactionFilter};
pub use memory_storage::MemoryStorage;

/// Owner-scoped access to categories, incomes and expenses.
///
/// Every lookup takes the owning user; a record that exists but belongs to
/// someone else is reported exactly like a record that does not exist.
pub trait Storage: Send + Sync + 'static {
    fn create_category(&self, user_id: UserId, draft: CategoryDraft) -> Result<Category, StorageError>;
    fn categories(&self, user_id: UserId) -> Vec<Category>;
    fn category(&self, user_id: UserId, category_id: RecordId) -> Result<Category, StorageError>;
    fn update_category(&self, user_id: UserId, category_id: RecordId, draft: CategoryDraft) -> Result<Category, StorageError>;
    /// Removes the category along with every transaction filed under it.
    fn remove_category(&self, user_id: UserId, category_id: RecordId) -> Result<Category, StorageError>;

    fn create_transaction(&self, user_id: UserId, kind: TransactionKind, draft: TransactionDraft) -> Result<Transaction, StorageError>;
    fn transactions(&self, user_id: UserId, filter: &TransactionFilter) -> Vec<Transaction>;
    fn transaction(&self, user_id: UserId, kind: TransactionKind, transaction_id: RecordId) -> Result<Transaction, StorageError>;
    fn update_transaction(&self, user_id: UserId, kind: TransactionKind, transaction_id: RecordId, draft: TransactionDraft) -> Result<Transaction, StorageError>;
    fn remove_transaction(&self, user_id: UserId, kind: TransactionKind, transaction_id: RecordId) -> Result<Transaction, StorageError>;
    fn total(&self, user_id: UserId, kind: TransactionKind) -> Decimal;

    /// Removes everything the user owns, returning the number of records dropped.
    fn remove_user(&self, user_id: UserId) -> usize;
}
