use crate::models::{Category, CategoryDraft, Transaction, TransactionDraft, TransactionKind, ValidationError};
use crate::storage::{DateOrder, Storage, StorageError, TransactionFilter};
use crate::types::{RecordId, UserId};
use dashmap::DashMap;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::debug;

/// In-memory storage backed by concurrent maps keyed by record id.
///
/// Locks are always taken category first, then transaction. A write that
/// depends on a category holds that category's guard until the transaction
/// is written, so kind changes and removals cannot interleave with it.
pub struct MemoryStorage {
    categories: DashMap<RecordId, Category>,
    transactions: DashMap<RecordId, Transaction>,
    next_id: AtomicU64
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self {
            categories: DashMap::new(),
            transactions: DashMap::new(),
            next_id: AtomicU64::new(1)
        }
    }

    fn allocate_id(&self) -> RecordId {
        self.next_id.fetch_add(1, Ordering::Relaxed)
    }

    fn owned_category(&self, user_id: UserId, category_id: RecordId) -> Option<Category> {
        self.categories.get(&category_id)
            .filter(|category| category.user_id == user_id)
            .map(|category| category.value().clone())
    }

    fn category_names(&self, user_id: UserId) -> HashMap<RecordId, String> {
        self.categories.iter()
            .filter(|category| category.user_id == user_id)
            .map(|category| (category.id, category.name.to_lowercase()))
            .collect()
    }
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl Storage for MemoryStorage {
    fn create_category(&self, user_id: UserId, draft: CategoryDraft) -> Result<Category, StorageError> {
        let draft = draft.validate()?;
        let category = Category {
            id: self.allocate_id(),
            name: draft.name,
            kind: draft.kind,
            user_id
        };

        self.categories.insert(category.id, category.clone());

        Ok(category)
    }

    fn categories(&self, user_id: UserId) -> Vec<Category> {
        let mut categories: Vec<Category> = self.categories.iter()
            .filter(|category| category.user_id == user_id)
            .map(|category| category.value().clone())
            .collect();

        categories.sort_by_key(|category| category.id);
        categories
    }

    fn category(&self, user_id: UserId, category_id: RecordId) -> Result<Category, StorageError> {
        self.owned_category(user_id, category_id)
            .ok_or_else(|| StorageError::category_not_found(category_id))
    }

    fn update_category(&self, user_id: UserId, category_id: RecordId, draft: CategoryDraft) -> Result<Category, StorageError> {
        let draft = draft.validate()?;
        let mut category = self.categories.get_mut(&category_id)
            .filter(|category| category.user_id == user_id)
            .ok_or_else(|| StorageError::category_not_found(category_id))?;

        if category.kind != draft.kind {
            let references = self.transactions.iter()
                .filter(|transaction| transaction.category_id == category_id)
                .count();

            if references > 0 {
                return Err(ValidationError::category_in_use(category_id, category.kind, draft.kind, references).into());
            }
        }

        category.name = draft.name;
        category.kind = draft.kind;

        Ok(category.value().clone())
    }

    fn remove_category(&self, user_id: UserId, category_id: RecordId) -> Result<Category, StorageError> {
        let (_, category) = self.categories
            .remove_if(&category_id, |_, category| category.user_id == user_id)
            .ok_or_else(|| StorageError::category_not_found(category_id))?;

        let before = self.transactions.len();
        self.transactions.retain(|_, transaction| transaction.category_id != category_id);

        debug!("Category [{category_id}] removed with [{}] dependent transaction(s)", before.saturating_sub(self.transactions.len()));

        Ok(category)
    }

    fn create_transaction(&self, user_id: UserId, kind: TransactionKind, draft: TransactionDraft) -> Result<Transaction, StorageError> {
        let category = self.categories.get(&draft.category)
            .filter(|category| category.user_id == user_id && category.kind == kind)
            .ok_or_else(|| ValidationError::category_unavailable(&draft, kind))?;

        let transaction = Transaction {
            id: self.allocate_id(),
            kind,
            amount: draft.amount,
            date: draft.date,
            category_id: draft.category,
            description: draft.description,
            user_id
        };

        self.transactions.insert(transaction.id, transaction.clone());
        drop(category);

        Ok(transaction)
    }

    fn transactions(&self, user_id: UserId, filter: &TransactionFilter) -> Vec<Transaction> {
        let names = match filter.search {
            Some(_) => self.category_names(user_id),
            None => HashMap::new()
        };

        let mut transactions: Vec<Transaction> = self.transactions.iter()
            .filter(|transaction| transaction.user_id == user_id)
            .filter(|transaction| filter.kind.is_none_or(|kind| transaction.kind == kind))
            .filter(|transaction| filter.matches_dates(transaction.date))
            .filter(|transaction| match &filter.search {
                Some(query) => {
                    transaction.description.to_lowercase().contains(query.as_str())
                        || names.get(&transaction.category_id).is_some_and(|name| name.contains(query.as_str()))
                }
                None => true
            })
            .map(|transaction| transaction.value().clone())
            .collect();

        match filter.order {
            DateOrder::Ascending => transactions.sort_by_key(|transaction| (transaction.date, transaction.id)),
            DateOrder::Descending => transactions.sort_by(|left, right| (right.date, right.id).cmp(&(left.date, left.id)))
        }

        if let Some(limit) = filter.limit {
            transactions.truncate(limit);
        }

        transactions
    }

    fn transaction(&self, user_id: UserId, kind: TransactionKind, transaction_id: RecordId) -> Result<Transaction, StorageError> {
        self.transactions.get(&transaction_id)
            .filter(|transaction| transaction.user_id == user_id && transaction.kind == kind)
            .map(|transaction| transaction.value().clone())
            .ok_or_else(|| StorageError::transaction_not_found(kind, transaction_id))
    }

    fn update_transaction(&self, user_id: UserId, kind: TransactionKind, transaction_id: RecordId, draft: TransactionDraft) -> Result<Transaction, StorageError> {
        self.transaction(user_id, kind, transaction_id)?;

        let category = self.categories.get(&draft.category)
            .filter(|category| category.user_id == user_id && category.kind == kind)
            .ok_or_else(|| ValidationError::category_unavailable(&draft, kind))?;

        let mut transaction = self.transactions.get_mut(&transaction_id)
            .filter(|transaction| transaction.user_id == user_id && transaction.kind == kind)
            .ok_or_else(|| StorageError::transaction_not_found(kind, transaction_id))?;

        transaction.amount = draft.amount;
        transaction.date = draft.date;
        transaction.category_id = draft.category;
        transaction.description = draft.description;

        let updated = transaction.value().clone();
        drop(transaction);
        drop(category);

        Ok(updated)
    }

    fn remove_transaction(&self, user_id: UserId, kind: TransactionKind, transaction_id: RecordId) -> Result<Transaction, StorageError> {
        self.transactions
            .remove_if(&transaction_id, |_, transaction| transaction.user_id == user_id && transaction.kind == kind)
            .map(|(_, transaction)| transaction)
            .ok_or_else(|| StorageError::transaction_not_found(kind, transaction_id))
    }

    fn total(&self, user_id: UserId, kind: TransactionKind) -> Decimal {
        self.transactions.iter()
            .filter(|transaction| transaction.user_id == user_id && transaction.kind == kind)
            .map(|transaction| transaction.amount.value())
            .sum()
    }

    fn remove_user(&self, user_id: UserId) -> usize {
        let before = self.categories.len() + self.transactions.len();

        self.categories.retain(|_, category| category.user_id != user_id);
        self.transactions.retain(|_, transaction| transaction.user_id != user_id);

        let removed = before.saturating_sub(self.categories.len() + self.transactions.len());
        debug!("User [{user_id}] removed with [{removed}] record(s)");

        removed
    }
}
