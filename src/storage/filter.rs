use chrono::NaiveDate;

use crate::models::TransactionKind;

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub enum DateOrder {
    #[default]
    Ascending,
    Descending
}

/// Narrows a transaction listing. All criteria are optional and combined with AND.
#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    pub kind: Option<TransactionKind>,
    pub since: Option<NaiveDate>,
    pub until: Option<NaiveDate>,
    /// Case-insensitive match against the description or the category name.
    pub search: Option<String>,
    pub order: DateOrder,
    pub limit: Option<usize>
}

impl TransactionFilter {
    pub fn of_kind(kind: TransactionKind) -> Self {
        Self { kind: Some(kind), ..Self::default() }
    }

    pub fn since(mut self, date: NaiveDate) -> Self {
        self.since = Some(date);
        self
    }

    pub fn until(mut self, date: NaiveDate) -> Self {
        self.until = Some(date);
        self
    }

    pub fn search(mut self, query: Option<&str>) -> Self {
        self.search = query
            .map(str::trim)
            .filter(|query| !query.is_empty())
            .map(str::to_lowercase);
        self
    }

    pub fn newest_first(mut self) -> Self {
        self.order = DateOrder::Descending;
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub(crate) fn matches_dates(&self, date: NaiveDate) -> bool {
        self.since.is_none_or(|since| date >= since) && self.until.is_none_or(|until| date <= until)
    }
}
