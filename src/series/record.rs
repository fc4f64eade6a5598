use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::models::Transaction;
use crate::types::{coerce_amount, coerce_date};

/// Anything that can contribute a dated amount to a daily series.
///
/// Returning `None` from either accessor drops the record during cleaning.
pub trait SeriesRecord {
    fn series_date(&self) -> Option<NaiveDate>;
    fn series_amount(&self) -> Option<Decimal>;
}

impl<T: SeriesRecord + ?Sized> SeriesRecord for &T {
    fn series_date(&self) -> Option<NaiveDate> {
        (**self).series_date()
    }

    fn series_amount(&self) -> Option<Decimal> {
        (**self).series_amount()
    }
}

impl SeriesRecord for Transaction {
    fn series_date(&self) -> Option<NaiveDate> {
        Some(self.date)
    }

    fn series_amount(&self) -> Option<Decimal> {
        Some(self.amount.value())
    }
}

/// An untyped row as it comes out of a file: both fields are optional text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRecord {
    pub date: Option<String>,
    pub amount: Option<String>
}

impl RawRecord {
    pub fn new(date: &str, amount: &str) -> Self {
        Self {
            date: Some(date.to_string()),
            amount: Some(amount.to_string())
        }
    }
}

impl SeriesRecord for RawRecord {
    fn series_date(&self) -> Option<NaiveDate> {
        self.date.as_deref().and_then(coerce_date)
    }

    fn series_amount(&self) -> Option<Decimal> {
        self.amount.as_deref().and_then(coerce_amount)
    }
}
