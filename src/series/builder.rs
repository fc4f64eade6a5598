use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use tracing::debug;

use crate::series::{SeriesError, SeriesRecord};

/// Fewest distinct days a series needs before a trend can be fitted.
pub const MIN_DISTINCT_DAYS: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeriesPoint {
    pub date: NaiveDate,
    pub value: Decimal
}

/// A daily series: strictly ascending dates, one point per day, never fewer
/// than [`MIN_DISTINCT_DAYS`] points. Only [`build_daily_series`] creates one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Series {
    points: Vec<SeriesPoint>
}

impl Series {
    pub fn points(&self) -> &[SeriesPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.points.iter().map(|point| point.date).collect()
    }

    pub fn first_date(&self) -> NaiveDate {
        self.points[0].date
    }

    pub fn last_date(&self) -> NaiveDate {
        self.points[self.points.len() - 1].date
    }

    pub fn total(&self) -> Decimal {
        self.points.iter().map(|point| point.value).sum()
    }
}

/// Cleans the records, groups them by calendar day and sums each day.
///
/// Records whose date or amount cannot be coerced are dropped without
/// complaint. Days with no records stay absent; no gaps are filled.
///
/// # Errors
/// Returns `SeriesError::InsufficientData` when fewer than
/// [`MIN_DISTINCT_DAYS`] distinct days survive cleaning.
pub fn build_daily_series<I>(records: I) -> Result<Series, SeriesError>
where
    I: IntoIterator,
    I::Item: SeriesRecord
{
    let mut days = BTreeMap::<NaiveDate, Decimal>::new();
    let mut dropped = 0usize;

    for record in records {
        match (record.series_date(), record.series_amount()) {
            (Some(date), Some(amount)) => *days.entry(date).or_insert(Decimal::ZERO) += amount,
            _ => dropped += 1
        }
    }

    if dropped > 0 {
        debug!("Dropped [{dropped}] record(s) with an unusable date or amount");
    }

    if days.len() < MIN_DISTINCT_DAYS {
        return Err(SeriesError::InsufficientData {
            distinct_days: days.len(),
            required: MIN_DISTINCT_DAYS
        });
    }

    let points = days.into_iter()
        .map(|(date, value)| SeriesPoint { date, value })
        .collect();

    Ok(Series { points })
}
