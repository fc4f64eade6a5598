use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ForecastError {
    #[error("Model cannot be fitted: {0}")]
    Degenerate(String),
    #[error("Model produced a non-finite prediction for [{date}]")]
    NonFinite {
        date: NaiveDate
    },
    #[error("Cannot forecast [{horizon}] day(s) past [{last}]: date out of range")]
    DateOutOfRange {
        last: NaiveDate,
        horizon: u32
    },
    #[error("Model returned [{actual}] prediction(s) for [{expected}] date(s)")]
    PredictionLength {
        expected: usize,
        actual: usize
    }
}
