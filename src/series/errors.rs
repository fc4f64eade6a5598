use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SeriesError {
    #[error("Insufficient data: [{distinct_days}] distinct day(s) after cleaning, at least [{required}] required")]
    InsufficientData {
        distinct_days: usize,
        required: usize
    }
}
