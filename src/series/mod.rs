mod builder;
mod errors;
mod record;

pub use builder::{build_daily_series, Series, MIN_DISTINCT_DAYS};
pub use errors::SeriesError;
pub use record::{RawRecord, SeriesRecord};
