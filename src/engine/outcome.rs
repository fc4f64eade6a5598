use tracing::{debug, warn};

use crate::forecast::{run_forecast, ForecastRequest, ForecastResult, Forecaster};
use crate::series::{build_daily_series, SeriesError, SeriesRecord};

pub const INSUFFICIENT_DATA_MESSAGE: &str = "Not enough expense data to make a forecast.";
pub const UNAVAILABLE_MESSAGE: &str = "Forecast unavailable.";

/// What a forecast request ended with. Only `Ready` carries predictions; the
/// other two are shown to the user as a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ForecastOutcome {
    Ready(ForecastResult),
    InsufficientData {
        distinct_days: usize
    },
    Unavailable {
        reason: String
    }
}

impl ForecastOutcome {
    pub fn message(&self) -> Option<&'static str> {
        match self {
            ForecastOutcome::Ready(_) => None,
            ForecastOutcome::InsufficientData { .. } => Some(INSUFFICIENT_DATA_MESSAGE),
            ForecastOutcome::Unavailable { .. } => Some(UNAVAILABLE_MESSAGE)
        }
    }

    pub fn result(&self) -> Option<&ForecastResult> {
        match self {
            ForecastOutcome::Ready(result) => Some(result),
            _ => None
        }
    }
}

/// Builds the daily series and, when there is enough of it, runs the forecaster.
///
/// The forecaster is never invoked for insufficient data. A fit or predict
/// failure is logged and reported as `Unavailable` rather than returned.
pub fn forecast_outcome<R: SeriesRecord>(forecaster: &dyn Forecaster, records: &[R], request: &ForecastRequest) -> ForecastOutcome {
    let series = match build_daily_series(records) {
        Ok(series) => series,
        Err(SeriesError::InsufficientData { distinct_days, .. }) => {
            debug!("Skipping forecast: only [{distinct_days}] distinct day(s) of data");
            return ForecastOutcome::InsufficientData { distinct_days };
        }
    };

    match run_forecast(forecaster, &series, request) {
        Ok(result) => ForecastOutcome::Ready(result),
        Err(error) => {
            warn!("Forecast unavailable: {error}");
            ForecastOutcome::Unavailable { reason: error.to_string() }
        }
    }
}
