use chrono::{Days, NaiveDate};
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use tracing::debug;

use crate::forecast::{ForecastError, Forecaster, ModelOptions};
use crate::series::Series;

const VALUE_DECIMAL_PLACES: u32 = 2;

/// Which part of the predicted range is handed back to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputWindow {
    /// The back-fitted history followed by the future dates.
    Full,
    /// Only the trailing `horizon` future dates.
    FutureOnly
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForecastRequest {
    pub horizon: u32,
    pub options: ModelOptions,
    pub window: OutputWindow
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForecastPoint {
    pub date: NaiveDate,
    pub value: Decimal
}

/// Predicted values in date order, each rounded to two decimal places.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ForecastResult {
    points: Vec<ForecastPoint>
}

impl ForecastResult {
    pub fn points(&self) -> &[ForecastPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// ISO formatted dates, parallel to [`ForecastResult::values`].
    pub fn labels(&self) -> Vec<String> {
        self.points.iter().map(|point| point.date.format("%Y-%m-%d").to_string()).collect()
    }

    pub fn values(&self) -> Vec<Decimal> {
        self.points.iter().map(|point| point.value).collect()
    }
}

/// Fits the forecaster to the series and predicts the historical dates plus
/// `horizon` consecutive days after the last one.
///
/// # Errors
/// Any fit or predict failure from the forecaster is returned unchanged, as
/// is a prediction count that does not match the requested dates.
pub fn run_forecast(forecaster: &dyn Forecaster, series: &Series, request: &ForecastRequest) -> Result<ForecastResult, ForecastError> {
    let last = series.last_date();
    let mut dates = series.dates();

    for day in 1..=u64::from(request.horizon) {
        let date = last.checked_add_days(Days::new(day))
            .ok_or(ForecastError::DateOutOfRange { last, horizon: request.horizon })?;
        dates.push(date);
    }

    let model = forecaster.fit(series, &request.options)?;
    let predictions = model.predict(&dates)?;

    if predictions.len() != dates.len() {
        return Err(ForecastError::PredictionLength {
            expected: dates.len(),
            actual: predictions.len()
        });
    }

    let skip = match request.window {
        OutputWindow::Full => 0,
        OutputWindow::FutureOnly => series.len()
    };

    let points = dates.into_iter()
        .zip(predictions)
        .skip(skip)
        .map(|(date, prediction)| {
            Decimal::from_f64(prediction)
                .map(|value| ForecastPoint { date, value: value.round_dp(VALUE_DECIMAL_PLACES) })
                .ok_or(ForecastError::NonFinite { date })
        })
        .collect::<Result<Vec<_>, _>>()?;

    debug!("Forecast produced [{}] point(s) from [{}] historical day(s)", points.len(), series.len());

    Ok(ForecastResult { points })
}
