use chrono::NaiveDate;

use crate::forecast::ForecastError;
use crate::series::Series;

/// Options understood by every forecaster.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ModelOptions {
    /// Lets the fitted curve follow a repeating pattern across the days of the week.
    pub daily_seasonality: bool
}

/// A forecasting capability: fit a model to a daily series.
pub trait Forecaster: Send + Sync + 'static {
    fn fit(&self, series: &Series, options: &ModelOptions) -> Result<Box<dyn FittedModel>, ForecastError>;
}

/// A fitted model that can produce one value per requested date.
pub trait FittedModel: Send {
    fn predict(&self, dates: &[NaiveDate]) -> Result<Vec<f64>, ForecastError>;
}
