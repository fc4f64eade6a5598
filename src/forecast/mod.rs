mod errors;
mod forecaster;
mod runner;
mod trend;

pub use errors::ForecastError;
pub use forecaster::{FittedModel, Forecaster, ModelOptions};
pub use runner::{run_forecast, ForecastRequest, ForecastResult, OutputWindow};
pub use trend::TrendForecaster;
