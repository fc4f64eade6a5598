mod errors;
mod forecast_engine;
mod outcome;
#[cfg(test)]
mod tests;

pub use errors::EngineError;
pub use forecast_engine::ForecastEngine;
pub use outcome::{forecast_outcome, ForecastOutcome, INSUFFICIENT_DATA_MESSAGE, UNAVAILABLE_MESSAGE};
