mod csv;
mod errors;
#[cfg(test)]
mod tests;

pub use self::csv::{forecast_csv, write_forecast_csv, MismatchPolicy, CSV_HEADER};
pub use errors::ExportError;
