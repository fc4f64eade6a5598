use std::io::Write;

use clap::ValueEnum;
use csv::{Terminator, WriterBuilder};
use rust_decimal::Decimal;
use tracing::warn;

use crate::export::ExportError;

pub const CSV_HEADER: [&str; 2] = ["Date", "Predicted Expense"];

/// What to do when the dates and values handed to the exporter differ in length.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum MismatchPolicy {
    /// Refuse to export.
    #[default]
    Reject,
    /// Pair entries up to the shorter of the two sequences.
    Truncate
}

/// Writes the forecast as `Date,Predicted Expense` rows, values exactly as given.
pub fn write_forecast_csv<W: Write>(writer: W, labels: &[String], values: &[Decimal], policy: MismatchPolicy) -> Result<(), ExportError> {
    if labels.len() != values.len() {
        match policy {
            MismatchPolicy::Reject => {
                return Err(ExportError::LengthMismatch { labels: labels.len(), values: values.len() });
            }
            MismatchPolicy::Truncate => {
                warn!("Truncating forecast export: [{}] date(s) but [{}] value(s)", labels.len(), values.len());
            }
        }
    }

    let mut output = WriterBuilder::new()
        .terminator(Terminator::CRLF)
        .from_writer(writer);

    output.write_record(CSV_HEADER)?;

    for (label, value) in labels.iter().zip(values) {
        output.write_record([label.as_str(), value.to_string().as_str()])?;
    }

    output.flush()?;

    Ok(())
}

/// Renders the forecast CSV into a string.
pub fn forecast_csv(labels: &[String], values: &[Decimal], policy: MismatchPolicy) -> Result<String, ExportError> {
    let mut buffer = Vec::new();
    write_forecast_csv(&mut buffer, labels, values, policy)?;

    Ok(String::from_utf8(buffer)?)
}
