use csv::{ReaderBuilder, Trim};
use serde::Deserialize;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::{debug, error};

use crate::ingestion::IngestionError;
use crate::series::RawRecord;

const EXPENSE_KIND: &str = "Expense";
const RANGE_SEPARATOR: &str = " - ";

/// A single row of the historical dataset. Unknown columns are ignored.
#[derive(Debug, Deserialize)]
struct DatasetRow {
    /// Either a single date or a `"<start> - <end>"` range.
    #[serde(rename = "Date")]
    date: Option<String>,
    #[serde(rename = "Amount")]
    amount: Option<String>,
    #[serde(rename = "Income/Expense")]
    kind: Option<String>
}

/// Reads the expense rows of the dataset file at `path`.
pub fn read_expense_dataset(path: &Path) -> Result<Vec<RawRecord>, IngestionError> {
    let file = File::open(path).map_err(|source| IngestionError::Open {
        path: path.to_path_buf(),
        source
    })?;

    read_expense_rows(BufReader::new(file))
}

/// Keeps only `Expense` rows and reduces date ranges to their start date.
///
/// Rows that cannot be deserialized are logged and skipped; coercion of the
/// date and amount text is left to the series builder.
pub fn read_expense_rows<R: Read>(reader: R) -> Result<Vec<RawRecord>, IngestionError> {
    let mut reader = ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .from_reader(reader);

    reader.headers()?;

    let mut records = Vec::new();
    let mut skipped = 0usize;

    for result in reader.deserialize::<DatasetRow>() {
        match result {
            Ok(row) if row.kind.as_deref() == Some(EXPENSE_KIND) => {
                records.push(RawRecord {
                    date: row.date.map(|date| start_of_range(&date)),
                    amount: row.amount
                });
            }
            Ok(_) => skipped += 1,
            Err(error) => {
                error!("Dataset deserialization error: {error}");
            }
        }
    }

    debug!("Read [{}] expense row(s), skipped [{skipped}] other row(s)", records.len());

    Ok(records)
}

fn start_of_range(value: &str) -> String {
    value.split(RANGE_SEPARATOR)
        .next()
        .unwrap_or(value)
        .trim()
        .to_string()
}
