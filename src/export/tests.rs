use super::{forecast_csv, ExportError, MismatchPolicy};
use anyhow::Result;
use rust_decimal::Decimal;
use std::str::FromStr;

fn labels(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

#[test]
fn test_export_writes_header_and_one_row_per_pair() -> Result<()> {
    let dates = labels(&["2024-01-01", "2024-01-02", "2024-01-03"]);
    let values = vec![Decimal::from_str("12.5")?, Decimal::from_str("-3.10")?, Decimal::from(7)];

    let csv = forecast_csv(&dates, &values, MismatchPolicy::Reject)?;
    let lines: Vec<&str> = csv.lines().collect();

    assert_eq!(lines.len(), dates.len() + 1);
    assert_eq!(lines[0], "Date,Predicted Expense");

    for (index, line) in lines.iter().skip(1).enumerate() {
        let fields: Vec<&str> = line.split(',').collect();
        assert_eq!(fields, vec![dates[index].as_str(), values[index].to_string().as_str()]);
    }

    assert!(csv.ends_with("\r\n"));

    Ok(())
}

#[test]
fn test_export_of_nothing_is_header_only() -> Result<()> {
    let csv = forecast_csv(&[], &[], MismatchPolicy::Reject)?;

    assert_eq!(csv, "Date,Predicted Expense\r\n");

    Ok(())
}

#[test]
fn test_export_rejects_mismatched_lengths_by_default() {
    let result = forecast_csv(&labels(&["2024-01-01", "2024-01-02"]), &[Decimal::from(1)], MismatchPolicy::default());

    assert!(matches!(result, Err(ExportError::LengthMismatch { labels: 2, values: 1 })));
}

#[test]
fn test_export_truncates_mismatched_lengths_when_asked() -> Result<()> {
    let csv = forecast_csv(&labels(&["2024-01-01", "2024-01-02"]), &[Decimal::from(1)], MismatchPolicy::Truncate)?;

    assert_eq!(csv.lines().collect::<Vec<_>>(), vec!["Date,Predicted Expense", "2024-01-01,1"]);

    Ok(())
}
