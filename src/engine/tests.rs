use super::{forecast_outcome, ForecastEngine, ForecastOutcome, EngineError, INSUFFICIENT_DATA_MESSAGE, UNAVAILABLE_MESSAGE};

use anyhow::{anyhow, bail, Result};
use chrono::{Duration, NaiveDate};
use rust_decimal::Decimal;
use std::io::Write;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration as StdDuration;

use tempfile::NamedTempFile;

use crate::config::ForecastSettings;
use crate::forecast::{FittedModel, ForecastError, Forecaster, ModelOptions, TrendForecaster};
use crate::models::{CategoryDraft, TransactionDraft, TransactionKind};
use crate::series::{RawRecord, Series};
use crate::session::{ForecastStore, SessionCache};
use crate::storage::{MemoryStorage, Storage};
use crate::types::Amount;

#[derive(Default)]
struct CountingForecaster {
    fits: AtomicUsize
}

struct FlatModel;

impl Forecaster for CountingForecaster {
    fn fit(&self, _series: &Series, _options: &ModelOptions) -> Result<Box<dyn FittedModel>, ForecastError> {
        self.fits.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(FlatModel))
    }
}

impl FittedModel for FlatModel {
    fn predict(&self, dates: &[NaiveDate]) -> Result<Vec<f64>, ForecastError> {
        Ok(vec![42.0; dates.len()])
    }
}

struct BrokenForecaster;

impl Forecaster for BrokenForecaster {
    fn fit(&self, _series: &Series, _options: &ModelOptions) -> Result<Box<dyn FittedModel>, ForecastError> {
        Err(ForecastError::Degenerate("singular matrix".to_string()))
    }
}

fn date(value: &str) -> Result<NaiveDate> {
    Ok(NaiveDate::from_str(value)?)
}

fn create_temporary_dataset(rows: &[(&str, &str, &str)]) -> Result<NamedTempFile> {
    let mut file = NamedTempFile::new()?;

    writeln!(file, "Date,Category,Amount,Income/Expense")?;

    for (on, amount, kind) in rows {
        writeln!(file, "{on},Food,{amount},{kind}")?;
    }

    Ok(file)
}

fn create_engine(storage: Arc<MemoryStorage>, forecaster: Arc<dyn Forecaster>, dataset: PathBuf) -> (ForecastEngine, Arc<SessionCache>) {
    let sessions = Arc::new(SessionCache::new(64, StdDuration::from_secs(60)));
    let engine = ForecastEngine::new(storage, forecaster, sessions.clone(), ForecastSettings::default(), dataset);

    (engine, sessions)
}

fn seed_expenses(storage: &MemoryStorage, user_id: u64, days: &[(&str, &str)]) -> Result<()> {
    let category = storage.create_category(user_id, CategoryDraft::new("Food", TransactionKind::Expense))?;

    for (on, amount) in days {
        storage.create_transaction(user_id, TransactionKind::Expense, TransactionDraft::new(Amount::from_str(amount)?, date(on)?, category.id, ""))?;
    }

    Ok(())
}

#[tokio::test]
async fn test_dashboard_forecast_returns_history_plus_seven_days() -> Result<()> {
    let storage = Arc::new(MemoryStorage::new());
    seed_expenses(&storage, 1, &[("2024-01-01", "10"), ("2024-01-01", "5"), ("2024-01-02", "20"), ("2024-01-04", "8")])?;
    let (engine, _) = create_engine(storage, Arc::new(TrendForecaster::new()), PathBuf::from("unused.csv"));

    let outcome = engine.dashboard_forecast(1).await?;

    let Some(result) = outcome.result() else {
        bail!("expected a forecast, got {outcome:?}");
    };

    assert_eq!(result.len(), 3 + 7);
    assert_eq!(result.labels().first().map(String::as_str), Some("2024-01-01"));
    assert_eq!(result.labels().last().map(String::as_str), Some("2024-01-11"));

    Ok(())
}

#[tokio::test]
async fn test_dashboard_forecast_only_sees_the_users_own_expenses() -> Result<()> {
    let storage = Arc::new(MemoryStorage::new());
    seed_expenses(&storage, 1, &[("2024-01-01", "10")])?;
    seed_expenses(&storage, 2, &[("2024-01-02", "10"), ("2024-01-03", "10")])?;
    let forecaster = Arc::new(CountingForecaster::default());
    let (engine, _) = create_engine(storage, forecaster.clone(), PathBuf::from("unused.csv"));

    let outcome = engine.dashboard_forecast(1).await?;

    assert_eq!(outcome, ForecastOutcome::InsufficientData { distinct_days: 1 });
    assert_eq!(outcome.message(), Some(INSUFFICIENT_DATA_MESSAGE));
    assert_eq!(forecaster.fits.load(Ordering::SeqCst), 0);

    Ok(())
}

#[tokio::test]
async fn test_standalone_forecast_caches_thirty_day_tail_for_session() -> Result<()> {
    let dataset = create_temporary_dataset(&[
        ("3/1/2022 10:00 - 3/1/2022 11:00", "100", "Expense"),
        ("3/2/2022 09:00", "50", "Expense"),
        ("3/2/2022 12:00", "25", "Expense"),
        ("3/3/2022 12:00", "5000", "Income"),
    ])?;
    let forecaster = Arc::new(CountingForecaster::default());
    let (engine, sessions) = create_engine(Arc::new(MemoryStorage::new()), forecaster.clone(), dataset.path().to_path_buf());

    let outcome = engine.standalone_forecast("session-a").await?;
    let result = outcome.result().cloned().unwrap_or_default();

    assert_eq!(result.len(), 30);
    assert_eq!(result.labels().first().map(String::as_str), Some("2022-03-03"));
    assert_eq!(forecaster.fits.load(Ordering::SeqCst), 1);

    let cached = sessions.retrieve("session-a");
    assert_eq!(cached.labels, result.labels());
    assert_eq!(cached.values, result.values());
    assert!(sessions.retrieve("session-b").is_empty());

    Ok(())
}

#[tokio::test]
async fn test_export_round_trips_the_cached_forecast() -> Result<()> {
    let dataset = create_temporary_dataset(&[("2024-05-01", "10", "Expense"), ("2024-05-02", "12", "Expense")])?;
    let (engine, _) = create_engine(Arc::new(MemoryStorage::new()), Arc::new(TrendForecaster::new()), dataset.path().to_path_buf());

    let outcome = engine.standalone_forecast("s").await?;
    let result = outcome.result().cloned().unwrap_or_default();
    let csv = engine.export_csv(Some("s"))?;
    let lines: Vec<&str> = csv.lines().collect();

    assert_eq!(lines.len(), result.len() + 1);
    assert_eq!(lines[0], "Date,Predicted Expense");

    for (index, point) in result.points().iter().enumerate() {
        assert_eq!(lines[index + 1], format!("{},{}", point.date, point.value));
    }

    Ok(())
}

#[tokio::test]
async fn test_export_before_any_forecast_is_header_only() -> Result<()> {
    let (engine, _) = create_engine(Arc::new(MemoryStorage::new()), Arc::new(TrendForecaster::new()), PathBuf::from("unused.csv"));

    assert_eq!(engine.export_csv(Some("fresh"))?.lines().collect::<Vec<_>>(), vec!["Date,Predicted Expense"]);
    assert_eq!(engine.export_csv(None)?.lines().count(), 1);

    Ok(())
}

#[tokio::test]
async fn test_insufficient_dataset_keeps_previous_cached_forecast() -> Result<()> {
    let good = create_temporary_dataset(&[("2024-05-01", "10", "Expense"), ("2024-05-02", "12", "Expense")])?;
    let storage = Arc::new(MemoryStorage::new());
    let sessions = Arc::new(SessionCache::new(8, StdDuration::from_secs(60)));
    let first = ForecastEngine::new(storage.clone(), Arc::new(TrendForecaster::new()), sessions.clone(), ForecastSettings::default(), good.path().to_path_buf());
    first.standalone_forecast("s").await?;

    let sparse = create_temporary_dataset(&[("2024-05-01", "10", "Expense")])?;
    let second = ForecastEngine::new(storage, Arc::new(TrendForecaster::new()), sessions.clone(), ForecastSettings::default(), sparse.path().to_path_buf());
    let outcome = second.standalone_forecast("s").await?;

    assert!(matches!(outcome, ForecastOutcome::InsufficientData { distinct_days: 1 }));
    assert_eq!(sessions.retrieve("s").labels.len(), 30);

    Ok(())
}

#[tokio::test]
async fn test_fit_failure_becomes_unavailable_message() -> Result<()> {
    let storage = Arc::new(MemoryStorage::new());
    seed_expenses(&storage, 1, &[("2024-01-01", "10"), ("2024-01-02", "20")])?;
    let (engine, _) = create_engine(storage, Arc::new(BrokenForecaster), PathBuf::from("unused.csv"));

    let outcome = engine.dashboard_forecast(1).await?;

    assert!(matches!(outcome, ForecastOutcome::Unavailable { .. }));
    assert_eq!(outcome.message(), Some(UNAVAILABLE_MESSAGE));

    Ok(())
}

#[tokio::test]
async fn test_expenses_at_the_end_of_the_calendar_become_unavailable() -> Result<()> {
    let storage = Arc::new(MemoryStorage::new());
    let category = storage.create_category(1, CategoryDraft::new("Food", TransactionKind::Expense))?;
    let before_last = NaiveDate::MAX.pred_opt().ok_or_else(|| anyhow!("no day before the last date"))?;

    for on in [before_last, NaiveDate::MAX] {
        storage.create_transaction(1, TransactionKind::Expense, TransactionDraft::new(Amount::from_str("10")?, on, category.id, ""))?;
    }

    let (engine, _) = create_engine(storage, Arc::new(TrendForecaster::new()), PathBuf::from("unused.csv"));
    let outcome = engine.dashboard_forecast(1).await?;

    assert!(matches!(outcome, ForecastOutcome::Unavailable { .. }));
    assert_eq!(outcome.message(), Some(UNAVAILABLE_MESSAGE));

    Ok(())
}

#[tokio::test]
async fn test_missing_dataset_is_an_ingestion_error() -> Result<()> {
    let (engine, sessions) = create_engine(Arc::new(MemoryStorage::new()), Arc::new(TrendForecaster::new()), PathBuf::from("missing_dataset.csv"));

    let result = engine.standalone_forecast("s").await;

    assert!(matches!(result, Err(EngineError::Ingestion(_))));
    assert!(sessions.retrieve("s").is_empty());

    Ok(())
}

#[test]
fn test_summary_reports_totals_and_recent_entries() -> Result<()> {
    let storage = Arc::new(MemoryStorage::new());
    let salary = storage.create_category(1, CategoryDraft::new("Salary", TransactionKind::Income))?;
    storage.create_transaction(1, TransactionKind::Income, TransactionDraft::new(Amount::from_str("100")?, date("2024-03-01")?, salary.id, ""))?;
    storage.create_transaction(1, TransactionKind::Income, TransactionDraft::new(Amount::from_str("50")?, date("2023-12-01")?, salary.id, "old"))?;

    let today = date("2024-03-20")?;
    let expenses: Vec<(String, &str)> = (0..7).map(|day| ((today - Duration::days(day)).to_string(), "30")).collect();
    let expense_days: Vec<(&str, &str)> = expenses.iter().map(|(on, amount)| (on.as_str(), *amount)).collect();
    seed_expenses(&storage, 1, &expense_days)?;

    let (engine, _) = create_engine(storage, Arc::new(TrendForecaster::new()), PathBuf::from("unused.csv"));
    let summary = engine.summary(1, today);

    assert_eq!(summary.total_income, Decimal::from(150));
    assert_eq!(summary.total_expense, Decimal::from(210));
    assert!(summary.balance_pos.is_zero());
    assert_eq!(summary.balance_neg, Decimal::from(60));
    assert_eq!(summary.recent_incomes.len(), 1);
    assert_eq!(summary.recent_expenses.len(), 5);
    assert_eq!(summary.recent_expenses[0].date, today);

    let totals = engine.totals(1);
    assert_eq!(totals.balance, Decimal::from(-60));

    Ok(())
}

#[test]
fn test_forecast_outcome_is_usable_without_the_engine() -> Result<()> {
    let records = vec![RawRecord::new("2024-01-01", "1"), RawRecord::new("2024-01-02", "2")];
    let settings = ForecastSettings::default();

    let outcome = forecast_outcome(&TrendForecaster::new(), &records, &settings.report_request());

    assert_eq!(outcome.result().map(|result| result.len()), Some(30));
    assert_eq!(outcome.message(), None);

    Ok(())
}
