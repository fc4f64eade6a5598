use crate::config::ForecastSettings;
use crate::engine::{forecast_outcome, EngineError, ForecastOutcome};
use crate::export::forecast_csv;
use crate::forecast::{ForecastRequest, Forecaster};
use crate::ingestion::read_expense_dataset;
use crate::models::{Summary, Totals, TransactionKind};
use crate::series::SeriesRecord;
use crate::session::ForecastStore;
use crate::storage::{Storage, TransactionFilter};
use crate::types::UserId;
use chrono::{Duration, NaiveDate};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::task::spawn_blocking;
use tracing::info;

const RECENT_WINDOW_DAYS: i64 = 30;
const RECENT_LIMIT: usize = 5;

/// Runs the dashboard and standalone forecast flows against injected
/// storage, forecaster and session store.
pub struct ForecastEngine {
    storage: Arc<dyn Storage>,
    forecaster: Arc<dyn Forecaster>,
    sessions: Arc<dyn ForecastStore>,
    settings: ForecastSettings,
    dataset: PathBuf
}

impl ForecastEngine {
    pub fn new(storage: Arc<dyn Storage>, forecaster: Arc<dyn Forecaster>, sessions: Arc<dyn ForecastStore>, settings: ForecastSettings, dataset: PathBuf) -> Self {
        Self {
            storage,
            forecaster,
            sessions,
            settings,
            dataset
        }
    }

    pub fn totals(&self, user_id: UserId) -> Totals {
        Totals::new(
            self.storage.total(user_id, TransactionKind::Income),
            self.storage.total(user_id, TransactionKind::Expense)
        )
    }

    /// Totals plus the five newest incomes and expenses of the last 30 days.
    pub fn summary(&self, user_id: UserId, today: NaiveDate) -> Summary {
        let since = today - Duration::days(RECENT_WINDOW_DAYS);
        let recent = |kind| {
            let filter = TransactionFilter::of_kind(kind)
                .since(since)
                .newest_first()
                .limit(RECENT_LIMIT);
            self.storage.transactions(user_id, &filter)
        };

        Summary::new(self.totals(user_id), recent(TransactionKind::Income), recent(TransactionKind::Expense))
    }

    /// Forecasts the user's own expenses: back-fitted history plus the dashboard horizon.
    pub async fn dashboard_forecast(&self, user_id: UserId) -> Result<ForecastOutcome, EngineError> {
        let expenses = self.storage.transactions(user_id, &TransactionFilter::of_kind(TransactionKind::Expense));

        info!("Dashboard forecast for user [{user_id}] over [{}] expense(s)", expenses.len());

        self.forecast(expenses, self.settings.dashboard_request()).await
    }

    /// Forecasts the dataset file's expenses and caches the future tail for the session.
    ///
    /// The cache is only written when a forecast was actually produced; an
    /// earlier result stays exportable otherwise.
    pub async fn standalone_forecast(&self, session_id: &str) -> Result<ForecastOutcome, EngineError> {
        let path = self.dataset.clone();
        let records = spawn_blocking(move || read_expense_dataset(&path)).await??;

        info!("Standalone forecast for session [{session_id}] over [{}] dataset row(s)", records.len());

        let outcome = self.forecast(records, self.settings.report_request()).await?;

        if let Some(result) = outcome.result() {
            self.sessions.store(session_id, result.labels(), result.values());
        }

        Ok(outcome)
    }

    /// Renders the session's cached forecast as CSV; header only when nothing is cached.
    pub fn export_csv(&self, session_id: Option<&str>) -> Result<String, EngineError> {
        let cached = session_id
            .map(|session_id| self.sessions.retrieve(session_id))
            .unwrap_or_default();

        Ok(forecast_csv(&cached.labels, &cached.values, self.settings.export_mismatch)?)
    }

    async fn forecast<R>(&self, records: Vec<R>, request: ForecastRequest) -> Result<ForecastOutcome, EngineError>
    where
        R: SeriesRecord + Send + 'static
    {
        let forecaster = self.forecaster.clone();
        let outcome = spawn_blocking(move || forecast_outcome(forecaster.as_ref(), &records, &request)).await?;

        Ok(outcome)
    }
}
