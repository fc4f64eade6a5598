mod session_cache;

use rust_decimal::Decimal;

pub use session_cache::SessionCache;

/// The last standalone forecast of a session, as two parallel sequences.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CachedForecast {
    pub labels: Vec<String>,
    pub values: Vec<Decimal>
}

impl CachedForecast {
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty() && self.values.is_empty()
    }
}

/// Session-scoped key-value store for computed forecasts.
pub trait ForecastStore: Send + Sync + 'static {
    /// Replaces whatever the session held before.
    fn store(&self, session_id: &str, labels: Vec<String>, values: Vec<Decimal>);
    /// Returns empty sequences when the session has nothing stored.
    fn retrieve(&self, session_id: &str) -> CachedForecast;
}
