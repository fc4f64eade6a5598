use crate::session::{CachedForecast, ForecastStore};
use crate::types::SessionId;
use moka::sync::Cache;
use rust_decimal::Decimal;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Bounded, idle-expiring forecast cache keyed by session id.
pub struct SessionCache {
    cache: Cache<SessionId, Arc<CachedForecast>>
}

impl SessionCache {
    pub fn new(capacity: u64, time_to_idle: Duration) -> Self {
        Self {
            cache: Cache::builder()
                .max_capacity(capacity)
                .time_to_idle(time_to_idle)
                .build()
        }
    }
}

impl ForecastStore for SessionCache {
    fn store(&self, session_id: &str, labels: Vec<String>, values: Vec<Decimal>) {
        debug!("Caching [{}] forecast point(s) for session [{session_id}]", labels.len());
        self.cache.insert(session_id.to_string(), Arc::new(CachedForecast { labels, values }));
    }

    fn retrieve(&self, session_id: &str) -> CachedForecast {
        self.cache.get(session_id)
            .map(|forecast| forecast.as_ref().clone())
            .unwrap_or_default()
    }
}
