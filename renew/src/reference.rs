use std::sync::{Arc, RwLock};
use std::time::Duration;

use tokio::time::Instant;
use tracing::warn;

use rivals_shared::{errors::ApiResult, reference::ReferenceDataSet, traits::api::StaticDataApi};

/// Static data moves once per patch at most; a day is generous.
pub const REFERENCE_DATA_TTL: Duration = Duration::from_secs(24 * 60 * 60);

#[derive(Debug, Clone)]
struct CachedSet {
    data: Arc<ReferenceDataSet>,
    fetched_at: Instant,
}

/// Process-wide, time-boxed cache over the static-data source.
///
/// Lazy: nothing is fetched until the first `get`. Concurrent callers that
/// miss collapse into one underlying fetch (single-flight). Once the TTL
/// elapses the next `get` refreshes; if that refresh fails the stale
/// snapshot keeps serving and the failure is only logged.
#[derive(Debug)]
pub struct ReferenceDataCache<S> {
    source: Arc<S>,
    ttl: Duration,
    state: RwLock<Option<CachedSet>>,
    /// Held across the fetch so only one flight is ever in the air.
    refresh: tokio::sync::Mutex<()>,
}

impl<S: StaticDataApi> ReferenceDataCache<S> {
    pub fn new(source: Arc<S>) -> Self {
        Self::with_ttl(source, REFERENCE_DATA_TTL)
    }

    pub fn with_ttl(source: Arc<S>, ttl: Duration) -> Self {
        Self {
            source,
            ttl,
            state: RwLock::new(None),
            refresh: tokio::sync::Mutex::new(()),
        }
    }

    pub async fn get(&self) -> ApiResult<Arc<ReferenceDataSet>> {
        if let Some(fresh) = self.fresh_snapshot() {
            return Ok(fresh);
        }

        // Single-flight: losers of this race wait here, then find the
        // winner's result fresh on the recheck instead of fetching again.
        let _flight = self.refresh.lock().await;
        if let Some(fresh) = self.fresh_snapshot() {
            return Ok(fresh);
        }

        match self.source.fetch_reference_data().await {
            Ok(data) => {
                let data = Arc::new(data);
                let mut state = self.state.write().expect("reference cache lock poisoned");
                *state = Some(CachedSet {
                    data: data.clone(),
                    fetched_at: Instant::now(),
                });
                Ok(data)
            }
            Err(e) => {
                let stale = self
                    .state
                    .read()
                    .expect("reference cache lock poisoned")
                    .clone();
                match stale {
                    Some(cached) => {
                        warn!("reference data refresh failed, serving stale copy: {}", e);
                        Ok(cached.data)
                    }
                    None => Err(e),
                }
            }
        }
    }

    /// Forces population at startup so the first user request never pays the
    /// fetch.
    pub async fn initialize(&self) -> ApiResult<()> {
        self.get().await.map(|_| ())
    }

    fn fresh_snapshot(&self) -> Option<Arc<ReferenceDataSet>> {
        let state = self.state.read().expect("reference cache lock poisoned");
        state
            .as_ref()
            .filter(|cached| cached.fetched_at.elapsed() < self.ttl)
            .map(|cached| cached.data.clone())
    }
}
