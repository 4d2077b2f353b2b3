use std::sync::Arc;

use futures::{stream, StreamExt};
use tracing::warn;

use rivals_shared::{
    errors::{ApiError, ApiResult},
    tft_match::Match,
    traits::api::{MatchApi, RateBudgetView},
    Account,
};

/// Upper bound on one history window, matching the badge window size.
pub const MATCH_FETCH_LIMIT: usize = 20;

/// How many detail fetches run at once. Small on purpose: the full batch
/// must not land inside a single instant of the 10 second rate window.
pub const DETAIL_FETCH_CONCURRENCY: usize = 4;

/// Fetches the most recent matches for an account: one id-list call, then
/// one detail call per id through a bounded worker pool.
#[derive(Debug)]
pub struct MatchHistoryFetcher<A> {
    api: Arc<A>,
}

/// Result of one history fetch. Individual detail failures are collected
/// here instead of failing the batch; one bad match must not block the
/// other nineteen.
#[derive(Debug, Default)]
pub struct MatchBatch {
    /// Reverse-chronological by game creation.
    pub matches: Vec<Match>,
    pub failed: Vec<(String, ApiError)>,
}

impl<A: MatchApi + RateBudgetView> MatchHistoryFetcher<A> {
    pub fn new(api: Arc<A>) -> Self {
        Self { api }
    }

    /// The detail phase is the dominant rate cost (up to 20 calls), so it is
    /// sized against the budget up front: if the windows cannot admit one
    /// call per id, the whole fetch refuses with [`ApiError::BudgetTooLow`]
    /// before issuing anything, rather than stranding a half-fetched batch.
    pub async fn fetch_recent(&self, account: &Account, limit: usize) -> ApiResult<MatchBatch> {
        let limit = limit.min(MATCH_FETCH_LIMIT);
        let ids = self.api.get_match_ids(&account.puuid, limit).await?;

        if ids.is_empty() {
            return Ok(MatchBatch::default());
        }

        let available = self.api.remaining_calls();
        if ids.len() > available {
            return Err(ApiError::BudgetTooLow {
                needed: ids.len(),
                available,
            });
        }

        let results: Vec<(String, ApiResult<Match>)> = stream::iter(ids)
            .map(|id| {
                let api = self.api.clone();
                async move {
                    let result = api.get_match(&id).await;
                    (id, result)
                }
            })
            .buffer_unordered(DETAIL_FETCH_CONCURRENCY)
            .collect()
            .await;

        let mut batch = MatchBatch::default();
        for (id, result) in results {
            match result {
                Ok(data) => batch.matches.push(data),
                Err(e) => {
                    warn!("match {} dropped from history fetch: {}", id, e);
                    batch.failed.push((id, e));
                }
            }
        }

        // Completion order of the pool is arbitrary; the contract is not.
        batch
            .matches
            .sort_by(|a, b| b.info.game_creation.cmp(&a.info.game_creation));

        Ok(batch)
    }
}
