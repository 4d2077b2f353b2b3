//! Renew orchestration: the "refresh everything for this player" pipeline.
//!
//! Account resolution comes first and is fatal on failure. League status and
//! match history then run concurrently; badges are derived once matches are
//! in. Failures of the independent branches are collected per component and
//! returned alongside whatever succeeded, so callers can always render the
//! parts that worked.

use std::fmt::{self, Display};
use std::sync::Arc;

use thiserror::Error;
use tracing::warn;

pub mod account;
pub mod badges;
pub mod history;
pub mod reference;
pub mod status;

pub use account::AccountResolver;
pub use badges::BadgeComputer;
pub use history::{MatchBatch, MatchHistoryFetcher, DETAIL_FETCH_CONCURRENCY, MATCH_FETCH_LIMIT};
pub use reference::{ReferenceDataCache, REFERENCE_DATA_TTL};
pub use status::StatusAggregator;

use rivals_shared::{
    badge::Badge,
    errors::{ApiError, ApiResult},
    now_millis,
    reference::ReferenceDataSet,
    tft_match::{Match, MatchSummary},
    traits::api::{StaticDataApi, TftApiFull},
    Account, LeagueStatus,
};

/// Which part of a combined renew produced an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Component {
    Status,
    MatchHistory,
    /// One match dropped from an otherwise successful history fetch.
    MatchDetail(String),
}

impl Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Component::Status => write!(f, "league status"),
            Component::MatchHistory => write!(f, "match history"),
            Component::MatchDetail(id) => write!(f, "match {}", id),
        }
    }
}

/// A sub-fetch failure inside a combined operation. Never fatal on its own;
/// the surrounding result carries the data that did arrive.
#[derive(Debug, Error)]
#[error("{component} could not be refreshed: {error}")]
pub struct ComponentError {
    pub component: Component,
    #[source]
    pub error: ApiError,
}

/// Combined result of one renew. `errors` empty means everything refreshed.
#[derive(Debug)]
pub struct RenewOutcome {
    pub account: Account,
    pub status: Vec<LeagueStatus>,
    pub matches: Vec<MatchSummary>,
    pub badges: Vec<Badge>,
    pub errors: Vec<ComponentError>,
}

impl RenewOutcome {
    pub fn is_partial(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Top-level entry point the application layer talks to.
///
/// One instance per process, built over the one shared API client (and its
/// rate budget) plus the static-data source. All intermediate state of a
/// `renew` call is local to that call; only the rate budget, the resolver's
/// freshness map and the reference cache are shared.
#[derive(Debug)]
pub struct RenewCoordinator<A, S> {
    resolver: AccountResolver<A>,
    status: StatusAggregator<A>,
    history: MatchHistoryFetcher<A>,
    reference: ReferenceDataCache<S>,
}

impl<A, S> RenewCoordinator<A, S>
where
    A: TftApiFull,
    S: StaticDataApi,
{
    pub fn new(api: Arc<A>, static_source: Arc<S>) -> Self {
        Self::with_reference_ttl(api, static_source, REFERENCE_DATA_TTL)
    }

    pub fn with_reference_ttl(
        api: Arc<A>,
        static_source: Arc<S>,
        reference_ttl: std::time::Duration,
    ) -> Self {
        Self {
            resolver: AccountResolver::new(api.clone()),
            status: StatusAggregator::new(api.clone()),
            history: MatchHistoryFetcher::new(api),
            reference: ReferenceDataCache::with_ttl(static_source, reference_ttl),
        }
    }

    pub async fn resolve_account(&self, game_name: &str, tag_line: &str) -> ApiResult<Account> {
        self.resolver.resolve(game_name, tag_line).await
    }

    pub async fn get_status(&self, account: &Account) -> ApiResult<Vec<LeagueStatus>> {
        self.status.fetch_all(account).await
    }

    pub async fn get_matches(
        &self,
        account: &Account,
        limit: usize,
    ) -> ApiResult<Vec<MatchSummary>> {
        let batch = self.history.fetch_recent(account, limit).await?;
        Ok(summarize(&account.puuid, &batch.matches))
    }

    pub async fn get_badges(&self, account: &Account) -> ApiResult<Vec<Badge>> {
        let batch = self.history.fetch_recent(account, MATCH_FETCH_LIMIT).await?;
        Ok(BadgeComputer::compute(&account.puuid, &batch.matches))
    }

    /// Reference data for display enrichment, served from the process cache.
    pub async fn reference_data(&self) -> ApiResult<Arc<ReferenceDataSet>> {
        self.reference.get().await
    }

    /// Refreshes everything for one riot id.
    ///
    /// Only a failed account resolution aborts the operation. Anything after
    /// that degrades into `errors` entries on the outcome instead.
    pub async fn renew(&self, game_name: &str, tag_line: &str) -> ApiResult<RenewOutcome> {
        let mut account = self.resolver.resolve(game_name, tag_line).await?;

        let (status_result, batch_result) = tokio::join!(
            self.status.fetch_all(&account),
            self.history.fetch_recent(&account, MATCH_FETCH_LIMIT),
        );

        let mut errors = Vec::new();

        let status = match status_result {
            Ok(status) => status,
            Err(error) => {
                warn!("{}: status refresh failed: {}", account.riot_id(), error);
                errors.push(ComponentError {
                    component: Component::Status,
                    error,
                });
                Vec::new()
            }
        };

        let raw_matches: Vec<Match> = match batch_result {
            Ok(batch) => {
                for (id, error) in batch.failed {
                    errors.push(ComponentError {
                        component: Component::MatchDetail(id),
                        error,
                    });
                }
                batch.matches
            }
            Err(error) => {
                warn!("{}: history refresh failed: {}", account.riot_id(), error);
                errors.push(ComponentError {
                    component: Component::MatchHistory,
                    error,
                });
                Vec::new()
            }
        };

        // Badges only depend on the matches that arrived; an empty window
        // still yields the full, inactive badge set.
        let badges = BadgeComputer::compute(&account.puuid, &raw_matches);
        let matches = summarize(&account.puuid, &raw_matches);

        let renewed_at = now_millis();
        self.resolver.mark_renewed(&account.puuid, renewed_at);
        account.last_resolved_at = Some(renewed_at);

        Ok(RenewOutcome {
            account,
            status,
            matches,
            badges,
            errors,
        })
    }
}

fn summarize(puuid: &str, matches: &[Match]) -> Vec<MatchSummary> {
    matches
        .iter()
        .filter_map(|data| match MatchSummary::for_participant(data, puuid) {
            Ok(summary) => Some(summary),
            Err(e) => {
                warn!("match {} skipped: {}", data.metadata.match_id, e);
                None
            }
        })
        .collect()
}
