use std::sync::Arc;

use rivals_shared::{
    errors::{ApiError, ApiResult},
    traits::api::LeagueApi,
    Account, LeagueStatus,
};

/// Fetches the account's standing in every queue with a single call and
/// partitions the response locally.
///
/// Per-queue calls would triple the rate cost for no extra data; the league
/// endpoint already returns every queue the account has a standing in.
#[derive(Debug)]
pub struct StatusAggregator<A> {
    api: Arc<A>,
}

impl<A: LeagueApi> StatusAggregator<A> {
    pub fn new(api: Arc<A>) -> Self {
        Self { api }
    }

    /// Returns 0 to 3 entries. A queue the player never ranked in simply has
    /// no entry; that is not an error. Entries without a tier (hyper-roll's
    /// rated format, or placement games) are dropped the same way.
    pub async fn fetch_all(&self, account: &Account) -> ApiResult<Vec<LeagueStatus>> {
        let entries = match self.api.get_league_entries(&account.puuid).await {
            Ok(entries) => entries,
            Err(ApiError::NotFound) => Vec::new(),
            Err(e) => return Err(e),
        };

        let total = entries.len();
        let statuses: Vec<LeagueStatus> = entries
            .into_iter()
            .filter_map(LeagueStatus::from_entry)
            .collect();

        if statuses.len() < total {
            tracing::debug!(
                "{}: dropped {} league entries without a usable standing",
                account.riot_id(),
                total - statuses.len()
            );
        }

        Ok(statuses)
    }
}
