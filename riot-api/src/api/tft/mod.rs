use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;

use rivals_shared::{
    errors::{ApiError, ApiResult},
    tft_match::Match,
    traits::api::{AccountApi, ApiRequest, LeagueApi, MatchApi, RateBudgetView, TftApiFull},
    Account, LeagueEntryDto, Region,
};

use super::{client::ApiClientBase, limit::RateBudget};

/// High level client implementing all TFT related APIs used by the core.
///
/// League standings go through the platform host of the configured region,
/// account resolution and match data through its continental host.
#[derive(Debug)]
pub struct TftApiClient {
    base: ApiClientBase,
    platform_base: String,
    regional_base: String,
}

impl TftApiClient {
    /// Create a new API client using the provided key, routed for `region`,
    /// with its own freshly constructed rate budget.
    pub fn new(api_key: String, region: Region) -> Self {
        Self::with_endpoints(
            api_key,
            format!("https://{}", region.to_endpoint()),
            format!("https://{}", region.to_global_endpoint()),
            Arc::new(RateBudget::new()),
        )
    }

    /// Create a client against explicit endpoint bases and an externally
    /// owned budget. Tests aim this at a local mock server; production code
    /// uses it to share one budget across clients.
    pub fn with_endpoints(
        api_key: String,
        platform_base: String,
        regional_base: String,
        budget: Arc<RateBudget>,
    ) -> Self {
        Self {
            base: ApiClientBase::with_budget(api_key, budget),
            platform_base,
            regional_base,
        }
    }

    /// Spawn a task logging periodic metrics about requests.
    pub fn start_metrics_logging(&self) {
        let metrics = self.base.metrics.clone();
        tokio::spawn(async move { metrics.log_loop().await });
    }
}

#[async_trait]
impl ApiRequest for TftApiClient {
    async fn request(&self, path: String) -> ApiResult<Bytes> {
        self.base.request(path).await
    }
}

#[async_trait]
impl AccountApi for TftApiClient {
    async fn get_account_by_riot_id(
        &self,
        game_name: &str,
        tag_line: &str,
    ) -> ApiResult<Account> {
        self.base
            .get_account_by_riot_id(&self.regional_base, game_name, tag_line)
            .await
    }
}

#[async_trait]
impl LeagueApi for TftApiClient {
    async fn get_league_entries(&self, puuid: &str) -> ApiResult<Vec<LeagueEntryDto>> {
        tracing::trace!("[TFT-LEAGUE-V1 API] get_league_entries {puuid}");

        let path = format!("{}/tft/league/v1/by-puuid/{}", self.platform_base, puuid);

        let raw = self.request(path).await?;
        serde_json::from_slice(&raw).map_err(ApiError::Serde)
    }
}

#[async_trait]
impl MatchApi for TftApiClient {
    async fn get_match_ids(&self, puuid: &str, count: usize) -> ApiResult<Vec<String>> {
        tracing::trace!("[TFT-MATCH-V1 API] get_match_ids {puuid} (count {count})");

        let path = format!(
            "{}/tft/match/v1/matches/by-puuid/{}/ids?start=0&count={}",
            self.regional_base, puuid, count
        );

        let raw = self.request(path).await?;
        serde_json::from_slice(&raw).map_err(ApiError::Serde)
    }

    async fn get_match(&self, match_id: &str) -> ApiResult<Match> {
        tracing::trace!("[TFT-MATCH-V1 API] get_match {match_id}");

        let path = format!("{}/tft/match/v1/matches/{}", self.regional_base, match_id);

        let raw = self.request(path).await?;
        serde_json::from_slice(&raw).map_err(ApiError::Serde)
    }
}

impl RateBudgetView for TftApiClient {
    fn remaining_calls(&self) -> usize {
        self.base.budget().remaining()
    }
}

impl TftApiFull for TftApiClient {}
