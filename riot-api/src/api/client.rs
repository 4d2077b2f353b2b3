use std::sync::Arc;

use bytes::Bytes;
use reqwest::StatusCode;
use serde::Deserialize;

use rivals_shared::{
    errors::{ApiError, ApiResult},
    Account,
};

use super::{limit::RateBudget, metrics::RequestMetrics};

/// Base client shared by every Riot endpoint wrapper: one reqwest client,
/// the process-wide rate budget, and the API key header.
#[derive(Debug)]
pub struct ApiClientBase {
    client: reqwest::Client,
    budget: Arc<RateBudget>,
    key: String,
    pub metrics: Arc<RequestMetrics>,
}

impl ApiClientBase {
    pub fn new(api_key: String) -> Self {
        Self::with_budget(api_key, Arc::new(RateBudget::new()))
    }

    /// Builds a client on an externally owned budget, so several clients can
    /// share the one per-process quota.
    pub fn with_budget(api_key: String, budget: Arc<RateBudget>) -> Self {
        Self {
            client: reqwest::Client::new(),
            budget,
            key: api_key,
            metrics: RequestMetrics::new("riot"),
        }
    }

    pub fn budget(&self) -> &Arc<RateBudget> {
        &self.budget
    }

    /// Performs one authenticated GET. The rate budget is reserved before
    /// anything leaves the process; a refused reservation surfaces as
    /// [`ApiError::RateLimitExceeded`] without issuing the request.
    pub async fn request(&self, path: String) -> ApiResult<Bytes> {
        if let Err(e) = self.budget.try_reserve() {
            self.metrics.inc_rejected();
            return Err(e);
        }
        self.metrics.inc();

        let res = self
            .client
            .get(&path)
            .header("X-Riot-Token", &self.key)
            .send()
            .await?;

        match res.status() {
            StatusCode::OK => Ok(res.bytes().await?),
            StatusCode::NOT_FOUND => Err(ApiError::NotFound),
            s if s == StatusCode::TOO_MANY_REQUESTS || s.is_server_error() => {
                Err(ApiError::Upstream(s.as_u16()))
            }
            s => Err(ApiError::Status(s)),
        }
    }

    /// Resolves a riot id against the Account-V1 endpoint.
    pub async fn get_account_by_riot_id(
        &self,
        route: &str,
        game_name: &str,
        tag_line: &str,
    ) -> ApiResult<Account> {
        tracing::trace!("[ACCOUNT-V1 API] get_account_by_riot_id {game_name}#{tag_line}");

        let path = format!(
            "{}/riot/account/v1/accounts/by-riot-id/{}/{}",
            route,
            urlencoding::encode(game_name),
            urlencoding::encode(tag_line),
        );

        let raw = self.request(path).await?;
        let dto: AccountDto = serde_json::from_slice(&raw).map_err(ApiError::Serde)?;

        Ok(Account {
            puuid: dto.puuid,
            game_name: dto.game_name.unwrap_or_else(|| game_name.to_string()),
            tag_line: dto.tag_line.unwrap_or_else(|| tag_line.to_string()),
            last_resolved_at: None,
        })
    }
}

/// Representation of the account data response.
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct AccountDto {
    pub puuid: String,
    pub game_name: Option<String>,
    pub tag_line: Option<String>,
}
