use async_trait::async_trait;
use reqwest::StatusCode;

use rivals_shared::{
    errors::{ApiError, ApiResult},
    now_millis,
    reference::ReferenceDataSet,
    traits::api::StaticDataApi,
};

/// Community Dragon client for the TFT static-data bundle.
///
/// The bundle is served from a public CDN, not the rate-limited Riot API, so
/// fetches here do not consume the process rate budget.
#[derive(Debug)]
pub struct CDragonClient {
    client: reqwest::Client,
    url: String,
}

pub const DEFAULT_LOCALE: &str = "en_us";

impl CDragonClient {
    pub fn new(locale: &str) -> Self {
        Self::with_url(format!(
            "https://raw.communitydragon.org/latest/cdragon/tft/{}.json",
            locale
        ))
    }

    pub fn with_url(url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            url,
        }
    }
}

impl Default for CDragonClient {
    fn default() -> Self {
        Self::new(DEFAULT_LOCALE)
    }
}

#[async_trait]
impl StaticDataApi for CDragonClient {
    async fn fetch_reference_data(&self) -> ApiResult<ReferenceDataSet> {
        tracing::debug!("[CDRAGON] fetching static data bundle from {}", self.url);

        let res = self.client.get(&self.url).send().await?;
        match res.status() {
            StatusCode::OK => {
                let raw = res.bytes().await?;
                ReferenceDataSet::from_json_slice(&raw, now_millis()).map_err(ApiError::Serde)
            }
            StatusCode::NOT_FOUND => Err(ApiError::NotFound),
            s if s.is_server_error() => Err(ApiError::Upstream(s.as_u16())),
            s => Err(ApiError::Status(s)),
        }
    }
}
