use std::{env, time::Duration};

use rivals_shared::Region;

use crate::error::AppError;

#[derive(Debug, Clone)]
pub struct Config {
    pub riot_api_key: String,
    pub region: Region,
    pub reference_locale: String,
    pub reference_ttl: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        const DEFAULT_REGION: &str = "KR";
        const DEFAULT_REFERENCE_LOCALE: &str = "en_us";
        const DEFAULT_REFERENCE_TTL_SECS: u64 = 24 * 60 * 60;

        let riot_api_key = env::var("RIOT_API_KEY")
            .map_err(|_| AppError::Config("RIOT_API_KEY must be set".into()))?;

        let region = env::var("RIOT_REGION").unwrap_or_else(|_| DEFAULT_REGION.into());
        let region = Region::try_from(region).map_err(AppError::InvalidRegion)?;

        let reference_locale =
            env::var("REFERENCE_LOCALE").unwrap_or_else(|_| DEFAULT_REFERENCE_LOCALE.into());

        let reference_ttl_secs = env::var("REFERENCE_TTL_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_REFERENCE_TTL_SECS);

        Ok(Self {
            riot_api_key,
            region,
            reference_locale,
            reference_ttl: Duration::from_secs(reference_ttl_secs),
        })
    }
}
