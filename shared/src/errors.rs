use std::time::Duration;

use thiserror::Error;

/// Outcome taxonomy for a single call to the Riot API.
///
/// `NotFound` and `RateLimitExceeded` are expected operational outcomes and
/// are handled by callers, not logged as systemic errors.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("no matching data on the Riot API")]
    NotFound,

    #[error("local rate budget exhausted, retry in {0:?}")]
    RateLimitExceeded(Duration),

    /// A batch needed more budget than the windows can currently admit.
    /// Raised before any call of the batch is issued.
    #[error("rate budget too low for batch: {needed} calls needed, {available} available")]
    BudgetTooLow { needed: usize, available: usize },

    /// The provider answered with 429 or a server error. Recoverable by the
    /// caller retrying later; never retried internally.
    #[error("Riot API unavailable (status {0})")]
    Upstream(u16),

    #[error("unexpected Riot API status: {0}")]
    Status(reqwest::StatusCode),

    #[error("Reqwest error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Decoding raw response error: {0}")]
    Serde(serde_json::Error),
}

impl ApiError {
    /// True for outcomes that mean "no data", not "something broke".
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound)
    }
}

/// A call to the Riot API either succeeds with the typed payload or fails
/// with an [`ApiError`].
pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum MatchError {
    #[error("The requested account puuid is not part of the match")]
    PuuidNotInMatch,
}
