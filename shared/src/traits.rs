//! Seam traits between the orchestration layer and the HTTP client, so every
//! orchestrator component can be driven by an in-process mock in tests.

pub mod api {
    use std::fmt::Debug;

    use async_trait::async_trait;
    use bytes::Bytes;

    use crate::{
        errors::ApiResult, reference::ReferenceDataSet, tft_match::Match, Account, LeagueEntryDto,
    };

    /// Trait implemented by structures capable of performing raw HTTP
    /// requests to the Riot API.
    #[async_trait]
    pub trait ApiRequest: Send + Sync + Debug {
        async fn request(&self, path: String) -> ApiResult<Bytes>;
    }

    /// Riot Account-V1 API.
    #[async_trait]
    pub trait AccountApi: Send + Sync + Debug {
        async fn get_account_by_riot_id(
            &self,
            game_name: &str,
            tag_line: &str,
        ) -> ApiResult<Account>;
    }

    /// TFT League-V1 API. One call returns the standings for every queue.
    #[async_trait]
    pub trait LeagueApi: Send + Sync + Debug {
        async fn get_league_entries(&self, puuid: &str) -> ApiResult<Vec<LeagueEntryDto>>;
    }

    /// TFT Match-V1 API.
    #[async_trait]
    pub trait MatchApi: Send + Sync + Debug {
        async fn get_match_ids(&self, puuid: &str, count: usize) -> ApiResult<Vec<String>>;

        async fn get_match(&self, match_id: &str) -> ApiResult<Match>;
    }

    /// Source of the slow-changing TFT static data bundle.
    #[async_trait]
    pub trait StaticDataApi: Send + Sync + Debug {
        async fn fetch_reference_data(&self) -> ApiResult<ReferenceDataSet>;
    }

    /// View onto the client's shared rate budget, for callers that must size
    /// a batch of calls before issuing it.
    pub trait RateBudgetView: Send + Sync {
        /// How many calls both sliding windows can currently admit.
        fn remaining_calls(&self) -> usize;
    }

    /// Everything the renew pipeline needs from one client.
    pub trait TftApiFull: AccountApi + LeagueApi + MatchApi + RateBudgetView {}
}
