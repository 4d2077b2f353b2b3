use std::{collections::HashMap, sync::Arc, sync::Mutex};

use rivals_shared::{errors::ApiResult, traits::api::AccountApi, Account};

/// Resolves a riot id to a stable [`Account`].
///
/// Display identities are never trusted as keys: players rename, so every
/// lookup goes through the provider and comes back keyed by puuid. The
/// resolver keeps a process-local freshness map so callers can tell a
/// freshly discovered account (`last_resolved_at == None`, dependent data
/// never fetched) from one that has been renewed before.
#[derive(Debug)]
pub struct AccountResolver<A> {
    api: Arc<A>,
    renewed_at: Mutex<HashMap<String, u128>>,
}

impl<A: AccountApi> AccountResolver<A> {
    pub fn new(api: Arc<A>) -> Self {
        Self {
            api,
            renewed_at: Mutex::new(HashMap::new()),
        }
    }

    /// One external call. `NotFound` is a normal outcome here (typo or
    /// nonexistent player), surfaced untouched for the caller to branch on.
    pub async fn resolve(&self, game_name: &str, tag_line: &str) -> ApiResult<Account> {
        let mut account = self
            .api
            .get_account_by_riot_id(game_name.trim(), tag_line.trim())
            .await?;

        account.last_resolved_at = self
            .renewed_at
            .lock()
            .expect("resolver lock poisoned")
            .get(&account.puuid)
            .copied();

        if account.last_resolved_at.is_none() {
            tracing::debug!("{} freshly discovered", account.riot_id());
        }

        Ok(account)
    }

    /// Records a completed renew for `puuid`.
    pub fn mark_renewed(&self, puuid: &str, at: u128) {
        self.renewed_at
            .lock()
            .expect("resolver lock poisoned")
            .insert(puuid.to_string(), at);
    }
}
