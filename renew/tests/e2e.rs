use std::{
    collections::{HashMap, HashSet},
    sync::atomic::{AtomicUsize, Ordering},
    sync::Arc,
    time::Duration,
};

use async_trait::async_trait;

use rivals_renew::{Component, MatchHistoryFetcher, RenewCoordinator};
use rivals_shared::{
    errors::{ApiError, ApiResult},
    reference::ReferenceDataSet,
    tft_match::{Info, Match, Metadata, Participant},
    traits::api::{
        AccountApi, LeagueApi, MatchApi, RateBudgetView, StaticDataApi, TftApiFull,
    },
    Account, LeagueEntryDto, QueueType,
};

const TARGET: &str = "puuid-target";

fn participant(puuid: &str, placement: u8) -> Participant {
    Participant {
        puuid: puuid.to_string(),
        level: 8,
        placement,
        gold_left: 1,
        last_round: 32,
        players_eliminated: 1,
        total_damage_to_players: 90,
        units: vec![],
        traits: vec![],
        riot_id_game_name: puuid.to_string(),
        riot_id_tagline: "KR1".to_string(),
    }
}

fn sample_match(id: &str, game_creation: u128, target_placement: u8) -> Match {
    let mut participants = vec![participant(TARGET, target_placement)];
    for place in 1..=8u8 {
        if place != target_placement {
            participants.push(participant(&format!("other-{place}"), place));
        }
    }

    Match {
        metadata: Metadata {
            match_id: id.to_string(),
        },
        info: Info {
            participants,
            queue_id: 1100,
            game_creation,
            game_length: 1900.0,
            tft_set_number: 14,
        },
    }
}

fn ranked_entry(queue: &str, tier: Option<&str>) -> LeagueEntryDto {
    LeagueEntryDto {
        queue_type: queue.to_string(),
        tier: tier.map(str::to_string),
        rank: Some("II".to_string()),
        league_points: 54,
        wins: 30,
        losses: 28,
        hot_streak: false,
    }
}

/// Scriptable stand-in for the whole TFT client.
#[derive(Debug, Default)]
struct MockApi {
    leagues: Vec<LeagueEntryDto>,
    fail_status: bool,
    ids: Vec<String>,
    matches: HashMap<String, Match>,
    failing_details: HashSet<String>,
    detail_delays: HashMap<String, Duration>,
    remaining: usize,
    details_served: AtomicUsize,
}

impl MockApi {
    fn with_budget(mut self, remaining: usize) -> Self {
        self.remaining = remaining;
        self
    }

    fn with_window(mut self, matches: Vec<Match>) -> Self {
        // Id list comes back most-recent-first, like the provider's.
        let mut ordered: Vec<&Match> = matches.iter().collect();
        ordered.sort_by(|a, b| b.info.game_creation.cmp(&a.info.game_creation));
        self.ids = ordered
            .into_iter()
            .map(|m| m.metadata.match_id.clone())
            .collect();
        self.matches = matches
            .into_iter()
            .map(|m| (m.metadata.match_id.clone(), m))
            .collect();
        self
    }
}

#[async_trait]
impl AccountApi for MockApi {
    async fn get_account_by_riot_id(&self, game_name: &str, tag_line: &str) -> ApiResult<Account> {
        if game_name == "Missing" {
            return Err(ApiError::NotFound);
        }
        Ok(Account {
            puuid: TARGET.to_string(),
            game_name: game_name.to_string(),
            tag_line: tag_line.to_string(),
            last_resolved_at: None,
        })
    }
}

#[async_trait]
impl LeagueApi for MockApi {
    async fn get_league_entries(&self, _puuid: &str) -> ApiResult<Vec<LeagueEntryDto>> {
        if self.fail_status {
            return Err(ApiError::Upstream(502));
        }
        Ok(self.leagues.clone())
    }
}

#[async_trait]
impl MatchApi for MockApi {
    async fn get_match_ids(&self, _puuid: &str, count: usize) -> ApiResult<Vec<String>> {
        Ok(self.ids.iter().take(count).cloned().collect())
    }

    async fn get_match(&self, match_id: &str) -> ApiResult<Match> {
        self.details_served.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.detail_delays.get(match_id) {
            tokio::time::sleep(*delay).await;
        }
        if self.failing_details.contains(match_id) {
            return Err(ApiError::Upstream(500));
        }
        self.matches
            .get(match_id)
            .cloned()
            .ok_or(ApiError::NotFound)
    }
}

impl RateBudgetView for MockApi {
    fn remaining_calls(&self) -> usize {
        self.remaining
    }
}

impl TftApiFull for MockApi {}

#[derive(Debug, Default)]
struct StaticStub;

#[async_trait]
impl StaticDataApi for StaticStub {
    async fn fetch_reference_data(&self) -> ApiResult<ReferenceDataSet> {
        ReferenceDataSet::from_json_slice(b"{\"items\": [], \"sets\": {}}", 1).map_err(ApiError::Serde)
    }
}

fn coordinator(api: MockApi) -> RenewCoordinator<MockApi, StaticStub> {
    RenewCoordinator::new(Arc::new(api), Arc::new(StaticStub))
}

fn window(count: usize) -> Vec<Match> {
    (1..=count)
        .map(|i| {
            sample_match(
                &format!("KR_{i:02}"),
                1_700_000_000_000 + (i as u128) * 1_000,
                if i % 2 == 0 { 1 } else { 6 },
            )
        })
        .collect()
}

#[tokio::test]
async fn scenario_a_fresh_discovery_then_renew_stamps_freshness() {
    let coordinator = coordinator(MockApi::default().with_budget(100).with_window(window(3)));

    let account = coordinator
        .resolve_account("Hide on bush", "KR1")
        .await
        .unwrap();
    assert_eq!(account.last_resolved_at, None);

    let outcome = coordinator.renew("Hide on bush", "KR1").await.unwrap();
    let stamp = outcome.account.last_resolved_at;
    assert!(stamp.is_some());

    // A later lookup sees the stamp from the renew, until the next renew.
    let again = coordinator
        .resolve_account("Hide on bush", "KR1")
        .await
        .unwrap();
    assert_eq!(again.last_resolved_at, stamp);
}

#[tokio::test]
async fn account_resolution_failure_is_fatal() {
    let coordinator = coordinator(MockApi::default().with_budget(100));

    let result = coordinator.renew("Missing", "KR1").await;
    assert!(matches!(result, Err(ApiError::NotFound)));
}

#[tokio::test]
async fn p2_status_is_partitioned_not_padded() {
    let api = MockApi {
        leagues: vec![
            ranked_entry("RANKED_TFT", Some("DIAMOND")),
            ranked_entry("RANKED_TFT_DOUBLE_UP", Some("GOLD")),
            // Hyper-roll entry without a tier: unranked, must be dropped.
            ranked_entry("RANKED_TFT_TURBO", None),
        ],
        ..MockApi::default()
    }
    .with_budget(100);
    let coordinator = coordinator(api);

    let account = coordinator.resolve_account("Hide on bush", "KR1").await.unwrap();
    let status = coordinator.get_status(&account).await.unwrap();

    assert_eq!(status.len(), 2);
    assert!(status.iter().any(|s| s.queue_type == QueueType::Ranked));
    assert!(status.iter().any(|s| s.queue_type == QueueType::DoubleUp));
    // The third queue is absent, not zero-filled.
    assert!(!status.iter().any(|s| s.queue_type == QueueType::HyperRoll));
}

#[tokio::test]
async fn p3_ordering_is_stable_across_completion_orders() {
    let mut api = MockApi::default().with_budget(100).with_window(window(6));
    // Make the newest matches resolve last.
    api.detail_delays
        .insert("KR_06".to_string(), Duration::from_millis(40));
    api.detail_delays
        .insert("KR_05".to_string(), Duration::from_millis(25));
    let api = Arc::new(api);
    let fetcher = MatchHistoryFetcher::new(api.clone());

    let account = Account {
        puuid: TARGET.to_string(),
        game_name: "Hide on bush".to_string(),
        tag_line: "KR1".to_string(),
        last_resolved_at: None,
    };

    let first = fetcher.fetch_recent(&account, 20).await.unwrap();
    let second = fetcher.fetch_recent(&account, 20).await.unwrap();

    let order: Vec<&str> = first
        .matches
        .iter()
        .map(|m| m.metadata.match_id.as_str())
        .collect();
    assert_eq!(order, vec!["KR_06", "KR_05", "KR_04", "KR_03", "KR_02", "KR_01"]);
    assert!(first
        .matches
        .windows(2)
        .all(|w| w[0].info.game_creation >= w[1].info.game_creation));

    let order_again: Vec<&str> = second
        .matches
        .iter()
        .map(|m| m.metadata.match_id.as_str())
        .collect();
    assert_eq!(order, order_again);
}

#[tokio::test]
async fn scenario_b_one_bad_match_costs_one_entry() {
    let mut api = MockApi::default().with_budget(100).with_window(window(20));
    api.failing_details.insert("KR_15".to_string());
    let coordinator = coordinator(api);

    let outcome = coordinator.renew("Hide on bush", "KR1").await.unwrap();

    assert_eq!(outcome.matches.len(), 19);
    assert!(outcome
        .matches
        .iter()
        .all(|m| m.match_id != "KR_15"));
    assert!(outcome
        .matches
        .windows(2)
        .all(|w| w[0].game_creation >= w[1].game_creation));

    assert!(outcome.is_partial());
    assert!(outcome.errors.iter().any(|e| matches!(
        &e.component,
        Component::MatchDetail(id) if id == "KR_15"
    )));

    // Badges still cover the 19 matches that arrived.
    assert_eq!(outcome.badges.len(), 5);
}

#[tokio::test]
async fn p6_status_failure_still_returns_matches() {
    let api = MockApi {
        fail_status: true,
        ..MockApi::default()
    }
    .with_budget(100)
    .with_window(window(4));
    let coordinator = coordinator(api);

    let outcome = coordinator.renew("Hide on bush", "KR1").await.unwrap();

    assert_eq!(outcome.matches.len(), 4);
    assert!(outcome.status.is_empty());
    assert!(outcome.is_partial());
    assert!(outcome
        .errors
        .iter()
        .any(|e| e.component == Component::Status));
}

#[tokio::test]
async fn match_batch_refuses_to_start_on_a_thin_budget() {
    let api = MockApi::default().with_budget(5).with_window(window(20));
    let api = Arc::new(api);
    let fetcher = MatchHistoryFetcher::new(api.clone());

    let account = Account {
        puuid: TARGET.to_string(),
        game_name: "Hide on bush".to_string(),
        tag_line: "KR1".to_string(),
        last_resolved_at: None,
    };

    let result = fetcher.fetch_recent(&account, 20).await;
    assert!(matches!(
        result,
        Err(ApiError::BudgetTooLow {
            needed: 20,
            available: 5
        })
    ));
    // Refusal happened before any detail call was issued.
    assert_eq!(api.details_served.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn badges_reflect_the_fetched_window() {
    // 10 matches, wins in the even ones (5 firsts, 5 sixths).
    let coordinator = coordinator(MockApi::default().with_budget(100).with_window(window(10)));

    let account = coordinator.resolve_account("Hide on bush", "KR1").await.unwrap();
    let badges = coordinator.get_badges(&account).await.unwrap();

    let first = badges
        .iter()
        .find(|b| b.badge_type == rivals_shared::badge::BadgeType::FirstPlace)
        .unwrap();
    assert_eq!(first.current_count, 5);
    assert!(first.is_active);
}
