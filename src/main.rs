use std::{env, process, sync::Arc};

use tracing::{info, warn};

use rivals_renew::RenewCoordinator;
use rivals_riot_api::{CDragonClient, RateBudget, TftApiClient};
use rivals_shared::traits::api::{StaticDataApi, TftApiFull};

use crate::{config::Config, error::AppError};

mod config;
mod error;
mod logging;

#[tokio::main]
async fn main() {
    logging::init();

    if let Err(e) = run().await {
        tracing::error!("{e}");
        process::exit(1);
    }
}

async fn run() -> Result<(), AppError> {
    let config = Config::from_env()?;

    let riot_id = env::args().nth(1).ok_or(AppError::Usage)?;
    let (game_name, tag_line) = riot_id.split_once('#').ok_or(AppError::Usage)?;

    // One budget and one client for the whole process; every outbound call
    // shares the same two rate windows.
    let budget = Arc::new(RateBudget::new());
    let api = Arc::new(TftApiClient::with_endpoints(
        config.riot_api_key.clone(),
        format!("https://{}", config.region.to_endpoint()),
        format!("https://{}", config.region.to_global_endpoint()),
        budget,
    ));
    api.start_metrics_logging();

    let static_source = Arc::new(CDragonClient::new(&config.reference_locale));
    let coordinator =
        RenewCoordinator::with_reference_ttl(api, static_source, config.reference_ttl);

    renew_and_report(&coordinator, game_name, tag_line).await
}

async fn renew_and_report<A, S>(
    coordinator: &RenewCoordinator<A, S>,
    game_name: &str,
    tag_line: &str,
) -> Result<(), AppError>
where
    A: TftApiFull,
    S: StaticDataApi,
{
    let outcome = coordinator.renew(game_name, tag_line).await?;
    info!("renewed {}", outcome.account.riot_id());

    for status in &outcome.status {
        info!(
            "[{}] {} {} - {} LP ({}W/{}L){}",
            status.queue_type,
            status.tier,
            status.rank.as_deref().unwrap_or(""),
            status.league_points,
            status.wins,
            status.losses,
            if status.hot_streak { " 🔥" } else { "" },
        );
    }

    // Display names come from the reference cache; the raw ids still render
    // fine if the bundle is unavailable.
    let reference = match coordinator.reference_data().await {
        Ok(data) => Some(data),
        Err(e) => {
            warn!("reference data unavailable, showing raw ids: {e}");
            None
        }
    };

    for summary in &outcome.matches {
        let board: Vec<String> = summary
            .units
            .iter()
            .map(|unit| match &reference {
                Some(data) => data.describe_unit(unit).display_name,
                None => unit.character_id.clone(),
            })
            .collect();
        info!(
            "#{} [{}] lvl {} - {}",
            summary.placement,
            summary.queue_type,
            summary.level,
            board.join(", "),
        );
    }

    for badge in &outcome.badges {
        info!(
            "{} {}/{}{}",
            badge.badge_type,
            badge.current_count,
            badge.required_count,
            if badge.is_active { " ✅" } else { "" },
        );
    }

    for error in &outcome.errors {
        warn!("partial result: {error}");
    }

    Ok(())
}
