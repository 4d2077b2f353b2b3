use rivals_shared::{
    badge::{Badge, BadgeType},
    tft_match::{Match, Participant},
};

/// Derives achievement badges from an already-fetched match window.
///
/// Pure: no external calls, no state. Each badge compares the target
/// account against the other participants of the *same* match, then counts
/// how many matches in the window satisfy the predicate.
#[derive(Debug)]
pub struct BadgeComputer;

impl BadgeComputer {
    /// Every badge type is always present in the result, zeroed when the
    /// window is empty or the predicate never fired.
    pub fn compute(puuid: &str, matches: &[Match]) -> Vec<Badge> {
        let mut counts = [0u32; BadgeType::ALL.len()];

        for data in matches {
            let Some(target) = data.participant(puuid) else {
                continue;
            };
            let participants = &data.info.participants;

            if is_lobby_max(participants, target, |p| p.deck_value()) {
                counts[0] += 1;
            }
            if is_lobby_max(participants, target, |p| p.total_damage_to_players) {
                counts[1] += 1;
            }
            if is_lobby_max(participants, target, |p| u32::from(p.players_eliminated)) {
                counts[2] += 1;
            }
            if target.placement == 1 {
                counts[3] += 1;
            }
            if target.placement <= 4 {
                counts[4] += 1;
            }
        }

        BadgeType::ALL
            .iter()
            .zip(counts)
            .map(|(badge_type, count)| Badge::new(*badge_type, count))
            .collect()
    }
}

/// Whether the target holds the lobby maximum for `metric`. Ties count: two
/// boards of equal top value both earn the achievement.
fn is_lobby_max<F>(participants: &[Participant], target: &Participant, metric: F) -> bool
where
    F: Fn(&Participant) -> u32,
{
    let best = participants.iter().map(&metric).max().unwrap_or(0);
    metric(target) >= best
}
