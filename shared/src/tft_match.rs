use serde::Deserialize;

use crate::{errors::MatchError, QueueType};

/// Representation of the TFT match data response.
#[derive(Deserialize, Debug, Clone)]
pub struct Match {
    pub metadata: Metadata,
    pub info: Info,
}

impl Match {
    pub fn participant(&self, puuid: &str) -> Option<&Participant> {
        self.info.participants.iter().find(|p| p.puuid == puuid)
    }

    pub fn queue_type(&self) -> QueueType {
        self.info.queue_id.into()
    }

    pub fn game_creation(&self) -> u128 {
        self.info.game_creation
    }
}

/// Representation of the match metadata data response.
#[derive(Deserialize, Debug, Clone)]
pub struct Metadata {
    pub match_id: String,
}

/// Representation of the match info data response.
#[derive(Deserialize, Debug, Clone)]
pub struct Info {
    pub participants: Vec<Participant>,
    #[serde(default)]
    pub queue_id: u16,
    #[serde(rename = "game_datetime", alias = "gameCreation")]
    pub game_creation: u128,
    /// Game length in seconds.
    #[serde(rename = "game_length", default)]
    pub game_length: f64,
    #[serde(default)]
    pub tft_set_number: u8,
}

/// Representation of the participant data response.
#[derive(Deserialize, Debug, Clone)]
pub struct Participant {
    pub puuid: String,
    #[serde(default)]
    pub level: u8,
    pub placement: u8,
    #[serde(default)]
    pub gold_left: u16,
    #[serde(default)]
    pub last_round: u16,
    #[serde(default)]
    pub players_eliminated: u8,
    #[serde(default)]
    pub total_damage_to_players: u32,
    #[serde(default)]
    pub units: Vec<Unit>,
    #[serde(default)]
    pub traits: Vec<Trait>,

    #[serde(rename = "riotIdGameName", default)]
    pub riot_id_game_name: String,
    #[serde(rename = "riotIdTagline", default)]
    pub riot_id_tagline: String,
}

impl Participant {
    /// Total gold value of the board: unit base cost scaled by star level
    /// (a 2-star unit is 3 copies, a 3-star unit 9).
    pub fn deck_value(&self) -> u32 {
        self.units.iter().map(Unit::gold_value).sum()
    }

    pub fn to_placement_string(&self) -> String {
        match self.placement {
            1 => "1st".to_string(),
            2 => "2nd".to_string(),
            3 => "3rd".to_string(),
            x => format!("{}th", x),
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct Unit {
    pub character_id: String,
    #[serde(rename = "itemNames", default)]
    pub item_names: Vec<String>,
    pub rarity: u8,
    pub tier: u8,
}

impl Unit {
    /// Shop price for the unit's rarity. The rarity codes are sparse on the
    /// wire: 0/1/2 map to 1-3 gold, 4 and 6 to the 4 and 5 gold slots.
    pub fn base_cost(&self) -> u32 {
        match self.rarity {
            0 => 1,
            1 => 2,
            2 => 3,
            4 => 4,
            6 => 5,
            _ => 0,
        }
    }

    pub fn gold_value(&self) -> u32 {
        self.base_cost() * 3u32.pow(self.tier.saturating_sub(1) as u32)
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct Trait {
    pub name: String,
    #[serde(default)]
    pub num_units: u8,
    /// Active style rank (bronze/silver/gold/prismatic) as reported.
    #[serde(default)]
    pub style: u8,
    #[serde(default)]
    pub tier_current: u8,
    #[serde(default)]
    pub tier_total: u8,
}

/// Display-ready projection of one match from a single account's viewpoint.
///
/// Kept normalized: ids only, no reference-data names. Enrichment happens at
/// presentation time via [`crate::reference::ReferenceDataSet`].
#[derive(Debug, Clone)]
pub struct MatchSummary {
    pub match_id: String,
    pub game_creation: u128,
    pub game_length_secs: f64,
    pub queue_type: QueueType,
    pub level: u8,
    pub placement: u8,
    pub units: Vec<Unit>,
    pub traits: Vec<Trait>,
}

impl MatchSummary {
    pub fn for_participant(data: &Match, puuid: &str) -> Result<Self, MatchError> {
        let participant = data.participant(puuid).ok_or(MatchError::PuuidNotInMatch)?;

        Ok(Self {
            match_id: data.metadata.match_id.clone(),
            game_creation: data.info.game_creation,
            game_length_secs: data.info.game_length,
            queue_type: data.queue_type(),
            level: participant.level,
            placement: participant.placement,
            units: participant.units.clone(),
            traits: participant.traits.clone(),
        })
    }

    pub fn is_top_four(&self) -> bool {
        self.placement <= 4
    }
}
