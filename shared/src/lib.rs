use std::{
    fmt::{self, Display},
    time::{SystemTime, UNIX_EPOCH},
};

use serde::Deserialize;

pub mod badge;
pub mod errors;
pub mod reference;
pub mod tft_match;
pub mod traits;

/// Current wall-clock time as epoch milliseconds.
pub fn now_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("Time went backwards")
        .as_millis()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    Na,
    Euw,
    Eune,
    Oce,
    Ru,
    Tr,
    Br,
    Lan,
    Las,
    Jp,
    Kr,
    Tw,
}

impl Region {
    /// Continental routing host, used by the account and match endpoints.
    pub fn to_global_endpoint(&self) -> String {
        match self {
            Region::Lan => "americas.api.riotgames.com".to_string(),
            Region::Las => "americas.api.riotgames.com".to_string(),
            Region::Na => "americas.api.riotgames.com".to_string(),
            Region::Br => "americas.api.riotgames.com".to_string(),
            Region::Euw => "europe.api.riotgames.com".to_string(),
            Region::Eune => "europe.api.riotgames.com".to_string(),
            Region::Tr => "europe.api.riotgames.com".to_string(),
            Region::Ru => "europe.api.riotgames.com".to_string(),
            Region::Kr => "asia.api.riotgames.com".to_string(),
            Region::Jp => "asia.api.riotgames.com".to_string(),
            Region::Oce => "sea.api.riotgames.com".to_string(),
            Region::Tw => "sea.api.riotgames.com".to_string(),
        }
    }

    /// Platform routing host, used by the league endpoint.
    pub fn to_endpoint(&self) -> String {
        match self {
            Region::Lan => "la1.api.riotgames.com".to_string(),
            Region::Las => "la2.api.riotgames.com".to_string(),
            Region::Na => "na1.api.riotgames.com".to_string(),
            Region::Br => "br1.api.riotgames.com".to_string(),
            Region::Euw => "euw1.api.riotgames.com".to_string(),
            Region::Eune => "eun1.api.riotgames.com".to_string(),
            Region::Tr => "tr1.api.riotgames.com".to_string(),
            Region::Ru => "ru.api.riotgames.com".to_string(),
            Region::Kr => "kr.api.riotgames.com".to_string(),
            Region::Jp => "jp1.api.riotgames.com".to_string(),
            Region::Oce => "oc1.api.riotgames.com".to_string(),
            Region::Tw => "tw2.api.riotgames.com".to_string(),
        }
    }
}

impl From<Region> for String {
    fn from(region: Region) -> Self {
        match region {
            Region::Lan => "LAN".to_string(),
            Region::Las => "LAS".to_string(),
            Region::Na => "NA".to_string(),
            Region::Br => "BR".to_string(),
            Region::Euw => "EUW".to_string(),
            Region::Eune => "EUNE".to_string(),
            Region::Tr => "TR".to_string(),
            Region::Ru => "RU".to_string(),
            Region::Kr => "KR".to_string(),
            Region::Jp => "JP".to_string(),
            Region::Oce => "OCE".to_string(),
            Region::Tw => "TW".to_string(),
        }
    }
}

impl TryFrom<String> for Region {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.to_uppercase().as_str() {
            "LAN" => Ok(Region::Lan),
            "LAS" => Ok(Region::Las),
            "NA" => Ok(Region::Na),
            "BR" => Ok(Region::Br),
            "EUW" => Ok(Region::Euw),
            "EUNE" => Ok(Region::Eune),
            "TR" => Ok(Region::Tr),
            "RU" => Ok(Region::Ru),
            "KR" => Ok(Region::Kr),
            "JP" => Ok(Region::Jp),
            "OCE" => Ok(Region::Oce),
            "TW" => Ok(Region::Tw),
            _ => Err(format!("Unknown region: {}", value)),
        }
    }
}

/// The three TFT ranked queues, plus the unranked/unknown catch-alls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueueType {
    Normal,
    Ranked,
    DoubleUp,
    HyperRoll,
    Unhandled,
}

impl From<u16> for QueueType {
    fn from(value: u16) -> Self {
        match value {
            1090 => Self::Normal,
            1100 => Self::Ranked,
            1130 => Self::HyperRoll,
            1160 => Self::DoubleUp,
            _ => Self::Unhandled,
        }
    }
}

impl QueueType {
    pub fn as_str(&self) -> &'static str {
        match self {
            QueueType::Normal => "NORMAL_TFT",
            QueueType::Ranked => "RANKED_TFT",
            QueueType::DoubleUp => "RANKED_TFT_DOUBLE_UP",
            QueueType::HyperRoll => "RANKED_TFT_TURBO",
            QueueType::Unhandled => "UNHANDLED",
        }
    }

    /// Maps a league entry `queueType` string onto a supported queue.
    pub fn from_league_str(value: &str) -> Option<Self> {
        match value {
            "RANKED_TFT" => Some(Self::Ranked),
            "RANKED_TFT_DOUBLE_UP" => Some(Self::DoubleUp),
            "RANKED_TFT_TURBO" => Some(Self::HyperRoll),
            _ => None,
        }
    }
}

impl Display for QueueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A resolved Riot account.
///
/// `puuid` is the only stable key; `game_name`/`tag_line` can change whenever
/// the player renames. `last_resolved_at` is `None` until the first renew
/// completes for this puuid in the current process.
#[derive(Debug, Clone)]
pub struct Account {
    pub puuid: String,
    pub game_name: String,
    pub tag_line: String,
    pub last_resolved_at: Option<u128>,
}

impl Account {
    pub fn riot_id(&self) -> String {
        format!("{}#{}", self.game_name, self.tag_line)
    }
}

/// Raw league entry as returned by the TFT league endpoint.
///
/// Hyper-roll entries carry a rated rating instead of `tier`/`rank`, so both
/// stay optional here and get filtered when converting to [`LeagueStatus`].
#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct LeagueEntryDto {
    pub queue_type: String,
    #[serde(default)]
    pub tier: Option<String>,
    #[serde(default)]
    pub rank: Option<String>,
    #[serde(default)]
    pub league_points: u16,
    #[serde(default)]
    pub wins: u16,
    #[serde(default)]
    pub losses: u16,
    #[serde(default)]
    pub hot_streak: bool,
}

/// Ranked standing in one queue. Absence for a queue means unranked there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeagueStatus {
    pub queue_type: QueueType,
    pub tier: String,
    /// Division within the tier. Apex tiers have none.
    pub rank: Option<String>,
    pub league_points: u16,
    pub wins: u16,
    pub losses: u16,
    pub hot_streak: bool,
}

impl LeagueStatus {
    /// Converts a raw entry, or `None` when the entry carries no usable
    /// standing (unknown queue, or no tier reported).
    pub fn from_entry(entry: LeagueEntryDto) -> Option<Self> {
        let queue_type = QueueType::from_league_str(&entry.queue_type)?;
        let tier = entry.tier.filter(|t| !t.is_empty())?;

        Some(Self {
            queue_type,
            tier,
            rank: entry.rank.filter(|r| !r.is_empty()),
            league_points: entry.league_points,
            wins: entry.wins,
            losses: entry.losses,
            hot_streak: entry.hot_streak,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn queue_type_and_region_conversions() {
        let q = QueueType::from(1100u16);
        assert!(matches!(q, QueueType::Ranked));
        assert_eq!(q.as_str(), "RANKED_TFT");
        assert!(matches!(QueueType::from(1160u16), QueueType::DoubleUp));
        assert!(matches!(QueueType::from(999u16), QueueType::Unhandled));
        assert_eq!(
            QueueType::from_league_str("RANKED_TFT_DOUBLE_UP"),
            Some(QueueType::DoubleUp)
        );
        assert_eq!(QueueType::from_league_str("RANKED_SOLO_5x5"), None);

        assert_eq!(Region::Kr.to_endpoint(), "kr.api.riotgames.com");
        assert_eq!(Region::Kr.to_global_endpoint(), "asia.api.riotgames.com");
        let s: String = Region::Kr.into();
        assert_eq!(s, "KR");
        assert_eq!(Region::try_from("kr".to_string()).unwrap(), Region::Kr);
    }

    #[test]
    fn league_status_drops_tierless_entries() {
        let entry = LeagueEntryDto {
            queue_type: "RANKED_TFT_TURBO".to_string(),
            tier: None,
            rank: None,
            league_points: 0,
            wins: 3,
            losses: 9,
            hot_streak: false,
        };
        assert!(LeagueStatus::from_entry(entry).is_none());

        let entry = LeagueEntryDto {
            queue_type: "RANKED_TFT".to_string(),
            tier: Some("CHALLENGER".to_string()),
            rank: None,
            league_points: 1043,
            wins: 210,
            losses: 180,
            hot_streak: true,
        };
        let status = LeagueStatus::from_entry(entry).unwrap();
        assert_eq!(status.queue_type, QueueType::Ranked);
        assert_eq!(status.rank, None);
        assert_eq!(status.league_points, 1043);
    }
}
