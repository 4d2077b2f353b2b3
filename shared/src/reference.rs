use std::collections::HashMap;

use serde::Deserialize;

use crate::tft_match::{Trait, Unit};

/// Indexed snapshot of the slow-changing TFT static data (champions, items,
/// traits), keyed by the short `apiName` ids that match payloads carry.
///
/// Built once per fetch from the raw Community Dragon bundle and shared
/// read-only behind an `Arc` afterwards.
#[derive(Debug, Clone, Default)]
pub struct ReferenceDataSet {
    champions: HashMap<String, ChampionData>,
    items: HashMap<String, ItemData>,
    traits: HashMap<String, TraitData>,
    pub fetched_at: u128,
}

#[derive(Deserialize, Debug, Clone)]
pub struct ChampionData {
    #[serde(rename = "apiName")]
    pub api_name: String,
    pub name: String,
    #[serde(default)]
    pub cost: Option<u8>,
    #[serde(default)]
    pub traits: Vec<String>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct ItemData {
    #[serde(rename = "apiName")]
    pub api_name: String,
    pub name: String,
    #[serde(default)]
    pub desc: Option<String>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct TraitData {
    #[serde(rename = "apiName")]
    pub api_name: String,
    pub name: String,
    #[serde(default)]
    pub desc: Option<String>,
}

/// Raw shape of the Community Dragon TFT bundle. Champions and traits live
/// under per-set objects; items are global.
#[derive(Deserialize, Debug)]
struct RawBundle {
    #[serde(default)]
    items: Vec<ItemData>,
    #[serde(default)]
    sets: HashMap<String, RawSet>,
}

#[derive(Deserialize, Debug)]
struct RawSet {
    #[serde(default)]
    champions: Vec<ChampionData>,
    #[serde(default)]
    traits: Vec<TraitData>,
}

impl ReferenceDataSet {
    /// Parses and indexes a raw bundle. All sets in the payload are merged so
    /// lookups keep working for matches from a previous set; later set
    /// numbers win on id collisions.
    pub fn from_json_slice(raw: &[u8], fetched_at: u128) -> Result<Self, serde_json::Error> {
        let bundle: RawBundle = serde_json::from_slice(raw)?;

        let mut champions = HashMap::new();
        let mut traits = HashMap::new();
        let mut items = HashMap::new();

        for item in bundle.items {
            items.insert(item.api_name.clone(), item);
        }

        let mut sets: Vec<(String, RawSet)> = bundle.sets.into_iter().collect();
        sets.sort_by(|a, b| {
            let na = a.0.parse::<f64>().unwrap_or(0.0);
            let nb = b.0.parse::<f64>().unwrap_or(0.0);
            na.partial_cmp(&nb).unwrap_or(std::cmp::Ordering::Equal)
        });
        for (_, set) in sets {
            for champion in set.champions {
                champions.insert(champion.api_name.clone(), champion);
            }
            for t in set.traits {
                traits.insert(t.api_name.clone(), t);
            }
        }

        Ok(Self {
            champions,
            items,
            traits,
            fetched_at,
        })
    }

    pub fn champion(&self, api_name: &str) -> Option<&ChampionData> {
        self.champions.get(api_name)
    }

    pub fn item(&self, api_name: &str) -> Option<&ItemData> {
        self.items.get(api_name)
    }

    pub fn trait_data(&self, api_name: &str) -> Option<&TraitData> {
        self.traits.get(api_name)
    }

    pub fn champion_name<'a>(&'a self, api_name: &'a str) -> &'a str {
        self.champions
            .get(api_name)
            .map(|c| c.name.as_str())
            .unwrap_or(api_name)
    }

    pub fn item_name<'a>(&'a self, api_name: &'a str) -> &'a str {
        self.items
            .get(api_name)
            .map(|i| i.name.as_str())
            .unwrap_or(api_name)
    }

    pub fn trait_name<'a>(&'a self, api_name: &'a str) -> &'a str {
        self.traits
            .get(api_name)
            .map(|t| t.name.as_str())
            .unwrap_or(api_name)
    }

    /// Display view of a fielded unit: resolved names for the champion and
    /// its items, falling back to the raw ids for anything unknown.
    pub fn describe_unit(&self, unit: &Unit) -> UnitView {
        UnitView {
            character_id: unit.character_id.clone(),
            display_name: self.champion_name(&unit.character_id).to_string(),
            cost: self
                .champions
                .get(&unit.character_id)
                .and_then(|c| c.cost),
            tier: unit.tier,
            items: unit
                .item_names
                .iter()
                .map(|id| self.item_name(id).to_string())
                .collect(),
        }
    }

    pub fn describe_trait(&self, t: &Trait) -> TraitView {
        TraitView {
            name: t.name.clone(),
            display_name: self.trait_name(&t.name).to_string(),
            num_units: t.num_units,
            tier_current: t.tier_current,
            tier_total: t.tier_total,
            style: t.style,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.champions.is_empty() && self.items.is_empty() && self.traits.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct UnitView {
    pub character_id: String,
    pub display_name: String,
    pub cost: Option<u8>,
    pub tier: u8,
    pub items: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct TraitView {
    pub name: String,
    pub display_name: String,
    pub num_units: u8,
    pub tier_current: u8,
    pub tier_total: u8,
    pub style: u8,
}
