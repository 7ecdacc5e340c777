//! Raw live client document.
//!
//! Mirrors the JSON served by the game's live client data endpoint. Only the
//! fields the pipeline reads are modelled; everything else is ignored by serde.
//! These types are read-only inputs: the assembler maps them into domain types.

use serde::{Deserialize, Serialize};

use crate::ports::PortError;

/// One read of the live client "all game data" document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawSnapshot {
    /// Missing while no match is loaded.
    pub game_data: Option<RawGameData>,
    pub events: RawEventList,
    pub active_player: Option<RawActivePlayer>,
    pub all_players: Vec<RawPlayer>,
}

impl RawSnapshot {
    /// Decode a live client document.
    pub fn from_json(json: &str) -> Result<Self, PortError> {
        serde_json::from_str(json).map_err(|e| PortError::Decode(e.to_string()))
    }

    /// Decode a recorded document where `null` stands for "no match".
    pub fn from_json_optional(json: &str) -> Result<Option<Self>, PortError> {
        serde_json::from_str(json).map_err(|e| PortError::Decode(e.to_string()))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawGameData {
    /// Seconds since the match started. Fractional, can be slightly negative
    /// during the loading screen fade.
    pub game_time: f64,
    pub game_mode: String,
    pub map_number: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawEventList {
    #[serde(rename = "Events")]
    pub events: Vec<RawEvent>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct RawEvent {
    #[serde(rename = "EventID")]
    pub event_id: u64,
    pub event_name: String,
    pub event_time: f64,
    pub killer_name: Option<String>,
    pub victim_name: Option<String>,
    pub dragon_type: Option<String>,
    /// The client serializes this as the strings `"True"` / `"False"`.
    pub stolen: Option<String>,
}

impl RawEvent {
    pub fn was_stolen(&self) -> bool {
        self.stolen
            .as_deref()
            .is_some_and(|s| s.eq_ignore_ascii_case("true"))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawActivePlayer {
    pub summoner_name: String,
    pub riot_id: Option<String>,
    pub riot_id_game_name: Option<String>,
    pub current_gold: Option<f64>,
    pub champion_stats: Option<RawChampionStats>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawChampionStats {
    pub resource_type: Option<String>,
    pub resource_value: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawPlayer {
    pub summoner_name: String,
    pub riot_id: Option<String>,
    pub riot_id_game_name: Option<String>,
    /// `ORDER` (blue side) or `CHAOS` (red side).
    pub team: String,
    pub is_dead: bool,
    pub respawn_timer: f64,
    pub items: Vec<RawItem>,
}

impl RawPlayer {
    /// Whether `name` refers to this player under any of the names the
    /// client uses (`KillerName` carries the game name on newer clients).
    pub fn answers_to(&self, name: &str) -> bool {
        if name.is_empty() {
            return false;
        }
        self.summoner_name == name
            || self.riot_id.as_deref() == Some(name)
            || self.riot_id_game_name.as_deref() == Some(name)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawItem {
    #[serde(rename = "itemID")]
    pub item_id: u32,
    pub display_name: String,
    pub count: u32,
    pub slot: u8,
}
