use serde::Deserialize;

// ============================================================================
// Account-v1
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountDto {
    pub puuid: String,
    pub game_name: Option<String>,
    pub tag_line: Option<String>,
}

// ============================================================================
// TFT-League-v1
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeagueEntryDto {
    pub queue_type: String,
    #[serde(default)]
    pub tier: Option<String>,
    #[serde(default)]
    pub rank: Option<String>,
    #[serde(default)]
    pub league_points: i32,
    #[serde(default)]
    pub wins: i32,
    #[serde(default)]
    pub losses: i32,
}

impl LeagueEntryDto {
    pub fn is_ranked_tft(&self) -> bool {
        self.queue_type == "RANKED_TFT"
    }
}

// ============================================================================
// TFT-Match-v1 (snake_case payloads)
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct MatchDto {
    pub metadata: MetadataDto,
    pub info: InfoDto,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MetadataDto {
    pub match_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InfoDto {
    /// Unix timestamp in milliseconds.
    pub game_datetime: i64,
    pub participants: Vec<ParticipantDto>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ParticipantDto {
    pub puuid: String,
    pub placement: u8,
    #[serde(default)]
    pub level: u8,
    #[serde(default)]
    pub traits: Vec<TraitDto>,
    #[serde(default)]
    pub units: Vec<UnitDto>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TraitDto {
    pub name: String,
    #[serde(default)]
    pub num_units: u8,
    #[serde(default)]
    pub tier_current: u8,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UnitDto {
    pub character_id: String,
    #[serde(default)]
    pub tier: u8,
}

/// Strip the set prefix from ids such as `TFT13_Sorcerer`.
pub fn display_id(raw: &str) -> &str {
    match raw.split_once('_') {
        Some((prefix, rest)) if prefix.starts_with("TFT") && !rest.is_empty() => rest,
        _ => raw,
    }
}
