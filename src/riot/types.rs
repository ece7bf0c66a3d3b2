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
// League-v4
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeagueEntryDto {
    pub queue_type: String,
    #[serde(default)]
    pub tier: String,
    #[serde(default)]
    pub rank: String,
    #[serde(default)]
    pub league_points: u32,
    #[serde(default)]
    pub wins: u32,
    #[serde(default)]
    pub losses: u32,
}

// ============================================================================
// Match-v5
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchDto {
    pub metadata: Option<MetadataDto>,
    pub info: InfoDto,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataDto {
    pub match_id: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InfoDto {
    /// Epoch millis
    pub game_start_timestamp: Option<i64>,
    /// Epoch millis, absent on matches recorded before patch 11.20
    pub game_end_timestamp: Option<i64>,
    #[serde(default)]
    pub participants: Vec<ParticipantDto>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantDto {
    pub puuid: String,
    #[serde(default)]
    pub champion_name: String,
    #[serde(default)]
    pub win: bool,
    #[serde(default)]
    pub kills: u32,
    #[serde(default)]
    pub deaths: u32,
    #[serde(default)]
    pub assists: u32,
}

impl MatchDto {
    pub fn match_id(&self) -> Option<&str> {
        self.metadata.as_ref().map(|m| m.match_id.as_str())
    }

    pub fn participant_info_of(&self, puuid: &str) -> Option<&ParticipantDto> {
        self.info.participants.iter().find(|p| p.puuid == puuid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn match_without_stats_uses_defaults() {
        let raw = r#"{
            "metadata": { "matchId": "EUW1_1" },
            "info": {
                "gameStartTimestamp": 1000,
                "participants": [{ "puuid": "abc", "championName": "Lux" }]
            }
        }"#;

        let dto: MatchDto = serde_json::from_str(raw).unwrap();

        assert_eq!(dto.match_id(), Some("EUW1_1"));
        assert_eq!(dto.info.game_start_timestamp, Some(1000));
        assert_eq!(dto.info.game_end_timestamp, None);

        let participant = dto.participant_info_of("abc").unwrap();
        assert_eq!(participant.kills, 0);
        assert_eq!(participant.deaths, 0);
        assert_eq!(participant.assists, 0);
        assert!(!participant.win);
        assert!(dto.participant_info_of("other").is_none());
    }

    #[test]
    fn league_entry_deserializes() {
        let raw = r#"{
            "queueType": "RANKED_SOLO_5x5",
            "tier": "GOLD",
            "rank": "II",
            "leaguePoints": 55,
            "wins": 40,
            "losses": 38,
            "hotStreak": false
        }"#;

        let dto: LeagueEntryDto = serde_json::from_str(raw).unwrap();

        assert_eq!(dto.queue_type, "RANKED_SOLO_5x5");
        assert_eq!(dto.league_points, 55);
        assert_eq!(dto.wins, 40);
        assert_eq!(dto.losses, 38);
    }
}
