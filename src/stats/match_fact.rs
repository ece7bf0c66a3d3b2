use serde::Serialize;

use crate::riot::MatchDto;

/// What a single match tells about the tracked player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchFact {
    pub champion: String,
    pub win: bool,
    pub kills: u32,
    pub deaths: u32,
    pub assists: u32,
    /// Epoch millis
    pub started_at: Option<i64>,
    /// Epoch millis
    pub ended_at: Option<i64>,
}

impl MatchFact {
    /// Returns `None` when `puuid` did not take part in the match.
    pub fn from_match(raw: &MatchDto, puuid: &str) -> Option<Self> {
        let participant = raw.participant_info_of(puuid)?;

        Some(Self {
            champion: participant.champion_name.clone(),
            win: participant.win,
            kills: participant.kills,
            deaths: participant.deaths,
            assists: participant.assists,
            started_at: raw.info.game_start_timestamp,
            ended_at: raw.info.game_end_timestamp,
        })
    }
}
