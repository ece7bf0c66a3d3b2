use std::fmt;

use serde::Serialize;

use crate::riot::LeagueEntryDto;

/// Ranked skill bracket as reported by League-v4.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Tier {
    Unranked,
    Iron,
    Bronze,
    Silver,
    Gold,
    Platinum,
    Emerald,
    Diamond,
    Master,
    Grandmaster,
    Challenger,
}

impl Tier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unranked => "UNRANKED",
            Self::Iron => "IRON",
            Self::Bronze => "BRONZE",
            Self::Silver => "SILVER",
            Self::Gold => "GOLD",
            Self::Platinum => "PLATINUM",
            Self::Emerald => "EMERALD",
            Self::Diamond => "DIAMOND",
            Self::Master => "MASTER",
            Self::Grandmaster => "GRANDMASTER",
            Self::Challenger => "CHALLENGER",
        }
    }

    /// Key used by the overlay to pick the emblem and colour of a tier.
    pub fn badge(&self) -> &'static str {
        match self {
            Self::Unranked => "unranked",
            Self::Iron => "iron",
            Self::Bronze => "bronze",
            Self::Silver => "silver",
            Self::Gold => "gold",
            Self::Platinum => "platinum",
            Self::Emerald => "emerald",
            Self::Diamond => "diamond",
            Self::Master => "master",
            Self::Grandmaster => "grandmaster",
            Self::Challenger => "challenger",
        }
    }
}

impl From<&str> for Tier {
    /// Unknown tiers are treated as unranked.
    fn from(value: &str) -> Self {
        match value.to_uppercase().as_str() {
            "IRON" => Self::Iron,
            "BRONZE" => Self::Bronze,
            "SILVER" => Self::Silver,
            "GOLD" => Self::Gold,
            "PLATINUM" => Self::Platinum,
            "EMERALD" => Self::Emerald,
            "DIAMOND" => Self::Diamond,
            "MASTER" => Self::Master,
            "GRANDMASTER" => Self::Grandmaster,
            "CHALLENGER" => Self::Challenger,
            _ => Self::Unranked,
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Normalized ranked standing of the player in one queue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankRecord {
    pub queue: String,
    pub tier: Tier,
    /// Division inside the tier ("I" to "IV"), empty when unranked.
    pub rank: String,
    pub league_points: u32,
    pub wins: u32,
    pub losses: u32,
}

impl RankRecord {
    pub fn unranked(queue: impl Into<String>) -> Self {
        Self {
            queue: queue.into(),
            tier: Tier::Unranked,
            rank: String::new(),
            league_points: 0,
            wins: 0,
            losses: 0,
        }
    }

    /// Pick the entry of `target_queue`, the first one wins when the API returns duplicates.
    pub fn from_entries(entries: &[LeagueEntryDto], target_queue: &str) -> Self {
        entries
            .iter()
            .find(|entry| entry.queue_type == target_queue)
            .map(|entry| {
                let tier = Tier::from(entry.tier.as_str());
                if tier == Tier::Unranked {
                    return Self::unranked(target_queue);
                }

                Self {
                    queue: entry.queue_type.clone(),
                    tier,
                    rank: entry.rank.clone(),
                    league_points: entry.league_points,
                    wins: entry.wins,
                    losses: entry.losses,
                }
            })
            .unwrap_or_else(|| Self::unranked(target_queue))
    }

    pub fn display(&self) -> String {
        if self.tier == Tier::Unranked {
            return Tier::Unranked.to_string();
        }

        if self.rank.is_empty() {
            self.tier.to_string()
        } else {
            format!("{} {}", self.tier, self.rank)
        }
    }

    pub fn games(&self) -> u32 {
        self.wins + self.losses
    }
}

/// Aggregate of the whole ranked season in the tracked queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeasonSummary {
    pub games: u32,
    pub wins: u32,
    pub losses: u32,
    /// Integer percentage in [0, 100]
    pub winrate: u32,
}

impl From<&RankRecord> for SeasonSummary {
    fn from(rank: &RankRecord) -> Self {
        let games = rank.games();
        Self {
            games,
            wins: rank.wins,
            losses: rank.losses,
            winrate: percent_int(rank.wins, games),
        }
    }
}

/// `round(100 * wins / games)` with halves rounded up, 0 when no game was played.
pub fn percent_int(wins: u32, games: u32) -> u32 {
    if games == 0 {
        return 0;
    }

    let wins = u64::from(wins);
    let games = u64::from(games);

    ((200 * wins + games) / (2 * games)) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(queue: &str, tier: &str, rank: &str, lp: u32, wins: u32, losses: u32) -> LeagueEntryDto {
        LeagueEntryDto {
            queue_type: queue.to_string(),
            tier: tier.to_string(),
            rank: rank.to_string(),
            league_points: lp,
            wins,
            losses,
        }
    }

    #[test]
    fn gold_two_entry_is_normalized() {
        let entries = [entry("RANKED_SOLO_5x5", "GOLD", "II", 55, 40, 38)];

        let rank = RankRecord::from_entries(&entries, "RANKED_SOLO_5x5");
        let season = SeasonSummary::from(&rank);

        assert_eq!(rank.display(), "GOLD II");
        assert_eq!(rank.tier.badge(), "gold");
        assert_eq!(rank.league_points, 55);
        assert_eq!(season.games, 78);
        assert_eq!(season.winrate, 51);
    }

    #[test]
    fn missing_queue_is_unranked() {
        let entries = [entry("RANKED_FLEX_SR", "SILVER", "I", 10, 3, 2)];

        let rank = RankRecord::from_entries(&entries, "RANKED_SOLO_5x5");
        let season = SeasonSummary::from(&rank);

        assert_eq!(rank, RankRecord::unranked("RANKED_SOLO_5x5"));
        assert_eq!(rank.rank, "");
        assert_eq!(rank.display(), "UNRANKED");
        assert_eq!(season.games, 0);
        assert_eq!(season.winrate, 0);
    }

    #[test]
    fn first_matching_entry_wins() {
        let entries = [
            entry("RANKED_FLEX_SR", "IRON", "IV", 0, 1, 1),
            entry("RANKED_SOLO_5x5", "DIAMOND", "I", 90, 10, 5),
            entry("RANKED_SOLO_5x5", "IRON", "IV", 0, 1, 1),
        ];

        let rank = RankRecord::from_entries(&entries, "RANKED_SOLO_5x5");

        assert_eq!(rank.tier, Tier::Diamond);
        assert_eq!(rank.display(), "DIAMOND I");
    }

    #[test]
    fn apex_tier_without_division_displays_tier_only() {
        let entries = [entry("RANKED_SOLO_5x5", "challenger", "", 1200, 300, 200)];

        let rank = RankRecord::from_entries(&entries, "RANKED_SOLO_5x5");

        assert_eq!(rank.tier, Tier::Challenger);
        assert_eq!(rank.display(), "CHALLENGER");
    }

    #[test]
    fn percent_int_handles_bounds_and_halves() {
        assert_eq!(percent_int(0, 0), 0);
        assert_eq!(percent_int(0, 10), 0);
        assert_eq!(percent_int(10, 10), 100);
        assert_eq!(percent_int(1, 8), 13); // 12.5
        assert_eq!(percent_int(1, 3), 33);
        assert_eq!(percent_int(2, 3), 67);

        for games in 0..=200 {
            for wins in 0..=games {
                assert!(percent_int(wins, games) <= 100);
            }
        }
    }
}
