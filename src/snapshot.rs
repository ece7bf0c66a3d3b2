use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use futures::future::try_join_all;
use serde::Serialize;
use tracing::{debug, instrument};

use crate::error::AppError;
use crate::icons::IconResolver;
use crate::riot::{Platform, Region, RiotApi};
use crate::stats::{MatchFact, RankRecord, SeasonSummary, SessionSummary, summarize_session};

/// Everything the builder needs to know about what to fetch.
#[derive(Debug, Clone)]
pub struct SnapshotSettings {
    pub game_name: String,
    pub tag_line: String,
    pub platform: Platform,
    pub region: Region,
    /// League-v4 queue type, e.g. `RANKED_SOLO_5x5`
    pub queue: String,
    /// Amount of matches shown in the history (K)
    pub history_len: usize,
    /// Amount of match ids requested (N >= K)
    pub fetch_count: u32,
    pub session_gap: Duration,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerIdentity {
    pub game_name: String,
    pub tag_line: String,
    pub riot_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankView {
    #[serde(flatten)]
    pub record: RankRecord,
    pub display: String,
    pub badge: &'static str,
}

impl From<RankRecord> for RankView {
    fn from(record: RankRecord) -> Self {
        Self {
            display: record.display(),
            badge: record.tier.badge(),
            record,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchEntry {
    pub champion: String,
    pub icon: String,
    pub win: bool,
}

/// One complete refresh result. Never mutated once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub player: PlayerIdentity,
    pub platform: Platform,
    pub region: Region,
    pub rank: RankView,
    /// Most recent first
    pub matches: Vec<MatchEntry>,
    pub session: SessionSummary,
    pub season: SeasonSummary,
    /// Epoch millis
    pub published_at: i64,
}

pub struct SnapshotBuilder {
    api: Arc<dyn RiotApi>,
    icons: Arc<dyn IconResolver>,
    settings: SnapshotSettings,
}

impl SnapshotBuilder {
    pub fn new(
        api: Arc<dyn RiotApi>,
        icons: Arc<dyn IconResolver>,
        settings: SnapshotSettings,
    ) -> Self {
        Self {
            api,
            icons,
            settings,
        }
    }

    /// Fetch everything and derive a new snapshot.
    ///
    /// Any failing upstream call aborts the build, including a single failing match
    /// detail. Matches the player is missing from are skipped.
    #[instrument(
        skip(self),
        fields(riot_id = %format!("{}#{}", self.settings.game_name, self.settings.tag_line))
    )]
    pub async fn build(&self) -> Result<Snapshot, AppError> {
        let settings = &self.settings;

        let account = self
            .api
            .get_account_by_riot_id(&settings.game_name, &settings.tag_line)
            .await?;

        let entries = self.api.get_league_entries(&account.puuid).await?;
        let rank = RankRecord::from_entries(&entries, &settings.queue);
        let season = SeasonSummary::from(&rank);

        let match_ids = self
            .api
            .get_match_ids(&account.puuid, settings.fetch_count)
            .await?;
        debug!(count = match_ids.len(), "📥 Fetching match details");

        let matches =
            try_join_all(match_ids.iter().map(|id| self.api.get_match(id.as_str()))).await?;

        let facts: Vec<MatchFact> = matches
            .iter()
            .filter_map(|raw| {
                let fact = MatchFact::from_match(raw, &account.puuid);
                if fact.is_none() {
                    debug!(
                        match_id = raw.match_id().unwrap_or("unknown"),
                        "📥 Player missing from match participants, skipped"
                    );
                }
                fact
            })
            .collect();

        let session = summarize_session(&facts, settings.session_gap);
        let recent = recent_matches(facts, settings.history_len, self.icons.as_ref());

        let game_name = account
            .game_name
            .unwrap_or_else(|| settings.game_name.clone());
        let tag_line = account.tag_line.unwrap_or_else(|| settings.tag_line.clone());

        Ok(Snapshot {
            player: PlayerIdentity {
                riot_id: format!("{game_name}#{tag_line}"),
                game_name,
                tag_line,
            },
            platform: settings.platform,
            region: settings.region,
            rank: rank.into(),
            matches: recent,
            session,
            season,
            published_at: now_millis(),
        })
    }
}

/// The `limit` most recent matches, matches without a start time sorted last.
fn recent_matches(
    mut facts: Vec<MatchFact>,
    limit: usize,
    icons: &dyn IconResolver,
) -> Vec<MatchEntry> {
    facts.sort_by(|a, b| b.started_at.cmp(&a.started_at));

    facts
        .into_iter()
        .take(limit)
        .map(|fact| MatchEntry {
            icon: icons.champion_icon(&fact.champion),
            champion: fact.champion,
            win: fact.win,
        })
        .collect()
}

pub fn now_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or_default()
}
