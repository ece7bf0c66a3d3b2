use std::collections::HashSet;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use crate::error::AppError;
use crate::icons::IconResolver;
use crate::riot::{AccountDto, LeagueEntryDto, MatchDto, Platform, Region, RiotApi};
use crate::snapshot::SnapshotSettings;

pub fn settings() -> SnapshotSettings {
    SnapshotSettings {
        game_name: "player".to_string(),
        tag_line: "euw".to_string(),
        platform: Platform::EUW1,
        region: Region::Europe,
        queue: "RANKED_SOLO_5x5".to_string(),
        history_len: 3,
        fetch_count: 20,
        session_gap: Duration::from_secs(60 * 60),
    }
}

pub fn raw_match(
    puuid: &str,
    champion: &str,
    win: bool,
    (kills, deaths, assists): (u32, u32, u32),
    start: i64,
    end: i64,
) -> MatchDto {
    serde_json::from_value(serde_json::json!({
        "info": {
            "gameStartTimestamp": start,
            "gameEndTimestamp": end,
            "participants": [{
                "puuid": puuid,
                "championName": champion,
                "win": win,
                "kills": kills,
                "deaths": deaths,
                "assists": assists
            }]
        }
    }))
    .unwrap()
}

pub struct FakeIcons;

impl IconResolver for FakeIcons {
    fn champion_icon(&self, champion: &str) -> String {
        format!("icon://{champion}")
    }
}

/// In-memory Riot API. Match ids are returned in insertion order.
pub struct FakeRiotApi {
    account: Option<AccountDto>,
    leagues: Vec<LeagueEntryDto>,
    matches: Vec<(String, MatchDto)>,
    failing: Mutex<HashSet<String>>,
    delay: Option<Duration>,
    match_delay: Option<Duration>,
    fetched_matches: AtomicUsize,
    requested_count: Mutex<Option<u32>>,
    builds: AtomicUsize,
}

impl FakeRiotApi {
    pub fn new() -> Self {
        Self {
            account: Some(AccountDto {
                puuid: "me".to_string(),
                game_name: Some("Player".to_string()),
                tag_line: Some("EUW".to_string()),
            }),
            leagues: Vec::new(),
            matches: Vec::new(),
            failing: Mutex::new(HashSet::new()),
            delay: None,
            match_delay: None,
            fetched_matches: AtomicUsize::new(0),
            requested_count: Mutex::new(None),
            builds: AtomicUsize::new(0),
        }
    }

    pub fn without_account(mut self) -> Self {
        self.account = None;
        self
    }

    pub fn with_league(
        mut self,
        queue: &str,
        tier: &str,
        rank: &str,
        league_points: u32,
        wins: u32,
        losses: u32,
    ) -> Self {
        self.leagues.push(LeagueEntryDto {
            queue_type: queue.to_string(),
            tier: tier.to_string(),
            rank: rank.to_string(),
            league_points,
            wins,
            losses,
        });
        self
    }

    pub fn with_match(mut self, id: &str, raw: MatchDto) -> Self {
        self.matches.push((id.to_string(), raw));
        self
    }

    /// Listed in the match ids but answering with an error.
    pub fn with_failing_match(self, id: &str) -> Self {
        let placeholder = raw_match("nobody", "None", false, (0, 0, 0), 0, 0);
        let this = self.with_match(id, placeholder);
        this.fail_match(id);
        this
    }

    /// Every account lookup sleeps for `delay` first.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Every successful match detail sleeps for `delay` first; failing ones answer at once.
    pub fn with_match_delay(mut self, delay: Duration) -> Self {
        self.match_delay = Some(delay);
        self
    }

    pub fn fail_match(&self, id: &str) {
        self.failing.lock().unwrap().insert(id.to_string());
    }

    pub fn heal_match(&self, id: &str) {
        self.failing.lock().unwrap().remove(id);
    }

    pub fn requested_count(&self) -> Option<u32> {
        *self.requested_count.lock().unwrap()
    }

    /// Amount of match details answered successfully.
    pub fn fetched_matches(&self) -> usize {
        self.fetched_matches.load(Ordering::SeqCst)
    }

    /// Amount of account lookups, i.e. of snapshot builds started.
    pub fn builds(&self) -> usize {
        self.builds.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RiotApi for FakeRiotApi {
    async fn get_account_by_riot_id(
        &self,
        game_name: &str,
        tag_line: &str,
    ) -> Result<AccountDto, AppError> {
        self.builds.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        self.account.clone().ok_or_else(|| AppError::PlayerNotFound {
            game_name: game_name.to_string(),
            tag_line: tag_line.to_string(),
        })
    }

    async fn get_league_entries(&self, _puuid: &str) -> Result<Vec<LeagueEntryDto>, AppError> {
        Ok(self.leagues.clone())
    }

    async fn get_match_ids(&self, _puuid: &str, count: u32) -> Result<Vec<String>, AppError> {
        *self.requested_count.lock().unwrap() = Some(count);

        Ok(self
            .matches
            .iter()
            .take(count as usize)
            .map(|(id, _)| id.clone())
            .collect())
    }

    async fn get_match(&self, match_id: &str) -> Result<MatchDto, AppError> {
        if self.failing.lock().unwrap().contains(match_id) {
            return Err(AppError::RiotApi {
                status: 500,
                message: "Internal server error".to_string(),
            });
        }

        if let Some(delay) = self.match_delay {
            tokio::time::sleep(delay).await;
        }

        let raw = self
            .matches
            .iter()
            .find(|(id, _)| id == match_id)
            .map(|(_, raw)| raw.clone())
            .ok_or_else(|| AppError::RiotApi {
                status: 404,
                message: "Data not found - match file not found".to_string(),
            })?;

        self.fetched_matches.fetch_add(1, Ordering::SeqCst);
        Ok(raw)
    }
}
