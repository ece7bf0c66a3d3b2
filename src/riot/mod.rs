//! Riot API access: routing values, the rate limited HTTP client and the typed endpoints
//! needed to build a snapshot.

use async_trait::async_trait;

mod client;
mod endpoints;
pub mod metrics;
mod region;
pub mod types;

pub use client::RiotClient;
pub use region::{Platform, Region};
pub use types::{AccountDto, LeagueEntryDto, MatchDto, ParticipantDto};

use crate::error::AppError;

/// The four Riot API lookups a refresh depends on.
#[async_trait]
pub trait RiotApi: Send + Sync {
    async fn get_account_by_riot_id(
        &self,
        game_name: &str,
        tag_line: &str,
    ) -> Result<AccountDto, AppError>;

    async fn get_league_entries(&self, puuid: &str) -> Result<Vec<LeagueEntryDto>, AppError>;

    async fn get_match_ids(&self, puuid: &str, count: u32) -> Result<Vec<String>, AppError>;

    async fn get_match(&self, match_id: &str) -> Result<MatchDto, AppError>;
}

#[async_trait]
impl RiotApi for RiotClient {
    async fn get_account_by_riot_id(
        &self,
        game_name: &str,
        tag_line: &str,
    ) -> Result<AccountDto, AppError> {
        RiotClient::get_account_by_riot_id(self, game_name, tag_line).await
    }

    async fn get_league_entries(&self, puuid: &str) -> Result<Vec<LeagueEntryDto>, AppError> {
        self.get_league_entries_by_puuid(puuid).await
    }

    async fn get_match_ids(&self, puuid: &str, count: u32) -> Result<Vec<String>, AppError> {
        RiotClient::get_match_ids(self, puuid, count).await
    }

    async fn get_match(&self, match_id: &str) -> Result<MatchDto, AppError> {
        RiotClient::get_match(self, match_id).await
    }
}
