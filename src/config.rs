use std::env;
use std::num::NonZeroU32;
use std::ops::RangeInclusive;
use std::time::Duration;

use crate::error::AppError;
use crate::riot::{Platform, Region};
use crate::snapshot::SnapshotSettings;

/// Match-v5 refuses to list more ids per request.
const MAX_MATCH_FETCH_COUNT: u32 = 100;

// Upper bounds keep every derived duration and deadline far from overflowing.
const MAX_REFRESH_INTERVAL_SECS: u64 = 24 * 60 * 60;
const MAX_SESSION_GAP_MINUTES: u64 = 7 * 24 * 60;
const MAX_HTTP_TIMEOUT_SECS: u64 = 5 * 60;
const MAX_ICON_REFRESH_HOURS: u64 = 30 * 24;
const MAX_OVERLAY_REFRESH_SECS: u64 = 60 * 60;

#[derive(Debug, Clone)]
pub struct Config {
    pub riot_api_key: String,
    pub game_name: String,
    pub tag_line: String,
    pub platform: Platform,
    pub region: Region,
    pub ranked_queue: String,
    pub refresh_interval_secs: u64,
    pub session_gap_minutes: u64,
    pub match_history_len: usize,
    pub match_fetch_count: u32,
    pub riot_rate_limit_per_second: NonZeroU32,
    pub http_timeout_secs: u64,
    /// Pinned Data Dragon version, fetched and refreshed when unset
    pub ddragon_version: Option<String>,
    pub icon_refresh_hours: u64,
    pub bind_addr: String,
    pub overlay_refresh_secs: u64,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from any key/value source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        const DEFAULT_RANKED_QUEUE: &str = "RANKED_SOLO_5x5";
        const DEFAULT_REFRESH_INTERVAL_SECS: u64 = 60;
        const DEFAULT_SESSION_GAP_MINUTES: u64 = 60;
        const DEFAULT_MATCH_HISTORY_LEN: usize = 5;
        const DEFAULT_MATCH_FETCH_COUNT: u32 = 20;
        const DEFAULT_RIOT_RATE_LIMIT_PER_SECOND: u32 = 20;
        const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;
        const DEFAULT_ICON_REFRESH_HOURS: u64 = 6;
        const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
        const DEFAULT_OVERLAY_REFRESH_SECS: u64 = 30;

        let required = |key: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| AppError::Config(format!("{key} must be set")))
        };

        let riot_api_key = required("RIOT_API_KEY")?;
        let game_name = required("RIOT_GAME_NAME")?;
        let tag_line = required("RIOT_TAG_LINE")?;

        let platform: Platform = required("RIOT_PLATFORM")?
            .parse()
            .map_err(|e| AppError::Config(format!("RIOT_PLATFORM: {e}")))?;

        let region = match lookup("RIOT_REGION") {
            Some(v) => v
                .parse()
                .map_err(|e| AppError::Config(format!("RIOT_REGION: {e}")))?,
            None => platform.to_region(),
        };

        let ranked_queue = lookup("RANKED_QUEUE").unwrap_or_else(|| DEFAULT_RANKED_QUEUE.into());

        let refresh_interval_secs = bounded(
            "REFRESH_INTERVAL_SECS",
            parse_or(&lookup, "REFRESH_INTERVAL_SECS", DEFAULT_REFRESH_INTERVAL_SECS)?,
            1..=MAX_REFRESH_INTERVAL_SECS,
        )?;
        let session_gap_minutes = bounded(
            "SESSION_GAP_MINUTES",
            parse_or(&lookup, "SESSION_GAP_MINUTES", DEFAULT_SESSION_GAP_MINUTES)?,
            0..=MAX_SESSION_GAP_MINUTES,
        )?;
        let match_history_len = parse_or(&lookup, "MATCH_HISTORY_LEN", DEFAULT_MATCH_HISTORY_LEN)?;
        let match_fetch_count = parse_or(&lookup, "MATCH_FETCH_COUNT", DEFAULT_MATCH_FETCH_COUNT)?;
        let http_timeout_secs = bounded(
            "HTTP_TIMEOUT_SECS",
            parse_or(&lookup, "HTTP_TIMEOUT_SECS", DEFAULT_HTTP_TIMEOUT_SECS)?,
            1..=MAX_HTTP_TIMEOUT_SECS,
        )?;
        let icon_refresh_hours = bounded(
            "ICON_REFRESH_HOURS",
            parse_or(&lookup, "ICON_REFRESH_HOURS", DEFAULT_ICON_REFRESH_HOURS)?,
            1..=MAX_ICON_REFRESH_HOURS,
        )?;
        let overlay_refresh_secs = bounded(
            "OVERLAY_REFRESH_SECS",
            parse_or(&lookup, "OVERLAY_REFRESH_SECS", DEFAULT_OVERLAY_REFRESH_SECS)?,
            1..=MAX_OVERLAY_REFRESH_SECS,
        )?;

        let riot_rate_limit_per_second = NonZeroU32::new(parse_or(
            &lookup,
            "RIOT_RATE_LIMIT_PER_SECOND",
            DEFAULT_RIOT_RATE_LIMIT_PER_SECOND,
        )?)
        .ok_or_else(|| AppError::Config("RIOT_RATE_LIMIT_PER_SECOND must be positive".into()))?;

        if match_fetch_count > MAX_MATCH_FETCH_COUNT
            || (match_fetch_count as usize) < match_history_len
        {
            return Err(AppError::Config(format!(
                "MATCH_FETCH_COUNT must be between MATCH_HISTORY_LEN ({match_history_len}) and {MAX_MATCH_FETCH_COUNT}"
            )));
        }

        let ddragon_version = lookup("DDRAGON_VERSION").filter(|v| !v.trim().is_empty());

        let bind_addr = lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.into());

        Ok(Self {
            riot_api_key,
            game_name,
            tag_line,
            platform,
            region,
            ranked_queue,
            refresh_interval_secs,
            session_gap_minutes,
            match_history_len,
            match_fetch_count,
            riot_rate_limit_per_second,
            http_timeout_secs,
            ddragon_version,
            icon_refresh_hours,
            bind_addr,
            overlay_refresh_secs,
        })
    }

    pub fn snapshot_settings(&self) -> SnapshotSettings {
        SnapshotSettings {
            game_name: self.game_name.clone(),
            tag_line: self.tag_line.clone(),
            platform: self.platform,
            region: self.region,
            queue: self.ranked_queue.clone(),
            history_len: self.match_history_len,
            fetch_count: self.match_fetch_count,
            session_gap: Duration::from_secs(self.session_gap_minutes * 60),
        }
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs)
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }

    pub fn icon_refresh_interval(&self) -> Duration {
        Duration::from_secs(self.icon_refresh_hours * 60 * 60)
    }
}

fn bounded(key: &str, value: u64, range: RangeInclusive<u64>) -> Result<u64, AppError> {
    if range.contains(&value) {
        Ok(value)
    } else {
        Err(AppError::Config(format!(
            "{key} must be between {} and {}, got {value}",
            range.start(),
            range.end()
        )))
    }
}

fn parse_or<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> Result<T, AppError> {
    match lookup(key) {
        Some(v) => v
            .trim()
            .parse()
            .map_err(|_| AppError::Config(format!("{key} has an invalid value: {v}"))),
        None => Ok(default),
    }
}
