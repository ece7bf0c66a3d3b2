//! Champion icon urls served from Riot's Data Dragon CDN.

use std::sync::{Arc, RwLock};
use std::time::Duration;

use tracing::{info, warn};

use crate::error::AppError;

const DDRAGON_BASE_URL: &str = "https://ddragon.leagueoflegends.com";

pub trait IconResolver: Send + Sync {
    fn champion_icon(&self, champion: &str) -> String;
}

/// Resolves icons against the latest Data Dragon version, refreshed on its own clock.
#[derive(Debug)]
pub struct DataDragonIcons {
    http: reqwest::Client,
    base_url: String,
    version: RwLock<String>,
    pinned: bool,
}

impl DataDragonIcons {
    /// `version` is used until the first successful refresh.
    pub fn new(http: reqwest::Client, version: impl Into<String>) -> Self {
        Self {
            http,
            base_url: DDRAGON_BASE_URL.to_string(),
            version: RwLock::new(version.into()),
            pinned: false,
        }
    }

    /// Always use `version`, [`Self::prime`] and [`Self::refresh_loop`] do nothing.
    pub fn pinned(http: reqwest::Client, version: impl Into<String>) -> Self {
        Self {
            pinned: true,
            ..Self::new(http, version)
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn version(&self) -> String {
        self.version
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Fetch the most recent version token, keeping the current one on failure.
    pub async fn refresh_version(&self) -> Result<String, AppError> {
        let url = format!("{}/api/versions.json", self.base_url);

        let versions: Vec<String> = self
            .http
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let latest = versions.into_iter().next().ok_or_else(|| AppError::Decode {
            url,
            message: "empty version list".to_string(),
        })?;

        *self
            .version
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = latest.clone();

        Ok(latest)
    }

    /// Resolve the current version once, before any icon is handed out.
    pub async fn prime(&self) {
        if self.pinned {
            info!(version = %self.version(), "🖼️ Using pinned Data Dragon version");
            return;
        }

        self.refresh_or_keep().await;
    }

    /// Refresh every `every`, starting one period from now. Call [`Self::prime`] first.
    pub async fn refresh_loop(self: Arc<Self>, every: Duration) {
        if self.pinned {
            return;
        }

        let mut interval = tokio::time::interval_at(tokio::time::Instant::now() + every, every);

        loop {
            interval.tick().await;
            self.refresh_or_keep().await;
        }
    }

    async fn refresh_or_keep(&self) {
        match self.refresh_version().await {
            Ok(version) => info!(%version, "🖼️ Data Dragon version refreshed"),
            Err(e) => warn!(
                error = %e,
                version = %self.version(),
                "🖼️ ⚠️ Failed to refresh Data Dragon version, keeping current one"
            ),
        }
    }
}

impl IconResolver for DataDragonIcons {
    fn champion_icon(&self, champion: &str) -> String {
        // Match-v5 reports the legacy casing, Data Dragon only knows the new one
        let champion = if champion == "FiddleSticks" {
            "Fiddlesticks"
        } else {
            champion
        };

        format!(
            "{}/cdn/{}/img/champion/{}.png",
            self.base_url,
            self.version(),
            champion
        )
    }
}
