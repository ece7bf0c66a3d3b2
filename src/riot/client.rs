use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use serde::de::DeserializeOwned;
use tracing::{trace, warn};

use super::metrics::RequestMetrics;
use super::region::{Platform, Region};
use crate::error::{AppError, body_snippet};

pub struct RiotClient {
    http: reqwest::Client,
    limiter: DefaultDirectRateLimiter,
    /// Riot API Key
    key: String,
    platform_url: String,
    regional_url: String,
    metrics: Arc<RequestMetrics>,
}

impl RiotClient {
    pub fn new(
        key: String,
        platform: Platform,
        region: Region,
        rate_limit_per_second: NonZeroU32,
        timeout: Duration,
    ) -> Result<Self, AppError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http,
            limiter: RateLimiter::direct(Quota::per_second(rate_limit_per_second)),
            key,
            platform_url: platform.base_url(),
            regional_url: region.base_url(),
            metrics: RequestMetrics::new(),
        })
    }

    /// Route both platform and regional calls to the same host.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        self.platform_url = base_url.clone();
        self.regional_url = base_url;
        self
    }

    pub fn metrics(&self) -> Arc<RequestMetrics> {
        self.metrics.clone()
    }

    pub(crate) fn platform_url(&self) -> &str {
        &self.platform_url
    }

    pub(crate) fn regional_url(&self) -> &str {
        &self.regional_url
    }

    /// Shared request logic of every endpoint: rate limit, auth header, status and body checks.
    pub(crate) async fn get<T: DeserializeOwned>(&self, url: &str) -> Result<T, AppError> {
        // Ensure we do not exceed the Riot API rate limits before doing any request
        self.limiter.until_ready().await;
        self.metrics.inc();

        trace!(url, "[RIOT::CLIENT] GET");

        let res = self
            .http
            .get(url)
            .header("X-Riot-Token", &self.key)
            .send()
            .await
            .inspect_err(|_| self.metrics.inc_failure())?;

        let status = res.status();
        let body = res
            .text()
            .await
            .inspect_err(|_| self.metrics.inc_failure())?;

        if !status.is_success() {
            self.metrics.inc_failure();
            warn!(status = status.as_u16(), url, "🛰️ ⚠️ Riot API returned an error");
            return Err(AppError::RiotApi {
                status: status.as_u16(),
                message: body_snippet(&body),
            });
        }

        serde_json::from_str(&body).map_err(|e| {
            self.metrics.inc_failure();
            AppError::Decode {
                url: url.to_string(),
                message: format!("{e} (body: {})", body_snippet(&body)),
            }
        })
    }
}
