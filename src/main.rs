use std::sync::Arc;

use rankwatch::{
    cache,
    config::Config,
    icons::DataDragonIcons,
    logging,
    poller::RefreshScheduler,
    riot::RiotClient,
    server::{self, AppState},
    snapshot::SnapshotBuilder,
};
use tracing::{error, info, warn};

/// Used until the first version lookup succeeds.
const FALLBACK_DDRAGON_VERSION: &str = "16.1.1";

#[tokio::main]
async fn main() {
    logging::init();

    info!("🐙 Starting...");

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("❌ {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = run(config).await {
        error!("❌ {e}");
        std::process::exit(1);
    }
}

async fn run(config: Config) -> Result<(), rankwatch::error::AppError> {
    let client = RiotClient::new(
        config.riot_api_key.clone(),
        config.platform,
        config.region,
        config.riot_rate_limit_per_second,
        config.http_timeout(),
    )?;
    tokio::spawn(client.metrics().log_loop());

    let http = reqwest::Client::builder()
        .timeout(config.http_timeout())
        .build()?;
    let icons = Arc::new(match &config.ddragon_version {
        Some(version) => DataDragonIcons::pinned(http, version.clone()),
        None => DataDragonIcons::new(http, FALLBACK_DDRAGON_VERSION),
    });
    icons.prime().await;
    tokio::spawn(icons.clone().refresh_loop(config.icon_refresh_interval()));

    let builder = SnapshotBuilder::new(Arc::new(client), icons, config.snapshot_settings());
    let (writer, reader) = cache::channel();

    info!(
        player = %format!("{}#{}", config.game_name, config.tag_line),
        platform = %config.platform,
        region = %config.region,
        "🎯 Tracking player"
    );

    RefreshScheduler::new(builder, writer, config.refresh_interval()).start();

    let mut first_refresh = reader.clone();
    tokio::spawn(async move {
        if let Some(state) = first_refresh.wait_ready().await {
            match &state.error {
                None => info!("✅ First snapshot published, overlay is live"),
                Some(e) => warn!(error = %e, "⚠️ First refresh failed, retrying next period"),
            }
        }
    });

    server::serve(
        &config.bind_addr,
        AppState {
            cache: reader,
            overlay_refresh_secs: config.overlay_refresh_secs,
        },
    )
    .await
}
