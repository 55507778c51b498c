//! Binaire agent AdScreen : synchronise le cache local d'un écran

use adscache::MediaCacheConfigExt;
use adsconfig::get_config;
use adsdevice::DeviceAgent;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = get_config();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(config.get_log_min_level().unwrap_or_else(|_| "info".into()))
    });
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let screen_id = config.get_device_id()?;
    let ws_url = config.get_server_ws_url()?;
    let cache = config.create_media_cache()?;

    let agent = DeviceAgent::new(screen_id, ws_url, cache);
    agent.run().await
}
