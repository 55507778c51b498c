//! Binaire serveur AdScreen : upload, diffusion et service des médias

use adsconfig::get_config;
use adsserver::logging::{init_logging, LoggingOptions};
use adsserver::{AppState, ScreenServerExt, Server};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // ========== PHASE 1 : Infrastructure ==========

    init_logging(LoggingOptions::default());
    info!("🚀 AdScreen server booting");

    let config = get_config();
    let media_dir = config.get_media_dir()?;
    info!(media_dir = %media_dir, "📂 Upload directory ready");

    let mut server = Server::new_configured();

    // Routes personnalisées de l'application
    server
        .add_route("/info", || async {
            serde_json::json!({"name": "AdScreen", "version": "0.1.0"})
        })
        .await;

    // ========== PHASE 2 : Système d'écrans ==========

    info!("📡 Installing screen distribution system...");
    let state = AppState::new(&media_dir);
    server.init_screen_system(state).await;
    info!("🌐 Static media endpoint mounted at /media");

    // ========== PHASE 3 : Démarrage du serveur ==========

    info!("🌐 Starting HTTP server...");
    server.start().await;

    info!("✅ AdScreen is ready!");
    info!("Press Ctrl+C to stop...");
    server.wait().await;

    Ok(())
}
