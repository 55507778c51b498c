//! Binaire player AdScreen : boucle de diffusion pilotée au clavier
//!
//! Sans couche d'affichage, le rendu passe par [`LogRenderer`] : chaque
//! transition est tracée. Les commandes arrivent par stdin, une par ligne.

use adsconfig::get_config;
use adsplayer::{
    spawn_queue_refresh, LogRenderer, PlayMode, Player, PlayerCommand, PlayerConfigExt,
};
use std::time::Duration;
use tokio::io::AsyncBufReadExt;
use tokio::sync::mpsc;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Période de scrutation du fichier de file
const QUEUE_REFRESH_INTERVAL: Duration = Duration::from_secs(5);

fn parse_command(line: &str) -> Option<PlayerCommand> {
    match line.trim() {
        "n" | "next" | "skip" => Some(PlayerCommand::Skip),
        "q" | "quit" | "exit" => Some(PlayerCommand::Quit),
        "r" | "random" => Some(PlayerCommand::SetMode(PlayMode::Random)),
        "s" | "sequential" => Some(PlayerCommand::SetMode(PlayMode::Sequential)),
        "l" | "loop" => Some(PlayerCommand::ToggleLoop),
        "+" => Some(PlayerCommand::IncreaseDisplayTime),
        "-" => Some(PlayerCommand::DecreaseDisplayTime),
        _ => None,
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = get_config();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(config.get_log_min_level().unwrap_or_else(|_| "info".into()))
    });
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let screen_id = config.get_device_id()?;
    let scheduler = config.create_scheduler()?;
    let waiting_retry = config.get_waiting_retry_secs()?;

    info!("🎬 AdScreen player ready");
    info!(screen = %screen_id, media_root = %scheduler.media_root().display(), "Settings");
    {
        let state = scheduler.state();
        info!(
            image_secs = state.display.image_secs,
            video_secs = state.display.video_secs,
            mode = state.mode.as_str(),
            loop_enabled = state.loop_enabled,
            "Playback configuration"
        );
    }
    info!("Controls: n=next | q=quit | r=random | s=sequential | l=loop | +/-=display time");

    // Surveillance consultative du fichier de file
    spawn_queue_refresh(scheduler.queue_file().to_path_buf(), QUEUE_REFRESH_INTERVAL);

    // Lecture des commandes sur stdin, une par ligne
    let (tx, rx) = mpsc::unbounded_channel();
    tokio::spawn(async move {
        let mut lines = tokio::io::BufReader::new(tokio::io::stdin()).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            match parse_command(&line) {
                Some(cmd) => {
                    if tx.send(cmd).is_err() {
                        break;
                    }
                }
                None => {
                    if !line.trim().is_empty() {
                        info!(input = %line.trim(), "Unknown command (n/q/r/s/l/+/-)");
                    }
                }
            }
        }
    });

    let mut player = Player::new(scheduler, LogRenderer::new(screen_id), rx)
        .with_waiting_retry(Duration::from_secs(waiting_retry));
    player.run().await;

    info!("🛑 AdScreen player stopped");
    Ok(())
}
