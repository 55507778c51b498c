//! Boucle de connexion et dispatch des notifications

use adscache::{FetchOutcome, MediaCache};
use adsproto::ContentNotification;
use anyhow::Result;
use futures_util::StreamExt;
use std::sync::Arc;
use tokio_tungstenite::tungstenite::Message;
use tracing::{debug, error, info, warn};

/// Agent d'un écran : une connexion, un cache
pub struct DeviceAgent {
    screen_id: String,
    ws_url: String,
    cache: Arc<MediaCache>,
}

impl DeviceAgent {
    /// # Arguments
    ///
    /// * `screen_id` - Identité de l'écran, reportée dans chaque log
    /// * `ws_url` - URL du canal de notifications (ex: `ws://host:8080/ws`)
    /// * `cache` - Cache local alimenté par les notifications
    pub fn new(screen_id: impl Into<String>, ws_url: impl Into<String>, cache: Arc<MediaCache>) -> Self {
        Self {
            screen_id: screen_id.into(),
            ws_url: ws_url.into(),
            cache,
        }
    }

    /// Se connecte au serveur et traite les notifications jusqu'à la
    /// fermeture du canal
    ///
    /// Les téléchargements sont traités un par un, dans l'ordre d'arrivée
    /// des notifications. Un échec de téléchargement est logué et n'arrête
    /// jamais l'agent.
    pub async fn run(&self) -> Result<()> {
        info!(
            screen = %self.screen_id,
            storage = %self.cache.storage_dir().display(),
            ws_url = %self.ws_url,
            "Device booting, connecting to server"
        );

        let (mut stream, _response) = tokio_tungstenite::connect_async(&self.ws_url).await?;
        info!(screen = %self.screen_id, "WebSocket connected, device ONLINE");

        while let Some(message) = stream.next().await {
            match message {
                Ok(Message::Text(text)) => self.handle_message(text.as_str()).await,
                Ok(Message::Close(frame)) => {
                    let code = frame.map(|f| f.code.to_string());
                    warn!(screen = %self.screen_id, ?code, "Close frame received");
                    break;
                }
                // Ping/pong gérés par tungstenite, frames binaires ignorées
                Ok(_) => {}
                Err(e) => {
                    error!(screen = %self.screen_id, error = %e, "WebSocket error");
                    break;
                }
            }
        }

        warn!(screen = %self.screen_id, "WebSocket disconnected, device OFFLINE");
        Ok(())
    }

    /// Traite une ligne de protocole entrante
    pub async fn handle_message(&self, raw: &str) {
        match ContentNotification::parse(raw) {
            ContentNotification::NewContent { filename } if filename.is_empty() => {
                warn!(screen = %self.screen_id, "Notification with empty filename ignored");
            }
            ContentNotification::NewContent { filename } => {
                info!(screen = %self.screen_id, %filename, "New content assigned");
                match self.cache.fetch(&filename).await {
                    Ok(FetchOutcome::Hit) => {
                        info!(screen = %self.screen_id, %filename, "Already cached, download skipped");
                    }
                    Ok(FetchOutcome::Downloaded { bytes, elapsed }) => {
                        info!(
                            screen = %self.screen_id,
                            %filename,
                            size_kb = %format!("{:.2}", bytes as f64 / 1024.0),
                            elapsed_secs = %format!("{:.2}", elapsed.as_secs_f64()),
                            "File ready for playback"
                        );
                    }
                    Err(e) => {
                        // Non fatal : l'écran restera sans ce fichier jusqu'à
                        // la prochaine notification du même nom
                        error!(screen = %self.screen_id, %filename, error = %e, "Download failed");
                    }
                }
            }
            ContentNotification::Unknown { raw } => {
                debug!(screen = %self.screen_id, payload = %raw, "Unknown message format, ignored");
            }
        }
    }
}
