//! # adsserver - Serveur de diffusion AdScreen
//!
//! Cette crate fournit le côté serveur du système AdScreen : la réception
//! des uploads de médias et leur diffusion vers la flotte d'écrans
//! connectés.
//!
//! ## Fonctionnalités
//!
//! - 🚀 **API de haut niveau** : serveur HTTP Axum via [`Server`] /
//!   [`ServerBuilder`]
//! - 📺 **Registre d'écrans** : connexions WebSocket vivantes, ajout/retrait
//!   sûrs sous concurrence ([`ScreenRegistry`])
//! - 📡 **Diffusion best-effort** : fan-out `NEW_CONTENT:<filename>` avec
//!   isolation des échecs par connexion ([`broadcast_new_content`])
//! - 📤 **Upload déclencheur** : écriture durable puis notification, jamais
//!   l'inverse
//! - 📁 **Médias statiques** : `GET /media/{filename}` sert les octets bruts
//! - 📚 **Documentation OpenAPI** : Swagger UI automatique
//!
//! ## Garanties de diffusion
//!
//! La diffusion est best-effort : aucun réessai, aucune persistance des
//! évènements non délivrés. Un écran déconnecté au moment de la diffusion
//! manque définitivement la notification (pas de resynchronisation à la
//! reconnexion).
//!
//! ## Exemple
//!
//! ```rust,no_run
//! use adsserver::{AppState, ScreenServerExt, Server};
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut server = Server::new_configured();
//!     let state = AppState::new("uploads");
//!     server.init_screen_system(state).await;
//!     server.start().await;
//!     server.wait().await;
//! }
//! ```

use std::path::PathBuf;
use std::sync::Arc;

mod api;
mod broadcast;
mod ext;
pub mod logging;
mod openapi;
mod registry;
mod server;
mod upload;
mod ws;

pub use api::{screens_api_router, ServerStatus};
pub use broadcast::broadcast_new_content;
pub use ext::{screen_routes, ScreenServerExt};
pub use openapi::ApiDoc;
pub use registry::{ScreenHandle, ScreenId, ScreenInfo, ScreenRegistry};
pub use server::{Server, ServerBuilder, ServerInfo};
pub use upload::{UploadErrorResponse, UploadResponse};
pub use ws::ws_handler;

/// État partagé des handlers du serveur
#[derive(Clone)]
pub struct AppState {
    /// Registre des écrans connectés
    pub registry: Arc<ScreenRegistry>,
    /// Racine des médias uploadés
    pub media_dir: PathBuf,
}

impl AppState {
    pub fn new(media_dir: impl Into<PathBuf>) -> Self {
        Self {
            registry: Arc::new(ScreenRegistry::new()),
            media_dir: media_dir.into(),
        }
    }
}
