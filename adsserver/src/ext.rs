//! Extension d'installation du système d'écrans sur le [`Server`]
//!
//! Monte en un appel tout ce que le serveur AdScreen expose :
//! - `GET /ws` : canal persistant des écrans
//! - `POST /upload` : stockage + diffusion
//! - `GET /media/{filename}` : octets bruts des médias stockés
//! - `/api/adscreen/...` : API de diagnostic documentée (Swagger)

use crate::api::screens_api_router;
use crate::openapi::ApiDoc;
use crate::server::Server;
use crate::upload::upload_media;
use crate::ws::ws_handler;
use crate::AppState;
use axum::routing::{get, post};
use axum::Router;
use tower_http::services::ServeDir;
use utoipa::OpenApi;

/// Routes du cœur AdScreen (WS, upload, médias statiques)
///
/// Utilisable directement dans les tests ; les binaires passent par
/// [`ScreenServerExt::init_screen_system`].
pub fn screen_routes(state: AppState) -> Router {
    let media_dir = state.media_dir.clone();
    Router::new()
        .route("/ws", get(ws_handler))
        .route("/upload", post(upload_media))
        .with_state(state)
        .nest_service("/media", ServeDir::new(media_dir))
}

/// Trait d'extension pour installer le système d'écrans
pub trait ScreenServerExt {
    /// Monte les routes AdScreen et l'API documentée sur le serveur
    async fn init_screen_system(&mut self, state: AppState);
}

impl ScreenServerExt for Server {
    async fn init_screen_system(&mut self, state: AppState) {
        self.add_router("/", screen_routes(state.clone())).await;
        self.add_openapi(
            screens_api_router(state),
            ApiDoc::openapi(),
            "adscreen",
        )
        .await;
    }
}
