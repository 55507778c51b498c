//! API REST de diagnostic du serveur AdScreen

use crate::registry::ScreenInfo;
use crate::AppState;
use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use utoipa::ToSchema;

/// État synthétique du serveur
#[derive(Debug, Serialize, ToSchema)]
pub struct ServerStatus {
    #[schema(example = "online")]
    pub status: String,
    /// Nombre d'écrans actuellement connectés
    pub connected_screens: usize,
}

/// Liste les écrans actuellement connectés
#[utoipa::path(
    get,
    path = "/screens",
    tag = "screens",
    responses(
        (status = 200, description = "Connexions écrans vivantes", body = [ScreenInfo])
    )
)]
pub async fn list_screens(State(state): State<AppState>) -> Json<Vec<ScreenInfo>> {
    Json(state.registry.list())
}

/// État synthétique du serveur
#[utoipa::path(
    get,
    path = "/status",
    tag = "screens",
    responses(
        (status = 200, description = "État du serveur", body = ServerStatus)
    )
)]
pub async fn server_status(State(state): State<AppState>) -> Json<ServerStatus> {
    Json(ServerStatus {
        status: "online".to_string(),
        connected_screens: state.registry.count(),
    })
}

/// Router API de diagnostic, prêt à être monté via `add_openapi`
pub fn screens_api_router(state: AppState) -> Router {
    Router::new()
        .route("/screens", get(list_screens))
        .route("/status", get(server_status))
        .with_state(state)
}
