//! API d'upload : le déclencheur des diffusions
//!
//! L'écriture du fichier sous la racine média précède strictement la
//! diffusion : une notification n'est jamais émise pendant que le fichier
//! s'écrit. `notified_screens` dans la réponse est exactement le compte de
//! succès du dispatcher.

use crate::broadcast::broadcast_new_content;
use crate::AppState;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use std::time::Instant;
use tracing::{error, info};
use utoipa::ToSchema;
use uuid::Uuid;

/// Réponse d'un upload réussi
#[derive(Debug, Serialize, ToSchema)]
pub struct UploadResponse {
    /// Toujours `"uploaded"`
    #[schema(example = "uploaded")]
    pub status: String,
    /// Identifiant court de la requête (corrélation des logs)
    #[schema(example = "1a2b3c4d")]
    pub request_id: String,
    /// Nom du fichier stocké
    #[schema(example = "ad1.png")]
    pub filename: String,
    /// Route de téléchargement du fichier
    #[schema(example = "/media/ad1.png")]
    pub file_url: String,
    /// Taille du fichier en kilo-octets
    pub file_size_kb: f64,
    /// Nombre d'écrans effectivement notifiés
    pub notified_screens: usize,
}

/// Réponse d'erreur d'upload
#[derive(Debug, Serialize, ToSchema)]
pub struct UploadErrorResponse {
    /// Toujours `"error"`
    #[schema(example = "error")]
    pub status: String,
    pub request_id: String,
    pub message: String,
}

/// Forme du corps multipart attendu par `/upload`
#[derive(ToSchema)]
#[allow(dead_code)]
pub struct UploadForm {
    /// Contenu du fichier média
    #[schema(value_type = String, format = Binary)]
    file: String,
}

/// Reçoit un média (multipart, champ `file`), l'écrit sous la racine média
/// puis notifie tous les écrans connectés
#[utoipa::path(
    post,
    path = "/upload",
    tag = "media",
    request_body(content = UploadForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Fichier stocké et écrans notifiés", body = UploadResponse),
        (status = 400, description = "Requête invalide", body = UploadErrorResponse),
        (status = 500, description = "Échec de stockage", body = UploadErrorResponse)
    )
)]
pub async fn upload_media(State(state): State<AppState>, multipart: Multipart) -> Response {
    let request_id = short_request_id();
    let started = Instant::now();
    info!(%request_id, "Upload started");

    match handle_upload(&state, multipart, &request_id).await {
        Ok(response) => {
            info!(
                %request_id,
                filename = %response.filename,
                file_size_kb = response.file_size_kb,
                notified_screens = response.notified_screens,
                elapsed_secs = %format!("{:.2}", started.elapsed().as_secs_f64()),
                "Upload completed"
            );
            (StatusCode::OK, Json(response)).into_response()
        }
        Err((status, message)) => {
            error!(%request_id, %status, %message, "Upload failed");
            (
                status,
                Json(UploadErrorResponse {
                    status: "error".to_string(),
                    request_id,
                    message,
                }),
            )
                .into_response()
        }
    }
}

async fn handle_upload(
    state: &AppState,
    mut multipart: Multipart,
    request_id: &str,
) -> Result<UploadResponse, (StatusCode, String)> {
    let field = loop {
        match multipart.next_field().await {
            Ok(Some(field)) if field.name() == Some("file") => break field,
            Ok(Some(_)) => continue,
            Ok(None) => {
                return Err((
                    StatusCode::BAD_REQUEST,
                    "Missing multipart field 'file'".to_string(),
                ));
            }
            Err(e) => return Err((StatusCode::BAD_REQUEST, format!("Malformed multipart: {e}"))),
        }
    };

    let filename = field
        .file_name()
        .map(str::to_string)
        .unwrap_or_default();
    validate_filename(&filename)?;

    let data = field
        .bytes()
        .await
        .map_err(|e| (StatusCode::BAD_REQUEST, format!("Cannot read upload: {e}")))?;
    let file_size_kb = (data.len() as f64 / 1024.0 * 100.0).round() / 100.0;

    // Écriture durable d'abord, notification ensuite
    let target = state.media_dir.join(&filename);
    tokio::fs::write(&target, &data).await.map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Cannot store file: {e}"),
        )
    })?;
    info!(%request_id, path = %target.display(), "File stored");

    let notified_screens = broadcast_new_content(&state.registry, &filename);

    Ok(UploadResponse {
        status: "uploaded".to_string(),
        request_id: request_id.to_string(),
        filename: filename.clone(),
        file_url: format!("/media/{filename}"),
        file_size_kb,
        notified_screens,
    })
}

/// Rejette les noms vides ou contenant des séparateurs de chemin
///
/// La racine média est plate : un nom d'upload ne doit jamais s'en échapper.
fn validate_filename(filename: &str) -> Result<(), (StatusCode, String)> {
    if filename.trim().is_empty()
        || filename.contains('/')
        || filename.contains('\\')
        || filename.contains("..")
    {
        return Err((
            StatusCode::BAD_REQUEST,
            format!("Invalid filename: {filename:?}"),
        ));
    }
    Ok(())
}

fn short_request_id() -> String {
    Uuid::new_v4().simple().to_string()[..8].to_string()
}
