//! Documentation OpenAPI du serveur AdScreen

use utoipa::OpenApi;

/// Documentation OpenAPI (upload + diagnostic des écrans)
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::upload::upload_media,
        crate::api::list_screens,
        crate::api::server_status,
    ),
    components(
        schemas(
            crate::upload::UploadResponse,
            crate::upload::UploadErrorResponse,
            crate::upload::UploadForm,
            crate::api::ServerStatus,
            crate::registry::ScreenInfo,
        )
    ),
    tags(
        (name = "media", description = "Upload et diffusion de contenu"),
        (name = "screens", description = "Diagnostic des écrans connectés")
    ),
    info(
        title = "AdScreen Server API",
        version = "0.1.0",
        description = r#"
# Serveur de diffusion AdScreen

- `POST /upload` : stocke un média puis notifie tous les écrans connectés
  (`NEW_CONTENT:<filename>` sur le canal WebSocket)
- `GET /media/{filename}` : sert les octets bruts d'un média stocké
- `GET /api/adscreen/screens` : liste les connexions écrans vivantes
- `GET /api/adscreen/status` : état synthétique du serveur
        "#,
        license(
            name = "MIT",
        ),
    )
)]
pub struct ApiDoc;
