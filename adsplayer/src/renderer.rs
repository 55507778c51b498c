//! Trait de rendu : la frontière entre le scheduler et l'affichage réel

use crate::MediaItem;
use tracing::{error, info};

/// Échec de rendu d'un média
///
/// Non fatal : la boucle de diffusion affiche un écran d'erreur temporaire
/// puis reprend la sélection.
#[derive(Debug, Clone, thiserror::Error)]
#[error("Render failure: {0}")]
pub struct RenderError(pub String);

/// Abstraction de l'affichage d'un écran
///
/// Les implémentations réelles (framebuffer, lecteur vidéo, …) sont hors du
/// périmètre de cette crate ; [`LogRenderer`] sert pour les binaires sans
/// affichage et pour les tests.
pub trait Renderer {
    /// Affiche une image, qui reste à l'écran jusqu'au prochain appel
    async fn show_image(&mut self, item: &MediaItem) -> Result<(), RenderError>;

    /// Démarre la lecture d'une vidéo
    async fn show_video(&mut self, item: &MediaItem) -> Result<(), RenderError>;

    /// Affiche l'écran d'attente (aucun média disponible)
    async fn show_waiting(&mut self);

    /// Affiche l'écran d'erreur avec un message
    async fn show_error(&mut self, message: &str);
}

/// Renderer de diagnostic : trace chaque transition sans rien afficher
#[derive(Debug, Default)]
pub struct LogRenderer {
    screen_id: String,
}

impl LogRenderer {
    pub fn new(screen_id: impl Into<String>) -> Self {
        Self {
            screen_id: screen_id.into(),
        }
    }
}

impl Renderer for LogRenderer {
    async fn show_image(&mut self, item: &MediaItem) -> Result<(), RenderError> {
        info!(screen = %self.screen_id, name = %item.name, "Displaying image");
        Ok(())
    }

    async fn show_video(&mut self, item: &MediaItem) -> Result<(), RenderError> {
        info!(screen = %self.screen_id, name = %item.name, "Playing video");
        Ok(())
    }

    async fn show_waiting(&mut self) {
        info!(screen = %self.screen_id, "Waiting for media");
    }

    async fn show_error(&mut self, message: &str) {
        error!(screen = %self.screen_id, message, "Render error screen");
    }
}
