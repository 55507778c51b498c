//! Sélection du prochain média à diffuser

use crate::scan::{scan_local_media, MediaItem};
use crate::state::{PlayMode, PlaybackState};
use adsqueue::QueueStore;
use rand::Rng;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Scheduler de sélection
///
/// La file de lecture est toujours prioritaire sur le scan local : un
/// élément non joué de la file est retourné (et marqué joué) avant toute
/// considération du contenu des dossiers.
pub struct Scheduler {
    queue: QueueStore,
    media_root: PathBuf,
    state: PlaybackState,
    /// Cycle séquentiel terminé alors que la boucle est désactivée
    cycle_complete: bool,
}

impl Scheduler {
    /// Crée un scheduler sur une racine média
    ///
    /// La file est attendue à `{media_root}/queue/media_queue.json`.
    pub fn new(media_root: impl Into<PathBuf>, state: PlaybackState) -> Self {
        let media_root = media_root.into();
        let queue = QueueStore::new(media_root.join("queue").join("media_queue.json"));
        Self {
            queue,
            media_root,
            state,
            cycle_complete: false,
        }
    }

    /// Retourne la racine média
    pub fn media_root(&self) -> &Path {
        &self.media_root
    }

    /// Retourne le chemin du fichier de file
    pub fn queue_file(&self) -> &Path {
        self.queue.queue_file()
    }

    /// Accès en lecture à l'état de lecture
    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    /// Accès mutable à l'état de lecture (boucle de diffusion uniquement)
    pub fn state_mut(&mut self) -> &mut PlaybackState {
        &mut self.state
    }

    /// Réarme la lecture après un `ToggleLoop`
    pub fn reset_cycle(&mut self) {
        self.cycle_complete = false;
    }

    /// Sélectionne le prochain média
    ///
    /// 1. Premier élément non joué de la file (ordre du fichier), marqué
    ///    joué immédiatement
    /// 2. Sinon, scan local en mode séquentiel ou aléatoire
    /// 3. `None` si aucun média n'est disponible (l'appelant affiche l'écran
    ///    d'attente et réessaie plus tard)
    pub async fn select_next(&mut self) -> Option<MediaItem> {
        let items = self.queue.load().await;
        if let Some(item) = items.iter().find(|i| !i.played) {
            if let Err(e) = self.queue.mark_played(&item.path).await {
                warn!(path = %item.path, error = %e, "Cannot mark queue item as played");
            }
            info!(name = %item.name, "Selected from queue");
            return Some(MediaItem::from(item));
        }

        let candidates = scan_local_media(&self.media_root);
        self.next_from_candidates(&candidates)
    }

    /// Sélectionne dans une liste de candidats selon le mode courant
    ///
    /// En mode séquentiel, l'index est appliqué modulo la taille de la
    /// liste : il ne sort jamais des bornes même si la liste a rétréci entre
    /// deux appels. En mode aléatoire, tirage uniforme sans évitement de
    /// répétition.
    pub fn next_from_candidates(&mut self, candidates: &[MediaItem]) -> Option<MediaItem> {
        if candidates.is_empty() {
            return None;
        }

        match self.state.mode {
            PlayMode::Sequential => {
                if self.cycle_complete && !self.state.loop_enabled {
                    return None;
                }

                let idx = self.state.current_index % candidates.len();
                self.state.current_index = (idx + 1) % candidates.len();

                // Fin de cycle : boucle désactivée, on s'arrête après le
                // dernier candidat
                if !self.state.loop_enabled && self.state.current_index == 0 {
                    self.cycle_complete = true;
                }

                Some(candidates[idx].clone())
            }
            PlayMode::Random => {
                let idx = rand::rng().random_range(0..candidates.len());
                Some(candidates[idx].clone())
            }
        }
    }
}
