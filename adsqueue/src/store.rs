//! Lecture et mise à jour du fichier de file JSON

use crate::{QueueItem, Result};
use chrono::Utc;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tracing::{debug, info, warn};

/// Accès au fichier de file d'un écran
///
/// Toutes les opérations relisent le fichier : la file peut être modifiée à
/// tout moment par le producteur externe. Un seul processus de lecture par
/// écran est supposé.
pub struct QueueStore {
    queue_file: PathBuf,
}

impl QueueStore {
    /// Crée un accès sur le chemin de file donné (typiquement
    /// `{media_root}/queue/media_queue.json`)
    pub fn new(queue_file: impl Into<PathBuf>) -> Self {
        Self {
            queue_file: queue_file.into(),
        }
    }

    /// Retourne le chemin du fichier de file
    pub fn queue_file(&self) -> &Path {
        &self.queue_file
    }

    /// Date de dernière modification du fichier, si disponible
    ///
    /// Utilisé par le poller de rafraîchissement, purement consultatif.
    pub fn modified(&self) -> Option<SystemTime> {
        std::fs::metadata(&self.queue_file)
            .and_then(|m| m.modified())
            .ok()
    }

    /// Charge tous les éléments dans l'ordre du fichier
    ///
    /// Fichier absent : file vide. Fichier corrompu : file vide avec un
    /// warning, jamais une erreur — le filtrage `played=false` appartient à
    /// l'appelant.
    pub async fn load(&self) -> Vec<QueueItem> {
        let data = match tokio::fs::read(&self.queue_file).await {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(file = %self.queue_file.display(), "Queue file not found");
                return Vec::new();
            }
            Err(e) => {
                warn!(file = %self.queue_file.display(), error = %e, "Cannot read queue file");
                return Vec::new();
            }
        };

        match serde_json::from_slice::<Vec<QueueItem>>(&data) {
            Ok(items) => {
                debug!(count = items.len(), "Loaded queue items");
                items
            }
            Err(e) => {
                warn!(
                    file = %self.queue_file.display(),
                    error = %e,
                    "Malformed queue file, treated as empty"
                );
                Vec::new()
            }
        }
    }

    /// Marque comme joué le premier élément dont le `path` correspond
    ///
    /// Relit le fichier, positionne `played=true` et `played_at=now`, puis
    /// réécrit le fichier entier par remplacement atomique. Idempotent : un
    /// élément déjà joué est laissé intact (pas de réécriture, pas de
    /// duplication, pas de réordonnancement).
    ///
    /// # Returns
    ///
    /// `true` si un élément vient d'être marqué, `false` sinon (absent ou
    /// déjà joué).
    pub async fn mark_played(&self, path: &str) -> Result<bool> {
        let mut items = self.load().await;

        let Some(item) = items.iter_mut().find(|i| i.path == path) else {
            warn!(path, "Queue item not found, nothing to mark");
            return Ok(false);
        };

        if item.played {
            debug!(path, "Queue item already played");
            return Ok(false);
        }

        item.played = true;
        item.played_at = Some(Utc::now());

        self.write_atomic(&items).await?;
        info!(path, "Queue item marked as played");
        Ok(true)
    }

    /// Réécrit le fichier entier via un fichier temporaire puis rename
    ///
    /// Le fichier de file reste du JSON valide quel que soit le moment où le
    /// processus est interrompu.
    async fn write_atomic(&self, items: &[QueueItem]) -> Result<()> {
        if let Some(parent) = self.queue_file.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let json = serde_json::to_string_pretty(items)?;
        let tmp = tmp_path(&self.queue_file);
        tokio::fs::write(&tmp, json).await?;
        tokio::fs::rename(&tmp, &self.queue_file).await?;
        Ok(())
    }
}

fn tmp_path(file: &Path) -> PathBuf {
    let mut name = file.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    file.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tmp_path_is_a_sibling() {
        let tmp = tmp_path(Path::new("/data/queue/media_queue.json"));
        assert_eq!(tmp, Path::new("/data/queue/media_queue.json.tmp"));
    }
}
