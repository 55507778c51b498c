//! Poller de rafraîchissement de la file
//!
//! Observe la date de modification du fichier de file et trace les mises à
//! jour. Purement consultatif : seul la boucle de diffusion mute l'état de
//! lecture, et la file est de toute façon relue à chaque sélection.

use adsqueue::QueueStore;
use std::path::PathBuf;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, info};

/// Lance la tâche de surveillance du fichier de file
///
/// # Arguments
///
/// * `queue_file` - Chemin du fichier de file
/// * `interval` - Période de scrutation (5s dans la configuration d'origine)
pub fn spawn_queue_refresh(queue_file: PathBuf, interval: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let store = QueueStore::new(queue_file);
        let mut last_seen = store.modified();

        loop {
            tokio::time::sleep(interval).await;

            let current = store.modified();
            if current != last_seen {
                info!(file = %store.queue_file().display(), "Queue updated, refreshing");
                last_seen = current;
            } else {
                debug!("Queue unchanged");
            }
        }
    })
}
