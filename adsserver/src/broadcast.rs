//! Diffusion best-effort des annonces de contenu

use crate::registry::ScreenRegistry;
use adsproto::ContentNotification;
use tracing::{debug, info, warn};

/// Annonce un nouveau fichier à tous les écrans enregistrés
///
/// Itère un snapshot du registre et tente un envoi `NEW_CONTENT:<filename>`
/// vers chaque poignée. Un échec sur une connexion est isolé : il est logué,
/// la connexion morte est retirée du registre, et la diffusion continue vers
/// les suivantes. Pas de réessai, pas de persistance des évènements non
/// délivrés — un écran hors ligne au moment de la diffusion manque
/// définitivement la notification.
///
/// # Returns
///
/// Le nombre d'envois réussis.
pub fn broadcast_new_content(registry: &ScreenRegistry, filename: &str) -> usize {
    let message = ContentNotification::wire_message(filename);
    let snapshot = registry.snapshot();
    let total = snapshot.len();
    let mut notified = 0;

    for screen in snapshot {
        if screen.send(message.clone()) {
            notified += 1;
            debug!(screen = %screen.id, "Notification sent");
        } else {
            // Canal fermé : la connexion ne peut plus recevoir, on la retire
            warn!(
                screen = %screen.id,
                remote_addr = %screen.remote_addr,
                "Send failed, dropping dead connection"
            );
            registry.unregister(screen.id);
        }
    }

    info!(filename, notified, total, "Broadcast completed");
    notified
}
