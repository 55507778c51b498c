//! # adsqueue - File de lecture persistante d'un écran
//!
//! Cette crate gère la file d'attente des médias à diffuser, partagée entre
//! le pipeline d'upload (producteur, hors de cette crate) et le scheduler de
//! lecture (consommateur) :
//! - Tableau JSON à chemin fixe (`queue/media_queue.json` sous la racine
//!   média)
//! - Chargement tolérant : fichier absent ou corrompu = file vide, jamais
//!   fatal
//! - Marquage `played` en lecture-modification-écriture avec remplacement
//!   atomique : le fichier reste du JSON valide après chaque écriture
//!
//! La crate suppose un seul processus de lecture par écran : le
//! read-modify-write n'est pas protégé contre des écrivains concurrents
//! (contrainte documentée, non vérifiée).

mod item;
mod store;

pub use item::{MediaType, QueueItem};
pub use store::QueueStore;

/// Erreurs de persistance de la file
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Queue I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Queue serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Type Result spécialisé pour adsqueue
pub type Result<T> = std::result::Result<T, Error>;
