//! # adscache - Cache de contenu côté écran
//!
//! Cette crate gère le stockage local des médias sur un écran :
//! - Résolution hit/miss : la présence du fichier local EST le signal de
//!   cache hit, sans base de métadonnées séparée
//! - Téléchargement streamé depuis le serveur avec timeout borné
//! - Écriture atomique (fichier temporaire puis rename) : un téléchargement
//!   interrompu ne laisse jamais un fichier partiel passant pour une entrée
//!   valide
//! - Garde anti-doublon : un seul téléchargement en vol par nom de fichier
//!
//! Une entrée écrite est immuable : le même nom de fichier n'est jamais
//! re-téléchargé (pas de politique d'invalidation).
//!
//! # Exemple
//!
//! ```no_run
//! use adscache::{FetchOutcome, MediaCache};
//!
//! # async fn example() -> adscache::Result<()> {
//! let cache = MediaCache::new("device_storage", "http://192.168.1.10:8080", 15)?;
//!
//! match cache.fetch("ad1.png").await? {
//!     FetchOutcome::Hit => println!("déjà en cache"),
//!     FetchOutcome::Downloaded { bytes, .. } => println!("{bytes} octets téléchargés"),
//! }
//! # Ok(())
//! # }
//! ```

mod cache;

#[cfg(feature = "adsconfig")]
mod config_ext;

pub use cache::{FetchOutcome, MediaCache};

#[cfg(feature = "adsconfig")]
pub use config_ext::MediaCacheConfigExt;

/// Erreurs de récupération d'un média
///
/// Toutes les variantes sont non-fatales pour le processus : un échec laisse
/// simplement l'écran sans ce fichier jusqu'à la prochaine notification du
/// même nom.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("Invalid media filename: {0:?}")]
    InvalidFilename(String),

    #[error("HTTP error: {0}")]
    HttpStatus(reqwest::StatusCode),

    #[error("Download timed out")]
    Timeout,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Transport error: {0}")]
    Unknown(reqwest::Error),
}

/// Type Result spécialisé pour adscache
pub type Result<T> = std::result::Result<T, FetchError>;
