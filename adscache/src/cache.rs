//! Stockage local des médias et workflow de téléchargement
//!
//! Le cache est un répertoire plat indexé par nom de fichier. Le workflow
//! d'un `fetch` :
//!
//! 1. Si le fichier local existe, retour immédiat (cache hit), aucun appel
//!    réseau
//! 2. Sinon GET streamé sur `{base_url}/media/{filename}` avec timeout
//! 3. Écriture par chunks dans `{filename}.part`, puis rename vers le nom
//!    final une fois le flux terminé
//! 4. Sur toute erreur, le fichier temporaire est supprimé

use crate::{FetchError, Result};
use futures_util::StreamExt;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

/// Intervalle de scrutation quand un téléchargement du même nom est en vol
const IN_FLIGHT_POLL: Duration = Duration::from_millis(50);

/// Résultat d'un `fetch` réussi
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Le fichier était déjà présent localement, aucun appel réseau
    Hit,
    /// Le fichier a été téléchargé et écrit sur disque
    Downloaded { bytes: u64, elapsed: Duration },
}

/// Cache de médias d'un écran
///
/// Conçu pour être partagé derrière un `Arc` : l'état mutable se réduit à
/// l'ensemble des téléchargements en vol, protégé par un Mutex.
pub struct MediaCache {
    /// Répertoire de stockage (plat, indexé par nom de fichier)
    storage_dir: PathBuf,
    /// URL de base du serveur (ex: `http://192.168.1.10:8080`)
    base_url: String,
    /// Client HTTP partagé, timeout appliqué à chaque requête
    client: reqwest::Client,
    /// Noms de fichiers dont le téléchargement est en cours
    in_flight: Mutex<HashSet<String>>,
}

impl MediaCache {
    /// Crée un cache dans `storage_dir` (créé si nécessaire)
    ///
    /// # Arguments
    ///
    /// * `storage_dir` - Répertoire de stockage local
    /// * `base_url` - URL de base du serveur de contenu
    /// * `timeout_secs` - Timeout appliqué à chaque téléchargement
    pub fn new(
        storage_dir: impl Into<PathBuf>,
        base_url: impl Into<String>,
        timeout_secs: u64,
    ) -> Result<Self> {
        let storage_dir = storage_dir.into();
        std::fs::create_dir_all(&storage_dir)?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(FetchError::Unknown)?;

        Ok(Self {
            storage_dir,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
            in_flight: Mutex::new(HashSet::new()),
        })
    }

    /// Retourne le répertoire de stockage
    pub fn storage_dir(&self) -> &Path {
        &self.storage_dir
    }

    /// Chemin local associé à un nom de fichier
    pub fn local_path(&self, filename: &str) -> PathBuf {
        self.storage_dir.join(filename)
    }

    /// Indique si un fichier est présent dans le cache
    pub fn contains(&self, filename: &str) -> bool {
        self.local_path(filename).exists()
    }

    /// Récupère un média, depuis le cache ou par téléchargement
    ///
    /// Idempotent : deux appels successifs pour le même nom font au plus un
    /// appel réseau, le second est un pur cache hit. Deux appels concurrents
    /// pour le même nom ne produisent jamais deux écritures sur le même
    /// chemin (garde en vol par nom de fichier).
    pub async fn fetch(&self, filename: &str) -> Result<FetchOutcome> {
        validate_filename(filename)?;

        let path = self.local_path(filename);
        if path.exists() {
            info!(filename, "Cache hit, download skipped");
            return Ok(FetchOutcome::Hit);
        }

        // Garde anti-doublon : attendre la fin d'un téléchargement en vol
        // du même nom avant de poser notre marqueur
        loop {
            let mut in_flight = self.in_flight.lock().await;
            if !in_flight.contains(filename) {
                in_flight.insert(filename.to_string());
                break;
            }
            drop(in_flight);
            tokio::time::sleep(IN_FLIGHT_POLL).await;
        }

        // Re-vérification sous marqueur : le téléchargement attendu a pu
        // produire le fichier
        let result = if path.exists() {
            info!(filename, "Cache hit after concurrent download");
            Ok(FetchOutcome::Hit)
        } else {
            self.download(filename, &path).await
        };

        self.in_flight.lock().await.remove(filename);
        result
    }

    /// Télécharge `filename` vers `path` via un fichier temporaire
    async fn download(&self, filename: &str, path: &Path) -> Result<FetchOutcome> {
        let url = format!("{}/media/{}", self.base_url, filename);
        let tmp = self.storage_dir.join(format!("{filename}.part"));
        debug!(filename, url = %url, "Cache miss, download required");

        match self.stream_to_file(&url, &tmp).await {
            Ok((bytes, elapsed)) => match tokio::fs::rename(&tmp, path).await {
                Ok(()) => {
                    info!(
                        filename,
                        size_kb = %format!("{:.2}", bytes as f64 / 1024.0),
                        elapsed_secs = %format!("{:.2}", elapsed.as_secs_f64()),
                        "Download success"
                    );
                    Ok(FetchOutcome::Downloaded { bytes, elapsed })
                }
                Err(e) => {
                    let _ = tokio::fs::remove_file(&tmp).await;
                    Err(e.into())
                }
            },
            Err(e) => {
                warn!(filename, error = %e, "Download failed");
                let _ = tokio::fs::remove_file(&tmp).await;
                Err(e)
            }
        }
    }

    /// Streame le corps de la réponse dans `tmp` par chunks
    async fn stream_to_file(&self, url: &str, tmp: &Path) -> Result<(u64, Duration)> {
        let start = Instant::now();

        let response = self.client.get(url).send().await.map_err(classify)?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::HttpStatus(status));
        }

        let mut file = tokio::fs::File::create(tmp).await?;
        let mut stream = response.bytes_stream();
        let mut bytes_written: u64 = 0;

        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(classify)?;
            // Un chunk vide n'est jamais écrit
            if chunk.is_empty() {
                continue;
            }
            file.write_all(&chunk).await?;
            bytes_written += chunk.len() as u64;
        }

        file.flush().await?;
        Ok((bytes_written, start.elapsed()))
    }
}

/// Classe une erreur reqwest selon la taxonomie de [`FetchError`]
fn classify(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        FetchError::Timeout
    } else {
        FetchError::Unknown(err)
    }
}

/// Rejette les noms de fichiers vides ou contenant des séparateurs de chemin
///
/// Le cache est un répertoire plat : un nom de fichier ne doit jamais
/// s'échapper du répertoire de stockage.
fn validate_filename(filename: &str) -> Result<()> {
    if filename.trim().is_empty()
        || filename.contains('/')
        || filename.contains('\\')
        || filename.contains("..")
    {
        return Err(FetchError::InvalidFilename(filename.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filenames_with_separators_are_rejected() {
        assert!(validate_filename("ad1.png").is_ok());
        assert!(validate_filename("").is_err());
        assert!(validate_filename("   ").is_err());
        assert!(validate_filename("a/b.png").is_err());
        assert!(validate_filename("..\\b.png").is_err());
        assert!(validate_filename("../etc/passwd").is_err());
    }

    #[test]
    fn base_url_trailing_slash_is_normalized() {
        let dir = tempfile::tempdir().unwrap();
        let cache = MediaCache::new(dir.path(), "http://localhost:8080/", 15).unwrap();
        assert_eq!(cache.base_url, "http://localhost:8080");
    }
}
