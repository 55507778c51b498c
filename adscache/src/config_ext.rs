//! Extension pour intégrer le cache d'écran dans adsconfig
//!
//! Ce module fournit le trait `MediaCacheConfigExt` qui ajoute les accesseurs
//! de la section `device` à `adsconfig::Config`, ainsi qu'une factory pour
//! construire un [`MediaCache`](crate::MediaCache) configuré.

use crate::MediaCache;
use adsconfig::Config;
use anyhow::Result;
use serde_yaml::Value;
use std::sync::Arc;

const DEFAULT_STORAGE_DIR: &str = "device_storage";
const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:8080";
const DEFAULT_WS_URL: &str = "ws://127.0.0.1:8080/ws";
const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 15;

/// Trait d'extension pour la configuration côté écran
///
/// # Exemple
///
/// ```rust,ignore
/// use adsconfig::get_config;
/// use adscache::MediaCacheConfigExt;
///
/// let config = get_config();
/// let cache = config.create_media_cache()?;
/// ```
pub trait MediaCacheConfigExt {
    /// Récupère le répertoire de stockage local (créé si nécessaire)
    fn get_storage_dir(&self) -> Result<String>;

    /// Définit le répertoire de stockage local
    fn set_storage_dir(&self, directory: String) -> Result<()>;

    /// Récupère l'URL de base HTTP du serveur de contenu
    fn get_server_url(&self) -> Result<String>;

    /// Définit l'URL de base HTTP du serveur de contenu
    fn set_server_url(&self, url: String) -> Result<()>;

    /// Récupère l'URL WebSocket du serveur de notifications
    fn get_server_ws_url(&self) -> Result<String>;

    /// Définit l'URL WebSocket du serveur de notifications
    fn set_server_ws_url(&self, url: String) -> Result<()>;

    /// Récupère le timeout de téléchargement en secondes
    fn get_fetch_timeout_secs(&self) -> Result<u64>;

    /// Définit le timeout de téléchargement en secondes
    fn set_fetch_timeout_secs(&self, secs: u64) -> Result<()>;

    /// Crée une instance de [`MediaCache`] configurée
    fn create_media_cache(&self) -> Result<Arc<MediaCache>>;
}

impl MediaCacheConfigExt for Config {
    fn get_storage_dir(&self) -> Result<String> {
        self.get_managed_dir(&["device", "storage_dir"], DEFAULT_STORAGE_DIR)
    }

    fn set_storage_dir(&self, directory: String) -> Result<()> {
        self.set_managed_dir(&["device", "storage_dir"], directory)
    }

    fn get_server_url(&self) -> Result<String> {
        match self.get_value(&["device", "server_url"])? {
            Value::String(s) if !s.is_empty() => Ok(s),
            _ => Ok(DEFAULT_SERVER_URL.to_string()),
        }
    }

    fn set_server_url(&self, url: String) -> Result<()> {
        self.set_value(&["device", "server_url"], Value::String(url))
    }

    fn get_server_ws_url(&self) -> Result<String> {
        match self.get_value(&["device", "ws_url"])? {
            Value::String(s) if !s.is_empty() => Ok(s),
            _ => Ok(DEFAULT_WS_URL.to_string()),
        }
    }

    fn set_server_ws_url(&self, url: String) -> Result<()> {
        self.set_value(&["device", "ws_url"], Value::String(url))
    }

    fn get_fetch_timeout_secs(&self) -> Result<u64> {
        match self.get_value(&["device", "fetch_timeout_secs"])? {
            Value::Number(n) if n.is_u64() => Ok(n.as_u64().unwrap()),
            Value::Number(n) if n.is_i64() => Ok(n.as_i64().unwrap().max(1) as u64),
            _ => Ok(DEFAULT_FETCH_TIMEOUT_SECS),
        }
    }

    fn set_fetch_timeout_secs(&self, secs: u64) -> Result<()> {
        let n = serde_yaml::Number::from(secs);
        self.set_value(&["device", "fetch_timeout_secs"], Value::Number(n))
    }

    fn create_media_cache(&self) -> Result<Arc<MediaCache>> {
        let dir = self.get_storage_dir()?;
        let url = self.get_server_url()?;
        let timeout = self.get_fetch_timeout_secs()?;
        Ok(Arc::new(MediaCache::new(dir, url, timeout)?))
    }
}
