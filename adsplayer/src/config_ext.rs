//! Extension pour intégrer le player dans adsconfig
//!
//! Accesseurs de la section `player` de la configuration, et factories pour
//! construire l'état de lecture et le scheduler configurés.

use crate::{DisplayDurations, PlayMode, PlaybackState, Scheduler};
use adsconfig::Config;
use anyhow::Result;
use serde_yaml::Value;

const DEFAULT_MEDIA_ROOT: &str = "shared_media";
const DEFAULT_IMAGE_SECS: u64 = 5;
const DEFAULT_VIDEO_SECS: u64 = 10;
const DEFAULT_WAITING_RETRY_SECS: u64 = 2;

/// Trait d'extension pour la configuration du player
///
/// # Exemple
///
/// ```rust,ignore
/// use adsconfig::get_config;
/// use adsplayer::PlayerConfigExt;
///
/// let config = get_config();
/// let scheduler = config.create_scheduler()?;
/// ```
pub trait PlayerConfigExt {
    /// Récupère la racine média locale (créée si nécessaire)
    fn get_media_root(&self) -> Result<String>;

    /// Définit la racine média locale
    fn set_media_root(&self, directory: String) -> Result<()>;

    /// Récupère la durée d'affichage des images en secondes
    fn get_display_time_image(&self) -> Result<u64>;

    /// Récupère la durée d'affichage des vidéos en secondes
    fn get_display_time_video(&self) -> Result<u64>;

    /// Récupère le mode de lecture (`sequential` par défaut)
    fn get_play_mode(&self) -> Result<PlayMode>;

    /// Définit le mode de lecture
    fn set_play_mode(&self, mode: PlayMode) -> Result<()>;

    /// Récupère l'activation de la lecture en boucle
    fn get_loop_enabled(&self) -> Result<bool>;

    /// Récupère le délai de réessai de l'écran d'attente en secondes
    fn get_waiting_retry_secs(&self) -> Result<u64>;

    /// Construit l'état de lecture initial depuis la configuration
    fn create_playback_state(&self) -> Result<PlaybackState>;

    /// Construit un scheduler configuré (racine média + état initial)
    fn create_scheduler(&self) -> Result<Scheduler>;
}

fn get_u64(config: &Config, path: &[&str], default: u64) -> Result<u64> {
    match config.get_value(path)? {
        Value::Number(n) if n.is_u64() => Ok(n.as_u64().unwrap()),
        Value::Number(n) if n.is_i64() => Ok(n.as_i64().unwrap().max(0) as u64),
        _ => Ok(default),
    }
}

impl PlayerConfigExt for Config {
    fn get_media_root(&self) -> Result<String> {
        self.get_managed_dir(&["player", "media_root"], DEFAULT_MEDIA_ROOT)
    }

    fn set_media_root(&self, directory: String) -> Result<()> {
        self.set_managed_dir(&["player", "media_root"], directory)
    }

    fn get_display_time_image(&self) -> Result<u64> {
        get_u64(
            self,
            &["player", "display_time", "image"],
            DEFAULT_IMAGE_SECS,
        )
    }

    fn get_display_time_video(&self) -> Result<u64> {
        get_u64(
            self,
            &["player", "display_time", "video"],
            DEFAULT_VIDEO_SECS,
        )
    }

    fn get_play_mode(&self) -> Result<PlayMode> {
        match self.get_value(&["player", "play_mode"])? {
            Value::String(s) => Ok(PlayMode::parse(&s).unwrap_or(PlayMode::Sequential)),
            _ => Ok(PlayMode::Sequential),
        }
    }

    fn set_play_mode(&self, mode: PlayMode) -> Result<()> {
        self.set_value(
            &["player", "play_mode"],
            Value::String(mode.as_str().to_string()),
        )
    }

    fn get_loop_enabled(&self) -> Result<bool> {
        match self.get_value(&["player", "loop"])? {
            Value::Bool(b) => Ok(b),
            _ => Ok(true),
        }
    }

    fn get_waiting_retry_secs(&self) -> Result<u64> {
        get_u64(
            self,
            &["player", "waiting_retry_secs"],
            DEFAULT_WAITING_RETRY_SECS,
        )
    }

    fn create_playback_state(&self) -> Result<PlaybackState> {
        Ok(PlaybackState {
            mode: self.get_play_mode()?,
            loop_enabled: self.get_loop_enabled()?,
            current_index: 0,
            display: DisplayDurations {
                image_secs: self.get_display_time_image()?,
                video_secs: self.get_display_time_video()?,
            },
        })
    }

    fn create_scheduler(&self) -> Result<Scheduler> {
        let root = self.get_media_root()?;
        let state = self.create_playback_state()?;
        Ok(Scheduler::new(root, state))
    }
}
