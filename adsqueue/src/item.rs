//! QueueItem : un média en attente de diffusion

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Type logique d'un média, déterminant sa durée d'affichage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Image,
    Video,
}

impl MediaType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaType::Image => "image",
            MediaType::Video => "video",
        }
    }
}

impl std::fmt::Display for MediaType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Élément de la file de lecture
///
/// Cycle de vie : ajouté par le producteur externe, marqué `played=true` (une
/// seule fois, jamais l'inverse) par le scheduler, jamais supprimé par ce
/// cœur (la rétention est hors périmètre).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueueItem {
    /// Chemin local du fichier média
    pub path: String,
    /// Type du média (`"image"` ou `"video"` dans le JSON)
    #[serde(rename = "type")]
    pub media_type: MediaType,
    /// Nom d'affichage (nom de fichier)
    pub name: String,
    /// Indique si le média a déjà été diffusé
    #[serde(default)]
    pub played: bool,
    /// Horodatage de diffusion (ISO-8601), présent une fois joué
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub played_at: Option<DateTime<Utc>>,
}

impl QueueItem {
    /// Crée un élément non joué
    pub fn new(path: impl Into<String>, media_type: MediaType, name: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            media_type,
            name: name.into(),
            played: false,
            played_at: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_shape_matches_queue_file_format() {
        let item = QueueItem::new("shared_media/images/ad1.png", MediaType::Image, "ad1.png");
        let json = serde_json::to_value(&item).unwrap();

        assert_eq!(json["path"], "shared_media/images/ad1.png");
        assert_eq!(json["type"], "image");
        assert_eq!(json["name"], "ad1.png");
        assert_eq!(json["played"], false);
        // played_at absent tant que l'élément n'est pas joué
        assert!(json.get("played_at").is_none());
    }

    #[test]
    fn deserializes_without_played_flag() {
        let item: QueueItem = serde_json::from_str(
            r#"{"path": "a.mp4", "type": "video", "name": "a.mp4"}"#,
        )
        .unwrap();
        assert!(!item.played);
        assert!(item.played_at.is_none());
    }

    #[test]
    fn played_at_round_trips_as_iso8601() {
        let mut item = QueueItem::new("a.png", MediaType::Image, "a.png");
        item.played = true;
        item.played_at = Some("2025-03-01T10:30:00Z".parse().unwrap());

        let json = serde_json::to_string(&item).unwrap();
        let back: QueueItem = serde_json::from_str(&json).unwrap();
        assert_eq!(back, item);
    }
}
