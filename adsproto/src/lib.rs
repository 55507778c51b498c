//! # adsproto - Protocole de notification AdScreen
//!
//! Messages texte échangés entre le serveur et les écrans sur le canal
//! WebSocket persistant. Le seul message structuré est l'annonce de nouveau
//! contenu `NEW_CONTENT:<filename>` ; tout autre texte entrant est considéré
//! comme un heartbeat et ignoré par le destinataire.
//!
//! Le format est centralisé ici : pour étendre le protocole, ajouter une
//! variante à [`ContentNotification`], jamais un nouveau préfixe ad-hoc chez
//! un appelant.

use serde::Serialize;
use std::fmt;

/// Préfixe du message d'annonce de nouveau contenu.
pub const NEW_CONTENT_PREFIX: &str = "NEW_CONTENT:";

/// Message entrant décodé depuis une ligne de protocole.
///
/// Toute ligne qui ne commence pas par [`NEW_CONTENT_PREFIX`] est conservée
/// telle quelle dans la variante `Unknown` : c'est à l'appelant de la logger
/// et de l'ignorer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ContentNotification {
    /// Un nouveau fichier média est disponible sur le serveur.
    NewContent { filename: String },
    /// Message non reconnu (heartbeat, log, bruit).
    Unknown { raw: String },
}

impl ContentNotification {
    /// Décode une ligne de protocole.
    ///
    /// Le nom de fichier est le reste de la ligne après le préfixe, espaces
    /// de bord retirés. Un nom vide après trim est conservé tel quel
    /// (`NewContent { filename: "" }`) : le rejet éventuel appartient à la
    /// couche qui déclenche un téléchargement, pas au décodage.
    ///
    /// # Exemple
    ///
    /// ```
    /// use adsproto::ContentNotification;
    ///
    /// let n = ContentNotification::parse("NEW_CONTENT: ad1.png ");
    /// assert_eq!(n, ContentNotification::NewContent { filename: "ad1.png".into() });
    /// ```
    pub fn parse(raw: &str) -> Self {
        match raw.strip_prefix(NEW_CONTENT_PREFIX) {
            Some(rest) => ContentNotification::NewContent {
                filename: rest.trim().to_string(),
            },
            None => ContentNotification::Unknown {
                raw: raw.to_string(),
            },
        }
    }

    /// Compose le message filaire annonçant `filename`.
    pub fn wire_message(filename: &str) -> String {
        format!("{NEW_CONTENT_PREFIX}{filename}")
    }
}

impl fmt::Display for ContentNotification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContentNotification::NewContent { filename } => {
                write!(f, "{NEW_CONTENT_PREFIX}{filename}")
            }
            ContentNotification::Unknown { raw } => write!(f, "{raw}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_new_content_trims_whitespace() {
        let n = ContentNotification::parse("NEW_CONTENT: ad1.png ");
        assert_eq!(
            n,
            ContentNotification::NewContent {
                filename: "ad1.png".to_string()
            }
        );
    }

    #[test]
    fn parse_unknown_keeps_raw_text() {
        let n = ContentNotification::parse("hello");
        assert_eq!(
            n,
            ContentNotification::Unknown {
                raw: "hello".to_string()
            }
        );
    }

    #[test]
    fn parse_empty_filename_is_preserved() {
        let n = ContentNotification::parse("NEW_CONTENT:   ");
        assert_eq!(
            n,
            ContentNotification::NewContent {
                filename: String::new()
            }
        );
    }

    #[test]
    fn wire_message_round_trips() {
        let msg = ContentNotification::wire_message("spot.mp4");
        assert_eq!(msg, "NEW_CONTENT:spot.mp4");
        assert_eq!(
            ContentNotification::parse(&msg),
            ContentNotification::NewContent {
                filename: "spot.mp4".to_string()
            }
        );
    }

    #[test]
    fn prefix_must_match_exactly() {
        let n = ContentNotification::parse("new_content:ad1.png");
        assert!(matches!(n, ContentNotification::Unknown { .. }));
    }
}
