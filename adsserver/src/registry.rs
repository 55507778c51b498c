//! Registre des connexions écrans
//!
//! Le registre est l'unique propriétaire des poignées de connexion : une
//! poignée est créée à l'acceptation du handshake WebSocket et retirée à la
//! déconnexion ou au premier échec d'envoi. Invariant : le registre ne
//! contient que des connexions capables de recevoir.
//!
//! Un seul domaine d'exclusion mutuelle protège l'ensemble vivant ; aucun
//! await n'est jamais tenu sous le verrou. La diffusion itère toujours sur
//! un [`snapshot`](ScreenRegistry::snapshot), jamais sur la structure vive.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Mutex;
use tokio::sync::mpsc;
use tracing::{info, warn};
use uuid::Uuid;

/// Identifiant d'une connexion écran
pub type ScreenId = Uuid;

/// Poignée vers une connexion écran vivante
///
/// Opaque pour les appelants : seule la tâche de connexion possède le socket
/// WebSocket, la poignée ne transporte que le canal sortant.
#[derive(Debug, Clone)]
pub struct ScreenHandle {
    pub id: ScreenId,
    pub remote_addr: String,
    pub connected_at: DateTime<Utc>,
    tx: mpsc::UnboundedSender<String>,
}

impl ScreenHandle {
    /// Envoi best-effort d'un message texte vers l'écran
    ///
    /// Retourne `false` si le canal est fermé (connexion morte).
    pub fn send(&self, message: String) -> bool {
        self.tx.send(message).is_ok()
    }

    /// Vue sérialisable de la connexion (diagnostic)
    pub fn info(&self) -> ScreenInfo {
        ScreenInfo {
            id: self.id,
            remote_addr: self.remote_addr.clone(),
            connected_at: self.connected_at,
        }
    }
}

/// Description d'une connexion écran pour l'API de diagnostic
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct ScreenInfo {
    pub id: Uuid,
    pub remote_addr: String,
    pub connected_at: DateTime<Utc>,
}

/// Registre des écrans connectés
#[derive(Debug, Default)]
pub struct ScreenRegistry {
    screens: Mutex<HashMap<ScreenId, ScreenHandle>>,
}

impl ScreenRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enregistre une nouvelle connexion et retourne son identifiant
    pub fn register(&self, remote_addr: impl Into<String>, tx: mpsc::UnboundedSender<String>) -> ScreenId {
        let handle = ScreenHandle {
            id: Uuid::new_v4(),
            remote_addr: remote_addr.into(),
            connected_at: Utc::now(),
            tx,
        };
        let id = handle.id;

        let mut screens = self.screens.lock().unwrap();
        screens.insert(id, handle.clone());
        let count = screens.len();
        drop(screens);

        info!(
            screen = %id,
            remote_addr = %handle.remote_addr,
            active_screens = count,
            "Screen connected"
        );
        id
    }

    /// Retire une connexion ; sans effet si elle est déjà absente
    pub fn unregister(&self, id: ScreenId) {
        let mut screens = self.screens.lock().unwrap();
        let removed = screens.remove(&id);
        let count = screens.len();
        drop(screens);

        if let Some(handle) = removed {
            warn!(
                screen = %id,
                remote_addr = %handle.remote_addr,
                remaining_screens = count,
                "Screen disconnected"
            );
        }
    }

    /// Copie instantanée des poignées, pour itération hors verrou
    ///
    /// La diffusion ne travaille jamais sur la structure vive : un
    /// connect/disconnect concurrent n'affecte pas l'itération en cours.
    pub fn snapshot(&self) -> Vec<ScreenHandle> {
        self.screens.lock().unwrap().values().cloned().collect()
    }

    /// Nombre d'écrans actuellement connectés (diagnostic)
    pub fn count(&self) -> usize {
        self.screens.lock().unwrap().len()
    }

    /// Vue sérialisable de toutes les connexions (API de diagnostic)
    pub fn list(&self) -> Vec<ScreenInfo> {
        self.screens
            .lock()
            .unwrap()
            .values()
            .map(ScreenHandle::info)
            .collect()
    }
}
