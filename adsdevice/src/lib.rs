//! # adsdevice - Agent de synchronisation d'un écran
//!
//! L'agent maintient la connexion WebSocket persistante d'un écran vers le
//! serveur AdScreen et réconcilie le cache local à chaque notification :
//!
//! 1. Connexion à `ws://serveur/ws`, l'écran passe ONLINE
//! 2. Chaque ligne `NEW_CONTENT:<filename>` déclenche un téléchargement
//!    idempotent via [`adscache::MediaCache`] (hit = aucun appel réseau)
//! 3. Tout autre texte entrant est tracé et ignoré
//! 4. À la fermeture du canal, l'écran passe OFFLINE et l'agent s'arrête
//!
//! Pas de reconnexion automatique ni de rattrapage des notifications
//! manquées : un écran hors ligne pendant une diffusion ne verra ce contenu
//! qu'à la prochaine notification portant le même nom.

mod agent;

pub use agent::DeviceAgent;
