//! Utilitaires réseau partagés par les crates AdScreen.
//!
//! # Fonctions principales
//!
//! - [`guess_local_ip`] : devine l'adresse IP locale utilisée pour les
//!   connexions sortantes (sert à composer l'URL de base du serveur)
//! - [`list_network_ips`] : liste les adresses IPv4 non-loopback par
//!   interface (affichage au démarrage du serveur)

mod ip_utils;

pub use ip_utils::{guess_local_ip, list_network_ips};
