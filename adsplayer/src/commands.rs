//! Commandes utilisateur acceptées pendant la diffusion

use crate::PlayMode;

/// Commande envoyée à la boucle de diffusion
///
/// Les commandes sont traitées pendant l'affichage avec une latence bornée
/// par l'intervalle de scrutation de la boucle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerCommand {
    /// Passe immédiatement au média suivant
    Skip,
    /// Arrête proprement la boucle de diffusion
    Quit,
    /// Change la politique de sélection du scan local
    SetMode(PlayMode),
    /// Active/désactive la lecture en boucle du scan local
    ToggleLoop,
    /// Augmente les durées d'affichage d'un cran
    IncreaseDisplayTime,
    /// Diminue les durées d'affichage d'un cran
    DecreaseDisplayTime,
}
