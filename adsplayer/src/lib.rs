//! # adsplayer - Scheduler de lecture d'un écran
//!
//! Cette crate décide de ce qu'un écran affiche, et quand :
//! - **Sélection** : la file de lecture d'abord (premier élément non joué,
//!   ordre du fichier), puis le scan des dossiers locaux `images/` et
//!   `videos/` en mode séquentiel ou aléatoire
//! - **Boucle de diffusion** : machine à états IDLE → SHOWING → IDLE, avec
//!   écran d'attente quand aucun média n'est disponible et écran d'erreur
//!   temporaire quand un rendu échoue
//! - **Commandes** : skip, quit, changement de mode, boucle, ajustement des
//!   durées d'affichage, reçues pendant la diffusion avec une latence bornée
//!
//! Le rendu lui-même est derrière le trait [`Renderer`] : cette crate ne
//! touche jamais à l'affichage.
//!
//! # Exemple
//!
//! ```no_run
//! use adsplayer::{LogRenderer, PlaybackState, Player, Scheduler};
//! use tokio::sync::mpsc;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let scheduler = Scheduler::new("shared_media", PlaybackState::default());
//! let (tx, rx) = mpsc::unbounded_channel();
//! let mut player = Player::new(scheduler, LogRenderer::default(), rx);
//! player.run().await;
//! # }
//! ```

mod commands;
mod config_ext;
mod player;
mod refresh;
mod renderer;
mod scan;
mod scheduler;
mod state;

pub use commands::PlayerCommand;
pub use config_ext::PlayerConfigExt;
pub use player::Player;
pub use refresh::spawn_queue_refresh;
pub use renderer::{LogRenderer, RenderError, Renderer};
pub use scan::{scan_local_media, MediaItem, IMAGE_EXTENSIONS, VIDEO_EXTENSIONS};
pub use scheduler::Scheduler;
pub use state::{DisplayDurations, PlayMode, PlaybackState};
