//! Boucle de diffusion : machine à états IDLE → SHOWING → IDLE

use crate::commands::PlayerCommand;
use crate::renderer::Renderer;
use crate::scheduler::Scheduler;
use adsqueue::MediaType;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::Instant;
use tracing::{info, warn};

/// Intervalle de scrutation des commandes pendant un affichage.
/// Borne la latence de skip/quit : jamais plus d'un tick d'attente.
const COMMAND_POLL: Duration = Duration::from_millis(200);

/// Durée de l'écran d'erreur avant de reprendre la sélection
const ERROR_GRACE: Duration = Duration::from_secs(3);

/// Délai entre deux tentatives quand aucun média n'est disponible
const DEFAULT_WAITING_RETRY: Duration = Duration::from_secs(2);

/// Issue d'une période d'affichage
#[derive(Debug, PartialEq, Eq)]
enum WaitOutcome {
    /// La durée d'affichage est écoulée
    Elapsed,
    /// L'utilisateur a demandé le média suivant
    Skipped,
    /// L'utilisateur a demandé l'arrêt
    Quit,
}

/// Boucle de diffusion d'un écran
///
/// Seule cette boucle mute l'état de lecture ([`PlaybackState`]) : les
/// autres activités (poller de rafraîchissement, agent de téléchargement)
/// n'y touchent jamais.
///
/// [`PlaybackState`]: crate::PlaybackState
pub struct Player<R: Renderer> {
    scheduler: Scheduler,
    renderer: R,
    commands: mpsc::UnboundedReceiver<PlayerCommand>,
    waiting_retry: Duration,
    /// Le canal de commandes est fermé, plus rien à scruter
    commands_closed: bool,
}

impl<R: Renderer> Player<R> {
    pub fn new(
        scheduler: Scheduler,
        renderer: R,
        commands: mpsc::UnboundedReceiver<PlayerCommand>,
    ) -> Self {
        Self {
            scheduler,
            renderer,
            commands,
            waiting_retry: DEFAULT_WAITING_RETRY,
            commands_closed: false,
        }
    }

    /// Remplace le délai de réessai de l'écran d'attente
    pub fn with_waiting_retry(mut self, delay: Duration) -> Self {
        self.waiting_retry = delay;
        self
    }

    /// Accès au scheduler (diagnostic, tests)
    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    /// Lance la boucle de diffusion jusqu'à la commande Quit
    pub async fn run(&mut self) {
        info!("Starting playback loop");

        loop {
            // Commandes arrivées entre deux affichages
            while let Ok(cmd) = self.commands.try_recv() {
                if self.apply_command(cmd) {
                    info!("Playback loop stopped");
                    return;
                }
            }

            match self.scheduler.select_next().await {
                Some(item) => {
                    info!(name = %item.name, media_type = %item.media_type, "Playing");

                    let rendered = match item.media_type {
                        MediaType::Image => self.renderer.show_image(&item).await,
                        MediaType::Video => self.renderer.show_video(&item).await,
                    };

                    let outcome = match rendered {
                        Ok(()) => {
                            let duration =
                                self.scheduler.state().display.for_type(item.media_type);
                            self.wait_with_commands(duration).await
                        }
                        Err(e) => {
                            warn!(name = %item.name, error = %e, "Render failed");
                            self.renderer
                                .show_error(&format!("Failed to load: {}", item.name))
                                .await;
                            // Période de grâce, puis retour à la sélection ;
                            // l'élément fautif n'est ni réessayé
                            // immédiatement ni mis en liste noire
                            self.wait_with_commands(ERROR_GRACE).await
                        }
                    };

                    if outcome == WaitOutcome::Quit {
                        break;
                    }
                }
                None => {
                    self.renderer.show_waiting().await;
                    if self.wait_with_commands(self.waiting_retry).await == WaitOutcome::Quit {
                        break;
                    }
                }
            }
        }

        info!("Playback loop stopped");
    }

    /// Applique une commande ; retourne `true` pour un arrêt
    fn apply_command(&mut self, cmd: PlayerCommand) -> bool {
        match cmd {
            PlayerCommand::Quit => return true,
            PlayerCommand::Skip => {
                // Un skip hors affichage est sans objet
                info!("Next media requested");
            }
            PlayerCommand::SetMode(mode) => {
                self.scheduler.state_mut().mode = mode;
                info!(mode = mode.as_str(), "Play mode changed");
            }
            PlayerCommand::ToggleLoop => {
                let state = self.scheduler.state_mut();
                state.loop_enabled = !state.loop_enabled;
                let enabled = state.loop_enabled;
                self.scheduler.reset_cycle();
                info!(enabled, "Loop toggled");
            }
            PlayerCommand::IncreaseDisplayTime => {
                self.scheduler.state_mut().display.increase();
                let d = self.scheduler.state().display;
                info!(image_secs = d.image_secs, video_secs = d.video_secs, "Display time increased");
            }
            PlayerCommand::DecreaseDisplayTime => {
                self.scheduler.state_mut().display.decrease();
                let d = self.scheduler.state().display;
                info!(image_secs = d.image_secs, video_secs = d.video_secs, "Display time decreased");
            }
        }
        false
    }

    /// Attend `duration` en scrutant les commandes à intervalle borné
    ///
    /// Jamais d'attente bloquante sur toute la durée : la boucle reste
    /// réactive aux skip/quit à `COMMAND_POLL` près.
    async fn wait_with_commands(&mut self, duration: Duration) -> WaitOutcome {
        let deadline = Instant::now() + duration;

        loop {
            let now = Instant::now();
            if now >= deadline {
                return WaitOutcome::Elapsed;
            }
            let tick = COMMAND_POLL.min(deadline - now);

            if self.commands_closed {
                tokio::time::sleep(tick).await;
                continue;
            }

            match tokio::time::timeout(tick, self.commands.recv()).await {
                Ok(Some(PlayerCommand::Skip)) => return WaitOutcome::Skipped,
                Ok(Some(PlayerCommand::Quit)) => return WaitOutcome::Quit,
                Ok(Some(other)) => {
                    self.apply_command(other);
                }
                Ok(None) => {
                    self.commands_closed = true;
                }
                Err(_) => {} // tick écoulé, on re-vérifie la deadline
            }
        }
    }
}
