//! Initialisation du logging console
//!
//! Le filtre est pris dans l'ordre : variable `RUST_LOG`, puis niveau
//! minimum de la configuration, puis `INFO`.

use adsconfig::get_config;
use tracing_subscriber::EnvFilter;

/// Options de configuration du logging
#[derive(Debug, Clone, Default)]
pub struct LoggingOptions {
    /// Niveau minimum, prioritaire sur la configuration (ex: `"debug"`)
    pub min_level: Option<String>,
}

/// Initialise le système de tracing pour un binaire AdScreen
///
/// # Exemple
///
/// ```rust,no_run
/// use adsserver::logging::{init_logging, LoggingOptions};
///
/// init_logging(LoggingOptions::default());
/// ```
pub fn init_logging(options: LoggingOptions) {
    let fallback = options
        .min_level
        .or_else(|| get_config().get_log_min_level().ok())
        .unwrap_or_else(|| "info".to_string());

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}
