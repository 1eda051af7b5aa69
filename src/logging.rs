//! Log subscriber setup.
//!
//! The library only emits `tracing` events. Hosts that want them on stderr
//! call [`init`] once; later calls are no-ops.

use crate::config::LoggingConfig;
use tracing::Level;

/// Parse a configured level name, defaulting to WARN for unknown names
pub fn parse_level(name: &str) -> Level {
    name.trim().parse::<Level>().unwrap_or(Level::WARN)
}

/// Install a stderr subscriber at the configured level.
///
/// Returns `false` when a global subscriber was already installed.
pub fn init(config: &LoggingConfig) -> bool {
    tracing_subscriber::fmt()
        .with_max_level(parse_level(&config.level))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .is_ok()
}
