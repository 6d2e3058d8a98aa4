//! Platform logging initialization for digest_app.
//!
//! The interactive UI owns the terminal, so it logs to the configured file
//! only. One-shot runs also log to stderr.

use digest_logging::{parse_level, LogDestination};

use super::config::AppConfig;

pub fn initialize(config: &AppConfig, interactive: bool) {
    let destination = if interactive {
        LogDestination::File(config.log_file.clone())
    } else {
        LogDestination::Both(config.log_file.clone())
    };
    if !digest_logging::initialize(parse_level(&config.log_level), &destination) {
        eprintln!("Warning: logging is disabled for this run");
    }
}
