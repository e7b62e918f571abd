//! Configuration loading
//!
//! The configuration is compiled in from monitor.toml. build.rs already
//! checked it with a full TOML parser, so the fallback below is only hit
//! when the two parsers disagree.

use defmt::*;

use algaemon_core::config::MonitorConfig;

/// Embedded configuration (compiled into firmware)
/// Edit monitor.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../monitor.toml");

/// Parse the embedded configuration, or fall back to the defaults
pub fn load_config() -> MonitorConfig {
    match MonitorConfig::from_toml(EMBEDDED_CONFIG) {
        Ok(config) => {
            info!("Parsed embedded configuration successfully");
            config
        }
        Err(e) => {
            error!("Failed to parse embedded config: {}", e);
            error!("Using built-in defaults");
            MonitorConfig::default()
        }
    }
}
