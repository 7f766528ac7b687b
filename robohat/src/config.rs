//! TOML board configuration
//!
//! ```toml
//! version = 1
//! variant = "mm1-prototype"
//!
//! [pixel_strip]
//! count = 24
//! brightness = 0.3
//! color_order = "GRB"
//! ```
//!
//! Every key is optional; missing keys take their defaults.

use robohat_core::config::CONFIG_VERSION;
use robohat_core::BoardConfig;

/// Configuration loading errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// TOML parsing failed
    TomlParse,
    /// Config version mismatch
    VersionMismatch,
}

/// Parse a TOML board configuration
pub fn parse_config(input: &str) -> Result<BoardConfig, ConfigError> {
    let config: BoardConfig = toml::from_str(input).map_err(|_| {
        warn!("board config is not valid TOML");
        ConfigError::TomlParse
    })?;

    if !config.is_supported_version() {
        warn!(
            "board config version {} unsupported (expected {})",
            config.version,
            CONFIG_VERSION
        );
        return Err(ConfigError::VersionMismatch);
    }

    debug!("loaded board config for {}", config.variant);
    Ok(config)
}
