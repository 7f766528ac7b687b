//! Board configuration type definitions

use robohat_hal::PixelBusConfig;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::pinmap::{BoardVariant, PinMap};

/// Current configuration format version
pub const CONFIG_VERSION: u8 = 1;

/// Board configuration
///
/// Selects which pin map to load and, optionally, a pixel strip to bring
/// up together with the board.
///
/// ```toml
/// version = 1
/// variant = "mm1"
///
/// [pixel_strip]
/// count = 24
/// brightness = 0.3
/// color_order = "GRB"
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BoardConfig {
    /// Configuration version for compatibility checks
    pub version: u8,
    /// Board revision
    pub variant: BoardVariant,
    /// Pixel strip to initialize at construction
    pub pixel_strip: Option<PixelBusConfig>,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            variant: BoardVariant::default(),
            pixel_strip: None,
        }
    }
}

impl BoardConfig {
    /// Configuration for `variant` with no pixel strip
    pub fn new(variant: BoardVariant) -> Self {
        Self {
            variant,
            ..Self::default()
        }
    }

    /// Add a pixel strip to bring up at construction
    pub fn with_pixel_strip(mut self, strip: PixelBusConfig) -> Self {
        self.pixel_strip = Some(strip);
        self
    }

    /// Pin map of the selected variant
    pub fn pin_map(&self) -> &'static PinMap {
        self.variant.pin_map()
    }

    /// Whether this configuration can be loaded by this version of the crate
    pub fn is_supported_version(&self) -> bool {
        self.version == CONFIG_VERSION
    }
}
