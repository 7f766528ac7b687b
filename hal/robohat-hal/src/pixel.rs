//! Addressable LED (NeoPixel) abstractions
//!
//! The expander keeps a pixel buffer in its own RAM. Board code writes
//! encoded pixel bytes into that buffer and then latches it onto the strip
//! with [`PixelBus::show`].

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Addressable LED data line bound to one expander pin
pub trait PixelBus {
    /// Error type for bus transactions
    type Error;

    /// Write encoded pixel bytes into the expander buffer at `offset`
    ///
    /// # Arguments
    /// * `offset` - Byte offset into the expander-side buffer
    /// * `data` - Encoded bytes, already color-ordered and brightness-scaled
    fn write(&mut self, offset: u16, data: &[u8]) -> Result<(), Self::Error>;

    /// Latch the expander buffer onto the strip
    fn show(&mut self) -> Result<(), Self::Error>;
}

/// Byte order of the color channels on the wire
///
/// The white channel of 4-byte pixels always follows the three colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "UPPERCASE"))]
pub enum ColorOrder {
    Rgb,
    Rbg,
    /// WS2812 default
    #[default]
    Grb,
    Gbr,
    Brg,
    Bgr,
}

impl ColorOrder {
    /// Wire offsets of the red, green and blue bytes within one pixel
    pub const fn offsets(self) -> [usize; 3] {
        match self {
            ColorOrder::Rgb => [0, 1, 2],
            ColorOrder::Rbg => [0, 2, 1],
            ColorOrder::Grb => [1, 0, 2],
            ColorOrder::Gbr => [2, 0, 1],
            ColorOrder::Brg => [1, 2, 0],
            ColorOrder::Bgr => [2, 1, 0],
        }
    }
}

/// Pixel bus configuration
///
/// Defaults match a 3-byte GRB strip at full brightness with auto-flush.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PixelBusConfig {
    /// Number of pixels on the strip
    pub count: u16,
    /// Bytes per pixel (3 for RGB, 4 for RGBW)
    pub bytes_per_pixel: u8,
    /// Global brightness, 0.0 to 1.0
    pub brightness: f32,
    /// Latch after every mutation
    pub auto_flush: bool,
    /// Channel order on the wire
    pub color_order: ColorOrder,
}

impl Default for PixelBusConfig {
    fn default() -> Self {
        Self {
            count: 1,
            bytes_per_pixel: 3,
            brightness: 1.0,
            auto_flush: true,
            color_order: ColorOrder::Grb,
        }
    }
}

impl PixelBusConfig {
    /// Default configuration for a strip of `count` pixels
    pub fn new(count: u16) -> Self {
        Self {
            count,
            ..Self::default()
        }
    }

    /// Size of the expander-side buffer in bytes
    pub const fn buffer_len(&self) -> usize {
        self.count as usize * self.bytes_per_pixel as usize
    }
}
