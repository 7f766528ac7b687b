//! Addressable LED strip (NeoPixel) driver
//!
//! Colors are kept unscaled in a local buffer. Brightness and channel order
//! are applied when bytes are written to the expander, so changing the
//! brightness never loses color resolution.
//!
//! With `auto_flush` enabled every mutation is latched onto the strip
//! immediately; otherwise call [`PixelStrip::show`].
//!
//! ```ignore
//! let bus = expander.configure_pixel_bus(20, &config)?;
//! let mut strip = PixelStrip::new(bus, config)?;
//! strip.fill(Color::rgb(100, 0, 0))?;
//! ```

use heapless::Vec;
use robohat_hal::{PixelBus, PixelBusConfig};

/// Largest strip the local buffer can hold
pub const MAX_PIXELS: usize = 128;

/// Bytes per expander write; a multiple of both 3 and 4 that keeps each
/// transaction inside a 32-byte I2C write with register and offset header
const WRITE_CHUNK: usize = 24;

/// Errors that can occur when driving a pixel strip
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PixelError<E> {
    /// Expander write or latch failed
    Bus(E),
    /// Pixel index past the end of the strip
    IndexOutOfRange,
    /// Pixel count or bytes-per-pixel not supported
    Unsupported,
}

/// RGBW color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    /// White channel, only sent to 4-byte pixels
    pub w: u8,
}

impl Color {
    /// All channels off
    pub const OFF: Color = Color::rgb(0, 0, 0);

    /// Color without a white component
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, w: 0 }
    }

    /// Color with a white component
    pub const fn rgbw(r: u8, g: u8, b: u8, w: u8) -> Self {
        Self { r, g, b, w }
    }
}

impl From<(u8, u8, u8)> for Color {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Color::rgb(r, g, b)
    }
}

impl From<(u8, u8, u8, u8)> for Color {
    fn from((r, g, b, w): (u8, u8, u8, u8)) -> Self {
        Color::rgbw(r, g, b, w)
    }
}

impl From<u32> for Color {
    /// `0xRRGGBB`, or `0xWWRRGGBB` for a white component
    fn from(packed: u32) -> Self {
        Color::rgbw(
            (packed >> 16) as u8,
            (packed >> 8) as u8,
            packed as u8,
            (packed >> 24) as u8,
        )
    }
}

/// Addressable LED strip on one expander pixel bus
pub struct PixelStrip<B> {
    bus: B,
    config: PixelBusConfig,
    pixels: Vec<Color, MAX_PIXELS>,
}

impl<B: PixelBus> PixelStrip<B> {
    /// Whether `config` fits this driver
    pub fn supports(config: &PixelBusConfig) -> bool {
        config.count as usize <= MAX_PIXELS && matches!(config.bytes_per_pixel, 3 | 4)
    }

    /// Create a strip driver with every pixel off
    ///
    /// Nothing is written to the expander until the first mutation.
    pub fn new(bus: B, mut config: PixelBusConfig) -> Result<Self, PixelError<B::Error>> {
        if !Self::supports(&config) {
            return Err(PixelError::Unsupported);
        }
        config.brightness = config.brightness.clamp(0.0, 1.0);

        let mut pixels = Vec::new();
        pixels
            .resize(config.count as usize, Color::OFF)
            .map_err(|_| PixelError::Unsupported)?;

        Ok(Self {
            bus,
            config,
            pixels,
        })
    }

    /// Get the configuration
    pub fn config(&self) -> &PixelBusConfig {
        &self.config
    }

    /// Number of pixels
    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    /// Whether the strip has no pixels
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Color stored for pixel `index` (unscaled)
    pub fn pixel(&self, index: usize) -> Option<Color> {
        self.pixels.get(index).copied()
    }

    /// Set one pixel
    pub fn set_pixel(
        &mut self,
        index: usize,
        color: impl Into<Color>,
    ) -> Result<(), PixelError<B::Error>> {
        let slot = self
            .pixels
            .get_mut(index)
            .ok_or(PixelError::IndexOutOfRange)?;
        *slot = color.into();

        self.write_range(index, index + 1)?;
        self.auto_flush()
    }

    /// Set every pixel to one color
    pub fn fill(&mut self, color: impl Into<Color>) -> Result<(), PixelError<B::Error>> {
        let color = color.into();
        self.pixels.iter_mut().for_each(|p| *p = color);

        self.write_range(0, self.pixels.len())?;
        self.auto_flush()
    }

    /// Global brightness, 0.0 to 1.0
    pub fn brightness(&self) -> f32 {
        self.config.brightness
    }

    /// Change the global brightness and rewrite the whole strip
    pub fn set_brightness(&mut self, brightness: f32) -> Result<(), PixelError<B::Error>> {
        self.config.brightness = brightness.clamp(0.0, 1.0);

        self.write_range(0, self.pixels.len())?;
        self.auto_flush()
    }

    /// Latch the expander buffer onto the strip
    pub fn show(&mut self) -> Result<(), PixelError<B::Error>> {
        self.bus.show().map_err(PixelError::Bus)
    }

    /// Hand back the bus
    pub fn release(self) -> B {
        self.bus
    }

    fn auto_flush(&mut self) -> Result<(), PixelError<B::Error>> {
        if self.config.auto_flush {
            self.show()?;
        }
        Ok(())
    }

    /// Encode one pixel into `out` (`bytes_per_pixel` long)
    fn encode(&self, color: Color, out: &mut [u8]) {
        let scale = |v: u8| (v as f32 * self.config.brightness) as u8;
        let [r, g, b] = self.config.color_order.offsets();
        out[r] = scale(color.r);
        out[g] = scale(color.g);
        out[b] = scale(color.b);
        if self.config.bytes_per_pixel == 4 {
            out[3] = scale(color.w);
        }
    }

    /// Write pixels `start..end` to the expander buffer in chunks
    fn write_range(&mut self, start: usize, end: usize) -> Result<(), PixelError<B::Error>> {
        let bpp = self.config.bytes_per_pixel as usize;
        let per_chunk = WRITE_CHUNK / bpp;
        let mut chunk = [0u8; WRITE_CHUNK];

        let mut first = start;
        while first < end {
            let last = (first + per_chunk).min(end);
            let len = (last - first) * bpp;

            for (i, color) in self.pixels[first..last].iter().enumerate() {
                self.encode(*color, &mut chunk[i * bpp..(i + 1) * bpp]);
            }

            let offset = (first * bpp) as u16;
            self.bus
                .write(offset, &chunk[..len])
                .map_err(PixelError::Bus)?;
            first = last;
        }
        Ok(())
    }
}
