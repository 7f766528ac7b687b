//! Robo HAT board support
//!
//! Maps the logical terminals printed on a Robo HAT (servo 1-8, touch 1-4,
//! the signal header, the NeoPixel output) onto an I/O expander and hands
//! out typed devices for them.
//!
//! ```ignore
//! use robohat::{BoardVariant, PixelBusConfig};
//!
//! let mut hat = robohat::new(expander, BoardVariant::Mm1);
//! hat.servo_1()?.set_angle(Some(90.0))?;
//!
//! if hat.touch_1()?.value()? {
//!     hat.init_pixel_strip(PixelBusConfig::new(8))?.fill((0, 32, 0))?;
//! }
//! ```
//!
//! The board owns its expander. Devices live in a per-terminal cache inside
//! the board and are handed out as `&mut` borrows, so only one device per
//! terminal exists at a time and none survives a rebind.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

// This mod MUST go first, so that the others see its macros.
pub(crate) mod fmt;

pub mod board;
pub mod cache;
#[cfg(feature = "toml")]
pub mod config;

#[cfg(test)]
mod mock;

pub use board::{BoardResult, RoboHat};
pub use cache::{DeviceCache, Peripheral};
#[cfg(feature = "toml")]
pub use config::{parse_config, ConfigError};

pub use robohat_core::{BoardConfig, BoardError, BoardVariant, PeripheralKind, PinMap, Terminal};
pub use robohat_drivers::{
    Color, ContinuousServo, PixelError, PixelStrip, PulseOut, Servo, ServoConfig, ServoError,
    TouchIn,
};
pub use robohat_hal::{ColorOrder, Expander, PhysicalPin, PixelBusConfig};

/// Create a board on `expander` using the pin map of `variant`
pub fn new<X: Expander>(expander: X, variant: BoardVariant) -> RoboHat<X> {
    RoboHat::new(expander, variant)
}
