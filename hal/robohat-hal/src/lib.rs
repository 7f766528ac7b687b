//! Robo HAT expander abstraction layer
//!
//! Robo HAT boards route their servo, touch and NeoPixel terminals through
//! a register-based I/O expander running seesaw-style firmware. This crate
//! defines the interface the board support code needs from that expander.
//! A concrete transport (I2C register access, presence probing) implements
//! these traits; none is provided here.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  robohat (board facade, device cache)   │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  robohat-hal (this crate - traits)      │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  expander transport (seesaw over I2C)   │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`expander::Expander`] - Configure PWM, touch and pixel resources, reset
//! - [`touch::TouchChannel`] - Capacitive touch reads on one pin
//! - [`pixel::PixelBus`] - Addressable LED buffer writes
//!
//! PWM channels are plain [`embedded_hal::pwm::SetDutyCycle`] implementors.

#![no_std]
#![deny(unsafe_code)]

pub mod expander;
pub mod pixel;
pub mod touch;

// Re-export key traits at crate root for convenience
pub use expander::{Expander, PhysicalPin, SERVO_PWM_FREQUENCY_HZ};
pub use pixel::{ColorOrder, PixelBus, PixelBusConfig};
pub use touch::TouchChannel;
