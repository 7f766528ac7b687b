//! Board data and shared types for Robo HAT support
//!
//! This crate contains everything about a Robo HAT that is data rather
//! than I/O:
//!
//! - Pin maps for each board variant
//! - Logical terminals and their cache slots
//! - Peripheral kind tags
//! - Board-level error type
//! - Configuration type definitions

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod config;
pub mod error;
pub mod peripheral;
pub mod pinmap;
pub mod terminal;

pub use config::BoardConfig;
pub use error::BoardError;
pub use peripheral::PeripheralKind;
pub use pinmap::{BoardVariant, PinMap, MAX_SIGNALS, SERVO_SLOTS, TOUCH_SLOTS};
pub use terminal::{Terminal, TERMINAL_SLOTS};
