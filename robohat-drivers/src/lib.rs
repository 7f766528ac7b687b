//! Peripheral drivers for Robo HAT terminals
//!
//! This crate provides the typed devices a Robo HAT terminal can be bound
//! as. Each driver owns exactly one sub-resource handed out by the
//! expander:
//!
//! - Servos (positional and continuous-rotation) on a PWM channel
//! - Raw pulse outputs on a PWM channel
//! - Capacitive touch inputs on a touch channel
//! - Addressable LED strips on a pixel bus

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod pixel;
pub mod pulse;
pub mod sensor;
pub mod servo;

pub use pixel::{Color, PixelError, PixelStrip, MAX_PIXELS};
pub use pulse::PulseOut;
pub use sensor::TouchIn;
pub use servo::{ContinuousServo, Servo, ServoConfig, ServoError};
