//! Positional hobby servo
//!
//! The commanded angle maps linearly onto the configured pulse window.
//! Commanding `None` stops the pulse train so the servo goes limp.
//!
//! # Usage
//!
//! ```ignore
//! let pwm = expander.configure_pwm(16, 50)?;
//! let mut servo = Servo::new(pwm, ServoConfig::default());
//! servo.set_angle(Some(90.0))?;
//! ```

use embedded_hal::pwm::SetDutyCycle;

use super::{write_duty, PulseRange, ServoConfig, ServoError};

/// Positional servo on one PWM channel
pub struct Servo<P> {
    pwm: P,
    config: ServoConfig,
    range: PulseRange,
    /// Last commanded position (0.0..=1.0), `None` when released
    fraction: Option<f32>,
}

impl<P: SetDutyCycle> Servo<P> {
    /// Create a servo driver on an already-configured channel
    ///
    /// The output is left untouched until the first command.
    pub fn new(pwm: P, config: ServoConfig) -> Self {
        let range = PulseRange::new(&config, pwm.max_duty_cycle());
        Self {
            pwm,
            config,
            range,
            fraction: None,
        }
    }

    /// Get the configuration
    pub fn config(&self) -> &ServoConfig {
        &self.config
    }

    /// Change the pulse window (µs)
    ///
    /// Takes effect on the next command.
    pub fn set_pulse_width_range(&mut self, min_pulse_us: u16, max_pulse_us: u16) {
        self.config.min_pulse_us = min_pulse_us;
        self.config.max_pulse_us = max_pulse_us;
        self.range = PulseRange::new(&self.config, self.pwm.max_duty_cycle());
    }

    /// Degrees of travel across the pulse window
    pub fn actuation_range(&self) -> u16 {
        self.config.actuation_range
    }

    /// Command a position as a fraction of travel, or `None` to release
    pub fn set_fraction(&mut self, fraction: Option<f32>) -> Result<(), ServoError<P::Error>> {
        let duty = match fraction {
            None => 0,
            Some(f) if (0.0..=1.0).contains(&f) => self.range.duty_for(f),
            Some(_) => return Err(ServoError::OutOfRange),
        };
        write_duty(&mut self.pwm, duty)?;
        self.fraction = fraction;
        Ok(())
    }

    /// Last commanded fraction, `None` when released
    pub fn fraction(&self) -> Option<f32> {
        self.fraction
    }

    /// Command an angle in degrees, or `None` to release
    pub fn set_angle(&mut self, angle: Option<f32>) -> Result<(), ServoError<P::Error>> {
        let range = self.config.actuation_range as f32;
        match angle {
            Some(a) if !(0.0..=range).contains(&a) => Err(ServoError::OutOfRange),
            Some(a) => self.set_fraction(Some(a / range)),
            None => self.set_fraction(None),
        }
    }

    /// Last commanded angle in degrees, `None` when released
    pub fn angle(&self) -> Option<f32> {
        self.fraction
            .map(|f| f * self.config.actuation_range as f32)
    }

    /// Release the servo and hand back its channel
    pub fn release(self) -> P {
        self.pwm
    }
}
