//! Continuous-rotation servo
//!
//! Same pulse window as a positional servo, but the pulse width sets speed
//! and direction: -1.0 is full reverse, 0.0 stop, 1.0 full forward.

use embedded_hal::pwm::SetDutyCycle;

use super::{write_duty, PulseRange, ServoConfig, ServoError};

/// Continuous-rotation servo on one PWM channel
pub struct ContinuousServo<P> {
    pwm: P,
    config: ServoConfig,
    range: PulseRange,
    throttle: Option<f32>,
}

impl<P: SetDutyCycle> ContinuousServo<P> {
    /// Create a continuous servo driver on an already-configured channel
    pub fn new(pwm: P, config: ServoConfig) -> Self {
        let range = PulseRange::new(&config, pwm.max_duty_cycle());
        Self {
            pwm,
            config,
            range,
            throttle: None,
        }
    }

    /// Get the configuration
    pub fn config(&self) -> &ServoConfig {
        &self.config
    }

    /// Change the pulse window (µs); use this to trim the stop point
    pub fn set_pulse_width_range(&mut self, min_pulse_us: u16, max_pulse_us: u16) {
        self.config.min_pulse_us = min_pulse_us;
        self.config.max_pulse_us = max_pulse_us;
        self.range = PulseRange::new(&self.config, self.pwm.max_duty_cycle());
    }

    /// Set speed and direction, -1.0..=1.0
    pub fn set_throttle(&mut self, throttle: f32) -> Result<(), ServoError<P::Error>> {
        if !(-1.0..=1.0).contains(&throttle) {
            return Err(ServoError::OutOfRange);
        }
        let duty = self.range.duty_for((throttle + 1.0) / 2.0);
        write_duty(&mut self.pwm, duty)?;
        self.throttle = Some(throttle);
        Ok(())
    }

    /// Last commanded throttle, `None` before the first command or after release
    pub fn throttle(&self) -> Option<f32> {
        self.throttle
    }

    /// Stop the pulse train entirely
    pub fn stop_pulses(&mut self) -> Result<(), ServoError<P::Error>> {
        write_duty(&mut self.pwm, 0)?;
        self.throttle = None;
        Ok(())
    }

    /// Release the servo and hand back its channel
    pub fn release(self) -> P {
        self.pwm
    }
}
