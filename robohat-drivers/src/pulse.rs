//! Raw pulse output
//!
//! A 50 Hz PWM channel without servo semantics, for ESCs, LEDs or anything
//! else that wants direct control of the duty cycle or pulse width.

use embedded_hal::pwm::SetDutyCycle;
use robohat_hal::SERVO_PWM_FREQUENCY_HZ;

use crate::servo::pulse_to_duty;

/// Raw PWM output on one channel
pub struct PulseOut<P> {
    pwm: P,
    frequency_hz: u32,
    duty: u16,
}

impl<P: SetDutyCycle> PulseOut<P> {
    /// Wrap a channel configured at the standard servo frequency
    pub fn new(pwm: P) -> Self {
        Self::with_frequency(pwm, SERVO_PWM_FREQUENCY_HZ)
    }

    /// Wrap a channel configured at `frequency_hz`
    pub fn with_frequency(pwm: P, frequency_hz: u32) -> Self {
        Self {
            pwm,
            frequency_hz,
            duty: 0,
        }
    }

    /// Frequency the channel runs at
    pub fn frequency_hz(&self) -> u32 {
        self.frequency_hz
    }

    /// Full-scale duty value of the channel
    pub fn max_duty_cycle(&self) -> u16 {
        self.pwm.max_duty_cycle()
    }

    /// Set the raw duty cycle
    pub fn set_duty_cycle(&mut self, duty: u16) -> Result<(), P::Error> {
        self.pwm.set_duty_cycle(duty)?;
        self.duty = duty;
        Ok(())
    }

    /// Last duty cycle written
    pub fn duty_cycle(&self) -> u16 {
        self.duty
    }

    /// Set the high time of each period in µs
    pub fn set_pulse_width_us(&mut self, pulse_us: u32) -> Result<(), P::Error> {
        let duty = pulse_to_duty(pulse_us, self.frequency_hz, self.pwm.max_duty_cycle());
        self.set_duty_cycle(duty)
    }

    /// Hand back the channel
    pub fn release(self) -> P {
        self.pwm
    }
}
