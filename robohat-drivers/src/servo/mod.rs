//! Servo drivers
//!
//! Both servo kinds drive a 50 Hz PWM channel whose pulse width encodes the
//! command:
//!
//! - Positional servos: pulse width maps to an angle
//! - Continuous-rotation servos: pulse width maps to a throttle
//!
//! [`PulseRange`] converts a 0.0..=1.0 fraction into a duty cycle for the
//! configured pulse window.

pub mod continuous;
pub mod positional;

pub use continuous::ContinuousServo;
pub use positional::Servo;

use embedded_hal::pwm::SetDutyCycle;
use robohat_hal::SERVO_PWM_FREQUENCY_HZ;

/// Errors that can occur when commanding a servo
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ServoError<E> {
    /// PWM channel rejected the duty cycle
    Pwm(E),
    /// Angle, fraction or throttle outside the valid range
    OutOfRange,
}

/// Servo pulse configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ServoConfig {
    /// Pulse width at 0% (µs)
    pub min_pulse_us: u16,
    /// Pulse width at 100% (µs)
    pub max_pulse_us: u16,
    /// PWM frequency the channel was configured with
    pub frequency_hz: u32,
    /// Degrees of travel between min and max pulse (positional servos)
    pub actuation_range: u16,
}

impl Default for ServoConfig {
    fn default() -> Self {
        Self {
            min_pulse_us: 750,
            max_pulse_us: 2250,
            frequency_hz: SERVO_PWM_FREQUENCY_HZ,
            actuation_range: 180,
        }
    }
}

/// Duty-cycle window for a pulse range at a given PWM resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PulseRange {
    /// Duty cycle at fraction 0.0
    pub min_duty: u16,
    /// Duty cycle span from fraction 0.0 to 1.0
    pub duty_range: u16,
}

impl PulseRange {
    /// Compute the duty window for `config` on a channel whose full
    /// scale is `max_duty`
    pub fn new(config: &ServoConfig, max_duty: u16) -> Self {
        let min_duty = pulse_to_duty(config.min_pulse_us as u32, config.frequency_hz, max_duty);
        let max_duty = pulse_to_duty(config.max_pulse_us as u32, config.frequency_hz, max_duty);
        Self {
            min_duty,
            duty_range: max_duty.saturating_sub(min_duty),
        }
    }

    /// Duty cycle for `fraction` (0.0..=1.0)
    pub fn duty_for(&self, fraction: f32) -> u16 {
        let offset = (fraction * self.duty_range as f32) as u16;
        self.min_duty.saturating_add(offset)
    }

    /// Fraction represented by `duty`, or `None` for a released output
    pub fn fraction_for(&self, duty: u16) -> Option<f32> {
        if duty == 0 || self.duty_range == 0 {
            return None;
        }
        Some((duty.saturating_sub(self.min_duty)) as f32 / self.duty_range as f32)
    }
}

/// Convert a pulse width in µs into a duty cycle
///
/// `duty = pulse_us × frequency / 1e6 × max_duty`, truncated.
pub fn pulse_to_duty(pulse_us: u32, frequency_hz: u32, max_duty: u16) -> u16 {
    let duty = pulse_us as u64 * frequency_hz as u64 * max_duty as u64 / 1_000_000;
    duty.min(max_duty as u64) as u16
}

/// Write `duty` to `pwm`, wrapping the channel error
pub(crate) fn write_duty<P: SetDutyCycle>(pwm: &mut P, duty: u16) -> Result<(), ServoError<P::Error>> {
    pwm.set_duty_cycle(duty).map_err(ServoError::Pwm)
}
