//! Peripheral kinds
//!
//! Tag of the typed device bound to a terminal. The device cache compares
//! tags to decide between reusing and rebinding a slot.

/// Kind of peripheral a terminal can be bound as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PeripheralKind {
    /// Positional hobby servo
    Servo,
    /// Continuous-rotation servo
    ContinuousServo,
    /// Capacitive touch input
    Touch,
    /// Raw 50 Hz PWM output
    PulseOut,
    /// Addressable LED strip (board singleton, never cached per terminal)
    PixelStrip,
}

impl PeripheralKind {
    /// Whether binding this kind claims a PWM channel
    pub const fn uses_pwm(self) -> bool {
        matches!(
            self,
            PeripheralKind::Servo | PeripheralKind::ContinuousServo | PeripheralKind::PulseOut
        )
    }
}
