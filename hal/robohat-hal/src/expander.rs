//! I/O expander abstraction
//!
//! The expander owns the register protocol. Board code asks it for
//! exclusively-owned sub-resources (a PWM channel, a touch channel, a pixel
//! bus) bound to one physical pin and drives those directly afterwards.

use embedded_hal::pwm::SetDutyCycle;

use crate::pixel::{PixelBus, PixelBusConfig};
use crate::touch::TouchChannel;

/// Expander pin number as understood by its register protocol
///
/// On seesaw SAMD firmware `PAnn` is `nn` and `PBnn` is `32 + nn`.
pub type PhysicalPin = u8;

/// PWM frequency used for hobby servos and raw pulse outputs
pub const SERVO_PWM_FREQUENCY_HZ: u32 = 50;

/// Bus-attached I/O expander
///
/// Sub-resources are released by dropping them. Implementations that share
/// the underlying bus between handles (e.g. through a `RefCell` or a
/// blocking mutex) are expected to do so inside the associated types.
pub trait Expander {
    /// Error type for expander transactions
    type Error;

    /// PWM output channel bound to one pin
    type Pwm: SetDutyCycle;

    /// Capacitive touch channel bound to one pin
    type Touch: TouchChannel<Error = Self::Error>;

    /// Addressable LED bus bound to one pin
    type Pixels: PixelBus<Error = Self::Error>;

    /// Configure `pin` as a PWM output running at `frequency_hz`
    ///
    /// Fails if the pin has no PWM capability on this firmware or the
    /// frequency is not supported.
    fn configure_pwm(
        &mut self,
        pin: PhysicalPin,
        frequency_hz: u32,
    ) -> Result<Self::Pwm, Self::Error>;

    /// Claim `pin` as a capacitive touch input
    fn configure_touch(&mut self, pin: PhysicalPin) -> Result<Self::Touch, Self::Error>;

    /// Read the raw capacitive measurement on `pin`
    ///
    /// Register-level primitive; typed code goes through [`TouchChannel`].
    fn read_touch(&mut self, pin: PhysicalPin) -> Result<u16, Self::Error>;

    /// Configure `pin` as an addressable LED data line
    fn configure_pixel_bus(
        &mut self,
        pin: PhysicalPin,
        config: &PixelBusConfig,
    ) -> Result<Self::Pixels, Self::Error>;

    /// Software-reset the expander, restoring its registers to defaults
    fn hardware_reset(&mut self) -> Result<(), Self::Error>;
}
