//! Board pin maps
//!
//! seesaw firmware keeps indexed lists of pins by function (analog, PWM,
//! touch). The tables below reproduce those lists for each Robo HAT variant,
//! so index `i` of `pwm_pins` is the pin the firmware calls `pwm[i]`, not
//! the `i`th terminal printed on the board.
//!
//! Pin numbers follow the seesaw convention: `PAnn` is `nn`, `PBnn` is
//! `32 + nn`.

use robohat_hal::PhysicalPin;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::terminal::Terminal;

/// Number of servo terminals on every Robo HAT
pub const SERVO_SLOTS: u8 = 8;

/// Number of touch (RC channel) terminals on every Robo HAT
pub const TOUCH_SLOTS: u8 = 4;

/// Upper bound on signal terminals across variants
pub const MAX_SIGNALS: u8 = 16;

/// Supported board revisions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum BoardVariant {
    /// Robo HAT MM1 (mm1_hat firmware)
    #[default]
    Mm1,
    /// Early MM1 revision with the servo header on different pins
    Mm1Prototype,
}

impl BoardVariant {
    /// All supported variants
    pub const ALL: [BoardVariant; 2] = [BoardVariant::Mm1, BoardVariant::Mm1Prototype];

    /// Pin map for this variant
    pub fn pin_map(self) -> &'static PinMap {
        match self {
            BoardVariant::Mm1 => &MM1,
            BoardVariant::Mm1Prototype => &MM1_PROTOTYPE,
        }
    }
}

/// Static pin assignment of one board variant
#[derive(Debug, PartialEq, Eq)]
pub struct PinMap {
    /// Human-readable board name
    pub name: &'static str,
    /// Firmware analog pin list (`analog[i]`)
    pub analog_pins: &'static [PhysicalPin],
    /// PWM resolution in bits
    pub pwm_width: u8,
    /// Firmware PWM pin list (`pwm[i]`); servo `n` is `pwm[n - 1]`
    pub pwm_pins: &'static [PhysicalPin],
    /// Firmware touch pin list (`touch[i]`); touch `n` is `touch[n - 1]`
    pub touch_pins: &'static [PhysicalPin],
    /// Signal header pins by label number; `None` where the label is unused
    pub signal_pins: &'static [Option<PhysicalPin>],
    /// NeoPixel data pin
    pub neopixel_pin: PhysicalPin,
}

impl PinMap {
    /// Pin of servo terminal `slot` (1-based)
    pub fn servo_pin(&self, slot: u8) -> Option<PhysicalPin> {
        if slot == 0 || slot > SERVO_SLOTS {
            return None;
        }
        self.pwm_pins.get(slot as usize - 1).copied()
    }

    /// Pin of touch terminal `slot` (1-based)
    pub fn touch_pin(&self, slot: u8) -> Option<PhysicalPin> {
        if slot == 0 || slot > TOUCH_SLOTS {
            return None;
        }
        self.touch_pins.get(slot as usize - 1).copied()
    }

    /// Pin behind the `SIGNALn` label
    pub fn signal_pin(&self, signal: u8) -> Option<PhysicalPin> {
        self.signal_pins.get(signal as usize).copied().flatten()
    }

    /// Firmware analog channel `index`
    pub fn analog_pin(&self, index: usize) -> Option<PhysicalPin> {
        self.analog_pins.get(index).copied()
    }

    /// Firmware PWM channel `index`
    pub fn pwm_pin(&self, index: usize) -> Option<PhysicalPin> {
        self.pwm_pins.get(index).copied()
    }

    /// Whether the firmware can drive `pin` as a PWM output
    pub fn is_pwm_capable(&self, pin: PhysicalPin) -> bool {
        self.pwm_pins.contains(&pin)
    }

    /// Whether the firmware can sample `pin` as an analog input
    pub fn is_analog_capable(&self, pin: PhysicalPin) -> bool {
        self.analog_pins.contains(&pin)
    }

    /// Physical pin behind a logical terminal
    pub fn resolve(&self, terminal: Terminal) -> Option<PhysicalPin> {
        match terminal {
            Terminal::Servo(slot) => self.servo_pin(slot),
            Terminal::Touch(slot) => self.touch_pin(slot),
            Terminal::Signal(signal) => self.signal_pin(signal),
        }
    }

    /// Highest PWM duty value at this board's resolution
    pub const fn max_duty(&self) -> u32 {
        (1u32 << self.pwm_width) - 1
    }
}

/// Robo HAT MM1
pub static MM1: PinMap = PinMap {
    name: "Robo HAT MM1",
    // analog[0]: PB15 (SIGNAL3), analog[1]: PB16 (SIGNAL2)
    analog_pins: &[47, 48],
    pwm_width: 16,
    // pwm[0..8]: servo 1-8, pwm[8..12]: SIGNAL12, SIGNAL10, SIGNAL11, SIGNAL9
    pwm_pins: &[16, 17, 18, 19, 11, 10, 9, 8, 40, 41, 42, 43],
    // RC channels 1-4
    touch_pins: &[7, 6, 5, 4],
    signal_pins: &[
        Some(55), // RX to RPI_TX
        Some(54), // TX to RPI_RX
        Some(48), // ADC, GPS_RX
        Some(47), // ADC, GPS_TX
        Some(0),  // GPS_SDA
        Some(1),  // GPS_SCL
        Some(2),  // POWER_ENABLE
        Some(3),  // BUTTON
        Some(20), // NEOPIXEL
        Some(43), // PWM, SPI_SCK
        Some(41), // PWM, SPI_SS
        Some(42), // PWM, SPI_MOSI
        Some(40), // PWM, SPI_MISO
        Some(21), // BOOT_LED
    ],
    neopixel_pin: 20,
};

/// Early Robo HAT MM1 revision
pub static MM1_PROTOTYPE: PinMap = PinMap {
    name: "Robo HAT MM1 (prototype)",
    analog_pins: &[34, 35, 40, 41, 2, 3],
    pwm_width: 16,
    pwm_pins: &[42, 43, 20, 21, 10, 11, 16, 17, 40, 41, 15, 18],
    touch_pins: &[4, 5, 6, 7],
    signal_pins: &[
        None,
        Some(34), // ADC
        Some(35), // ADC
        Some(40), // ADC/PWM
        Some(41), // ADC/PWM
        Some(15), // PWM
        Some(18), // PWM
        Some(54), // serial port
        Some(55), // serial port
        Some(2),  // ADC
        Some(3),  // ADC
        Some(12), // BOOT_LED
    ],
    neopixel_pin: 19,
};

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_mm1_servo_1_is_pa16() {
        assert_eq!(BoardVariant::Mm1.pin_map().servo_pin(1), Some(16));
        assert_eq!(BoardVariant::Mm1.pin_map().servo_pin(8), Some(8));
    }

    #[test]
    fn test_servo_slots_out_of_range() {
        let map = BoardVariant::Mm1.pin_map();
        assert_eq!(map.servo_pin(0), None);
        assert_eq!(map.servo_pin(9), None);
    }

    #[test]
    fn test_touch_pins() {
        let map = BoardVariant::Mm1.pin_map();
        assert_eq!(map.touch_pin(1), Some(7));
        assert_eq!(map.touch_pin(4), Some(4));
        assert_eq!(map.touch_pin(5), None);

        let proto = BoardVariant::Mm1Prototype.pin_map();
        assert_eq!(proto.touch_pin(1), Some(4));
    }

    #[test]
    fn test_prototype_signal_zero_unused() {
        let proto = BoardVariant::Mm1Prototype.pin_map();
        assert_eq!(proto.signal_pin(0), None);
        assert_eq!(proto.signal_pin(1), Some(34));
        assert_eq!(proto.signal_pin(12), None);
    }

    #[test]
    fn test_every_servo_pin_is_pwm_capable() {
        for variant in BoardVariant::ALL {
            let map = variant.pin_map();
            for slot in 1..=SERVO_SLOTS {
                let pin = map.servo_pin(slot).unwrap();
                assert!(map.is_pwm_capable(pin), "{:?} servo {}", variant, slot);
            }
        }
    }

    #[test]
    fn test_tables_fit_slot_bounds() {
        for variant in BoardVariant::ALL {
            let map = variant.pin_map();
            assert!(map.pwm_pins.len() >= SERVO_SLOTS as usize);
            assert_eq!(map.touch_pins.len(), TOUCH_SLOTS as usize);
            assert!(map.signal_pins.len() <= MAX_SIGNALS as usize);
        }
    }

    #[test]
    fn test_mm1_firmware_tables() {
        let map = BoardVariant::Mm1.pin_map();
        assert_eq!(map.analog_pin(0), Some(47));
        assert_eq!(map.analog_pin(1), Some(48));
        assert_eq!(map.analog_pin(2), None);
        assert_eq!(map.pwm_pin(0), Some(16));
        assert_eq!(map.pwm_pin(8), Some(40));
        assert_eq!(map.pwm_pin(11), Some(43));
        assert_eq!(map.pwm_pin(12), None);
    }

    #[test]
    fn test_prototype_firmware_tables() {
        let proto = BoardVariant::Mm1Prototype.pin_map();
        assert_eq!(proto.analog_pin(5), Some(3));
        assert_eq!(proto.analog_pin(6), None);
        assert_eq!(proto.pwm_pin(0), Some(42));
        assert_eq!(proto.pwm_pin(10), Some(15));
    }

    #[test]
    fn test_analog_capability() {
        let map = BoardVariant::Mm1.pin_map();
        // SIGNAL2 and SIGNAL3 are the only ADC pins on the header
        assert!(map.is_analog_capable(48));
        assert!(map.is_analog_capable(47));
        assert!(!map.is_analog_capable(16));
        assert!(!map.is_analog_capable(55));

        let proto = BoardVariant::Mm1Prototype.pin_map();
        assert!(proto.is_analog_capable(40));
        assert!(!MM1.is_analog_capable(40));
    }

    #[test]
    fn test_max_duty_16_bit() {
        assert_eq!(MM1.max_duty(), 0xFFFF);
    }

    #[test]
    fn test_resolve_matches_direct_lookups() {
        let map = BoardVariant::Mm1.pin_map();
        assert_eq!(map.resolve(Terminal::Servo(3)), Some(18));
        assert_eq!(map.resolve(Terminal::Touch(2)), Some(6));
        assert_eq!(map.resolve(Terminal::Signal(9)), Some(43));
    }

    proptest! {
        #[test]
        fn resolve_is_pure(variant_idx in 0usize..2, kind in 0u8..3, index in 0u8..20) {
            let variant = BoardVariant::ALL[variant_idx];
            let terminal = match kind {
                0 => Terminal::Servo(index),
                1 => Terminal::Touch(index),
                _ => Terminal::Signal(index),
            };
            let first = variant.pin_map().resolve(terminal);
            let second = variant.pin_map().resolve(terminal);
            prop_assert_eq!(first, second);
        }
    }
}
