//! Per-terminal device cache
//!
//! Every terminal owns one slot holding at most one live peripheral. A slot
//! moves between two states:
//!
//! ```text
//!            request(kind)                 request(kind')
//!   Empty ─────────────────▶ Bound(kind) ─────────────────▶ Bound(kind')
//!                              │    ▲     release + create
//!                              └────┘
//!                           request(kind)
//!                              reuse
//! ```
//!
//! Requesting the kind already bound returns the same device. Requesting a
//! different kind drops the occupant first, which releases its PWM or touch
//! channel, then creates the new device on the same pin. The PWM and touch
//! channels are scarce hardware, so a terminal never holds two devices.
//!
//! The cache never touches expander registers on its own; clearing it does
//! not reset the hardware and resetting the hardware does not clear it.

use robohat_core::{BoardError, PeripheralKind, Terminal, TERMINAL_SLOTS};
use robohat_drivers::{ContinuousServo, PulseOut, Servo, ServoConfig, TouchIn};
use robohat_hal::{Expander, PhysicalPin, SERVO_PWM_FREQUENCY_HZ};

/// A typed device bound to one terminal
pub enum Peripheral<X: Expander> {
    Servo(Servo<X::Pwm>),
    ContinuousServo(ContinuousServo<X::Pwm>),
    Touch(TouchIn<X::Touch>),
    PulseOut(PulseOut<X::Pwm>),
}

impl<X: Expander> Peripheral<X> {
    /// Construct a device of `kind` on `pin`
    ///
    /// PWM kinds claim a 50 Hz channel; touch inputs claim a touch channel
    /// and sample their baseline.
    pub fn create(
        expander: &mut X,
        pin: PhysicalPin,
        kind: PeripheralKind,
    ) -> Result<Self, BoardError<X::Error>> {
        match kind {
            PeripheralKind::Servo => {
                let pwm = configure_pwm(expander, pin)?;
                Ok(Peripheral::Servo(Servo::new(pwm, ServoConfig::default())))
            }
            PeripheralKind::ContinuousServo => {
                let pwm = configure_pwm(expander, pin)?;
                Ok(Peripheral::ContinuousServo(ContinuousServo::new(
                    pwm,
                    ServoConfig::default(),
                )))
            }
            PeripheralKind::PulseOut => {
                let pwm = configure_pwm(expander, pin)?;
                Ok(Peripheral::PulseOut(PulseOut::new(pwm)))
            }
            PeripheralKind::Touch => {
                let channel = expander
                    .configure_touch(pin)
                    .map_err(BoardError::DeviceConfiguration)?;
                let touch = TouchIn::new(channel).map_err(BoardError::Bus)?;
                Ok(Peripheral::Touch(touch))
            }
            // The strip is a board singleton with its own parameters
            PeripheralKind::PixelStrip => Err(BoardError::KindMismatch(kind)),
        }
    }

    /// Kind tag of this device
    pub fn kind(&self) -> PeripheralKind {
        match self {
            Peripheral::Servo(_) => PeripheralKind::Servo,
            Peripheral::ContinuousServo(_) => PeripheralKind::ContinuousServo,
            Peripheral::Touch(_) => PeripheralKind::Touch,
            Peripheral::PulseOut(_) => PeripheralKind::PulseOut,
        }
    }

    pub fn as_servo_mut(&mut self) -> Option<&mut Servo<X::Pwm>> {
        match self {
            Peripheral::Servo(servo) => Some(servo),
            _ => None,
        }
    }

    pub fn as_continuous_servo_mut(&mut self) -> Option<&mut ContinuousServo<X::Pwm>> {
        match self {
            Peripheral::ContinuousServo(servo) => Some(servo),
            _ => None,
        }
    }

    pub fn as_touch_mut(&mut self) -> Option<&mut TouchIn<X::Touch>> {
        match self {
            Peripheral::Touch(touch) => Some(touch),
            _ => None,
        }
    }

    pub fn as_pulse_out_mut(&mut self) -> Option<&mut PulseOut<X::Pwm>> {
        match self {
            Peripheral::PulseOut(out) => Some(out),
            _ => None,
        }
    }
}

fn configure_pwm<X: Expander>(
    expander: &mut X,
    pin: PhysicalPin,
) -> Result<X::Pwm, BoardError<X::Error>> {
    expander
        .configure_pwm(pin, SERVO_PWM_FREQUENCY_HZ)
        .map_err(BoardError::DeviceConfiguration)
}

/// Terminal → peripheral cache
pub struct DeviceCache<X: Expander> {
    slots: [Option<Peripheral<X>>; TERMINAL_SLOTS],
}

impl<X: Expander> Default for DeviceCache<X> {
    fn default() -> Self {
        Self::new()
    }
}

impl<X: Expander> DeviceCache<X> {
    /// Create an empty cache
    pub fn new() -> Self {
        Self {
            slots: core::array::from_fn(|_| None),
        }
    }

    /// Get the device bound to `terminal`, rebinding it as `kind` if needed
    ///
    /// `pin` must be the pin map's pin for `terminal`. On a construction
    /// failure the previous occupant is already released and the slot is
    /// left empty.
    pub fn get_or_create(
        &mut self,
        expander: &mut X,
        terminal: Terminal,
        pin: PhysicalPin,
        kind: PeripheralKind,
    ) -> Result<&mut Peripheral<X>, BoardError<X::Error>> {
        let index = terminal.slot().ok_or(BoardError::InvalidTerminal)?;
        let slot = &mut self.slots[index];

        let device = match slot.take() {
            Some(device) if device.kind() == kind => device,
            previous => {
                if let Some(previous) = previous {
                    debug!(
                        "rebinding {} on pin {}: {} -> {}",
                        terminal,
                        pin,
                        previous.kind(),
                        kind
                    );
                    drop(previous);
                }
                let device = Peripheral::create(expander, pin, kind)?;
                trace!("bound {} on pin {} as {}", terminal, pin, kind);
                device
            }
        };

        Ok(slot.insert(device))
    }

    /// Device currently bound to `terminal`, without creating one
    pub fn get_mut(&mut self, terminal: Terminal) -> Option<&mut Peripheral<X>> {
        let index = terminal.slot()?;
        self.slots[index].as_mut()
    }

    /// Kind currently bound to `terminal`
    pub fn kind_of(&self, terminal: Terminal) -> Option<PeripheralKind> {
        let index = terminal.slot()?;
        self.slots[index].as_ref().map(Peripheral::kind)
    }

    /// Drop the device bound to `terminal`, releasing its channel
    pub fn release(&mut self, terminal: Terminal) -> bool {
        terminal
            .slot()
            .and_then(|index| self.slots[index].take())
            .is_some()
    }

    /// Drop every cached device, releasing all channels
    ///
    /// Expander registers are left as they are.
    pub fn reset_all(&mut self) {
        let released = self.len();
        self.slots.iter_mut().for_each(|slot| *slot = None);
        debug!("released {} cached devices", released);
    }

    /// Number of bound terminals
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    /// Whether no terminal is bound
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{MockError, MockExpander};

    #[test]
    fn test_first_access_creates() {
        let mut expander = MockExpander::new();
        let mut cache = DeviceCache::new();

        let device = cache
            .get_or_create(&mut expander, Terminal::Servo(1), 16, PeripheralKind::Servo)
            .unwrap();
        assert_eq!(device.kind(), PeripheralKind::Servo);
        assert_eq!(cache.len(), 1);
        assert_eq!(expander.log.borrow().pwm_configured, vec![(16, 50)]);
    }

    #[test]
    fn test_same_kind_is_reused() {
        let mut expander = MockExpander::new();
        let mut cache = DeviceCache::new();

        let first = cache
            .get_or_create(&mut expander, Terminal::Servo(1), 16, PeripheralKind::Servo)
            .unwrap() as *const Peripheral<MockExpander>;
        let second = cache
            .get_or_create(&mut expander, Terminal::Servo(1), 16, PeripheralKind::Servo)
            .unwrap() as *const Peripheral<MockExpander>;

        assert_eq!(first, second);
        assert_eq!(expander.log.borrow().pwm_configured.len(), 1);
        assert!(expander.log.borrow().pwm_released.is_empty());
    }

    #[test]
    fn test_kind_change_releases_then_rebinds() {
        let mut expander = MockExpander::new();
        let mut cache = DeviceCache::new();

        cache
            .get_or_create(&mut expander, Terminal::Servo(1), 16, PeripheralKind::Servo)
            .unwrap();
        cache
            .get_or_create(
                &mut expander,
                Terminal::Servo(1),
                16,
                PeripheralKind::ContinuousServo,
            )
            .unwrap();

        let log = expander.log.borrow();
        assert_eq!(log.pwm_configured, vec![(16, 50), (16, 50)]);
        assert_eq!(log.pwm_released, vec![16]);
        drop(log);
        assert_eq!(
            cache.kind_of(Terminal::Servo(1)),
            Some(PeripheralKind::ContinuousServo)
        );
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_every_kind_pair_rebinds() {
        let kinds = [
            PeripheralKind::Servo,
            PeripheralKind::ContinuousServo,
            PeripheralKind::PulseOut,
        ];
        for first in kinds {
            for second in kinds {
                let mut expander = MockExpander::new();
                let mut cache = DeviceCache::new();
                cache
                    .get_or_create(&mut expander, Terminal::Servo(2), 17, first)
                    .unwrap();
                let device = cache
                    .get_or_create(&mut expander, Terminal::Servo(2), 17, second)
                    .unwrap();
                assert_eq!(device.kind(), second);

                let expected_releases = if first == second { 0 } else { 1 };
                assert_eq!(expander.log.borrow().pwm_released.len(), expected_releases);
            }
        }
    }

    #[test]
    fn test_failed_construction_leaves_slot_empty() {
        let mut expander = MockExpander::new();
        let mut cache = DeviceCache::new();

        cache
            .get_or_create(&mut expander, Terminal::Servo(3), 18, PeripheralKind::Servo)
            .unwrap();
        expander.reject.push(18);

        let result = cache.get_or_create(
            &mut expander,
            Terminal::Servo(3),
            18,
            PeripheralKind::PulseOut,
        );
        assert!(matches!(
            result,
            Err(BoardError::DeviceConfiguration(MockError::Rejected(18)))
        ));
        assert_eq!(cache.kind_of(Terminal::Servo(3)), None);
        assert!(cache.is_empty());
        assert_eq!(expander.log.borrow().pwm_released, vec![18]);
    }

    #[test]
    fn test_failed_first_access_leaves_no_entry() {
        let mut expander = MockExpander::new();
        expander.reject.push(7);
        let mut cache = DeviceCache::new();

        let result =
            cache.get_or_create(&mut expander, Terminal::Touch(1), 7, PeripheralKind::Touch);
        assert!(result.is_err());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_touch_reads_baseline() {
        let mut expander = MockExpander::new();
        expander.touch_value = 500;
        let mut cache = DeviceCache::new();

        let device = cache
            .get_or_create(&mut expander, Terminal::Touch(2), 6, PeripheralKind::Touch)
            .unwrap();
        let touch = device.as_touch_mut().unwrap();
        assert_eq!(touch.threshold(), 600);
        assert_eq!(expander.log.borrow().touch_configured, vec![6]);
    }

    #[test]
    fn test_pixel_strip_is_not_cacheable() {
        let mut expander = MockExpander::new();
        let mut cache = DeviceCache::new();

        let result = cache.get_or_create(
            &mut expander,
            Terminal::Signal(8),
            20,
            PeripheralKind::PixelStrip,
        );
        assert!(matches!(
            result,
            Err(BoardError::KindMismatch(PeripheralKind::PixelStrip))
        ));
        assert!(cache.is_empty());
    }

    #[test]
    fn test_invalid_terminal() {
        let mut expander = MockExpander::new();
        let mut cache = DeviceCache::new();

        let result =
            cache.get_or_create(&mut expander, Terminal::Servo(0), 16, PeripheralKind::Servo);
        assert!(matches!(result, Err(BoardError::InvalidTerminal)));
        assert!(expander.log.borrow().pwm_configured.is_empty());
    }

    #[test]
    fn test_reset_all_releases_everything() {
        let mut expander = MockExpander::new();
        let mut cache = DeviceCache::new();

        cache
            .get_or_create(&mut expander, Terminal::Servo(1), 16, PeripheralKind::Servo)
            .unwrap();
        cache
            .get_or_create(&mut expander, Terminal::Touch(1), 7, PeripheralKind::Touch)
            .unwrap();
        assert_eq!(cache.len(), 2);

        cache.reset_all();

        assert!(cache.is_empty());
        let log = expander.log.borrow();
        assert_eq!(log.pwm_released, vec![16]);
        assert_eq!(log.touch_released, vec![7]);
        assert_eq!(log.resets, 0);
    }

    #[test]
    fn test_release_single_terminal() {
        let mut expander = MockExpander::new();
        let mut cache = DeviceCache::new();

        cache
            .get_or_create(&mut expander, Terminal::Servo(4), 19, PeripheralKind::Servo)
            .unwrap();
        assert!(cache.release(Terminal::Servo(4)));
        assert!(!cache.release(Terminal::Servo(4)));
        assert!(cache.get_mut(Terminal::Servo(4)).is_none());
    }
}
