//! Robo HAT board facade
//!
//! [`RoboHat`] represents one physical board. Devices are created on demand
//! the first time a terminal is accessed and cached afterwards, so repeated
//! access is cheap:
//!
//! ```ignore
//! let mut hat = robohat::new(expander, BoardVariant::Mm1);
//!
//! // Fine:
//! hat.servo_1()?.set_angle(Some(0.0))?;
//! hat.servo_1()?.set_angle(Some(90.0))?;
//!
//! // Also fine, and skips the lookup:
//! let servo = hat.servo_1()?;
//! servo.set_angle(Some(0.0))?;
//! servo.set_angle(Some(90.0))?;
//! ```
//!
//! Accessing a terminal as a different kind (say `continuous_servo_1` after
//! `servo_1`) releases the old device and binds a new one on the same pin.
//! Returned references borrow the board, so a stale device cannot outlive
//! the rebind.

use robohat_core::{BoardConfig, BoardError, BoardVariant, PeripheralKind, PinMap, Terminal};
use robohat_drivers::{ContinuousServo, PixelStrip, PulseOut, Servo, TouchIn};
use robohat_hal::{Expander, PhysicalPin, PixelBusConfig};

use crate::cache::{DeviceCache, Peripheral};

/// Result type for board operations on expander `X`
pub type BoardResult<T, X> = Result<T, BoardError<<X as Expander>::Error>>;

/// One Robo HAT board behind an I/O expander
pub struct RoboHat<X: Expander> {
    expander: X,
    variant: BoardVariant,
    pin_map: &'static PinMap,
    devices: DeviceCache<X>,
    pixels: Option<PixelStrip<X::Pixels>>,
}

macro_rules! slot_accessors {
    ($($name:ident => $method:ident($slot:literal) -> $ty:ident<$assoc:ident>;)*) => {
        $(
            #[doc = concat!("`", stringify!($ty), "` on terminal ", stringify!($slot))]
            pub fn $name(&mut self) -> BoardResult<&mut $ty<X::$assoc>, X> {
                self.$method($slot)
            }
        )*
    };
}

impl<X: Expander> RoboHat<X> {
    /// Wrap an expander attached to a board of the given variant
    ///
    /// No expander transaction happens until a device is first accessed.
    pub fn new(expander: X, variant: BoardVariant) -> Self {
        let pin_map = variant.pin_map();
        info!("{} ready", pin_map.name);
        Self {
            expander,
            variant,
            pin_map,
            devices: DeviceCache::new(),
            pixels: None,
        }
    }

    /// Build a board from configuration, initializing the pixel strip if
    /// one is configured
    pub fn from_config(expander: X, config: &BoardConfig) -> BoardResult<Self, X> {
        let mut board = Self::new(expander, config.variant);
        if let Some(strip) = config.pixel_strip {
            board.init_pixel_strip(strip)?;
        }
        Ok(board)
    }

    /// Board revision
    pub fn variant(&self) -> BoardVariant {
        self.variant
    }

    /// Pin map in use
    pub fn pin_map(&self) -> &'static PinMap {
        self.pin_map
    }

    /// The expander, for direct register access to unwrapped terminals
    pub fn expander(&self) -> &X {
        &self.expander
    }

    /// Mutable access to the expander
    ///
    /// Reconfiguring a pin that a cached device is bound to leaves that
    /// device stale.
    pub fn expander_mut(&mut self) -> &mut X {
        &mut self.expander
    }

    /// Device cache
    pub fn devices(&self) -> &DeviceCache<X> {
        &self.devices
    }

    /// Mutable access to the device cache
    pub fn devices_mut(&mut self) -> &mut DeviceCache<X> {
        &mut self.devices
    }

    /// Physical pin behind a terminal
    pub fn pin(&self, terminal: Terminal) -> BoardResult<PhysicalPin, X> {
        self.pin_map
            .resolve(terminal)
            .ok_or(BoardError::InvalidTerminal)
    }

    /// Physical pin behind the `SIGNALn` label
    pub fn signal_pin(&self, signal: u8) -> BoardResult<PhysicalPin, X> {
        self.pin(Terminal::Signal(signal))
    }

    /// Resolve `terminal` and get its device as `kind`
    fn bind(&mut self, terminal: Terminal, kind: PeripheralKind) -> BoardResult<&mut Peripheral<X>, X> {
        let pin = self.pin(terminal)?;
        if kind.uses_pwm() && !self.pin_map.is_pwm_capable(pin) {
            return Err(BoardError::InvalidTerminal);
        }
        self.devices
            .get_or_create(&mut self.expander, terminal, pin, kind)
    }

    /// Positional servo on servo terminal `slot` (1-8)
    pub fn servo(&mut self, slot: u8) -> BoardResult<&mut Servo<X::Pwm>, X> {
        self.bind(Terminal::Servo(slot), PeripheralKind::Servo)?
            .as_servo_mut()
            .ok_or(BoardError::KindMismatch(PeripheralKind::Servo))
    }

    /// Continuous-rotation servo on servo terminal `slot` (1-8)
    pub fn continuous_servo(&mut self, slot: u8) -> BoardResult<&mut ContinuousServo<X::Pwm>, X> {
        self.bind(Terminal::Servo(slot), PeripheralKind::ContinuousServo)?
            .as_continuous_servo_mut()
            .ok_or(BoardError::KindMismatch(PeripheralKind::ContinuousServo))
    }

    /// Capacitive touch input on touch terminal `slot` (1-4)
    pub fn touch(&mut self, slot: u8) -> BoardResult<&mut TouchIn<X::Touch>, X> {
        self.bind(Terminal::Touch(slot), PeripheralKind::Touch)?
            .as_touch_mut()
            .ok_or(BoardError::KindMismatch(PeripheralKind::Touch))
    }

    /// One-off raw read of touch terminal `slot`, without binding a device
    pub fn read_touch_raw(&mut self, slot: u8) -> BoardResult<u16, X> {
        let pin = self.pin(Terminal::Touch(slot))?;
        self.expander.read_touch(pin).map_err(BoardError::Bus)
    }

    /// Raw 50 Hz pulse output on a PWM-capable servo or signal terminal
    pub fn pulse_out(&mut self, terminal: Terminal) -> BoardResult<&mut PulseOut<X::Pwm>, X> {
        self.bind(terminal, PeripheralKind::PulseOut)?
            .as_pulse_out_mut()
            .ok_or(BoardError::KindMismatch(PeripheralKind::PulseOut))
    }

    slot_accessors! {
        servo_1 => servo(1) -> Servo<Pwm>;
        servo_2 => servo(2) -> Servo<Pwm>;
        servo_3 => servo(3) -> Servo<Pwm>;
        servo_4 => servo(4) -> Servo<Pwm>;
        servo_5 => servo(5) -> Servo<Pwm>;
        servo_6 => servo(6) -> Servo<Pwm>;
        servo_7 => servo(7) -> Servo<Pwm>;
        servo_8 => servo(8) -> Servo<Pwm>;
        continuous_servo_1 => continuous_servo(1) -> ContinuousServo<Pwm>;
        continuous_servo_2 => continuous_servo(2) -> ContinuousServo<Pwm>;
        continuous_servo_3 => continuous_servo(3) -> ContinuousServo<Pwm>;
        continuous_servo_4 => continuous_servo(4) -> ContinuousServo<Pwm>;
        continuous_servo_5 => continuous_servo(5) -> ContinuousServo<Pwm>;
        continuous_servo_6 => continuous_servo(6) -> ContinuousServo<Pwm>;
        continuous_servo_7 => continuous_servo(7) -> ContinuousServo<Pwm>;
        continuous_servo_8 => continuous_servo(8) -> ContinuousServo<Pwm>;
        touch_1 => touch(1) -> TouchIn<Touch>;
        touch_2 => touch(2) -> TouchIn<Touch>;
        touch_3 => touch(3) -> TouchIn<Touch>;
        touch_4 => touch(4) -> TouchIn<Touch>;
    }

    /// Set up the pixel strip on the board's NeoPixel terminal
    ///
    /// Calling this again replaces the strip once the new bus is
    /// configured. If the expander rejects the new bus the old strip stays
    /// in place.
    pub fn init_pixel_strip(&mut self, config: PixelBusConfig) -> BoardResult<&mut PixelStrip<X::Pixels>, X> {
        if !PixelStrip::<X::Pixels>::supports(&config) {
            return Err(BoardError::UnsupportedPixelStrip);
        }
        let pin = self.pin_map.neopixel_pin;
        let bus = self
            .expander
            .configure_pixel_bus(pin, &config)
            .map_err(BoardError::DeviceConfiguration)?;
        let strip = PixelStrip::new(bus, config).map_err(|_| BoardError::UnsupportedPixelStrip)?;
        info!("pixel strip on pin {}: {} pixels", pin, config.count);

        if self.pixels.is_some() {
            debug!("replacing pixel strip");
        }
        Ok(self.pixels.insert(strip))
    }

    /// The pixel strip set up by [`init_pixel_strip`](Self::init_pixel_strip)
    pub fn pixel_strip(&mut self) -> BoardResult<&mut PixelStrip<X::Pixels>, X> {
        self.pixels.as_mut().ok_or(BoardError::NotInitialized)
    }

    /// Whether the pixel strip has been set up
    pub fn has_pixel_strip(&self) -> bool {
        self.pixels.is_some()
    }

    /// Reset the whole board
    ///
    /// Only the expander registers are reset. Cached devices stay in the
    /// cache but are stale afterwards; drop them with
    /// [`DeviceCache::reset_all`] before reuse.
    pub fn reset(&mut self) -> BoardResult<(), X> {
        warn!("resetting expander, {} cached devices now stale", self.devices.len());
        self.expander.hardware_reset().map_err(BoardError::Bus)
    }

    /// Tear down the board and hand back the expander
    ///
    /// All cached devices and the pixel strip are released first.
    pub fn release(mut self) -> X {
        self.devices.reset_all();
        self.pixels = None;
        self.expander
    }
}
