//! Recording expander for tests
//!
//! Every sub-resource logs its creation and its release (drop) into a
//! shared [`Log`], so tests can assert exactly which channels were claimed.

use std::cell::RefCell;
use std::convert::Infallible;
use std::rc::Rc;

use embedded_hal::pwm::{ErrorType, SetDutyCycle};
use robohat_hal::{Expander, PhysicalPin, PixelBus, PixelBusConfig, TouchChannel};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockError {
    Rejected(PhysicalPin),
}

#[derive(Debug, Default)]
pub struct Log {
    pub pwm_configured: Vec<(PhysicalPin, u32)>,
    pub pwm_released: Vec<PhysicalPin>,
    pub touch_configured: Vec<PhysicalPin>,
    pub touch_released: Vec<PhysicalPin>,
    pub pixel_buses: Vec<(PhysicalPin, PixelBusConfig)>,
    pub pixel_released: Vec<PhysicalPin>,
    pub pixel_writes: usize,
    pub shows: usize,
    pub resets: usize,
}

pub struct MockExpander {
    pub log: Rc<RefCell<Log>>,
    /// Pins whose configuration requests fail
    pub reject: Vec<PhysicalPin>,
    /// Value returned by every touch read
    pub touch_value: u16,
}

impl MockExpander {
    pub fn new() -> Self {
        Self {
            log: Rc::new(RefCell::new(Log::default())),
            reject: Vec::new(),
            touch_value: 300,
        }
    }

    fn check(&self, pin: PhysicalPin) -> Result<(), MockError> {
        if self.reject.contains(&pin) {
            return Err(MockError::Rejected(pin));
        }
        Ok(())
    }
}

pub struct MockPwm {
    pin: PhysicalPin,
    log: Rc<RefCell<Log>>,
}

impl ErrorType for MockPwm {
    type Error = Infallible;
}

impl SetDutyCycle for MockPwm {
    fn max_duty_cycle(&self) -> u16 {
        0xFFFF
    }

    fn set_duty_cycle(&mut self, _duty: u16) -> Result<(), Self::Error> {
        Ok(())
    }
}

impl Drop for MockPwm {
    fn drop(&mut self) {
        self.log.borrow_mut().pwm_released.push(self.pin);
    }
}

pub struct MockTouch {
    pin: PhysicalPin,
    value: u16,
    log: Rc<RefCell<Log>>,
}

impl TouchChannel for MockTouch {
    type Error = MockError;

    fn read_raw(&mut self) -> Result<u16, MockError> {
        Ok(self.value)
    }
}

impl Drop for MockTouch {
    fn drop(&mut self) {
        self.log.borrow_mut().touch_released.push(self.pin);
    }
}

pub struct MockPixels {
    pin: PhysicalPin,
    log: Rc<RefCell<Log>>,
}

impl PixelBus for MockPixels {
    type Error = MockError;

    fn write(&mut self, _offset: u16, _data: &[u8]) -> Result<(), MockError> {
        self.log.borrow_mut().pixel_writes += 1;
        Ok(())
    }

    fn show(&mut self) -> Result<(), MockError> {
        self.log.borrow_mut().shows += 1;
        Ok(())
    }
}

impl Drop for MockPixels {
    fn drop(&mut self) {
        self.log.borrow_mut().pixel_released.push(self.pin);
    }
}

impl Expander for MockExpander {
    type Error = MockError;
    type Pwm = MockPwm;
    type Touch = MockTouch;
    type Pixels = MockPixels;

    fn configure_pwm(&mut self, pin: PhysicalPin, frequency_hz: u32) -> Result<MockPwm, MockError> {
        self.check(pin)?;
        self.log.borrow_mut().pwm_configured.push((pin, frequency_hz));
        Ok(MockPwm {
            pin,
            log: self.log.clone(),
        })
    }

    fn configure_touch(&mut self, pin: PhysicalPin) -> Result<MockTouch, MockError> {
        self.check(pin)?;
        self.log.borrow_mut().touch_configured.push(pin);
        Ok(MockTouch {
            pin,
            value: self.touch_value,
            log: self.log.clone(),
        })
    }

    fn read_touch(&mut self, pin: PhysicalPin) -> Result<u16, MockError> {
        self.check(pin)?;
        Ok(self.touch_value)
    }

    fn configure_pixel_bus(
        &mut self,
        pin: PhysicalPin,
        config: &PixelBusConfig,
    ) -> Result<MockPixels, MockError> {
        self.check(pin)?;
        self.log.borrow_mut().pixel_buses.push((pin, *config));
        Ok(MockPixels {
            pin,
            log: self.log.clone(),
        })
    }

    fn hardware_reset(&mut self) -> Result<(), MockError> {
        self.log.borrow_mut().resets += 1;
        Ok(())
    }
}
