//! Capacitive touch input
//!
//! Imitates a plain touch pad: a baseline is sampled when the input is
//! created, and the pad reads as touched while the raw measurement stays
//! above that baseline plus a fixed margin.

use robohat_hal::TouchChannel;

/// Margin above the baseline reading that counts as a touch
pub const DEFAULT_TOUCH_MARGIN: u16 = 100;

/// Capacitive touch input on one expander pin
pub struct TouchIn<T> {
    channel: T,
    /// Raw readings above this count as touched
    threshold: u16,
}

impl<T: TouchChannel> TouchIn<T> {
    /// Create a touch input, sampling the untouched baseline
    ///
    /// The pad must not be touched while this runs.
    pub fn new(mut channel: T) -> Result<Self, T::Error> {
        let baseline = channel.read_raw()?;
        Ok(Self {
            channel,
            threshold: baseline.saturating_add(DEFAULT_TOUCH_MARGIN),
        })
    }

    /// Raw capacitive measurement
    pub fn raw_value(&mut self) -> Result<u16, T::Error> {
        self.channel.read_raw()
    }

    /// Whether the pad is being touched
    pub fn value(&mut self) -> Result<bool, T::Error> {
        Ok(self.raw_value()? > self.threshold)
    }

    /// Current touch threshold
    pub fn threshold(&self) -> u16 {
        self.threshold
    }

    /// Override the touch threshold
    pub fn set_threshold(&mut self, threshold: u16) {
        self.threshold = threshold;
    }

    /// Hand back the channel
    pub fn release(self) -> T {
        self.channel
    }
}
