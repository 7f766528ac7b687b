//! Capacitive touch abstractions

/// Capacitive touch input bound to one expander pin
pub trait TouchChannel {
    /// Error type for touch reads
    type Error;

    /// Read the raw capacitive measurement
    ///
    /// Larger values mean more capacitance (a finger on the pad).
    fn read_raw(&mut self) -> Result<u16, Self::Error>;
}
