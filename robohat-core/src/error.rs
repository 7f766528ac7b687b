//! Board-level errors

use crate::peripheral::PeripheralKind;

/// Errors surfaced by the board facade and device cache
///
/// `E` is the expander's transaction error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BoardError<E> {
    /// Expander rejected a configuration request (bad pin, unsupported mode)
    DeviceConfiguration(E),
    /// Expander transaction failed after configuration
    Bus(E),
    /// Pixel strip accessed before `init_pixel_strip`
    NotInitialized,
    /// Terminal index outside the board's defined range
    InvalidTerminal,
    /// Pixel strip parameters the driver cannot handle (too many pixels or
    /// an unsupported bytes-per-pixel)
    UnsupportedPixelStrip,
    /// Cache slot holds a different kind than requested
    KindMismatch(PeripheralKind),
}

impl<E> BoardError<E> {
    /// Whether this error came from the expander itself
    pub fn is_expander_error(&self) -> bool {
        matches!(self, BoardError::DeviceConfiguration(_) | BoardError::Bus(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expander_errors() {
        assert!(BoardError::DeviceConfiguration(3u8).is_expander_error());
        assert!(BoardError::Bus(3u8).is_expander_error());
    }

    #[test]
    fn test_board_errors() {
        let errors: [BoardError<u8>; 4] = [
            BoardError::NotInitialized,
            BoardError::InvalidTerminal,
            BoardError::UnsupportedPixelStrip,
            BoardError::KindMismatch(PeripheralKind::Touch),
        ];
        for error in errors {
            assert!(!error.is_expander_error(), "{:?}", error);
        }
    }
}
