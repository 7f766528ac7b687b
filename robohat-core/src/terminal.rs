//! Logical board terminals
//!
//! A terminal is a connection point printed on the board ("Servo 3",
//! "RC 1", "SIGNAL9"). Terminals are fixed per board; each one owns exactly
//! one device cache slot.

use crate::pinmap::{MAX_SIGNALS, SERVO_SLOTS, TOUCH_SLOTS};

/// Total number of cache slots across all terminal groups
pub const TERMINAL_SLOTS: usize = (SERVO_SLOTS + TOUCH_SLOTS + MAX_SIGNALS) as usize;

/// Logical terminal on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Terminal {
    /// Servo header, 1-based
    Servo(u8),
    /// RC channel / capacitive touch pad, 1-based
    Touch(u8),
    /// `SIGNALn` header pin, numbered as printed on the board
    Signal(u8),
}

impl Terminal {
    /// Cache slot owned by this terminal
    ///
    /// Returns `None` when the index is outside every board's range.
    pub fn slot(self) -> Option<usize> {
        match self {
            Terminal::Servo(n) if (1..=SERVO_SLOTS).contains(&n) => Some(n as usize - 1),
            Terminal::Touch(n) if (1..=TOUCH_SLOTS).contains(&n) => {
                Some((SERVO_SLOTS + n - 1) as usize)
            }
            Terminal::Signal(n) if n < MAX_SIGNALS => Some((SERVO_SLOTS + TOUCH_SLOTS + n) as usize),
            _ => None,
        }
    }
}
