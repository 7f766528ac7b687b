//! Sensor inputs

pub mod touch;

pub use touch::{TouchIn, DEFAULT_TOUCH_MARGIN};
