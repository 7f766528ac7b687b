//! Configuration types
//!
//! Static board selection and optional pixel strip setup, deserializable
//! from TOML when the `serde` feature is enabled.

pub mod board;

pub use board::*;
