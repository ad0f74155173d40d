//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events into [`crate::types::Command`]s. This is the
//! boundary mapping only; there is no gesture or repeat handling here.

pub mod map;

pub use naut_tetris_types as types;

pub use map::{handle_key_event, should_quit};
