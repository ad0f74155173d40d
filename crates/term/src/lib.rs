//! Terminal "game renderer" module.
//!
//! A small, game-oriented rendering layer for terminal gameplay. It avoids
//! widget/layout libraries and renders into a simple framebuffer that is
//! flushed to the terminal as a diff against the previous frame.
//!
//! - [`GameView`] draws a `ViewState` (board, ghost, next piece, stats) and is pure
//! - [`TerminalRenderer`] owns the terminal and writes framebuffers
//! - [`TerminalSink`] is the engine-facing `Renderer` joining the two

pub mod fb;
pub mod game_view;
pub mod renderer;
pub mod theme;

pub use naut_tetris_core as core;
pub use naut_tetris_engine as engine;
pub use naut_tetris_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{AnchorY, GameView, Viewport, PREVIEW};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer, TerminalSink};
pub use theme::{Palette, DARK, LIGHT};
