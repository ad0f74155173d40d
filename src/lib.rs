//! Naut Tetris (workspace facade crate).
//!
//! Re-exports the member crates under `naut_tetris::{core,engine,input,settings,term,types}`
//! while the implementation lives in dedicated crates under `crates/`.

pub use naut_tetris_core as core;
pub use naut_tetris_engine as engine;
pub use naut_tetris_input as input;
pub use naut_tetris_settings as settings;
pub use naut_tetris_term as term;
pub use naut_tetris_types as types;
