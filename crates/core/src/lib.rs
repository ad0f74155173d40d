//! Core game logic - pure, deterministic, and testable
//!
//! This crate holds the rules of the naut variant: piece geometry, the board
//! merge and line clear, the piece generator, scoring, and the state machine
//! that ties them together. It has no I/O and no async runtime, so a seed
//! and a sequence of commands reproduce a game exactly.
//!
//! # Module Structure
//!
//! - [`pieces`]: rotation tables for the seven classic tetrominoes and the naut
//! - [`block`]: settled cells and the falling [`DropBlock`]
//! - [`board`]: merging a landed piece and resolving full rows
//! - [`rng`]: seeded 7-bag generator with naut substitution
//! - [`scoring`]: line rewards and level progression
//! - [`view_state`]: the immutable snapshot handed to renderers
//! - [`animation`]: line-clear flash and screen wipe as timed frame queues
//! - [`game_state`]: command dispatch, elapsed-time advance, effect outbox
//!
//! # Example
//!
//! ```
//! use naut_tetris_core::{Effect, GameState};
//! use naut_tetris_core::types::{Command, Direction, GameStatus, Settings};
//!
//! let mut game = GameState::new(Settings::default(), 12345);
//! game.dispatch(Command::Reset);
//! assert_eq!(game.status(), GameStatus::Running);
//!
//! // The first tick spawns a piece.
//! let effects = game.dispatch(Command::GameTick);
//! assert!(matches!(effects[0], Effect::Publish(_)));
//! assert!(game.view().drop_block.is_some());
//!
//! game.dispatch(Command::Move(Direction::Left));
//! game.dispatch(Command::Drop);
//! ```
//!
//! # Timing
//!
//! `GameState` never reads a clock. Gravity arrives as `Command::GameTick`
//! from whoever owns the timer; animations advance only through
//! [`GameState::advance`](game_state::GameState::advance) with the elapsed
//! milliseconds, and [`GameState::next_frame_in_ms`](game_state::GameState::next_frame_in_ms)
//! says when the next frame is due.

pub mod animation;
pub mod block;
pub mod board;
pub mod game_state;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod view_state;

pub use naut_tetris_types as types;

// Re-export commonly used types for convenience
pub use animation::{Animation, AnimationKind, Frame};
pub use block::{is_valid_option, Block, DropBlock};
pub use board::{update_blocks, LineClear};
pub use game_state::{Effect, GameState};
pub use pieces::{get_shape, PieceShape};
pub use rng::{PieceGenerator, SimpleRng};
pub use scoring::{calculate_level, calculate_score, settle_score};
pub use view_state::ViewState;
