//! Engine runtime: the game state machine behind a tokio actor.
//!
//! `naut-tetris-core` is pure; this crate gives it a clock and an owner.
//! [`Engine`] runs a single task that serializes every command, releases
//! animation frames on time, publishes [`Snapshot`]s, plays sounds through a
//! [`SoundNotifier`] and persists setting changes through a
//! [`SettingsStore`](settings::SettingsStore). [`Ticker`] is the periodic
//! `GameTick` source.
//!
//! ```no_run
//! use naut_tetris_engine::{Engine, LogSound, Ticker};
//! use naut_tetris_engine::core::GameState;
//! use naut_tetris_engine::settings::MemoryStore;
//! use naut_tetris_engine::types::{Command, Settings};
//!
//! # async fn demo() {
//! let game = GameState::new(Settings::default(), 42);
//! let engine = Engine::spawn(game, Box::new(MemoryStore::new()), Box::new(LogSound), 128);
//! let ticker = Ticker::spawn(engine.dispatcher(), engine.watch());
//!
//! engine.dispatch(Command::Reset).unwrap();
//! let mut frames = engine.subscribe();
//! let snapshot = frames.recv().await.unwrap();
//! println!("generation {} score {}", snapshot.generation, snapshot.score);
//!
//! ticker.stop();
//! engine.shutdown().await;
//! # }
//! ```

pub mod actor;
pub mod config;
pub mod error;
pub mod snapshot;
pub mod sound;
pub mod ticker;

pub use naut_tetris_core as core;
pub use naut_tetris_settings as settings;
pub use naut_tetris_types as types;

pub use actor::{Dispatcher, Engine};
pub use config::EngineConfig;
pub use error::EngineError;
pub use snapshot::{spawn_renderer, Renderer, Snapshot};
pub use sound::{LogSound, NullSound, SoundNotifier};
pub use ticker::Ticker;
