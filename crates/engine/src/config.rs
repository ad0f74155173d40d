//! Engine configuration from environment variables.

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

/// Default settings file, relative to the working directory
pub const DEFAULT_SETTINGS_PATH: &str = "naut-tetris.json";

/// Default capacity of the per-frame broadcast channel
pub const DEFAULT_FRAME_BUFFER: usize = 128;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Piece generator seed
    pub seed: u32,
    /// Where settings are persisted
    pub settings_path: PathBuf,
    /// Frames a slow subscriber may fall behind before it lags
    pub frame_buffer: usize,
    /// Log file; logging goes to stderr when unset
    pub log_path: Option<PathBuf>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed: 1,
            settings_path: PathBuf::from(DEFAULT_SETTINGS_PATH),
            frame_buffer: DEFAULT_FRAME_BUFFER,
            log_path: None,
        }
    }
}

impl EngineConfig {
    /// Read `NAUT_TETRIS_SEED`, `NAUT_TETRIS_SETTINGS`,
    /// `NAUT_TETRIS_FRAME_BUFFER` and `NAUT_TETRIS_LOG`; the seed defaults to
    /// the clock.
    pub fn from_env() -> Self {
        use std::env;

        let seed = env::var("NAUT_TETRIS_SEED")
            .ok()
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or_else(clock_seed);

        let settings_path = env::var("NAUT_TETRIS_SETTINGS")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SETTINGS_PATH));

        let frame_buffer = env::var("NAUT_TETRIS_FRAME_BUFFER")
            .ok()
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(DEFAULT_FRAME_BUFFER)
            .max(1);

        let log_path = env::var("NAUT_TETRIS_LOG")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .map(PathBuf::from);

        Self {
            seed,
            settings_path,
            frame_buffer,
            log_path,
        }
    }
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}
