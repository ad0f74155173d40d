//! Settings persistence
//!
//! User preferences live in a flat key/value store. [`load_settings`] reads
//! every key with its default, falling back and clamping where the stored
//! value is missing, malformed or out of range. [`persist_change`] writes the
//! single key a [`SettingChange`](types::SettingChange) touched.

pub mod error;
pub mod key;
pub mod store;

pub use naut_tetris_types as types;

pub use error::SettingsError;
pub use key::{SettingKey, SettingValue};
pub use store::{JsonFileStore, MemoryStore, SettingsStore};

use log::debug;

use types::{
    SettingChange, Settings, MAX_GAME_SPEED, MAX_GRID_SIZE, MAX_NAUT_PROBABILITY, MIN_GAME_SPEED,
    MIN_GRID_SIZE,
};

/// Read all settings from `store`
pub fn load_settings(store: &dyn SettingsStore) -> Settings {
    let defaults = Settings::default();
    let read_bool = |key: SettingKey| {
        store
            .get(key, key.value_in(&defaults))
            .as_bool()
            .unwrap_or(false)
    };
    let read_int = |key: SettingKey, lo: i64, hi: i64| {
        store
            .get(key, key.value_in(&defaults))
            .as_int()
            .unwrap_or(lo)
            .clamp(lo, hi)
    };

    let settings = Settings {
        grid_width: read_int(SettingKey::GridWidth, MIN_GRID_SIZE as i64, MAX_GRID_SIZE as i64)
            as i32,
        grid_height: read_int(SettingKey::GridHeight, MIN_GRID_SIZE as i64, MAX_GRID_SIZE as i64)
            as i32,
        dark_mode: read_bool(SettingKey::DarkMode),
        mute: read_bool(SettingKey::Mute),
        use_nauts: read_bool(SettingKey::UseNauts),
        use_ghost_block: read_bool(SettingKey::UseGhostBlock),
        show_grid_outline: read_bool(SettingKey::ShowGridOutline),
        show_background_art: read_bool(SettingKey::ShowBackgroundArt),
        game_speed: read_int(
            SettingKey::GameSpeed,
            MIN_GAME_SPEED as i64,
            MAX_GAME_SPEED as i64,
        ) as u8,
        naut_probability: read_int(SettingKey::NautProbability, 0, MAX_NAUT_PROBABILITY as i64)
            as u8,
    }
    .clamped();
    debug!("loaded settings: {:?}", settings);
    settings
}

/// Write the key touched by `change`, taking its value from `settings`
pub fn persist_change(
    store: &mut dyn SettingsStore,
    change: SettingChange,
    settings: &Settings,
) -> Result<(), SettingsError> {
    let key = SettingKey::for_change(change);
    store.set(key, key.value_in(settings))
}

/// Write every key
pub fn save_settings(store: &mut dyn SettingsStore, settings: &Settings) -> Result<(), SettingsError> {
    for key in SettingKey::ALL {
        store.set(key, key.value_in(settings))?;
    }
    Ok(())
}
