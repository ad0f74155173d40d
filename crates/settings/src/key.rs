//! Setting names and values as they appear in a store

use serde::{Deserialize, Serialize};

use crate::types::{SettingChange, Settings};

/// Persisted setting name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SettingKey {
    GridWidth,
    GridHeight,
    DarkMode,
    Mute,
    UseNauts,
    UseGhostBlock,
    ShowGridOutline,
    ShowBackgroundArt,
    GameSpeed,
    NautProbability,
}

impl SettingKey {
    pub const ALL: [SettingKey; 10] = [
        SettingKey::GridWidth,
        SettingKey::GridHeight,
        SettingKey::DarkMode,
        SettingKey::Mute,
        SettingKey::UseNauts,
        SettingKey::UseGhostBlock,
        SettingKey::ShowGridOutline,
        SettingKey::ShowBackgroundArt,
        SettingKey::GameSpeed,
        SettingKey::NautProbability,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SettingKey::GridWidth => "grid_width",
            SettingKey::GridHeight => "grid_height",
            SettingKey::DarkMode => "dark_mode",
            SettingKey::Mute => "mute",
            SettingKey::UseNauts => "use_nauts",
            SettingKey::UseGhostBlock => "use_ghost_block",
            SettingKey::ShowGridOutline => "show_grid_outline",
            SettingKey::ShowBackgroundArt => "show_background_art",
            SettingKey::GameSpeed => "game_speed",
            SettingKey::NautProbability => "naut_probability",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|k| k.as_str() == s)
    }

    /// The key a change writes to
    pub fn for_change(change: SettingChange) -> Self {
        match change {
            SettingChange::ToggleMute => SettingKey::Mute,
            SettingChange::ToggleDarkMode => SettingKey::DarkMode,
            SettingChange::ToggleUseNauts => SettingKey::UseNauts,
            SettingChange::ToggleGhostBlock => SettingKey::UseGhostBlock,
            SettingChange::ToggleGridOutline => SettingKey::ShowGridOutline,
            SettingChange::ToggleBackgroundArt => SettingKey::ShowBackgroundArt,
            SettingChange::NautProbability(_) => SettingKey::NautProbability,
            SettingChange::GridWidth(_) => SettingKey::GridWidth,
            SettingChange::GridHeight(_) => SettingKey::GridHeight,
            SettingChange::GameSpeed(_) => SettingKey::GameSpeed,
        }
    }

    /// Current value of this key in `settings`
    pub fn value_in(&self, settings: &Settings) -> SettingValue {
        match self {
            SettingKey::GridWidth => SettingValue::Int(settings.grid_width as i64),
            SettingKey::GridHeight => SettingValue::Int(settings.grid_height as i64),
            SettingKey::DarkMode => SettingValue::Bool(settings.dark_mode),
            SettingKey::Mute => SettingValue::Bool(settings.mute),
            SettingKey::UseNauts => SettingValue::Bool(settings.use_nauts),
            SettingKey::UseGhostBlock => SettingValue::Bool(settings.use_ghost_block),
            SettingKey::ShowGridOutline => SettingValue::Bool(settings.show_grid_outline),
            SettingKey::ShowBackgroundArt => SettingValue::Bool(settings.show_background_art),
            SettingKey::GameSpeed => SettingValue::Int(settings.game_speed as i64),
            SettingKey::NautProbability => SettingValue::Int(settings.naut_probability as i64),
        }
    }
}

/// A stored value; JSON booleans and integers map directly
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SettingValue {
    Bool(bool),
    Int(i64),
}

impl SettingValue {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            SettingValue::Bool(b) => Some(*b),
            SettingValue::Int(_) => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            SettingValue::Int(i) => Some(*i),
            SettingValue::Bool(_) => None,
        }
    }

    /// Same variant as `other`
    pub fn same_kind(&self, other: &SettingValue) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }
}
