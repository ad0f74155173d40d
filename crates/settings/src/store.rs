//! Key/value stores for persisted settings

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use log::{debug, warn};
use tempfile::NamedTempFile;

use crate::error::SettingsError;
use crate::key::{SettingKey, SettingValue};

/// Persistent key/value storage for settings.
///
/// `get` never fails: a missing key or a value of the wrong kind yields
/// `default`.
pub trait SettingsStore: Send {
    fn get(&self, key: SettingKey, default: SettingValue) -> SettingValue;

    fn set(&mut self, key: SettingKey, value: SettingValue) -> Result<(), SettingsError>;
}

impl<S: SettingsStore + ?Sized> SettingsStore for Box<S> {
    fn get(&self, key: SettingKey, default: SettingValue) -> SettingValue {
        (**self).get(key, default)
    }

    fn set(&mut self, key: SettingKey, value: SettingValue) -> Result<(), SettingsError> {
        (**self).set(key, value)
    }
}

/// In-process store. Clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: Arc<Mutex<HashMap<SettingKey, SettingValue>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_values(values: impl IntoIterator<Item = (SettingKey, SettingValue)>) -> Self {
        Self {
            values: Arc::new(Mutex::new(values.into_iter().collect())),
        }
    }

    /// Raw stored value, if any
    pub fn raw(&self, key: SettingKey) -> Option<SettingValue> {
        self.values.lock().ok()?.get(&key).copied()
    }
}

impl SettingsStore for MemoryStore {
    fn get(&self, key: SettingKey, default: SettingValue) -> SettingValue {
        match self.raw(key) {
            Some(value) if value.same_kind(&default) => value,
            _ => default,
        }
    }

    fn set(&mut self, key: SettingKey, value: SettingValue) -> Result<(), SettingsError> {
        if let Ok(mut values) = self.values.lock() {
            values.insert(key, value);
        }
        Ok(())
    }
}

/// Flat JSON object on disk, rewritten on every `set`.
///
/// Unknown keys are preserved. Values that do not parse as a setting are
/// treated as missing, and a file that is not a JSON object is replaced on
/// the next `set`. Writes go through a temporary file renamed over `path`.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    values: BTreeMap<String, serde_json::Value>,
}

impl JsonFileStore {
    /// Open `path`; a missing or unparseable file is an empty store
    pub fn open(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref().to_path_buf();
        let values = match fs::read_to_string(&path) {
            Ok(text) if text.trim().is_empty() => BTreeMap::new(),
            Ok(text) => serde_json::from_str(&text).unwrap_or_else(|e| {
                warn!(
                    "malformed settings file {} ({}); using defaults",
                    path.display(),
                    e
                );
                BTreeMap::new()
            }),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("no settings file at {}", path.display());
                BTreeMap::new()
            }
            Err(source) => return Err(SettingsError::Io { path, source }),
        };
        Ok(Self { path, values })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn save(&self) -> Result<(), SettingsError> {
        let text = serde_json::to_string_pretty(&self.values)?;
        let io_error = |source| SettingsError::Io {
            path: self.path.clone(),
            source,
        };

        let dir = match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };
        let mut tmp = NamedTempFile::new_in(dir).map_err(io_error)?;
        tmp.write_all(text.as_bytes()).map_err(io_error)?;
        tmp.persist(&self.path).map_err(|e| io_error(e.error))?;
        Ok(())
    }
}

impl SettingsStore for JsonFileStore {
    fn get(&self, key: SettingKey, default: SettingValue) -> SettingValue {
        let Some(raw) = self.values.get(key.as_str()) else {
            return default;
        };
        match serde_json::from_value::<SettingValue>(raw.clone()) {
            Ok(value) if value.same_kind(&default) => value,
            _ => {
                warn!("ignoring malformed setting {}={}", key.as_str(), raw);
                default
            }
        }
    }

    fn set(&mut self, key: SettingKey, value: SettingValue) -> Result<(), SettingsError> {
        self.values
            .insert(key.as_str().to_string(), serde_json::to_value(value)?);
        self.save()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_returns_default_for_missing_or_mismatched() {
        let mut store = MemoryStore::new();
        assert_eq!(
            store.get(SettingKey::Mute, SettingValue::Bool(false)),
            SettingValue::Bool(false)
        );

        store.set(SettingKey::Mute, SettingValue::Int(3)).unwrap();
        assert_eq!(
            store.get(SettingKey::Mute, SettingValue::Bool(true)),
            SettingValue::Bool(true)
        );
    }

    #[test]
    fn memory_store_clones_share_values() {
        let store = MemoryStore::new();
        let mut writer = store.clone();
        writer.set(SettingKey::GameSpeed, SettingValue::Int(7)).unwrap();
        assert_eq!(store.raw(SettingKey::GameSpeed), Some(SettingValue::Int(7)));
    }

    #[test]
    fn json_store_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::open(dir.path().join("absent.json")).unwrap();
        assert_eq!(
            store.get(SettingKey::GridWidth, SettingValue::Int(12)),
            SettingValue::Int(12)
        );
    }

    #[test]
    fn json_store_writes_flat_object() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let mut store = JsonFileStore::open(&path).unwrap();
        store.set(SettingKey::DarkMode, SettingValue::Bool(true)).unwrap();
        store.set(SettingKey::GridHeight, SettingValue::Int(30)).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        let json: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(json["dark_mode"], serde_json::json!(true));
        assert_eq!(json["grid_height"], serde_json::json!(30));

        let reopened = JsonFileStore::open(&path).unwrap();
        assert_eq!(
            reopened.get(SettingKey::GridHeight, SettingValue::Int(24)),
            SettingValue::Int(30)
        );
    }

    #[test]
    fn json_store_replaces_garbage_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "not json").unwrap();

        let mut store = JsonFileStore::open(&path).unwrap();
        assert_eq!(
            store.get(SettingKey::Mute, SettingValue::Bool(false)),
            SettingValue::Bool(false)
        );
        store.set(SettingKey::Mute, SettingValue::Bool(true)).unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(json, serde_json::json!({ "mute": true }));
    }

    #[test]
    fn json_store_leaves_no_temp_files_behind() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let mut store = JsonFileStore::open(&path).unwrap();
        for speed in 1..=3 {
            store.set(SettingKey::GameSpeed, SettingValue::Int(speed)).unwrap();
        }
        let names: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name())
            .collect();
        assert_eq!(names, vec![std::ffi::OsString::from("settings.json")]);
    }
}
