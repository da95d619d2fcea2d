//! Storage backends
//!
//! Native saves are JSON files in the platform data directory, written
//! atomically with a rotating backup. On wasm32 the backend is browser
//! LocalStorage under the same keys.

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

use super::envelope::{self, Envelope};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to serialize save data: {0}")]
    Serialize(#[from] serde_json::Error),
    #[cfg(not(target_arch = "wasm32"))]
    #[error("failed to write save data: {0}")]
    Io(#[from] std::io::Error),
    #[cfg(target_arch = "wasm32")]
    #[error("browser storage unavailable")]
    StorageUnavailable,
}

/// Handle to the save-data location
#[derive(Debug, Clone)]
pub struct Store {
    #[cfg(not(target_arch = "wasm32"))]
    dir: std::path::PathBuf,
    #[cfg(target_arch = "wasm32")]
    prefix: String,
}

impl Store {
    /// Load a persisted value, or fall back to a caller-supplied default.
    pub fn load_or<T, F>(&self, key: &str, fallback: F) -> T
    where
        T: DeserializeOwned,
        F: FnOnce() -> T,
    {
        self.load(key).unwrap_or_else(|| {
            log::info!("no usable {key} save, starting fresh");
            fallback()
        })
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl Store {
    /// Store rooted at an explicit directory (tests, portable installs)
    pub fn at(dir: impl Into<std::path::PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Store in the platform data directory
    pub fn open_default() -> Self {
        let dir = dirs::data_dir()
            .unwrap_or_else(|| std::path::PathBuf::from("."))
            .join(crate::consts::SAVE_DIR_NAME);
        Self { dir }
    }

    fn path_for(&self, key: &str) -> std::path::PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    /// Write atomically: tmp file first, previous save rotated to `.bak`.
    pub fn save<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        let json = Envelope::wrap(value).to_json()?;
        std::fs::create_dir_all(&self.dir)?;
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, json)?;
        if path.exists() {
            std::fs::rename(&path, path.with_extension("json.bak"))?;
        }
        std::fs::rename(&tmp, &path)?;
        log::debug!("saved {key} to {}", path.display());
        Ok(())
    }

    /// Read the current save, falling back to the backup on corruption.
    pub fn load<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let path = self.path_for(key);
        match read_envelope(&path) {
            Ok(value) => return Some(value),
            Err(ReadError::Missing) => {}
            Err(err) => log::warn!("corrupt save {}: {err}", path.display()),
        }
        let backup = path.with_extension("json.bak");
        match read_envelope(&backup) {
            Ok(value) => {
                log::warn!("recovered {key} from backup {}", backup.display());
                Some(value)
            }
            Err(_) => None,
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Error)]
enum ReadError {
    #[error("file missing")]
    Missing,
    #[error("{0}")]
    Io(std::io::Error),
    #[error("{0}")]
    Envelope(#[from] envelope::EnvelopeError),
}

#[cfg(not(target_arch = "wasm32"))]
fn read_envelope<T: DeserializeOwned>(path: &std::path::Path) -> Result<T, ReadError> {
    let json = std::fs::read_to_string(path).map_err(|err| {
        if err.kind() == std::io::ErrorKind::NotFound {
            ReadError::Missing
        } else {
            ReadError::Io(err)
        }
    })?;
    Ok(envelope::open(&json)?)
}

#[cfg(target_arch = "wasm32")]
impl Store {
    /// Store keyed into browser LocalStorage
    pub fn open_default() -> Self {
        Self {
            prefix: "box_rush".to_string(),
        }
    }

    fn key_for(&self, key: &str) -> String {
        format!("{}_{key}", self.prefix)
    }

    fn local_storage() -> Option<web_sys::Storage> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
    }

    pub fn save<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        let json = Envelope::wrap(value).to_json()?;
        let storage = Self::local_storage().ok_or(StoreError::StorageUnavailable)?;
        storage
            .set_item(&self.key_for(key), &json)
            .map_err(|_| StoreError::StorageUnavailable)?;
        log::debug!("saved {key} to LocalStorage");
        Ok(())
    }

    pub fn load<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let storage = Self::local_storage()?;
        let json = storage.get_item(&self.key_for(key)).ok().flatten()?;
        match envelope::open(&json) {
            Ok(value) => Some(value),
            Err(err) => {
                log::warn!("corrupt save {key}: {err}");
                None
            }
        }
    }
}
