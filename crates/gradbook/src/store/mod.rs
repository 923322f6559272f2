//! Client-side persisted state.
//!
//! State lives in explicit structs owned by the application shell and is
//! written to a [`KeyValueStore`] under a fixed key. Blobs use the
//! `{"state": .., "version": 0}` layout so sessions written by the browser
//! console load unchanged.

pub mod auth;
pub mod ui;

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub use self::auth::{AUTH_STATE_KEY, AuthState, AuthStore};
pub use self::ui::{Theme, UI_STATE_KEY, UiState, UiStore};

/// Key holding the raw bearer token, read on every request.
pub const TOKEN_KEY: &str = "admin_token";

/// Current version of the persisted blob layout.
pub const STATE_VERSION: u32 = 0;

/// String key/value persistence. Shared between the client and the stores,
/// so mutation goes through `&self`.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned<T>(_: T) -> Error {
    Error::Store("memory store lock poisoned".to_string())
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self.entries.read().map_err(poisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.entries.write().map_err(poisoned)?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut entries = self.entries.write().map_err(poisoned)?;
        entries.remove(key);
        Ok(())
    }
}

/// One file per key under a directory. Writes go through a temp file and a rename.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf> {
        let valid = !key.is_empty()
            && key
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-');
        if !valid {
            return Err(Error::Store(format!("invalid store key: {key:?}")));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(s) => Ok(Some(s)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.dir)?;
        let tmp = self.dir.join(format!(".{key}.json.tmp"));
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[derive(Serialize, Deserialize)]
struct Persisted<S> {
    state: S,
    #[serde(default)]
    version: u32,
}

/// Load the blob under `key`; a missing blob yields `S::default()`.
pub fn load_state<S: DeserializeOwned + Default>(store: &dyn KeyValueStore, key: &str) -> Result<S> {
    match store.get(key)? {
        Some(raw) => {
            let persisted: Persisted<S> = serde_json::from_str(&raw)?;
            if persisted.version != STATE_VERSION {
                return Err(Error::Store(format!(
                    "{key}: unsupported state version {}",
                    persisted.version
                )));
            }
            Ok(persisted.state)
        }
        None => Ok(S::default()),
    }
}

pub fn save_state<S: Serialize>(store: &dyn KeyValueStore, key: &str, state: &S) -> Result<()> {
    let persisted = Persisted {
        state,
        version: STATE_VERSION,
    };
    store.set(key, &serde_json::to_string(&persisted)?)
}
