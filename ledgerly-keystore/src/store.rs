//! Named-slot persistence for derived key material.
//!
//! The session keeps key material in two named slots so a login survives a
//! client refresh. Slot contents are opaque strings to every
//! implementation; interpretation belongs to the session layer.

use crate::error::{KeyStoreError, KeyStoreResult};
use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::Mutex;

/// Slot holding the current encryption key.
pub const CURRENT_KEY_SLOT: &str = "enc-key";

/// Slot holding the alternate (legacy) decryption key.
pub const ALTERNATE_KEY_SLOT: &str = "enc-key-alt";

/// Key-value persistence surface for key material.
///
/// Implementations own durability only; they never interpret slot values.
pub trait KeyStore: Send + Sync {
    /// Reads a slot. `Ok(None)` when the slot is empty.
    fn get(&self, slot: &str) -> KeyStoreResult<Option<String>>;

    /// Writes a slot, replacing any previous value.
    fn put(&self, slot: &str, value: &str) -> KeyStoreResult<()>;

    /// Clears a slot. Clearing an empty slot is not an error.
    fn remove(&self, slot: &str) -> KeyStoreResult<()>;
}

/// In-memory store for tests and session-scoped (non-persistent) use.
#[derive(Default)]
pub struct MemoryKeyStore {
    slots: Mutex<HashMap<String, String>>,
}

impl MemoryKeyStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> KeyStoreResult<std::sync::MutexGuard<'_, HashMap<String, String>>> {
        self.slots
            .lock()
            .map_err(|_| KeyStoreError::Storage("poisoned key store lock".to_string()))
    }
}

impl KeyStore for MemoryKeyStore {
    fn get(&self, slot: &str) -> KeyStoreResult<Option<String>> {
        Ok(self.lock()?.get(slot).cloned())
    }

    fn put(&self, slot: &str, value: &str) -> KeyStoreResult<()> {
        self.lock()?.insert(slot.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, slot: &str) -> KeyStoreResult<()> {
        self.lock()?.remove(slot);
        Ok(())
    }
}

/// JSON-file-backed store so a login survives a client restart.
///
/// The file holds a flat `{slot: value}` object and is rewritten whole on
/// every mutation; the slot values stay opaque strings.
pub struct FileKeyStore {
    path: PathBuf,
}

impl FileKeyStore {
    /// Creates a store over `path`. The file is created on first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read_slots(&self) -> KeyStoreResult<HashMap<String, String>> {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) => serde_json::from_str(&contents)
                .map_err(|e| KeyStoreError::Storage(format!("corrupt key store file: {e}"))),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(HashMap::new()),
            Err(e) => Err(KeyStoreError::Storage(e.to_string())),
        }
    }

    fn write_slots(&self, slots: &HashMap<String, String>) -> KeyStoreResult<()> {
        let contents =
            serde_json::to_string(slots).map_err(|e| KeyStoreError::Storage(e.to_string()))?;
        std::fs::write(&self.path, contents).map_err(|e| KeyStoreError::Storage(e.to_string()))
    }
}

impl KeyStore for FileKeyStore {
    fn get(&self, slot: &str) -> KeyStoreResult<Option<String>> {
        Ok(self.read_slots()?.get(slot).cloned())
    }

    fn put(&self, slot: &str, value: &str) -> KeyStoreResult<()> {
        let mut slots = self.read_slots()?;
        slots.insert(slot.to_string(), value.to_string());
        self.write_slots(&slots)
    }

    fn remove(&self, slot: &str) -> KeyStoreResult<()> {
        let mut slots = self.read_slots()?;
        if slots.remove(slot).is_some() {
            self.write_slots(&slots)?;
        }
        Ok(())
    }
}
