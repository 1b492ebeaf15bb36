//! Session-scoped key lifecycle.
//!
//! [`KeySession`] is the only writer of the key slots. Login derives the
//! canonical key from the passphrase, logout clears the slots, and the
//! decryption paths take read-only candidate snapshots per call.

use crate::error::KeyStoreResult;
use crate::store::{ALTERNATE_KEY_SLOT, CURRENT_KEY_SLOT, KeyStore};
use ledgerly_crypto::{DerivedKey, KdfParams, derive_key};
use std::sync::Arc;
use tracing::{debug, warn};

/// Owns the current/alternate key slots for one authenticated session.
pub struct KeySession {
    store: Arc<dyn KeyStore>,
    params: KdfParams,
}

impl KeySession {
    /// Creates a session over a store with the default derivation params.
    pub fn new(store: Arc<dyn KeyStore>) -> Self {
        Self::with_params(store, KdfParams::default())
    }

    /// Creates a session with custom derivation params.
    pub fn with_params(store: Arc<dyn KeyStore>, params: KdfParams) -> Self {
        Self { store, params }
    }

    /// Derives and persists the encryption key at login/signup.
    ///
    /// The account email — trimmed and lowercased — is the derivation salt,
    /// so the same credentials re-derive the identical key on any device.
    /// A previously persisted key that differs from the new one is demoted
    /// to the alternate slot: records written under it stay readable
    /// without re-encryption.
    pub fn login(&self, passphrase: &str, email: &str) -> KeyStoreResult<DerivedKey> {
        let salt = email.trim().to_lowercase();
        let key = derive_key(passphrase, &salt, &self.params);
        let encoded = key.to_hex();

        if let Some(previous) = self.store.get(CURRENT_KEY_SLOT)? {
            if previous != encoded {
                debug!("demoting previous key to the alternate slot");
                self.store.put(ALTERNATE_KEY_SLOT, &previous)?;
            }
        }
        self.store.put(CURRENT_KEY_SLOT, &encoded)?;
        Ok(key)
    }

    /// Clears both key slots at logout.
    pub fn logout(&self) -> KeyStoreResult<()> {
        self.store.remove(CURRENT_KEY_SLOT)?;
        self.store.remove(ALTERNATE_KEY_SLOT)?;
        debug!("key slots cleared");
        Ok(())
    }

    /// The current encryption key, if a session is active.
    pub fn current_key(&self) -> KeyStoreResult<Option<DerivedKey>> {
        self.read_slot(CURRENT_KEY_SLOT)
    }

    /// Read-only snapshot of the decryption candidates, current key first.
    ///
    /// Duplicate slots collapse to one entry. Slot contents that do not
    /// parse as key material are skipped rather than failing the session;
    /// rows they protected will surface as corrupted markers downstream.
    pub fn candidate_keys(&self) -> KeyStoreResult<Vec<DerivedKey>> {
        let mut keys: Vec<DerivedKey> = Vec::with_capacity(2);
        for slot in [CURRENT_KEY_SLOT, ALTERNATE_KEY_SLOT] {
            if let Some(key) = self.read_slot(slot)?
                && !keys.iter().any(|k| k.as_bytes() == key.as_bytes())
            {
                keys.push(key);
            }
        }
        Ok(keys)
    }

    fn read_slot(&self, slot: &str) -> KeyStoreResult<Option<DerivedKey>> {
        let Some(encoded) = self.store.get(slot)? else {
            return Ok(None);
        };
        match DerivedKey::from_hex(&encoded) {
            Ok(key) => Ok(Some(key)),
            Err(e) => {
                warn!(slot, "ignoring unparseable key material: {e}");
                Ok(None)
            }
        }
    }
}
