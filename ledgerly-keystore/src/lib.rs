//! Client-side key persistence for Ledgerly.
//!
//! Derived key material has to survive a client refresh without ever being
//! sent to the server. This crate provides the persistence surface — two
//! named slots over an abstract [`KeyStore`] — and the [`KeySession`] that
//! owns every slot write across login, logout, and session bootstrap.
//!
//! The crypto primitives never read this state themselves: decryption
//! paths receive key snapshots as plain arguments.

mod error;
mod session;
mod store;

pub use error::{KeyStoreError, KeyStoreResult};
pub use session::KeySession;
pub use store::{ALTERNATE_KEY_SLOT, CURRENT_KEY_SLOT, FileKeyStore, KeyStore, MemoryKeyStore};
