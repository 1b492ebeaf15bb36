//! Core type definitions for the Ledgerly client.
//!
//! This crate defines the types shared across the encryption core:
//! - Opaque record identifiers issued by the storage collaborator
//! - The ciphertext fetch and write contracts
//! - The decrypted-record sum type produced by multi-key resolution
//!
//! Plaintext record schemas (transactions, budgets, etc.) belong to the
//! application layer; the core treats record content as opaque JSON.

mod ids;
mod record;
mod row;

pub use ids::RecordId;
pub use record::DecryptedRecord;
pub use row::{EncryptedRow, RecordWrite};
