//! Record decryption pipeline for the Ledgerly client.
//!
//! Fetched rows are opaque envelopes; this crate turns them back into
//! application state:
//! - Multi-key resolution per row (current key first, then the alternate)
//! - Batch decryption, offloaded to the blocking pool when the runtime
//!   allows, with a transparent inline fallback
//! - Write-payload preparation for the opposite direction
//!
//! Per-row failures degrade to corrupted markers so one unreadable record
//! never blocks a page.

mod batch;
mod resolve;
mod write;

pub use batch::{
    BatchDecryptor, DecryptorConfig, InlineDecryptor, OffloadedDecryptor, select_decryptor,
};
pub use resolve::{dedupe_by_id, resolve_row};
pub use write::prepare_write;
