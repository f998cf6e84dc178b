//! Vault module — encrypted per-domain password storage.
//!
//! This module provides:
//! - The `Entry` record type (`entry`)
//! - The JSON dump format and checksum (`format`)
//! - The unlocked `Vault` facade (`store`)
//! - An explicit lock/unlock `Session` (`session`)
//! - Atomic dump persistence for collaborators (`file`)

pub mod entry;
pub mod file;
pub mod format;
pub mod session;
pub mod store;

pub use entry::{EncryptedData, Entry};
pub use file::{read_dump, write_dump, StoredDump};
pub use format::{Dump, VaultContents};
pub use session::Session;
pub use store::Vault;
