//! Show persistence and JSON interchange for the Skyshow planner.
//!
//! The timeline core owns live show state; this crate moves that state in
//! and out of storage. Two surfaces:
//!
//! - JSON interchange ([`json`]): the download/upload format -- a pretty
//!   JSON array of flat firework records.
//! - The show repository ([`memory`]): saved [`ShowRecord`] documents
//!   keyed by show ID and filed under an owner ID.
//!
//! Both import paths treat stored data as untrusted and rebuild timelines
//! through the core's validating record path.
//!
//! # Modules
//!
//! - [`json`] -- Export/import of the JSON interchange format
//! - [`memory`] -- The in-memory show repository
//! - [`error`] -- Shared error types
//!
//! [`ShowRecord`]: skyshow_types::ShowRecord

pub mod error;
pub mod json;
pub mod memory;

// Re-export primary types for convenience.
pub use error::StoreError;
pub use json::{export_show, import_show};
pub use memory::MemoryShowStore;
