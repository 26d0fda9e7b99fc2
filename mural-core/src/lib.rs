//! mural-core: record model, error taxonomy and the record-store seam.
//!
//! The record store is the single source of truth for which post ids exist.
//! It knows nothing about binary assets; the only coupling to the asset side
//! is the naming convention (asset filename stem = record id), which lives in
//! the coordinators, not here.

pub mod error;
pub mod memory;
pub mod post;
pub mod store;

pub use error::{Error, Result};
pub use memory::MemoryRecordStore;
pub use post::{NewPost, PostPatch, PostRecord, UpdateOutcome};
pub use store::RecordStore;
