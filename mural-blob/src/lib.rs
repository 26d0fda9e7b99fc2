//! mural-blob: asset storage for the mural backend.
//!
//! Binary assets live in one managed root directory. An upload is first
//! *staged* under a collision-free temporary name, then *finalized* by an
//! atomic rename to its id-derived key once the owning record exists. Deletes
//! are idempotent: removing a file that is already gone is not an error.
//!
//! The store is deliberately dumb. It knows nothing about post records;
//! the naming convention (key = record id + extension) belongs to the
//! coordinators that call it.

mod error;
mod key;
mod policy;
pub mod store;

pub use error::{AssetError, AssetResult};
pub use key::{AssetKey, StagingKey};
pub use policy::AssetPolicy;
pub use store::{AssetStore, FsAssetStore};
