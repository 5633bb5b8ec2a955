//! Dataset loading for the library branch browser.
//!
//! Responsibilities:
//! - Define the [`DatasetSource`] seam and its bundle-directory and
//!   in-memory implementations.
//! - Decode the published JSON arrays strictly or record by record.
//! - Run the three loads concurrently through [`DatasetLoader`].
//!
//! Boundaries:
//! - Do not encode query or ranking rules (live in `tpl-core`).
//! - Keep blocking file I/O on Tokio's blocking pool.
//!
//! Invariants:
//! - No global mutable state and no caching between loads.
//! - Each collection succeeds or fails independently.

mod bundle;
mod decode;
mod error;
mod loader;
mod memory;
mod resource;
mod source;

pub use bundle::BundleSource;
pub use decode::{DecodePolicy, Decoded, SkippedRecord, decode_collection, decode_tolerant};
pub use error::LoadError;
pub use loader::{DatasetLoader, Datasets, DetailDatasets, PendingLoad};
pub use memory::MemorySource;
pub use resource::{DatasetKind, ResourceNames};
pub use source::DatasetSource;
