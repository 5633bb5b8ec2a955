//! The seam between the loader and where documents come from.

use async_trait::async_trait;
use tpl_core::{Branch, Event, VisitRecord};

use crate::{DatasetKind, Decoded, LoadError};

/// Produces decoded collections on demand.
///
/// Every call performs a fresh load; implementations keep no cache. The
/// returned futures are `Send` so loads can run on any runtime worker.
///
/// Implementors provide the `fetch_*` methods, which also report records
/// dropped by the decode policy. The `load_*` methods return only the
/// records.
#[async_trait]
pub trait DatasetSource: Send + Sync {
    /// Resource name used for `kind` in diagnostics.
    fn resource_name(&self, kind: DatasetKind) -> &str;

    /// Load the branch collection and any records dropped while decoding it.
    async fn fetch_branches(&self) -> Result<Decoded<Branch>, LoadError>;

    /// Load the annual visit records and any records dropped while decoding.
    async fn fetch_visits(&self) -> Result<Decoded<VisitRecord>, LoadError>;

    /// Load the events feed and any records dropped while decoding it.
    async fn fetch_events(&self) -> Result<Decoded<Event>, LoadError>;

    /// Load the branch collection.
    async fn load_branches(&self) -> Result<Vec<Branch>, LoadError> {
        self.fetch_branches().await.map(|decoded| decoded.records)
    }

    /// Load the annual visit records.
    async fn load_visits(&self) -> Result<Vec<VisitRecord>, LoadError> {
        self.fetch_visits().await.map(|decoded| decoded.records)
    }

    /// Load the events feed.
    async fn load_events(&self) -> Result<Vec<Event>, LoadError> {
        self.fetch_events().await.map(|decoded| decoded.records)
    }
}
