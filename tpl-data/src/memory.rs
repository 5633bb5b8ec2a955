//! In-memory dataset source for previews and tests.

use std::collections::HashMap;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tpl_core::{Branch, Event, VisitRecord};

use crate::{
    DatasetKind, DatasetSource, DecodePolicy, Decoded, LoadError, ResourceNames, decode_collection,
};

/// Holds raw JSON documents and decodes them on every load.
///
/// A kind without a document reports [`LoadError::ResourceNotFound`].
///
/// # Examples
/// ```
/// use tpl_data::{DatasetKind, DatasetSource, LoadError, MemorySource};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let source = MemorySource::new().with_document(DatasetKind::Visits, "[]");
/// assert!(source.load_visits().await.is_ok_and(|visits| visits.is_empty()));
/// assert!(matches!(
///     source.load_events().await,
///     Err(LoadError::ResourceNotFound { .. })
/// ));
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    documents: HashMap<DatasetKind, String>,
    names: ResourceNames,
    policy: DecodePolicy,
}

impl MemorySource {
    /// Source with no documents, default names and strict decoding.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the raw document for `kind`, replacing any previous one.
    #[must_use]
    pub fn with_document(mut self, kind: DatasetKind, json: impl Into<String>) -> Self {
        self.documents.insert(kind, json.into());
        self
    }

    /// Override the resource names reported in errors.
    #[must_use]
    pub fn with_names(mut self, names: ResourceNames) -> Self {
        self.names = names;
        self
    }

    /// Choose how malformed records are handled.
    #[must_use]
    pub fn with_policy(mut self, policy: DecodePolicy) -> Self {
        self.policy = policy;
        self
    }

    fn load<T>(&self, kind: DatasetKind) -> Result<Decoded<T>, LoadError>
    where
        T: DeserializeOwned,
    {
        let resource = self.names.get(kind);
        let text = self
            .documents
            .get(&kind)
            .ok_or_else(|| LoadError::ResourceNotFound {
                resource: resource.to_owned(),
            })?;
        decode_collection(resource, text, self.policy)
    }
}

#[async_trait]
impl DatasetSource for MemorySource {
    fn resource_name(&self, kind: DatasetKind) -> &str {
        self.names.get(kind)
    }

    async fn fetch_branches(&self) -> Result<Decoded<Branch>, LoadError> {
        self.load(DatasetKind::Branches)
    }

    async fn fetch_visits(&self) -> Result<Decoded<VisitRecord>, LoadError> {
        self.load(DatasetKind::Visits)
    }

    async fn fetch_events(&self) -> Result<Decoded<Event>, LoadError> {
        self.load(DatasetKind::Events)
    }
}
