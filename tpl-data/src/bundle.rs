//! Dataset source backed by a directory of JSON resources.

use std::{io, sync::Arc};

use async_trait::async_trait;
use camino::Utf8Path;
use serde::de::DeserializeOwned;
use tpl_core::{Branch, Event, VisitRecord};
use tpl_fs::ResourceBundle;

use crate::{
    DatasetKind, DatasetSource, DecodePolicy, Decoded, LoadError, ResourceNames, decode_collection,
};

/// Reads the named resources from a bundle directory.
///
/// File reads and decoding run on Tokio's blocking pool, so the awaiting
/// task never blocks its executor thread.
///
/// # Examples
/// ```no_run
/// use camino::Utf8Path;
/// use tpl_data::{BundleSource, DatasetSource, DecodePolicy};
///
/// # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
/// let source = BundleSource::open(Utf8Path::new("data"))?
///     .with_policy(DecodePolicy::SkipInvalid);
/// let branches = source.load_branches().await?;
/// println!("{} branches", branches.len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct BundleSource {
    bundle: Arc<ResourceBundle>,
    names: ResourceNames,
    policy: DecodePolicy,
}

impl BundleSource {
    /// Open the bundle directory at `root` with the default resource names.
    ///
    /// # Errors
    ///
    /// Returns the I/O error reported when `root` cannot be opened as a
    /// directory.
    pub fn open(root: &Utf8Path) -> io::Result<Self> {
        ResourceBundle::open(root).map(Self::from_bundle)
    }

    /// Wrap an already opened bundle.
    pub fn from_bundle(bundle: ResourceBundle) -> Self {
        Self {
            bundle: Arc::new(bundle),
            names: ResourceNames::default(),
            policy: DecodePolicy::default(),
        }
    }

    /// Override the resource names.
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

    /// Directory the resources are read from.
    pub fn root(&self) -> &Utf8Path {
        self.bundle.root()
    }

    async fn load<T>(&self, kind: DatasetKind) -> Result<Decoded<T>, LoadError>
    where
        T: DeserializeOwned + Send + 'static,
    {
        let bundle = Arc::clone(&self.bundle);
        let resource = self.names.get(kind).to_owned();
        let policy = self.policy;
        let task_resource = resource.clone();
        tokio::task::spawn_blocking(move || {
            let text = bundle
                .read_to_string(&task_resource)
                .map_err(|source| LoadError::from_io(&task_resource, source))?;
            log::debug!(
                "read {} bytes from {}",
                text.len(),
                bundle.resource_path(&task_resource)
            );
            decode_collection(&task_resource, &text, policy)
        })
        .await
        .map_err(|err| LoadError::WorkerFailed {
            resource,
            message: err.to_string(),
        })?
    }
}

#[async_trait]
impl DatasetSource for BundleSource {
    fn resource_name(&self, kind: DatasetKind) -> &str {
        self.names.get(kind)
    }

    async fn fetch_branches(&self) -> Result<Decoded<Branch>, LoadError> {
        self.load(DatasetKind::Branches).await
    }

    async fn fetch_visits(&self) -> Result<Decoded<VisitRecord>, LoadError> {
        self.load(DatasetKind::Visits).await
    }

    async fn fetch_events(&self) -> Result<Decoded<Event>, LoadError> {
        self.load(DatasetKind::Events).await
    }
}
