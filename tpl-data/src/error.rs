//! Error type shared by every dataset source.

use std::io;

use thiserror::Error;

/// Failure to produce one collection.
///
/// Each collection fails independently; a loader reports one of these per
/// dataset rather than aborting the others.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LoadError {
    /// The named resource is not present in the source.
    #[error("resource {resource:?} not found")]
    ResourceNotFound {
        /// Resource name as configured.
        resource: String,
    },
    /// The document is not a JSON array of well-formed records.
    #[error("failed to decode resource {resource:?}: {source}")]
    DecodingFailed {
        /// Resource name as configured.
        resource: String,
        /// Parser diagnostic.
        #[source]
        source: serde_json::Error,
    },
    /// The resource exists but could not be read.
    #[error("failed to read resource {resource:?}: {source}")]
    ReadFailed {
        /// Resource name as configured.
        resource: String,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// The background task running the load panicked or was cancelled.
    #[error("loading {resource:?} did not complete: {message}")]
    WorkerFailed {
        /// Resource name as configured.
        resource: String,
        /// Description of the task failure.
        message: String,
    },
}

impl LoadError {
    /// Name of the resource the failure relates to.
    pub fn resource(&self) -> &str {
        match self {
            Self::ResourceNotFound { resource }
            | Self::DecodingFailed { resource, .. }
            | Self::ReadFailed { resource, .. }
            | Self::WorkerFailed { resource, .. } => resource,
        }
    }

    pub(crate) fn from_io(resource: &str, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::NotFound {
            Self::ResourceNotFound {
                resource: resource.to_owned(),
            }
        } else {
            Self::ReadFailed {
                resource: resource.to_owned(),
                source,
            }
        }
    }
}
