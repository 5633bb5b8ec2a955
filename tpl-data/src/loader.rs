//! Concurrent loading of the three collections.

use std::{
    fmt,
    future::Future,
    pin::Pin,
    sync::Arc,
    task::{Context, Poll},
};

use tokio::task::JoinHandle;
use tpl_core::{Branch, Event, VisitRecord};

use crate::{DatasetKind, DatasetSource, Decoded, LoadError, SkippedRecord};

/// Loads collections from an injected [`DatasetSource`].
///
/// Each load runs as its own Tokio task, so collections arrive
/// independently and in any order. Nothing is cached between calls.
///
/// # Examples
/// ```
/// use std::sync::Arc;
/// use tpl_data::{DatasetKind, DatasetLoader, MemorySource};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let source = MemorySource::new()
///     .with_document(DatasetKind::Branches, "[]")
///     .with_document(DatasetKind::Visits, "[]");
/// let loader = DatasetLoader::new(Arc::new(source));
///
/// let datasets = loader.load_all().await;
/// assert!(datasets.branches.is_ok());
/// assert!(datasets.events.is_err());
/// assert!(datasets.skipped.is_empty());
/// # }
/// ```
#[derive(Clone)]
pub struct DatasetLoader {
    source: Arc<dyn DatasetSource>,
}

impl fmt::Debug for DatasetLoader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatasetLoader")
            .field("branches", &self.source.resource_name(DatasetKind::Branches))
            .field("visits", &self.source.resource_name(DatasetKind::Visits))
            .field("events", &self.source.resource_name(DatasetKind::Events))
            .finish()
    }
}

/// Outcome of loading every collection; each succeeds or fails on its own.
#[derive(Debug)]
pub struct Datasets {
    /// Branch collection.
    pub branches: Result<Vec<Branch>, LoadError>,
    /// Annual visit records.
    pub visits: Result<Vec<VisitRecord>, LoadError>,
    /// Events feed.
    pub events: Result<Vec<Event>, LoadError>,
    /// Records dropped from the collections that loaded, in load order.
    pub skipped: Vec<SkippedRecord>,
}

/// Outcome of loading the collections joined by the detail view.
#[derive(Debug)]
pub struct DetailDatasets {
    /// Annual visit records.
    pub visits: Result<Vec<VisitRecord>, LoadError>,
    /// Events feed.
    pub events: Result<Vec<Event>, LoadError>,
    /// Records dropped from the collections that loaded, in load order.
    pub skipped: Vec<SkippedRecord>,
}

impl DatasetLoader {
    /// Build a loader over `source`.
    pub fn new(source: Arc<dyn DatasetSource>) -> Self {
        Self { source }
    }

    /// Start loading branches. Must be called within a Tokio runtime.
    pub fn spawn_branches(&self) -> PendingLoad<Branch> {
        let source = Arc::clone(&self.source);
        PendingLoad::spawn(self.describe(DatasetKind::Branches), async move {
            source.fetch_branches().await
        })
    }

    /// Start loading visit records. Must be called within a Tokio runtime.
    pub fn spawn_visits(&self) -> PendingLoad<VisitRecord> {
        let source = Arc::clone(&self.source);
        PendingLoad::spawn(self.describe(DatasetKind::Visits), async move {
            source.fetch_visits().await
        })
    }

    /// Start loading events. Must be called within a Tokio runtime.
    pub fn spawn_events(&self) -> PendingLoad<Event> {
        let source = Arc::clone(&self.source);
        PendingLoad::spawn(self.describe(DatasetKind::Events), async move {
            source.fetch_events().await
        })
    }

    /// Load all three collections concurrently.
    pub async fn load_all(&self) -> Datasets {
        let (branches, visits, events) = tokio::join!(
            self.spawn_branches(),
            self.spawn_visits(),
            self.spawn_events()
        );
        let mut skipped = Vec::new();
        Datasets {
            branches: collect_skipped(branches, &mut skipped),
            visits: collect_skipped(visits, &mut skipped),
            events: collect_skipped(events, &mut skipped),
            skipped,
        }
    }

    /// Load the visit and event collections concurrently.
    pub async fn load_detail(&self) -> DetailDatasets {
        let (visits, events) = tokio::join!(self.spawn_visits(), self.spawn_events());
        let mut skipped = Vec::new();
        DetailDatasets {
            visits: collect_skipped(visits, &mut skipped),
            events: collect_skipped(events, &mut skipped),
            skipped,
        }
    }

    fn describe(&self, kind: DatasetKind) -> Target {
        Target {
            kind,
            resource: self.source.resource_name(kind).to_owned(),
        }
    }
}

fn collect_skipped<T>(
    outcome: Result<Decoded<T>, LoadError>,
    skipped: &mut Vec<SkippedRecord>,
) -> Result<Vec<T>, LoadError> {
    outcome.map(|decoded| {
        skipped.extend(decoded.skipped);
        decoded.records
    })
}

#[derive(Debug, Clone)]
struct Target {
    kind: DatasetKind,
    resource: String,
}

/// A load running in the background.
///
/// Resolves to the decoded collection, with any records the decode policy
/// dropped, or the reason it failed. Dropping the
/// handle detaches the task; it still runs to completion.
#[derive(Debug)]
pub struct PendingLoad<T> {
    handle: JoinHandle<Result<Decoded<T>, LoadError>>,
    resource: String,
}

impl<T> PendingLoad<T>
where
    T: Send + 'static,
{
    fn spawn<F>(target: Target, load: F) -> Self
    where
        F: Future<Output = Result<Decoded<T>, LoadError>> + Send + 'static,
    {
        let Target { kind, resource } = target;
        let task_resource = resource.clone();
        let handle = tokio::spawn(async move {
            log::debug!("loading {kind} from {task_resource:?}");
            let outcome = load.await;
            match &outcome {
                Ok(decoded) => log::debug!(
                    "loaded {} {kind}, skipped {}",
                    decoded.records.len(),
                    decoded.skipped.len()
                ),
                Err(err) => log::warn!("failed to load {kind}: {err}"),
            }
            outcome
        });
        Self { handle, resource }
    }
}

impl<T> Future for PendingLoad<T> {
    type Output = Result<Decoded<T>, LoadError>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.get_mut();
        match Pin::new(&mut this.handle).poll(cx) {
            Poll::Pending => Poll::Pending,
            Poll::Ready(Ok(outcome)) => Poll::Ready(outcome),
            Poll::Ready(Err(err)) => Poll::Ready(Err(LoadError::WorkerFailed {
                resource: this.resource.clone(),
                message: err.to_string(),
            })),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemorySource;
    use async_trait::async_trait;
    use rstest::{fixture, rstest};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::runtime::Builder;

    fn block_on<F>(future: F) -> F::Output
    where
        F: Future,
    {
        Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()
            .unwrap_or_else(|err| panic!("failed to build Tokio runtime: {err}"))
            .block_on(future)
    }

    const VISITS: &str = r#"[
        {"_id": 1, "Year": 2023, "BranchCode": "AB", "Visits": "52000"},
        {"_id": 2, "Year": 2022, "BranchCode": "XY", "Visits": 100}
    ]"#;

    #[fixture]
    fn memory() -> MemorySource {
        MemorySource::new()
            .with_document(DatasetKind::Visits, VISITS)
            .with_document(DatasetKind::Events, "[]")
    }

    #[rstest]
    fn collections_fail_independently(memory: MemorySource) {
        let loader = DatasetLoader::new(Arc::new(memory));
        let datasets = block_on(loader.load_all());
        match datasets.branches {
            Err(LoadError::ResourceNotFound { resource }) => {
                assert_eq!(resource, "Toronto Library Branch Info 2024.json");
            }
            other => panic!("expected missing branches, got {other:?}"),
        }
        assert_eq!(datasets.visits.map(|v| v.len()).ok(), Some(2));
        assert_eq!(datasets.events.map(|e| e.len()).ok(), Some(0));
    }

    #[rstest]
    fn detail_loads_visits_and_events(memory: MemorySource) {
        let loader = DatasetLoader::new(Arc::new(memory));
        let detail = block_on(loader.load_detail());
        assert!(detail.visits.is_ok());
        assert!(detail.events.is_ok());
        assert!(detail.skipped.is_empty());
    }

    #[rstest]
    fn skipped_records_are_collected_across_collections() {
        let visits = r#"[
            {"_id": 1, "Year": 2023, "BranchCode": "AB", "Visits": "52000"},
            {"_id": 2, "Year": "soon", "BranchCode": "AB", "Visits": "1"}
        ]"#;
        let events = r#"[
            {"_id": 3, "startdate": "2025-09-06", "enddate": "2025-09-06",
             "library": "Albion", "description": ""}
        ]"#;
        let source = MemorySource::new()
            .with_document(DatasetKind::Visits, visits)
            .with_document(DatasetKind::Events, events)
            .with_policy(crate::DecodePolicy::SkipInvalid);
        let loader = DatasetLoader::new(Arc::new(source));

        let datasets = block_on(loader.load_all());
        assert!(datasets.branches.is_err());
        assert_eq!(datasets.visits.map(|v| v.len()).ok(), Some(1));
        assert_eq!(datasets.events.map(|e| e.len()).ok(), Some(0));
        let reported: Vec<_> = datasets
            .skipped
            .iter()
            .map(|s| (s.resource.as_str(), s.index))
            .collect();
        assert_eq!(
            reported,
            vec![
                ("Library Visits Annual by Branch.json", 1),
                ("Toronto Library Events Feed.json", 0),
            ]
        );
    }

    struct Counting {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl DatasetSource for Counting {
        fn resource_name(&self, kind: DatasetKind) -> &str {
            kind.label()
        }

        async fn fetch_branches(&self) -> Result<Decoded<Branch>, LoadError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(Decoded::complete(Vec::new()))
        }

        async fn fetch_visits(&self) -> Result<Decoded<VisitRecord>, LoadError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(Decoded::complete(Vec::new()))
        }

        async fn fetch_events(&self) -> Result<Decoded<Event>, LoadError> {
            panic!("events feed exploded");
        }
    }

    #[rstest]
    fn repeated_loads_hit_the_source_each_time() {
        let source = Arc::new(Counting {
            calls: AtomicUsize::new(0),
        });
        let loader = DatasetLoader::new(Arc::clone(&source) as Arc<dyn DatasetSource>);
        block_on(async {
            let _ = loader.spawn_branches().await;
            let _ = loader.spawn_branches().await;
            let _ = loader.spawn_visits().await;
        });
        assert_eq!(source.calls.load(Ordering::SeqCst), 3);
    }

    #[rstest]
    fn panicking_source_reports_worker_failure() {
        let loader = DatasetLoader::new(Arc::new(Counting {
            calls: AtomicUsize::new(0),
        }));
        match block_on(async { loader.spawn_events().await }) {
            Err(LoadError::WorkerFailed { resource, message }) => {
                assert_eq!(resource, "events");
                assert!(message.contains("panic"), "unexpected message {message}");
            }
            other => panic!("expected worker failure, got {other:?}"),
        }
    }
}
