//! Facade crate for the TPL branch browser data layer.
//!
//! This crate re-exports the domain model, the query and ranking operations
//! and, behind the `loader` feature, the asynchronous dataset loader.

#![forbid(unsafe_code)]

pub use tpl_core::{
    AuthorizationState, Branch, BranchDetail, Catalogue, Event, FixedLocation, LocationProvider,
    MapRegion, Nearest, NoLocation, RankedBranch, Service, Span, VisitRecord, browse,
    bounding_region, distance_meters, events_for, filter_by_name, format_distance, nearest,
    reference_coordinate, request_if_undetermined, sort_by_distance, visits_for, with_distances,
};

#[cfg(feature = "loader")]
pub use tpl_data::{
    BundleSource, DatasetKind, DatasetLoader, DatasetSource, Datasets, DecodePolicy, Decoded,
    DetailDatasets, LoadError, MemorySource, PendingLoad, ResourceNames, SkippedRecord,
    decode_collection, decode_tolerant,
};
