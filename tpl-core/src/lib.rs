//! Domain model and query layer for browsing Toronto Public Library branches.
//!
//! Three independently keyed collections are joined at query time: branches,
//! annual visit records (linked by branch code) and events (linked by branch
//! name). Ranking operations order branches by great-circle distance from a
//! reference coordinate supplied by a [`LocationProvider`].
//!
//! Everything here is synchronous and side-effect free apart from logging.
//! Loading the collections is the job of the `tpl-data` crate.

#![cfg_attr(docsrs, feature(doc_cfg))]

mod branch;
mod catalogue;
mod de;
mod event;
mod location;
mod query;
mod ranking;
mod visit;

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-support")))]
pub mod test_support;

pub use branch::{Branch, BranchServices, Service};
pub use catalogue::Catalogue;
pub use de::COORDINATE_SENTINEL;
pub use event::Event;
pub use location::{
    AuthorizationState, FixedLocation, LocationProvider, NoLocation, reference_coordinate,
    request_if_undetermined,
};
pub use query::{BranchDetail, browse, events_for, filter_by_name, visits_for};
pub use ranking::{
    DEFAULT_CENTER, DEFAULT_SPAN_DEGREES, MARGIN_FACTOR, MapRegion, Nearest, RankedBranch, Span,
    USER_SPAN_DEGREES, bounding_region, distance_meters, format_distance, nearest,
    sort_by_distance, with_distances,
};
pub use visit::VisitRecord;
