//! Read-only view model over a loaded branch collection.

use crate::{
    Branch, LocationProvider, MapRegion, Nearest, RankedBranch, browse, location, ranking,
};

/// Owns the branch collection for a session and answers front-end queries.
///
/// The location provider is consulted on every call; nothing derived from it
/// is cached.
///
/// # Examples
/// ```
/// use tpl_core::{Catalogue, FixedLocation, NoLocation, test_support::branch_at};
///
/// let catalogue = Catalogue::new(vec![
///     branch_at(1, "AB", "Albion", 43.7400, -79.5847),
///     branch_at(2, "FY", "Fort York", 43.6395, -79.4022),
/// ]);
/// let downtown = FixedLocation::new(43.6453, -79.3806);
///
/// let rows = catalogue.search("", &downtown);
/// assert_eq!(rows[0].branch.branch_code, "FY");
/// assert!(catalogue.nearest(&NoLocation).is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalogue {
    branches: Vec<Branch>,
}

impl Catalogue {
    /// Wrap a decoded branch collection.
    pub fn new(branches: Vec<Branch>) -> Self {
        let misplaced = branches
            .iter()
            .filter(|branch| branch.has_sentinel_location())
            .count();
        if misplaced > 0 {
            log::warn!("{misplaced} branches have no usable coordinates");
        }
        Self { branches }
    }

    /// Every branch in load order.
    pub fn branches(&self) -> &[Branch] {
        &self.branches
    }

    /// Whether the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.branches.is_empty()
    }

    /// List rows matching `query`, closest first when a location is known.
    pub fn search<P>(&self, query: &str, provider: &P) -> Vec<RankedBranch<'_>>
    where
        P: LocationProvider + ?Sized,
    {
        let from = location::reference_coordinate(provider);
        ranking::with_distances(browse(&self.branches, query, from), from)
    }

    /// Closest branch to the provider's position.
    pub fn nearest<P>(&self, provider: &P) -> Option<Nearest<'_>>
    where
        P: LocationProvider + ?Sized,
    {
        let from = location::reference_coordinate(provider)?;
        ranking::nearest(&self.branches, from)
    }

    /// Map framing covering every branch.
    pub fn region(&self) -> MapRegion {
        ranking::bounding_region(&self.branches)
    }

    /// Branch with the given code, if loaded.
    pub fn find_by_code(&self, code: &str) -> Option<&Branch> {
        self.branches
            .iter()
            .find(|branch| branch.branch_code == code)
    }
}
