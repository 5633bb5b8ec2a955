//! Names of the three bundled resources.

use std::fmt;

/// One of the independently loaded collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DatasetKind {
    /// Branch information.
    Branches,
    /// Annual visit statistics.
    Visits,
    /// Events feed.
    Events,
}

impl DatasetKind {
    /// Lower-case label used in logs.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Branches => "branches",
            Self::Visits => "visits",
            Self::Events => "events",
        }
    }
}

impl fmt::Display for DatasetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Resource name per dataset kind.
///
/// # Examples
/// ```
/// use tpl_data::{DatasetKind, ResourceNames};
///
/// let names = ResourceNames::default();
/// assert_eq!(
///     names.get(DatasetKind::Events),
///     "Toronto Library Events Feed.json"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceNames {
    /// Branch information document.
    pub branches: String,
    /// Annual visits document.
    pub visits: String,
    /// Events feed document.
    pub events: String,
}

impl ResourceNames {
    /// Published name of the branch information document.
    pub const DEFAULT_BRANCHES: &'static str = "Toronto Library Branch Info 2024.json";
    /// Published name of the annual visits document.
    pub const DEFAULT_VISITS: &'static str = "Library Visits Annual by Branch.json";
    /// Published name of the events feed document.
    pub const DEFAULT_EVENTS: &'static str = "Toronto Library Events Feed.json";

    /// Resource name configured for `kind`.
    pub fn get(&self, kind: DatasetKind) -> &str {
        match kind {
            DatasetKind::Branches => &self.branches,
            DatasetKind::Visits => &self.visits,
            DatasetKind::Events => &self.events,
        }
    }
}

impl Default for ResourceNames {
    fn default() -> Self {
        Self {
            branches: Self::DEFAULT_BRANCHES.to_owned(),
            visits: Self::DEFAULT_VISITS.to_owned(),
            events: Self::DEFAULT_EVENTS.to_owned(),
        }
    }
}
