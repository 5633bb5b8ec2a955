//! Text filtering and foreign-key joins over loaded collections.
//!
//! Branches link to visit records through `branch_code` and to events
//! through `branch_name`. All functions borrow their inputs and never fail:
//! empty input produces empty output.

use std::cmp::{Ordering, Reverse};

use geo::Coord;

use crate::{Branch, Event, VisitRecord, ranking::sort_by_distance};

/// Branches whose display name contains `query`, ignoring case.
///
/// The query is matched as given, whitespace included, and an empty query
/// matches every branch. Input order is preserved.
///
/// # Examples
/// ```
/// use tpl_core::{filter_by_name, test_support::branch_at};
///
/// let branches = vec![
///     branch_at(1, "AB", "Albion", 43.74, -79.58),
///     branch_at(2, "ACD", "Albert Campbell", 43.71, -79.27),
/// ];
/// let found = filter_by_name(&branches, "ALB");
/// assert_eq!(found.len(), 2);
/// assert_eq!(filter_by_name(&branches, "campbell")[0].id, 2);
/// ```
pub fn filter_by_name<'a, I>(branches: I, query: &str) -> Vec<&'a Branch>
where
    I: IntoIterator<Item = &'a Branch>,
{
    let needle = query.to_lowercase();
    branches
        .into_iter()
        .filter(|branch| needle.is_empty() || branch.branch_name.to_lowercase().contains(&needle))
        .collect()
}

/// Visit records for `branch`, most recent year first.
pub fn visits_for<'a, I>(branch: &Branch, visits: I) -> Vec<&'a VisitRecord>
where
    I: IntoIterator<Item = &'a VisitRecord>,
{
    let mut matched: Vec<&VisitRecord> = visits
        .into_iter()
        .filter(|record| record.branch_code == branch.branch_code)
        .collect();
    matched.sort_by_key(|record| Reverse(record.year));
    matched
}

/// Events hosted by `branch`, earliest start date first.
///
/// Hosting is matched on the exact, case-sensitive branch name. Events whose
/// start date cannot be parsed sort after every dated event.
pub fn events_for<'a, I>(branch: &Branch, events: I) -> Vec<&'a Event>
where
    I: IntoIterator<Item = &'a Event>,
{
    let mut matched: Vec<(Option<chrono::NaiveDate>, &Event)> = events
        .into_iter()
        .filter(|event| event.library == branch.branch_name)
        .map(|event| (event.parsed_start_date(), event))
        .collect();
    matched.sort_by(|(lhs, _), (rhs, _)| undated_last(*lhs, *rhs));
    matched.into_iter().map(|(_, event)| event).collect()
}

fn undated_last(lhs: Option<chrono::NaiveDate>, rhs: Option<chrono::NaiveDate>) -> Ordering {
    match (lhs, rhs) {
        (Some(left), Some(right)) => left.cmp(&right),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// The list view: filter by name, then order by distance when a reference
/// coordinate is known.
pub fn browse<'a, I>(branches: I, query: &str, from: Option<Coord<f64>>) -> Vec<&'a Branch>
where
    I: IntoIterator<Item = &'a Branch>,
{
    sort_by_distance(filter_by_name(branches, query), from)
}

/// A branch with its joined visit statistics and events.
#[derive(Debug, Clone, PartialEq)]
pub struct BranchDetail<'a> {
    /// Branch being shown.
    pub branch: &'a Branch,
    /// Visit records, most recent year first.
    pub visits: Vec<&'a VisitRecord>,
    /// Hosted events, earliest first.
    pub events: Vec<&'a Event>,
}

impl<'a> BranchDetail<'a> {
    /// Join `branch` against the loaded visit and event collections.
    pub fn assemble(branch: &'a Branch, visits: &'a [VisitRecord], events: &'a [Event]) -> Self {
        Self {
            branch,
            visits: visits_for(branch, visits),
            events: events_for(branch, events),
        }
    }
}
