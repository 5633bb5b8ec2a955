//! Distance ranking and map framing for branches.
//!
//! Distances are great-circle lengths on a spherical Earth computed with
//! [`geo::Haversine`]. Every operation is stateless: callers pass the
//! reference coordinate they want to rank against on each call.

use geo::{Coord, Distance, Haversine, Point, Rect};

use crate::Branch;

/// Centre used to frame an empty map (downtown Toronto).
pub const DEFAULT_CENTER: Coord<f64> = Coord { x: -79.4, y: 43.7 };

/// Span in degrees used to frame an empty map.
pub const DEFAULT_SPAN_DEGREES: f64 = 0.1;

/// Span in degrees used when zooming to the user's position.
pub const USER_SPAN_DEGREES: f64 = 0.02;

/// Factor applied to the bounding box so markers do not touch the edges.
pub const MARGIN_FACTOR: f64 = 1.2;

/// Extent of a map region in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Span {
    /// North-south extent.
    pub lat_delta: f64,
    /// East-west extent.
    pub lon_delta: f64,
}

/// Centre and extent for framing a map view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapRegion {
    /// Region centre, `x = longitude` and `y = latitude`.
    pub center: Coord<f64>,
    /// Region extent.
    pub span: Span,
}

impl MapRegion {
    /// Region shown when there are no branches to frame.
    pub const FALLBACK: Self = Self {
        center: DEFAULT_CENTER,
        span: Span {
            lat_delta: DEFAULT_SPAN_DEGREES,
            lon_delta: DEFAULT_SPAN_DEGREES,
        },
    };

    /// Close-up region centred on `center`.
    pub const fn around(center: Coord<f64>) -> Self {
        Self {
            center,
            span: Span {
                lat_delta: USER_SPAN_DEGREES,
                lon_delta: USER_SPAN_DEGREES,
            },
        }
    }
}

/// The closest branch to a reference coordinate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Nearest<'a> {
    /// Selected branch.
    pub branch: &'a Branch,
    /// Great-circle distance in metres.
    pub distance_meters: f64,
}

/// A branch paired with its distance from the reference coordinate, if any.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankedBranch<'a> {
    /// Listed branch.
    pub branch: &'a Branch,
    /// Great-circle distance in metres, absent without a location fix.
    pub distance_meters: Option<f64>,
}

impl RankedBranch<'_> {
    /// Distance formatted for display, e.g. `"3.42 km"`.
    pub fn distance_label(&self) -> Option<String> {
        self.distance_meters.map(format_distance)
    }
}

/// Great-circle distance between two coordinates in metres.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use tpl_core::distance_meters;
///
/// let reference_library = Coord { x: -79.3867, y: 43.6719 };
/// let fort_york = Coord { x: -79.4022, y: 43.6395 };
/// let metres = distance_meters(reference_library, fort_york);
/// assert!((metres - 3_800.0).abs() < 150.0);
/// assert_eq!(distance_meters(fort_york, fort_york), 0.0);
/// ```
pub fn distance_meters(a: Coord<f64>, b: Coord<f64>) -> f64 {
    Haversine.distance(Point::from(a), Point::from(b))
}

/// Format a distance in metres as kilometres with two decimals.
///
/// # Examples
/// ```
/// use tpl_core::format_distance;
///
/// assert_eq!(format_distance(3_421.7), "3.42 km");
/// assert_eq!(format_distance(0.0), "0.00 km");
/// ```
pub fn format_distance(meters: f64) -> String {
    format!("{:.2} km", meters / 1000.0)
}

/// Order branches by ascending distance from `from`.
///
/// Without a reference coordinate the input order is returned unchanged.
/// Ties keep their relative input order.
pub fn sort_by_distance<'a, I>(branches: I, from: Option<Coord<f64>>) -> Vec<&'a Branch>
where
    I: IntoIterator<Item = &'a Branch>,
{
    let Some(origin) = from else {
        return branches.into_iter().collect();
    };
    let mut keyed: Vec<(f64, &Branch)> = branches
        .into_iter()
        .map(|branch| (distance_meters(origin, branch.location()), branch))
        .collect();
    keyed.sort_by(|(lhs, _), (rhs, _)| lhs.total_cmp(rhs));
    keyed.into_iter().map(|(_, branch)| branch).collect()
}

/// Pair each branch with its distance from `from`, preserving order.
pub fn with_distances<'a, I>(branches: I, from: Option<Coord<f64>>) -> Vec<RankedBranch<'a>>
where
    I: IntoIterator<Item = &'a Branch>,
{
    branches
        .into_iter()
        .map(|branch| RankedBranch {
            branch,
            distance_meters: from.map(|origin| distance_meters(origin, branch.location())),
        })
        .collect()
}

/// Find the branch closest to `from`.
///
/// Returns `None` only when `branches` is empty. When several branches are
/// equally close the first one encountered wins.
pub fn nearest<'a, I>(branches: I, from: Coord<f64>) -> Option<Nearest<'a>>
where
    I: IntoIterator<Item = &'a Branch>,
{
    branches.into_iter().fold(None, |best, branch| {
        let distance = distance_meters(from, branch.location());
        match best {
            Some(current) if current.distance_meters <= distance => Some(current),
            _ => Some(Nearest {
                branch,
                distance_meters: distance,
            }),
        }
    })
}

/// Frame all branches, padding the bounding box by [`MARGIN_FACTOR`].
///
/// An empty collection yields [`MapRegion::FALLBACK`].
pub fn bounding_region<'a, I>(branches: I) -> MapRegion
where
    I: IntoIterator<Item = &'a Branch>,
{
    let bounds = branches.into_iter().fold(None, |bounds, branch| {
        Some(include_point(bounds, branch.location()))
    });
    bounds.map_or(MapRegion::FALLBACK, |rect| MapRegion {
        center: rect.center(),
        span: Span {
            lat_delta: rect.height() * MARGIN_FACTOR,
            lon_delta: rect.width() * MARGIN_FACTOR,
        },
    })
}

fn include_point(bounds: Option<Rect<f64>>, point: Coord<f64>) -> Rect<f64> {
    match bounds {
        Some(existing) => Rect::new(
            Coord {
                x: existing.min().x.min(point.x),
                y: existing.min().y.min(point.y),
            },
            Coord {
                x: existing.max().x.max(point.x),
                y: existing.max().y.max(point.y),
            },
        ),
        None => Rect::new(point, point),
    }
}
