//! Planar distance measurement between decoded geometries.
//!
//! Every routine shares one [`DistPts`] accumulator that tracks the best
//! distance seen so far together with the pair of points realising it.

pub mod containment;
pub(crate) mod dispatch;
mod fast;
pub mod primitives;

use geo::Coord;

use crate::error::{GeomError, Result};
use crate::geometry::{Geometry, PointArray};

/// Whether a search keeps the smallest or the largest candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DistanceMode {
    Min,
    Max,
}

/// Running result of a distance search.
#[derive(Debug, Clone)]
pub struct DistPts {
    distance: f64,
    p1: Coord<f64>,
    p2: Coord<f64>,
    mode: DistanceMode,
    twisted: bool,
    tolerance: f64,
    found: bool,
}

impl DistPts {
    pub fn new(mode: DistanceMode) -> Self {
        let origin = Coord { x: 0.0, y: 0.0 };
        Self {
            distance: match mode {
                DistanceMode::Min => f64::INFINITY,
                DistanceMode::Max => 0.0,
            },
            p1: origin,
            p2: origin,
            mode,
            twisted: false,
            tolerance: 0.0,
            found: false,
        }
    }

    /// Stop a minimum search as soon as a distance at or under `tolerance` is found.
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn mode(&self) -> DistanceMode {
        self.mode
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// The best distance, or `None` if no candidate was ever offered.
    pub fn distance(&self) -> Option<f64> {
        self.found.then_some(self.distance)
    }

    /// Witness points on the first and second operand respectively.
    pub fn witnesses(&self) -> Option<(Coord<f64>, Coord<f64>)> {
        self.found.then_some((self.p1, self.p2))
    }

    pub(crate) fn raw_distance(&self) -> f64 {
        self.distance
    }

    pub(crate) fn raw_p1(&self) -> Coord<f64> {
        self.p1
    }

    pub(crate) fn raw_p2(&self) -> Coord<f64> {
        self.p2
    }

    /// Offer a candidate; `a` lies on the operand currently treated as first.
    pub(crate) fn update(&mut self, distance: f64, a: Coord<f64>, b: Coord<f64>) {
        let better = match self.mode {
            DistanceMode::Min => distance < self.distance,
            DistanceMode::Max => !self.found || distance > self.distance,
        };
        if !better {
            return;
        }
        self.distance = distance;
        self.found = true;
        (self.p1, self.p2) = if self.twisted { (b, a) } else { (a, b) };
    }

    pub(crate) fn is_done(&self) -> bool {
        self.mode == DistanceMode::Min && self.found && self.distance <= self.tolerance
    }

    /// Run `f` with the operand order reversed.
    pub(crate) fn swapped<F>(&mut self, f: F) -> Result<()>
    where
        F: FnOnce(&mut Self) -> Result<()>,
    {
        self.twisted = !self.twisted;
        let out = f(self);
        self.twisted = !self.twisted;
        out
    }

    pub(crate) fn swapped_infallible<F>(&mut self, f: F)
    where
        F: FnOnce(&mut Self),
    {
        self.twisted = !self.twisted;
        f(self);
        self.twisted = !self.twisted;
    }
}

// ── Entry points ──────────────────────────────────────────────────────────────

/// Feed every candidate between `a` and `b` into `dl`.
///
/// Empty parts are skipped; the accumulator is left untouched when either side
/// has nothing to measure.
pub fn distance_2d(a: &Geometry, b: &Geometry, dl: &mut DistPts) -> Result<()> {
    dispatch::distance_recursive(a, b, dl)
}

fn ensure_matching_srid(a: &Geometry, b: &Geometry) -> Result<i32> {
    if a.srid() != b.srid() {
        return Err(GeomError::MixedSrid {
            left: a.srid(),
            right: b.srid(),
        });
    }
    Ok(a.srid())
}

fn search(a: &Geometry, b: &Geometry, mode: DistanceMode, tolerance: f64) -> Result<DistPts> {
    ensure_matching_srid(a, b)?;
    let mut dl = DistPts::new(mode).with_tolerance(tolerance);
    distance_2d(a, b, &mut dl)?;
    Ok(dl)
}

/// Minimum planar distance, `None` when either operand is empty.
///
/// # Example
///
/// ```
/// use geomeasure_core::geometry::{Geometry, PointArray};
/// use geomeasure_core::measures::min_distance_2d;
///
/// let a = Geometry::point(0.0, 0.0);
/// let b = Geometry::line(PointArray::from_xy(&[(3.0, -1.0), (3.0, 1.0)]));
/// assert_eq!(min_distance_2d(&a, &b).unwrap(), Some(3.0));
/// ```
pub fn min_distance_2d(a: &Geometry, b: &Geometry) -> Result<Option<f64>> {
    Ok(search(a, b, DistanceMode::Min, 0.0)?.distance())
}

/// Largest distance between any point of `a` and any point of `b`.
///
/// Curved operands are rejected with [`GeomError::MaxDistanceUnsupported`].
pub fn max_distance_2d(a: &Geometry, b: &Geometry) -> Result<Option<f64>> {
    Ok(search(a, b, DistanceMode::Max, 0.0)?.distance())
}

/// True when some point of `a` lies within `tolerance` of some point of `b`.
///
/// # Example
///
/// ```
/// use geomeasure_core::geometry::Geometry;
/// use geomeasure_core::measures::is_within_distance_2d;
///
/// let a = Geometry::point(0.0, 0.0);
/// let b = Geometry::point(3.0, 4.0);
/// assert!(is_within_distance_2d(&a, &b, 5.0).unwrap());
/// assert!(!is_within_distance_2d(&a, &b, 4.9).unwrap());
/// assert!(is_within_distance_2d(&a, &b, -1.0).is_err());
/// ```
pub fn is_within_distance_2d(a: &Geometry, b: &Geometry, tolerance: f64) -> Result<bool> {
    if tolerance < 0.0 {
        return Err(GeomError::NegativeTolerance);
    }
    ensure_matching_srid(a, b)?;
    if a.is_empty() || b.is_empty() {
        return Ok(false);
    }
    if let (Some(ba), Some(bb)) = (a.calculate_bbox(), b.calculate_bbox()) {
        if ba.distance_2d(&bb) > tolerance {
            return Ok(false);
        }
    }
    let dl = search(a, b, DistanceMode::Min, tolerance)?;
    Ok(dl.distance().is_some_and(|d| d <= tolerance))
}

/// True when every point of `a` lies within `tolerance` of every point of `b`.
pub fn is_fully_within_distance_2d(a: &Geometry, b: &Geometry, tolerance: f64) -> Result<bool> {
    if tolerance < 0.0 {
        return Err(GeomError::NegativeTolerance);
    }
    let dl = search(a, b, DistanceMode::Max, 0.0)?;
    Ok(dl.distance().is_some_and(|d| d <= tolerance))
}

fn witness_line(srid: i32, p1: Coord<f64>, p2: Coord<f64>) -> Geometry {
    Geometry::line(PointArray::from_xy(&[(p1.x, p1.y), (p2.x, p2.y)])).with_srid(srid)
}

/// The point of `a` nearest to `b`.
///
/// # Example
///
/// ```
/// use geomeasure_core::geometry::{Geometry, PointArray};
/// use geomeasure_core::measures::closest_point_2d;
///
/// let line = Geometry::line(PointArray::from_xy(&[(0.0, 0.0), (10.0, 0.0)]));
/// let p = closest_point_2d(&line, &Geometry::point(4.0, 3.0)).unwrap().unwrap();
/// assert_eq!(p.start_point().map(|c| (c.x, c.y)), Some((4.0, 0.0)));
/// ```
pub fn closest_point_2d(a: &Geometry, b: &Geometry) -> Result<Option<Geometry>> {
    let dl = search(a, b, DistanceMode::Min, 0.0)?;
    Ok(dl
        .witnesses()
        .map(|(p1, _)| Geometry::point(p1.x, p1.y).with_srid(a.srid())))
}

/// Segment from `a` to `b` realising their minimum distance.
pub fn shortest_line_2d(a: &Geometry, b: &Geometry) -> Result<Option<Geometry>> {
    let dl = search(a, b, DistanceMode::Min, 0.0)?;
    Ok(dl.witnesses().map(|(p1, p2)| witness_line(a.srid(), p1, p2)))
}

/// Segment from `a` to `b` realising their maximum distance.
pub fn longest_line_2d(a: &Geometry, b: &Geometry) -> Result<Option<Geometry>> {
    let dl = search(a, b, DistanceMode::Max, 0.0)?;
    Ok(dl.witnesses().map(|(p1, p2)| witness_line(a.srid(), p1, p2)))
}
