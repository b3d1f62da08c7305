//! Polygon set operations.
//!
//! Distance never needs these; they sit behind [`SetOperations`] so callers
//! can swap the overlay engine.

use geo::algorithm::bool_ops::BooleanOps;
use geo::MultiPolygon;

use crate::convert::{from_geo, to_geo};
use crate::error::{GeomError, Result};
use crate::geometry::Geometry;

/// Overlay engine for polygonal geometries.
pub trait SetOperations {
    /// Everything covered by `a` or `b`.
    fn union(&self, a: &Geometry, b: &Geometry) -> Result<Geometry>;

    /// The part of `a` not covered by `b`.
    fn difference(&self, a: &Geometry, b: &Geometry) -> Result<Geometry>;
}

/// [`SetOperations`] backed by `geo`'s boolean operations.
///
/// Inputs must be Polygon or MultiPolygon with the same SRID; the result is
/// always a MultiPolygon carrying that SRID.
///
/// # Example
///
/// ```
/// use geomeasure_core::geometry::{Geometry, PointArray};
/// use geomeasure_core::ops::{GeoSetOps, SetOperations};
///
/// let a = Geometry::polygon(vec![PointArray::from_xy(&[
///     (0.0, 0.0), (2.0, 0.0), (2.0, 2.0), (0.0, 2.0), (0.0, 0.0),
/// ])]);
/// let b = Geometry::polygon(vec![PointArray::from_xy(&[
///     (1.0, 0.0), (3.0, 0.0), (3.0, 2.0), (1.0, 2.0), (1.0, 0.0),
/// ])]);
/// let u = GeoSetOps.union(&a, &b).unwrap();
/// assert!((u.area() - 6.0).abs() < 1e-10);
/// let d = GeoSetOps.difference(&a, &b).unwrap();
/// assert!((d.area() - 2.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct GeoSetOps;

fn require_multi_polygon(g: &Geometry) -> Result<MultiPolygon<f64>> {
    match to_geo(g)? {
        geo::Geometry::Polygon(p) => Ok(MultiPolygon::new(vec![p])),
        geo::Geometry::MultiPolygon(mp) => Ok(mp),
        _ => Err(GeomError::WrongType("Polygon or MultiPolygon")),
    }
}

fn binary_polygon_op<F>(a: &Geometry, b: &Geometry, op: F) -> Result<Geometry>
where
    F: FnOnce(&MultiPolygon<f64>, &MultiPolygon<f64>) -> MultiPolygon<f64>,
{
    if a.srid() != b.srid() {
        return Err(GeomError::MixedSrid {
            left: a.srid(),
            right: b.srid(),
        });
    }
    let ma = require_multi_polygon(a)?;
    let mb = require_multi_polygon(b)?;
    let result = op(&ma, &mb);
    Ok(from_geo(&geo::Geometry::MultiPolygon(result))?.with_srid(a.srid()))
}

impl SetOperations for GeoSetOps {
    fn union(&self, a: &Geometry, b: &Geometry) -> Result<Geometry> {
        binary_polygon_op(a, b, |ma, mb| ma.union(mb))
    }

    fn difference(&self, a: &Geometry, b: &Geometry) -> Result<Geometry> {
        binary_polygon_op(a, b, |ma, mb| ma.difference(mb))
    }
}
