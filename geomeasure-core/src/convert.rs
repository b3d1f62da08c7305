//! Conversion between [`Geometry`] trees and `geo` types.
//!
//! Only linear kinds have a `geo` counterpart; Z and M are dropped on the
//! way out. Triangles, polyhedral surfaces and TINs become polygons.

use geo::{Coord, LineString, MultiLineString, MultiPoint, MultiPolygon, Point, Polygon};

use crate::error::{GeomError, Result};
use crate::geometry::{Body, CollectionKind, Geometry, GeometryType, PointArray};

fn line_string(pa: &PointArray) -> LineString<f64> {
    LineString::new(pa.coords().collect())
}

fn polygon(rings: &[PointArray]) -> Polygon<f64> {
    match rings.split_first() {
        Some((shell, holes)) => {
            Polygon::new(line_string(shell), holes.iter().map(line_string).collect())
        }
        None => Polygon::new(LineString::new(vec![]), vec![]),
    }
}

fn as_polygon(g: &Geometry) -> Result<Polygon<f64>> {
    match g.body() {
        Body::Polygon(rings) => Ok(polygon(rings)),
        Body::Triangle(pa) => Ok(polygon(std::slice::from_ref(pa))),
        _ => Err(GeomError::WrongType("Polygon")),
    }
}

fn as_line_string(g: &Geometry) -> Result<LineString<f64>> {
    match g.body() {
        Body::Line(pa) => Ok(line_string(pa)),
        _ => Err(GeomError::WrongType("LineString")),
    }
}

fn as_point(g: &Geometry) -> Result<Point<f64>> {
    match g.body() {
        Body::Point(pa) => Ok(pa
            .first()
            .map(Point::from)
            .unwrap_or_else(|| Point::new(f64::NAN, f64::NAN))),
        _ => Err(GeomError::WrongType("Point")),
    }
}

/// Convert to a `geo` geometry; curved kinds are rejected.
///
/// An empty point maps to `POINT(NaN NaN)`.
///
/// # Example
///
/// ```
/// use geomeasure_core::convert::to_geo;
/// use geomeasure_core::geometry::{Geometry, PointArray};
///
/// let line = Geometry::line(PointArray::from_xy(&[(0.0, 0.0), (3.0, 4.0)]));
/// assert!(matches!(to_geo(&line).unwrap(), geo::Geometry::LineString(_)));
///
/// let arc = Geometry::circular_string(PointArray::from_xy(&[(0.0, 0.0), (1.0, 1.0), (2.0, 0.0)]));
/// assert!(to_geo(&arc).is_err());
/// ```
pub fn to_geo(g: &Geometry) -> Result<geo::Geometry<f64>> {
    let children = g.children();
    Ok(match g.geometry_type() {
        GeometryType::Point => geo::Geometry::Point(as_point(g)?),
        GeometryType::Line => geo::Geometry::LineString(as_line_string(g)?),
        GeometryType::Polygon | GeometryType::Triangle => geo::Geometry::Polygon(as_polygon(g)?),
        GeometryType::MultiPoint => geo::Geometry::MultiPoint(MultiPoint::new(
            children.iter().map(as_point).collect::<Result<_>>()?,
        )),
        GeometryType::MultiLine => geo::Geometry::MultiLineString(MultiLineString::new(
            children.iter().map(as_line_string).collect::<Result<_>>()?,
        )),
        GeometryType::MultiPolygon | GeometryType::PolyhedralSurface | GeometryType::Tin => {
            geo::Geometry::MultiPolygon(MultiPolygon::new(
                children.iter().map(as_polygon).collect::<Result<_>>()?,
            ))
        }
        GeometryType::GeometryCollection => geo::Geometry::GeometryCollection(
            geo::GeometryCollection(children.iter().map(to_geo).collect::<Result<_>>()?),
        ),
        GeometryType::CircularString
        | GeometryType::CompoundCurve
        | GeometryType::CurvePolygon
        | GeometryType::MultiCurve
        | GeometryType::MultiSurface => return Err(GeomError::WrongType("linear geometry")),
    })
}

fn point_array(coords: impl IntoIterator<Item = Coord<f64>>) -> PointArray {
    let xy: Vec<(f64, f64)> = coords.into_iter().map(|c| (c.x, c.y)).collect();
    PointArray::from_xy(&xy)
}

fn from_point(p: &Point<f64>) -> Geometry {
    if p.x().is_nan() && p.y().is_nan() {
        Geometry::empty(GeometryType::Point, false, false)
    } else {
        Geometry::point(p.x(), p.y())
    }
}

fn from_polygon(p: &Polygon<f64>) -> Geometry {
    if p.exterior().0.is_empty() {
        return Geometry::empty(GeometryType::Polygon, false, false);
    }
    let mut rings = vec![point_array(p.exterior().coords().copied())];
    rings.extend(p.interiors().iter().map(|r| point_array(r.coords().copied())));
    Geometry::polygon(rings)
}

/// Convert a `geo` geometry, with SRID 0.
pub fn from_geo(g: &geo::Geometry<f64>) -> Result<Geometry> {
    use geo::Geometry as G;
    Ok(match g {
        G::Point(p) => from_point(p),
        G::Line(l) => Geometry::line(point_array([l.start, l.end])),
        G::LineString(ls) => Geometry::line(point_array(ls.coords().copied())),
        G::Polygon(p) => from_polygon(p),
        G::MultiPoint(mp) => {
            Geometry::collection(CollectionKind::MultiPoint, mp.iter().map(from_point).collect())?
        }
        G::MultiLineString(mls) => Geometry::collection(
            CollectionKind::MultiLine,
            mls.iter()
                .map(|ls| Geometry::line(point_array(ls.coords().copied())))
                .collect(),
        )?,
        G::MultiPolygon(mp) => {
            Geometry::collection(CollectionKind::MultiPolygon, mp.iter().map(from_polygon).collect())?
        }
        G::GeometryCollection(gc) => Geometry::collection(
            CollectionKind::GeometryCollection,
            gc.iter().map(from_geo).collect::<Result<_>>()?,
        )?,
        G::Rect(r) => from_polygon(&r.to_polygon()),
        G::Triangle(t) => {
            let [a, b, c] = t.to_array();
            Geometry::triangle(point_array([a, b, c, a]))
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn polygon_with_hole_round_trips() {
        let shell = PointArray::from_xy(&[(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0), (0.0, 0.0)]);
        let hole = PointArray::from_xy(&[(1.0, 1.0), (2.0, 1.0), (2.0, 2.0), (1.0, 1.0)]);
        let poly = Geometry::polygon(vec![shell, hole]);
        let back = from_geo(&to_geo(&poly).unwrap()).unwrap();
        assert_eq!(back, poly);
    }

    #[test]
    fn empty_point_is_nan_point() {
        let empty = Geometry::empty(GeometryType::Point, false, false);
        let g = to_geo(&empty).unwrap();
        assert!(matches!(g, geo::Geometry::Point(p) if p.x().is_nan()));
        assert!(from_geo(&g).unwrap().is_empty());
    }

    #[test]
    fn z_is_dropped() {
        let pa = PointArray::from_ordinates(true, false, vec![1.0, 2.0, 3.0]).unwrap();
        let p = Geometry::point_from_array(pa).unwrap();
        assert_eq!(from_geo(&to_geo(&p).unwrap()).unwrap(), Geometry::point(1.0, 2.0));
    }

    #[test]
    fn tin_becomes_multipolygon() {
        let tri = Geometry::triangle(PointArray::from_xy(&[
            (0.0, 0.0),
            (1.0, 0.0),
            (0.0, 1.0),
            (0.0, 0.0),
        ]));
        let tin = Geometry::collection(CollectionKind::Tin, vec![tri]).unwrap();
        assert!(matches!(to_geo(&tin).unwrap(), geo::Geometry::MultiPolygon(mp) if mp.0.len() == 1));
    }

    #[test]
    fn geo_triangle_is_closed() {
        let t = geo::Triangle::new(
            Coord { x: 0.0, y: 0.0 },
            Coord { x: 1.0, y: 0.0 },
            Coord { x: 0.0, y: 1.0 },
        );
        let g = from_geo(&geo::Geometry::Triangle(t)).unwrap();
        assert!(g.is_closed());
        assert_eq!(g.count_vertices(), 4);
    }
}
