//! Measurement functions.
//!
//! ST_Distance, ST_MaxDistance, ST_DWithin, ST_DFullyWithin,
//! ST_ClosestPoint, ST_ShortestLine, ST_LongestLine, ST_Area,
//! ST_XMin/XMax/YMin/YMax

use super::{parse_blob, write_blob};
use crate::error::Result;
use crate::geometry::{GBox, Geometry};
use crate::measures;

fn parse_pair(a: &[u8], b: &[u8]) -> Result<(Geometry, Geometry)> {
    Ok((parse_blob(a)?, parse_blob(b)?))
}

/// ST_Distance: minimum planar distance, `None` when either side is empty.
///
/// # Example
///
/// ```
/// use geomeasure_core::functions::measurement::st_distance;
/// use geomeasure_core::functions::io::geom_from_text;
///
/// let a = geom_from_text("POINT(0 0)", None).unwrap();
/// let b = geom_from_text("POINT(3 4)", None).unwrap();
/// assert_eq!(st_distance(&a, &b).unwrap(), Some(5.0));
///
/// let other_srid = geom_from_text("POINT(3 4)", Some(4326)).unwrap();
/// assert!(st_distance(&a, &other_srid).is_err());
/// ```
pub fn st_distance(a: &[u8], b: &[u8]) -> Result<Option<f64>> {
    let (ga, gb) = parse_pair(a, b)?;
    measures::min_distance_2d(&ga, &gb)
}

/// ST_MaxDistance: largest planar distance between the two operands.
///
/// # Example
///
/// ```
/// use geomeasure_core::functions::measurement::st_max_distance;
/// use geomeasure_core::functions::io::geom_from_text;
///
/// let a = geom_from_text("LINESTRING(0 0,1 0)", None).unwrap();
/// let b = geom_from_text("POINT(3 4)", None).unwrap();
/// assert_eq!(st_max_distance(&a, &b).unwrap(), Some(5.0));
/// ```
pub fn st_max_distance(a: &[u8], b: &[u8]) -> Result<Option<f64>> {
    let (ga, gb) = parse_pair(a, b)?;
    measures::max_distance_2d(&ga, &gb)
}

/// ST_DWithin: true when the operands come within `tolerance` of each other.
///
/// # Example
///
/// ```
/// use geomeasure_core::functions::measurement::st_dwithin;
/// use geomeasure_core::functions::io::geom_from_text;
///
/// let a = geom_from_text("POINT(0 0)", None).unwrap();
/// let b = geom_from_text("LINESTRING(2 -1,2 1)", None).unwrap();
/// assert!(st_dwithin(&a, &b, 2.0).unwrap());
/// assert!(!st_dwithin(&a, &b, 1.5).unwrap());
/// assert!(st_dwithin(&a, &b, -1.0).is_err());
/// ```
pub fn st_dwithin(a: &[u8], b: &[u8], tolerance: f64) -> Result<bool> {
    let (ga, gb) = parse_pair(a, b)?;
    measures::is_within_distance_2d(&ga, &gb, tolerance)
}

/// ST_DFullyWithin: true when every pair of points is within `tolerance`.
///
/// # Example
///
/// ```
/// use geomeasure_core::functions::measurement::st_dfully_within;
/// use geomeasure_core::functions::io::geom_from_text;
///
/// let a = geom_from_text("LINESTRING(0 0,1 0)", None).unwrap();
/// let b = geom_from_text("POINT(3 4)", None).unwrap();
/// assert!(st_dfully_within(&a, &b, 5.0).unwrap());
/// assert!(!st_dfully_within(&a, &b, 4.9).unwrap());
/// ```
pub fn st_dfully_within(a: &[u8], b: &[u8], tolerance: f64) -> Result<bool> {
    let (ga, gb) = parse_pair(a, b)?;
    measures::is_fully_within_distance_2d(&ga, &gb, tolerance)
}

/// ST_ClosestPoint: the point of `a` nearest to `b`, as an EWKB point.
///
/// # Example
///
/// ```
/// use geomeasure_core::functions::measurement::st_closest_point;
/// use geomeasure_core::functions::io::{as_text, geom_from_text};
///
/// let line = geom_from_text("LINESTRING(0 0,10 0)", None).unwrap();
/// let pt = geom_from_text("POINT(4 3)", None).unwrap();
/// let closest = st_closest_point(&line, &pt).unwrap().unwrap();
/// assert_eq!(as_text(&closest).unwrap(), "POINT(4 0)");
/// ```
pub fn st_closest_point(a: &[u8], b: &[u8]) -> Result<Option<Vec<u8>>> {
    let (ga, gb) = parse_pair(a, b)?;
    measures::closest_point_2d(&ga, &gb)?.as_ref().map(write_blob).transpose()
}

/// ST_ShortestLine: two-point line from `a` to `b` at minimum distance.
pub fn st_shortest_line(a: &[u8], b: &[u8]) -> Result<Option<Vec<u8>>> {
    let (ga, gb) = parse_pair(a, b)?;
    measures::shortest_line_2d(&ga, &gb)?.as_ref().map(write_blob).transpose()
}

/// ST_LongestLine: two-point line from `a` to `b` at maximum distance.
///
/// # Example
///
/// ```
/// use geomeasure_core::functions::measurement::st_longest_line;
/// use geomeasure_core::functions::io::{as_text, geom_from_text};
///
/// let a = geom_from_text("LINESTRING(0 0,1 0)", None).unwrap();
/// let b = geom_from_text("POINT(3 4)", None).unwrap();
/// let line = st_longest_line(&a, &b).unwrap().unwrap();
/// assert_eq!(as_text(&line).unwrap(), "LINESTRING(0 0,3 4)");
/// ```
pub fn st_longest_line(a: &[u8], b: &[u8]) -> Result<Option<Vec<u8>>> {
    let (ga, gb) = parse_pair(a, b)?;
    measures::longest_line_2d(&ga, &gb)?.as_ref().map(write_blob).transpose()
}

/// ST_Area: planar area, exact for circular ring edges.
///
/// # Example
///
/// ```
/// use geomeasure_core::functions::measurement::st_area;
/// use geomeasure_core::functions::io::geom_from_text;
///
/// let poly = geom_from_text("POLYGON((0 0,1 0,1 1,0 1,0 0))", None).unwrap();
/// assert!((st_area(&poly).unwrap() - 1.0).abs() < 1e-10);
/// ```
pub fn st_area(blob: &[u8]) -> Result<f64> {
    Ok(parse_blob(blob)?.area())
}

fn bbox_of(blob: &[u8]) -> Result<Option<GBox>> {
    Ok(parse_blob(blob)?.calculate_bbox())
}

/// ST_XMin: `None` for empty geometries.
///
/// # Example
///
/// ```
/// use geomeasure_core::functions::measurement::{st_xmin, st_ymax};
/// use geomeasure_core::functions::io::geom_from_text;
///
/// let line = geom_from_text("LINESTRING(1 2,3 4)", None).unwrap();
/// assert_eq!(st_xmin(&line).unwrap(), Some(1.0));
/// assert_eq!(st_ymax(&line).unwrap(), Some(4.0));
/// ```
pub fn st_xmin(blob: &[u8]) -> Result<Option<f64>> {
    Ok(bbox_of(blob)?.map(|b| b.xmin))
}

/// ST_XMax
pub fn st_xmax(blob: &[u8]) -> Result<Option<f64>> {
    Ok(bbox_of(blob)?.map(|b| b.xmax))
}

/// ST_YMin
pub fn st_ymin(blob: &[u8]) -> Result<Option<f64>> {
    Ok(bbox_of(blob)?.map(|b| b.ymin))
}

/// ST_YMax
pub fn st_ymax(blob: &[u8]) -> Result<Option<f64>> {
    Ok(bbox_of(blob)?.map(|b| b.ymax))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GeomError;
    use crate::geometry::{CollectionKind, GeometryType, PointArray};

    fn blob(g: &Geometry) -> Vec<u8> {
        write_blob(g).unwrap()
    }

    #[test]
    fn empty_operand_has_no_distance() {
        let empty = Geometry::empty(GeometryType::MultiPoint, false, false);
        let p = Geometry::point(1.0, 1.0);
        assert_eq!(st_distance(&blob(&empty), &blob(&p)).unwrap(), None);
        assert_eq!(st_closest_point(&blob(&empty), &blob(&p)).unwrap(), None);
        assert!(!st_dwithin(&blob(&empty), &blob(&p), 100.0).unwrap());
    }

    #[test]
    fn arc_bulge_sets_the_box() {
        let arc = Geometry::circular_string(PointArray::from_xy(&[(-1.0, 0.0), (0.0, 1.0), (1.0, 0.0)]));
        let b = blob(&arc);
        assert_eq!(st_ymax(&b).unwrap(), Some(1.0));
        assert_eq!(st_ymin(&b).unwrap(), Some(0.0));
        assert_eq!(st_xmax(&b).unwrap(), Some(1.0));
    }

    #[test]
    fn max_distance_on_arcs_is_unsupported() {
        let arc = Geometry::circular_string(PointArray::from_xy(&[(-1.0, 0.0), (0.0, 1.0), (1.0, 0.0)]));
        let p = Geometry::point(0.0, 5.0);
        assert!(matches!(
            st_max_distance(&blob(&arc), &blob(&p)),
            Err(GeomError::MaxDistanceUnsupported(_))
        ));
    }

    #[test]
    fn point_inside_polygon_is_at_distance_zero() {
        let shell = PointArray::from_xy(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0), (0.0, 0.0)]);
        let poly = Geometry::polygon(vec![shell]);
        let p = Geometry::point(5.0, 5.0);
        assert_eq!(st_distance(&blob(&p), &blob(&poly)).unwrap(), Some(0.0));
        let mp = Geometry::collection(CollectionKind::MultiPolygon, vec![poly]).unwrap();
        assert_eq!(st_distance(&blob(&mp), &blob(&p)).unwrap(), Some(0.0));
    }

    #[test]
    fn shortest_line_runs_from_a_to_b() {
        let a = Geometry::point(0.0, 0.0);
        let b = Geometry::line(PointArray::from_xy(&[(3.0, -1.0), (3.0, 1.0)]));
        let line = parse_blob(&st_shortest_line(&blob(&a), &blob(&b)).unwrap().unwrap()).unwrap();
        assert_eq!(line, Geometry::line(PointArray::from_xy(&[(0.0, 0.0), (3.0, 0.0)])));
    }
}
