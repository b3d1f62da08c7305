//! Geometry accessor functions.
//!
//! ST_SRID, ST_GeometryType, ST_IsEmpty, ST_IsCollection, ST_Dimension,
//! ST_NPoints, ST_IsClosed

use super::parse_blob;
use crate::error::Result;
use crate::geometry::GeometryType;

fn st_type_name(ty: GeometryType) -> &'static str {
    match ty {
        GeometryType::Point => "ST_Point",
        GeometryType::Line => "ST_LineString",
        GeometryType::Polygon => "ST_Polygon",
        GeometryType::MultiPoint => "ST_MultiPoint",
        GeometryType::MultiLine => "ST_MultiLineString",
        GeometryType::MultiPolygon => "ST_MultiPolygon",
        GeometryType::GeometryCollection => "ST_GeometryCollection",
        GeometryType::CircularString => "ST_CircularString",
        GeometryType::CompoundCurve => "ST_CompoundCurve",
        GeometryType::CurvePolygon => "ST_CurvePolygon",
        GeometryType::MultiCurve => "ST_MultiCurve",
        GeometryType::MultiSurface => "ST_MultiSurface",
        GeometryType::PolyhedralSurface => "ST_PolyhedralSurface",
        GeometryType::Tin => "ST_Tin",
        GeometryType::Triangle => "ST_Triangle",
    }
}

/// ST_SRID: the SRID of the outermost node, 0 when unknown.
///
/// # Example
///
/// ```
/// use geomeasure_core::functions::accessors::st_srid;
/// use geomeasure_core::functions::io::geom_from_text;
///
/// let blob = geom_from_text("POINT(1 2)", Some(4326)).unwrap();
/// assert_eq!(st_srid(&blob).unwrap(), 4326);
/// ```
pub fn st_srid(blob: &[u8]) -> Result<i32> {
    Ok(parse_blob(blob)?.srid())
}

/// ST_GeometryType: the PostGIS type string.
///
/// # Example
///
/// ```
/// use geomeasure_core::functions::accessors::st_geometry_type;
/// use geomeasure_core::functions::io::geom_from_text;
///
/// let blob = geom_from_text("LINESTRING(0 0,1 1)", None).unwrap();
/// assert_eq!(st_geometry_type(&blob).unwrap(), "ST_LineString");
/// ```
pub fn st_geometry_type(blob: &[u8]) -> Result<&'static str> {
    Ok(st_type_name(parse_blob(blob)?.geometry_type()))
}

/// ST_IsEmpty
///
/// # Example
///
/// ```
/// use geomeasure_core::functions::accessors::st_is_empty;
/// use geomeasure_core::functions::io::geom_from_hexwkb;
///
/// // GEOMETRYCOLLECTION EMPTY
/// let blob = geom_from_hexwkb("010700000000000000", None).unwrap();
/// assert!(st_is_empty(&blob).unwrap());
/// ```
pub fn st_is_empty(blob: &[u8]) -> Result<bool> {
    Ok(parse_blob(blob)?.is_empty())
}

/// ST_IsCollection: true for kinds that hold sub-geometries, empty or not.
pub fn st_is_collection(blob: &[u8]) -> Result<bool> {
    Ok(parse_blob(blob)?.is_collection())
}

/// ST_Dimension: 0 for points, 1 for curves, 2 for surfaces, 3 for closed
/// polyhedral surfaces.
///
/// # Example
///
/// ```
/// use geomeasure_core::functions::accessors::st_dimension;
/// use geomeasure_core::functions::io::geom_from_text;
///
/// let blob = geom_from_text("GEOMETRYCOLLECTION(POINT(0 0),LINESTRING(0 0,1 1))", None).unwrap();
/// assert_eq!(st_dimension(&blob).unwrap(), 1);
/// ```
pub fn st_dimension(blob: &[u8]) -> Result<u8> {
    Ok(parse_blob(blob)?.dimension())
}

/// ST_NPoints: number of stored vertices.
///
/// # Example
///
/// ```
/// use geomeasure_core::functions::accessors::st_npoints;
/// use geomeasure_core::functions::io::geom_from_text;
///
/// let blob = geom_from_text("POLYGON((0 0,1 0,1 1,0 1,0 0))", None).unwrap();
/// assert_eq!(st_npoints(&blob).unwrap(), 5);
/// ```
pub fn st_npoints(blob: &[u8]) -> Result<usize> {
    Ok(parse_blob(blob)?.count_vertices())
}

/// ST_IsClosed
pub fn st_is_closed(blob: &[u8]) -> Result<bool> {
    Ok(parse_blob(blob)?.is_closed())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::functions::write_blob;
    use crate::geometry::{CollectionKind, Geometry, PointArray};

    #[test]
    fn curved_kinds_have_type_names() {
        let arc = Geometry::circular_string(PointArray::from_xy(&[(0.0, 0.0), (1.0, 1.0), (2.0, 0.0)]));
        assert_eq!(st_geometry_type(&write_blob(&arc).unwrap()).unwrap(), "ST_CircularString");

        let cc = Geometry::collection(CollectionKind::CompoundCurve, vec![arc]).unwrap();
        let blob = write_blob(&cc).unwrap();
        assert_eq!(st_geometry_type(&blob).unwrap(), "ST_CompoundCurve");
        assert!(st_is_collection(&blob).unwrap());
        assert_eq!(st_dimension(&blob).unwrap(), 1);
        assert_eq!(st_npoints(&blob).unwrap(), 3);
    }

    #[test]
    fn closed_arc_ring() {
        let circle = Geometry::circular_string(PointArray::from_xy(&[
            (0.0, 0.0),
            (2.0, 0.0),
            (0.0, 0.0),
        ]));
        assert!(st_is_closed(&write_blob(&circle).unwrap()).unwrap());
    }

    #[test]
    fn srid_defaults_to_unknown() {
        let blob = write_blob(&Geometry::point(1.0, 1.0)).unwrap();
        assert_eq!(st_srid(&blob).unwrap(), 0);
    }

    #[test]
    fn truncated_blob_is_an_error() {
        let blob = write_blob(&Geometry::point(1.0, 1.0)).unwrap();
        assert!(st_srid(&blob[..blob.len() - 1]).is_err());
    }
}
