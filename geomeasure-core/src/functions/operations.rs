//! Spatial operations
//!
//! ST_Union, ST_Difference

use super::{parse_blob, write_blob};
use crate::error::Result;
use crate::ops::{GeoSetOps, SetOperations};

/// ST_Union: compute the geometric union of two polygon geometries.
///
/// # Example
///
/// ```
/// use geomeasure_core::functions::operations::st_union;
/// use geomeasure_core::functions::io::geom_from_text;
/// use geomeasure_core::functions::measurement::st_area;
///
/// let a = geom_from_text("POLYGON((0 0,2 0,2 2,0 2,0 0))", None).unwrap();
/// let b = geom_from_text("POLYGON((1 0,3 0,3 2,1 2,1 0))", None).unwrap();
/// let u = st_union(&a, &b).unwrap();
/// assert!((st_area(&u).unwrap() - 6.0).abs() < 1e-10);
/// ```
pub fn st_union(a: &[u8], b: &[u8]) -> Result<Vec<u8>> {
    let merged = GeoSetOps.union(&parse_blob(a)?, &parse_blob(b)?)?;
    write_blob(&merged)
}

/// ST_Difference: compute the geometric difference (A minus B) of two polygon geometries.
///
/// # Example
///
/// ```
/// use geomeasure_core::functions::operations::st_difference;
/// use geomeasure_core::functions::io::geom_from_text;
/// use geomeasure_core::functions::measurement::st_area;
///
/// let a = geom_from_text("POLYGON((0 0,2 0,2 2,0 2,0 0))", None).unwrap();
/// let b = geom_from_text("POLYGON((1 0,3 0,3 2,1 2,1 0))", None).unwrap();
/// let d = st_difference(&a, &b).unwrap();
/// assert!((st_area(&d).unwrap() - 2.0).abs() < 1e-10);
/// ```
pub fn st_difference(a: &[u8], b: &[u8]) -> Result<Vec<u8>> {
    let rest = GeoSetOps.difference(&parse_blob(a)?, &parse_blob(b)?)?;
    write_blob(&rest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::functions::accessors::{st_geometry_type, st_srid};
    use crate::functions::io::geom_from_text;

    #[test]
    fn union_output_is_a_multipolygon_blob() {
        let a = geom_from_text("POLYGON((0 0,1 0,1 1,0 1,0 0))", Some(2154)).unwrap();
        let b = geom_from_text("POLYGON((5 5,6 5,6 6,5 6,5 5))", Some(2154)).unwrap();
        let u = st_union(&a, &b).unwrap();
        assert_eq!(st_geometry_type(&u).unwrap(), "ST_MultiPolygon");
        assert_eq!(st_srid(&u).unwrap(), 2154);
    }

    #[test]
    fn lines_are_rejected() {
        let a = geom_from_text("LINESTRING(0 0,1 1)", None).unwrap();
        let b = geom_from_text("POLYGON((0 0,1 0,1 1,0 1,0 0))", None).unwrap();
        assert!(st_difference(&a, &b).is_err());
    }
}
