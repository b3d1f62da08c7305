//! I/O and serialization functions.
//!
//! ST_GeomFromText, ST_GeomFromWKB, ST_GeomFromHexWKB, ST_AsText,
//! ST_AsBinary, ST_AsHexWKB

use geozero::wkb::Ewkb;
use geozero::{ToGeo, ToWkt};

use super::{parse_blob, write_blob};
use crate::convert::from_geo;
use crate::error::Result;
use crate::geometry::{clamp_srid, Geometry};
use crate::wkb::{ByteOrder, ParserCheck, WkbVariant};

fn with_srid(mut geom: Geometry, srid: Option<i32>) -> Geometry {
    if let Some(s) = srid {
        geom.set_srid(clamp_srid(s));
    }
    geom
}

// ── Deserialization helpers ───────────────────────────────────────────────────

/// Parse WKT (optionally with an SRID) into an EWKB blob.
///
/// Only linear kinds are accepted.
///
/// # Example
///
/// ```
/// use geomeasure_core::functions::io::geom_from_text;
/// use geomeasure_core::functions::accessors::st_srid;
///
/// let blob = geom_from_text("POINT(1 2)", Some(4326)).unwrap();
/// assert_eq!(st_srid(&blob).unwrap(), 4326);
/// assert!(geom_from_text("POINT(1", None).is_err());
/// ```
pub fn geom_from_text(wkt: &str, srid: Option<i32>) -> Result<Vec<u8>> {
    let geom: geo::Geometry<f64> = geozero::wkt::Wkt(wkt.as_bytes()).to_geo()?;
    write_blob(&with_srid(from_geo(&geom)?, srid))
}

/// Parse WKB or extended WKB, optionally overriding the SRID.
///
/// # Example
///
/// ```
/// use geomeasure_core::functions::io::{as_binary, geom_from_text, geom_from_wkb};
/// use geomeasure_core::functions::accessors::st_srid;
///
/// let blob = geom_from_text("POINT(1 2)", None).unwrap();
/// let wkb = as_binary(&blob).unwrap();
/// let restored = geom_from_wkb(&wkb, Some(4326)).unwrap();
/// assert_eq!(st_srid(&restored).unwrap(), 4326);
/// ```
pub fn geom_from_wkb(wkb: &[u8], srid: Option<i32>) -> Result<Vec<u8>> {
    write_blob(&with_srid(parse_blob(wkb)?, srid))
}

/// Parse hex-encoded WKB, optionally overriding the SRID.
///
/// # Example
///
/// ```
/// use geomeasure_core::functions::io::{as_text, geom_from_hexwkb};
///
/// let blob = geom_from_hexwkb("0101000000000000000000F03F0000000000000040", None).unwrap();
/// assert_eq!(as_text(&blob).unwrap(), "POINT(1 2)");
/// assert!(geom_from_hexwkb("010", None).is_err());
/// ```
pub fn geom_from_hexwkb(hex: &str, srid: Option<i32>) -> Result<Vec<u8>> {
    let geom = Geometry::from_hex_wkb(hex, ParserCheck::ALL)?;
    write_blob(&with_srid(geom, srid))
}

// ── Serialization helpers ─────────────────────────────────────────────────────

/// Convert an EWKB blob to WKT text.
///
/// # Example
///
/// ```
/// use geomeasure_core::functions::io::{as_text, geom_from_text};
///
/// let blob = geom_from_text("LINESTRING(0 0,3 4)", Some(3857)).unwrap();
/// assert_eq!(as_text(&blob).unwrap(), "LINESTRING(0 0,3 4)");
/// ```
pub fn as_text(blob: &[u8]) -> Result<String> {
    parse_blob(blob)?;
    Ok(Ewkb(blob).to_wkt()?)
}

/// Convert an EWKB blob to ISO WKB bytes (strips SRID).
///
/// # Example
///
/// ```
/// use geomeasure_core::functions::io::{as_binary, geom_from_text};
///
/// let blob = geom_from_text("POINT(1 2)", Some(4326)).unwrap();
/// // byte order, type word, two doubles
/// assert_eq!(as_binary(&blob).unwrap().len(), 21);
/// ```
pub fn as_binary(blob: &[u8]) -> Result<Vec<u8>> {
    parse_blob(blob)?.to_wkb(WkbVariant::Iso, ByteOrder::LittleEndian)
}

/// Upper-case hex EWKB, SRID included.
///
/// # Example
///
/// ```
/// use geomeasure_core::functions::io::{as_hexwkb, geom_from_text};
///
/// let blob = geom_from_text("POINT(1 2)", Some(4326)).unwrap();
/// assert_eq!(
///     as_hexwkb(&blob).unwrap(),
///     "0101000020E6100000000000000000F03F0000000000000040"
/// );
/// ```
pub fn as_hexwkb(blob: &[u8]) -> Result<String> {
    parse_blob(blob)?.to_hex_wkb(WkbVariant::Extended, ByteOrder::LittleEndian)
}
