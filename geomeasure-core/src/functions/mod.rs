//! SQL-style functions over extended WKB blobs.
//!
//! Every input blob is decoded with [`ParserCheck::ALL`]; every geometry
//! output is little-endian extended WKB carrying the SRID.

pub mod accessors;
pub mod io;
pub mod measurement;
pub mod operations;

use crate::error::Result;
use crate::geometry::Geometry;
use crate::wkb::{decode, ByteOrder, ParserCheck, WkbVariant};

pub(crate) fn parse_blob(blob: &[u8]) -> Result<Geometry> {
    decode(blob, ParserCheck::ALL)
}

pub(crate) fn write_blob(geom: &Geometry) -> Result<Vec<u8>> {
    geom.to_wkb(WkbVariant::Extended, ByteOrder::LittleEndian)
}
