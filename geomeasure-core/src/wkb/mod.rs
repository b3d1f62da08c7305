//! Well-Known Binary input and output.
//!
//! Wire format of one node:
//!   [0x00|0x01]   byte order marker (big-endian or little-endian)
//!   [u32]         type code, either ISO (`kind + 1000*Z + 2000*M`) or
//!                 extended with the high flag bits below
//!   [i32]         SRID, only when the SRID flag is set
//!   ...           kind-specific payload, counts as u32 and ordinates as f64

use std::ops::BitOr;

mod hex;
mod reader;
mod writer;

pub use hex::{decode_hex, encode_hex};
pub use reader::decode;
pub use writer::{ByteOrder, WkbVariant};

// ── Flag constants ────────────────────────────────────────────────────────────
pub const WKB_Z_FLAG: u32 = 0x8000_0000;
pub const WKB_M_FLAG: u32 = 0x4000_0000;
pub const WKB_SRID_FLAG: u32 = 0x2000_0000;
/// Any of the extended flag bits.
pub const WKB_FLAG_MASK: u32 = 0xF000_0000;
pub const WKB_TYPE_MASK: u32 = 0x0FFF_FFFF;

// ── Type codes ────────────────────────────────────────────────────────────────
pub const WKB_POINT: u32 = 1;
pub const WKB_LINESTRING: u32 = 2;
pub const WKB_POLYGON: u32 = 3;
pub const WKB_MULTIPOINT: u32 = 4;
pub const WKB_MULTILINESTRING: u32 = 5;
pub const WKB_MULTIPOLYGON: u32 = 6;
pub const WKB_GEOMETRYCOLLECTION: u32 = 7;
pub const WKB_CIRCULARSTRING: u32 = 8;
pub const WKB_COMPOUNDCURVE: u32 = 9;
pub const WKB_CURVEPOLYGON: u32 = 10;
pub const WKB_MULTICURVE: u32 = 11;
pub const WKB_MULTISURFACE: u32 = 12;
pub const WKB_CURVE: u32 = 13;
pub const WKB_SURFACE: u32 = 14;
pub const WKB_POLYHEDRALSURFACE: u32 = 15;
pub const WKB_TIN: u32 = 16;
pub const WKB_TRIANGLE: u32 = 17;

/// Nesting level at which collections are rejected; the outermost node is level 1.
pub const MAX_PARSE_DEPTH: u32 = 200;

/// Structural checks applied while decoding.
///
/// # Example
///
/// ```
/// use geomeasure_core::wkb::ParserCheck;
///
/// let check = ParserCheck::MINPOINTS | ParserCheck::CLOSURE;
/// assert!(check.contains(ParserCheck::CLOSURE));
/// assert!(!check.contains(ParserCheck::ODD));
/// assert!(ParserCheck::ALL.contains(check));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ParserCheck(u8);

impl ParserCheck {
    pub const NONE: ParserCheck = ParserCheck(0);
    /// Lines need 2 points, circular strings 3, rings 4.
    pub const MINPOINTS: ParserCheck = ParserCheck(0x01);
    /// Circular strings need an odd number of points.
    pub const ODD: ParserCheck = ParserCheck(0x02);
    /// Rings must end on their first point in XY.
    pub const CLOSURE: ParserCheck = ParserCheck(0x04);
    /// Rings must also end on their first Z.
    pub const ZCLOSURE: ParserCheck = ParserCheck(0x08);
    pub const ALL: ParserCheck = ParserCheck(0x01 | 0x02 | 0x04);

    pub fn contains(self, other: ParserCheck) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn bits(self) -> u8 {
        self.0
    }
}

impl BitOr for ParserCheck {
    type Output = ParserCheck;

    fn bitor(self, rhs: ParserCheck) -> ParserCheck {
        ParserCheck(self.0 | rhs.0)
    }
}
