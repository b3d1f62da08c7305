//! Bounds-checked WKB decoder.

use super::{
    decode_hex, ParserCheck, MAX_PARSE_DEPTH, WKB_CIRCULARSTRING, WKB_COMPOUNDCURVE, WKB_CURVE,
    WKB_CURVEPOLYGON, WKB_FLAG_MASK, WKB_GEOMETRYCOLLECTION, WKB_LINESTRING, WKB_MULTICURVE,
    WKB_MULTILINESTRING, WKB_MULTIPOINT, WKB_MULTIPOLYGON, WKB_MULTISURFACE, WKB_M_FLAG,
    WKB_POINT, WKB_POLYGON, WKB_POLYHEDRALSURFACE, WKB_SRID_FLAG, WKB_SURFACE, WKB_TIN,
    WKB_TRIANGLE, WKB_TYPE_MASK, WKB_Z_FLAG,
};
use crate::error::{GeomError, Result};
use crate::geometry::{clamp_srid, Geometry, GeometryType, PointArray, SRID_UNKNOWN};

const WKB_DOUBLE_SIZE: usize = 8;
const WKB_INT_SIZE: usize = 4;
/// Largest point count accepted for a single array.
const MAX_POINTS: u32 = u32::MAX / WKB_DOUBLE_SIZE as u32 / 4;

const SIZE_MISMATCH: &str = "WKB structure does not match expected size!";

fn type_from_code(code: u32) -> Result<GeometryType> {
    Ok(match code {
        WKB_POINT => GeometryType::Point,
        WKB_LINESTRING => GeometryType::Line,
        WKB_POLYGON => GeometryType::Polygon,
        WKB_MULTIPOINT => GeometryType::MultiPoint,
        WKB_MULTILINESTRING => GeometryType::MultiLine,
        WKB_MULTIPOLYGON => GeometryType::MultiPolygon,
        WKB_GEOMETRYCOLLECTION => GeometryType::GeometryCollection,
        WKB_CIRCULARSTRING => GeometryType::CircularString,
        WKB_COMPOUNDCURVE => GeometryType::CompoundCurve,
        WKB_CURVEPOLYGON | WKB_CURVE => GeometryType::CurvePolygon,
        WKB_MULTICURVE | WKB_SURFACE => GeometryType::MultiCurve,
        WKB_MULTISURFACE => GeometryType::MultiSurface,
        WKB_POLYHEDRALSURFACE => GeometryType::PolyhedralSurface,
        WKB_TIN => GeometryType::Tin,
        WKB_TRIANGLE => GeometryType::Triangle,
        _ => return Err(GeomError::UnknownWkbType(code)),
    })
}

/// Cursor over one buffer plus the header of the node being read.
struct ParseState<'a> {
    wkb: &'a [u8],
    pos: usize,
    little_endian: bool,
    check: ParserCheck,
    srid: i32,
    has_z: bool,
    has_m: bool,
    ty: GeometryType,
    depth: u32,
}

impl<'a> ParseState<'a> {
    fn new(wkb: &'a [u8], check: ParserCheck) -> Self {
        Self {
            wkb,
            pos: 0,
            little_endian: true,
            check,
            srid: SRID_UNKNOWN,
            has_z: false,
            has_m: false,
            ty: GeometryType::Point,
            depth: 1,
        }
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8]> {
        let end = self
            .pos
            .checked_add(n)
            .filter(|&end| end <= self.wkb.len())
            .ok_or(GeomError::InvalidWkb(SIZE_MISMATCH))?;
        let out = &self.wkb[self.pos..end];
        self.pos = end;
        Ok(out)
    }

    fn read_u8(&mut self) -> Result<u8> {
        Ok(self.take(1)?[0])
    }

    fn read_u32(&mut self) -> Result<u32> {
        let b = self.take(WKB_INT_SIZE)?;
        let bytes = [b[0], b[1], b[2], b[3]];
        Ok(if self.little_endian {
            u32::from_le_bytes(bytes)
        } else {
            u32::from_be_bytes(bytes)
        })
    }

    fn read_i32(&mut self) -> Result<i32> {
        let b = self.take(WKB_INT_SIZE)?;
        let bytes = [b[0], b[1], b[2], b[3]];
        Ok(if self.little_endian {
            i32::from_le_bytes(bytes)
        } else {
            i32::from_be_bytes(bytes)
        })
    }

    /// Read `npoints` tuples of the current dimensionality.
    fn read_points(&mut self, npoints: u32) -> Result<PointArray> {
        if npoints > MAX_POINTS {
            return Err(GeomError::InvalidWkb("point array length is too large"));
        }
        let dims = 2 + usize::from(self.has_z) + usize::from(self.has_m);
        let size = (npoints as usize)
            .checked_mul(dims * WKB_DOUBLE_SIZE)
            .ok_or(GeomError::InvalidWkb(SIZE_MISMATCH))?;
        let raw = self.take(size)?;

        let decode: fn([u8; 8]) -> f64 = if self.little_endian {
            f64::from_le_bytes
        } else {
            f64::from_be_bytes
        };
        let ordinates = raw
            .chunks_exact(WKB_DOUBLE_SIZE)
            .map(|c| {
                let mut b = [0u8; 8];
                b.copy_from_slice(c);
                decode(b)
            })
            .collect();
        PointArray::from_ordinates(self.has_z, self.has_m, ordinates)
    }

    fn read_point_array(&mut self) -> Result<PointArray> {
        let npoints = self.read_u32()?;
        self.read_points(npoints)
    }

    /// Counts come from untrusted input; never reserve more than the buffer could hold.
    fn capacity_for(&self, count: u32, min_item_size: usize) -> usize {
        let remaining = (self.wkb.len() - self.pos) / min_item_size;
        (count as usize).min(remaining)
    }

    fn empty(&self) -> Geometry {
        let mut g = Geometry::empty(self.ty, self.has_z, self.has_m);
        g.set_node_srid(self.srid);
        g
    }

    fn finish(&self, mut g: Geometry) -> Geometry {
        g.set_node_srid(self.srid);
        g
    }

    // ── Header ────────────────────────────────────────────────────────────────

    fn read_header(&mut self) -> Result<()> {
        self.little_endian = match self.read_u8()? {
            0 => false,
            1 => true,
            _ => return Err(GeomError::InvalidWkb("Invalid endian flag value encountered.")),
        };

        let raw = self.read_u32()?;
        self.has_z = false;
        self.has_m = false;
        let mut has_srid = false;
        if raw & WKB_FLAG_MASK != 0 {
            self.has_z = raw & WKB_Z_FLAG != 0;
            self.has_m = raw & WKB_M_FLAG != 0;
            has_srid = raw & WKB_SRID_FLAG != 0;
        }

        let code = raw & WKB_TYPE_MASK;
        if code >= 4000 {
            return Err(GeomError::UnknownWkbType(code));
        }
        if code >= 3000 {
            self.has_z = true;
            self.has_m = true;
        } else if code >= 2000 {
            self.has_m = true;
        } else if code >= 1000 {
            self.has_z = true;
        }
        self.ty = type_from_code(code % 1000)?;

        if has_srid {
            self.srid = clamp_srid(self.read_i32()?);
        }
        Ok(())
    }

    // ── Nodes ─────────────────────────────────────────────────────────────────

    fn read_geometry(&mut self) -> Result<Geometry> {
        self.read_header()?;
        match self.ty {
            GeometryType::Point => self.read_point(),
            GeometryType::Line => self.read_line(),
            GeometryType::CircularString => self.read_circular_string(),
            GeometryType::Polygon => self.read_polygon(),
            GeometryType::Triangle => self.read_triangle(),
            GeometryType::CurvePolygon => self.read_curve_polygon(),
            _ => self.read_collection(),
        }
    }

    fn read_point(&mut self) -> Result<Geometry> {
        let pa = self.read_points(1)?;
        let c = pa.coord(0);
        if c.x.is_nan() && c.y.is_nan() {
            return Ok(self.empty());
        }
        Ok(self.finish(Geometry::point_from_array(pa)?))
    }

    fn read_line(&mut self) -> Result<Geometry> {
        let pa = self.read_point_array()?;
        if pa.is_empty() {
            return Ok(self.empty());
        }
        if self.check.contains(ParserCheck::MINPOINTS) && pa.len() < 2 {
            return Err(GeomError::InvalidWkb("LineString must have at least two points"));
        }
        Ok(self.finish(Geometry::line(pa)))
    }

    fn read_circular_string(&mut self) -> Result<Geometry> {
        let pa = self.read_point_array()?;
        if pa.is_empty() {
            return Ok(self.empty());
        }
        if self.check.contains(ParserCheck::MINPOINTS) && pa.len() < 3 {
            return Err(GeomError::InvalidWkb(
                "CircularString must have at least three points",
            ));
        }
        if self.check.contains(ParserCheck::ODD) && pa.len() % 2 == 0 {
            return Err(GeomError::InvalidWkb(
                "CircularString must have an odd number of points",
            ));
        }
        Ok(self.finish(Geometry::circular_string(pa)))
    }

    fn check_ring(&self, ring: &PointArray, what: &'static str) -> Result<()> {
        if self.check.contains(ParserCheck::MINPOINTS) && ring.len() < 4 {
            return Err(GeomError::InvalidWkb(what));
        }
        if self.check.contains(ParserCheck::CLOSURE) && !ring.is_closed_2d() {
            return Err(GeomError::InvalidWkb("geometry must have closed rings"));
        }
        if self.check.contains(ParserCheck::ZCLOSURE) && !ring.is_closed_3d() {
            return Err(GeomError::InvalidWkb("geometry must have closed rings"));
        }
        Ok(())
    }

    fn read_polygon(&mut self) -> Result<Geometry> {
        let nrings = self.read_u32()?;
        if nrings == 0 {
            return Ok(self.empty());
        }
        let mut rings = Vec::with_capacity(self.capacity_for(nrings, WKB_INT_SIZE));
        for _ in 0..nrings {
            let ring = self.read_point_array()?;
            self.check_ring(&ring, "Polygon must have at least four points in each ring")?;
            rings.push(ring);
        }
        Ok(self.finish(Geometry::polygon(rings)))
    }

    fn read_triangle(&mut self) -> Result<Geometry> {
        let nrings = self.read_u32()?;
        if nrings == 0 {
            return Ok(self.empty());
        }
        if nrings != 1 {
            return Err(GeomError::InvalidWkb("Triangle has wrong number of rings"));
        }
        let ring = self.read_point_array()?;
        if ring.is_empty() {
            return Ok(self.empty());
        }
        self.check_ring(&ring, "Triangle must have at least four points")?;
        Ok(self.finish(Geometry::triangle(ring)))
    }

    fn read_curve_polygon(&mut self) -> Result<Geometry> {
        let nrings = self.read_u32()?;
        let mut cp = self.empty();
        for _ in 0..nrings {
            let ring = self.read_geometry()?;
            cp.add_child(ring)?;
        }
        Ok(cp)
    }

    fn read_collection(&mut self) -> Result<Geometry> {
        let ngeoms = self.read_u32()?;
        let mut col = self.empty();
        if ngeoms == 0 {
            return Ok(col);
        }

        self.depth += 1;
        if self.depth >= MAX_PARSE_DEPTH {
            return Err(GeomError::InvalidWkb("Geometry has too many chained collections"));
        }

        let saved_check = self.check;
        if self.ty == GeometryType::PolyhedralSurface {
            self.check = self.check | ParserCheck::ZCLOSURE;
        }
        for _ in 0..ngeoms {
            let child = self.read_geometry()?;
            col.add_child(child)?;
        }
        self.check = saved_check;
        self.depth -= 1;
        Ok(col)
    }
}

/// Decode one geometry from `bytes`, applying `check`.
///
/// Trailing bytes after the geometry are ignored. Any structural problem
/// aborts the whole decode.
///
/// # Example
///
/// ```
/// use geomeasure_core::geometry::GeometryType;
/// use geomeasure_core::wkb::{decode, ParserCheck};
///
/// // little-endian POINT(1 2)
/// let mut wkb = vec![0x01, 0x01, 0x00, 0x00, 0x00];
/// wkb.extend_from_slice(&1.0f64.to_le_bytes());
/// wkb.extend_from_slice(&2.0f64.to_le_bytes());
///
/// let g = decode(&wkb, ParserCheck::ALL).unwrap();
/// assert_eq!(g.geometry_type(), GeometryType::Point);
/// assert!(decode(&wkb[..20], ParserCheck::ALL).is_err());
/// ```
pub fn decode(bytes: &[u8], check: ParserCheck) -> Result<Geometry> {
    let mut state = ParseState::new(bytes, check);
    state.read_geometry().inspect_err(|e| {
        log::debug!("rejected {} byte WKB at offset {}: {e}", bytes.len(), state.pos);
    })
}

impl Geometry {
    /// Decode WKB or extended WKB.
    pub fn from_wkb(bytes: &[u8], check: ParserCheck) -> Result<Geometry> {
        decode(bytes, check)
    }

    /// Decode hex-encoded WKB.
    ///
    /// # Example
    ///
    /// ```
    /// use geomeasure_core::geometry::Geometry;
    /// use geomeasure_core::wkb::ParserCheck;
    ///
    /// let g = Geometry::from_hex_wkb(
    ///     "0101000020E6100000000000000000F03F0000000000000040",
    ///     ParserCheck::ALL,
    /// )
    /// .unwrap();
    /// assert_eq!(g.srid(), 4326);
    /// ```
    pub fn from_hex_wkb(hex: &str, check: ParserCheck) -> Result<Geometry> {
        decode(&decode_hex(hex)?, check)
    }
}
