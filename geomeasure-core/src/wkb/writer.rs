//! WKB encoder for every geometry kind.

use super::{
    encode_hex, WKB_CIRCULARSTRING, WKB_COMPOUNDCURVE, WKB_CURVEPOLYGON, WKB_GEOMETRYCOLLECTION,
    WKB_LINESTRING, WKB_MULTICURVE, WKB_MULTILINESTRING, WKB_MULTIPOINT, WKB_MULTIPOLYGON,
    WKB_MULTISURFACE, WKB_M_FLAG, WKB_POINT, WKB_POLYGON, WKB_POLYHEDRALSURFACE, WKB_SRID_FLAG,
    WKB_TIN, WKB_TRIANGLE, WKB_Z_FLAG,
};
use crate::error::{GeomError, Result};
use crate::geometry::{Body, Geometry, GeometryType, PointArray};

/// How dimensions and SRID are encoded in the type word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WkbVariant {
    /// `kind + 1000*Z + 2000*M`, no SRID.
    Iso,
    /// High flag bits for Z and M, SRID on the outermost node when known.
    Extended,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteOrder {
    BigEndian,
    LittleEndian,
}

fn type_code(ty: GeometryType) -> u32 {
    match ty {
        GeometryType::Point => WKB_POINT,
        GeometryType::Line => WKB_LINESTRING,
        GeometryType::Polygon => WKB_POLYGON,
        GeometryType::MultiPoint => WKB_MULTIPOINT,
        GeometryType::MultiLine => WKB_MULTILINESTRING,
        GeometryType::MultiPolygon => WKB_MULTIPOLYGON,
        GeometryType::GeometryCollection => WKB_GEOMETRYCOLLECTION,
        GeometryType::CircularString => WKB_CIRCULARSTRING,
        GeometryType::CompoundCurve => WKB_COMPOUNDCURVE,
        GeometryType::CurvePolygon => WKB_CURVEPOLYGON,
        GeometryType::MultiCurve => WKB_MULTICURVE,
        GeometryType::MultiSurface => WKB_MULTISURFACE,
        GeometryType::PolyhedralSurface => WKB_POLYHEDRALSURFACE,
        GeometryType::Tin => WKB_TIN,
        GeometryType::Triangle => WKB_TRIANGLE,
    }
}

struct Writer {
    out: Vec<u8>,
    variant: WkbVariant,
    order: ByteOrder,
}

impl Writer {
    fn u32(&mut self, v: u32) {
        match self.order {
            ByteOrder::LittleEndian => self.out.extend_from_slice(&v.to_le_bytes()),
            ByteOrder::BigEndian => self.out.extend_from_slice(&v.to_be_bytes()),
        }
    }

    fn i32(&mut self, v: i32) {
        match self.order {
            ByteOrder::LittleEndian => self.out.extend_from_slice(&v.to_le_bytes()),
            ByteOrder::BigEndian => self.out.extend_from_slice(&v.to_be_bytes()),
        }
    }

    fn f64(&mut self, v: f64) {
        match self.order {
            ByteOrder::LittleEndian => self.out.extend_from_slice(&v.to_le_bytes()),
            ByteOrder::BigEndian => self.out.extend_from_slice(&v.to_be_bytes()),
        }
    }

    fn count(&mut self, n: usize) -> Result<()> {
        let n = u32::try_from(n).map_err(|_| GeomError::InvalidWkb("element count exceeds u32"))?;
        self.u32(n);
        Ok(())
    }

    fn header(&mut self, g: &Geometry, outermost: bool) {
        self.out.push(match self.order {
            ByteOrder::BigEndian => 0x00,
            ByteOrder::LittleEndian => 0x01,
        });
        let base = type_code(g.geometry_type());
        let with_srid = outermost && g.has_srid() && self.variant == WkbVariant::Extended;
        let code = match self.variant {
            WkbVariant::Iso => {
                base + if g.has_z() { 1000 } else { 0 } + if g.has_m() { 2000 } else { 0 }
            }
            WkbVariant::Extended => {
                let mut code = base;
                if g.has_z() {
                    code |= WKB_Z_FLAG;
                }
                if g.has_m() {
                    code |= WKB_M_FLAG;
                }
                if with_srid {
                    code |= WKB_SRID_FLAG;
                }
                code
            }
        };
        self.u32(code);
        if with_srid {
            self.i32(g.srid());
        }
    }

    fn points(&mut self, pa: &PointArray) {
        for &v in pa.ordinates() {
            self.f64(v);
        }
    }

    fn point_array(&mut self, pa: &PointArray) -> Result<()> {
        self.count(pa.len())?;
        self.points(pa);
        Ok(())
    }

    fn geometry(&mut self, g: &Geometry, outermost: bool) -> Result<()> {
        self.header(g, outermost);
        match g.body() {
            Body::Point(pa) if pa.is_empty() => {
                let dims = 2 + usize::from(g.has_z()) + usize::from(g.has_m());
                for _ in 0..dims {
                    self.f64(f64::NAN);
                }
            }
            Body::Point(pa) => self.points(pa),
            Body::Line(pa) | Body::CircularString(pa) => self.point_array(pa)?,
            Body::Triangle(pa) if pa.is_empty() => self.u32(0),
            Body::Triangle(pa) => {
                self.u32(1);
                self.point_array(pa)?;
            }
            Body::Polygon(rings) => {
                self.count(rings.len())?;
                for ring in rings {
                    self.point_array(ring)?;
                }
            }
            Body::CurvePolygon(children) | Body::Collection(_, children) => {
                self.count(children.len())?;
                for child in children {
                    self.geometry(child, false)?;
                }
            }
        }
        Ok(())
    }
}

impl Geometry {
    /// Encode as WKB in the requested variant and byte order.
    ///
    /// Fails when an element count does not fit the format's `u32`.
    ///
    /// # Example
    ///
    /// ```
    /// use geomeasure_core::geometry::Geometry;
    /// use geomeasure_core::wkb::{decode, ByteOrder, ParserCheck, WkbVariant};
    ///
    /// let p = Geometry::point(1.0, 2.0).with_srid(4326);
    /// let ewkb = p.to_wkb(WkbVariant::Extended, ByteOrder::LittleEndian).unwrap();
    /// assert_eq!(ewkb.len(), 25);
    /// assert_eq!(decode(&ewkb, ParserCheck::ALL).unwrap(), p);
    ///
    /// let iso = p.to_wkb(WkbVariant::Iso, ByteOrder::BigEndian).unwrap();
    /// assert_eq!(iso.len(), 21);
    /// ```
    pub fn to_wkb(&self, variant: WkbVariant, order: ByteOrder) -> Result<Vec<u8>> {
        let mut w = Writer {
            out: Vec::new(),
            variant,
            order,
        };
        w.geometry(self, true)?;
        Ok(w.out)
    }

    /// Upper-case hex rendering of [`to_wkb`](Self::to_wkb).
    pub fn to_hex_wkb(&self, variant: WkbVariant, order: ByteOrder) -> Result<String> {
        Ok(encode_hex(&self.to_wkb(variant, order)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::CollectionKind;
    use crate::wkb::{decode, ParserCheck};

    #[test]
    fn hex_of_little_endian_point() {
        let p = Geometry::point(1.0, 2.0);
        assert_eq!(
            p.to_hex_wkb(WkbVariant::Iso, ByteOrder::LittleEndian).unwrap(),
            "0101000000000000000000F03F0000000000000040"
        );
    }

    #[test]
    fn iso_type_codes_carry_dimensions() {
        let pa = PointArray::from_ordinates(true, true, vec![1.0, 2.0, 3.0, 4.0]).unwrap();
        let p = Geometry::point_from_array(pa).unwrap();
        let wkb = p.to_wkb(WkbVariant::Iso, ByteOrder::LittleEndian).unwrap();
        assert_eq!(u32::from_le_bytes([wkb[1], wkb[2], wkb[3], wkb[4]]), 3001);
    }

    #[test]
    fn only_outermost_node_carries_srid() {
        let gc = Geometry::collection(
            CollectionKind::GeometryCollection,
            vec![Geometry::point(0.0, 0.0)],
        )
        .unwrap()
        .with_srid(4326);
        let wkb = gc.to_wkb(WkbVariant::Extended, ByteOrder::BigEndian).unwrap();
        // header(5) + srid(4) + count(4), then the child header
        let child = u32::from_be_bytes([wkb[14], wkb[15], wkb[16], wkb[17]]);
        assert_eq!(child, WKB_POINT);
    }

    #[test]
    fn empty_point_encodes_nan() {
        let empty = Geometry::empty(GeometryType::Point, false, false);
        let wkb = empty.to_wkb(WkbVariant::Iso, ByteOrder::LittleEndian).unwrap();
        assert_eq!(wkb.len(), 21);
        assert!(decode(&wkb, ParserCheck::ALL).unwrap().is_empty());
    }

    #[test]
    fn byte_orders_decode_to_the_same_tree() {
        let arc = Geometry::circular_string(PointArray::from_xy(&[(0.0, 0.0), (1.0, 1.0), (2.0, 0.0)]));
        let back = Geometry::line(PointArray::from_xy(&[(2.0, 0.0), (0.0, 0.0)]));
        let ring = Geometry::collection(CollectionKind::CompoundCurve, vec![arc, back]).unwrap();
        let cp = Geometry::curve_polygon(vec![ring]).unwrap();
        let ms = Geometry::collection(CollectionKind::MultiSurface, vec![cp]).unwrap();

        let le = decode(&ms.to_wkb(WkbVariant::Iso, ByteOrder::LittleEndian).unwrap(), ParserCheck::ALL);
        let be = decode(&ms.to_wkb(WkbVariant::Iso, ByteOrder::BigEndian).unwrap(), ParserCheck::ALL);
        assert_eq!(le.unwrap(), be.unwrap());
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn oversized_count_is_an_error() {
        let mut w = Writer {
            out: Vec::new(),
            variant: WkbVariant::Iso,
            order: ByteOrder::LittleEndian,
        };
        assert!(w.count(u32::MAX as usize).is_ok());
        assert!(matches!(
            w.count(u32::MAX as usize + 1),
            Err(GeomError::InvalidWkb(_))
        ));
        assert_eq!(w.out.len(), 4);
    }
}
