//! In-memory geometry model.
//!
//! A [`Geometry`] is a tree: leaves hold [`PointArray`]s, polygons own their
//! rings, curve polygons own ring geometries and collections own their
//! children. Every node carries its own SRID, flags and optional cached box.

mod gbox;
mod introspection;
mod point_array;

pub use gbox::GBox;
pub use point_array::PointArray;

use std::ops::BitOr;

use geo::Coord;

use crate::error::{GeomError, Result};

// ── SRID limits ───────────────────────────────────────────────────────────────
pub const SRID_UNKNOWN: i32 = 0;
pub const SRID_MAXIMUM: i32 = 999_999;
pub const SRID_USER_MAXIMUM: i32 = 998_999;

/// Fold an arbitrary SRID into the valid range.
///
/// Non-positive values become [`SRID_UNKNOWN`]; values above
/// [`SRID_MAXIMUM`] are wrapped into the reserved range above
/// [`SRID_USER_MAXIMUM`].
///
/// # Example
///
/// ```
/// use geomeasure_core::geometry::{clamp_srid, SRID_UNKNOWN};
///
/// assert_eq!(clamp_srid(4326), 4326);
/// assert_eq!(clamp_srid(-1), SRID_UNKNOWN);
/// assert_eq!(clamp_srid(1_000_000), 999_001);
/// ```
pub fn clamp_srid(srid: i32) -> i32 {
    if srid <= 0 {
        if srid != SRID_UNKNOWN {
            log::warn!("SRID value {srid} converted to the unknown SRID value {SRID_UNKNOWN}");
        }
        SRID_UNKNOWN
    } else if srid > SRID_MAXIMUM {
        let clamped = SRID_USER_MAXIMUM + 1 + (srid % (SRID_MAXIMUM - SRID_USER_MAXIMUM - 1));
        log::warn!("SRID value {srid} > {SRID_MAXIMUM} converted to {clamped}");
        clamped
    } else {
        srid
    }
}

// ── Flags ─────────────────────────────────────────────────────────────────────

/// Per-node bit set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Flags(u8);

impl Flags {
    pub const NONE: Flags = Flags(0);
    pub const Z: Flags = Flags(0x01);
    pub const M: Flags = Flags(0x02);
    pub const BBOX: Flags = Flags(0x04);
    pub const GEODETIC: Flags = Flags(0x08);
    pub const READONLY: Flags = Flags(0x10);
    pub const SOLID: Flags = Flags(0x20);

    pub fn from_dims(has_z: bool, has_m: bool) -> Self {
        let mut f = Flags::NONE;
        f.set(Flags::Z, has_z);
        f.set(Flags::M, has_m);
        f
    }

    pub fn contains(self, other: Flags) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn set(&mut self, other: Flags, on: bool) {
        if on {
            self.0 |= other.0;
        } else {
            self.0 &= !other.0;
        }
    }

    pub fn bits(self) -> u8 {
        self.0
    }
}

impl BitOr for Flags {
    type Output = Flags;

    fn bitor(self, rhs: Flags) -> Flags {
        Flags(self.0 | rhs.0)
    }
}

// ── Geometry kinds ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GeometryType {
    Point,
    Line,
    Polygon,
    MultiPoint,
    MultiLine,
    MultiPolygon,
    GeometryCollection,
    CircularString,
    CompoundCurve,
    CurvePolygon,
    MultiCurve,
    MultiSurface,
    PolyhedralSurface,
    Tin,
    Triangle,
}

impl GeometryType {
    /// Human-readable name.
    pub fn name(self) -> &'static str {
        match self {
            GeometryType::Point => "Point",
            GeometryType::Line => "LineString",
            GeometryType::Polygon => "Polygon",
            GeometryType::MultiPoint => "MultiPoint",
            GeometryType::MultiLine => "MultiLineString",
            GeometryType::MultiPolygon => "MultiPolygon",
            GeometryType::GeometryCollection => "GeometryCollection",
            GeometryType::CircularString => "CircularString",
            GeometryType::CompoundCurve => "CompoundCurve",
            GeometryType::CurvePolygon => "CurvePolygon",
            GeometryType::MultiCurve => "MultiCurve",
            GeometryType::MultiSurface => "MultiSurface",
            GeometryType::PolyhedralSurface => "PolyhedralSurface",
            GeometryType::Tin => "Tin",
            GeometryType::Triangle => "Triangle",
        }
    }

    /// True for kinds that own child geometries, curve polygons included.
    pub fn is_collection(self) -> bool {
        matches!(
            self,
            GeometryType::MultiPoint
                | GeometryType::MultiLine
                | GeometryType::MultiPolygon
                | GeometryType::GeometryCollection
                | GeometryType::CurvePolygon
                | GeometryType::CompoundCurve
                | GeometryType::MultiCurve
                | GeometryType::MultiSurface
                | GeometryType::PolyhedralSurface
                | GeometryType::Tin
        )
    }

    /// The homogeneous collection able to hold this kind.
    ///
    /// # Example
    ///
    /// ```
    /// use geomeasure_core::geometry::GeometryType;
    ///
    /// assert_eq!(GeometryType::Triangle.collection_type(), GeometryType::Tin);
    /// assert_eq!(GeometryType::MultiPoint.collection_type(), GeometryType::GeometryCollection);
    /// ```
    pub fn collection_type(self) -> GeometryType {
        match self {
            GeometryType::Point => GeometryType::MultiPoint,
            GeometryType::Line => GeometryType::MultiLine,
            GeometryType::Polygon => GeometryType::MultiPolygon,
            GeometryType::CircularString | GeometryType::CompoundCurve => GeometryType::MultiCurve,
            GeometryType::CurvePolygon => GeometryType::MultiSurface,
            GeometryType::Triangle => GeometryType::Tin,
            _ => GeometryType::GeometryCollection,
        }
    }
}

/// Kinds whose payload is an ordered list of child geometries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollectionKind {
    MultiPoint,
    MultiLine,
    MultiPolygon,
    CompoundCurve,
    MultiCurve,
    MultiSurface,
    PolyhedralSurface,
    Tin,
    GeometryCollection,
}

impl CollectionKind {
    pub fn geometry_type(self) -> GeometryType {
        match self {
            CollectionKind::MultiPoint => GeometryType::MultiPoint,
            CollectionKind::MultiLine => GeometryType::MultiLine,
            CollectionKind::MultiPolygon => GeometryType::MultiPolygon,
            CollectionKind::CompoundCurve => GeometryType::CompoundCurve,
            CollectionKind::MultiCurve => GeometryType::MultiCurve,
            CollectionKind::MultiSurface => GeometryType::MultiSurface,
            CollectionKind::PolyhedralSurface => GeometryType::PolyhedralSurface,
            CollectionKind::Tin => GeometryType::Tin,
            CollectionKind::GeometryCollection => GeometryType::GeometryCollection,
        }
    }

    /// Whether a child of kind `child` may be stored in this collection.
    pub fn allows(self, child: GeometryType) -> bool {
        use GeometryType as T;
        match self {
            CollectionKind::GeometryCollection => true,
            CollectionKind::MultiPoint => child == T::Point,
            CollectionKind::MultiLine => child == T::Line,
            CollectionKind::MultiPolygon => child == T::Polygon,
            CollectionKind::CompoundCurve => matches!(child, T::Line | T::CircularString),
            CollectionKind::MultiCurve => {
                matches!(child, T::Line | T::CircularString | T::CompoundCurve)
            }
            CollectionKind::MultiSurface => matches!(child, T::Polygon | T::CurvePolygon),
            CollectionKind::PolyhedralSurface => child == T::Polygon,
            CollectionKind::Tin => child == T::Triangle,
        }
    }
}

// ── Geometry ──────────────────────────────────────────────────────────────────

/// Variant payload of a [`Geometry`].
#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    /// Zero tuples for the empty point, otherwise exactly one.
    Point(PointArray),
    Line(PointArray),
    CircularString(PointArray),
    Triangle(PointArray),
    /// Shell first, then holes.
    Polygon(Vec<PointArray>),
    /// Ring geometries: Line, CircularString or CompoundCurve.
    CurvePolygon(Vec<Geometry>),
    Collection(CollectionKind, Vec<Geometry>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Geometry {
    srid: i32,
    flags: Flags,
    bbox: Option<GBox>,
    body: Body,
}

impl Geometry {
    fn from_body(body: Body, has_z: bool, has_m: bool) -> Self {
        Self {
            srid: SRID_UNKNOWN,
            flags: Flags::from_dims(has_z, has_m),
            bbox: None,
            body,
        }
    }

    /// A 2D point.
    ///
    /// # Example
    ///
    /// ```
    /// use geomeasure_core::geometry::{Geometry, GeometryType};
    ///
    /// let p = Geometry::point(1.0, 2.0);
    /// assert_eq!(p.geometry_type(), GeometryType::Point);
    /// assert!(!p.is_empty());
    /// ```
    pub fn point(x: f64, y: f64) -> Self {
        Self::from_body(Body::Point(PointArray::from_xy(&[(x, y)])), false, false)
    }

    /// A point from a zero- or one-tuple array.
    pub fn point_from_array(pa: PointArray) -> Result<Self> {
        if pa.len() > 1 {
            return Err(GeomError::InvalidInput(format!(
                "a point holds at most one tuple, got {}",
                pa.len()
            )));
        }
        let (z, m) = (pa.has_z(), pa.has_m());
        Ok(Self::from_body(Body::Point(pa), z, m))
    }

    pub fn line(pa: PointArray) -> Self {
        let (z, m) = (pa.has_z(), pa.has_m());
        Self::from_body(Body::Line(pa), z, m)
    }

    pub fn circular_string(pa: PointArray) -> Self {
        let (z, m) = (pa.has_z(), pa.has_m());
        Self::from_body(Body::CircularString(pa), z, m)
    }

    pub fn triangle(pa: PointArray) -> Self {
        let (z, m) = (pa.has_z(), pa.has_m());
        Self::from_body(Body::Triangle(pa), z, m)
    }

    /// A polygon from its rings; dimensionality follows the shell.
    pub fn polygon(rings: Vec<PointArray>) -> Self {
        let (z, m) = rings
            .first()
            .map(|r| (r.has_z(), r.has_m()))
            .unwrap_or((false, false));
        Self::from_body(Body::Polygon(rings), z, m)
    }

    /// A curve polygon; every ring must be a Line, CircularString or CompoundCurve.
    pub fn curve_polygon(rings: Vec<Geometry>) -> Result<Self> {
        let (z, m) = dims_of(&rings);
        let mut cp = Self::empty(GeometryType::CurvePolygon, z, m);
        for ring in rings {
            cp.add_child(ring)?;
        }
        Ok(cp)
    }

    /// A collection of `kind`; children must be allowed by the kind.
    ///
    /// # Example
    ///
    /// ```
    /// use geomeasure_core::geometry::{CollectionKind, Geometry};
    ///
    /// let mp = Geometry::collection(CollectionKind::MultiPoint, vec![Geometry::point(0.0, 0.0)]);
    /// assert!(mp.is_ok());
    ///
    /// let bad = Geometry::collection(CollectionKind::Tin, vec![Geometry::point(0.0, 0.0)]);
    /// assert!(bad.is_err());
    /// ```
    pub fn collection(kind: CollectionKind, children: Vec<Geometry>) -> Result<Self> {
        let (z, m) = dims_of(&children);
        let mut col = Self::empty(kind.geometry_type(), z, m);
        for child in children {
            col.add_child(child)?;
        }
        Ok(col)
    }

    /// The empty geometry of `ty`.
    pub fn empty(ty: GeometryType, has_z: bool, has_m: bool) -> Self {
        let pa = PointArray::new(has_z, has_m);
        let body = match ty {
            GeometryType::Point => Body::Point(pa),
            GeometryType::Line => Body::Line(pa),
            GeometryType::CircularString => Body::CircularString(pa),
            GeometryType::Triangle => Body::Triangle(pa),
            GeometryType::Polygon => Body::Polygon(Vec::new()),
            GeometryType::CurvePolygon => Body::CurvePolygon(Vec::new()),
            GeometryType::MultiPoint => Body::Collection(CollectionKind::MultiPoint, Vec::new()),
            GeometryType::MultiLine => Body::Collection(CollectionKind::MultiLine, Vec::new()),
            GeometryType::MultiPolygon => {
                Body::Collection(CollectionKind::MultiPolygon, Vec::new())
            }
            GeometryType::CompoundCurve => {
                Body::Collection(CollectionKind::CompoundCurve, Vec::new())
            }
            GeometryType::MultiCurve => Body::Collection(CollectionKind::MultiCurve, Vec::new()),
            GeometryType::MultiSurface => {
                Body::Collection(CollectionKind::MultiSurface, Vec::new())
            }
            GeometryType::PolyhedralSurface => {
                Body::Collection(CollectionKind::PolyhedralSurface, Vec::new())
            }
            GeometryType::Tin => Body::Collection(CollectionKind::Tin, Vec::new()),
            GeometryType::GeometryCollection => {
                Body::Collection(CollectionKind::GeometryCollection, Vec::new())
            }
        };
        Self::from_body(body, has_z, has_m)
    }

    /// Append a child to a collection or a ring to a curve polygon.
    pub fn add_child(&mut self, child: Geometry) -> Result<()> {
        let parent = self.geometry_type();
        let child_type = child.geometry_type();
        match &mut self.body {
            Body::Collection(kind, children) => {
                if !kind.allows(child_type) {
                    return Err(GeomError::InvalidSubtype {
                        parent: parent.name(),
                        child: child_type.name(),
                    });
                }
                children.push(child);
            }
            Body::CurvePolygon(rings) => {
                if !matches!(
                    child_type,
                    GeometryType::Line | GeometryType::CircularString | GeometryType::CompoundCurve
                ) {
                    return Err(GeomError::InvalidSubtype {
                        parent: parent.name(),
                        child: child_type.name(),
                    });
                }
                rings.push(child);
            }
            _ => return Err(GeomError::WrongType("collection")),
        }
        self.drop_bbox();
        Ok(())
    }

    /// Append a ring to a polygon.
    pub fn add_ring(&mut self, ring: PointArray) -> Result<()> {
        match &mut self.body {
            Body::Polygon(rings) => rings.push(ring),
            _ => return Err(GeomError::WrongType("Polygon")),
        }
        self.drop_bbox();
        Ok(())
    }

    pub fn geometry_type(&self) -> GeometryType {
        match &self.body {
            Body::Point(_) => GeometryType::Point,
            Body::Line(_) => GeometryType::Line,
            Body::CircularString(_) => GeometryType::CircularString,
            Body::Triangle(_) => GeometryType::Triangle,
            Body::Polygon(_) => GeometryType::Polygon,
            Body::CurvePolygon(_) => GeometryType::CurvePolygon,
            Body::Collection(kind, _) => kind.geometry_type(),
        }
    }

    pub fn body(&self) -> &Body {
        &self.body
    }

    pub fn into_body(self) -> Body {
        self.body
    }

    pub fn srid(&self) -> i32 {
        self.srid
    }

    pub fn has_srid(&self) -> bool {
        self.srid != SRID_UNKNOWN
    }

    /// Assign `srid` to this node and every descendant.
    pub fn set_srid(&mut self, srid: i32) {
        self.srid = srid;
        for child in self.children_mut() {
            child.set_srid(srid);
        }
    }

    pub fn with_srid(mut self, srid: i32) -> Self {
        self.set_srid(srid);
        self
    }

    /// Record the SRID on this node only, as read from the wire.
    pub(crate) fn set_node_srid(&mut self, srid: i32) {
        self.srid = srid;
    }

    pub fn flags(&self) -> Flags {
        self.flags
    }

    pub fn has_z(&self) -> bool {
        self.flags.contains(Flags::Z)
    }

    pub fn has_m(&self) -> bool {
        self.flags.contains(Flags::M)
    }

    pub fn is_geodetic(&self) -> bool {
        self.flags.contains(Flags::GEODETIC)
    }

    /// Mark coordinates as longitude/latitude; clears any cached box.
    pub fn set_geodetic(&mut self, geodetic: bool) {
        self.flags.set(Flags::GEODETIC, geodetic);
        self.drop_bbox();
        for child in self.children_mut() {
            child.set_geodetic(geodetic);
        }
    }

    pub fn set_solid(&mut self, solid: bool) {
        self.flags.set(Flags::SOLID, solid);
    }

    /// True when the geometry may own sub-geometries.
    pub fn is_collection(&self) -> bool {
        self.geometry_type().is_collection()
    }

    /// Child geometries of collections and curve polygons, empty otherwise.
    pub fn children(&self) -> &[Geometry] {
        match &self.body {
            Body::Collection(_, children) | Body::CurvePolygon(children) => children,
            _ => &[],
        }
    }

    fn children_mut(&mut self) -> &mut [Geometry] {
        match &mut self.body {
            Body::Collection(_, children) | Body::CurvePolygon(children) => children,
            _ => &mut [],
        }
    }

    /// The cached box, if one was added.
    pub fn bbox(&self) -> Option<&GBox> {
        self.bbox.as_ref()
    }

    fn drop_bbox(&mut self) {
        self.bbox = None;
        self.flags.set(Flags::BBOX, false);
    }

    /// Compute and cache the box; empty geometries never get one.
    pub fn add_bbox(&mut self) {
        if self.bbox.is_some() {
            return;
        }
        if let Some(b) = self.calculate_bbox() {
            self.bbox = Some(b);
            self.flags.set(Flags::BBOX, true);
        }
    }

    /// First XY of the geometry in storage order.
    pub fn start_point(&self) -> Option<Coord<f64>> {
        match &self.body {
            Body::Point(pa) | Body::Line(pa) | Body::CircularString(pa) | Body::Triangle(pa) => {
                pa.first()
            }
            Body::Polygon(rings) => rings.first().and_then(PointArray::first),
            Body::CurvePolygon(children) | Body::Collection(_, children) => {
                children.first().and_then(Geometry::start_point)
            }
        }
    }

    /// Copy with Z and M dropped.
    pub fn force_2d(&self) -> Geometry {
        self.force_dims(false, false, 0.0, 0.0)
    }

    /// Copy with the requested dimensionality.
    pub fn force_dims(&self, has_z: bool, has_m: bool, zval: f64, mval: f64) -> Geometry {
        let force = |pa: &PointArray| pa.force_dims(has_z, has_m, zval, mval);
        let body = match &self.body {
            Body::Point(pa) => Body::Point(force(pa)),
            Body::Line(pa) => Body::Line(force(pa)),
            Body::CircularString(pa) => Body::CircularString(force(pa)),
            Body::Triangle(pa) => Body::Triangle(force(pa)),
            Body::Polygon(rings) => Body::Polygon(rings.iter().map(force).collect()),
            Body::CurvePolygon(rings) => Body::CurvePolygon(
                rings
                    .iter()
                    .map(|g| g.force_dims(has_z, has_m, zval, mval))
                    .collect(),
            ),
            Body::Collection(kind, children) => Body::Collection(
                *kind,
                children
                    .iter()
                    .map(|g| g.force_dims(has_z, has_m, zval, mval))
                    .collect(),
            ),
        };
        let mut out = Self::from_body(body, has_z, has_m);
        out.srid = self.srid;
        out.flags.set(Flags::GEODETIC, self.is_geodetic());
        out
    }
}

fn dims_of(children: &[Geometry]) -> (bool, bool) {
    children
        .first()
        .map(|g| (g.has_z(), g.has_m()))
        .unwrap_or((false, false))
}
