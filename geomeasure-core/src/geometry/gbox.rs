//! Axis-aligned bounding boxes.
//!
//! Cartesian boxes cover X/Y and, when present, Z and M. Geodetic boxes
//! are boxes on the unit sphere in geocentric X/Y/Z, built from the
//! great-circle edges between longitude/latitude vertices.

use geo::Coord;

use super::{Body, Flags, Geometry, PointArray};
use crate::measures::primitives::{arc_center, point_in_arc};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GBox {
    pub flags: Flags,
    pub xmin: f64,
    pub xmax: f64,
    pub ymin: f64,
    pub ymax: f64,
    pub zmin: f64,
    pub zmax: f64,
    pub mmin: f64,
    pub mmax: f64,
}

impl GBox {
    /// An inverted box that any point will grow.
    pub fn new(flags: Flags) -> Self {
        Self {
            flags,
            xmin: f64::INFINITY,
            xmax: f64::NEG_INFINITY,
            ymin: f64::INFINITY,
            ymax: f64::NEG_INFINITY,
            zmin: f64::INFINITY,
            zmax: f64::NEG_INFINITY,
            mmin: f64::INFINITY,
            mmax: f64::NEG_INFINITY,
        }
    }

    /// Degenerate box on a single XY position.
    pub fn from_coord(c: Coord<f64>) -> Self {
        let mut b = GBox::new(Flags::NONE);
        b.expand_xy(c);
        b
    }

    pub fn is_geodetic(&self) -> bool {
        self.flags.contains(Flags::GEODETIC)
    }

    fn is_inverted(&self) -> bool {
        self.xmin > self.xmax
    }

    pub fn expand_xy(&mut self, c: Coord<f64>) {
        self.xmin = self.xmin.min(c.x);
        self.xmax = self.xmax.max(c.x);
        self.ymin = self.ymin.min(c.y);
        self.ymax = self.ymax.max(c.y);
    }

    fn expand_z(&mut self, z: f64) {
        self.zmin = self.zmin.min(z);
        self.zmax = self.zmax.max(z);
    }

    fn expand_m(&mut self, m: f64) {
        self.mmin = self.mmin.min(m);
        self.mmax = self.mmax.max(m);
    }

    fn expand_xyz(&mut self, p: [f64; 3]) {
        self.expand_xy(Coord { x: p[0], y: p[1] });
        self.expand_z(p[2]);
    }

    /// Grow to cover `other`.
    pub fn merge(&mut self, other: &GBox) {
        self.xmin = self.xmin.min(other.xmin);
        self.xmax = self.xmax.max(other.xmax);
        self.ymin = self.ymin.min(other.ymin);
        self.ymax = self.ymax.max(other.ymax);
        self.zmin = self.zmin.min(other.zmin);
        self.zmax = self.zmax.max(other.zmax);
        self.mmin = self.mmin.min(other.mmin);
        self.mmax = self.mmax.max(other.mmax);
    }

    /// XY intervals intersect, touching included.
    pub fn overlaps_2d(&self, other: &GBox) -> bool {
        !(self.xmax < other.xmin
            || self.xmin > other.xmax
            || self.ymax < other.ymin
            || self.ymin > other.ymax)
    }

    /// Planar gap between the XY extents, zero when they overlap.
    ///
    /// # Example
    ///
    /// ```
    /// use geo::Coord;
    /// use geomeasure_core::geometry::GBox;
    ///
    /// let a = GBox::from_coord(Coord { x: 0.0, y: 0.0 });
    /// let b = GBox::from_coord(Coord { x: 3.0, y: 4.0 });
    /// assert_eq!(a.distance_2d(&b), 5.0);
    /// ```
    pub fn distance_2d(&self, other: &GBox) -> f64 {
        let dx = (other.xmin - self.xmax).max(self.xmin - other.xmax).max(0.0);
        let dy = (other.ymin - self.ymax).max(self.ymin - other.ymax).max(0.0);
        dx.hypot(dy)
    }

    pub fn center(&self) -> Coord<f64> {
        Coord {
            x: (self.xmin + self.xmax) / 2.0,
            y: (self.ymin + self.ymax) / 2.0,
        }
    }
}

impl Geometry {
    /// Compute the box from coordinates, ignoring any cached one.
    ///
    /// Returns `None` for empty geometries. The geodetic flag selects the
    /// geocentric calculator.
    ///
    /// # Example
    ///
    /// ```
    /// use geomeasure_core::geometry::{Geometry, PointArray};
    ///
    /// let arc = Geometry::circular_string(PointArray::from_xy(&[(-1.0, 0.0), (0.0, 1.0), (1.0, 0.0)]));
    /// let b = arc.calculate_bbox().unwrap();
    /// assert_eq!((b.xmin, b.xmax, b.ymin, b.ymax), (-1.0, 1.0, 0.0, 1.0));
    /// ```
    pub fn calculate_bbox(&self) -> Option<GBox> {
        if self.is_empty() {
            return None;
        }
        let mut flags = self.flags;
        flags.set(Flags::BBOX, false);
        let mut b = GBox::new(flags);
        if self.is_geodetic() {
            self.extend_geodetic(&mut b);
        } else {
            self.extend_cartesian(&mut b);
        }
        (!b.is_inverted()).then_some(b)
    }

    fn extend_cartesian(&self, b: &mut GBox) {
        match &self.body {
            Body::Point(pa) | Body::Line(pa) | Body::Triangle(pa) => extend_ptarray(b, pa),
            Body::CircularString(pa) => extend_ptarray_arc(b, pa),
            Body::Polygon(rings) => {
                // holes lie inside the shell
                if let Some(shell) = rings.first() {
                    extend_ptarray(b, shell);
                }
            }
            Body::CurvePolygon(children) | Body::Collection(_, children) => {
                for child in children {
                    child.extend_cartesian(b);
                }
            }
        }
    }

    fn extend_geodetic(&self, b: &mut GBox) {
        match &self.body {
            Body::Point(pa) | Body::Line(pa) | Body::Triangle(pa) | Body::CircularString(pa) => {
                extend_ptarray_geodetic(b, pa)
            }
            Body::Polygon(rings) => {
                for ring in rings {
                    extend_ptarray_geodetic(b, ring);
                }
            }
            Body::CurvePolygon(children) | Body::Collection(_, children) => {
                for child in children {
                    child.extend_geodetic(b);
                }
            }
        }
    }
}

fn extend_zm(b: &mut GBox, pa: &PointArray) {
    for i in 0..pa.len() {
        if let Some(z) = pa.z(i) {
            b.expand_z(z);
        }
        if let Some(m) = pa.m(i) {
            b.expand_m(m);
        }
    }
}

fn extend_ptarray(b: &mut GBox, pa: &PointArray) {
    for c in pa.coords() {
        b.expand_xy(c);
    }
    extend_zm(b, pa);
}

/// Arcs bulge past their control points: add every circle extreme the arc sweeps through.
fn extend_ptarray_arc(b: &mut GBox, pa: &PointArray) {
    extend_zm(b, pa);
    if pa.len() < 3 {
        for c in pa.coords() {
            b.expand_xy(c);
        }
        return;
    }
    let mut i = 2;
    while i < pa.len() {
        let (a1, a2, a3) = (pa.coord(i - 2), pa.coord(i - 1), pa.coord(i));
        b.expand_xy(a1);
        b.expand_xy(a3);
        match arc_center(a1, a2, a3) {
            None => {}
            Some((c, r)) => {
                let extremes = [
                    Coord { x: c.x + r, y: c.y },
                    Coord { x: c.x - r, y: c.y },
                    Coord { x: c.x, y: c.y + r },
                    Coord { x: c.x, y: c.y - r },
                ];
                for e in extremes {
                    if point_in_arc(e, a1, a2, a3) {
                        b.expand_xy(e);
                    }
                }
            }
        }
        i += 2;
    }
    // a trailing even vertex still belongs to the geometry
    if pa.len() % 2 == 0 {
        b.expand_xy(pa.coord(pa.len() - 1));
    }
}

fn geocentric(c: Coord<f64>) -> [f64; 3] {
    let (lon, lat) = (c.x.to_radians(), c.y.to_radians());
    [lat.cos() * lon.cos(), lat.cos() * lon.sin(), lat.sin()]
}

fn cross(a: [f64; 3], b: [f64; 3]) -> [f64; 3] {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

fn dot(a: [f64; 3], b: [f64; 3]) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

fn normalize(a: [f64; 3]) -> Option<[f64; 3]> {
    let len = dot(a, a).sqrt();
    (len > 1e-15).then(|| [a[0] / len, a[1] / len, a[2] / len])
}

/// Box of the minor great-circle arc from `a` to `c`.
fn extend_edge_geodetic(b: &mut GBox, a: [f64; 3], c: [f64; 3]) {
    b.expand_xyz(a);
    b.expand_xyz(c);
    // coincident or antipodal ends leave the plane undefined
    let Some(n) = normalize(cross(a, c)) else {
        return;
    };
    for axis in 0..3 {
        for sign in [1.0, -1.0] {
            let mut d = [0.0; 3];
            d[axis] = sign;
            let k = dot(d, n);
            let Some(p) = normalize([d[0] - k * n[0], d[1] - k * n[1], d[2] - k * n[2]]) else {
                continue;
            };
            if dot(cross(a, p), n) >= 0.0 && dot(cross(p, c), n) >= 0.0 {
                b.expand_xyz(p);
            }
        }
    }
}

fn extend_ptarray_geodetic(b: &mut GBox, pa: &PointArray) {
    let pts: Vec<[f64; 3]> = pa.coords().map(geocentric).collect();
    match pts.as_slice() {
        [] => {}
        [only] => b.expand_xyz(*only),
        _ => {
            for w in pts.windows(2) {
                extend_edge_geodetic(b, w[0], w[1]);
            }
        }
    }
}
