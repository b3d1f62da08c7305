//! Structural queries over [`Geometry`] trees.

use std::collections::HashMap;

use geo::Coord;

use super::{Body, CollectionKind, Geometry, PointArray};
use crate::measures::containment::{curve_ring_edges, ptarray_ring_edges, Edge};
use crate::measures::primitives::arc_sweep;

impl Geometry {
    /// True when the geometry has no coordinates at all.
    ///
    /// A polygon with an empty shell is empty regardless of its holes.
    ///
    /// # Example
    ///
    /// ```
    /// use geomeasure_core::geometry::{CollectionKind, Geometry, GeometryType};
    ///
    /// assert!(Geometry::empty(GeometryType::Polygon, false, false).is_empty());
    /// let gc = Geometry::collection(
    ///     CollectionKind::GeometryCollection,
    ///     vec![Geometry::empty(GeometryType::Point, false, false)],
    /// )
    /// .unwrap();
    /// assert!(gc.is_empty());
    /// ```
    pub fn is_empty(&self) -> bool {
        match self.body() {
            Body::Point(pa) | Body::Line(pa) | Body::CircularString(pa) | Body::Triangle(pa) => {
                pa.is_empty()
            }
            Body::Polygon(rings) => rings.first().is_none_or(PointArray::is_empty),
            Body::CurvePolygon(rings) => rings.first().is_none_or(Geometry::is_empty),
            Body::Collection(_, children) => children.iter().all(Geometry::is_empty),
        }
    }

    /// Total number of stored vertices.
    pub fn count_vertices(&self) -> usize {
        match self.body() {
            Body::Point(pa) | Body::Line(pa) | Body::CircularString(pa) | Body::Triangle(pa) => {
                pa.len()
            }
            Body::Polygon(rings) => rings.iter().map(PointArray::len).sum(),
            Body::CurvePolygon(children) | Body::Collection(_, children) => {
                children.iter().map(Geometry::count_vertices).sum()
            }
        }
    }

    /// Topological dimension: 0 for points, 1 for curves, 2 for surfaces.
    ///
    /// Closed polyhedral surfaces are solids and report 3.
    pub fn dimension(&self) -> u8 {
        match self.body() {
            Body::Point(_) => 0,
            Body::Line(_) | Body::CircularString(_) => 1,
            Body::Triangle(_) | Body::Polygon(_) | Body::CurvePolygon(_) => 2,
            Body::Collection(kind, children) => match kind {
                CollectionKind::MultiPoint => 0,
                CollectionKind::MultiLine | CollectionKind::CompoundCurve | CollectionKind::MultiCurve => 1,
                CollectionKind::MultiPolygon | CollectionKind::MultiSurface | CollectionKind::Tin => 2,
                CollectionKind::PolyhedralSurface => {
                    if self.is_closed() {
                        3
                    } else {
                        2
                    }
                }
                CollectionKind::GeometryCollection => {
                    children.iter().map(Geometry::dimension).max().unwrap_or(0)
                }
            },
        }
    }

    /// Whether the geometry is closed.
    ///
    /// Curves compare their end points (in 3D when Z is present); surfaces
    /// made of faces are closed when every edge is shared by exactly two faces.
    /// Empty geometries are never closed.
    ///
    /// # Example
    ///
    /// ```
    /// use geomeasure_core::geometry::{Geometry, PointArray};
    ///
    /// let ring = Geometry::line(PointArray::from_xy(&[(0.0, 0.0), (1.0, 0.0), (0.0, 1.0), (0.0, 0.0)]));
    /// assert!(ring.is_closed());
    /// let open = Geometry::line(PointArray::from_xy(&[(0.0, 0.0), (1.0, 0.0)]));
    /// assert!(!open.is_closed());
    /// ```
    pub fn is_closed(&self) -> bool {
        if self.is_empty() {
            return false;
        }
        let closed = |pa: &PointArray| {
            if self.has_z() {
                pa.is_closed_3d()
            } else {
                pa.is_closed_2d()
            }
        };
        match self.body() {
            Body::Line(pa) | Body::CircularString(pa) => closed(pa),
            Body::Polygon(rings) => rings.iter().all(closed),
            Body::Collection(CollectionKind::CompoundCurve, children) => {
                compound_is_closed(children, self.has_z())
            }
            Body::Collection(CollectionKind::PolyhedralSurface | CollectionKind::Tin, children) => {
                faces_are_closed(children, self.has_z())
            }
            Body::Collection(_, children) | Body::CurvePolygon(children) => {
                children.iter().all(Geometry::is_closed)
            }
            Body::Point(_) | Body::Triangle(_) => true,
        }
    }

    /// Whether a cached box would pay for itself.
    pub fn needs_bbox(&self) -> bool {
        match self.body() {
            Body::Point(_) => false,
            Body::Line(pa) => pa.len() > 2,
            _ => true,
        }
    }

    /// Planar area; curves and points have none.
    ///
    /// Circular ring edges contribute their exact circular segment.
    ///
    /// # Example
    ///
    /// ```
    /// use geomeasure_core::geometry::{Geometry, PointArray};
    ///
    /// let shell = PointArray::from_xy(&[(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0), (0.0, 0.0)]);
    /// let hole = PointArray::from_xy(&[(1.0, 1.0), (2.0, 1.0), (2.0, 2.0), (1.0, 2.0), (1.0, 1.0)]);
    /// assert_eq!(Geometry::polygon(vec![shell, hole]).area(), 15.0);
    /// ```
    pub fn area(&self) -> f64 {
        match self.body() {
            Body::Triangle(pa) => signed_area(&ptarray_ring_edges(pa)).abs(),
            Body::Polygon(rings) => rings_area(rings.iter().map(ptarray_ring_edges)),
            Body::CurvePolygon(rings) => rings_area(rings.iter().map(curve_ring_edges)),
            Body::Collection(_, children) => children.iter().map(Geometry::area).sum(),
            _ => 0.0,
        }
    }
}

fn compound_is_closed(children: &[Geometry], has_z: bool) -> bool {
    let first = children.first().and_then(first_tuple);
    let last = children.last().and_then(last_tuple);
    match (first, last) {
        (Some(a), Some(b)) => {
            let n = if has_z { 3 } else { 2 };
            a.iter()
                .zip(b.iter())
                .take(n)
                .all(|(x, y)| x.to_bits() == y.to_bits())
        }
        _ => false,
    }
}

fn first_tuple(g: &Geometry) -> Option<&[f64]> {
    match g.body() {
        Body::Line(pa) | Body::CircularString(pa) if !pa.is_empty() => Some(pa.tuple(0)),
        _ => None,
    }
}

fn last_tuple(g: &Geometry) -> Option<&[f64]> {
    match g.body() {
        Body::Line(pa) | Body::CircularString(pa) if !pa.is_empty() => Some(pa.tuple(pa.len() - 1)),
        _ => None,
    }
}

type VertexKey = [u64; 3];

fn vertex_key(pa: &PointArray, i: usize) -> VertexKey {
    let c = pa.coord(i);
    [c.x.to_bits(), c.y.to_bits(), pa.z(i).unwrap_or(0.0).to_bits()]
}

fn vertex_order(pa: &PointArray, i: usize) -> (f64, f64, f64) {
    let c = pa.coord(i);
    (c.x, c.y, pa.z(i).unwrap_or(0.0))
}

/// Every face edge, taken without direction, appears in exactly two faces.
fn faces_are_closed(faces: &[Geometry], has_z: bool) -> bool {
    if !has_z || faces.len() < 4 {
        return false;
    }
    let mut edges: HashMap<(VertexKey, VertexKey), u32> = HashMap::new();
    for face in faces {
        let shell = match face.body() {
            Body::Polygon(rings) => rings.first(),
            Body::Triangle(pa) => Some(pa),
            _ => None,
        };
        let Some(shell) = shell else {
            continue;
        };
        for j in 0..shell.len().saturating_sub(1) {
            let (a, b) = (vertex_order(shell, j), vertex_order(shell, j + 1));
            let forward = a.0.total_cmp(&b.0).then(a.1.total_cmp(&b.1)).then(a.2.total_cmp(&b.2));
            let key = if forward.is_le() {
                (vertex_key(shell, j), vertex_key(shell, j + 1))
            } else {
                (vertex_key(shell, j + 1), vertex_key(shell, j))
            };
            *edges.entry(key).or_default() += 1;
        }
    }
    !edges.is_empty() && edges.values().all(|&n| n == 2)
}

fn shoelace(a: Coord<f64>, b: Coord<f64>) -> f64 {
    a.x * b.y - b.x * a.y
}

/// Signed area of a closed edge ring, positive when counter-clockwise.
fn signed_area(edges: &[Edge]) -> f64 {
    let mut twice = 0.0;
    let mut segments = 0.0;
    for edge in edges {
        match *edge {
            Edge::Segment(a, b) => twice += shoelace(a, b),
            Edge::Arc(a1, a2, a3) => {
                twice += shoelace(a1, a3);
                if let Some(s) = arc_sweep(a1, a2, a3) {
                    let theta = s.sweep.abs();
                    let segment = s.radius * s.radius / 2.0 * (theta - theta.sin());
                    segments += segment.copysign(s.sweep);
                }
            }
        }
    }
    twice / 2.0 + segments
}

fn rings_area(mut rings: impl Iterator<Item = Vec<Edge>>) -> f64 {
    let Some(shell) = rings.next() else {
        return 0.0;
    };
    let holes: f64 = rings.map(|r| signed_area(&r).abs()).sum();
    signed_area(&shell).abs() - holes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::GeometryType;

    fn square_z(z: f64) -> PointArray {
        PointArray::from_ordinates(
            true,
            false,
            vec![0.0, 0.0, z, 1.0, 0.0, z, 1.0, 1.0, z, 0.0, 1.0, z, 0.0, 0.0, z],
        )
        .unwrap()
    }

    fn tetrahedron() -> Geometry {
        let p = [
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
            [0.0, 0.0, 1.0],
        ];
        let faces = [[0, 2, 1], [0, 1, 3], [1, 2, 3], [2, 0, 3]];
        let tris = faces
            .iter()
            .map(|f| {
                let mut ords = Vec::new();
                for &i in f.iter().chain(std::iter::once(&f[0])) {
                    ords.extend_from_slice(&p[i]);
                }
                Geometry::triangle(PointArray::from_ordinates(true, false, ords).unwrap())
            })
            .collect();
        Geometry::collection(CollectionKind::Tin, tris).unwrap()
    }

    #[test]
    fn polygon_with_empty_shell_is_empty() {
        let poly = Geometry::polygon(vec![PointArray::new(false, false), square_z(0.0)]);
        assert!(poly.is_empty());
        assert_eq!(poly.count_vertices(), 5);
    }

    #[test]
    fn closed_tin_is_solid() {
        let tin = tetrahedron();
        assert!(tin.is_closed());
        assert_eq!(tin.dimension(), 2);

        let mut open = Geometry::empty(GeometryType::Tin, true, false);
        for face in tin.children().iter().take(3) {
            open.add_child(face.clone()).unwrap();
        }
        assert!(!open.is_closed());
    }

    #[test]
    fn polyhedral_surface_dimension_follows_closure() {
        let tin = tetrahedron();
        let faces: Vec<Geometry> = tin
            .children()
            .iter()
            .map(|t| match t.body() {
                Body::Triangle(pa) => Geometry::polygon(vec![pa.clone()]),
                _ => unreachable!(),
            })
            .collect();
        let solid = Geometry::collection(CollectionKind::PolyhedralSurface, faces).unwrap();
        assert_eq!(solid.dimension(), 3);

        let flat = Geometry::collection(
            CollectionKind::PolyhedralSurface,
            vec![Geometry::polygon(vec![square_z(0.0)])],
        )
        .unwrap();
        assert_eq!(flat.dimension(), 2);
    }

    #[test]
    fn closure_checks_z() {
        let open = PointArray::from_ordinates(true, false, vec![0.0, 0.0, 0.0, 1.0, 1.0, 0.0, 0.0, 0.0, 1.0])
            .unwrap();
        assert!(!Geometry::line(open.clone()).is_closed());
        assert!(Geometry::line(open.force_2d()).is_closed());
    }

    #[test]
    fn compound_closure_uses_outer_ends() {
        let arc = Geometry::circular_string(PointArray::from_xy(&[(0.0, 0.0), (1.0, 1.0), (2.0, 0.0)]));
        let back = Geometry::line(PointArray::from_xy(&[(2.0, 0.0), (0.0, 0.0)]));
        let cc = Geometry::collection(CollectionKind::CompoundCurve, vec![arc, back]).unwrap();
        assert!(cc.is_closed());
        assert_eq!(cc.dimension(), 1);
        assert!(!Geometry::empty(GeometryType::CompoundCurve, false, false).is_closed());
    }

    #[test]
    fn needs_bbox_for_long_lines_only() {
        assert!(!Geometry::point(0.0, 0.0).needs_bbox());
        assert!(!Geometry::line(PointArray::from_xy(&[(0.0, 0.0), (1.0, 1.0)])).needs_bbox());
        assert!(Geometry::line(PointArray::from_xy(&[(0.0, 0.0), (1.0, 1.0), (2.0, 0.0)])).needs_bbox());
    }

    #[test]
    fn circle_area_is_exact() {
        let circle =
            Geometry::circular_string(PointArray::from_xy(&[(-1.0, 0.0), (1.0, 0.0), (-1.0, 0.0)]));
        let cp = Geometry::curve_polygon(vec![circle]).unwrap();
        assert!((cp.area() - std::f64::consts::PI).abs() < 1e-12);
    }

    #[test]
    fn half_disc_area_ignores_orientation() {
        let arc = Geometry::circular_string(PointArray::from_xy(&[(-1.0, 0.0), (0.0, 1.0), (1.0, 0.0)]));
        let chord = Geometry::line(PointArray::from_xy(&[(1.0, 0.0), (-1.0, 0.0)]));
        let ring = Geometry::collection(CollectionKind::CompoundCurve, vec![arc, chord]).unwrap();
        let cp = Geometry::curve_polygon(vec![ring]).unwrap();
        assert!((cp.area() - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
    }

    #[test]
    fn collection_dimension_is_max_of_children() {
        let gc = Geometry::collection(
            CollectionKind::GeometryCollection,
            vec![
                Geometry::point(0.0, 0.0),
                Geometry::line(PointArray::from_xy(&[(0.0, 0.0), (1.0, 1.0)])),
            ],
        )
        .unwrap();
        assert_eq!(gc.dimension(), 1);
        assert_eq!(gc.area(), 0.0);
    }
}
