//! Point-in-ring classification for straight and circular rings.
//!
//! Rings are walked as a list of [`Edge`]s and classified with a winding
//! number. Circular arcs are split at the top and bottom of their circle so
//! that each piece is monotone in Y and crosses a horizontal ray at most once.

use geo::Coord;
pub use geo::coordinate_position::CoordPos;

use super::primitives::{arc_sweep, point_in_arc, vertical_extreme_cuts, ArcSweep};
use crate::geometry::{Body, Geometry, PointArray};

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Edge {
    Segment(Coord<f64>, Coord<f64>),
    Arc(Coord<f64>, Coord<f64>, Coord<f64>),
}

impl Edge {
    fn start(&self) -> Coord<f64> {
        match *self {
            Edge::Segment(a, _) | Edge::Arc(a, _, _) => a,
        }
    }

    fn end(&self) -> Coord<f64> {
        match *self {
            Edge::Segment(_, b) | Edge::Arc(_, _, b) => b,
        }
    }
}

// ── Edge extraction ───────────────────────────────────────────────────────────

pub(crate) fn ptarray_edges(pa: &PointArray, edges: &mut Vec<Edge>) {
    let coords: Vec<_> = pa.coords().collect();
    edges.extend(coords.windows(2).map(|w| Edge::Segment(w[0], w[1])));
}

pub(crate) fn ptarray_arc_edges(pa: &PointArray, edges: &mut Vec<Edge>) {
    let mut i = 0;
    while i + 2 < pa.len() {
        edges.push(Edge::Arc(pa.coord(i), pa.coord(i + 1), pa.coord(i + 2)));
        i += 2;
    }
}

pub(crate) fn curve_edges(g: &Geometry, edges: &mut Vec<Edge>) {
    match g.body() {
        Body::Line(pa) => ptarray_edges(pa, edges),
        Body::CircularString(pa) => ptarray_arc_edges(pa, edges),
        Body::Collection(_, children) => {
            for child in children {
                curve_edges(child, edges);
            }
        }
        _ => {}
    }
}

/// Unclosed rings are treated as if their last point joined back to the first.
fn close(mut edges: Vec<Edge>) -> Vec<Edge> {
    if let (Some(first), Some(last)) = (edges.first(), edges.last()) {
        let (start, end) = (first.start(), last.end());
        if start != end {
            edges.push(Edge::Segment(end, start));
        }
    }
    edges
}

pub(crate) fn ptarray_ring_edges(pa: &PointArray) -> Vec<Edge> {
    let mut edges = Vec::with_capacity(pa.len());
    ptarray_edges(pa, &mut edges);
    close(edges)
}

pub(crate) fn curve_ring_edges(ring: &Geometry) -> Vec<Edge> {
    let mut edges = Vec::new();
    curve_edges(ring, &mut edges);
    close(edges)
}

// ── Classification ────────────────────────────────────────────────────────────

/// Position of `p` relative to a straight ring.
///
/// # Example
///
/// ```
/// use geo::Coord;
/// use geomeasure_core::geometry::PointArray;
/// use geomeasure_core::measures::containment::{ptarray_contains_point, CoordPos};
///
/// let ring = PointArray::from_xy(&[(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0), (0.0, 0.0)]);
/// assert_eq!(ptarray_contains_point(&ring, Coord { x: 2.0, y: 2.0 }), CoordPos::Inside);
/// assert_eq!(ptarray_contains_point(&ring, Coord { x: 4.0, y: 1.0 }), CoordPos::OnBoundary);
/// assert_eq!(ptarray_contains_point(&ring, Coord { x: 5.0, y: 1.0 }), CoordPos::Outside);
/// ```
pub fn ptarray_contains_point(pa: &PointArray, p: Coord<f64>) -> CoordPos {
    edges_contain_point(&ptarray_ring_edges(pa), p)
}

/// Position of `p` relative to a ring made of a LineString, CircularString or CompoundCurve.
pub fn ring_contains_point(ring: &Geometry, p: Coord<f64>) -> CoordPos {
    edges_contain_point(&curve_ring_edges(ring), p)
}

/// Position of `p` relative to a polygon: inside the shell and outside every hole.
pub fn polygon_contains_point(rings: &[PointArray], p: Coord<f64>) -> CoordPos {
    let Some(shell) = rings.first() else {
        return CoordPos::Outside;
    };
    match ptarray_contains_point(shell, p) {
        CoordPos::Inside => {}
        other => return other,
    }
    for hole in &rings[1..] {
        match ptarray_contains_point(hole, p) {
            CoordPos::Inside => return CoordPos::Outside,
            CoordPos::OnBoundary => return CoordPos::OnBoundary,
            CoordPos::Outside => {}
        }
    }
    CoordPos::Inside
}

pub(crate) fn edges_contain_point(edges: &[Edge], p: Coord<f64>) -> CoordPos {
    if edges.is_empty() {
        return CoordPos::Outside;
    }
    let mut winding = 0i32;
    for edge in edges {
        let on_boundary = match *edge {
            Edge::Segment(a, b) => segment_winding(a, b, p, &mut winding),
            Edge::Arc(a1, a2, a3) => arc_winding(a1, a2, a3, p, &mut winding),
        };
        if on_boundary {
            return CoordPos::OnBoundary;
        }
    }
    if winding == 0 {
        CoordPos::Outside
    } else {
        CoordPos::Inside
    }
}

fn is_left(a: Coord<f64>, b: Coord<f64>, p: Coord<f64>) -> f64 {
    (b.x - a.x) * (p.y - a.y) - (p.x - a.x) * (b.y - a.y)
}

fn segment_winding(a: Coord<f64>, b: Coord<f64>, p: Coord<f64>, winding: &mut i32) -> bool {
    if a == b {
        return a == p;
    }
    let side = is_left(a, b, p);
    if side == 0.0
        && p.x >= a.x.min(b.x)
        && p.x <= a.x.max(b.x)
        && p.y >= a.y.min(b.y)
        && p.y <= a.y.max(b.y)
    {
        return true;
    }
    if a.y <= p.y {
        if b.y > p.y && side > 0.0 {
            *winding += 1;
        }
    } else if b.y <= p.y && side < 0.0 {
        *winding -= 1;
    }
    false
}

fn arc_winding(
    a1: Coord<f64>,
    a2: Coord<f64>,
    a3: Coord<f64>,
    p: Coord<f64>,
    winding: &mut i32,
) -> bool {
    if p == a1 || p == a3 {
        return true;
    }
    let Some(sweep) = arc_sweep(a1, a2, a3) else {
        if a1 == a2 && a2 == a3 {
            return false;
        }
        return segment_winding(a1, a3, p, winding);
    };

    let r = sweep.radius;
    let c = sweep.center;
    let d = (p.x - c.x).hypot(p.y - c.y);
    if (d - r).abs() <= f64::EPSILON * r.max(1.0) && point_in_arc(p, a1, a2, a3) {
        return true;
    }

    let span = sweep.sweep.abs();
    let cuts = vertical_extreme_cuts(&sweep);
    let mut params = Vec::with_capacity(cuts.len() + 2);
    let mut points = Vec::with_capacity(cuts.len() + 2);
    params.push(0.0);
    points.push(a1);
    for &t in &cuts {
        let top = sweep.angle_at(t).sin() > 0.0;
        params.push(t);
        points.push(Coord {
            x: c.x,
            y: if top { c.y + r } else { c.y - r },
        });
    }
    params.push(span);
    points.push(a3);

    for k in 0..points.len() - 1 {
        let mid = sweep.angle_at((params[k] + params[k + 1]) / 2.0);
        let right = mid.cos() >= 0.0;
        if piece_winding(&sweep, points[k], points[k + 1], right, p, winding) {
            return true;
        }
    }
    false
}

/// Winding contribution of a Y-monotone arc piece from `s` to `e`.
fn piece_winding(
    sweep: &ArcSweep,
    s: Coord<f64>,
    e: Coord<f64>,
    right: bool,
    p: Coord<f64>,
    winding: &mut i32,
) -> bool {
    if s.y == e.y {
        return false;
    }
    let upward = s.y < e.y;
    let in_range = if upward {
        s.y <= p.y && p.y < e.y
    } else {
        e.y <= p.y && p.y < s.y
    };
    if !in_range {
        return false;
    }
    let x = if p.y == s.y {
        s.x
    } else if p.y == e.y {
        e.x
    } else {
        let dy = p.y - sweep.center.y;
        let h = (sweep.radius * sweep.radius - dy * dy).max(0.0).sqrt();
        if right {
            sweep.center.x + h
        } else {
            sweep.center.x - h
        }
    };
    if x == p.x {
        return true;
    }
    if x > p.x {
        *winding += if upward { 1 } else { -1 };
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{CollectionKind, Geometry};

    fn c(x: f64, y: f64) -> Coord<f64> {
        Coord { x, y }
    }

    fn unit_circle() -> Geometry {
        Geometry::circular_string(PointArray::from_xy(&[(-1.0, 0.0), (1.0, 0.0), (-1.0, 0.0)]))
    }

    #[test]
    fn straight_ring_orientation_does_not_matter() {
        let cw = PointArray::from_xy(&[(0.0, 0.0), (0.0, 4.0), (4.0, 4.0), (4.0, 0.0), (0.0, 0.0)]);
        assert_eq!(ptarray_contains_point(&cw, c(1.0, 1.0)), CoordPos::Inside);
        assert_eq!(ptarray_contains_point(&cw, c(0.0, 0.0)), CoordPos::OnBoundary);
    }

    #[test]
    fn unclosed_ring_is_closed_implicitly() {
        let open = PointArray::from_xy(&[(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0)]);
        assert_eq!(ptarray_contains_point(&open, c(2.0, 2.0)), CoordPos::Inside);
        assert_eq!(ptarray_contains_point(&open, c(0.0, 2.0)), CoordPos::OnBoundary);
    }

    #[test]
    fn ray_through_vertex_counts_once() {
        let diamond =
            PointArray::from_xy(&[(0.0, -2.0), (2.0, 0.0), (0.0, 2.0), (-2.0, 0.0), (0.0, -2.0)]);
        assert_eq!(ptarray_contains_point(&diamond, c(0.0, 0.0)), CoordPos::Inside);
        assert_eq!(ptarray_contains_point(&diamond, c(-3.0, 0.0)), CoordPos::Outside);
    }

    #[test]
    fn full_circle_ring() {
        let circle = unit_circle();
        assert_eq!(ring_contains_point(&circle, c(0.0, 0.0)), CoordPos::Inside);
        assert_eq!(ring_contains_point(&circle, c(0.5, 0.5)), CoordPos::Inside);
        assert_eq!(ring_contains_point(&circle, c(0.9, 0.9)), CoordPos::Outside);
        assert_eq!(ring_contains_point(&circle, c(0.0, 1.0)), CoordPos::OnBoundary);
        assert_eq!(ring_contains_point(&circle, c(-1.0, 0.0)), CoordPos::OnBoundary);
    }

    #[test]
    fn half_disc_compound_ring() {
        let arc = Geometry::circular_string(PointArray::from_xy(&[
            (-1.0, 0.0),
            (0.0, 1.0),
            (1.0, 0.0),
        ]));
        let chord = Geometry::line(PointArray::from_xy(&[(1.0, 0.0), (-1.0, 0.0)]));
        let ring = Geometry::collection(CollectionKind::CompoundCurve, vec![arc, chord]).unwrap();

        assert_eq!(ring_contains_point(&ring, c(0.0, 0.5)), CoordPos::Inside);
        assert_eq!(ring_contains_point(&ring, c(0.0, -0.5)), CoordPos::Outside);
        assert_eq!(ring_contains_point(&ring, c(0.0, 0.0)), CoordPos::OnBoundary);
        assert_eq!(ring_contains_point(&ring, c(0.0, 1.5)), CoordPos::Outside);
    }

    #[test]
    fn polygon_hole_excludes_points() {
        let shell =
            PointArray::from_xy(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0), (0.0, 0.0)]);
        let hole = PointArray::from_xy(&[(2.0, 2.0), (8.0, 2.0), (8.0, 8.0), (2.0, 8.0), (2.0, 2.0)]);
        let rings = [shell, hole];
        assert_eq!(polygon_contains_point(&rings, c(5.0, 5.0)), CoordPos::Outside);
        assert_eq!(polygon_contains_point(&rings, c(1.0, 5.0)), CoordPos::Inside);
        assert_eq!(polygon_contains_point(&rings, c(2.0, 5.0)), CoordPos::OnBoundary);
    }
}
