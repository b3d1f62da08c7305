//! Pairwise routing of geometries to the distance routines.

use geo::Coord;

use super::containment::{ptarray_contains_point, ring_contains_point, CoordPos};
use super::fast::distance_fast;
use super::primitives::{arc_arc, pt_arc, pt_pt, pt_seg, seg_arc, seg_seg};
use super::{DistPts, DistanceMode};
use crate::error::{GeomError, Result};
use crate::geometry::{Body, Geometry, GeometryType, PointArray};

// ── Point arrays ──────────────────────────────────────────────────────────────

pub(crate) fn pt_ptarray(dl: &mut DistPts, p: Coord<f64>, pa: &PointArray) {
    let Some(mut start) = pa.first() else {
        return;
    };
    pt_pt(dl, p, start);
    for end in pa.coords().skip(1) {
        pt_seg(dl, p, start, end);
        if dl.is_done() {
            return;
        }
        start = end;
    }
}

fn ensure_arcs(pa: &PointArray) -> Result<()> {
    if pa.len() < 3 || pa.len() % 2 == 0 {
        return Err(GeomError::InvalidInput(format!(
            "circular string of {} points is not a sequence of arcs",
            pa.len()
        )));
    }
    Ok(())
}

fn ensure_min(dl: &DistPts) -> Result<()> {
    if dl.mode() == DistanceMode::Max {
        return Err(GeomError::MaxDistanceUnsupported("CircularString"));
    }
    Ok(())
}

pub(crate) fn pt_ptarrayarc(dl: &mut DistPts, p: Coord<f64>, pa: &PointArray) -> Result<()> {
    ensure_min(dl)?;
    ensure_arcs(pa)?;
    for t in (1..pa.len()).step_by(2) {
        pt_arc(dl, p, pa.coord(t - 1), pa.coord(t), pa.coord(t + 1))?;
        if dl.is_done() {
            break;
        }
    }
    Ok(())
}

pub(crate) fn ptarray_ptarray(dl: &mut DistPts, l1: &PointArray, l2: &PointArray) {
    if l1.is_empty() || l2.is_empty() {
        return;
    }

    if dl.mode() == DistanceMode::Max {
        for p in l1.coords() {
            for q in l2.coords() {
                pt_pt(dl, p, q);
            }
        }
        return;
    }

    if l1.len() == 1 {
        return pt_ptarray(dl, l1.coord(0), l2);
    }
    if l2.len() == 1 {
        return dl.swapped_infallible(|dl| pt_ptarray(dl, l2.coord(0), l1));
    }

    for t in 1..l1.len() {
        let (a, b) = (l1.coord(t - 1), l1.coord(t));
        for u in 1..l2.len() {
            seg_seg(dl, a, b, l2.coord(u - 1), l2.coord(u));
            if dl.is_done() {
                return;
            }
        }
    }
}

pub(crate) fn ptarray_ptarrayarc(dl: &mut DistPts, pa: &PointArray, pb: &PointArray) -> Result<()> {
    ensure_min(dl)?;
    ensure_arcs(pb)?;
    if pa.is_empty() {
        return Ok(());
    }
    if pa.len() == 1 {
        return pt_ptarrayarc(dl, pa.coord(0), pb);
    }
    for t in 1..pa.len() {
        let (a1, a2) = (pa.coord(t - 1), pa.coord(t));
        for u in (1..pb.len()).step_by(2) {
            seg_arc(dl, a1, a2, pb.coord(u - 1), pb.coord(u), pb.coord(u + 1))?;
            if dl.is_done() {
                return Ok(());
            }
        }
    }
    Ok(())
}

pub(crate) fn ptarrayarc_ptarrayarc(
    dl: &mut DistPts,
    pa: &PointArray,
    pb: &PointArray,
) -> Result<()> {
    ensure_min(dl)?;
    ensure_arcs(pa)?;
    ensure_arcs(pb)?;
    for t in (1..pa.len()).step_by(2) {
        let (a1, a2, a3) = (pa.coord(t - 1), pa.coord(t), pa.coord(t + 1));
        for u in (1..pb.len()).step_by(2) {
            arc_arc(dl, a1, a2, a3, pb.coord(u - 1), pb.coord(u), pb.coord(u + 1))?;
            if dl.is_done() {
                return Ok(());
            }
        }
    }
    Ok(())
}

/// A point against every part of a ring-forming curve.
fn pt_curve(dl: &mut DistPts, p: Coord<f64>, curve: &Geometry) -> Result<()> {
    match curve.body() {
        Body::Line(pa) => pt_ptarray(dl, p, pa),
        Body::CircularString(pa) => pt_ptarrayarc(dl, p, pa)?,
        Body::Collection(_, parts) => {
            for part in parts.iter().filter(|part| !part.is_empty()) {
                pt_curve(dl, p, part)?;
                if dl.is_done() {
                    break;
                }
            }
        }
        _ => return Err(GeomError::Internal("ring is not a curve")),
    }
    Ok(())
}

// ── Surfaces ──────────────────────────────────────────────────────────────────

/// A surface boundary ring, straight or curved.
trait Ring {
    fn first_point(&self) -> Option<Coord<f64>>;
    fn locate(&self, p: Coord<f64>) -> CoordPos;
    fn point_distance(&self, p: Coord<f64>, dl: &mut DistPts) -> Result<()>;
    /// Distance from `curve`, which is the first operand.
    fn curve_distance(&self, curve: &Geometry, dl: &mut DistPts) -> Result<()>;
    fn ring_distance(&self, other: &Self, dl: &mut DistPts) -> Result<()>;
}

impl Ring for PointArray {
    fn first_point(&self) -> Option<Coord<f64>> {
        self.first()
    }

    fn locate(&self, p: Coord<f64>) -> CoordPos {
        ptarray_contains_point(self, p)
    }

    fn point_distance(&self, p: Coord<f64>, dl: &mut DistPts) -> Result<()> {
        pt_ptarray(dl, p, self);
        Ok(())
    }

    fn curve_distance(&self, curve: &Geometry, dl: &mut DistPts) -> Result<()> {
        match curve.body() {
            Body::Line(pa) => {
                ptarray_ptarray(dl, pa, self);
                Ok(())
            }
            Body::CircularString(pa) => dl.swapped(|dl| ptarray_ptarrayarc(dl, self, pa)),
            _ => Err(GeomError::Internal("expected a LineString or CircularString")),
        }
    }

    fn ring_distance(&self, other: &Self, dl: &mut DistPts) -> Result<()> {
        ptarray_ptarray(dl, self, other);
        Ok(())
    }
}

impl Ring for Geometry {
    fn first_point(&self) -> Option<Coord<f64>> {
        self.start_point()
    }

    fn locate(&self, p: Coord<f64>) -> CoordPos {
        ring_contains_point(self, p)
    }

    fn point_distance(&self, p: Coord<f64>, dl: &mut DistPts) -> Result<()> {
        pt_curve(dl, p, self)
    }

    fn curve_distance(&self, curve: &Geometry, dl: &mut DistPts) -> Result<()> {
        distance_recursive(curve, self, dl)
    }

    fn ring_distance(&self, other: &Self, dl: &mut DistPts) -> Result<()> {
        distance_recursive(self, other, dl)
    }
}

/// A point inside the shell is at distance zero unless it sits in a hole,
/// in which case only that hole matters.
fn point_surface<R: Ring>(dl: &mut DistPts, p: Coord<f64>, rings: &[R]) -> Result<()> {
    let Some((shell, holes)) = rings.split_first() else {
        return Ok(());
    };
    if dl.mode() == DistanceMode::Max || shell.locate(p) == CoordPos::Outside {
        return shell.point_distance(p, dl);
    }
    if let Some(hole) = holes.iter().find(|h| h.locate(p) != CoordPos::Outside) {
        return hole.point_distance(p, dl);
    }
    dl.update(0.0, p, p);
    Ok(())
}

/// A curve starting outside the shell can only be reached through the shell;
/// one starting inside is measured against the holes, or touches the surface.
fn curve_surface<R: Ring>(dl: &mut DistPts, curve: &Geometry, rings: &[R]) -> Result<()> {
    let (Some((shell, holes)), Some(start)) = (rings.split_first(), curve.start_point()) else {
        return Ok(());
    };
    if dl.mode() == DistanceMode::Max || shell.locate(start) == CoordPos::Outside {
        return shell.curve_distance(curve, dl);
    }
    for hole in holes {
        hole.curve_distance(curve, dl)?;
        if dl.is_done() {
            return Ok(());
        }
    }
    if holes.iter().any(|h| h.locate(start) != CoordPos::Outside) {
        return Ok(());
    }
    dl.update(0.0, start, start);
    Ok(())
}

fn surface_surface<R: Ring>(dl: &mut DistPts, rings1: &[R], rings2: &[R]) -> Result<()> {
    let (Some((shell1, holes1)), Some((shell2, holes2))) =
        (rings1.split_first(), rings2.split_first())
    else {
        return Ok(());
    };
    if dl.mode() == DistanceMode::Max {
        return shell1.ring_distance(shell2, dl);
    }
    let (Some(p1), Some(p2)) = (shell1.first_point(), shell2.first_point()) else {
        return Ok(());
    };

    // disjoint shells: only the shells can be nearest
    if shell2.locate(p1) == CoordPos::Outside && shell1.locate(p2) == CoordPos::Outside {
        return shell1.ring_distance(shell2, dl);
    }
    // one surface starts inside a hole of the other
    if let Some(hole) = holes1.iter().find(|h| h.locate(p2) != CoordPos::Outside) {
        return hole.ring_distance(shell2, dl);
    }
    if let Some(hole) = holes2.iter().find(|h| h.locate(p1) != CoordPos::Outside) {
        return shell1.ring_distance(hole, dl);
    }
    // otherwise one shell starts inside the other surface
    if shell2.locate(p1) != CoordPos::Outside {
        dl.update(0.0, p1, p1);
        return Ok(());
    }
    if shell1.locate(p2) != CoordPos::Outside {
        dl.update(0.0, p2, p2);
        return Ok(());
    }
    Err(GeomError::Internal("surfaces neither disjoint nor nested"))
}

fn require_min_curvepoly(dl: &DistPts) -> Result<()> {
    if dl.mode() == DistanceMode::Max {
        return Err(GeomError::MaxDistanceUnsupported("CurvePolygon"));
    }
    Ok(())
}

fn straight_rings(rings: &[PointArray]) -> Vec<Geometry> {
    rings.iter().cloned().map(Geometry::line).collect()
}

// ── Dispatch ──────────────────────────────────────────────────────────────────

/// Position in the canonical pair order; the lower-ranked operand goes first.
fn rank(g: &Geometry) -> Result<u8> {
    Ok(match g.geometry_type() {
        GeometryType::Point => 0,
        GeometryType::Line => 1,
        GeometryType::Triangle => 2,
        GeometryType::CircularString => 3,
        GeometryType::Polygon => 4,
        GeometryType::CurvePolygon => 5,
        _ => return Err(GeomError::Internal("collection reached the pair dispatcher")),
    })
}

pub(crate) fn distance_bruteforce(a: &Geometry, b: &Geometry, dl: &mut DistPts) -> Result<()> {
    if rank(a)? > rank(b)? {
        dl.swapped(|dl| distance_pair(b, a, dl))
    } else {
        distance_pair(a, b, dl)
    }
}

fn distance_pair(a: &Geometry, b: &Geometry, dl: &mut DistPts) -> Result<()> {
    match (a.body(), b.body()) {
        (Body::Point(p), Body::Point(q)) => pt_pt(dl, p.coord(0), q.coord(0)),
        (Body::Point(p), Body::Line(pa)) => pt_ptarray(dl, p.coord(0), pa),
        (Body::Point(p), Body::Triangle(pa)) => {
            point_surface(dl, p.coord(0), std::slice::from_ref(pa))?
        }
        (Body::Point(p), Body::CircularString(pa)) => pt_ptarrayarc(dl, p.coord(0), pa)?,
        (Body::Point(p), Body::Polygon(rings)) => point_surface(dl, p.coord(0), rings)?,
        (Body::Point(p), Body::CurvePolygon(rings)) => {
            require_min_curvepoly(dl)?;
            point_surface(dl, p.coord(0), rings)?
        }

        (Body::Line(l1), Body::Line(l2)) => ptarray_ptarray(dl, l1, l2),
        (Body::Line(_), Body::Triangle(pa)) => curve_surface(dl, a, std::slice::from_ref(pa))?,
        (Body::Line(pa), Body::CircularString(pb)) => ptarray_ptarrayarc(dl, pa, pb)?,
        (Body::Line(_), Body::Polygon(rings)) => curve_surface(dl, a, rings)?,
        (Body::Line(_) | Body::CircularString(_), Body::CurvePolygon(rings)) => {
            require_min_curvepoly(dl)?;
            curve_surface(dl, a, rings)?
        }

        (Body::Triangle(t1), Body::Triangle(t2)) => {
            surface_surface(dl, std::slice::from_ref(t1), std::slice::from_ref(t2))?
        }
        (Body::Triangle(pa), Body::CircularString(_)) => {
            dl.swapped(|dl| curve_surface(dl, b, std::slice::from_ref(pa)))?
        }
        (Body::Triangle(pa), Body::Polygon(rings)) => {
            surface_surface(dl, std::slice::from_ref(pa), rings)?
        }
        (Body::Triangle(pa), Body::CurvePolygon(rings)) => {
            require_min_curvepoly(dl)?;
            surface_surface(dl, &straight_rings(std::slice::from_ref(pa)), rings)?
        }

        (Body::CircularString(pa), Body::CircularString(pb)) => ptarrayarc_ptarrayarc(dl, pa, pb)?,
        (Body::CircularString(_), Body::Polygon(rings)) => curve_surface(dl, a, rings)?,

        (Body::Polygon(r1), Body::Polygon(r2)) => surface_surface(dl, r1, r2)?,
        (Body::Polygon(r1), Body::CurvePolygon(r2)) => {
            require_min_curvepoly(dl)?;
            surface_surface(dl, &straight_rings(r1), r2)?
        }
        (Body::CurvePolygon(r1), Body::CurvePolygon(r2)) => {
            require_min_curvepoly(dl)?;
            surface_surface(dl, r1, r2)?
        }

        _ => return Err(GeomError::Internal("unsupported geometry pair")),
    }
    Ok(())
}

/// Straight vertex sequence usable by the sorted search, if any.
fn fast_vertices(g: &Geometry) -> Option<&PointArray> {
    match g.body() {
        Body::Line(pa) | Body::Triangle(pa) => Some(pa),
        Body::Polygon(rings) => rings.first(),
        _ => None,
    }
}

fn distance_leaf(a: &Geometry, b: &Geometry, dl: &mut DistPts) -> Result<()> {
    if dl.mode() == DistanceMode::Min {
        if let (Some(l1), Some(l2)) = (fast_vertices(a), fast_vertices(b)) {
            if let (Some(b1), Some(b2)) = (a.calculate_bbox(), b.calculate_bbox()) {
                if !b1.overlaps_2d(&b2) {
                    log::trace!(
                        "sorted search over {} x {} vertices",
                        l1.len(),
                        l2.len()
                    );
                    distance_fast(dl, l1, l2, &b1, &b2);
                    return Ok(());
                }
            }
        }
    }
    distance_bruteforce(a, b, dl)
}

fn is_multi(g: &Geometry) -> bool {
    matches!(g.body(), Body::Collection(..))
}

/// Walk both operands down to their primitive parts and measure every pair.
pub(crate) fn distance_recursive(g1: &Geometry, g2: &Geometry, dl: &mut DistPts) -> Result<()> {
    let parts1 = if is_multi(g1) {
        g1.children()
    } else {
        std::slice::from_ref(g1)
    };
    let parts2 = if is_multi(g2) {
        g2.children()
    } else {
        std::slice::from_ref(g2)
    };

    for a in parts1 {
        if a.is_empty() {
            continue;
        }
        if is_multi(a) {
            distance_recursive(a, g2, dl)?;
            if dl.is_done() {
                return Ok(());
            }
            continue;
        }
        for b in parts2 {
            if b.is_empty() {
                continue;
            }
            if is_multi(b) {
                distance_recursive(a, b, dl)?;
            } else {
                distance_leaf(a, b, dl)?;
            }
            if dl.is_done() {
                return Ok(());
            }
        }
    }
    Ok(())
}
