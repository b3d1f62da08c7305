//! Coordinate-level distance routines.
//!
//! Each routine feeds candidate pairs into a [`DistPts`] accumulator; the
//! accumulator decides whether a candidate improves the running answer.
//! Arcs are three-point circular arcs `(start, on-arc, end)`.

use std::f64::consts::{FRAC_PI_2, TAU};

use geo::Coord;

use super::{DistPts, DistanceMode};
use crate::error::{GeomError, Result};

/// Colinearity threshold for the circle through three points.
pub const EPSILON_SQLMM: f64 = 1e-8;

// ── Plane helpers ─────────────────────────────────────────────────────────────

/// Sign of `q` relative to the directed line `p1 -> p2`: -1 left, 1 right, 0 on it.
pub(crate) fn segment_side(p1: Coord<f64>, p2: Coord<f64>, q: Coord<f64>) -> i32 {
    let side = (q.x - p1.x) * (p2.y - p1.y) - (p2.x - p1.x) * (q.y - p1.y);
    if side < 0.0 {
        -1
    } else if side > 0.0 {
        1
    } else {
        0
    }
}

pub(crate) fn is_full_circle(a1: Coord<f64>, a3: Coord<f64>) -> bool {
    (a1.x - a3.x).abs() < EPSILON_SQLMM && (a1.y - a3.y).abs() < EPSILON_SQLMM
}

fn dist(a: Coord<f64>, b: Coord<f64>) -> f64 {
    (a.x - b.x).hypot(a.y - b.y)
}

/// Centre and radius of the circle through three points, `None` when they are colinear.
///
/// When the first and last points coincide the arc is a full circle whose
/// diameter runs from the first point to the second.
pub(crate) fn arc_center(
    p1: Coord<f64>,
    p2: Coord<f64>,
    p3: Coord<f64>,
) -> Option<(Coord<f64>, f64)> {
    if is_full_circle(p1, p3) {
        let c = Coord {
            x: p1.x + (p2.x - p1.x) / 2.0,
            y: p1.y + (p2.y - p1.y) / 2.0,
        };
        return Some((c, dist(c, p1)));
    }

    let dx21 = p2.x - p1.x;
    let dy21 = p2.y - p1.y;
    let dx31 = p3.x - p1.x;
    let dy31 = p3.y - p1.y;
    let h21 = dx21 * dx21 + dy21 * dy21;
    let h31 = dx31 * dx31 + dy31 * dy31;

    let d = 2.0 * (dx21 * dy31 - dx31 * dy21);
    if d.abs() < EPSILON_SQLMM {
        return None;
    }
    let c = Coord {
        x: p1.x + (h21 * dy31 - h31 * dy21) / d,
        y: p1.y - (h21 * dx31 - h31 * dx21) / d,
    };
    Some((c, dist(c, p1)))
}

/// Whether `p`, assumed to lie on the arc's circle, lies on the arc itself.
pub(crate) fn point_in_arc(p: Coord<f64>, a1: Coord<f64>, a2: Coord<f64>, a3: Coord<f64>) -> bool {
    if is_full_circle(a1, a3) {
        return true;
    }
    segment_side(a1, a3, a2) == segment_side(a1, a3, p)
}

/// Angular description of an arc.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ArcSweep {
    pub center: Coord<f64>,
    pub radius: f64,
    /// Angle of the start point.
    pub start: f64,
    /// Signed swept angle, positive counter-clockwise.
    pub sweep: f64,
}

impl ArcSweep {
    pub fn angle_at(&self, t: f64) -> f64 {
        self.start + t.copysign(self.sweep)
    }
}

pub(crate) fn arc_sweep(a1: Coord<f64>, a2: Coord<f64>, a3: Coord<f64>) -> Option<ArcSweep> {
    let (center, radius) = arc_center(a1, a2, a3)?;
    let start = (a1.y - center.y).atan2(a1.x - center.x);
    if is_full_circle(a1, a3) {
        return Some(ArcSweep {
            center,
            radius,
            start,
            sweep: TAU,
        });
    }
    let end = (a3.y - center.y).atan2(a3.x - center.x);
    let ccw = (a2.x - a1.x) * (a3.y - a1.y) - (a2.y - a1.y) * (a3.x - a1.x) > 0.0;
    let mut sweep = if ccw { end - start } else { start - end };
    if sweep <= 0.0 {
        sweep += TAU;
    }
    Some(ArcSweep {
        center,
        radius,
        start,
        sweep: if ccw { sweep } else { -sweep },
    })
}

/// Parameters in `(0, |sweep|)` where the arc passes the top or bottom of its circle.
pub(crate) fn vertical_extreme_cuts(s: &ArcSweep) -> Vec<f64> {
    let span = s.sweep.abs();
    let mut cuts: Vec<f64> = [FRAC_PI_2, -FRAC_PI_2]
        .into_iter()
        .map(|target| {
            if s.sweep > 0.0 {
                (target - s.start).rem_euclid(TAU)
            } else {
                (s.start - target).rem_euclid(TAU)
            }
        })
        .filter(|t| *t > 0.0 && *t < span)
        .collect();
    cuts.sort_by(f64::total_cmp);
    cuts
}

// ── Distance primitives ───────────────────────────────────────────────────────

pub(crate) fn pt_pt(dl: &mut DistPts, p1: Coord<f64>, p2: Coord<f64>) {
    dl.update(dist(p1, p2), p1, p2);
}

pub(crate) fn pt_seg(dl: &mut DistPts, p: Coord<f64>, a: Coord<f64>, b: Coord<f64>) {
    if a == b {
        return pt_pt(dl, p, a);
    }

    let r = ((p.x - a.x) * (b.x - a.x) + (p.y - a.y) * (b.y - a.y))
        / ((b.x - a.x) * (b.x - a.x) + (b.y - a.y) * (b.y - a.y));

    // the farthest point of a segment is always one of its ends
    if dl.mode() == DistanceMode::Max {
        return if r >= 0.5 {
            pt_pt(dl, p, a)
        } else {
            pt_pt(dl, p, b)
        };
    }

    if r < 0.0 {
        return pt_pt(dl, p, a);
    }
    if r >= 1.0 {
        return pt_pt(dl, p, b);
    }

    // exactly on the line: p is its own witness
    if (a.y - p.y) * (b.x - a.x) == (a.x - p.x) * (b.y - a.y) {
        dl.update(0.0, p, p);
        return;
    }

    let c = Coord {
        x: a.x + r * (b.x - a.x),
        y: a.y + r * (b.y - a.y),
    };
    pt_pt(dl, p, c)
}

fn endpoint_checks(dl: &mut DistPts, a: Coord<f64>, b: Coord<f64>, c: Coord<f64>, d: Coord<f64>) {
    pt_seg(dl, a, c, d);
    if dl.is_done() {
        return;
    }
    pt_seg(dl, b, c, d);
    if dl.is_done() {
        return;
    }
    dl.swapped_infallible(|dl| {
        pt_seg(dl, c, a, b);
        if !dl.is_done() {
            pt_seg(dl, d, a, b);
        }
    });
}

pub(crate) fn seg_seg(dl: &mut DistPts, a: Coord<f64>, b: Coord<f64>, c: Coord<f64>, d: Coord<f64>) {
    if a == b {
        return pt_seg(dl, a, c, d);
    }
    if c == d {
        return dl.swapped_infallible(|dl| pt_seg(dl, c, a, b));
    }

    let r_top = (a.y - c.y) * (d.x - c.x) - (a.x - c.x) * (d.y - c.y);
    let r_bot = (b.x - a.x) * (d.y - c.y) - (b.y - a.y) * (d.x - c.x);
    let s_top = (a.y - c.y) * (b.x - a.x) - (a.x - c.x) * (b.y - a.y);

    // parallel segments and max searches only ever resolve at endpoints
    if r_bot == 0.0 || dl.mode() == DistanceMode::Max {
        return endpoint_checks(dl, a, b, c, d);
    }

    let s = s_top / r_bot;
    let r = r_top / r_bot;
    if !(0.0..=1.0).contains(&r) || !(0.0..=1.0).contains(&s) {
        return endpoint_checks(dl, a, b, c, d);
    }

    let hit = if a == c || a == d {
        a
    } else if b == c || b == d {
        b
    } else {
        Coord {
            x: a.x + r * (b.x - a.x),
            y: a.y + r * (b.y - a.y),
        }
    };
    dl.update(0.0, hit, hit);
}

fn require_min(dl: &DistPts, what: &'static str) -> Result<()> {
    if dl.mode() == DistanceMode::Max {
        return Err(GeomError::MaxDistanceUnsupported(what));
    }
    Ok(())
}

pub(crate) fn pt_arc(
    dl: &mut DistPts,
    p: Coord<f64>,
    a1: Coord<f64>,
    a2: Coord<f64>,
    a3: Coord<f64>,
) -> Result<()> {
    require_min(dl, "circular arc")?;

    if a1 == a2 && a2 == a3 {
        pt_pt(dl, p, a1);
        return Ok(());
    }
    let Some((c, radius)) = arc_center(a1, a2, a3) else {
        pt_seg(dl, p, a1, a3);
        return Ok(());
    };

    let d = dist(p, c);
    if d == 0.0 {
        // every arc point is equidistant from the centre
        dl.update(radius, p, a1);
        return Ok(());
    }

    let x = Coord {
        x: c.x + (p.x - c.x) * radius / d,
        y: c.y + (p.y - c.y) * radius / d,
    };
    if point_in_arc(x, a1, a2, a3) {
        pt_pt(dl, p, x);
    } else {
        pt_pt(dl, p, a1);
        pt_pt(dl, p, a3);
    }
    Ok(())
}

pub(crate) fn seg_arc(
    dl: &mut DistPts,
    a1: Coord<f64>,
    a2: Coord<f64>,
    b1: Coord<f64>,
    b2: Coord<f64>,
    b3: Coord<f64>,
) -> Result<()> {
    require_min(dl, "circular arc")?;

    if a1 == a2 {
        return pt_arc(dl, a1, b1, b2, b3);
    }
    let Some((c, radius)) = arc_center(b1, b2, b3) else {
        seg_seg(dl, a1, a2, b1, b3);
        return Ok(());
    };

    // foot of the perpendicular from the centre onto the supporting line
    let (ux, uy) = (a2.x - a1.x, a2.y - a1.y);
    let len2 = ux * ux + uy * uy;
    let t = ((c.x - a1.x) * ux + (c.y - a1.y) * uy) / len2;
    let foot = Coord {
        x: a1.x + t * ux,
        y: a1.y + t * uy,
    };
    let d = dist(c, foot);

    if d < radius {
        let half = (radius * radius - d * d).sqrt() / len2.sqrt();
        for te in [t - half, t + half] {
            if (0.0..=1.0).contains(&te) {
                let e = Coord {
                    x: a1.x + te * ux,
                    y: a1.y + te * uy,
                };
                if point_in_arc(e, b1, b2, b3) {
                    dl.update(0.0, e, e);
                    return Ok(());
                }
            }
        }
    } else if d == radius {
        if (0.0..=1.0).contains(&t) && point_in_arc(foot, b1, b2, b3) {
            dl.update(0.0, foot, foot);
            return Ok(());
        }
    } else if (0.0..=1.0).contains(&t) {
        let g = Coord {
            x: c.x + (foot.x - c.x) * radius / d,
            y: c.y + (foot.y - c.y) * radius / d,
        };
        if point_in_arc(g, b1, b2, b3) {
            pt_pt(dl, foot, g);
        }
    }

    pt_arc(dl, a1, b1, b2, b3)?;
    pt_arc(dl, a2, b1, b2, b3)?;
    dl.swapped_infallible(|dl| {
        pt_seg(dl, b1, a1, a2);
        pt_seg(dl, b3, a1, a2);
    });
    Ok(())
}

pub(crate) fn arc_arc(
    dl: &mut DistPts,
    a1: Coord<f64>,
    a2: Coord<f64>,
    a3: Coord<f64>,
    b1: Coord<f64>,
    b2: Coord<f64>,
    b3: Coord<f64>,
) -> Result<()> {
    require_min(dl, "circular arc")?;

    if a1 == a2 && a2 == a3 {
        return pt_arc(dl, a1, b1, b2, b3);
    }
    if b1 == b2 && b2 == b3 {
        return dl.swapped(|dl| pt_arc(dl, b1, a1, a2, a3));
    }

    let circle_a = arc_center(a1, a2, a3);
    let circle_b = arc_center(b1, b2, b3);
    let ((ca, ra), (cb, rb)) = match (circle_a, circle_b) {
        (None, None) => {
            seg_seg(dl, a1, a3, b1, b3);
            return Ok(());
        }
        (None, Some(_)) => return seg_arc(dl, a1, a3, b1, b2, b3),
        (Some(_), None) => return dl.swapped(|dl| seg_arc(dl, b1, b3, a1, a2, a3)),
        (Some(a), Some(b)) => (a, b),
    };

    let d = dist(ca, cb);
    if d > 0.0 {
        let (ux, uy) = ((cb.x - ca.x) / d, (cb.y - ca.y) / d);

        // crossing circles: an intersection on both arcs settles it
        if d <= ra + rb && d >= (ra - rb).abs() {
            let along = (ra * ra - rb * rb + d * d) / (2.0 * d);
            let h = (ra * ra - along * along).max(0.0).sqrt();
            let base = Coord {
                x: ca.x + along * ux,
                y: ca.y + along * uy,
            };
            for sign in [1.0, -1.0] {
                let x = Coord {
                    x: base.x - sign * h * uy,
                    y: base.y + sign * h * ux,
                };
                if point_in_arc(x, a1, a2, a3) && point_in_arc(x, b1, b2, b3) {
                    dl.update(0.0, x, x);
                    return Ok(());
                }
            }
        }

        // interior extremes lie on the line through both centres
        for sa in [1.0, -1.0] {
            let xa = Coord {
                x: ca.x + sa * ra * ux,
                y: ca.y + sa * ra * uy,
            };
            if !point_in_arc(xa, a1, a2, a3) {
                continue;
            }
            for sb in [1.0, -1.0] {
                let xb = Coord {
                    x: cb.x + sb * rb * ux,
                    y: cb.y + sb * rb * uy,
                };
                if point_in_arc(xb, b1, b2, b3) {
                    pt_pt(dl, xa, xb);
                }
            }
        }
    }

    pt_arc(dl, a1, b1, b2, b3)?;
    pt_arc(dl, a3, b1, b2, b3)?;
    dl.swapped(|dl| {
        pt_arc(dl, b1, a1, a2, a3)?;
        pt_arc(dl, b3, a1, a2, a3)
    })
}

// ── Standalone forms ──────────────────────────────────────────────────────────

/// A distance with the point on each operand that realises it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Witness {
    pub distance: f64,
    pub p1: Coord<f64>,
    pub p2: Coord<f64>,
}

fn finish(dl: DistPts) -> Result<Witness> {
    match (dl.distance(), dl.witnesses()) {
        (Some(distance), Some((p1, p2))) => Ok(Witness { distance, p1, p2 }),
        _ => Err(GeomError::Internal("primitive produced no candidate")),
    }
}

/// Minimum distance from `p` to segment `a`–`b`; `p2` is the nearest point on the segment.
///
/// # Example
///
/// ```
/// use geo::Coord;
/// use geomeasure_core::measures::primitives::point_segment_distance;
///
/// let w = point_segment_distance(
///     Coord { x: 0.0, y: 0.0 },
///     Coord { x: 1.0, y: 0.0 },
///     Coord { x: 1.0, y: 1.0 },
/// );
/// assert_eq!(w.distance, 1.0);
/// assert_eq!(w.p2, Coord { x: 1.0, y: 0.0 });
/// ```
pub fn point_segment_distance(p: Coord<f64>, a: Coord<f64>, b: Coord<f64>) -> Witness {
    let mut dl = DistPts::new(DistanceMode::Min);
    pt_seg(&mut dl, p, a, b);
    Witness {
        distance: dl.raw_distance(),
        p1: dl.raw_p1(),
        p2: dl.raw_p2(),
    }
}

/// Minimum distance between segments `a1`–`a2` and `b1`–`b2`.
///
/// # Example
///
/// ```
/// use geo::Coord;
/// use geomeasure_core::measures::primitives::segment_segment_distance;
///
/// let w = segment_segment_distance(
///     Coord { x: 0.0, y: 0.0 },
///     Coord { x: 2.0, y: 0.0 },
///     Coord { x: 1.0, y: -1.0 },
///     Coord { x: 1.0, y: 1.0 },
/// );
/// assert_eq!(w.distance, 0.0);
/// assert_eq!(w.p1, Coord { x: 1.0, y: 0.0 });
/// ```
pub fn segment_segment_distance(
    a1: Coord<f64>,
    a2: Coord<f64>,
    b1: Coord<f64>,
    b2: Coord<f64>,
) -> Witness {
    let mut dl = DistPts::new(DistanceMode::Min);
    seg_seg(&mut dl, a1, a2, b1, b2);
    Witness {
        distance: dl.raw_distance(),
        p1: dl.raw_p1(),
        p2: dl.raw_p2(),
    }
}

/// Minimum distance from `p` to the arc `a1`, `a2`, `a3`.
///
/// # Example
///
/// ```
/// use geo::Coord;
/// use geomeasure_core::measures::primitives::point_arc_distance;
///
/// // upper half of the unit circle
/// let w = point_arc_distance(
///     Coord { x: 0.0, y: 3.0 },
///     Coord { x: -1.0, y: 0.0 },
///     Coord { x: 0.0, y: 1.0 },
///     Coord { x: 1.0, y: 0.0 },
/// )
/// .unwrap();
/// assert!((w.distance - 2.0).abs() < 1e-12);
/// ```
pub fn point_arc_distance(
    p: Coord<f64>,
    a1: Coord<f64>,
    a2: Coord<f64>,
    a3: Coord<f64>,
) -> Result<Witness> {
    let mut dl = DistPts::new(DistanceMode::Min);
    pt_arc(&mut dl, p, a1, a2, a3)?;
    finish(dl)
}

/// Minimum distance from segment `a1`–`a2` to the arc `b1`, `b2`, `b3`.
pub fn segment_arc_distance(
    a1: Coord<f64>,
    a2: Coord<f64>,
    b1: Coord<f64>,
    b2: Coord<f64>,
    b3: Coord<f64>,
) -> Result<Witness> {
    let mut dl = DistPts::new(DistanceMode::Min);
    seg_arc(&mut dl, a1, a2, b1, b2, b3)?;
    finish(dl)
}

/// Minimum distance between two arcs.
pub fn arc_arc_distance(
    a1: Coord<f64>,
    a2: Coord<f64>,
    a3: Coord<f64>,
    b1: Coord<f64>,
    b2: Coord<f64>,
    b3: Coord<f64>,
) -> Result<Witness> {
    let mut dl = DistPts::new(DistanceMode::Min);
    arc_arc(&mut dl, a1, a2, a3, b1, b2, b3)?;
    finish(dl)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(x: f64, y: f64) -> Coord<f64> {
        Coord { x, y }
    }

    #[test]
    fn point_segment_clamps_to_ends() {
        let w = point_segment_distance(c(-3.0, 4.0), c(0.0, 0.0), c(10.0, 0.0));
        assert_eq!(w.distance, 5.0);
        assert_eq!(w.p2, c(0.0, 0.0));

        let w = point_segment_distance(c(5.0, 2.0), c(0.0, 0.0), c(10.0, 0.0));
        assert_eq!(w.distance, 2.0);
        assert_eq!(w.p2, c(5.0, 0.0));
    }

    #[test]
    fn degenerate_segment_is_a_point() {
        let w = point_segment_distance(c(3.0, 4.0), c(0.0, 0.0), c(0.0, 0.0));
        assert_eq!(w.distance, 5.0);

        let w = segment_segment_distance(c(3.0, 4.0), c(3.0, 4.0), c(0.0, 0.0), c(0.0, 0.0));
        assert_eq!(w.distance, 5.0);
    }

    #[test]
    fn max_mode_picks_far_endpoint() {
        let mut dl = DistPts::new(DistanceMode::Max);
        pt_seg(&mut dl, c(0.0, 0.0), c(1.0, 0.0), c(3.0, 0.0));
        assert_eq!(dl.distance(), Some(3.0));
    }

    #[test]
    fn parallel_segments_use_endpoints() {
        let w = segment_segment_distance(c(0.0, 0.0), c(2.0, 0.0), c(1.0, 1.0), c(3.0, 1.0));
        assert_eq!(w.distance, 1.0);
        assert_eq!(w.p1, c(1.0, 0.0));
        assert_eq!(w.p2, c(1.0, 1.0));
    }

    #[test]
    fn shared_endpoint_is_the_intersection_witness() {
        let w = segment_segment_distance(c(0.0, 0.0), c(1.0, 1.0), c(1.0, 1.0), c(2.0, 0.0));
        assert_eq!(w.distance, 0.0);
        assert_eq!(w.p1, c(1.0, 1.0));
    }

    #[test]
    fn arc_center_of_unit_circle() {
        let (center, r) = arc_center(c(-1.0, 0.0), c(0.0, 1.0), c(1.0, 0.0)).unwrap();
        assert!(center.x.abs() < 1e-12 && center.y.abs() < 1e-12);
        assert!((r - 1.0).abs() < 1e-12);
        assert!(arc_center(c(0.0, 0.0), c(1.0, 1.0), c(2.0, 2.0)).is_none());
    }

    #[test]
    fn full_circle_center_is_diameter_midpoint() {
        let (center, r) = arc_center(c(0.0, 0.0), c(2.0, 0.0), c(0.0, 0.0)).unwrap();
        assert_eq!(center, c(1.0, 0.0));
        assert_eq!(r, 1.0);
    }

    #[test]
    fn point_beside_arc_falls_back_to_endpoints() {
        // upper half circle, point below the centre: nearest is an endpoint
        let w =
            point_arc_distance(c(0.0, -1.0), c(-1.0, 0.0), c(0.0, 1.0), c(1.0, 0.0)).unwrap();
        assert!((w.distance - 2f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn point_at_centre_is_radius_away() {
        let w = point_arc_distance(c(0.0, 0.0), c(-1.0, 0.0), c(0.0, 1.0), c(1.0, 0.0)).unwrap();
        assert!((w.distance - 1.0).abs() < 1e-12);
    }

    #[test]
    fn colinear_arc_is_a_segment() {
        let w = point_arc_distance(c(1.0, 1.0), c(0.0, 0.0), c(1.0, 0.0), c(2.0, 0.0)).unwrap();
        assert_eq!(w.distance, 1.0);
    }

    #[test]
    fn segment_crossing_arc_is_zero() {
        let w = segment_arc_distance(
            c(0.0, 0.0),
            c(0.0, 5.0),
            c(-1.0, 0.0),
            c(0.0, 1.0),
            c(1.0, 0.0),
        )
        .unwrap();
        assert_eq!(w.distance, 0.0);
        assert!((w.p1.y - 1.0).abs() < 1e-12);
    }

    #[test]
    fn segment_above_arc_hits_the_crest() {
        let w = segment_arc_distance(
            c(-5.0, 3.0),
            c(5.0, 3.0),
            c(-1.0, 0.0),
            c(0.0, 1.0),
            c(1.0, 0.0),
        )
        .unwrap();
        assert!((w.distance - 2.0).abs() < 1e-12);
        assert!((w.p2.y - 1.0).abs() < 1e-12);
    }

    #[test]
    fn segment_inside_circle_reaches_arc_from_an_end() {
        // chord strictly inside the upper half disc
        let w = segment_arc_distance(
            c(-0.5, 0.5),
            c(0.5, 0.5),
            c(-1.0, 0.0),
            c(0.0, 1.0),
            c(1.0, 0.0),
        )
        .unwrap();
        let expected = 1.0 - (0.5f64 * 0.5 + 0.5 * 0.5).sqrt();
        assert!((w.distance - expected).abs() < 1e-12);
    }

    #[test]
    fn facing_arcs_meet_on_centre_line() {
        // unit upper arc around the origin and unit lower arc around (0, 5)
        let w = arc_arc_distance(
            c(-1.0, 0.0),
            c(0.0, 1.0),
            c(1.0, 0.0),
            c(-1.0, 5.0),
            c(0.0, 4.0),
            c(1.0, 5.0),
        )
        .unwrap();
        assert!((w.distance - 3.0).abs() < 1e-12);
    }

    #[test]
    fn crossing_arcs_are_zero() {
        let w = arc_arc_distance(
            c(-1.0, 0.0),
            c(0.0, 1.0),
            c(1.0, 0.0),
            c(0.0, 0.0),
            c(1.0, 1.0),
            c(2.0, 0.0),
        )
        .unwrap();
        assert_eq!(w.distance, 0.0);
    }

    #[test]
    fn arcs_reject_max_mode() {
        let mut dl = DistPts::new(DistanceMode::Max);
        let err = pt_arc(&mut dl, c(0.0, 0.0), c(1.0, 0.0), c(2.0, 1.0), c(3.0, 0.0)).unwrap_err();
        assert!(matches!(err, GeomError::MaxDistanceUnsupported(_)));
    }

    #[test]
    fn sweep_direction_follows_orientation() {
        let ccw = arc_sweep(c(1.0, 0.0), c(0.0, 1.0), c(-1.0, 0.0)).unwrap();
        assert!((ccw.sweep - std::f64::consts::PI).abs() < 1e-12);
        let cw = arc_sweep(c(-1.0, 0.0), c(0.0, 1.0), c(1.0, 0.0)).unwrap();
        assert!((cw.sweep + std::f64::consts::PI).abs() < 1e-12);
        assert_eq!(vertical_extreme_cuts(&cw).len(), 1);
    }
}
