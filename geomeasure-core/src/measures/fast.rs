//! Sorted-projection search for vertex sequences with disjoint boxes.
//!
//! Vertices of both sequences are projected onto the line joining the box
//! centres and sorted. Walking inward from the facing ends, a vertex pair whose
//! projected gap exceeds the best distance found so far (scaled for the
//! projection) cannot improve it, which bounds the search.

use geo::Coord;

use super::primitives::{pt_pt, pt_seg};
use super::DistPts;
use crate::geometry::{GBox, PointArray};

#[derive(Debug, Clone, Copy)]
struct Measured {
    measure: f64,
    index: usize,
}

fn measured(pa: &PointArray, measure: impl Fn(Coord<f64>) -> f64) -> Vec<Measured> {
    let mut list: Vec<Measured> = pa
        .coords()
        .enumerate()
        .map(|(index, c)| Measured {
            measure: measure(c),
            index,
        })
        .collect();
    list.sort_by(|a, b| a.measure.total_cmp(&b.measure));
    list
}

pub(crate) fn distance_fast(
    dl: &mut DistPts,
    l1: &PointArray,
    l2: &PointArray,
    box1: &GBox,
    box2: &GBox,
) {
    if l1.is_empty() || l2.is_empty() {
        return;
    }
    let c1 = box1.center();
    let c2 = box2.center();
    let dx = c2.x - c1.x;
    let dy = c2.y - c1.y;

    // measure along the axis the centres are furthest apart on
    let north_south = dx * dx < dy * dy;
    let k = if north_south { -dx / dy } else { -dy / dx };
    let measure = |c: Coord<f64>| {
        if north_south {
            c.y - k * c.x
        } else {
            c.x - k * c.y
        }
    };

    let list1 = measured(l1, measure);
    let list2 = measured(l2, measure);

    if measure(c1) < measure(c2) {
        pre_seg_seg(dl, l1, l2, &list1, &list2, k);
    } else {
        dl.swapped_infallible(|dl| pre_seg_seg(dl, l2, l1, &list2, &list1, k));
    }
}

/// Neighbour of vertex `index` in direction `step`, wrapping only around closed rings.
fn neighbour(pa: &PointArray, index: usize, step: isize) -> usize {
    let n = pa.len();
    let closed = n > 2 && pa.coord(0) == pa.coord(n - 1);
    if step < 0 && index == 0 {
        if closed {
            n - 2
        } else {
            index
        }
    } else if step > 0 && index + 1 >= n {
        if closed {
            1
        } else {
            index
        }
    } else if step < 0 {
        index - 1
    } else {
        index + 1
    }
}

fn pre_seg_seg(
    dl: &mut DistPts,
    l1: &PointArray,
    l2: &PointArray,
    list1: &[Measured],
    list2: &[Measured],
    k: f64,
) {
    let bound = |d: f64| (d * d + d * d * k * k).sqrt();

    pt_pt(dl, l1.coord(list1[0].index), l2.coord(list2[0].index));
    let mut max_measure = bound(dl.raw_distance());

    for m1 in list1.iter().rev() {
        if list2[0].measure - m1.measure > max_measure {
            break;
        }
        let p1 = l1.coord(m1.index);
        for step in [-1, 1] {
            let p2 = l1.coord(neighbour(l1, m1.index, step));
            for m2 in list2 {
                if m2.measure - m1.measure >= max_measure {
                    break;
                }
                let p3 = l2.coord(m2.index);
                let before = l2.coord(neighbour(l2, m2.index, -1));
                selected_seg_seg(dl, p1, p2, p3, before);
                let after = l2.coord(neighbour(l2, m2.index, 1));
                selected_seg_seg(dl, p1, p2, p3, after);
                max_measure = bound(dl.raw_distance());
            }
        }
    }
}

/// Segments known not to cross: the nearest pair involves an endpoint.
fn selected_seg_seg(
    dl: &mut DistPts,
    a: Coord<f64>,
    b: Coord<f64>,
    c: Coord<f64>,
    d: Coord<f64>,
) {
    if a == b {
        return pt_seg(dl, a, c, d);
    }
    if c == d {
        return dl.swapped_infallible(|dl| pt_seg(dl, d, a, b));
    }
    pt_seg(dl, a, c, d);
    pt_seg(dl, b, c, d);
    dl.swapped_infallible(|dl| {
        pt_seg(dl, c, a, b);
        pt_seg(dl, d, a, b);
    });
}
