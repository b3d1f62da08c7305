//! Distance engine behaviour through the public API.

#[allow(deprecated)]
use geo::algorithm::euclidean_distance::EuclideanDistance;
use geomeasure_core::convert::to_geo;
use geomeasure_core::geometry::{CollectionKind, Geometry, GeometryType, PointArray};
use geomeasure_core::measures::{
    closest_point_2d, distance_2d, is_within_distance_2d, max_distance_2d, min_distance_2d,
    shortest_line_2d, DistPts, DistanceMode,
};
use geomeasure_core::GeomError;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn line(coords: &[(f64, f64)]) -> Geometry {
    Geometry::line(PointArray::from_xy(coords))
}

fn ring(coords: &[(f64, f64)]) -> PointArray {
    PointArray::from_xy(coords)
}

fn witnesses(a: &Geometry, b: &Geometry) -> (f64, (f64, f64), (f64, f64)) {
    let mut dl = DistPts::new(DistanceMode::Min);
    distance_2d(a, b, &mut dl).unwrap();
    let (p1, p2) = dl.witnesses().unwrap();
    (dl.distance().unwrap(), (p1.x, p1.y), (p2.x, p2.y))
}

fn close(a: (f64, f64), b: (f64, f64)) -> bool {
    (a.0 - b.0).abs() < 1e-12 && (a.1 - b.1).abs() < 1e-12
}

// ── Concrete cases ────────────────────────────────────────────────────────────

#[test]
fn point_to_point() {
    let d = min_distance_2d(&Geometry::point(0.0, 0.0), &Geometry::point(3.0, 4.0)).unwrap();
    assert_eq!(d, Some(5.0));
}

#[test]
fn point_to_segment_projects_onto_the_end() {
    let p = Geometry::point(0.0, 0.0);
    let l = line(&[(1.0, 0.0), (1.0, 1.0)]);
    assert_eq!(witnesses(&p, &l), (1.0, (0.0, 0.0), (1.0, 0.0)));
}

#[test]
fn crossing_segments_touch() {
    let a = line(&[(0.0, 0.0), (2.0, 0.0)]);
    let b = line(&[(1.0, -1.0), (1.0, 1.0)]);
    let (d, p1, p2) = witnesses(&a, &b);
    assert_eq!(d, 0.0);
    assert_eq!(p1, (1.0, 0.0));
    assert_eq!(p1, p2);
}

#[test]
fn point_in_hole_is_outside_the_polygon() {
    let shell = ring(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0), (0.0, 0.0)]);
    let hole = ring(&[(2.0, 2.0), (8.0, 2.0), (8.0, 8.0), (2.0, 8.0), (2.0, 2.0)]);
    let poly = Geometry::polygon(vec![shell, hole]);
    assert_eq!(min_distance_2d(&Geometry::point(5.0, 5.0), &poly).unwrap(), Some(3.0));
    assert_eq!(min_distance_2d(&Geometry::point(1.0, 5.0), &poly).unwrap(), Some(0.0));
}

#[test]
fn empty_multipoint_has_no_answer() {
    let empty = Geometry::empty(GeometryType::MultiPoint, false, false);
    let p = Geometry::point(1.0, 1.0);
    assert_eq!(min_distance_2d(&empty, &p).unwrap(), None);
    assert_eq!(max_distance_2d(&p, &empty).unwrap(), None);
    assert_eq!(closest_point_2d(&empty, &p).unwrap(), None);
    assert!(!is_within_distance_2d(&empty, &p, 1e9).unwrap());
}

#[test]
fn collections_take_the_nearest_member() {
    let mp = Geometry::collection(
        CollectionKind::MultiPoint,
        vec![Geometry::point(10.0, 0.0), Geometry::point(0.0, 2.0)],
    )
    .unwrap();
    let gc = Geometry::collection(
        CollectionKind::GeometryCollection,
        vec![line(&[(5.0, 5.0), (6.0, 6.0)]), mp],
    )
    .unwrap();
    assert_eq!(min_distance_2d(&gc, &Geometry::point(0.0, 0.0)).unwrap(), Some(2.0));
}

#[test]
fn mixed_srid_is_rejected() {
    let a = Geometry::point(0.0, 0.0).with_srid(4326);
    let b = Geometry::point(1.0, 1.0).with_srid(3857);
    assert!(matches!(
        min_distance_2d(&a, &b),
        Err(GeomError::MixedSrid {
            left: 4326,
            right: 3857
        })
    ));
}

#[test]
fn max_distance_picks_the_far_corner() {
    let square = Geometry::polygon(vec![ring(&[
        (0.0, 0.0),
        (2.0, 0.0),
        (2.0, 2.0),
        (0.0, 2.0),
        (0.0, 0.0),
    ])]);
    let p = Geometry::point(5.0, 6.0);
    let d = max_distance_2d(&square, &p).unwrap().unwrap();
    assert!((d - 61f64.sqrt()).abs() < 1e-12);
}

// ── Curves ────────────────────────────────────────────────────────────────────

#[test]
fn point_above_an_arc() {
    let arc = Geometry::circular_string(PointArray::from_xy(&[(-1.0, 0.0), (0.0, 1.0), (1.0, 0.0)]));
    let d = min_distance_2d(&arc, &Geometry::point(0.0, 3.0)).unwrap().unwrap();
    assert!((d - 2.0).abs() < 1e-12);

    // below the chord the nearest point is an arc end
    let d = min_distance_2d(&arc, &Geometry::point(0.0, -1.0)).unwrap().unwrap();
    assert!((d - 2f64.sqrt()).abs() < 1e-12);
}

#[test]
fn point_inside_a_circle_polygon() {
    let circle = Geometry::circular_string(PointArray::from_xy(&[
        (-1.0, 0.0),
        (1.0, 0.0),
        (-1.0, 0.0),
    ]));
    let cp = Geometry::curve_polygon(vec![circle]).unwrap();
    assert_eq!(min_distance_2d(&cp, &Geometry::point(0.2, 0.1)).unwrap(), Some(0.0));
    let d = min_distance_2d(&cp, &Geometry::point(0.0, 4.0)).unwrap().unwrap();
    assert!((d - 3.0).abs() < 1e-12);
}

// ── Symmetry ──────────────────────────────────────────────────────────────────

#[test]
fn swapping_operands_swaps_witnesses() {
    let cases = [
        (Geometry::point(0.0, 0.0), line(&[(1.0, -1.0), (2.0, 3.0)])),
        (
            line(&[(0.0, 0.0), (1.0, 2.0), (4.0, 2.5)]),
            Geometry::polygon(vec![ring(&[
                (5.0, 5.0),
                (9.0, 5.0),
                (9.0, 9.0),
                (5.0, 9.0),
                (5.0, 5.0),
            ])]),
        ),
        (
            Geometry::circular_string(PointArray::from_xy(&[(0.0, 0.0), (1.0, 1.0), (2.0, 0.0)])),
            line(&[(3.0, 3.0), (4.0, 5.0)]),
        ),
    ];
    for (a, b) in &cases {
        let (d_ab, p1_ab, p2_ab) = witnesses(a, b);
        let (d_ba, p1_ba, p2_ba) = witnesses(b, a);
        assert!((d_ab - d_ba).abs() < 1e-12);
        assert!(close(p1_ab, p2_ba) && close(p2_ab, p1_ba));

        let sl = shortest_line_2d(a, b).unwrap().unwrap();
        assert_eq!(sl.start_point().map(|c| (c.x, c.y)), Some(p1_ab));
    }
}

// ── Reference and randomized checks ───────────────────────────────────────────

fn random_line(rng: &mut StdRng, x0: f64, y0: f64, n: usize) -> Geometry {
    let coords: Vec<(f64, f64)> = (0..n)
        .map(|_| (x0 + rng.random_range(-5.0..5.0), y0 + rng.random_range(-5.0..5.0)))
        .collect();
    line(&coords)
}

#[allow(deprecated)]
fn geo_distance(a: &Geometry, b: &Geometry) -> f64 {
    match (to_geo(a).unwrap(), to_geo(b).unwrap()) {
        (geo::Geometry::LineString(la), geo::Geometry::LineString(lb)) => la.euclidean_distance(&lb),
        (geo::Geometry::Point(p), geo::Geometry::Polygon(poly)) => p.euclidean_distance(&poly),
        other => panic!("unexpected pair {other:?}"),
    }
}

#[test]
fn disjoint_lines_agree_with_geo() {
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..200 {
        let (na, nb): (usize, usize) = (rng.random_range(2..20), rng.random_range(2..20));
        let (x0, y0) = (rng.random_range(8.0..30.0), rng.random_range(-20.0..20.0));
        let a = random_line(&mut rng, 0.0, 0.0, na);
        let b = random_line(&mut rng, x0, y0, nb);
        let ours = min_distance_2d(&a, &b).unwrap().unwrap();
        let reference = geo_distance(&a, &b);
        assert!(
            (ours - reference).abs() < 1e-9,
            "ours {ours} vs geo {reference}"
        );
    }
}

#[test]
fn points_against_polygons_agree_with_geo() {
    let mut rng = StdRng::seed_from_u64(7);
    let poly = Geometry::polygon(vec![
        ring(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0), (0.0, 0.0)]),
        ring(&[(3.0, 3.0), (6.0, 3.0), (6.0, 6.0), (3.0, 6.0), (3.0, 3.0)]),
    ]);
    for _ in 0..200 {
        let p = Geometry::point(rng.random_range(-5.0..15.0), rng.random_range(-5.0..15.0));
        let ours = min_distance_2d(&p, &poly).unwrap().unwrap();
        let reference = geo_distance(&p, &poly);
        assert!((ours - reference).abs() < 1e-9, "ours {ours} vs geo {reference}");
    }
}

#[test]
fn within_distance_matches_min_distance() {
    let mut rng = StdRng::seed_from_u64(2024);
    for _ in 0..300 {
        let (na, nb): (usize, usize) = (rng.random_range(2..8), rng.random_range(2..8));
        let (x0, y0) = (rng.random_range(-15.0..15.0), rng.random_range(-15.0..15.0));
        let a = random_line(&mut rng, 0.0, 0.0, na);
        let b = random_line(&mut rng, x0, y0, nb);
        let t = rng.random_range(0.0..10.0);
        let min = min_distance_2d(&a, &b).unwrap().unwrap();
        assert_eq!(is_within_distance_2d(&a, &b, t).unwrap(), min <= t, "min {min}, t {t}");
    }
}

#[test]
fn cached_box_is_stable() {
    let mut rng = StdRng::seed_from_u64(99);
    let mut g = random_line(&mut rng, 0.0, 0.0, 12);
    let fresh = g.calculate_bbox();
    g.add_bbox();
    let first = g.bbox().cloned();
    g.add_bbox();
    assert_eq!(g.bbox().cloned(), first);
    assert_eq!(first, fresh);
}
