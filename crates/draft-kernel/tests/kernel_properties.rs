//! Property tests over the public kernel API.

use approx::{assert_abs_diff_eq, assert_relative_eq};
use draft_kernel::construct::parallel_offset;
use draft_kernel::snap::no_feature;
use draft_kernel::{
    Bounds, HatchSpec, InteractionContext, PatternKind, Point, Segment, circumcenter, clip, distance_point_to_segment,
    line_intersection, solve_snap, tile,
};
use proptest::prelude::*;

fn coord() -> impl Strategy<Value = f64> {
    -1000.0..1000.0f64
}

fn point() -> impl Strategy<Value = Point> {
    (coord(), coord()).prop_map(|(x, y)| Point::new(x, y))
}

proptest! {
    #[test]
    fn points_on_a_segment_have_zero_distance(a in point(), b in point(), t in 0.0..=1.0f64) {
        let p = a.lerp(b, t);
        prop_assert!(distance_point_to_segment(p, a, b) < 1e-9);
    }

    #[test]
    fn distance_never_exceeds_nearest_endpoint(p in point(), a in point(), b in point()) {
        let d = distance_point_to_segment(p, a, b);
        prop_assert!(d <= p.distance(a).min(p.distance(b)) + 1e-9);
    }

    #[test]
    fn clipped_segments_stay_in_the_rect(a in point(), b in point()) {
        let bounds = Bounds::rect(-100.0, -50.0, 200.0, 150.0).unwrap();
        if let Some(s) = clip(&Segment::new(a, b), &bounds) {
            for p in [s.start, s.end] {
                prop_assert!(p.x >= -100.0 - 1e-9 && p.x <= 200.0 + 1e-9);
                prop_assert!(p.y >= -50.0 - 1e-9 && p.y <= 150.0 + 1e-9);
            }
        }
    }

    #[test]
    fn inside_segments_are_unchanged(x1 in 0.0..10.0f64, y1 in 0.0..10.0f64, x2 in 0.0..10.0f64, y2 in 0.0..10.0f64) {
        let bounds = Bounds::rect(0.0, 0.0, 10.0, 10.0).unwrap();
        let s = Segment::from_coords(x1, y1, x2, y2);
        prop_assert_eq!(clip(&s, &bounds), Some(s));
    }

    #[test]
    fn circumcenter_is_equidistant(a in point(), b in point(), c in point()) {
        if let Some(center) = circumcenter(a, b, c) {
            let r = center.distance(a);
            prop_assume!(r < 1e6);
            prop_assert!((center.distance(b) - r).abs() <= 1e-6 * r.max(1.0));
            prop_assert!((center.distance(c) - r).abs() <= 1e-6 * r.max(1.0));
        }
    }

    #[test]
    fn snapped_angle_is_a_multiple_of_the_increment(reference in point(), raw in point()) {
        prop_assume!(reference.distance(raw) > 1e-3);
        let result = solve_snap(raw, Some(reference), no_feature, &InteractionContext::default());
        let steps = result.angle / 5.0;
        prop_assert!((steps - steps.round()).abs() < 1e-9);
        prop_assert!(result.angle >= 0.0 && result.angle < 360.0);
        let tenths = result.distance / 0.1;
        prop_assert!((tenths - tenths.round()).abs() < 1e-6);
    }

    #[test]
    fn offset_keeps_the_requested_distance(a in point(), b in point(), side in point(), d in 0.1..50.0f64) {
        prop_assume!(a.distance(b) > 1e-3);
        let out = parallel_offset(&Segment::new(a, b), side, d).unwrap();
        prop_assert!((distance_point_to_line(out.start, a, b) - d).abs() < 1e-6);
        prop_assert!((distance_point_to_line(out.end, a, b) - d).abs() < 1e-6);
    }

    #[test]
    fn tiling_is_idempotent(spacing in 1.0..20.0f64, angle in -180.0..180.0f64, seed in any::<u64>(), index in 0usize..28) {
        let bounds = Bounds::polygon(vec![
            Point::new(0.0, 0.0),
            Point::new(80.0, 0.0),
            Point::new(80.0, 60.0),
            Point::new(40.0, 20.0),
            Point::new(0.0, 60.0),
        ]).unwrap();
        let kind = PatternKind::all()[index];
        let spec = HatchSpec::new(kind, spacing, angle).unwrap().with_seed(seed);
        prop_assert_eq!(tile(&bounds, &spec), tile(&bounds, &spec));
    }
}

fn distance_point_to_line(p: Point, a: Point, b: Point) -> f64 {
    let d = b - a;
    (p - a).cross(d).abs() / d.length()
}

#[test]
fn fixed_examples() {
    assert_eq!(
        distance_point_to_segment(Point::new(5.0, 5.0), Point::new(0.0, 0.0), Point::new(10.0, 0.0)),
        5.0
    );

    let center = circumcenter(Point::new(0.0, 0.0), Point::new(2.0, 0.0), Point::new(0.0, 2.0)).unwrap();
    assert_relative_eq!(center.x, 1.0, epsilon = 1e-12);
    assert_relative_eq!(center.distance(Point::new(0.0, 0.0)), 2f64.sqrt(), epsilon = 1e-12);
    assert!(circumcenter(Point::new(0.0, 0.0), Point::new(1.0, 1.0), Point::new(2.0, 2.0)).is_none());

    let x = line_intersection(Point::new(0.0, 0.0), Point::new(10.0, 10.0), Point::new(0.0, 10.0), Point::new(10.0, 0.0));
    assert_eq!(x, Some(Point::new(5.0, 5.0)));
    assert!(
        line_intersection(Point::new(0.0, 0.0), Point::new(10.0, 0.0), Point::new(0.0, 5.0), Point::new(10.0, 5.0))
            .is_none()
    );

    let bounds = Bounds::rect(0.0, 0.0, 10.0, 10.0).unwrap();
    assert!(clip(&Segment::from_coords(20.0, 20.0, 30.0, 30.0), &bounds).is_none());

    let offset = parallel_offset(&Segment::from_coords(0.0, 0.0, 10.0, 0.0), Point::new(5.0, 1.0), 5.0).unwrap();
    assert_eq!(offset, Segment::from_coords(0.0, 5.0, 10.0, 5.0));
}

#[test]
fn ten_by_ten_rect_at_spacing_two() {
    let bounds = Bounds::rect(0.0, 0.0, 10.0, 10.0).unwrap();
    let spec = HatchSpec::new(PatternKind::Parallel, 2.0, 0.0).unwrap();
    let lines = tile(&bounds, &spec);
    assert!((4..=6).contains(&lines.len()), "got {} lines", lines.len());
    for primitive in &lines {
        for p in primitive.points() {
            assert!((-1e-9..=10.0 + 1e-9).contains(&p.x));
            assert!((-1e-9..=10.0 + 1e-9).contains(&p.y));
        }
    }
}

#[test]
fn snap_rounding_examples() {
    let ctx = InteractionContext::default();
    let origin = Point::new(0.0, 0.0);
    for (raw_deg, expected) in [(37.0_f64, 35.0), (38.0, 40.0), (358.0, 0.0)] {
        let raw = Point::from_angle(raw_deg.to_radians()) * 10.0;
        let result = solve_snap(raw, Some(origin), no_feature, &ctx);
        assert_abs_diff_eq!(result.angle, expected, epsilon = 1e-9);
        assert_abs_diff_eq!(result.distance, 10.0, epsilon = 1e-9);
    }
}
