//! Pointer snapping: feature snaps first, polar increments second.
//!
//! Feature detection (which endpoints or intersections are near the cursor)
//! belongs to whoever owns the drawing; it reaches the solver as a probe
//! closure. Modifier keys and increments come in through an explicit
//! [`InteractionContext`] on every call.
//!
//! Angles in this module are degrees, counter-clockwise from +X, in `[0, 360)`.

use crate::error::{KernelError, Result, require_positive};
use crate::geometry::{Point, Segment};
use crate::segment::segments_cross;

pub const DEFAULT_ANGLE_INCREMENT: f64 = 5.0;
pub const DEFAULT_DISTANCE_INCREMENT: f64 = 0.1;

/// What a snapped point locked onto. Ordered from weakest to strongest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SnapKind {
    None,
    PolarDistance,
    PolarAngle,
    Endpoint,
    Intersection,
}

impl SnapKind {
    /// Endpoint and intersection snaps come from scene features.
    #[inline]
    pub fn is_feature(self) -> bool {
        matches!(self, SnapKind::Endpoint | SnapKind::Intersection)
    }

    /// Default tie-break priority. Feature kinds outrank polar kinds.
    #[inline]
    pub fn default_priority(self) -> u8 {
        match self {
            SnapKind::None => 0,
            SnapKind::PolarDistance => 10,
            SnapKind::PolarAngle => 20,
            SnapKind::Endpoint => 40,
            SnapKind::Intersection => 50,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SnapKind::None => "none",
            SnapKind::PolarDistance => "polar-distance",
            SnapKind::PolarAngle => "polar-angle",
            SnapKind::Endpoint => "endpoint",
            SnapKind::Intersection => "intersection",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapCandidate {
    pub point: Point,
    pub kind: SnapKind,
    pub priority: u8,
}

impl SnapCandidate {
    pub fn new(point: Point, kind: SnapKind) -> Self {
        Self { point, kind, priority: kind.default_priority() }
    }

    pub fn with_priority(mut self, priority: u8) -> Self {
        self.priority = priority;
        self
    }
}

/// Modifier state and increments for one snap call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InteractionContext {
    precision_override: bool,
    angle_increment: f64,
    distance_increment: f64,
}

impl Default for InteractionContext {
    fn default() -> Self {
        Self {
            precision_override: false,
            angle_increment: DEFAULT_ANGLE_INCREMENT,
            distance_increment: DEFAULT_DISTANCE_INCREMENT,
        }
    }
}

impl InteractionContext {
    pub fn new(precision_override: bool, angle_increment: f64, distance_increment: f64) -> Result<Self> {
        Ok(Self {
            precision_override,
            angle_increment: require_positive("angle increment", angle_increment)?,
            distance_increment: require_positive("distance increment", distance_increment)?,
        })
    }

    /// Same increments with the override flag set or cleared.
    pub fn with_precision_override(self, precision_override: bool) -> Self {
        Self { precision_override, ..self }
    }

    #[inline]
    pub fn precision_override(&self) -> bool {
        self.precision_override
    }

    #[inline]
    pub fn angle_increment(&self) -> f64 {
        self.angle_increment
    }

    #[inline]
    pub fn distance_increment(&self) -> f64 {
        self.distance_increment
    }
}

/// Snapped point plus the polar readout relative to the reference point,
/// so tooltips need no recomputation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapResult {
    pub point: Point,
    pub distance: f64,
    pub angle: f64,
    pub kind: SnapKind,
}

impl SnapResult {
    fn measured(point: Point, reference: Option<Point>, kind: SnapKind) -> Self {
        let (distance, angle) = match reference {
            Some(r) => polar(r, point),
            None => (0.0, 0.0),
        };
        Self { point, distance, angle, kind }
    }
}

/// Wrap degrees into `[0, 360)`.
#[inline]
pub fn normalize_degrees(degrees: f64) -> f64 {
    let wrapped = degrees.rem_euclid(360.0);
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Distance and direction (degrees) from `reference` to `p`.
#[inline]
pub fn polar(reference: Point, p: Point) -> (f64, f64) {
    let d = p - reference;
    (d.length(), normalize_degrees(d.angle().to_degrees()))
}

/// Nearest multiple of `increment`, halves rounded away from zero.
#[inline]
pub fn round_to_increment(value: f64, increment: f64) -> f64 {
    (value / increment).round() * increment
}

/// Round an angle to the increment; a result of 360 wraps to 0.
#[inline]
pub fn snap_angle(degrees: f64, increment: f64) -> f64 {
    normalize_degrees(round_to_increment(normalize_degrees(degrees), increment))
}

/// Resolve the pointer position for one pointer event.
///
/// 1. A feature candidate from `probe` wins outright.
/// 2. Otherwise, with a reference point and no precision override, the
///    polar angle and distance are rounded to the context's increments.
/// 3. Without a reference point, the raw point is returned.
pub fn solve_snap<F>(raw: Point, reference: Option<Point>, probe: F, ctx: &InteractionContext) -> SnapResult
where
    F: FnOnce(Point) -> Option<SnapCandidate>,
{
    if let Some(candidate) = probe(raw).filter(|c| c.kind.is_feature()) {
        return SnapResult::measured(candidate.point, reference, candidate.kind);
    }

    let Some(reference) = reference else {
        return SnapResult::measured(raw, None, SnapKind::None);
    };

    let (distance, angle) = polar(reference, raw);
    if ctx.precision_override || distance == 0.0 {
        return SnapResult { point: raw, distance, angle, kind: SnapKind::None };
    }

    let snapped_angle = snap_angle(angle, ctx.angle_increment);
    let snapped_distance = round_to_increment(distance, ctx.distance_increment);
    let point = reference + Point::from_angle(snapped_angle.to_radians()) * snapped_distance;

    let angle_moved = {
        let diff = (snapped_angle - angle).abs();
        diff.min(360.0 - diff) > 1e-9
    };
    let kind = if angle_moved {
        SnapKind::PolarAngle
    } else if (snapped_distance - distance).abs() > 1e-9 {
        SnapKind::PolarDistance
    } else {
        SnapKind::None
    };

    SnapResult { point, distance: snapped_distance, angle: snapped_angle, kind }
}

/// A probe that never finds a feature, for callers without scene geometry.
pub fn no_feature(_: Point) -> Option<SnapCandidate> {
    None
}

/// Strongest candidate within `tolerance` of `cursor`: highest priority,
/// then nearest.
pub fn best_candidate(cursor: Point, candidates: &[SnapCandidate], tolerance: f64) -> Option<SnapCandidate> {
    let tol_sq = tolerance * tolerance;
    candidates
        .iter()
        .map(|c| (c, c.point.distance_squared(cursor)))
        .filter(|(_, d)| *d <= tol_sq)
        .max_by(|(a, da), (b, db)| a.priority.cmp(&b.priority).then(db.total_cmp(da)))
        .map(|(c, _)| *c)
}

/// A ready-made feature probe over caller-supplied geometry.
///
/// The caller rebuilds it when its drawing changes; [`FeatureSet::probe`]
/// plugs straight into [`solve_snap`].
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureSet {
    tolerance: f64,
    candidates: Vec<SnapCandidate>,
}

impl FeatureSet {
    pub fn new(tolerance: f64) -> Result<Self> {
        Ok(Self { tolerance: require_positive("snap tolerance", tolerance)?, candidates: Vec::new() })
    }

    /// Endpoints of every segment plus every pairwise crossing.
    pub fn from_segments(segments: &[Segment], tolerance: f64) -> Result<Self> {
        let mut set = Self::new(tolerance)?;
        for segment in segments {
            set.add_segment_endpoints(segment);
        }
        set.add_crossings(segments);
        Ok(set)
    }

    pub fn add(&mut self, candidate: SnapCandidate) -> Result<()> {
        if !candidate.point.is_finite() {
            return Err(KernelError::NonFinite { what: "snap candidate" });
        }
        self.candidates.push(candidate);
        Ok(())
    }

    pub fn add_segment_endpoints(&mut self, segment: &Segment) {
        for p in [segment.start, segment.end] {
            if p.is_finite() {
                self.candidates.push(SnapCandidate::new(p, SnapKind::Endpoint));
            }
        }
    }

    pub fn add_crossings(&mut self, segments: &[Segment]) {
        for (i, a) in segments.iter().enumerate() {
            for b in &segments[i + 1..] {
                if let Some(point) = segments_cross(a, b) {
                    self.candidates.push(SnapCandidate::new(point, SnapKind::Intersection));
                }
            }
        }
    }

    #[inline]
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    #[inline]
    pub fn candidates(&self) -> &[SnapCandidate] {
        &self.candidates
    }

    pub fn probe(&self, cursor: Point) -> Option<SnapCandidate> {
        best_candidate(cursor, &self.candidates, self.tolerance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn p(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    fn at(deg: f64, dist: f64) -> Point {
        Point::from_angle(deg.to_radians()) * dist
    }

    #[test]
    fn angle_rounding_convention() {
        assert_eq!(snap_angle(37.0, 5.0), 35.0);
        assert_eq!(snap_angle(38.0, 5.0), 40.0);
        assert_eq!(snap_angle(37.5, 5.0), 40.0);
        assert_eq!(snap_angle(358.0, 5.0), 0.0);
        assert_eq!(snap_angle(-2.0, 5.0), 0.0);
    }

    #[test]
    fn polar_snap_rounds_angle_and_distance() {
        let ctx = InteractionContext::default();
        let result = solve_snap(at(37.0, 10.04), Some(p(0.0, 0.0)), no_feature, &ctx);
        assert_relative_eq!(result.angle, 35.0, epsilon = 1e-12);
        assert_relative_eq!(result.distance, 10.0, epsilon = 1e-12);
        assert_eq!(result.kind, SnapKind::PolarAngle);
        let expected = at(35.0, 10.0);
        assert_relative_eq!(result.point.x, expected.x, epsilon = 1e-9);
        assert_relative_eq!(result.point.y, expected.y, epsilon = 1e-9);
    }

    #[test]
    fn distance_only_snap_reports_distance_kind() {
        let ctx = InteractionContext::default();
        let result = solve_snap(p(12.34, 0.0), Some(p(2.0, 0.0)), no_feature, &ctx);
        assert_eq!(result.kind, SnapKind::PolarDistance);
        assert_relative_eq!(result.point.x, 12.3, epsilon = 1e-9);
        assert_eq!(result.angle, 0.0);
    }

    #[test]
    fn precision_override_keeps_raw_point() {
        let ctx = InteractionContext::default().with_precision_override(true);
        let raw = at(37.0, 10.04);
        let result = solve_snap(raw, Some(p(0.0, 0.0)), no_feature, &ctx);
        assert_eq!(result.point, raw);
        assert_eq!(result.kind, SnapKind::None);
        assert_relative_eq!(result.angle, 37.0, epsilon = 1e-9);
    }

    #[test]
    fn feature_snap_beats_polar() {
        let ctx = InteractionContext::default();
        let corner = p(3.3, 4.4);
        let result = solve_snap(
            p(3.0, 4.0),
            Some(p(0.0, 0.0)),
            |_| Some(SnapCandidate::new(corner, SnapKind::Endpoint)),
            &ctx,
        );
        assert_eq!(result.point, corner);
        assert_eq!(result.kind, SnapKind::Endpoint);
        assert_relative_eq!(result.distance, 5.5, epsilon = 1e-12);
    }

    #[test]
    fn feature_snap_ignores_override() {
        let ctx = InteractionContext::default().with_precision_override(true);
        let result = solve_snap(
            p(1.0, 1.0),
            None,
            |_| Some(SnapCandidate::new(p(1.1, 1.0), SnapKind::Intersection)),
            &ctx,
        );
        assert_eq!(result.kind, SnapKind::Intersection);
    }

    #[test]
    fn no_reference_returns_raw() {
        let result = solve_snap(p(7.0, 8.0), None, no_feature, &InteractionContext::default());
        assert_eq!(result.point, p(7.0, 8.0));
        assert_eq!(result.kind, SnapKind::None);
    }

    #[test]
    fn pointer_on_reference_is_not_snapped() {
        let result = solve_snap(p(1.0, 1.0), Some(p(1.0, 1.0)), no_feature, &InteractionContext::default());
        assert_eq!(result.point, p(1.0, 1.0));
        assert_eq!(result.distance, 0.0);
    }

    #[test]
    fn context_rejects_zero_increment() {
        assert!(InteractionContext::new(false, 0.0, 0.1).is_err());
        assert!(InteractionContext::new(false, 15.0, -1.0).is_err());
        assert!(InteractionContext::new(true, 15.0, 1.0).unwrap().precision_override());
    }

    #[test]
    fn kinds_are_ordered_by_strength() {
        assert!(SnapKind::Intersection > SnapKind::Endpoint);
        assert!(SnapKind::Endpoint > SnapKind::PolarAngle);
        assert!(SnapKind::PolarDistance > SnapKind::None);
    }

    #[test]
    fn intersection_outranks_nearer_endpoint() {
        let candidates = [
            SnapCandidate::new(p(0.1, 0.0), SnapKind::Endpoint),
            SnapCandidate::new(p(0.4, 0.0), SnapKind::Intersection),
        ];
        let best = best_candidate(p(0.0, 0.0), &candidates, 0.5).unwrap();
        assert_eq!(best.kind, SnapKind::Intersection);
    }

    #[test]
    fn equal_priority_prefers_nearest() {
        let candidates = [
            SnapCandidate::new(p(0.4, 0.0), SnapKind::Endpoint),
            SnapCandidate::new(p(0.1, 0.0), SnapKind::Endpoint),
        ];
        let best = best_candidate(p(0.0, 0.0), &candidates, 0.5).unwrap();
        assert_eq!(best.point, p(0.1, 0.0));
    }

    #[test]
    fn feature_set_finds_crossing() {
        let segments = [Segment::from_coords(0.0, 0.0, 10.0, 10.0), Segment::from_coords(0.0, 10.0, 10.0, 0.0)];
        let features = FeatureSet::from_segments(&segments, 0.5).unwrap();
        assert_eq!(features.candidates().len(), 5);

        let hit = features.probe(p(5.2, 4.9)).unwrap();
        assert_eq!(hit.kind, SnapKind::Intersection);
        assert!(features.probe(p(2.0, 5.0)).is_none());

        let result = solve_snap(p(9.8, 0.1), None, |c| features.probe(c), &InteractionContext::default());
        assert_eq!(result.point, p(10.0, 0.0));
    }
}
