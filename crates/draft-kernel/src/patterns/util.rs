//! Shared plumbing for pattern generators.
//!
//! Every family generates in a *local* frame: origin at the bounds centroid,
//! X along the hatch angle. [`TileSink`] maps local geometry back to world
//! space, clips or filters it against the bounds, and collects primitives,
//! so generators never deal with rotation or clipping themselves.

use std::ops::RangeInclusive;

use tracing::{trace, warn};

use crate::bounds::Bounds;
use crate::clip::clip_spans;
use crate::geometry::{Point, Segment};
use crate::hatch::Primitive;

/// Upper bound on lattice cells or candidate lines for a single family.
/// Denser requests are skipped with a warning instead of stalling a
/// pointer-move handler.
pub const MAX_LATTICE_CELLS: u64 = 250_000;

/// A rotation about a pivot point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileFrame {
    pivot: Point,
    sin_a: f64,
    cos_a: f64,
}

impl TileFrame {
    pub fn new(pivot: Point, angle_degrees: f64) -> Self {
        let (sin_a, cos_a) = angle_degrees.to_radians().sin_cos();
        Self { pivot, sin_a, cos_a }
    }

    /// Local → world: rotate by `+angle`, then translate to the pivot.
    #[inline]
    pub fn to_world(&self, local: Point) -> Point {
        self.pivot + local.rotated(self.sin_a, self.cos_a)
    }

    /// World → local: translate the pivot to the origin, rotate by `-angle`.
    #[inline]
    pub fn to_local(&self, world: Point) -> Point {
        (world - self.pivot).rotated(-self.sin_a, self.cos_a)
    }
}

/// Axis-aligned box of the bounds as seen in a [`TileFrame`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalExtent {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl LocalExtent {
    pub fn of(bounds: &Bounds, frame: &TileFrame) -> Self {
        let pad = bounds.hull_padding();
        let mut extent = Self {
            min_x: f64::INFINITY,
            min_y: f64::INFINITY,
            max_x: f64::NEG_INFINITY,
            max_y: f64::NEG_INFINITY,
        };
        for p in bounds.hull_points() {
            let local = frame.to_local(p);
            extent.min_x = extent.min_x.min(local.x - pad);
            extent.min_y = extent.min_y.min(local.y - pad);
            extent.max_x = extent.max_x.max(local.x + pad);
            extent.max_y = extent.max_y.max(local.y + pad);
        }
        extent
    }

    /// Largest distance from the local origin along Y.
    #[inline]
    pub fn max_perpendicular(&self) -> f64 {
        self.min_y.abs().max(self.max_y.abs())
    }

    /// Largest distance from the local origin along X.
    #[inline]
    pub fn max_along(&self) -> f64 {
        self.min_x.abs().max(self.max_x.abs())
    }

    /// Largest distance from the local origin to a corner of the box.
    #[inline]
    pub fn max_radius(&self) -> f64 {
        self.max_along().hypot(self.max_perpendicular())
    }

    /// Lattice index bounds `(first, last)` with `i * step` covering
    /// `[min, max]`, plus one cell of margin on each side. Still floats, so
    /// the cell count can be checked before anything is cast.
    #[inline]
    fn index_bounds(min: f64, max: f64, step: f64) -> (f64, f64) {
        ((min / step).floor() - 1.0, (max / step).ceil() + 1.0)
    }

    /// Column and row index ranges for a `dx × dy` lattice, or `None` when
    /// it would exceed [`MAX_LATTICE_CELLS`].
    pub fn lattice(&self, dx: f64, dy: f64, family: &str) -> Option<(RangeInclusive<i64>, RangeInclusive<i64>)> {
        let (col_first, col_last) = Self::index_bounds(self.min_x, self.max_x, dx);
        let (row_first, row_last) = Self::index_bounds(self.min_y, self.max_y, dy);
        let count = (col_last - col_first + 1.0).max(0.0) * (row_last - row_first + 1.0).max(0.0);
        if !count.is_finite() || count > MAX_LATTICE_CELLS as f64 {
            warn!(family, cells = count, limit = MAX_LATTICE_CELLS, "lattice too dense, skipping");
            return None;
        }
        Some((col_first as i64..=col_last as i64, row_first as i64..=row_last as i64))
    }
}

/// Collects clipped primitives for one tiling call.
pub struct TileSink<'a> {
    bounds: &'a Bounds,
    frame: TileFrame,
    extent: LocalExtent,
    diagonal: f64,
    out: Vec<Primitive>,
    candidates: usize,
}

impl<'a> TileSink<'a> {
    pub fn new(bounds: &'a Bounds, angle_degrees: f64) -> Self {
        let frame = TileFrame::new(bounds.centroid(), angle_degrees);
        Self {
            bounds,
            frame,
            extent: LocalExtent::of(bounds, &frame),
            diagonal: bounds.bounding_box().diagonal(),
            out: Vec::new(),
            candidates: 0,
        }
    }

    /// Switch to another hatch angle around the same pivot.
    pub fn rotate_to(&mut self, angle_degrees: f64) {
        self.frame = TileFrame::new(self.bounds.centroid(), angle_degrees);
        self.extent = LocalExtent::of(self.bounds, &self.frame);
    }

    #[inline]
    pub fn bounds(&self) -> &Bounds {
        self.bounds
    }

    #[inline]
    pub fn extent(&self) -> &LocalExtent {
        &self.extent
    }

    /// Diagonal of the world-space bounding box.
    #[inline]
    pub fn diagonal(&self) -> f64 {
        self.diagonal
    }

    /// Local segment, clipped to the bounds.
    pub fn segment(&mut self, a: Point, b: Point) {
        self.candidates += 1;
        let world = Segment::new(self.frame.to_world(a), self.frame.to_world(b));
        self.out.extend(clip_spans(&world, self.bounds).into_iter().map(Primitive::Segment));
    }

    /// Local open polyline, each piece clipped.
    pub fn polyline(&mut self, points: &[Point]) {
        for pair in points.windows(2) {
            self.segment(pair[0], pair[1]);
        }
    }

    /// Local point, kept only when inside the bounds.
    pub fn point(&mut self, p: Point) {
        self.candidates += 1;
        let world = self.frame.to_world(p);
        if self.bounds.contains(world) {
            self.out.push(Primitive::Point(world));
        }
    }

    /// Local closed ring, kept only when every vertex is inside the bounds.
    pub fn polygon(&mut self, ring: &[Point]) {
        self.candidates += 1;
        let world: Vec<Point> = ring.iter().map(|p| self.frame.to_world(*p)).collect();
        if world.iter().all(|p| self.bounds.contains(*p)) {
            self.out.push(Primitive::Polygon(world));
        }
    }

    /// World-space ring emitted as-is.
    pub fn world_polygon(&mut self, ring: Vec<Point>) {
        self.candidates += 1;
        self.out.push(Primitive::Polygon(ring));
    }

    pub fn finish(self) -> Vec<Primitive> {
        trace!(
            candidates = self.candidates,
            kept = self.out.len(),
            bounds = self.bounds.kind_name(),
            "pattern family finished"
        );
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hatch::HatchSpec;
    use crate::patterns::PatternKind;
    use approx::assert_relative_eq;

    fn square() -> Bounds {
        Bounds::rect(0.0, 0.0, 100.0, 100.0).unwrap()
    }

    #[test]
    fn frame_round_trips_a_point() {
        let frame = TileFrame::new(Point::new(50.0, 50.0), 90.0);
        let world = frame.to_world(Point::new(50.0, 0.0));
        assert_relative_eq!(world.x, 50.0, epsilon = 1e-9);
        assert_relative_eq!(world.y, 100.0, epsilon = 1e-9);
        let back = frame.to_local(world);
        assert_relative_eq!(back.x, 50.0, epsilon = 1e-9);
        assert_relative_eq!(back.y, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn extent_of_rotated_square_grows() {
        let bounds = square();
        let flat = LocalExtent::of(&bounds, &TileFrame::new(bounds.centroid(), 0.0));
        assert_relative_eq!(flat.max_perpendicular(), 50.0, epsilon = 1e-9);
        let tilted = LocalExtent::of(&bounds, &TileFrame::new(bounds.centroid(), 45.0));
        assert_relative_eq!(tilted.max_perpendicular(), 50.0 * 2f64.sqrt(), epsilon = 1e-9);
    }

    #[test]
    fn circle_extent_uses_radius() {
        let bounds = Bounds::circle(Point::new(3.0, 4.0), 5.0).unwrap();
        let extent = LocalExtent::of(&bounds, &TileFrame::new(bounds.centroid(), 30.0));
        assert_relative_eq!(extent.min_x, -5.0, epsilon = 1e-9);
        assert_relative_eq!(extent.max_y, 5.0, epsilon = 1e-9);
    }

    #[test]
    fn lattice_refuses_absurd_density() {
        let bounds = square();
        let extent = LocalExtent::of(&bounds, &TileFrame::new(bounds.centroid(), 0.0));
        assert!(extent.lattice(10.0, 10.0, "test").is_some());
        assert!(extent.lattice(0.01, 0.01, "test").is_none());
    }

    #[test]
    fn lattice_refuses_extents_past_i64() {
        let bounds = Bounds::rect(0.0, 0.0, 2e19, 10.0).unwrap();
        let extent = LocalExtent::of(&bounds, &TileFrame::new(bounds.centroid(), 0.0));
        assert!(extent.lattice(1.0, 1.0, "test").is_none());
    }

    #[test]
    fn lattice_ranges_cover_extent() {
        let extent = LocalExtent { min_x: -25.0, min_y: -5.0, max_x: 25.0, max_y: 5.0 };
        let (cols, rows) = extent.lattice(10.0, 10.0, "test").unwrap();
        assert_eq!(cols, -4..=4);
        assert_eq!(rows, -2..=2);
    }

    #[test]
    fn huge_bounds_tile_without_panicking() {
        let bounds = Bounds::rect(0.0, 0.0, 2e19, 10.0).unwrap();
        for &kind in PatternKind::all() {
            let spec = HatchSpec::new(kind, 1.0, 0.0).unwrap();
            let _ = kind.generate(&bounds, &spec);
        }
    }

    #[test]
    fn sink_clips_and_filters() {
        let bounds = square();
        let mut sink = TileSink::new(&bounds, 0.0);
        sink.segment(Point::new(-100.0, 0.0), Point::new(100.0, 0.0));
        sink.point(Point::new(0.0, 0.0));
        sink.point(Point::new(80.0, 0.0));
        let out = sink.finish();
        assert_eq!(out.len(), 2);
        assert_eq!(out[0], Primitive::Segment(Segment::from_coords(0.0, 50.0, 100.0, 50.0)));
        assert_eq!(out[1], Primitive::Point(Point::new(50.0, 50.0)));
    }
}
