//! Boundary import from SVG.
//!
//! Closed shapes drawn elsewhere (a room outline, a wall section) become
//! polygon [`Bounds`] for tiling. Full documents go through usvg, which
//! resolves CSS, `<use>` and shape elements; bare path data strings go
//! through svgtypes. Curves are flattened with lyon_geom in both cases.
//!
//! Every subpath becomes its own polygon; fewer than three distinct points
//! after flattening means the subpath is skipped.

use lyon_geom::{CubicBezierSegment, QuadraticBezierSegment, point};
use svgtypes::{SimplePathSegment, SimplifyingPathParser};
use tracing::debug;
use usvg::tiny_skia_path::PathSegment;

use crate::bounds::Bounds;
use crate::error::{KernelError, Result};
use crate::geometry::Point;

/// Maximum deviation of flattened curves from the true curve, in document units.
const CURVE_TOLERANCE: f64 = 0.1;

/// Consecutive points closer than this are merged.
const DEDUP_TOLERANCE: f64 = 1e-6;

/// Accumulates flattened subpaths.
#[derive(Default)]
struct RingBuilder {
    rings: Vec<Vec<Point>>,
    current: Vec<Point>,
}

impl RingBuilder {
    fn last(&self) -> Option<Point> {
        self.current.last().copied()
    }

    fn move_to(&mut self, p: Point) {
        self.finish_ring();
        self.current.push(p);
    }

    fn line_to(&mut self, p: Point) {
        self.current.push(p);
    }

    fn quad_to(&mut self, ctrl: Point, to: Point) {
        let Some(from) = self.last() else {
            self.current.push(to);
            return;
        };
        let curve = QuadraticBezierSegment {
            from: point(from.x, from.y),
            ctrl: point(ctrl.x, ctrl.y),
            to: point(to.x, to.y),
        };
        curve.for_each_flattened(CURVE_TOLERANCE, &mut |segment| {
            self.current.push(Point::new(segment.to.x, segment.to.y));
        });
    }

    fn cubic_to(&mut self, ctrl1: Point, ctrl2: Point, to: Point) {
        let Some(from) = self.last() else {
            self.current.push(to);
            return;
        };
        let curve = CubicBezierSegment {
            from: point(from.x, from.y),
            ctrl1: point(ctrl1.x, ctrl1.y),
            ctrl2: point(ctrl2.x, ctrl2.y),
            to: point(to.x, to.y),
        };
        curve.for_each_flattened(CURVE_TOLERANCE, &mut |segment| {
            self.current.push(Point::new(segment.to.x, segment.to.y));
        });
    }

    fn finish_ring(&mut self) {
        let mut ring = std::mem::take(&mut self.current);
        ring.dedup_by(|a, b| a.approx_eq(*b, DEDUP_TOLERANCE));
        if ring.len() >= 3 {
            self.rings.push(ring);
        }
    }

    fn into_bounds(mut self) -> Vec<Bounds> {
        self.finish_ring();
        self.rings.into_iter().filter_map(|ring| Bounds::polygon(ring).ok()).collect()
    }
}

/// Every closed outline in an SVG document, in document coordinates.
pub fn bounds_from_svg(svg_content: &str) -> Result<Vec<Bounds>> {
    let options = usvg::Options::default();
    let tree = usvg::Tree::from_str(svg_content, &options).map_err(|e| KernelError::Svg(e.to_string()))?;

    let mut bounds = Vec::new();
    collect_group(tree.root(), &mut bounds);
    debug!(count = bounds.len(), "extracted bounds from SVG document");

    if bounds.is_empty() { Err(KernelError::NoBounds) } else { Ok(bounds) }
}

fn collect_group(group: &usvg::Group, out: &mut Vec<Bounds>) {
    for child in group.children() {
        match child {
            usvg::Node::Group(inner) => collect_group(inner, out),
            usvg::Node::Path(path) => out.extend(path_bounds(path)),
            _ => {}
        }
    }
}

/// Flatten one usvg path, applying its absolute transform.
fn path_bounds(path: &usvg::Path) -> Vec<Bounds> {
    let ts = path.abs_transform();
    let map = |p: usvg::tiny_skia_path::Point| {
        let (x, y) = (p.x as f64, p.y as f64);
        Point::new(
            ts.sx as f64 * x + ts.kx as f64 * y + ts.tx as f64,
            ts.ky as f64 * x + ts.sy as f64 * y + ts.ty as f64,
        )
    };

    let mut builder = RingBuilder::default();
    for segment in path.data().segments() {
        match segment {
            PathSegment::MoveTo(p) => builder.move_to(map(p)),
            PathSegment::LineTo(p) => builder.line_to(map(p)),
            PathSegment::QuadTo(ctrl, p) => builder.quad_to(map(ctrl), map(p)),
            PathSegment::CubicTo(ctrl1, ctrl2, p) => builder.cubic_to(map(ctrl1), map(ctrl2), map(p)),
            PathSegment::Close => builder.finish_ring(),
        }
    }
    builder.into_bounds()
}

/// Closed outlines from an SVG path `d` attribute.
///
/// Relative commands, shorthand curves and elliptical arcs are resolved to
/// absolute lines and Béziers before flattening.
pub fn bounds_from_path_data(data: &str) -> Result<Vec<Bounds>> {
    let mut builder = RingBuilder::default();
    for segment in SimplifyingPathParser::from(data) {
        match segment.map_err(|e| KernelError::PathData(e.to_string()))? {
            SimplePathSegment::MoveTo { x, y } => builder.move_to(Point::new(x, y)),
            SimplePathSegment::LineTo { x, y } => builder.line_to(Point::new(x, y)),
            SimplePathSegment::Quadratic { x1, y1, x, y } => {
                builder.quad_to(Point::new(x1, y1), Point::new(x, y));
            }
            SimplePathSegment::CurveTo { x1, y1, x2, y2, x, y } => {
                builder.cubic_to(Point::new(x1, y1), Point::new(x2, y2), Point::new(x, y));
            }
            SimplePathSegment::ClosePath => builder.finish_ring(),
        }
    }

    let bounds = builder.into_bounds();
    if bounds.is_empty() { Err(KernelError::NoBounds) } else { Ok(bounds) }
}

// ============================================================================
// TESTS
// ============================================================================
