//! Parallel-line families: parallel, cross, diagonal, steel, copper.
//!
//! Lines are laid out around the bounds centroid: line `i` sits `i * step`
//! off the centroid, for `i` in `-N..=N` with
//! `N = ceil(max perpendicular extent / step) + 1`, and each one is at least
//! `1.5 × diagonal` long. That covers the bounds at any angle; the clipper
//! trims the excess.

use tracing::warn;

use super::util::{MAX_LATTICE_CELLS, TileSink};
use crate::geometry::Point;

/// `(N, half_length)` for lines `step` apart, or `None` when too dense.
fn line_layout(sink: &TileSink, step: f64, family: &str) -> Option<(i64, f64)> {
    let extent = sink.extent();
    let n = (extent.max_perpendicular() / step).ceil() + 1.0;
    if !n.is_finite() || 2.0 * n + 1.0 > MAX_LATTICE_CELLS as f64 {
        warn!(family, step, "line spacing too dense, skipping");
        return None;
    }
    let half = (0.75 * sink.diagonal()).max(extent.max_along()) + step;
    Some((n as i64, half))
}

/// Lines `step` apart, shifted by `phase` across the hatch direction.
pub(super) fn offset_lines(sink: &mut TileSink, step: f64, phase: f64) {
    let Some((n, half)) = line_layout(sink, step, "lines") else {
        return;
    };
    for i in -n..=n {
        let y = phase + i as f64 * step;
        sink.segment(Point::new(-half, y), Point::new(half, y));
    }
}

/// Plain hatch lines.
pub(super) fn parallel(sink: &mut TileSink, step: f64) {
    offset_lines(sink, step, 0.0);
}

/// Dashed lines `step` apart. Dash positions are anchored at the local
/// origin so they line up from one line to the next.
fn dashed_lines(sink: &mut TileSink, step: f64, phase: f64, dash: f64, gap: f64) {
    let Some((n, half)) = line_layout(sink, step, "dashed lines") else {
        return;
    };
    let period = dash + gap;
    let first = (-half / period).floor();
    let last = (half / period).ceil();
    let per_line = last - first + 1.0;
    if !per_line.is_finite() || per_line * (2 * n + 1) as f64 > MAX_LATTICE_CELLS as f64 {
        warn!(dash, gap, "dash pattern too dense, skipping");
        return;
    }
    let (first, last) = (first as i64, last as i64);

    for i in -n..=n {
        let y = phase + i as f64 * step;
        for k in first..=last {
            let x = k as f64 * period;
            sink.segment(Point::new(x, y), Point::new(x + dash, y));
        }
    }
}

/// Pairs of close parallel lines.
pub(super) fn steel(sink: &mut TileSink, step: f64) {
    offset_lines(sink, step, 0.0);
    offset_lines(sink, step, step * 0.25);
}

/// Solid lines with a dashed line halfway between.
pub(super) fn copper(sink: &mut TileSink, step: f64) {
    offset_lines(sink, step, 0.0);
    dashed_lines(sink, step, step * 0.5, step * 0.5, step * 0.25);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bounds::Bounds;
    use crate::hatch::Primitive;

    fn segments(out: &[Primitive]) -> Vec<crate::geometry::Segment> {
        out.iter().filter_map(Primitive::as_segment).copied().collect()
    }

    #[test]
    fn ten_by_ten_at_spacing_two() {
        let bounds = Bounds::rect(0.0, 0.0, 10.0, 10.0).unwrap();
        let mut sink = TileSink::new(&bounds, 0.0);
        parallel(&mut sink, 2.0);
        let lines = segments(&sink.finish());
        assert_eq!(lines.len(), 5);
        for line in &lines {
            assert_eq!(line.start.x, 0.0);
            assert_eq!(line.end.x, 10.0);
        }
    }

    #[test]
    fn rotated_lines_still_cover_the_square() {
        let bounds = Bounds::rect(0.0, 0.0, 100.0, 100.0).unwrap();
        let mut sink = TileSink::new(&bounds, 45.0);
        parallel(&mut sink, 10.0);
        let lines = segments(&sink.finish());
        // The 141-unit diagonal at spacing 10 needs about 14 lines.
        assert!((13..=15).contains(&lines.len()), "got {}", lines.len());
    }

    #[test]
    fn steel_doubles_the_lines() {
        let bounds = Bounds::rect(0.0, 0.0, 100.0, 100.0).unwrap();
        let mut single = TileSink::new(&bounds, 30.0);
        parallel(&mut single, 10.0);
        let mut paired = TileSink::new(&bounds, 30.0);
        steel(&mut paired, 10.0);
        let single = single.finish().len();
        let paired = paired.finish().len();
        assert!(paired >= 2 * single - 2 && paired <= 2 * single + 2);
    }

    #[test]
    fn copper_dashes_are_short() {
        let bounds = Bounds::rect(0.0, 0.0, 100.0, 100.0).unwrap();
        let mut sink = TileSink::new(&bounds, 0.0);
        dashed_lines(&mut sink, 10.0, 5.0, 5.0, 2.5);
        let dashes = segments(&sink.finish());
        assert!(dashes.len() > 50);
        assert!(dashes.iter().all(|d| d.length() <= 5.0 + 1e-9));
    }

    #[test]
    fn degenerate_spacing_is_skipped() {
        let bounds = Bounds::rect(0.0, 0.0, 100.0, 100.0).unwrap();
        let mut sink = TileSink::new(&bounds, 0.0);
        parallel(&mut sink, 1e-6);
        assert!(sink.finish().is_empty());
    }
}
