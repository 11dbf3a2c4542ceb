//! Natural textures: stone, gravel, sand, earth, grass, glass.
//!
//! The jittered families draw their randomness from [`Rng::for_cell`], so
//! each cell looks the same however the lattice is walked.

use std::f64::consts::{FRAC_PI_4, TAU};

use super::util::TileSink;
use crate::geometry::Point;
use crate::rng::Rng;

/// Irregular paving: a lattice whose nodes are jittered, joined to their
/// right and upper neighbours.
pub(super) fn stone(sink: &mut TileSink, step: f64, seed: u64) {
    let Some((cols, rows)) = sink.extent().lattice(step, step, "stone") else {
        return;
    };
    let node = |i: i64, j: i64| {
        let mut rng = Rng::for_cell(seed, i, j);
        Point::new(
            (i as f64 + 0.3 * rng.next_signed()) * step,
            (j as f64 + 0.3 * rng.next_signed()) * step,
        )
    };
    for j in rows {
        for i in cols.clone() {
            let here = node(i, j);
            sink.segment(here, node(i + 1, j));
            sink.segment(here, node(i, j + 1));
        }
    }
}

/// One small irregular pebble per cell.
pub(super) fn gravel(sink: &mut TileSink, step: f64, seed: u64) {
    const SIDES: usize = 7;
    let Some((cols, rows)) = sink.extent().lattice(step, step, "gravel") else {
        return;
    };
    for j in rows {
        for i in cols.clone() {
            let mut rng = Rng::for_cell(seed, i, j);
            let center = Point::new(
                (i as f64 + 0.5 + 0.15 * rng.next_signed()) * step,
                (j as f64 + 0.5 + 0.15 * rng.next_signed()) * step,
            );
            let radius = rng.next_range(0.2, 0.35) * step;
            let turn = rng.next_range(0.0, TAU);
            let ring: Vec<Point> = (0..SIDES)
                .map(|k| {
                    let a = turn + k as f64 * TAU / SIDES as f64;
                    center + Point::from_angle(a) * (radius * rng.next_range(0.8, 1.2))
                })
                .collect();
            sink.polygon(&ring);
        }
    }
}

/// Three random dots per cell.
pub(super) fn sand(sink: &mut TileSink, step: f64, seed: u64) {
    let Some((cols, rows)) = sink.extent().lattice(step, step, "sand") else {
        return;
    };
    for j in rows {
        for i in cols.clone() {
            let mut rng = Rng::for_cell(seed, i, j);
            for _ in 0..3 {
                let x = (i as f64 + rng.next_f64()) * step;
                let y = (j as f64 + rng.next_f64()) * step;
                sink.point(Point::new(x, y));
            }
        }
    }
}

/// Three short parallel strokes around `center`, `gap` apart.
fn stroke_group(sink: &mut TileSink, center: Point, angle: f64, lengths: [f64; 3], gap: f64) {
    let dir = Point::from_angle(angle);
    let across = dir.perp();
    for (k, length) in lengths.into_iter().enumerate() {
        let mid = center + across * ((k as f64 - 1.0) * gap);
        let half = dir * (length / 2.0);
        sink.segment(mid - half, mid + half);
    }
}

/// Checkerboard of stroke groups leaning alternately left and right.
pub(super) fn earth(sink: &mut TileSink, step: f64) {
    let Some((cols, rows)) = sink.extent().lattice(step, step, "earth") else {
        return;
    };
    let length = 0.6 * step;
    for j in rows {
        for i in cols.clone() {
            let angle = if (i + j).rem_euclid(2) == 0 { FRAC_PI_4 } else { -FRAC_PI_4 };
            let center = Point::new((i as f64 + 0.5) * step, (j as f64 + 0.5) * step);
            stroke_group(sink, center, angle, [length; 3], 0.2 * step);
        }
    }
}

/// Tufts of three blades on staggered rows.
pub(super) fn grass(sink: &mut TileSink, step: f64, seed: u64) {
    let Some((cols, rows)) = sink.extent().lattice(step, step, "grass") else {
        return;
    };
    for j in rows {
        let shift = if j.rem_euclid(2) == 1 { 0.5 } else { 0.0 };
        for i in cols.clone() {
            let mut rng = Rng::for_cell(seed, i, j);
            let base = Point::new(
                (i as f64 + shift + 0.2 * rng.next_signed()) * step,
                (j as f64 + 0.1 * rng.next_signed()) * step,
            );
            for degrees in [65.0_f64, 90.0, 115.0] {
                let blade = rng.next_range(0.4, 0.6) * step;
                sink.segment(base, base + Point::from_angle(degrees.to_radians()) * blade);
            }
        }
    }
}

/// Sparse groups of short 45° strokes, one group per `3 × step` cell.
pub(super) fn glass(sink: &mut TileSink, step: f64) {
    let cell = 3.0 * step;
    let Some((cols, rows)) = sink.extent().lattice(cell, cell, "glass") else {
        return;
    };
    let lengths = [0.5 * step, 0.9 * step, 0.5 * step];
    for j in rows {
        for i in cols.clone() {
            let center = Point::new((i as f64 + 0.5) * cell, (j as f64 + 0.5) * cell);
            stroke_group(sink, center, FRAC_PI_4, lengths, 0.25 * step);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bounds::Bounds;
    use crate::hatch::Primitive;

    fn square() -> Bounds {
        Bounds::rect(0.0, 0.0, 100.0, 100.0).unwrap()
    }

    #[test]
    fn stone_covers_the_square() {
        let bounds = square();
        let mut sink = TileSink::new(&bounds, 0.0);
        stone(&mut sink, 10.0, 9);
        let out = sink.finish();
        assert!(out.len() > 150);
    }

    #[test]
    fn sand_stays_inside() {
        let bounds = Bounds::circle(Point::new(0.0, 0.0), 20.0).unwrap();
        let mut sink = TileSink::new(&bounds, 0.0);
        sand(&mut sink, 2.0, 1);
        let out = sink.finish();
        assert!(out.len() > 100);
        for primitive in out {
            let Primitive::Point(p) = primitive else { panic!("expected dots") };
            assert!(p.length() <= 20.0);
        }
    }

    #[test]
    fn gravel_pebbles_are_closed_rings() {
        let bounds = square();
        let mut sink = TileSink::new(&bounds, 0.0);
        gravel(&mut sink, 10.0, 4);
        let out = sink.finish();
        assert!(!out.is_empty());
        assert!(out.iter().all(|p| matches!(p, Primitive::Polygon(ring) if ring.len() == 7)));
    }

    #[test]
    fn earth_strokes_have_fixed_length() {
        let bounds = Bounds::rect(-50.0, -50.0, 50.0, 50.0).unwrap();
        let mut sink = TileSink::new(&bounds, 0.0);
        earth(&mut sink, 10.0);
        let out = sink.finish();
        // Cells of 10 fit exactly, so no stroke is clipped.
        assert_eq!(out.len(), 10 * 10 * 3);
        for s in out.iter().filter_map(Primitive::as_segment) {
            assert!((s.length() - 6.0).abs() < 1e-9);
        }
    }

    #[test]
    fn glass_is_sparse() {
        let bounds = square();
        let mut glass_sink = TileSink::new(&bounds, 0.0);
        glass(&mut glass_sink, 10.0);
        let mut earth_sink = TileSink::new(&bounds, 0.0);
        earth(&mut earth_sink, 10.0);
        assert!(glass_sink.finish().len() < earth_sink.finish().len());
    }
}
