//! Row-based curves: zigzag, water, wave roof tiles.

use std::f64::consts::{PI, TAU};

use super::util::TileSink;
use crate::arc::{Arc, sample_arc};
use crate::geometry::Point;

/// Rows `step` apart, each an open polyline sampled every `sample` along X.
/// `offset(x, row)` gives the sample's displacement from the row's baseline.
pub(super) fn sampled_rows<F>(sink: &mut TileSink, sample: f64, step: f64, family: &str, offset: F)
where
    F: Fn(f64, i64) -> f64,
{
    let Some((cols, rows)) = sink.extent().lattice(sample, step, family) else {
        return;
    };
    let mut row = Vec::with_capacity(cols.clone().count());
    for j in rows {
        row.clear();
        let base = j as f64 * step;
        row.extend(cols.clone().map(|i| {
            let x = i as f64 * sample;
            Point::new(x, base + offset(x, j))
        }));
        sink.polyline(&row);
    }
}

/// Sharp zigzag rows, peak to peak half the row spacing.
pub(super) fn zigzag(sink: &mut TileSink, step: f64) {
    let amplitude = step / 4.0;
    let half_wave = step / 2.0;
    sampled_rows(sink, half_wave, step, "zigzag", |x, _| {
        let k = (x / half_wave).round() as i64;
        if k.rem_euclid(2) == 0 { amplitude } else { -amplitude }
    });
}

/// Gentle sine rows with a wavelength of two row spacings.
pub(super) fn water(sink: &mut TileSink, step: f64) {
    let amplitude = step / 6.0;
    let wavelength = 2.0 * step;
    sampled_rows(sink, step / 8.0, step, "water", |x, j| {
        // Neighbouring rows are shifted by a quarter wave.
        amplitude * (TAU * x / wavelength + j as f64 * PI / 2.0).sin()
    });
}

/// Rows of downward semicircles, staggered by half a tile.
pub(super) fn roof_wave_tile(sink: &mut TileSink, step: f64) {
    let radius = step / 2.0;
    let Some((cols, rows)) = sink.extent().lattice(step, step, "roof-wave-tile") else {
        return;
    };
    for j in rows {
        let shift = if j.rem_euclid(2) == 1 { radius } else { 0.0 };
        for i in cols.clone() {
            let center = Point::new(i as f64 * step + shift + radius, j as f64 * step);
            // Start at the left end and sweep counter-clockwise through the bottom.
            let Ok(scallop) = Arc::new(center, radius, PI, PI) else {
                continue;
            };
            sink.polyline(&sample_arc(&scallop, 8));
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

    fn segments(out: &[Primitive]) -> Vec<crate::geometry::Segment> {
        out.iter().filter_map(Primitive::as_segment).copied().collect()
    }

    #[test]
    fn zigzag_strokes_alternate() {
        let bounds = square();
        let mut sink = TileSink::new(&bounds, 0.0);
        zigzag(&mut sink, 20.0);
        let strokes = segments(&sink.finish());
        assert!(!strokes.is_empty());
        // Each stroke rises or falls by the full peak-to-peak height unless clipped.
        let full = strokes.iter().filter(|s| ((s.end.y - s.start.y).abs() - 10.0).abs() < 1e-9).count();
        assert!(full > strokes.len() / 2);
    }

    #[test]
    fn water_stays_near_its_rows() {
        let bounds = square();
        let mut sink = TileSink::new(&bounds, 0.0);
        water(&mut sink, 12.0);
        for s in segments(&sink.finish()) {
            let row = ((s.start.y - 50.0) / 12.0).round() * 12.0 + 50.0;
            assert!((s.start.y - row).abs() <= 2.0 + 1e-9);
        }
    }

    #[test]
    fn scallops_hang_below_their_row() {
        let bounds = Bounds::rect(-50.0, -50.0, 50.0, 50.0).unwrap();
        let mut sink = TileSink::new(&bounds, 0.0);
        roof_wave_tile(&mut sink, 10.0);
        let strokes = segments(&sink.finish());
        assert!(!strokes.is_empty());
        for s in strokes {
            let row_top = (s.start.y.max(s.end.y) / 10.0).round() * 10.0;
            assert!(s.start.y <= row_top + 1e-9 && s.start.y >= row_top - 5.0 - 1e-9);
        }
    }
}
