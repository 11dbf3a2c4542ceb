//! Material symbols: wood and insulation.

use std::f64::consts::TAU;

use tracing::warn;

use super::lines;
use super::util::{MAX_LATTICE_CELLS, TileSink};
use super::wave::sampled_rows;
use crate::arc::{Arc, adaptive_segment_count, sample_arc};
use crate::geometry::Point;

/// Growth rings `step` apart around the centroid, with the pith as a dot.
pub(super) fn wood_cross_section(sink: &mut TileSink, step: f64) {
    let rings = (sink.extent().max_radius() / step).ceil();
    let per_ring = adaptive_segment_count(TAU);
    if rings * per_ring as f64 > MAX_LATTICE_CELLS as f64 {
        warn!(step, "growth rings too dense, skipping");
        return;
    }

    let origin = Point::new(0.0, 0.0);
    sink.point(origin);
    for k in 1..=rings as usize {
        let ring = Arc::full_circle(origin, k as f64 * step);
        sink.polyline(&sample_arc(&ring, per_ring));
    }
}

/// Wavy grain lines along the hatch direction.
pub(super) fn wood_longitudinal(sink: &mut TileSink, step: f64) {
    let amplitude = 0.2 * step;
    sampled_rows(sink, step / 4.0, step, "wood-longitudinal", |x, j| {
        amplitude * (x / (1.5 * step) + j as f64 * 0.9).sin()
    });
}

/// Batt insulation: each band of height `step` holds a looping prolate
/// cycloid, one loop per `step` along the band.
pub(super) fn insulation_soft(sink: &mut TileSink, step: f64) {
    const SAMPLES_PER_LOOP: i64 = 16;
    let Some((cols, rows)) = sink.extent().lattice(step / SAMPLES_PER_LOOP as f64, step, "insulation-soft") else {
        return;
    };

    // x = a·t − b·sin t loops whenever b > a.
    let a = step / TAU;
    let b = 0.45 * step;
    let dt = TAU / SAMPLES_PER_LOOP as f64;
    let first = cols.start() - SAMPLES_PER_LOOP / 2;
    let last = cols.end() + SAMPLES_PER_LOOP / 2;

    let mut band = Vec::with_capacity((last - first + 1).max(0) as usize);
    for j in rows {
        band.clear();
        let mid = (j as f64 + 0.5) * step;
        band.extend((first..=last).map(|k| {
            let t = k as f64 * dt;
            Point::new(a * t - b * t.sin(), mid - b * t.cos())
        }));
        sink.polyline(&band);
    }
}

/// Rigid boards: band edges `step` apart with a diagonal zigzag inside.
pub(super) fn insulation_rigid(sink: &mut TileSink, step: f64) {
    lines::parallel(sink, step);
    let half = step / 2.0;
    sampled_rows(sink, half, step, "insulation-rigid", |x, _| {
        if (x / half).round() as i64 % 2 == 0 { 0.0 } else { step }
    });
}
