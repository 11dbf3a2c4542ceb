//! Regular lattice families: dots, grid, brick and block bonds, flat roof tiles.

use super::util::TileSink;
use crate::geometry::Point;
use crate::rng::Rng;

/// Dot at every lattice node.
pub(super) fn dots(sink: &mut TileSink, step: f64) {
    let Some((cols, rows)) = sink.extent().lattice(step, step, "dots") else {
        return;
    };
    for j in rows {
        for i in cols.clone() {
            sink.point(Point::new(i as f64 * step, j as f64 * step));
        }
    }
}

/// Square cells drawn as their bottom and left edges.
pub(super) fn grid(sink: &mut TileSink, step: f64) {
    let Some((cols, rows)) = sink.extent().lattice(step, step, "grid") else {
        return;
    };
    for j in rows {
        for i in cols.clone() {
            let origin = Point::new(i as f64 * step, j as f64 * step);
            sink.segment(origin, origin + Point::new(step, 0.0));
            sink.segment(origin, origin + Point::new(0.0, step));
        }
    }
}

/// Block layout shared by the bond families.
struct Bond {
    length: f64,
    course: f64,
    /// Shift of odd courses along the course; zero for stack bond.
    stagger: f64,
}

impl Bond {
    /// Draw each unit's bed joint and head joint, then hand the unit's
    /// lower-left corner and lattice index to `decorate`.
    fn lay<F>(&self, sink: &mut TileSink, family: &str, mut decorate: F)
    where
        F: FnMut(&mut TileSink, Point, i64, i64),
    {
        let Some((cols, rows)) = sink.extent().lattice(self.length, self.course, family) else {
            return;
        };
        for j in rows {
            let shift = if j.rem_euclid(2) == 1 { self.stagger } else { 0.0 };
            for i in cols.clone() {
                let origin = Point::new(i as f64 * self.length + shift, j as f64 * self.course);
                sink.segment(origin, origin + Point::new(self.length, 0.0));
                sink.segment(origin, origin + Point::new(0.0, self.course));
                decorate(sink, origin, i, j);
            }
        }
    }
}

/// Running bond: bricks `step` long, courses `step / 2` high, every other
/// course offset by half a brick.
pub(super) fn brick(sink: &mut TileSink, step: f64) {
    let bond = Bond { length: step, course: step / 2.0, stagger: step / 2.0 };
    bond.lay(sink, "brick", |_, _, _, _| {});
}

/// Two-by-one blocks in running bond with a couple of aggregate dots each.
pub(super) fn concrete_block(sink: &mut TileSink, step: f64, seed: u64) {
    let bond = Bond { length: 2.0 * step, course: step, stagger: step };
    bond.lay(sink, "concrete-block", |sink, origin, i, j| {
        let mut rng = Rng::for_cell(seed, i, j);
        for _ in 0..2 {
            let x = rng.next_range(0.15, 0.85) * 2.0 * step;
            let y = rng.next_range(0.15, 0.85) * step;
            sink.point(origin + Point::new(x, y));
        }
    });
}

/// Clay blocks with three rectangular perforations.
pub(super) fn clay_block(sink: &mut TileSink, step: f64) {
    let length = 1.5 * step;
    let course = 0.75 * step;
    let bond = Bond { length, course, stagger: length / 2.0 };
    let (hw, hh) = (length * 0.1, course * 0.2);
    bond.lay(sink, "clay-block", |sink, origin, _, _| {
        for fraction in [0.25, 0.5, 0.75] {
            let c = origin + Point::new(length * fraction, course / 2.0);
            sink.polygon(&[
                c + Point::new(-hw, -hh),
                c + Point::new(hw, -hh),
                c + Point::new(hw, hh),
                c + Point::new(-hw, hh),
            ]);
        }
    });
}

/// Stack-bond aerated blocks with small hexagonal pores.
pub(super) fn cellular_block(sink: &mut TileSink, step: f64, seed: u64) {
    let bond = Bond { length: 2.0 * step, course: step, stagger: 0.0 };
    let r = step * 0.08;
    bond.lay(sink, "cellular-block", |sink, origin, i, j| {
        let mut rng = Rng::for_cell(seed, i, j);
        for _ in 0..2 {
            let c = origin + Point::new(rng.next_range(0.15, 0.85) * 2.0 * step, rng.next_range(0.2, 0.8) * step);
            let ring: Vec<Point> = (0..6)
                .map(|k| c + Point::from_angle(k as f64 * std::f64::consts::FRAC_PI_3) * r)
                .collect();
            sink.polygon(&ring);
        }
    });
}

/// Flat tiles: staggered rows with an overlap line above each tile's lower edge.
pub(super) fn roof_flat(sink: &mut TileSink, step: f64) {
    let length = 1.5 * step;
    let bond = Bond { length, course: step, stagger: length / 2.0 };
    bond.lay(sink, "roof-flat", |sink, origin, _, _| {
        let lap = origin + Point::new(0.0, step * 0.15);
        sink.segment(lap, lap + Point::new(length, 0.0));
    });
}
