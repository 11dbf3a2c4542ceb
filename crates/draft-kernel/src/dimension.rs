//! Dimension geometry.
//!
//! Produces the lines and label placement of a dimension; drawing the text
//! and arrowheads is up to the renderer.

use std::f64::consts::{FRAC_PI_2, PI};

use crate::arc::Arc;
use crate::error::{Result, require_positive};
use crate::geometry::{Point, Segment};

/// Sizes that shape a dimension, in drawing units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DimensionStyle {
    extension_gap: f64,
    extension_overshoot: f64,
    text_offset: f64,
}

impl Default for DimensionStyle {
    fn default() -> Self {
        Self { extension_gap: 0.5, extension_overshoot: 1.0, text_offset: 1.0 }
    }
}

impl DimensionStyle {
    pub fn new(extension_gap: f64, extension_overshoot: f64, text_offset: f64) -> Result<Self> {
        Ok(Self {
            extension_gap: require_positive("extension gap", extension_gap)?,
            extension_overshoot: require_positive("extension overshoot", extension_overshoot)?,
            text_offset: require_positive("text offset", text_offset)?,
        })
    }

    /// Space between the measured point and the start of its extension line.
    pub fn extension_gap(&self) -> f64 {
        self.extension_gap
    }

    /// How far extension lines run past the dimension line.
    pub fn extension_overshoot(&self) -> f64 {
        self.extension_overshoot
    }

    /// Distance from the dimension line to the label anchor.
    pub fn text_offset(&self) -> f64 {
        self.text_offset
    }
}

/// An aligned linear dimension between two points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearDimension {
    pub value: f64,
    pub dimension_line: Segment,
    pub extension_lines: [Segment; 2],
    pub label_anchor: Point,
    /// Radians, kept in `(-π/2, π/2]` so text never reads upside down.
    pub text_angle: f64,
}

impl LinearDimension {
    /// Measure `a → b`, with the dimension line passing through `placement`.
    ///
    /// `None` when `a` and `b` coincide.
    pub fn measure(a: Point, b: Point, placement: Point, style: &DimensionStyle) -> Option<Self> {
        let dir = (b - a).normalized()?;
        let normal = dir.perp();
        let offset = (placement - a).dot(normal);
        let side = if offset < 0.0 { -1.0 } else { 1.0 };
        let shift = normal * offset;

        let dimension_line = Segment::new(a + shift, b + shift);
        let gap = style.extension_gap.min(offset.abs());
        let reach = normal * (offset + side * style.extension_overshoot);
        let extension = |p: Point| Segment::new(p + normal * (side * gap), p + reach);

        Some(Self {
            value: a.distance(b),
            dimension_line,
            extension_lines: [extension(a), extension(b)],
            label_anchor: dimension_line.midpoint() + normal * (side * style.text_offset),
            text_angle: upright(dir.angle()),
        })
    }

    pub fn text(&self, precision: usize) -> String {
        format_length(self.value, precision)
    }
}

/// A radius callout: a leader from the center to the rim.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadiusDimension {
    pub value: f64,
    pub leader: Segment,
    pub label_anchor: Point,
    pub text_angle: f64,
}

impl RadiusDimension {
    /// Radius of a circle, with the leader aimed at `toward`.
    ///
    /// `None` when `toward` is the center itself.
    pub fn for_circle(center: Point, radius: f64, toward: Point, style: &DimensionStyle) -> Option<Self> {
        let dir = (toward - center).normalized()?;
        let rim = center + dir * radius;
        Some(Self {
            value: radius,
            leader: Segment::new(center, rim),
            label_anchor: rim + dir * style.text_offset,
            text_angle: upright(dir.angle()),
        })
    }

    /// Radius of an arc, leader at the middle of its sweep.
    pub fn for_arc(arc: &Arc, style: &DimensionStyle) -> Option<Self> {
        Self::for_circle(arc.center(), arc.radius(), arc.point_at(0.5), style)
    }

    pub fn text(&self, precision: usize) -> String {
        format!("R{}", format_length(self.value, precision))
    }
}

/// Fold an angle into `(-π/2, π/2]`.
fn upright(angle: f64) -> f64 {
    if angle > FRAC_PI_2 {
        angle - PI
    } else if angle <= -FRAC_PI_2 {
        angle + PI
    } else {
        angle
    }
}

/// Fixed-precision length text. Negative zero prints as zero.
pub fn format_length(value: f64, precision: usize) -> String {
    let text = format!("{value:.precision$}");
    if text.starts_with('-') && text[1..].chars().all(|c| c == '0' || c == '.') {
        text[1..].to_string()
    } else {
        text
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn p(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    #[test]
    fn horizontal_dimension_above() {
        let style = DimensionStyle::default();
        let dim = LinearDimension::measure(p(0.0, 0.0), p(10.0, 0.0), p(3.0, 4.0), &style).unwrap();
        assert_eq!(dim.value, 10.0);
        assert_eq!(dim.dimension_line, Segment::new(p(0.0, 4.0), p(10.0, 4.0)));

        let [left, right] = dim.extension_lines;
        assert_abs_diff_eq!(left.start.y, 0.5);
        assert_abs_diff_eq!(left.end.y, 5.0);
        assert_abs_diff_eq!(right.start.x, 10.0);
        assert!(dim.label_anchor.approx_eq(p(5.0, 5.0), 1e-12));
        assert_eq!(dim.text_angle, 0.0);
        assert_eq!(dim.text(2), "10.00");
    }

    #[test]
    fn dimension_below_mirrors() {
        let style = DimensionStyle::default();
        let dim = LinearDimension::measure(p(0.0, 0.0), p(10.0, 0.0), p(5.0, -3.0), &style).unwrap();
        assert_abs_diff_eq!(dim.dimension_line.start.y, -3.0);
        assert_abs_diff_eq!(dim.extension_lines[0].start.y, -0.5);
        assert_abs_diff_eq!(dim.extension_lines[0].end.y, -4.0);
        assert_abs_diff_eq!(dim.label_anchor.y, -4.0);
    }

    #[test]
    fn text_stays_upright() {
        let style = DimensionStyle::default();
        // Measured right to left: the direction is π but the text is not flipped.
        let dim = LinearDimension::measure(p(10.0, 0.0), p(0.0, 0.0), p(5.0, 2.0), &style).unwrap();
        assert_abs_diff_eq!(dim.text_angle, 0.0, epsilon = 1e-12);

        let vertical = LinearDimension::measure(p(0.0, 10.0), p(0.0, 0.0), p(1.0, 5.0), &style).unwrap();
        assert_abs_diff_eq!(vertical.text_angle, FRAC_PI_2, epsilon = 1e-12);
    }

    #[test]
    fn zero_length_has_no_dimension() {
        let style = DimensionStyle::default();
        assert!(LinearDimension::measure(p(1.0, 1.0), p(1.0, 1.0), p(0.0, 5.0), &style).is_none());
    }

    #[test]
    fn radius_callout() {
        let style = DimensionStyle::default();
        let dim = RadiusDimension::for_circle(p(0.0, 0.0), 4.0, p(0.0, 20.0), &style).unwrap();
        assert!(dim.leader.end.approx_eq(p(0.0, 4.0), 1e-12));
        assert!(dim.label_anchor.approx_eq(p(0.0, 5.0), 1e-12));
        assert_eq!(dim.text(1), "R4.0");

        let arc = Arc::new(p(0.0, 0.0), 2.0, 0.0, PI).unwrap();
        let on_arc = RadiusDimension::for_arc(&arc, &style).unwrap();
        assert!(on_arc.leader.end.approx_eq(p(0.0, 2.0), 1e-12));
    }

    #[test]
    fn length_formatting() {
        assert_eq!(format_length(2.345, 1), "2.3");
        assert_eq!(format_length(-0.0001, 2), "0.00");
        assert_eq!(format_length(-1.5, 0), "-2");
        assert!(DimensionStyle::new(0.0, 1.0, 1.0).is_err());
    }
}
