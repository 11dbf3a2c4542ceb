//! Hatch specs and the tiling entry point.
//!
//! `tile` fills a [`Bounds`] with the primitives of one pattern family.
//! It holds no state: the same `(bounds, spec)` pair always produces the same
//! output, so callers re-tile freely when a parameter changes.

use std::fmt;

use tracing::debug;

use crate::bounds::Bounds;
use crate::error::{KernelError, Result};
use crate::geometry::{Point, Segment};
use crate::patterns::PatternKind;

/// An RGB stroke/fill color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const GRAY: Color = Color::rgb(128, 128, 128);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse any CSS color an SVG file accepts (`#333`, `steelblue`,
    /// `rgb(10, 20, 30)`). Alpha is dropped.
    pub fn parse(text: &str) -> Result<Self> {
        let parsed: svgtypes::Color = text
            .trim()
            .parse()
            .map_err(|e: svgtypes::Error| KernelError::Color(format!("{text:?}: {e}")))?;
        Ok(Self::rgb(parsed.red, parsed.green, parsed.blue))
    }

    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::BLACK
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Pattern kind, spacing, angle and color for one tiling.
///
/// `spacing` is strictly positive by construction; tiling divides by it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HatchSpec {
    kind: PatternKind,
    spacing: f64,
    angle_degrees: f64,
    color: Color,
    seed: u64,
}

impl HatchSpec {
    pub fn new(kind: PatternKind, spacing: f64, angle_degrees: f64) -> Result<Self> {
        Ok(Self {
            kind,
            spacing: validate_spacing(spacing)?,
            angle_degrees: validate_angle(angle_degrees)?,
            color: Color::BLACK,
            seed: 0,
        })
    }

    pub fn with_spacing(self, spacing: f64) -> Result<Self> {
        Ok(Self { spacing: validate_spacing(spacing)?, ..self })
    }

    pub fn with_angle(self, angle_degrees: f64) -> Result<Self> {
        Ok(Self { angle_degrees: validate_angle(angle_degrees)?, ..self })
    }

    pub fn with_kind(self, kind: PatternKind) -> Self {
        Self { kind, ..self }
    }

    pub fn with_color(self, color: Color) -> Self {
        Self { color, ..self }
    }

    /// Seed for the jittered families. Other families ignore it.
    pub fn with_seed(self, seed: u64) -> Self {
        Self { seed, ..self }
    }

    #[inline]
    pub fn kind(&self) -> PatternKind {
        self.kind
    }

    #[inline]
    pub fn spacing(&self) -> f64 {
        self.spacing
    }

    #[inline]
    pub fn angle_degrees(&self) -> f64 {
        self.angle_degrees
    }

    #[inline]
    pub fn color(&self) -> Color {
        self.color
    }

    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

fn validate_spacing(spacing: f64) -> Result<f64> {
    if spacing.is_nan() || spacing.is_infinite() {
        return Err(KernelError::NonFinite { what: "hatch spacing" });
    }
    if spacing <= 0.0 {
        return Err(KernelError::NonPositiveSpacing(spacing));
    }
    Ok(spacing)
}

fn validate_angle(angle_degrees: f64) -> Result<f64> {
    if !angle_degrees.is_finite() {
        return Err(KernelError::NonFinite { what: "hatch angle" });
    }
    Ok(angle_degrees)
}

/// One piece of generated pattern geometry, in world coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Segment(Segment),
    Point(Point),
    /// Closed ring, vertices listed once.
    Polygon(Vec<Point>),
}

impl Primitive {
    pub fn kind_name(&self) -> &'static str {
        match self {
            Primitive::Segment(_) => "segment",
            Primitive::Point(_) => "point",
            Primitive::Polygon(_) => "polygon",
        }
    }

    pub fn as_segment(&self) -> Option<&Segment> {
        match self {
            Primitive::Segment(s) => Some(s),
            _ => None,
        }
    }

    /// Every coordinate the primitive touches.
    pub fn points(&self) -> Vec<Point> {
        match self {
            Primitive::Segment(s) => vec![s.start, s.end],
            Primitive::Point(p) => vec![*p],
            Primitive::Polygon(ring) => ring.clone(),
        }
    }
}

/// Fill `bounds` with the pattern described by `spec`.
pub fn tile(bounds: &Bounds, spec: &HatchSpec) -> Vec<Primitive> {
    let primitives = spec.kind().generate(bounds, spec);
    debug!(
        pattern = spec.kind().name(),
        bounds = bounds.kind_name(),
        spacing = spec.spacing(),
        angle = spec.angle_degrees(),
        count = primitives.len(),
        "tiled bounds"
    );
    primitives
}

/// Tile several regions with one spec.
pub fn tile_all(bounds: &[Bounds], spec: &HatchSpec) -> Vec<Primitive> {
    bounds.iter().flat_map(|b| tile(b, spec)).collect()
}

/// Only the line work of a tiling.
pub fn tile_segments(bounds: &Bounds, spec: &HatchSpec) -> Vec<Segment> {
    tile(bounds, spec).iter().filter_map(Primitive::as_segment).copied().collect()
}

// ============================================================================
// TESTS
// ============================================================================
