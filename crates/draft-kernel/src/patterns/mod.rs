//! Pattern vocabulary and per-family generators.
//!
//! Each [`PatternKind`] maps to one generation routine. Generators work in
//! the local frame of a [`util::TileSink`] and never see rotation or
//! clipping.

pub mod util;

mod fill;
mod lattice;
mod lines;
mod material;
mod texture;
mod wave;

use std::fmt;

use tracing::warn;

use crate::bounds::Bounds;
use crate::hatch::{Color, HatchSpec, Primitive};
use util::TileSink;

/// Every hatch pattern the kernel can tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PatternKind {
    Parallel,
    Cross,
    Diagonal,
    Dots,
    Grid,
    Brick,
    ConcreteBlock,
    ClayBlock,
    CellularBlock,
    Stone,
    Gravel,
    Sand,
    Earth,
    Grass,
    WoodCrossSection,
    WoodLongitudinal,
    InsulationSoft,
    InsulationRigid,
    Steel,
    Copper,
    RoofFlat,
    RoofWaveTile,
    Glass,
    Water,
    Zigzag,
    FillBlack,
    FillGray,
    FillWhite,
}

impl PatternKind {
    /// Get all available patterns.
    pub fn all() -> &'static [PatternKind] {
        &[
            PatternKind::Parallel,
            PatternKind::Cross,
            PatternKind::Diagonal,
            PatternKind::Dots,
            PatternKind::Grid,
            PatternKind::Brick,
            PatternKind::ConcreteBlock,
            PatternKind::ClayBlock,
            PatternKind::CellularBlock,
            PatternKind::Stone,
            PatternKind::Gravel,
            PatternKind::Sand,
            PatternKind::Earth,
            PatternKind::Grass,
            PatternKind::WoodCrossSection,
            PatternKind::WoodLongitudinal,
            PatternKind::InsulationSoft,
            PatternKind::InsulationRigid,
            PatternKind::Steel,
            PatternKind::Copper,
            PatternKind::RoofFlat,
            PatternKind::RoofWaveTile,
            PatternKind::Glass,
            PatternKind::Water,
            PatternKind::Zigzag,
            PatternKind::FillBlack,
            PatternKind::FillGray,
            PatternKind::FillWhite,
        ]
    }

    /// Stable identifier used in job files and on the command line.
    pub fn name(&self) -> &'static str {
        match self {
            PatternKind::Parallel => "parallel",
            PatternKind::Cross => "cross",
            PatternKind::Diagonal => "diagonal",
            PatternKind::Dots => "dots",
            PatternKind::Grid => "grid",
            PatternKind::Brick => "brick",
            PatternKind::ConcreteBlock => "concrete-block",
            PatternKind::ClayBlock => "clay-block",
            PatternKind::CellularBlock => "cellular-block",
            PatternKind::Stone => "stone",
            PatternKind::Gravel => "gravel",
            PatternKind::Sand => "sand",
            PatternKind::Earth => "earth",
            PatternKind::Grass => "grass",
            PatternKind::WoodCrossSection => "wood-cross-section",
            PatternKind::WoodLongitudinal => "wood-longitudinal",
            PatternKind::InsulationSoft => "insulation-soft",
            PatternKind::InsulationRigid => "insulation-rigid",
            PatternKind::Steel => "steel",
            PatternKind::Copper => "copper",
            PatternKind::RoofFlat => "roof-flat",
            PatternKind::RoofWaveTile => "roof-wave-tile",
            PatternKind::Glass => "glass",
            PatternKind::Water => "water",
            PatternKind::Zigzag => "zigzag",
            PatternKind::FillBlack => "fill-black",
            PatternKind::FillGray => "fill-gray",
            PatternKind::FillWhite => "fill-white",
        }
    }

    /// Exact lookup. Case, `_` and spaces are normalized; a few common
    /// aliases are accepted.
    pub fn try_from_name(name: &str) -> Option<PatternKind> {
        let normalized = name.trim().to_ascii_lowercase().replace(['_', ' '], "-");
        let alias = match normalized.as_str() {
            "lines" | "hatch" => "parallel",
            "crosshatch" | "cross-hatch" => "cross",
            "stipple" => "dots",
            "wood" => "wood-cross-section",
            "insulation" => "insulation-soft",
            other => other,
        };
        Self::all().iter().copied().find(|kind| kind.name() == alias)
    }

    /// Lookup that never fails: unknown names tile as parallel lines.
    pub fn from_name(name: &str) -> PatternKind {
        Self::try_from_name(name).unwrap_or_else(|| {
            warn!(pattern = name, "unknown pattern, falling back to parallel");
            PatternKind::Parallel
        })
    }

    /// One-line description for pattern pickers.
    pub fn describe(&self) -> &'static str {
        match self {
            PatternKind::Parallel => "Parallel lines at the hatch angle",
            PatternKind::Cross => "Two perpendicular sets of parallel lines",
            PatternKind::Diagonal => "Parallel lines turned 45° from the hatch angle",
            PatternKind::Dots => "Regular dot lattice",
            PatternKind::Grid => "Square grid outlines",
            PatternKind::Brick => "Running-bond brick courses",
            PatternKind::ConcreteBlock => "Large running-bond blocks with aggregate dots",
            PatternKind::ClayBlock => "Perforated clay blocks",
            PatternKind::CellularBlock => "Stack-bond aerated blocks with pores",
            PatternKind::Stone => "Irregular stone paving",
            PatternKind::Gravel => "Scattered pebbles",
            PatternKind::Sand => "Dense random stipple",
            PatternKind::Earth => "Alternating short diagonal strokes",
            PatternKind::Grass => "Grass tufts",
            PatternKind::WoodCrossSection => "Growth rings around the center",
            PatternKind::WoodLongitudinal => "Wavy grain lines",
            PatternKind::InsulationSoft => "Looped batt insulation",
            PatternKind::InsulationRigid => "Rigid board bands with diagonals",
            PatternKind::Steel => "Paired diagonal lines",
            PatternKind::Copper => "Alternating solid and dashed diagonals",
            PatternKind::RoofFlat => "Overlapping flat roof tiles",
            PatternKind::RoofWaveTile => "Rows of scalloped tiles",
            PatternKind::Glass => "Sparse groups of short diagonal strokes",
            PatternKind::Water => "Gentle wave lines",
            PatternKind::Zigzag => "Zigzag rows",
            PatternKind::FillBlack => "Solid black fill",
            PatternKind::FillGray => "Solid gray fill",
            PatternKind::FillWhite => "Solid white fill",
        }
    }

    /// Fill color for the solid-fill kinds, `None` for line work.
    pub fn fill_color(&self) -> Option<Color> {
        match self {
            PatternKind::FillBlack => Some(Color::BLACK),
            PatternKind::FillGray => Some(Color::GRAY),
            PatternKind::FillWhite => Some(Color::WHITE),
            _ => None,
        }
    }

    /// Whether output varies with [`HatchSpec::seed`].
    pub fn is_jittered(&self) -> bool {
        matches!(
            self,
            PatternKind::ConcreteBlock
                | PatternKind::CellularBlock
                | PatternKind::Stone
                | PatternKind::Gravel
                | PatternKind::Sand
                | PatternKind::Grass
        )
    }

    /// Run this kind's generator. Prefer [`crate::hatch::tile`], which logs.
    pub fn generate(&self, bounds: &Bounds, spec: &HatchSpec) -> Vec<Primitive> {
        let s = spec.spacing();
        let angle = spec.angle_degrees();
        let seed = spec.seed();
        let mut sink = TileSink::new(bounds, angle);

        match self {
            PatternKind::Parallel => lines::parallel(&mut sink, s),
            PatternKind::Cross => {
                lines::parallel(&mut sink, s);
                sink.rotate_to(angle + 90.0);
                lines::parallel(&mut sink, s);
            }
            PatternKind::Diagonal => {
                sink.rotate_to(angle + 45.0);
                lines::parallel(&mut sink, s);
            }
            PatternKind::Steel => {
                sink.rotate_to(angle + 45.0);
                lines::steel(&mut sink, s);
            }
            PatternKind::Copper => {
                sink.rotate_to(angle + 45.0);
                lines::copper(&mut sink, s);
            }
            PatternKind::Dots => lattice::dots(&mut sink, s),
            PatternKind::Grid => lattice::grid(&mut sink, s),
            PatternKind::Brick => lattice::brick(&mut sink, s),
            PatternKind::ConcreteBlock => lattice::concrete_block(&mut sink, s, seed),
            PatternKind::ClayBlock => lattice::clay_block(&mut sink, s),
            PatternKind::CellularBlock => lattice::cellular_block(&mut sink, s, seed),
            PatternKind::RoofFlat => lattice::roof_flat(&mut sink, s),
            PatternKind::Stone => texture::stone(&mut sink, s, seed),
            PatternKind::Gravel => texture::gravel(&mut sink, s, seed),
            PatternKind::Sand => texture::sand(&mut sink, s, seed),
            PatternKind::Earth => texture::earth(&mut sink, s),
            PatternKind::Grass => texture::grass(&mut sink, s, seed),
            PatternKind::Glass => texture::glass(&mut sink, s),
            PatternKind::WoodCrossSection => material::wood_cross_section(&mut sink, s),
            PatternKind::WoodLongitudinal => material::wood_longitudinal(&mut sink, s),
            PatternKind::InsulationSoft => material::insulation_soft(&mut sink, s),
            PatternKind::InsulationRigid => material::insulation_rigid(&mut sink, s),
            PatternKind::Water => wave::water(&mut sink, s),
            PatternKind::Zigzag => wave::zigzag(&mut sink, s),
            PatternKind::RoofWaveTile => wave::roof_wave_tile(&mut sink, s),
            PatternKind::FillBlack | PatternKind::FillGray | PatternKind::FillWhite => fill::flat(&mut sink),
        }

        sink.finish()
    }
}

impl fmt::Display for PatternKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// TESTS
// ============================================================================
