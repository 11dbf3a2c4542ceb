//! CLI command implementations.
//!
//! This module contains the implementations for the CLI subcommands:
//! - `tile` - Hatch SVG regions or job files
//! - `swatches` - Generate pattern swatch sheets
//! - `benchmark` - Benchmark pattern tiling performance
//! - `snap` - Resolve a pointer position against snapping rules

pub mod benchmark;
pub mod common;
pub mod job;
pub mod snap;
pub mod swatches;
pub mod tile;

pub use benchmark::cmd_benchmark;
pub use common::CliResult;
pub use snap::cmd_snap;
pub use swatches::cmd_swatches;
pub use tile::cmd_tile;
