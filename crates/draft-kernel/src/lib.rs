//! # draft-kernel
//!
//! Stateless 2D geometry for drafting tools.
//!
//! Every function is a pure transform of its inputs: pointer positions and
//! segments go in, points, segments and small polygons come out. Rendering,
//! hit-testing and undo history belong to the caller.
//!
//! ## Layout
//!
//! - [`segment`]: distances and intersections
//! - [`arc`]: circumcircles, arc fitting and sampling
//! - [`snap`]: polar and feature snapping
//! - [`clip`]: clipping segments to [`Bounds`]
//! - [`hatch`] and [`patterns`]: hatch tiling
//! - [`construct`]: trim, extend, parallel-offset
//! - [`tools`]: the interactive state machines that drive the above
//! - [`shapes`], [`dimension`], [`svg`]: shapes, dimension geometry, boundary import
//!
//! Geometric dead ends (parallel lines, collinear points, a line clipped to
//! nothing) are `None`. Only invalid caller input is a [`KernelError`].

pub mod arc;
pub mod bounds;
pub mod clip;
pub mod construct;
pub mod dimension;
pub mod error;
pub mod geometry;
pub mod hatch;
pub mod patterns;
pub mod rng;
pub mod segment;
pub mod shapes;
pub mod snap;
pub mod svg;
pub mod tools;

// Re-export common types at crate root for convenience.
pub use arc::{Arc, circumcenter, fit_arc, fit_arc_toward, sample_arc};
pub use bounds::{Bounds, Circle, Rect};
pub use clip::{clip, clip_spans, point_in_polygon};
pub use construct::{SegmentEnd, TrimResult, extend, parallel_offset, trim};
pub use error::{KernelError, Result};
pub use geometry::{ConstructionPlane, EPSILON, Line, Point, Polygon, Segment};
pub use hatch::{Color, HatchSpec, Primitive, tile};
pub use patterns::PatternKind;
pub use segment::{distance_point_to_segment, line_intersection, segment_intersection};
pub use snap::{InteractionContext, SnapCandidate, SnapKind, SnapResult, solve_snap};
pub use svg::{bounds_from_path_data, bounds_from_svg};
pub use tools::{ToolMode, ToolStatus};
