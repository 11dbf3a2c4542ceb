//! Solid fills: the bounds outline as one polygon.
//!
//! The shade comes from [`super::PatternKind::fill_color`]; the renderer
//! paints the ring with it.

use super::util::TileSink;

pub(super) fn flat(sink: &mut TileSink) {
    let outline = sink.bounds().outline();
    sink.world_polygon(outline);
}
