//! Interactive tool state machines.
//!
//! Tools own the interaction state; the kernel calls they make are pure.
//! The active tool is a [`ToolMode`] matched exhaustively, and every
//! state machine can be cancelled back to idle from any state.
//!
//! ```text
//! ConstructionTool:  Idle → AwaitingReference → AwaitingTarget → Applied → Idle
//! PolylineTool:      Idle → PointCollecting ⇄ Arc(AwaitingArcEnd → AwaitingArcApply)
//! ```
//!
//! Points handed to a tool are expected to be snapped already
//! (see [`crate::snap::solve_snap`]).

use std::fmt;

use crate::construct::{SegmentEnd, extend, extend_by, parallel_offset, trim};
use crate::error::{Result, require_positive};
use crate::geometry::{Line, Point, Segment};
use crate::shapes::Polyline;

/// Which tool is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolMode {
    Select,
    Line,
    Rectangle,
    Circle,
    Polyline,
    Trim,
    Extend,
    Parallel,
    Hatch,
    Dimension,
}

impl ToolMode {
    pub fn all() -> &'static [ToolMode] {
        &[
            ToolMode::Select,
            ToolMode::Line,
            ToolMode::Rectangle,
            ToolMode::Circle,
            ToolMode::Polyline,
            ToolMode::Trim,
            ToolMode::Extend,
            ToolMode::Parallel,
            ToolMode::Hatch,
            ToolMode::Dimension,
        ]
    }

    pub fn name(self) -> &'static str {
        match self {
            ToolMode::Select => "select",
            ToolMode::Line => "line",
            ToolMode::Rectangle => "rectangle",
            ToolMode::Circle => "circle",
            ToolMode::Polyline => "polyline",
            ToolMode::Trim => "trim",
            ToolMode::Extend => "extend",
            ToolMode::Parallel => "parallel",
            ToolMode::Hatch => "hatch",
            ToolMode::Dimension => "dimension",
        }
    }

    /// The construction operation this mode drives, if any.
    pub fn construction_op(self) -> Option<ConstructionOp> {
        match self {
            ToolMode::Trim => Some(ConstructionOp::Trim),
            ToolMode::Extend => Some(ConstructionOp::Extend),
            ToolMode::Parallel => Some(ConstructionOp::Parallel),
            ToolMode::Select
            | ToolMode::Line
            | ToolMode::Rectangle
            | ToolMode::Circle
            | ToolMode::Polyline
            | ToolMode::Hatch
            | ToolMode::Dimension => None,
        }
    }
}

impl fmt::Display for ToolMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// User-adjustable tool parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToolSettings {
    offset_distance: f64,
    extend_length: f64,
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self { offset_distance: 1.0, extend_length: crate::construct::DEFAULT_EXTEND_LENGTH }
    }
}

impl ToolSettings {
    pub fn new(offset_distance: f64, extend_length: f64) -> Result<Self> {
        Ok(Self {
            offset_distance: require_positive("offset distance", offset_distance)?,
            extend_length: require_positive("extend length", extend_length)?,
        })
    }

    pub fn offset_distance(&self) -> f64 {
        self.offset_distance
    }

    pub fn extend_length(&self) -> f64 {
        self.extend_length
    }
}

/// Why an interaction step produced nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Failure {
    NothingPicked,
    LinesDoNotCross,
    NoBoundaryHit,
    ZeroLength,
    NoArcPossible,
    TooFewPoints,
}

impl Failure {
    pub fn message(self) -> &'static str {
        match self {
            Failure::NothingPicked => "nothing selected",
            Failure::LinesDoNotCross => "lines do not intersect",
            Failure::NoBoundaryHit => "segment does not reach the boundary",
            Failure::ZeroLength => "segment has zero length",
            Failure::NoArcPossible => "not enough points for an arc",
            Failure::TooFewPoints => "not enough points",
        }
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// What a tool reports after each input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolStatus {
    /// Waiting for input; the text is the prompt to show.
    Prompt(&'static str),
    /// A kernel call succeeded and its result is ready.
    Applied,
    /// The step failed; the tool has reset.
    Failed(Failure),
    Cancelled,
}

impl ToolStatus {
    pub fn message(&self) -> &'static str {
        match self {
            ToolStatus::Prompt(text) => *text,
            ToolStatus::Applied => "done",
            ToolStatus::Failed(failure) => failure.message(),
            ToolStatus::Cancelled => "cancelled",
        }
    }
}

/// A click, with the segment under it if the scene found one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pick {
    pub point: Point,
    pub segment: Option<Segment>,
}

impl Pick {
    pub fn at(point: Point) -> Self {
        Self { point, segment: None }
    }

    pub fn on(segment: Segment, point: Point) -> Self {
        Self { point, segment: Some(segment) }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstructionOp {
    Trim,
    Extend,
    Parallel,
}

impl ConstructionOp {
    fn reference_prompt(self) -> &'static str {
        match self {
            ConstructionOp::Trim => "select cutting edge",
            ConstructionOp::Extend => "select boundary edge (or empty space for a fixed length)",
            ConstructionOp::Parallel => "select reference segment",
        }
    }

    fn target_prompt(self) -> &'static str {
        match self {
            ConstructionOp::Trim => "select the part to remove",
            ConstructionOp::Extend => "select the end to extend",
            ConstructionOp::Parallel => "click the side to offset toward",
        }
    }
}

/// Finalized geometry from a construction tool.
#[derive(Debug, Clone, PartialEq)]
pub enum ConstructionOutput {
    /// `original` replaced by `kept` (possibly empty).
    Trimmed { original: Segment, kept: Vec<Segment> },
    Extended { original: Segment, extended: Segment },
    Offset(Segment),
}

/// Phase of a [`ConstructionTool`], for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolPhase {
    Idle,
    AwaitingReference,
    AwaitingTarget,
    Applied,
}

#[derive(Debug, Clone, PartialEq)]
enum ConstructionState {
    Idle,
    AwaitingReference,
    /// `None` only for extend without a boundary.
    AwaitingTarget(Option<Segment>),
    Applied(ConstructionOutput),
}

/// Trim / extend / parallel-offset as a two-pick interaction.
#[derive(Debug, Clone, PartialEq)]
pub struct ConstructionTool {
    op: ConstructionOp,
    settings: ToolSettings,
    state: ConstructionState,
}

impl ConstructionTool {
    pub fn new(op: ConstructionOp, settings: ToolSettings) -> Self {
        Self { op, settings, state: ConstructionState::Idle }
    }

    pub fn op(&self) -> ConstructionOp {
        self.op
    }

    pub fn phase(&self) -> ToolPhase {
        match self.state {
            ConstructionState::Idle => ToolPhase::Idle,
            ConstructionState::AwaitingReference => ToolPhase::AwaitingReference,
            ConstructionState::AwaitingTarget(_) => ToolPhase::AwaitingTarget,
            ConstructionState::Applied(_) => ToolPhase::Applied,
        }
    }

    /// Start a round. Discards an unclaimed result.
    pub fn begin(&mut self) -> ToolStatus {
        self.state = ConstructionState::AwaitingReference;
        ToolStatus::Prompt(self.op.reference_prompt())
    }

    /// Feed one click. Idle or finished tools start a new round first.
    pub fn pick(&mut self, pick: Pick) -> ToolStatus {
        match std::mem::replace(&mut self.state, ConstructionState::Idle) {
            ConstructionState::Idle | ConstructionState::Applied(_) => {
                self.begin();
                self.pick(pick)
            }
            ConstructionState::AwaitingReference => self.pick_reference(pick),
            ConstructionState::AwaitingTarget(reference) => self.apply(reference, pick),
        }
    }

    fn pick_reference(&mut self, pick: Pick) -> ToolStatus {
        match (pick.segment, self.op) {
            (None, ConstructionOp::Extend) | (Some(_), _) => {
                self.state = ConstructionState::AwaitingTarget(pick.segment);
                ToolStatus::Prompt(self.op.target_prompt())
            }
            (None, _) => {
                self.state = ConstructionState::AwaitingReference;
                ToolStatus::Failed(Failure::NothingPicked)
            }
        }
    }

    fn apply(&mut self, reference: Option<Segment>, pick: Pick) -> ToolStatus {
        match self.compute(reference, pick) {
            Ok(output) => {
                self.state = ConstructionState::Applied(output);
                ToolStatus::Applied
            }
            Err(failure) => ToolStatus::Failed(failure),
        }
    }

    fn compute(&self, reference: Option<Segment>, pick: Pick) -> std::result::Result<ConstructionOutput, Failure> {
        match self.op {
            ConstructionOp::Trim => {
                let target = pick.segment.ok_or(Failure::NothingPicked)?;
                let cutter = reference.ok_or(Failure::NothingPicked)?;
                let result = trim(&target, &cutter).ok_or(Failure::LinesDoNotCross)?;
                Ok(ConstructionOutput::Trimmed { original: target, kept: result.keep_away_from(pick.point) })
            }
            ConstructionOp::Extend => {
                let target = pick.segment.ok_or(Failure::NothingPicked)?;
                if target.is_degenerate() {
                    return Err(Failure::ZeroLength);
                }
                let end = SegmentEnd::nearest(&target, pick.point);
                let extended = match reference {
                    Some(boundary) => extend(&target, end, Some(&Line::from(boundary))),
                    None => extend_by(&target, end, self.settings.extend_length),
                }
                .ok_or(Failure::NoBoundaryHit)?;
                Ok(ConstructionOutput::Extended { original: target, extended })
            }
            ConstructionOp::Parallel => {
                let reference = reference.ok_or(Failure::NothingPicked)?;
                parallel_offset(&reference, pick.point, self.settings.offset_distance)
                    .map(ConstructionOutput::Offset)
                    .ok_or(Failure::ZeroLength)
            }
        }
    }

    /// Claim the applied result and return to idle.
    pub fn finish(&mut self) -> Option<ConstructionOutput> {
        match std::mem::replace(&mut self.state, ConstructionState::Idle) {
            ConstructionState::Applied(output) => Some(output),
            other => {
                self.state = other;
                None
            }
        }
    }

    pub fn cancel(&mut self) -> ToolStatus {
        self.state = ConstructionState::Idle;
        ToolStatus::Cancelled
    }
}

/// Arc entry inside a polyline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ArcSubMode {
    AwaitingArcEnd,
    /// End chosen; the cursor now bends the arc.
    AwaitingArcApply { end: Point },
}

#[derive(Debug, Clone, PartialEq)]
enum PolylineState {
    Idle,
    PointCollecting(Polyline),
    Arc(Polyline, ArcSubMode),
}

/// Click-by-click polyline entry with straight and arc pieces.
#[derive(Debug, Clone, PartialEq)]
pub struct PolylineTool {
    state: PolylineState,
}

impl Default for PolylineTool {
    fn default() -> Self {
        Self::new()
    }
}

impl PolylineTool {
    pub fn new() -> Self {
        Self { state: PolylineState::Idle }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.state, PolylineState::Idle)
    }

    /// Current arc sub-mode, `None` while collecting straight points.
    pub fn arc_mode(&self) -> Option<ArcSubMode> {
        match self.state {
            PolylineState::Arc(_, mode) => Some(mode),
            _ => None,
        }
    }

    pub fn polyline(&self) -> Option<&Polyline> {
        match &self.state {
            PolylineState::Idle => None,
            PolylineState::PointCollecting(line) | PolylineState::Arc(line, _) => Some(line),
        }
    }

    pub fn click(&mut self, p: Point) -> ToolStatus {
        match std::mem::replace(&mut self.state, PolylineState::Idle) {
            PolylineState::Idle => {
                self.state = PolylineState::PointCollecting(Polyline::new(p));
                ToolStatus::Prompt("next point")
            }
            PolylineState::PointCollecting(mut line) => {
                line.line_to(p);
                self.state = PolylineState::PointCollecting(line);
                ToolStatus::Prompt("next point")
            }
            PolylineState::Arc(line, ArcSubMode::AwaitingArcEnd) => {
                self.state = PolylineState::Arc(line, ArcSubMode::AwaitingArcApply { end: p });
                ToolStatus::Prompt("move to bend the arc, click to apply")
            }
            PolylineState::Arc(mut line, ArcSubMode::AwaitingArcApply { end }) => {
                let fitted = line.arc_toward(end, p);
                self.state = PolylineState::PointCollecting(line);
                if fitted { ToolStatus::Prompt("next point") } else { ToolStatus::Failed(Failure::NoArcPossible) }
            }
        }
    }

    /// Switch the next piece to an arc.
    pub fn begin_arc(&mut self) -> ToolStatus {
        match std::mem::replace(&mut self.state, PolylineState::Idle) {
            PolylineState::PointCollecting(line) | PolylineState::Arc(line, _) => {
                self.state = PolylineState::Arc(line, ArcSubMode::AwaitingArcEnd);
                ToolStatus::Prompt("arc end point")
            }
            PolylineState::Idle => ToolStatus::Failed(Failure::TooFewPoints),
        }
    }

    /// Rubber-band geometry for the cursor position; never persisted.
    pub fn preview(&self, cursor: Point) -> Vec<Point> {
        match &self.state {
            PolylineState::Idle => Vec::new(),
            PolylineState::PointCollecting(line) | PolylineState::Arc(line, ArcSubMode::AwaitingArcEnd) => {
                let mut points = line.flatten();
                points.push(cursor);
                points
            }
            PolylineState::Arc(line, ArcSubMode::AwaitingArcApply { end }) => {
                let mut trial = line.clone();
                if !trial.arc_toward(*end, cursor) {
                    trial.line_to(*end);
                }
                trial.flatten()
            }
        }
    }

    /// Hand over the polyline and return to idle.
    ///
    /// A polyline without pieces is discarded and reported as too short.
    pub fn finish(&mut self) -> std::result::Result<Polyline, Failure> {
        match std::mem::replace(&mut self.state, PolylineState::Idle) {
            PolylineState::PointCollecting(line) | PolylineState::Arc(line, _) if !line.is_empty() => Ok(line),
            _ => Err(Failure::TooFewPoints),
        }
    }

    /// Close the loop and hand it over.
    pub fn close(&mut self) -> std::result::Result<Polyline, Failure> {
        let mut line = self.finish()?;
        line.close().map_err(|_| Failure::TooFewPoints)?;
        Ok(line)
    }

    /// Leave arc entry if active, otherwise drop the polyline.
    pub fn cancel(&mut self) -> ToolStatus {
        self.state = match std::mem::replace(&mut self.state, PolylineState::Idle) {
            PolylineState::Arc(line, _) => PolylineState::PointCollecting(line),
            PolylineState::PointCollecting(_) | PolylineState::Idle => PolylineState::Idle,
        };
        ToolStatus::Cancelled
    }
}

/// The state machine behind the active [`ToolMode`].
#[derive(Debug, Clone, PartialEq)]
pub enum ActiveTool {
    Construction(ConstructionTool),
    Polyline(PolylineTool),
    /// Modes whose interaction is a single kernel call.
    Direct(ToolMode),
}

impl ActiveTool {
    pub fn for_mode(mode: ToolMode, settings: ToolSettings) -> Self {
        match (mode, mode.construction_op()) {
            (_, Some(op)) => ActiveTool::Construction(ConstructionTool::new(op, settings)),
            (ToolMode::Polyline, None) => ActiveTool::Polyline(PolylineTool::new()),
            (other, None) => ActiveTool::Direct(other),
        }
    }

    pub fn mode(&self) -> ToolMode {
        match self {
            ActiveTool::Construction(tool) => match tool.op() {
                ConstructionOp::Trim => ToolMode::Trim,
                ConstructionOp::Extend => ToolMode::Extend,
                ConstructionOp::Parallel => ToolMode::Parallel,
            },
            ActiveTool::Polyline(_) => ToolMode::Polyline,
            ActiveTool::Direct(mode) => *mode,
        }
    }

    pub fn cancel(&mut self) -> ToolStatus {
        match self {
            ActiveTool::Construction(tool) => tool.cancel(),
            ActiveTool::Polyline(tool) => tool.cancel(),
            ActiveTool::Direct(_) => ToolStatus::Cancelled,
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    fn seg(x1: f64, y1: f64, x2: f64, y2: f64) -> Segment {
        Segment::from_coords(x1, y1, x2, y2)
    }

    #[test]
    fn trim_round_trip() {
        let mut tool = ConstructionTool::new(ConstructionOp::Trim, ToolSettings::default());
        assert_eq!(tool.phase(), ToolPhase::Idle);
        assert_eq!(tool.begin(), ToolStatus::Prompt("select cutting edge"));

        let cutter = seg(5.0, -5.0, 5.0, 5.0);
        assert!(matches!(tool.pick(Pick::on(cutter, p(5.0, 0.0))), ToolStatus::Prompt(_)));
        assert_eq!(tool.phase(), ToolPhase::AwaitingTarget);

        let target = seg(0.0, 0.0, 10.0, 0.0);
        assert_eq!(tool.pick(Pick::on(target, p(8.0, 0.0))), ToolStatus::Applied);
        assert_eq!(tool.phase(), ToolPhase::Applied);

        let output = tool.finish().unwrap();
        assert_eq!(output, ConstructionOutput::Trimmed { original: target, kept: vec![seg(0.0, 0.0, 5.0, 0.0)] });
        assert_eq!(tool.phase(), ToolPhase::Idle);
        assert!(tool.finish().is_none());
    }

    #[test]
    fn trim_failure_resets_to_idle() {
        let mut tool = ConstructionTool::new(ConstructionOp::Trim, ToolSettings::default());
        tool.pick(Pick::on(seg(50.0, -5.0, 50.0, 5.0), p(50.0, 0.0)));
        let status = tool.pick(Pick::on(seg(0.0, 0.0, 10.0, 0.0), p(1.0, 0.0)));
        assert_eq!(status, ToolStatus::Failed(Failure::LinesDoNotCross));
        assert_eq!(status.message(), "lines do not intersect");
        assert_eq!(tool.phase(), ToolPhase::Idle);
    }

    #[test]
    fn reference_pick_on_empty_space_retries() {
        let mut tool = ConstructionTool::new(ConstructionOp::Parallel, ToolSettings::default());
        tool.begin();
        assert_eq!(tool.pick(Pick::at(p(1.0, 1.0))), ToolStatus::Failed(Failure::NothingPicked));
        assert_eq!(tool.phase(), ToolPhase::AwaitingReference);
    }

    #[test]
    fn extend_with_and_without_boundary() {
        let settings = ToolSettings::new(1.0, 4.0).unwrap();
        let mut tool = ConstructionTool::new(ConstructionOp::Extend, settings);
        let target = seg(0.0, 0.0, 10.0, 0.0);

        tool.pick(Pick::on(seg(20.0, -1.0, 20.0, 1.0), p(20.0, 0.0)));
        tool.pick(Pick::on(target, p(9.0, 0.0)));
        assert_eq!(
            tool.finish(),
            Some(ConstructionOutput::Extended { original: target, extended: seg(0.0, 0.0, 20.0, 0.0) })
        );

        tool.pick(Pick::at(p(30.0, 30.0)));
        tool.pick(Pick::on(target, p(1.0, 0.0)));
        assert_eq!(
            tool.finish(),
            Some(ConstructionOutput::Extended { original: target, extended: seg(-4.0, 0.0, 10.0, 0.0) })
        );
    }

    #[test]
    fn parallel_uses_settings_distance() {
        let settings = ToolSettings::new(5.0, 10.0).unwrap();
        let mut tool = ActiveTool::for_mode(ToolMode::Parallel, settings);
        let ActiveTool::Construction(inner) = &mut tool else { panic!("expected construction tool") };
        inner.pick(Pick::on(seg(0.0, 0.0, 10.0, 0.0), p(3.0, 0.0)));
        inner.pick(Pick::at(p(5.0, 3.0)));
        assert_eq!(inner.finish(), Some(ConstructionOutput::Offset(seg(0.0, 5.0, 10.0, 5.0))));
    }

    #[test]
    fn cancel_from_any_state() {
        let mut tool = ConstructionTool::new(ConstructionOp::Trim, ToolSettings::default());
        tool.pick(Pick::on(seg(5.0, -5.0, 5.0, 5.0), p(5.0, 0.0)));
        assert_eq!(tool.cancel(), ToolStatus::Cancelled);
        assert_eq!(tool.phase(), ToolPhase::Idle);
    }

    #[test]
    fn polyline_arc_sub_mode() {
        let mut tool = PolylineTool::new();
        assert_eq!(tool.begin_arc(), ToolStatus::Failed(Failure::TooFewPoints));

        tool.click(p(0.0, 0.0));
        tool.click(p(10.0, 0.0));
        tool.begin_arc();
        assert_eq!(tool.arc_mode(), Some(ArcSubMode::AwaitingArcEnd));

        tool.click(p(20.0, 0.0));
        assert_eq!(tool.arc_mode(), Some(ArcSubMode::AwaitingArcApply { end: p(20.0, 0.0) }));
        assert!(tool.preview(p(15.0, 5.0)).len() > 3);

        tool.click(p(15.0, 5.0));
        assert_eq!(tool.arc_mode(), None);
        let line = tool.finish().unwrap();
        assert_eq!(line.segments().len(), 2);
        assert!(tool.is_idle());
    }

    #[test]
    fn collinear_arc_reports_and_keeps_collecting() {
        let mut tool = PolylineTool::new();
        tool.click(p(0.0, 0.0));
        tool.begin_arc();
        tool.click(p(10.0, 0.0));
        assert_eq!(tool.click(p(5.0, 0.0)), ToolStatus::Failed(Failure::NoArcPossible));
        assert_eq!(tool.arc_mode(), None);
        assert!(!tool.is_idle());
    }

    #[test]
    fn polyline_cancel_steps_out() {
        let mut tool = PolylineTool::new();
        tool.click(p(0.0, 0.0));
        tool.begin_arc();
        tool.cancel();
        assert!(!tool.is_idle());
        tool.cancel();
        assert!(tool.is_idle());
        assert_eq!(tool.finish(), Err(Failure::TooFewPoints));
    }

    #[test]
    fn close_polyline() {
        let mut tool = PolylineTool::new();
        for q in [p(0.0, 0.0), p(4.0, 0.0), p(4.0, 3.0)] {
            tool.click(q);
        }
        let line = tool.close().unwrap();
        assert!(line.is_closed());
        assert!((line.length() - 12.0).abs() < 1e-12);
    }

    #[test]
    fn modes_map_to_tools() {
        let settings = ToolSettings::default();
        for &mode in ToolMode::all() {
            assert_eq!(ActiveTool::for_mode(mode, settings).mode(), mode);
        }
        assert!(ToolSettings::new(0.0, 1.0).is_err());
    }
}
