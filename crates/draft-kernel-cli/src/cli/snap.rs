//! Snap command: resolve one pointer position and print the result.

use serde::Serialize;

use draft_kernel::snap::{DEFAULT_ANGLE_INCREMENT, DEFAULT_DISTANCE_INCREMENT, FeatureSet, no_feature};
use draft_kernel::{InteractionContext, Point, Segment, SnapCandidate, SnapKind, SnapResult, solve_snap};

use super::common::{CliResult, flag_number, flag_value, parse_point};

const DEFAULT_TOLERANCE: f64 = 0.5;

/// A snap result in JSON output format.
#[derive(Serialize, Debug, PartialEq)]
pub struct JsonSnap {
    pub x: f64,
    pub y: f64,
    pub distance: f64,
    pub angle: f64,
    pub kind: &'static str,
}

impl From<SnapResult> for JsonSnap {
    fn from(result: SnapResult) -> Self {
        Self {
            x: result.point.x,
            y: result.point.y,
            distance: result.distance,
            angle: result.angle,
            kind: result.kind.label(),
        }
    }
}

fn parse_segment(text: &str) -> CliResult<Segment> {
    let coords = text.split(',').map(|v| v.trim().parse::<f64>()).collect::<Result<Vec<_>, _>>()?;
    match coords.as_slice() {
        [x1, y1, x2, y2] => Ok(Segment::from_coords(*x1, *y1, *x2, *y2)),
        _ => Err(format!("expected x1,y1,x2,y2 but got {text:?}").into()),
    }
}

/// Execute the snap command.
pub fn cmd_snap(args: &[String]) -> CliResult {
    let mut reference: Option<Point> = None;
    let mut pointer: Option<Point> = None;
    let mut precise = false;
    let mut angle_step = DEFAULT_ANGLE_INCREMENT;
    let mut distance_step = DEFAULT_DISTANCE_INCREMENT;
    let mut tolerance = DEFAULT_TOLERANCE;
    let mut features: Vec<Point> = Vec::new();
    let mut segments: Vec<Segment> = Vec::new();

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "-r" | "--reference" => reference = Some(parse_point(flag_value(args, &mut i, "--reference")?)?),
            "-p" | "--pointer" => pointer = Some(parse_point(flag_value(args, &mut i, "--pointer")?)?),
            "--precise" => precise = true,
            "--angle-step" => angle_step = flag_number(args, &mut i, "--angle-step")?,
            "--distance-step" => distance_step = flag_number(args, &mut i, "--distance-step")?,
            "--tolerance" => tolerance = flag_number(args, &mut i, "--tolerance")?,
            "--feature" => features.push(parse_point(flag_value(args, &mut i, "--feature")?)?),
            "--segment" => segments.push(parse_segment(flag_value(args, &mut i, "--segment")?)?),
            "-h" | "--help" => {
                print_usage();
                return Ok(());
            }
            other => return Err(format!("unknown option: {other}").into()),
        }
        i += 1;
    }

    let Some(pointer) = pointer else {
        print_usage();
        return Err("--pointer is required".into());
    };

    let ctx = InteractionContext::new(precise, angle_step, distance_step)?;
    let result = if features.is_empty() && segments.is_empty() {
        solve_snap(pointer, reference, no_feature, &ctx)
    } else {
        let mut set = FeatureSet::from_segments(&segments, tolerance)?;
        for point in features {
            set.add(SnapCandidate::new(point, SnapKind::Endpoint))?;
        }
        solve_snap(pointer, reference, |p| set.probe(p), &ctx)
    };

    println!("{}", serde_json::to_string_pretty(&JsonSnap::from(result))?);
    Ok(())
}

fn print_usage() {
    eprintln!("Usage: draft-kernel snap --pointer x,y [options]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -p, --pointer <x,y>       Raw pointer position (required)");
    eprintln!("  -r, --reference <x,y>     Reference point for polar snapping");
    eprintln!("  --precise                 Precision override: no polar rounding");
    eprintln!("  --angle-step <deg>        Angle increment (default: {DEFAULT_ANGLE_INCREMENT})");
    eprintln!("  --distance-step <d>       Distance increment (default: {DEFAULT_DISTANCE_INCREMENT})");
    eprintln!("  --feature <x,y>           Endpoint snap candidate (repeatable)");
    eprintln!("  --segment <x1,y1,x2,y2>   Scene segment; adds endpoints and crossings (repeatable)");
    eprintln!("  --tolerance <d>           Feature snap radius (default: {DEFAULT_TOLERANCE})");
}
