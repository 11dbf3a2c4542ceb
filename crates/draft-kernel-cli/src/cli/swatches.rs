//! Generate pattern swatch sheets for documentation and reference.
//!
//! Creates a grid with one swatch per pattern kind and a label below each.

use std::fs;

use resvg::usvg;
use tiny_skia::Pixmap;
use tracing::info;

use draft_kernel::{Bounds, HatchSpec, PatternKind, Point, tile};

use super::common::{CliResult, RenderedLayer, flag_number, flag_value, push_primitive};

const SWATCH_SIZE: f64 = 108.0;
const LABEL_HEIGHT: f64 = 14.0;
const GUTTER: f64 = 10.0;
const MARGIN: f64 = 18.0;
const COLUMNS: usize = 7;

const DEFAULT_SPACING: f64 = 8.0;
const DEFAULT_ANGLE: f64 = 0.0;

/// Swatch sheet settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SheetOptions {
    pub spacing: f64,
    pub angle: f64,
    pub stroke_width: f64,
    /// Clip swatches to circles instead of squares.
    pub circles: bool,
}

impl Default for SheetOptions {
    fn default() -> Self {
        Self { spacing: DEFAULT_SPACING, angle: DEFAULT_ANGLE, stroke_width: 1.0, circles: false }
    }
}

fn sheet_size(count: usize) -> (f64, f64) {
    let rows = count.div_ceil(COLUMNS);
    let width = 2.0 * MARGIN + COLUMNS as f64 * (SWATCH_SIZE + GUTTER) - GUTTER;
    let height = 2.0 * MARGIN + rows as f64 * (SWATCH_SIZE + LABEL_HEIGHT + GUTTER) - GUTTER;
    (width, height)
}

fn swatch_bounds(x: f64, y: f64, circles: bool) -> CliResult<Bounds> {
    let half = SWATCH_SIZE / 2.0;
    Ok(if circles {
        Bounds::circle(Point::new(x + half, y + half), half)?
    } else {
        Bounds::rect(x, y, x + SWATCH_SIZE, y + SWATCH_SIZE)?
    })
}

/// Build the swatch sheet SVG.
pub fn swatch_sheet(options: &SheetOptions) -> CliResult<String> {
    let kinds = PatternKind::all();
    let (width, height) = sheet_size(kinds.len());

    let mut svg = String::new();
    svg.push_str(&format!(
        r##"<?xml version="1.0" encoding="UTF-8"?>
<svg xmlns="http://www.w3.org/2000/svg" width="{width:.2}" height="{height:.2}" viewBox="0 0 {width:.2} {height:.2}">
  <title>Pattern Swatches - draft-kernel</title>
  <rect width="100%" height="100%" fill="white"/>
"##
    ));

    for (idx, &kind) in kinds.iter().enumerate() {
        let x = MARGIN + (idx % COLUMNS) as f64 * (SWATCH_SIZE + GUTTER);
        let y = MARGIN + (idx / COLUMNS) as f64 * (SWATCH_SIZE + LABEL_HEIGHT + GUTTER);
        let bounds = swatch_bounds(x, y, options.circles)?;
        let spec = HatchSpec::new(kind, options.spacing, options.angle)?;
        let layer = RenderedLayer { kind, color: spec.color(), primitives: tile(&bounds, &spec) };

        svg.push_str(&format!(
            "  <g id=\"swatch-{kind}\" color=\"{}\" {} stroke-width=\"{}\" stroke-linecap=\"round\">\n",
            layer.color,
            layer.paint(),
            options.stroke_width
        ));
        for primitive in &layer.primitives {
            push_primitive(&mut svg, primitive, options.stroke_width);
        }
        svg.push_str("  </g>\n");

        let outline: Vec<String> = bounds.outline().iter().map(|p| format!("{:.2},{:.2}", p.x, p.y)).collect();
        svg.push_str(&format!(
            "  <polygon points=\"{}\" fill=\"none\" stroke=\"#cccccc\" stroke-width=\"0.5\"/>\n",
            outline.join(" ")
        ));
        svg.push_str(&format!(
            "  <text x=\"{:.2}\" y=\"{:.2}\" font-family=\"sans-serif\" font-size=\"10\" text-anchor=\"middle\" fill=\"#333333\">{kind}</text>\n",
            x + SWATCH_SIZE / 2.0,
            y + SWATCH_SIZE + LABEL_HEIGHT - 3.0
        ));
    }

    svg.push_str("</svg>\n");
    Ok(svg)
}

/// Execute the swatches command.
pub fn cmd_swatches(args: &[String]) -> CliResult {
    let mut output_path = "pattern_swatches.svg".to_string();
    let mut png_output: Option<String> = None;
    let mut png_scale = 2.0_f64;
    let mut options = SheetOptions::default();

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "-o" | "--output" => output_path = flag_value(args, &mut i, "--output")?.to_string(),
            "-s" | "--spacing" => options.spacing = flag_number(args, &mut i, "--spacing")?,
            "-a" | "--angle" => options.angle = flag_number(args, &mut i, "--angle")?,
            "-w" | "--stroke-width" => options.stroke_width = flag_number(args, &mut i, "--stroke-width")?,
            "--circles" => options.circles = true,
            "--png" => png_output = Some(flag_value(args, &mut i, "--png")?.to_string()),
            "--png-scale" => png_scale = flag_number(args, &mut i, "--png-scale")?,
            "-h" | "--help" => {
                print_usage();
                return Ok(());
            }
            other => return Err(format!("unknown option: {other}").into()),
        }
        i += 1;
    }

    info!(
        "Generating {} swatches (spacing {}, angle {}°)",
        PatternKind::all().len(),
        options.spacing,
        options.angle
    );
    let svg = swatch_sheet(&options)?;
    fs::write(&output_path, &svg)?;
    info!("Wrote: {}", output_path);

    if let Some(png_path) = png_output {
        let (width, height) = sheet_size(PatternKind::all().len());
        render_png(&svg, &png_path, png_scale, width, height)?;
    }
    Ok(())
}

/// Rasterize an SVG with resvg.
fn render_png(svg: &str, png_path: &str, scale: f64, width: f64, height: f64) -> CliResult {
    let tree = usvg::Tree::from_str(svg, &usvg::Options::default())?;

    let pixmap_width = (width * scale).ceil() as u32;
    let pixmap_height = (height * scale).ceil() as u32;
    let mut pixmap = Pixmap::new(pixmap_width, pixmap_height)
        .ok_or_else(|| format!("cannot allocate a {pixmap_width}x{pixmap_height} pixmap"))?;
    pixmap.fill(tiny_skia::Color::WHITE);

    let transform = tiny_skia::Transform::from_scale(scale as f32, scale as f32);
    resvg::render(&tree, transform, &mut pixmap.as_mut());
    pixmap.save_png(png_path)?;

    info!("Wrote: {} ({}x{})", png_path, pixmap_width, pixmap_height);
    Ok(())
}

fn print_usage() {
    eprintln!("draft-kernel swatches - Generate pattern swatch sheet");
    eprintln!();
    eprintln!("USAGE:");
    eprintln!("    draft-kernel swatches [OPTIONS]");
    eprintln!();
    eprintln!("OPTIONS:");
    eprintln!("    -o, --output <file>    Output SVG file (default: pattern_swatches.svg)");
    eprintln!("    -s, --spacing <n>      Pattern spacing (default: {DEFAULT_SPACING})");
    eprintln!("    -a, --angle <deg>      Pattern angle (default: {DEFAULT_ANGLE})");
    eprintln!("    -w, --stroke-width <n> Line width (default: 1.0)");
    eprintln!("    --circles              Clip swatches to circles");
    eprintln!("    --png <file>           Also generate PNG output");
    eprintln!("    --png-scale <n>        PNG scale factor (default: 2.0)");
}
