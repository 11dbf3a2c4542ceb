//! Common utilities shared across CLI commands.

use std::error::Error;
use std::fs;
use std::io::{self, Read, Write};

use serde::Serialize;

use draft_kernel::{Bounds, Color, PatternKind, Point, Primitive};

/// Result type for every subcommand.
pub type CliResult<T = ()> = Result<T, Box<dyn Error>>;

/// Output format for generated primitives.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum OutputFormat {
    Svg,
    Json,
}

/// Value following a flag, advancing the cursor.
pub fn flag_value<'a>(args: &'a [String], i: &mut usize, flag: &str) -> CliResult<&'a str> {
    *i += 1;
    args.get(*i)
        .map(String::as_str)
        .ok_or_else(|| format!("{flag} needs a value").into())
}

/// Numeric value following a flag.
pub fn flag_number(args: &[String], i: &mut usize, flag: &str) -> CliResult<f64> {
    let text = flag_value(args, i, flag)?;
    text.parse().map_err(|_| format!("{flag}: not a number: {text}").into())
}

/// `x,y` pair.
pub fn parse_point(text: &str) -> CliResult<Point> {
    let (x, y) = text
        .split_once(',')
        .ok_or_else(|| format!("expected x,y but got {text:?}"))?;
    Ok(Point::new(x.trim().parse()?, y.trim().parse()?))
}

/// Read a file, or stdin when the path is `-`.
pub fn read_input(path: &str) -> CliResult<String> {
    if path == "-" {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        Ok(buffer)
    } else {
        Ok(fs::read_to_string(path)?)
    }
}

/// Write to a file, or stdout when the path is absent or `-`.
pub fn write_output(path: Option<&str>, content: &str) -> CliResult {
    match path {
        None | Some("-") => {
            let mut out = io::stdout().lock();
            out.write_all(content.as_bytes())?;
            out.flush()?;
        }
        Some(path) => fs::write(path, content)?,
    }
    Ok(())
}

/// One tiled layer, ready to render.
pub struct RenderedLayer {
    pub kind: PatternKind,
    pub color: Color,
    pub primitives: Vec<Primitive>,
}

impl RenderedLayer {
    /// Solid fills paint their rings; everything else is line work.
    pub fn paint(&self) -> String {
        match self.kind.fill_color() {
            Some(fill) => format!(r#"fill="{fill}" stroke="none""#),
            None => format!(r#"fill="none" stroke="{}""#, self.color),
        }
    }
}

/// Union bounding box of all regions, padded by `margin`.
pub fn view_box(bounds: &[Bounds], margin: f64) -> (f64, f64, f64, f64) {
    let mut min_x = f64::INFINITY;
    let mut min_y = f64::INFINITY;
    let mut max_x = f64::NEG_INFINITY;
    let mut max_y = f64::NEG_INFINITY;
    for b in bounds {
        let bbox = b.bounding_box();
        min_x = min_x.min(bbox.min_x());
        min_y = min_y.min(bbox.min_y());
        max_x = max_x.max(bbox.max_x());
        max_y = max_y.max(bbox.max_y());
    }
    if !min_x.is_finite() {
        return (0.0, 0.0, 100.0, 100.0);
    }
    (min_x - margin, min_y - margin, max_x - min_x + 2.0 * margin, max_y - min_y + 2.0 * margin)
}

fn points_attr(points: &[Point]) -> String {
    points.iter().map(|p| format!("{:.3},{:.3}", p.x, p.y)).collect::<Vec<_>>().join(" ")
}

/// Append one primitive as an SVG element.
pub fn push_primitive(svg: &mut String, primitive: &Primitive, dot_radius: f64) {
    let element = match primitive {
        Primitive::Segment(s) => format!(
            r#"  <line x1="{:.3}" y1="{:.3}" x2="{:.3}" y2="{:.3}"/>"#,
            s.start.x, s.start.y, s.end.x, s.end.y
        ),
        Primitive::Point(p) => format!(
            r#"  <circle cx="{:.3}" cy="{:.3}" r="{dot_radius:.3}" stroke="none" fill="currentColor"/>"#,
            p.x, p.y
        ),
        Primitive::Polygon(ring) => format!(r#"  <polygon points="{}"/>"#, points_attr(ring)),
    };
    svg.push_str(&element);
    svg.push('\n');
}

/// Bounds outlines plus every layer as one SVG document.
pub fn layers_to_svg(bounds: &[Bounds], layers: &[RenderedLayer], stroke_width: f64) -> String {
    let (x, y, w, h) = view_box(bounds, stroke_width * 4.0);
    let mut svg = String::new();
    svg.push_str(&format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<svg xmlns="http://www.w3.org/2000/svg" viewBox="{x:.3} {y:.3} {w:.3} {h:.3}">
"#
    ));

    for (index, layer) in layers.iter().enumerate() {
        svg.push_str(&format!(
            "<g id=\"layer-{index}-{}\" color=\"{}\" {} stroke-width=\"{stroke_width}\" stroke-linecap=\"round\">\n",
            layer.kind,
            layer.color,
            layer.paint()
        ));
        for primitive in &layer.primitives {
            push_primitive(&mut svg, primitive, stroke_width);
        }
        svg.push_str("</g>\n");
    }

    svg.push_str(&format!(
        "<g id=\"bounds\" fill=\"none\" stroke=\"#999999\" stroke-width=\"{stroke_width}\">\n"
    ));
    for b in bounds {
        svg.push_str(&format!("  <polygon points=\"{}\"/>\n", points_attr(&b.outline())));
    }
    svg.push_str("</g>\n</svg>\n");
    svg
}

/// A primitive in JSON output format.
#[derive(Serialize, Debug, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum JsonPrimitive {
    Segment { x1: f64, y1: f64, x2: f64, y2: f64 },
    Point { x: f64, y: f64 },
    Polygon { points: Vec<[f64; 2]> },
}

impl From<&Primitive> for JsonPrimitive {
    fn from(primitive: &Primitive) -> Self {
        match primitive {
            Primitive::Segment(s) => JsonPrimitive::Segment { x1: s.start.x, y1: s.start.y, x2: s.end.x, y2: s.end.y },
            Primitive::Point(p) => JsonPrimitive::Point { x: p.x, y: p.y },
            Primitive::Polygon(ring) => JsonPrimitive::Polygon { points: ring.iter().map(|p| [p.x, p.y]).collect() },
        }
    }
}

/// A layer in JSON output format.
#[derive(Serialize)]
pub struct JsonLayer {
    pub pattern: &'static str,
    pub color: String,
    pub primitives: Vec<JsonPrimitive>,
}

/// JSON output for a whole tiling run.
#[derive(Serialize)]
pub struct JsonOutput {
    pub bounds: usize,
    pub layers: Vec<JsonLayer>,
}

pub fn layers_to_json(bounds: &[Bounds], layers: &[RenderedLayer]) -> CliResult<String> {
    let output = JsonOutput {
        bounds: bounds.len(),
        layers: layers
            .iter()
            .map(|layer| JsonLayer {
                pattern: layer.kind.name(),
                color: layer.kind.fill_color().unwrap_or(layer.color).to_hex(),
                primitives: layer.primitives.iter().map(JsonPrimitive::from).collect(),
            })
            .collect(),
    };
    Ok(serde_json::to_string_pretty(&output)?)
}
