//! Tile command implementation.

use std::time::Instant;

use tracing::info;

use draft_kernel::hatch::tile_all;
use draft_kernel::{Bounds, HatchSpec, PatternKind, bounds_from_svg};

use super::common::{
    CliResult, OutputFormat, RenderedLayer, flag_number, flag_value, layers_to_json, layers_to_svg, read_input,
    write_output,
};
use super::job::{Job, is_job_path};

const DEFAULT_SPACING: f64 = 5.0;
const DEFAULT_ANGLE: f64 = 0.0;

/// Regions and layers to tile, from either input kind.
pub struct TileInput {
    pub bounds: Vec<Bounds>,
    pub layers: Vec<HatchSpec>,
}

/// Load an SVG (one layer built from `spec`) or a job file (its own layers).
pub fn load_input(path: &str, spec: HatchSpec) -> CliResult<TileInput> {
    if is_job_path(path) {
        let resolved = Job::load(path)?.resolve()?;
        return Ok(TileInput { bounds: resolved.bounds, layers: resolved.layers });
    }

    let content = read_input(path)?;
    let bounds = bounds_from_svg(&content)?;
    Ok(TileInput { bounds, layers: vec![spec] })
}

/// Tile every layer over every region.
pub fn render_layers(input: &TileInput) -> Vec<RenderedLayer> {
    input
        .layers
        .iter()
        .map(|spec| RenderedLayer { kind: spec.kind(), color: spec.color(), primitives: tile_all(&input.bounds, spec) })
        .collect()
}

/// Execute the tile command.
pub fn cmd_tile(args: &[String]) -> CliResult {
    let mut input_path: Option<&str> = None;
    let mut output_path: Option<&str> = None;
    let mut pattern_name = "parallel";
    let mut spacing = DEFAULT_SPACING;
    let mut angle = DEFAULT_ANGLE;
    let mut seed = 0;
    let mut stroke_width = 0.5;
    let mut format = OutputFormat::Svg;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "-p" | "--pattern" => pattern_name = flag_value(args, &mut i, "--pattern")?,
            "-o" | "--output" => output_path = Some(flag_value(args, &mut i, "--output")?),
            "-s" | "--spacing" => spacing = flag_number(args, &mut i, "--spacing")?,
            "-a" | "--angle" => angle = flag_number(args, &mut i, "--angle")?,
            "-w" | "--stroke-width" => stroke_width = flag_number(args, &mut i, "--stroke-width")?,
            "--seed" => seed = flag_value(args, &mut i, "--seed")?.parse()?,
            "--json" => format = OutputFormat::Json,
            "-h" | "--help" => {
                print_usage();
                return Ok(());
            }
            path => {
                if input_path.is_none() {
                    input_path = Some(path);
                }
            }
        }
        i += 1;
    }

    let Some(input_path) = input_path else {
        print_usage();
        return Err("input file required (use '-' for stdin)".into());
    };

    let spec = HatchSpec::new(PatternKind::from_name(pattern_name), spacing, angle)?.with_seed(seed);
    let input = load_input(input_path, spec)?;
    info!("Loaded {} bounds and {} layers from {}", input.bounds.len(), input.layers.len(), input_path);

    let start = Instant::now();
    let layers = render_layers(&input);
    let total: usize = layers.iter().map(|layer| layer.primitives.len()).sum();
    info!("Generated {} primitives in {:?}", total, start.elapsed());

    let content = match format {
        OutputFormat::Svg => layers_to_svg(&input.bounds, &layers, stroke_width),
        OutputFormat::Json => layers_to_json(&input.bounds, &layers)?,
    };
    write_output(output_path, &content)?;
    if let Some(path) = output_path.filter(|p| *p != "-") {
        info!("Wrote: {}", path);
    }
    Ok(())
}

fn print_usage() {
    eprintln!("Usage: draft-kernel tile <input.svg|job.yaml> [options]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -p, --pattern <name>      Pattern kind (default: parallel; SVG input only)");
    eprintln!("  -s, --spacing <n>         Hatch spacing (default: {DEFAULT_SPACING})");
    eprintln!("  -a, --angle <deg>         Hatch angle (default: {DEFAULT_ANGLE})");
    eprintln!("  --seed <n>                Jitter seed for organic patterns (default: 0)");
    eprintln!("  -w, --stroke-width <n>    SVG stroke width (default: 0.5)");
    eprintln!("  --json                    Write JSON primitives instead of SVG");
    eprintln!("  -o, --output <file>       Output file (- for stdout, default: stdout)");
    eprintln!();
    eprintln!("Job files (.yaml/.yml) carry their own bounds and layers.");
}
