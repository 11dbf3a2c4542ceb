//! Benchmark command implementation.

use std::time::Instant;

use draft_kernel::hatch::tile_all;
use draft_kernel::{HatchSpec, PatternKind};

use super::common::{CliResult, flag_number, flag_value};
use super::tile::load_input;

/// Execute the benchmark command.
pub fn cmd_benchmark(args: &[String]) -> CliResult {
    let mut input_path: Option<&str> = None;
    let mut pattern_name: Option<&str> = None;
    let mut spacing = 2.5;
    let mut angle = 45.0;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "-p" | "--pattern" => pattern_name = Some(flag_value(args, &mut i, "--pattern")?),
            "-s" | "--spacing" => spacing = flag_number(args, &mut i, "--spacing")?,
            "-a" | "--angle" => angle = flag_number(args, &mut i, "--angle")?,
            "-h" | "--help" => {
                print_usage();
                return Ok(());
            }
            path if !path.starts_with('-') || path == "-" => {
                if input_path.is_none() {
                    input_path = Some(path);
                }
            }
            _ => {}
        }
        i += 1;
    }

    let Some(input_path) = input_path else {
        print_usage();
        return Err("input file required".into());
    };

    let kinds: Vec<PatternKind> = match pattern_name {
        Some(name) => vec![PatternKind::from_name(name)],
        None => PatternKind::all().to_vec(),
    };

    println!("Loading: {}", input_path);
    let start_load = Instant::now();
    let input = load_input(input_path, HatchSpec::new(PatternKind::Parallel, spacing, angle)?)?;
    println!("Loaded {} bounds in {:?}", input.bounds.len(), start_load.elapsed());

    println!();
    println!("═══════════════════════════════════════════════");
    println!("  {:<22} {:>10} {:>10}", "PATTERN", "PRIMITIVES", "TIME (ms)");
    println!("═══════════════════════════════════════════════");

    let mut total_ms = 0.0;
    for kind in kinds {
        let spec = HatchSpec::new(kind, spacing, angle)?;
        let start = Instant::now();
        let primitives = tile_all(&input.bounds, &spec);
        let ms = start.elapsed().as_secs_f64() * 1000.0;
        total_ms += ms;
        println!("  {:<22} {:>10} {:>10.2}", kind.name(), primitives.len(), ms);
    }

    println!("═══════════════════════════════════════════════");
    println!("  Total: {:.2}ms", total_ms);
    Ok(())
}

fn print_usage() {
    eprintln!("Usage: draft-kernel benchmark <input.svg|job.yaml> [options]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -p, --pattern <name>    Pattern to benchmark (default: every pattern)");
    eprintln!("  -s, --spacing <n>       Hatch spacing (default: 2.5)");
    eprintln!("  -a, --angle <deg>       Hatch angle (default: 45)");
    eprintln!();
    eprintln!("Times tiling of every bounds in the input.");
}
