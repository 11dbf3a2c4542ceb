//! draft-kernel - CLI for hatch tiling and drafting geometry
//!
//! Usage:
//!   draft-kernel tile <svg|job.yaml> -p <pattern>   Hatch every region
//!   draft-kernel swatches [-o file.svg]             Pattern swatch sheet
//!   draft-kernel benchmark <svg|job.yaml>           Benchmark pattern tiling
//!   draft-kernel snap --pointer x,y                 Resolve a snapped point
//!   draft-kernel patterns                           List available patterns

mod cli;

use std::env;
use std::process;

use tracing_subscriber::EnvFilter;

use draft_kernel::PatternKind;

use cli::{CliResult, cmd_benchmark, cmd_snap, cmd_swatches, cmd_tile};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let args: Vec<String> = env::args().collect();
    let prog = args.first().map(String::as_str).unwrap_or("draft-kernel");

    let Some(command) = args.get(1) else {
        print_usage(prog);
        process::exit(1);
    };

    let rest = &args[2..];
    let result: CliResult = match command.as_str() {
        "tile" => cmd_tile(rest),
        "swatches" => cmd_swatches(rest),
        "benchmark" => cmd_benchmark(rest),
        "snap" => cmd_snap(rest),
        "patterns" => {
            cmd_patterns();
            Ok(())
        }
        "help" | "--help" | "-h" => {
            print_usage(prog);
            Ok(())
        }
        other => Err(format!("unknown command: {other}").into()),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn print_usage(prog: &str) {
    eprintln!("draft-kernel - hatch tiling and drafting geometry");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  {} tile <svg|job.yaml> [-p <pattern>] [options]", prog);
    eprintln!("  {} swatches [-o file.svg] [--png file.png]", prog);
    eprintln!("  {} benchmark <svg|job.yaml> [-p <pattern>]", prog);
    eprintln!("  {} snap --pointer x,y [--reference x,y] [options]", prog);
    eprintln!("  {} patterns", prog);
    eprintln!();
    eprintln!("Run '{} <command> --help' for command options.", prog);
    eprintln!();
    eprintln!("Stdin support:");
    eprintln!("  Use '-' as input file to read SVG from stdin:");
    eprintln!("  echo '<svg>...</svg>' | {} tile - -p brick -o -", prog);
    eprintln!();
    eprintln!("Logging goes to stderr; set RUST_LOG=debug for tiling statistics.");
}

fn cmd_patterns() {
    println!("Available patterns:");
    for kind in PatternKind::all() {
        println!("  {:<20} {}", kind.name(), kind.describe());
    }
}
