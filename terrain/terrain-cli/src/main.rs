//! Fractal terrain generator.
//!
//! Builds a single equilateral triangle, then repeatedly subdivides it and
//! perturbs vertex heights with damped noise.
//!
//! # Modes
//!
//! - Automatic (default): run `--iterations` cycles, then prepare one frame
//! - Manual (`-s`): read stdin line by line; a line containing `s` advances
//!   the terrain by exactly one cycle no matter how many `s` it holds, and a
//!   line containing `q` quits

mod config;
mod logging;
mod render;

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use terrain_fractal::TerrainGenerator;
use tracing::{info, warn};

use crate::config::Overrides;

/// Fractal terrain by triangular subdivision
#[derive(Parser)]
#[command(name = "fractal-terrain")]
#[command(about = "Generate fractal terrain by repeated triangle subdivision", long_about = None)]
#[command(version)]
struct Cli {
    /// Step manually: each stdin line containing 's' triggers one cycle
    #[arg(short = 's', long = "step")]
    manual: bool,

    /// Cycles to run in automatic mode
    #[arg(short = 'n', long)]
    iterations: Option<u32>,

    /// Initial displacement magnitude
    #[arg(short, long)]
    magnitude: Option<f64>,

    /// Damping coefficient applied to the magnitude after each cycle
    #[arg(short, long)]
    damping: Option<f64>,

    /// Side length of the initial triangle
    #[arg(long)]
    side_length: Option<f64>,

    /// Seed for reproducible terrain
    #[arg(long)]
    seed: Option<u64>,

    /// Refuse to grow the mesh beyond this many vertices
    #[arg(long)]
    max_vertices: Option<usize>,

    /// TOML file with generation parameters (flags override it)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print every vertex after each cycle
    #[arg(long)]
    dump: bool,

    /// Log at debug level
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn overrides(&self) -> Overrides {
        Overrides {
            side_length: self.side_length,
            magnitude: self.magnitude,
            damping: self.damping,
            iterations: self.iterations,
            seed: self.seed,
            max_vertices: self.max_vertices,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let params = config::resolve(cli.config.as_deref(), &cli.overrides())?;
    let mut generator =
        TerrainGenerator::new(&params).context("Failed to set up terrain generation")?;

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if cli.manual {
        writeln!(out, "Enter 's' to trigger a subdivision, 'q' to quit")?;
        let stdin = io::stdin();
        run_manual(&mut generator, stdin.lock(), &mut out, cli.dump)?;
    } else {
        info!("Run with '-s' to trigger each subdivision manually");
        generator
            .run_configured()
            .context("Terrain generation stopped early")?;
        present(&generator, &mut out, cli.dump)?;
    }

    Ok(())
}

/// Drive `generator` from line-oriented input until EOF or `q`.
///
/// Returns the number of cycles performed.
fn run_manual<R: BufRead, W: Write>(
    generator: &mut TerrainGenerator,
    input: R,
    out: &mut W,
    dump: bool,
) -> Result<u32> {
    let start = generator.cycles();
    present(generator, out, dump)?;

    for line in input.lines() {
        let line = line.context("Failed to read input")?;
        if line.contains('q') {
            break;
        }
        for _ in line.matches('s') {
            generator.request_advance();
        }
        match generator.poll() {
            Ok(Some(_)) => present(generator, out, dump)?,
            Ok(None) => {}
            Err(err) => warn!("Ignoring advance: {err}"),
        }
    }

    Ok(generator.cycles() - start)
}

/// Hand the current terrain to the renderer and report it.
fn present<W: Write>(generator: &TerrainGenerator, out: &mut W, dump: bool) -> Result<()> {
    let mesh = generator.mesh();
    let frame = render::prepare_frame(mesh);
    writeln!(
        out,
        "cycle {}: base {}, {} vertices, {frame}",
        generator.cycles(),
        mesh.base(),
        mesh.len()
    )?;
    if dump {
        write!(out, "{mesh}")?;
    }
    Ok(())
}
