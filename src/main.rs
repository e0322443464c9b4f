//! Canvas Scatter - Headless Runner
//!
//! Runs a full drawing session against the in-memory desktop: open the
//! application, scatter squares, draw them, count them, scribble until none
//! are found, close it again, and print the outcome as JSON or text.

use std::path::PathBuf;
use std::process::ExitCode;

use canvas_scatter::automation::{Painter, SessionReport, SimulatedDesktop};
use canvas_scatter::core::config::ScatterConfig;
use canvas_scatter::core::error::Result;
use clap::Parser;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

/// Canvas Scatter - draw non-overlapping squares, then scribble them away
#[derive(Parser, Debug)]
#[command(name = "canvas-scatter")]
#[command(about = "Run a headless scatter-and-erase session on a simulated canvas")]
struct Args {
    /// TOML config file; flags below override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory of saved screenshots; enables the preset template
    #[arg(short = 'd', long)]
    screenshots_dir: Option<PathBuf>,

    /// Minimum number of squares
    #[arg(long)]
    min_squares: Option<usize>,

    /// Maximum number of squares
    #[arg(long)]
    max_squares: Option<usize>,

    /// Width of each square
    #[arg(long)]
    square_width: Option<i32>,

    /// Height of each square
    #[arg(long)]
    square_height: Option<i32>,

    /// Brush diameter of the simulated application
    #[arg(long)]
    brush_size: Option<u32>,

    /// Paper width of the new drawing
    #[arg(long)]
    canvas_width: Option<i32>,

    /// Paper height of the new drawing
    #[arg(long)]
    canvas_height: Option<i32>,

    /// Consecutive collisions allowed while placing one square
    #[arg(long)]
    max_retries: Option<u32>,

    /// Seconds to keep scribbling before giving up
    #[arg(long)]
    timeout_secs: Option<f64>,

    /// Strokes needed to obscure one square
    #[arg(long)]
    strokes_to_obscure: Option<u32>,

    /// Random seed for deterministic runs
    #[arg(long)]
    seed: Option<u64>,

    /// Output format: json or text
    #[arg(long, default_value = "json")]
    format: String,

    /// Log every placement attempt
    #[arg(long, short = 'v')]
    verbose: bool,
}

impl Args {
    fn resolve_config(&self) -> Result<ScatterConfig> {
        let mut config = match &self.config {
            Some(path) => ScatterConfig::load(path)?,
            None => ScatterConfig::default(),
        };

        if let Some(dir) = &self.screenshots_dir {
            config.session.screenshots_dir = Some(dir.clone());
        }
        if let Some(v) = self.min_squares {
            config.layout.min_shapes = v;
        }
        if let Some(v) = self.max_squares {
            config.layout.max_shapes = v;
        }
        if let Some(v) = self.square_width {
            config.layout.shape_width = v;
        }
        if let Some(v) = self.square_height {
            config.layout.shape_height = v;
        }
        if let Some(v) = self.max_retries {
            config.layout.max_retries = v;
        }
        if let Some(v) = self.timeout_secs {
            config.erase.timeout_secs = v;
        }
        if let Some(v) = self.brush_size {
            config.simulation.brush_size = v;
        }
        if let Some(v) = self.canvas_width {
            config.session.paper_width = v;
        }
        if let Some(v) = self.canvas_height {
            config.session.paper_height = v;
        }
        if let Some(v) = self.strokes_to_obscure {
            config.simulation.strokes_to_obscure = v;
        }

        config.validate()?;
        Ok(config)
    }
}

/// JSON output structure
#[derive(Serialize)]
struct RunOutput<'a> {
    seed: u64,
    squares: usize,
    detected: usize,
    preset_detected: Option<usize>,
    strokes: u64,
    elapsed_secs: f64,
    session: &'a SessionReport,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let filter = if args.verbose { "canvas_scatter=debug" } else { "canvas_scatter=info" };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<()> {
    let config = args.resolve_config()?;

    let seed = args.seed.unwrap_or_else(rand::random);
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    tracing::info!("Starting session with seed {}", seed);

    let desktop = SimulatedDesktop::new(&config.simulation);
    let mut painter = Painter::new(desktop.screen(), desktop.software());
    let report = painter.run_session(&config, &mut rng)?;

    if args.format == "text" {
        print_text(seed, &report);
    } else {
        let output = RunOutput {
            seed,
            squares: report.shapes.len(),
            detected: report.detected,
            preset_detected: report.preset_detected,
            strokes: report.erase.strokes,
            elapsed_secs: report.erase.elapsed.as_secs_f64(),
            session: &report,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    }

    Ok(())
}

fn print_text(seed: u64, report: &SessionReport) {
    println!("=== CANVAS SCATTER ===");
    println!("Seed: {}", seed);
    println!("Drawable area: {}", report.boundary);
    println!("Brush size: {}", report.brush_size);
    println!();
    for (i, shape) in report.shapes.iter().enumerate() {
        println!("  [{}] {}", i, shape);
    }
    println!();
    if let Some(found) = report.preset_detected {
        println!("Found {}/{} squares drawn, with presaved screenshot", found, report.shapes.len());
    }
    println!("Found {}/{} squares drawn, with new screenshot", report.detected, report.shapes.len());
    println!(
        "No squares found any more. Took {} lines and {:.2} seconds",
        report.erase.strokes,
        report.erase.elapsed.as_secs_f64()
    );
    for event in &report.erase.progress {
        println!("  after {:>4} lines: {} left", event.strokes, event.remaining);
    }
}
