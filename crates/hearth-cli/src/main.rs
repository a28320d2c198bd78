//! Command-line front end: parse a run configuration, execute it, and print
//! progress plus a final timing line.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::atomic::AtomicBool;

use clap::Parser;
use hearth_core::{SimulationConfig, DEFAULT_DT};
use hearth_engine::{percent_complete, run};

#[derive(Parser, Debug)]
#[command(name = "hearth", version, about = "Parallel explicit heat-diffusion simulator")]
struct Args {
    /// Interior rows of the global grid.
    #[arg(short = 'm', long, default_value_t = 200)]
    rows: usize,

    /// Interior columns of the global grid.
    #[arg(short = 'n', long, default_value_t = 200)]
    cols: usize,

    /// Last iteration index; the run executes this many steps plus one.
    #[arg(short = 'i', long, default_value_t = 2000)]
    max_iteration: u64,

    /// Emit a snapshot every this many iterations.
    #[arg(short = 's', long, default_value_t = 100)]
    snapshot_frequency: u64,

    /// Number of workers the grid is decomposed across.
    #[arg(short = 'w', long, default_value_t = 1)]
    workers: usize,

    /// Directory the numbered snapshot files are written into.
    #[arg(short = 'o', long, default_value = "data")]
    output_dir: PathBuf,

    /// Explicit-Euler time step.
    #[arg(long, default_value_t = DEFAULT_DT)]
    dt: f64,

    /// Suppress per-snapshot progress lines.
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();
    let mut config = SimulationConfig::new(
        args.rows,
        args.cols,
        args.max_iteration,
        args.snapshot_frequency,
    );
    config.workers = args.workers;
    config.dt = args.dt;

    let shutdown = AtomicBool::new(false);
    let quiet = args.quiet;
    let outcome = run(&config, &args.output_dir, &shutdown, |iteration, max| {
        if !quiet {
            println!(
                "Iteration {iteration} of {max} ({:.2}% complete)",
                percent_complete(iteration, max)
            );
        }
    });

    match outcome {
        Ok(report) => {
            println!(
                "Total elapsed time: {:.6} seconds",
                report.elapsed.as_secs_f64()
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("hearth: {e}");
            ExitCode::FAILURE
        }
    }
}
