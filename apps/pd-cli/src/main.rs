mod error;
mod run_service;

use clap::{Parser, Subcommand};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use error::{AppError, AppResult};
use pd_core::timing::{PerfStats, Timer, enable_timing};
use pd_project::RunConfig;
use pd_sim::{IntegratorType, SimProgress};
use run_service::{MethodOutcome, RunRequest};

#[derive(Parser)]
#[command(name = "pd-cli")]
#[command(about = "Pendulum CLI - fixed-step pendulum trajectory simulation", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default run configuration
    Init {
        /// Path of the YAML file to create
        config_path: PathBuf,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Validate run configuration syntax and values
    Validate {
        /// Path to the run configuration YAML file
        config_path: PathBuf,
    },
    /// Integrate the pendulum and write one CSV per method
    Run {
        /// Path to the run configuration YAML file
        config_path: PathBuf,
        /// Run a single method instead of those listed in the file (euler, rk4)
        #[arg(short, long)]
        method: Option<IntegratorType>,
        /// Output directory, overriding the file's `output.directory`
        #[arg(long)]
        out_dir: Option<PathBuf>,
        /// Print a timing summary
        #[arg(long)]
        timing: bool,
    },
}

fn main() -> AppResult<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Init { config_path, force } => cmd_init(&config_path, force),
        Commands::Validate { config_path } => cmd_validate(&config_path),
        Commands::Run {
            config_path,
            method,
            out_dir,
            timing,
        } => cmd_run(&config_path, method, out_dir, timing),
    }
}

fn cmd_init(config_path: &Path, force: bool) -> AppResult<()> {
    if config_path.exists() && !force {
        return Err(AppError::AlreadyExists {
            path: config_path.to_path_buf(),
        });
    }
    pd_project::save_yaml(config_path, &RunConfig::default())?;
    println!("✓ Wrote default configuration: {}", config_path.display());
    Ok(())
}

fn cmd_validate(config_path: &Path) -> AppResult<()> {
    println!("Validating configuration: {}", config_path.display());
    let config = pd_project::load_yaml(config_path)?;
    let grid = config.time_grid()?;
    println!("✓ Configuration is valid");
    println!("  Steps: {} (h = {} s)", grid.steps(), grid.h());
    Ok(())
}

fn cmd_run(
    config_path: &Path,
    method: Option<IntegratorType>,
    out_dir: Option<PathBuf>,
    timing: bool,
) -> AppResult<()> {
    if timing {
        enable_timing();
    }
    let mut stats = PerfStats::default();

    let load_timer = Timer::start("load");
    let config = pd_project::load_yaml(config_path)?;
    if let Some(t) = load_timer.stop() {
        stats.load_time_s = t;
    }

    let mut request = RunRequest::from_config(&config);
    if let Some(method) = method {
        request.output.methods = vec![method];
    }
    if let Some(dir) = out_dir {
        request.output.directory = dir;
    }

    println!("Running simulation: {}", config.name);
    println!(
        "  theta0 = {:.3} rad, theta_dot0 = {:.3} rad/s",
        config.initial.theta_rad, config.initial.theta_dot_rad_s
    );

    let mut last_emit = Instant::now();
    let mut last_fraction = -1.0f64;
    let outcomes = run_service::execute(
        &request,
        Some(&mut |method, progress: SimProgress| {
            let emit_now = (progress.fraction_complete - last_fraction).abs() >= 0.005
                || last_emit.elapsed().as_millis() >= 100;
            if emit_now {
                render_cli_progress(method, &progress);
                last_fraction = progress.fraction_complete;
                last_emit = Instant::now();
            }
        }),
    )?;
    clear_progress_line();

    for outcome in &outcomes {
        print_outcome(outcome);
        stats.record_method(
            outcome.method.file_tag(),
            outcome.integrate_time_s,
            outcome.summary.steps,
        );
    }
    stats.print_summary();

    Ok(())
}

fn print_outcome(outcome: &MethodOutcome) {
    let state = &outcome.summary.final_state;
    println!("✓ {} completed: {}", outcome.method, outcome.path.display());
    println!("  Records: {}", outcome.summary.steps);
    println!(
        "  Final state at t = {:.3} s: theta = {:.6}, theta_dot = {:.6}",
        outcome.summary.final_t,
        state.get(0).unwrap_or(f64::NAN),
        state.get(1).unwrap_or(f64::NAN)
    );
    println!(
        "  Energy: {:.6} J -> {:.6} J (drift {:+.3e} J)",
        outcome.initial_energy_j,
        outcome.final_energy_j,
        outcome.energy_drift_j()
    );
}

fn clear_progress_line() {
    print!("\r{}\r", " ".repeat(100));
    let _ = io::stdout().flush();
}

fn render_cli_progress(method: IntegratorType, p: &SimProgress) {
    let width = 28usize;
    let filled = ((p.fraction_complete * width as f64).round() as usize).min(width);
    let bar = format!(
        "{}{}",
        "#".repeat(filled),
        "-".repeat(width.saturating_sub(filled))
    );
    print!(
        "\r[{}] {:>6.2}%  method={}  t={:.3}s  step={}/{}",
        bar,
        p.fraction_complete * 100.0,
        method,
        p.t,
        p.step,
        p.steps
    );
    let _ = io::stdout().flush();
}
