use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use invasion_percolation::export::{export_grid_to_file, export_grid_to_glb};
use invasion_percolation::render::save_grid_image;
use invasion_percolation::{sweep, Percolation, SimulationConfig, Strategy, SweepRow};
use log::{info, LevelFilter};
use rand::rngs::StdRng;
use rand::{thread_rng, Rng, SeedableRng};
use simplelog::{ColorChoice, ConfigBuilder, TermLogger, TerminalMode};
use std::path::PathBuf;

/// Invasion percolation on a square grid
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log every invaded cell
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,
    /// Only log warnings and errors
    #[arg(short, long, global = true)]
    quiet: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Grow one cluster and report its density
    Run(RunArgs),
    /// Report mean density over a range of sizes and spreads
    Sweep(SweepArgs),
}

#[derive(Debug, Args)]
struct RunArgs {
    /// Side length of the grid (odd)
    #[arg(long, default_value_t = SimulationConfig::default().size)]
    size: usize,
    /// Resistance values are drawn from 1..=SPREAD
    #[arg(long, default_value_t = SimulationConfig::default().spread)]
    spread: i32,
    /// Seed for the random generator; a fresh one is picked when omitted
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long, value_enum, default_value_t = Strategy::default())]
    strategy: Strategy,
    /// Write the final grid values as CSV
    #[arg(long, value_name = "PATH")]
    grid_out: Option<PathBuf>,
    /// Write a two-colour picture of the final grid
    #[arg(long, value_name = "PATH")]
    png: Option<PathBuf>,
    /// Write the final grid as a GLB heightmap
    #[arg(long, value_name = "PATH")]
    glb: Option<String>,
    /// Pixels per cell in the picture
    #[arg(
        long,
        value_name = "PIXELS",
        default_value_t = 8,
        value_parser = clap::value_parser!(u32).range(1..=64)
    )]
    cell_pixels: u32,
}

#[derive(Debug, Args)]
struct SweepArgs {
    /// Grid sizes to try (odd, comma separated)
    #[arg(long, value_delimiter = ',', default_values_t = [11usize, 21, 31])]
    sizes: Vec<usize>,
    /// Spreads to try (comma separated)
    #[arg(long, value_delimiter = ',', default_values_t = [2i32, 10, 100])]
    spreads: Vec<i32>,
    /// Runs per size/spread pair
    #[arg(long, default_value_t = 20)]
    trials: usize,
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long, value_enum, default_value_t = Strategy::Frontier)]
    strategy: Strategy,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli)?;

    match cli.command {
        Command::Run(args) => run(args),
        Command::Sweep(args) => run_sweep(args),
    }
}

fn init_logging(cli: &Cli) -> Result<()> {
    let level = if cli.verbose {
        LevelFilter::Debug
    } else if cli.quiet {
        LevelFilter::Warn
    } else {
        LevelFilter::Info
    };

    let config = ConfigBuilder::new().set_time_level(LevelFilter::Off).build();
    TermLogger::init(level, config, TerminalMode::Stderr, ColorChoice::Auto)
        .context("initialising logger")
}

/// Use the requested seed or draw one, logging it so the run can be repeated
fn seeded_rng(seed: Option<u64>) -> StdRng {
    let seed = seed.unwrap_or_else(|| thread_rng().r#gen());
    info!("random seed {}", seed);
    StdRng::seed_from_u64(seed)
}

fn run(args: RunArgs) -> Result<()> {
    let config = SimulationConfig {
        size: args.size,
        spread: args.spread,
        strategy: args.strategy,
    };

    println!(
        "Invasion percolation on a {}x{} grid, spread {}",
        config.size, config.size, config.spread
    );

    let simulation = Percolation::new(&config, seeded_rng(args.seed))?;
    let outcome = simulation.run()?;

    println!("Filled {} cells in {} steps", outcome.grid.filled_count(), outcome.steps);
    println!("Density: {:.6}", outcome.density);

    if let Some(path) = &args.grid_out {
        if let Err(e) = export_grid_to_file(&outcome.grid, path) {
            eprintln!("Error exporting grid: {:#}", e);
        } else {
            println!("Exported grid to {}", path.display());
        }
    }

    if let Some(path) = &args.png {
        if let Err(e) = save_grid_image(&outcome.grid, args.cell_pixels, path) {
            eprintln!("Error rendering grid: {:#}", e);
        } else {
            println!("Rendered grid to {}", path.display());
        }
    }

    if let Some(path) = &args.glb {
        if let Err(e) = export_grid_to_glb(&outcome.grid, 1.0, 1.0, 1.0, path) {
            eprintln!("Error exporting to GLB: {:#}", e);
        } else {
            println!("Exported 3D mesh to {}", path);
        }
    }

    Ok(())
}

fn run_sweep(args: SweepArgs) -> Result<()> {
    let mut rng = seeded_rng(args.seed);
    let rows = sweep(&args.sizes, &args.spreads, args.trials, args.strategy, &mut rng)?;

    println!("{}", SweepRow::HEADER);
    for row in rows {
        println!("{}", row);
    }

    Ok(())
}
