use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt};

use lorenz::explore::explorer::Explorer;
use lorenz::present::surface::{Browser, HtmlFile, Surface};
use lorenz::{ExplorerConfig, LorenzParams};

/// Explore the Lorenz attractor: integrate an ensemble of trajectories and plot them.
#[derive(Parser)]
#[command(name = "lorenz-explorer")]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Integrate once and draw the 3D trajectory figure
    Render(RenderArgs),
    /// Interactive loop: type `sigma 12`, `rho=20`, `angle 45`, `n 5`, `time 2`, `hist`, `quit`
    Explore(RenderArgs),
    /// Print each trajectory's time-averaged position and draw their histograms
    Averages(RenderArgs),
    /// Print grid size, array shape and coordinate extents
    Summary(SettingsArgs),
}

#[derive(Args)]
struct SettingsArgs {
    /// JSON settings file; missing fields take their defaults
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[arg(long)]
    sigma: Option<f64>,

    #[arg(long)]
    beta: Option<f64>,

    #[arg(long)]
    rho: Option<f64>,

    /// Length of the integration window
    #[arg(long)]
    max_time: Option<f64>,

    /// Number of trajectories
    #[arg(short = 'n', long)]
    trajectories: Option<usize>,

    /// Seed for the initial conditions
    #[arg(long)]
    seed: Option<u64>,

    /// Camera azimuth in degrees
    #[arg(long)]
    angle: Option<f64>,
}

#[derive(Args)]
struct RenderArgs {
    #[command(flatten)]
    settings: SettingsArgs,

    /// HTML file the figure is written to
    #[arg(short, long, default_value = "lorenz.html")]
    output: PathBuf,

    /// Open the figure in the browser instead of writing a file
    #[arg(long)]
    show: bool,
}

impl SettingsArgs {
    fn load(&self) -> Result<ExplorerConfig> {
        let mut config = match &self.config {
            Some(path) => ExplorerConfig::from_path(path)
                .with_context(|| format!("loading settings from {}", path.display()))?,
            None => ExplorerConfig::default(),
        };

        let LorenzParams { sigma, beta, rho } = config.params;
        config.params = LorenzParams::new(
            self.sigma.unwrap_or(sigma),
            self.beta.unwrap_or(beta),
            self.rho.unwrap_or(rho),
        );
        if let Some(t) = self.max_time {
            config.max_time = t;
        }
        if let Some(n) = self.trajectories {
            config.trajectories = n;
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(angle) = self.angle {
            config.view.azimuth_deg = angle;
        }

        config.validate()?;
        Ok(config)
    }
}

impl RenderArgs {
    fn surface(&self) -> Box<dyn Surface> {
        if self.show {
            Box::new(Browser)
        } else {
            Box::new(HtmlFile::new(self.output.clone()))
        }
    }
}

fn render(args: RenderArgs) -> Result<()> {
    let mut explorer = Explorer::new(args.settings.load()?, args.surface())?;
    let frame = explorer.refresh().context("integration failed")?;

    println!(
        "{} trajectories x {} samples",
        frame.trajectories,
        frame.solution.n_samples()
    );
    Ok(())
}

fn explore(args: RenderArgs) -> Result<()> {
    let mut explorer = Explorer::new(args.settings.load()?, args.surface())?;
    explorer.refresh().context("integration failed")?;

    let stdin = io::stdin();
    explorer.run(stdin.lock(), io::stdout())?;
    Ok(())
}

fn averages(args: RenderArgs) -> Result<()> {
    let mut explorer = Explorer::new(args.settings.load()?, args.surface())?;
    explorer.draw_averages().context("integration failed")?;

    let frame = explorer.frame().context("no frame computed")?;
    let avg = frame.solution.time_average();

    let mut out = BufWriter::new(io::stdout().lock());
    writeln!(out, "{:>4} {:>12} {:>12} {:>12}", "i", "x", "y", "z")?;
    for (i, row) in avg.outer_iter().enumerate() {
        writeln!(out, "{i:>4} {:>12.4} {:>12.4} {:>12.4}", row[0], row[1], row[2])?;
    }
    Ok(())
}

fn summary(args: SettingsArgs) -> Result<()> {
    let config = args.load()?;
    let grid = lorenz::TimeGrid::for_horizon(config.max_time, config.samples_per_unit)?;
    let solution = lorenz::solve_lorenz(
        &config.params,
        &config.initial_conditions(),
        config.trajectories,
        &grid,
        config.tolerances,
    )?;

    let (n, c, m) = solution.trajectories.dim();
    println!("time grid: {m} samples over [0, {}]", grid.max_time());
    println!("trajectories: [{n} x {c} x {m}]");
    for (name, (lo, hi)) in ["x", "y", "z"].iter().zip(solution.extent()) {
        println!("{name}: [{lo:.4}, {hi:.4}]");
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Render(args) => render(args),
        Commands::Explore(args) => explore(args),
        Commands::Averages(args) => averages(args),
        Commands::Summary(args) => summary(args),
    }
}
