use anyhow::Context;
use clap::Parser;
use rand_core::{OsRng, RngCore};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use starfield_seed::GeneratorConfig;

/// Scatter blue-noise stars over a black canvas and save it as a PNG.
#[derive(Parser)]
#[command(name = "starfield-seed")]
#[command(version, about, long_about = None)]
struct Cli {
    #[arg(long, default_value_t = 512.0)]
    width: f64,

    #[arg(long, default_value_t = 512.0)]
    height: f64,

    /// Random seed; drawn from the OS when omitted
    #[arg(short, long)]
    seed: Option<u32>,

    /// Minimum spacing between stars
    #[arg(short = 'd', long, default_value_t = 20.0)]
    min_distance: f64,

    /// Candidate attempts per active sample
    #[arg(short, long, default_value_t = 30)]
    k: u32,

    /// Star arm length in pixels
    #[arg(short, long, default_value_t = 1.0)]
    marker_size: f64,

    #[arg(short, long, default_value = "./out/starfield.png")]
    output: PathBuf,

    /// Print the flat coordinate list to stdout
    #[arg(long)]
    print_points: bool,

    #[arg(short, long)]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let seed = cli.seed.unwrap_or_else(|| OsRng.next_u32());
    let config = GeneratorConfig {
        width: cli.width,
        height: cli.height,
        seed,
        min_distance: cli.min_distance,
        k: cli.k,
        marker_size: cli.marker_size,
    };
    info!(seed, "generating starfield");

    let points = config.sample().context("invalid generator parameters")?;
    info!(stars = points.len() / 2, "sampling done");

    if cli.print_points {
        let line: Vec<String> = points.iter().map(f64::to_string).collect();
        println!("{}", line.join(","));
    }

    if let Some(dir) = cli.output.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("failed to create {}", dir.display()))?;
    }

    config
        .render(&points)?
        .write_png(&cli.output)
        .with_context(|| format!("failed to write {}", cli.output.display()))?;

    Ok(())
}
