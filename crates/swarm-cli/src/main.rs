//! Swarm CLI - Command-line driver for the Swarm particle engine

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{params, presets, run};

#[derive(Parser)]
#[command(name = "swarm")]
#[command(about = "Headless driver for the Julia-map particle simulation", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Simulate a number of frames and report the resulting population
    Run {
        /// Path to a parameters TOML file
        #[arg(long)]
        params: Option<String>,

        /// Number of frames to simulate
        #[arg(long, default_value = "300")]
        frames: u32,

        /// Frames per second used to derive the per-frame delta
        #[arg(long, default_value = "60", value_parser = parse_fps)]
        fps: f64,

        /// Use wall-clock deltas instead of a fixed frame rate
        #[arg(long)]
        realtime: bool,

        /// Named map constant (see `swarm presets`)
        #[arg(long)]
        preset: Option<String>,

        /// Override the population size
        #[arg(long)]
        count: Option<usize>,

        /// Override the real part of the map constant
        #[arg(long, allow_hyphen_values = true)]
        c_re: Option<String>,

        /// Override the imaginary part of the map constant
        #[arg(long, allow_hyphen_values = true)]
        c_im: Option<String>,

        /// Seed for particle spawning
        #[arg(long, default_value = "3735928559")]
        seed: u32,

        /// Write the final transform buffer as JSON
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Inspect simulation parameters
    #[command(subcommand)]
    Params(params::ParamsCommands),

    /// List the named map constants
    Presets,
}

fn parse_fps(s: &str) -> Result<f64, String> {
    let fps: f64 = s.trim().parse().map_err(|e| format!("invalid fps: {}", e))?;
    if fps.is_finite() && fps > 0.0 {
        Ok(fps)
    } else {
        Err(format!("fps must be a positive number, got {}", s))
    }
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .compact()
            .init();
    }
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            params,
            frames,
            fps,
            realtime,
            preset,
            count,
            c_re,
            c_im,
            seed,
            output,
        } => run::run(run::RunArgs {
            params,
            frames,
            fps,
            realtime,
            preset,
            count,
            c_re,
            c_im,
            seed,
            output,
        }),
        Commands::Params(cmd) => params::run(cmd),
        Commands::Presets => presets::run(),
    }
}
