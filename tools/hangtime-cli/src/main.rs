//! Hangtime CLI: vertical-jump height from video frames.
//!
//! Usage:
//!   hangtime detect <DIR>                       Detect takeoff/landing in a frame directory
//!   hangtime height --takeoff T --landing L     Height from manually marked times
//!   hangtime config [--init]                    Show or initialise the configuration

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use hangtime_common::config::AppConfig;
use hangtime_jump_model::height::HeightUnit;

mod commands;

#[derive(Parser)]
#[command(
    name = "hangtime",
    about = "Measure vertical jump height from hang time",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Detect takeoff and landing in a directory of frame images
    Detect {
        /// Directory holding the frames, sorted by file name
        dir: PathBuf,

        /// Frame rate the images were captured at
        #[arg(long, default_value = "30")]
        fps: f64,

        /// Virtual sampling rate (30, 60, 120 or 240); defaults to the config value
        #[arg(long)]
        sample_rate: Option<u32>,

        /// Height unit: inches or cm; defaults to the config value
        #[arg(long)]
        unit: Option<HeightUnit>,

        /// Print the detection report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Compute jump height from takeoff and landing times
    Height {
        /// Takeoff time in seconds
        #[arg(long)]
        takeoff: f64,

        /// Landing time in seconds
        #[arg(long)]
        landing: f64,

        /// Height unit: inches or cm; defaults to the config value
        #[arg(long)]
        unit: Option<HeightUnit>,
    },

    /// Show the effective configuration
    Config {
        /// Write the default configuration to the config file
        #[arg(long)]
        init: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load();

    // Initialize logging
    let mut logging = config.logging.clone();
    if cli.verbose {
        logging.level = "debug".to_string();
    }
    hangtime_common::logging::init_logging(&logging);

    match cli.command {
        Commands::Detect {
            dir,
            fps,
            sample_rate,
            unit,
            json,
        } => commands::detect::run(&config, dir, fps, sample_rate, unit, json).await,
        Commands::Height {
            takeoff,
            landing,
            unit,
        } => commands::height::run(&config, takeoff, landing, unit),
        Commands::Config { init } => commands::config::run(&config, init),
    }
}
