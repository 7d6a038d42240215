use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "homeward-cli", version, about = "Homeward CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a recorded signal trace through the redirect engine
    Replay {
        /// Path to the trace JSON file
        path: PathBuf,
        /// Emit the full report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Check whether a raw gesture vector passes the home-swipe gate
    Gate {
        /// Horizontal displacement
        #[arg(long, allow_hyphen_values = true)]
        x: f32,
        /// Vertical displacement (negative = up)
        #[arg(long, allow_hyphen_values = true)]
        y: f32,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Replay { path, json } => commands::replay::run(&path, json),
        Commands::Gate { x, y } => commands::gate::run(x, y),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
