//! Portico CLI - multi-page bundler configuration planner.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use portico_config::Mode;
use tracing_subscriber::{fmt, EnvFilter};

mod commands;

#[derive(Parser)]
#[command(name = "portico")]
#[command(about = "Multi-page bundler configuration planner")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to portico.toml config file
    #[arg(short, long, default_value = "portico.toml")]
    config: PathBuf,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a multi-page project in the current directory
    Init {
        /// Skip interactive prompts, overwrite existing files
        #[arg(short, long)]
        yes: bool,
    },

    /// List discovered page entries
    Pages {
        /// Print the entry map as JSON
        #[arg(long)]
        json: bool,
    },

    /// Assemble the bundler plan and emit it as JSON
    Plan {
        /// Write the plan to a file instead of stdout
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Override the configured build mode
        #[arg(short, long)]
        mode: Option<Mode>,
    },

    /// Validate the project layout and configuration
    Check,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt().with_env_filter(filter).with_target(false).init();

    // Execute command
    match cli.command {
        Commands::Init { yes } => {
            commands::init::run(yes)?;
        }
        Commands::Pages { json } => {
            commands::pages::run(&cli.config, json)?;
        }
        Commands::Plan { out, mode } => {
            commands::plan::run(&cli.config, out, mode)?;
        }
        Commands::Check => {
            commands::check::run(&cli.config)?;
        }
    }

    Ok(())
}
