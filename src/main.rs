// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//
//! Routemap CLI - shortest and fastest routes over DOT road maps

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use routemap::commands::{self, QueryContext};
use routemap::config;
use routemap::finder::Metric;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "routemap")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Configuration file path
    #[arg(short, long, env = "ROUTEMAP_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Map file to query
    #[arg(short, long, env = "ROUTEMAP_MAP", global = true)]
    map: Option<PathBuf>,

    /// Output in JSON format
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the map with the best route marked bold
    Route {
        /// Source place
        from: String,

        /// Destination place
        to: String,

        /// Cost metric
        #[arg(long, value_enum)]
        metric: Option<Metric>,

        /// Output file (stdout if not specified)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the distance or time of the best route (negative codes on failure)
    Cost {
        /// Source place
        from: String,

        /// Destination place
        to: String,

        /// Cost metric
        #[arg(long, value_enum)]
        metric: Option<Metric>,
    },

    /// Print the map with every shortest route from a place marked bold
    Tree {
        /// Source place
        from: String,

        /// Cost metric
        #[arg(long, value_enum)]
        metric: Option<Metric>,

        /// Output file (stdout if not specified)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show the effective configuration
    Config,

    /// Generate shell completions
    Completions {
        /// Shell type (bash, zsh, fish, powershell)
        shell: clap_complete::Shell,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = config::load(cli.config.as_deref())?;

    // Initialize logging
    let log_level = match cli.verbose {
        0 if cli.quiet => "error",
        0 => config.log_level.as_str(),
        1 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(log_level))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    // Execute command
    match cli.command {
        Commands::Route { from, to, metric, output } => {
            let ctx = QueryContext::resolve(&config, cli.map, metric)?;
            commands::route::run(&ctx, &from, &to, output)
        }
        Commands::Cost { from, to, metric } => {
            let ctx = QueryContext::resolve(&config, cli.map, metric)?;
            commands::cost::run(&ctx, &from, &to, cli.json)
        }
        Commands::Tree { from, metric, output } => {
            let ctx = QueryContext::resolve(&config, cli.map, metric)?;
            commands::tree::run(&ctx, &from, output)
        }
        Commands::Config => commands::config::run(&config),
        Commands::Completions { shell } => commands::completions::run(shell, &mut Cli::command()),
    }
}
