//! notelog CLI - Entry point
//!
//! Usage: notelog <command> [options]

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use notelog::cli::{Cli, Commands};
use notelog::config::Config;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so `run --dry-run` output stays clean
    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .init();

    match cli.command {
        Commands::Init(args) => notelog::cli::init::run(args),
        Commands::Run(args) => {
            let config = Config::load(cli.config.as_deref())?;
            notelog::cli::run::run(args, config)
        }
        Commands::Status(args) => {
            let config = Config::load(cli.config.as_deref())?;
            notelog::cli::status::execute(args, config)
        }
        Commands::Config(args) => {
            let config = Config::load(cli.config.as_deref())?;
            notelog::cli::config::run(args, &config)
        }
    }
}
