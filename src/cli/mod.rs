//! CLI module - Command definitions and handlers

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub mod config;
pub mod init;
pub mod run;
pub mod status;

/// notelog - incremental changelog from dated notes
///
/// Turns a document of dated notes into a categorized markdown journal,
/// a few dates at a time.
#[derive(Parser, Debug)]
#[command(name = "notelog")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file path
    #[arg(short, long, global = true, env = "NOTELOG_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add the next batch of dates to the changelog
    Run(run::RunArgs),

    /// Show processed and pending dates
    Status(status::StatusArgs),

    /// Write a default config file
    Init(init::InitArgs),

    /// Show the effective configuration
    Config(config::ConfigArgs),
}
