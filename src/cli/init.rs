//! `notelog init` command
//!
//! Writes a default configuration for a project.
//!
//! # Usage
//! ```bash
//! notelog init                    # Initialize in current directory
//! notelog init /path/to/project   # Initialize in specific path
//! notelog init --global           # Initialize global ~/.notelog
//! ```

use anyhow::{bail, Result};
use clap::Args;
use std::path::PathBuf;

use crate::config::{Config, CONFIG_DIR};

#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path to initialize (default: current directory)
    pub path: Option<PathBuf>,

    /// Initialize global config (~/.notelog)
    #[arg(long)]
    pub global: bool,

    /// Overwrite an existing config
    #[arg(short, long)]
    pub force: bool,
}

pub fn run(args: InitArgs) -> Result<()> {
    let base_path = if args.global {
        directories::UserDirs::new()
            .map(|u| u.home_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."))
    } else {
        args.path.unwrap_or_else(|| PathBuf::from("."))
    };

    let config_path = Config::local_config_path(&base_path);

    if config_path.exists() && !args.force {
        bail!(
            "{} already exists. Use --force to overwrite.",
            config_path.display()
        );
    }

    Config::default().save_to(&config_path)?;

    println!("✅ Initialized notelog in {}", base_path.join(CONFIG_DIR).display());
    println!("   Config: {}", config_path.display());
    println!("\nNext steps:");
    println!("  edit [paths] in the config to point at your notes");
    println!("  notelog status");
    println!("  notelog run --force");

    Ok(())
}
