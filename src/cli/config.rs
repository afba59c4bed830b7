//! `notelog config` command
//!
//! Shows the effective configuration.
//!
//! # Usage
//! ```bash
//! notelog config          # Effective config as TOML
//! notelog config --path   # Where config files are looked up
//! ```

use anyhow::Result;
use clap::Args;

use crate::config::Config;

#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Show config file locations
    #[arg(long)]
    pub path: bool,
}

pub fn run(args: ConfigArgs, config: &Config) -> Result<()> {
    if args.path {
        match Config::find_local_config() {
            Some(local) => println!("✓ Local:  {}", local.display()),
            None => println!("  Local:  (none found)"),
        }
        match Config::global_config_path() {
            Some(global) if global.exists() => println!("✓ Global: {}", global.display()),
            Some(global) => println!("  Global: {} (missing)", global.display()),
            None => println!("  Global: (no home directory)"),
        }
        return Ok(());
    }

    print!("{}", toml::to_string_pretty(config)?);
    Ok(())
}
