//! Command-line interface.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    name = "cartwright",
    version,
    about = "Cart-to-order checkout orchestration service"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the checkout service.
    Serve {
        /// Path to the TOML configuration file.
        #[arg(long, default_value = "config.toml")]
        config: PathBuf,
    },
    /// Validate a configuration file and exit.
    CheckConfig {
        /// Path to the TOML configuration file.
        #[arg(long, default_value = "config.toml")]
        config: PathBuf,
    },
}
