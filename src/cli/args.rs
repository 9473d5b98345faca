//! CLI argument definitions using clap
//!
//! Commands:
//! - appealdesk init --config <path>
//! - appealdesk serve --config <path> [--port <port>]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// appealdesk - a strict intake and storage service for customer appeals
#[derive(Parser, Debug)]
#[command(name = "appealdesk")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create the appeal data directory layout
    Init {
        /// Path to configuration file
        #[arg(long, default_value = "./appealdesk.json")]
        config: PathBuf,
    },

    /// Start the HTTP intake server
    Serve {
        /// Path to configuration file
        #[arg(long, default_value = "./appealdesk.json")]
        config: PathBuf,

        /// Override the configured port
        #[arg(long)]
        port: Option<u16>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
