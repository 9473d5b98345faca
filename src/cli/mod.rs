//! Command-line interface.
//!
//! `init` creates the data directory layout, `serve` boots the store
//! and binds the HTTP server. All fatal conditions surface as coded
//! errors printed by the entry point.

pub mod args;
pub mod commands;
pub mod errors;

pub use commands::{run, Config};
pub use errors::{CliError, CliResult};
