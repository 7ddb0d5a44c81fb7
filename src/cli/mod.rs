//! CLI module for motores-api
//!
//! Provides command-line interface for:
//! - serve: start the HTTP server
//! - schema: print the table definitions

mod args;
mod commands;
mod errors;

pub use args::{Cli, Command, ServeArgs};
pub use commands::{database_config, http_config, run_command, schema, serve};
pub use errors::{CliError, CliErrorCode, CliResult};

/// Parse arguments and run the selected command
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    run_command(cli.command)
}
