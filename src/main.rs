//! motores-api entry point
//!
//! Parses CLI arguments, dispatches the command, prints errors to stderr
//! and exits non-zero on failure. All logic lives in the `cli` module.

use motores_api::cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
