//! Command-line interface.

pub mod commands;
pub mod types;

pub use types::{Cli, Commands, RankingsCommands};

use console::style;

/// Print a command error and exit non-zero.
pub fn handle_error(err: anyhow::Error, json: bool) -> ! {
    if json {
        eprintln!("{}", serde_json::json!({ "error": format!("{err:#}") }));
    } else {
        eprintln!("{} {err:#}", style("error:").red().bold());
    }
    std::process::exit(1);
}
