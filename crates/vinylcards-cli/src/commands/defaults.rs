//! Defaults command implementation
//!
//! Prints the default layout configuration as a starting point for a config
//! file.

use anyhow::{Context, Result};
use colored::Colorize;
use std::path::Path;
use std::process::ExitCode;
use vinylcards_spec::LayoutConfig;

use super::write_output;

/// Run the defaults command
///
/// Writes the default configuration as pretty JSON to `out`, or to stdout.
pub fn run(out: Option<&str>) -> Result<ExitCode> {
    let json = LayoutConfig::default()
        .to_json_pretty()
        .context("Failed to serialize default configuration")?;

    match out {
        Some(path) => {
            write_output(Path::new(path), &format!("{}\n", json))?;
            println!("{} {}", "Wrote:".dimmed(), path);
        }
        None => println!("{}", json),
    }
    Ok(ExitCode::SUCCESS)
}
