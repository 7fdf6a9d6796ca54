//! CLI command implementations

pub mod defaults;
pub mod groove;
pub mod preview;
pub mod render;

use anyhow::{Context, Result};
use colored::Colorize;
use std::path::Path;
use vinylcards_spec::ConfigWarning;

/// The seed to render with: `seed` when given, otherwise a fresh random one.
///
/// Commands print the seed they used so any render can be reproduced.
pub(crate) fn resolve_seed(seed: Option<u32>) -> u32 {
    seed.unwrap_or_else(rand::random)
}

pub(crate) fn print_config_warnings(warnings: &[ConfigWarning]) {
    for warning in warnings {
        println!("  {} [config] {}", "!".yellow(), warning);
    }
}

/// Writes `content` to `path`, creating missing parent directories.
pub(crate) fn write_output(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    std::fs::write(path, content)
        .with_context(|| format!("Failed to write output: {}", path.display()))
}
