//! Preview command implementation
//!
//! Renders one card's front and back side by side.

use anyhow::{bail, Context, Result};
use colored::Colorize;
use std::path::Path;
use std::process::ExitCode;
use vinylcards_render::{render_preview_document, DeterministicRng, LayoutEngine};

use super::{print_config_warnings, resolve_seed, write_output};
use crate::input::{content_hash, load_config, load_entries, LoadedConfig};

/// Run the preview command
///
/// # Arguments
/// * `entries_path` - Entry list (JSON or CSV); ignored in token mode
/// * `index` - Zero-based entry to preview
/// * `config_path` - Optional layout configuration (JSON or YAML)
/// * `out` - Output HTML path
/// * `seed` - Optional seed for a reproducible groove
pub fn run(
    entries_path: Option<&str>,
    index: usize,
    config_path: Option<&str>,
    out: &str,
    seed: Option<u32>,
) -> Result<ExitCode> {
    let LoadedConfig { config, warnings } = load_config(config_path.map(Path::new))
        .with_context(|| format!("Failed to load config file: {}", config_path.unwrap_or("")))?;

    println!("{} card {}", "Previewing:".cyan().bold(), index);
    print_config_warnings(&warnings);

    let entries = match entries_path {
        Some(path) if !config.is_token_mode() => {
            load_entries(Path::new(path))
                .with_context(|| format!("Failed to load entries: {}", path))?
                .entries
        }
        _ => Vec::new(),
    };
    let entry = entries.get(index);
    if !config.is_token_mode() && entry.is_none() {
        bail!(
            "no entry at index {} ({} entries loaded)",
            index,
            entries.len()
        );
    }

    let seed = resolve_seed(seed);
    println!("{} {}", "Seed:".dimmed(), seed);

    let engine = LayoutEngine::new(&config);
    let Some(pair) = engine.render_preview_pair(entry, &mut DeterministicRng::new(seed)) else {
        println!("{} nothing to preview", "FAILED".red().bold());
        return Ok(ExitCode::from(1));
    };

    let html = render_preview_document(&pair, &config);
    write_output(Path::new(out), &html)?;
    println!(
        "{} {} ({})",
        "Wrote:".dimmed(),
        out,
        &content_hash(html.as_bytes())[..16]
    );

    Ok(ExitCode::SUCCESS)
}
