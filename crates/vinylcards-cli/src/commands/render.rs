//! Render command implementation
//!
//! Lays out every entry onto printable front/back pages and writes one HTML
//! document.

use anyhow::{bail, Context, Result};
use colored::Colorize;
use std::path::Path;
use std::process::ExitCode;
use std::time::Instant;
use vinylcards_render::{
    layout_pages_with_progress, render_document, DeterministicRng, LayoutEngine, PageKind,
};
use vinylcards_spec::Entry;

use super::{print_config_warnings, resolve_seed, write_output};
use crate::input::{content_hash, load_config, load_entries, LoadedConfig};

/// Run the render command
///
/// # Arguments
/// * `entries_path` - Entry list (JSON or CSV); optional in token mode
/// * `config_path` - Optional layout configuration (JSON or YAML)
/// * `out` - Output HTML path
/// * `seed` - Optional seed for reproducible grooves
/// * `screen` - Cap the layout to one page's worth of entries
///
/// # Returns
/// Exit code: 0 on success, 1 when nothing could be laid out
pub fn run(
    entries_path: Option<&str>,
    config_path: Option<&str>,
    out: &str,
    seed: Option<u32>,
    screen: bool,
) -> Result<ExitCode> {
    let start = Instant::now();

    let LoadedConfig { config, warnings } = load_config(config_path.map(Path::new))
        .with_context(|| format!("Failed to load config file: {}", config_path.unwrap_or("")))?;
    let config = if screen {
        config.with_printing(false)
    } else {
        config
    };

    println!(
        "{} {} {} ({}mm cards, {} mode)",
        "Rendering:".cyan().bold(),
        entries_path.unwrap_or("-"),
        config.paper,
        config.card_size_mm,
        if config.is_token_mode() { "token" } else { "music" }
    );
    print_config_warnings(&warnings);

    let entries: Vec<Entry> = match entries_path {
        Some(path) => {
            let loaded = load_entries(Path::new(path))
                .with_context(|| format!("Failed to load entries: {}", path))?;
            println!(
                "{} {} entries ({}, {})",
                "Source:".dimmed(),
                loaded.entries.len(),
                loaded.format,
                &loaded.source_hash[..16]
            );
            loaded.entries
        }
        None if config.is_token_mode() => Vec::new(),
        None => bail!("--entries is required outside token mode"),
    };

    let seed = resolve_seed(seed);
    println!("{} {}", "Seed:".dimmed(), seed);

    let engine = LayoutEngine::new(&config);
    let grid = engine.grid();
    let mut rng = DeterministicRng::new(seed);
    let runtime = tokio::runtime::Builder::new_current_thread()
        .build()
        .context("Failed to start async runtime")?;
    let pages = runtime.block_on(layout_pages_with_progress(
        &engine,
        &entries,
        &mut rng,
        |done, total| log::debug!("Laid out {}/{} cards", done, total),
    ));

    if pages.is_empty() {
        if grid.is_degenerate() {
            println!(
                "{} {}mm cards do not fit on {} paper",
                "FAILED".red().bold(),
                config.card_size_mm,
                config.paper
            );
        } else {
            println!("{} no entries to lay out", "FAILED".red().bold());
        }
        return Ok(ExitCode::from(1));
    }

    let html = render_document(&pages, &config);
    write_output(Path::new(out), &html)?;

    let fronts = pages.iter().filter(|p| p.kind == PageKind::Front).count();
    let cards: usize = pages
        .iter()
        .filter(|p| p.kind == PageKind::Front)
        .map(|p| p.occupied())
        .sum();
    let duration_ms = start.elapsed().as_millis();

    println!(
        "{} {} cards on {} sheets ({}x{} grid)",
        "Layout:".dimmed(),
        cards,
        fronts,
        grid.columns,
        grid.rows
    );
    println!(
        "{} {} ({})",
        "Wrote:".dimmed(),
        out,
        &content_hash(html.as_bytes())[..16]
    );
    println!("{} in {}ms", "SUCCESS".green().bold(), duration_ms);

    Ok(ExitCode::SUCCESS)
}
