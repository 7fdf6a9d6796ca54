//! vinylcards CLI - printable music quiz cards
//!
//! This binary lays out song entries as front/back card sheets, previews
//! single cards and generates standalone vinyl groove images.

use clap::{Parser, Subcommand};
use std::process::ExitCode;

use vinylcards_cli::commands;

/// vinylcards - Printable Music Quiz Card Generator
#[derive(Parser)]
#[command(name = "vinylcards")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Lay out all entries as printable front/back pages (HTML)
    Render {
        /// Entry list (JSON array or CSV); not needed in token mode
        #[arg(short, long)]
        entries: Option<String>,

        /// Layout configuration (JSON or YAML)
        #[arg(short, long)]
        config: Option<String>,

        /// Output HTML file
        #[arg(short, long, default_value = "cards.html")]
        out: String,

        /// Seed for reproducible grooves (default: random)
        #[arg(long)]
        seed: Option<u32>,

        /// Only lay out one page's worth of entries
        #[arg(long)]
        screen: bool,
    },

    /// Render one card's front and back side by side (HTML)
    Preview {
        /// Entry list (JSON array or CSV); not needed in token mode
        #[arg(short, long)]
        entries: Option<String>,

        /// Zero-based index of the entry to preview
        #[arg(short, long, default_value_t = 0)]
        index: usize,

        /// Layout configuration (JSON or YAML)
        #[arg(short, long)]
        config: Option<String>,

        /// Output HTML file
        #[arg(short, long, default_value = "preview.html")]
        out: String,

        /// Seed for a reproducible groove (default: random)
        #[arg(long)]
        seed: Option<u32>,
    },

    /// Generate standalone vinyl groove SVGs
    Groove {
        /// Layout configuration (JSON or YAML); its groove section is used
        #[arg(short, long)]
        config: Option<String>,

        /// Output SVG file
        #[arg(short, long, default_value = "groove.svg")]
        out: String,

        /// Base seed (default: random)
        #[arg(long)]
        seed: Option<u32>,

        /// Number of images to generate
        #[arg(short = 'n', long, default_value_t = 1)]
        count: u32,
    },

    /// Print the default layout configuration as JSON
    Defaults {
        /// Write to a file instead of stdout
        #[arg(short, long)]
        out: Option<String>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter))
        .format_timestamp_millis()
        .init();

    let result = match cli.command {
        Commands::Render {
            entries,
            config,
            out,
            seed,
            screen,
        } => commands::render::run(entries.as_deref(), config.as_deref(), &out, seed, screen),
        Commands::Preview {
            entries,
            index,
            config,
            out,
            seed,
        } => commands::preview::run(entries.as_deref(), index, config.as_deref(), &out, seed),
        Commands::Groove {
            config,
            out,
            seed,
            count,
        } => commands::groove::run(config.as_deref(), &out, seed, count),
        Commands::Defaults { out } => commands::defaults::run(out.as_deref()),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}
