//! Groove command implementation
//!
//! Writes standalone groove SVGs, one per derived seed.

use anyhow::{Context, Result};
use colored::Colorize;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use vinylcards_render::{generate_groove_image, DeterministicRng};

use super::{print_config_warnings, resolve_seed, write_output};
use crate::input::{content_hash, load_config, LoadedConfig};

/// Output path of image `index` in a batch of `count`.
///
/// Single images go to `out` unchanged; batches get a `-{index}` suffix
/// before the extension.
pub fn batch_path(out: &Path, index: u32, count: u32) -> PathBuf {
    if count <= 1 {
        return out.to_path_buf();
    }
    let stem = out
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "groove".to_string());
    let name = match out.extension() {
        Some(ext) => format!("{}-{}.{}", stem, index, ext.to_string_lossy()),
        None => format!("{}-{}", stem, index),
    };
    out.with_file_name(name)
}

/// Run the groove command
///
/// # Arguments
/// * `config_path` - Optional layout configuration; its `groove` section is used
/// * `out` - Output SVG path
/// * `seed` - Optional base seed
/// * `count` - Number of images; each gets a seed derived from the base seed
pub fn run(config_path: Option<&str>, out: &str, seed: Option<u32>, count: u32) -> Result<ExitCode> {
    let LoadedConfig { config, warnings } = load_config(config_path.map(Path::new))
        .with_context(|| format!("Failed to load config file: {}", config_path.unwrap_or("")))?;

    let count = count.max(1);
    println!(
        "{} {} image(s), {} rings",
        "Generating grooves:".cyan().bold(),
        count,
        config.groove.ring_count
    );
    print_config_warnings(&warnings);

    let base_seed = resolve_seed(seed);
    println!("{} {}", "Seed:".dimmed(), base_seed);

    for index in 0..count {
        let image_seed = if count == 1 {
            base_seed
        } else {
            DeterministicRng::derive_seed(base_seed, index)
        };
        let image = generate_groove_image(&config.groove, &mut DeterministicRng::new(image_seed));
        let svg = image.to_svg();
        let path = batch_path(Path::new(out), index, count);
        write_output(&path, &svg)?;
        println!(
            "  {} {} (seed {}, {})",
            "+".green(),
            path.display(),
            image_seed,
            &content_hash(svg.as_bytes())[..16]
        );
    }

    println!("{}", "SUCCESS".green().bold());
    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_path() {
        let out = Path::new("out/groove.svg");
        assert_eq!(batch_path(out, 0, 1), PathBuf::from("out/groove.svg"));
        assert_eq!(batch_path(out, 2, 3), PathBuf::from("out/groove-2.svg"));
        assert_eq!(batch_path(Path::new("disc"), 1, 2), PathBuf::from("disc-1"));
    }
}
