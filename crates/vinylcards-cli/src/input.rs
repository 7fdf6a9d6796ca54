//! Input loading for entry lists and layout configuration.
//!
//! Entries come from a JSON array or a CSV sheet, configuration from JSON or
//! YAML. Loaders dispatch by file extension and report the BLAKE3 hash of the
//! source content alongside the parsed value.

use std::path::{Path, PathBuf};

use thiserror::Error;
use vinylcards_spec::{ConfigError, ConfigWarning, Entry, LayoutConfig, LayoutSettings};

/// Recognized entry list formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryFormat {
    Json,
    Csv,
}

impl EntryFormat {
    /// Picks a format from the file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        match extension(path).as_deref() {
            Some("json") => Some(Self::Json),
            Some("csv") => Some(Self::Csv),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EntryFormat::Json => "json",
            EntryFormat::Csv => "csv",
        }
    }
}

impl std::fmt::Display for EntryFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Errors that can occur while loading input files.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("failed to read file '{}': {source}", .path.display())]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("unknown file extension {} (expected {expected})", describe_extension(.extension))]
    UnknownExtension {
        extension: Option<String>,
        expected: &'static str,
    },

    #[error("invalid entry list: {0}")]
    Entries(#[from] serde_json::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

fn describe_extension(extension: &Option<String>) -> String {
    match extension {
        Some(ext) => format!("'.{}'", ext),
        None => "(none)".to_string(),
    }
}

fn extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|s| s.to_lowercase())
}

fn read(path: &Path) -> Result<String, InputError> {
    std::fs::read_to_string(path).map_err(|source| InputError::FileRead {
        path: path.to_path_buf(),
        source,
    })
}

/// Hex BLAKE3 hash of `content`.
pub fn content_hash(content: &[u8]) -> String {
    blake3::hash(content).to_hex().to_string()
}

/// Entries read from a file.
#[derive(Debug)]
pub struct LoadedEntries {
    pub entries: Vec<Entry>,
    pub format: EntryFormat,
    /// BLAKE3 hash of the file content (hex string).
    pub source_hash: String,
}

/// Loads entries from a `.json` or `.csv` file.
pub fn load_entries(path: &Path) -> Result<LoadedEntries, InputError> {
    let format = EntryFormat::from_path(path).ok_or_else(|| InputError::UnknownExtension {
        extension: extension(path),
        expected: ".json or .csv",
    })?;
    let content = read(path)?;
    let entries = match format {
        EntryFormat::Json => serde_json::from_str(&content)?,
        EntryFormat::Csv => parse_csv(&content),
    };
    log::debug!("Loaded {} entries from {}", entries.len(), path.display());

    Ok(LoadedEntries {
        entries,
        format,
        source_hash: content_hash(content.as_bytes()),
    })
}

/// Configuration read from a file, with the fallbacks applied to it.
#[derive(Debug)]
pub struct LoadedConfig {
    pub config: LayoutConfig,
    pub warnings: Vec<ConfigWarning>,
}

/// Loads a layout configuration, or the defaults when `path` is `None`.
///
/// Every fallback applied while resolving the file is logged at `warn` and
/// returned.
pub fn load_config(path: Option<&Path>) -> Result<LoadedConfig, InputError> {
    let Some(path) = path else {
        return Ok(LoadedConfig {
            config: LayoutConfig::default(),
            warnings: Vec::new(),
        });
    };

    let settings = match extension(path).as_deref() {
        Some("json") => LayoutSettings::from_json_str(&read(path)?)?,
        Some("yaml") | Some("yml") => LayoutSettings::from_yaml_str(&read(path)?)?,
        _ => {
            return Err(InputError::UnknownExtension {
                extension: extension(path),
                expected: ".json, .yaml or .yml",
            })
        }
    };

    let resolved = settings.resolve();
    for warning in &resolved.warnings {
        log::warn!("{}: {}", path.display(), warning);
    }
    Ok(LoadedConfig {
        config: resolved.value,
        warnings: resolved.warnings,
    })
}

const HEADER_KEYWORDS: &[&str] = &[
    "artist", "előadó", "title", "cím", "dal", "track", "year", "év", "release", "qr", "link",
    "url", "code",
];

/// Column positions of each entry field in a CSV sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Columns {
    artist: usize,
    title: usize,
    year: usize,
    qr_data: usize,
    code1: usize,
    code2: usize,
}

impl Default for Columns {
    fn default() -> Self {
        Self {
            artist: 0,
            title: 1,
            year: 2,
            qr_data: 3,
            code1: 4,
            code2: 5,
        }
    }
}

impl Columns {
    /// Maps header names onto fields. The first header containing one of a
    /// field's aliases wins; unmatched fields keep their default position.
    fn from_header(header: &[String]) -> Self {
        let mut found: [Option<usize>; 6] = [None; 6];
        let aliases: [&[&str]; 6] = [
            &["artist", "előadó"],
            &["title", "cím", "dal", "track"],
            &["year", "év", "release"],
            &["qr", "qr_data", "qr data", "link", "url"],
            &["code1", "kód1", "code 1"],
            &["code2", "kód2", "code 2"],
        ];

        for (index, cell) in header.iter().enumerate() {
            let name = cell.trim().to_lowercase();
            for (slot, names) in found.iter_mut().zip(aliases) {
                if slot.is_none() && names.iter().any(|alias| name.contains(alias)) {
                    *slot = Some(index);
                }
            }
        }

        let d = Self::default();
        Self {
            artist: found[0].unwrap_or(d.artist),
            title: found[1].unwrap_or(d.title),
            year: found[2].unwrap_or(d.year),
            qr_data: found[3].unwrap_or(d.qr_data),
            code1: found[4].unwrap_or(d.code1),
            code2: found[5].unwrap_or(d.code2),
        }
    }
}

fn is_header_row(row: &[String]) -> bool {
    row.iter().any(|cell| {
        let cell = cell.trim().to_lowercase();
        HEADER_KEYWORDS.iter().any(|k| cell.contains(k))
    })
}

/// Reads all non-blank CSV records with trimmed cells. Rows may differ in
/// length; unreadable records are skipped with a warning.
fn read_rows(text: &str) -> Vec<Vec<String>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let mut rows = Vec::new();
    for (index, record) in reader.records().enumerate() {
        match record {
            Ok(record) => rows.push(record.iter().map(str::to_string).collect::<Vec<_>>()),
            Err(e) => log::warn!("Skipping CSV record {}: {}", index + 1, e),
        }
    }
    rows.retain(|row| row.iter().any(|cell| !cell.is_empty()));
    rows
}

/// Parses a CSV sheet into entries.
///
/// A first row containing a header keyword (English or Hungarian, e.g.
/// `artist`, `előadó`, `title`, `cím`, `year`, `év`, `link`, `code`) selects
/// columns by name. Otherwise columns are read in the order artist, title,
/// year, QR payload, code 1, code 2. Quoted cells may contain commas, line
/// breaks and `""` escapes. Blank rows are skipped; empty codes are left
/// unset.
pub fn parse_csv(text: &str) -> Vec<Entry> {
    let rows = read_rows(text);

    let (columns, data) = match rows.split_first() {
        Some((header, rest)) if is_header_row(header) => (Columns::from_header(header), rest),
        _ => (Columns::default(), rows.as_slice()),
    };

    data.iter()
        .map(|row| {
            let cell = |i: usize| row.get(i).cloned().unwrap_or_default();
            let code = |i: usize| row.get(i).filter(|c| !c.is_empty()).cloned();
            Entry {
                artist: cell(columns.artist),
                title: cell(columns.title),
                year: cell(columns.year),
                qr_data: cell(columns.qr_data),
                code1: code(columns.code1),
                code2: code(columns.code2),
                source: None,
            }
        })
        .collect()
}
