//! Layout and groove configuration.
//!
//! Each configuration value object has a lenient `*Settings` counterpart that
//! mirrors its fields as optional, loosely typed values. Deserializing a config
//! always goes through its settings type, so unusable values fall back to the
//! defaults documented on each field instead of failing.

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigWarning};
use crate::lenient::{self, Field};
use crate::style::{CardStyle, StyleSettings};

/// A resolved value together with the fallbacks applied while resolving it.
#[derive(Debug, Clone)]
pub struct Resolved<T> {
    pub value: T,
    pub warnings: Vec<ConfigWarning>,
}

/// Collects warnings while settings are resolved into values.
#[derive(Debug, Default)]
pub(crate) struct Resolver {
    pub(crate) warnings: Vec<ConfigWarning>,
}

impl Resolver {
    pub(crate) fn warn(&mut self, field: &str, message: String) {
        self.warnings.push(ConfigWarning::new(field, message));
    }

    /// Resolves a number, falling back when it is missing, malformed or
    /// rejected by `valid`.
    pub(crate) fn number(
        &mut self,
        field: &str,
        value: Field<f64>,
        default: f64,
        valid: impl Fn(f64) -> bool,
    ) -> f64 {
        match value {
            Field::Value(v) if valid(v) => v,
            Field::Value(v) => {
                self.warn(field, format!("{} is out of range, using {}", v, default));
                default
            }
            Field::Malformed => {
                self.warn(field, format!("not a number, using {}", default));
                default
            }
            Field::Missing => default,
        }
    }

    /// Resolves a whole count (fractions are truncated) of at least `min`.
    /// Counts above `max` are clamped to it with a warning.
    pub(crate) fn count(
        &mut self,
        field: &str,
        value: Field<f64>,
        default: u32,
        min: u32,
        max: u32,
    ) -> u32 {
        let n = self.number(field, value, default as f64, |v| v.trunc() >= min as f64).trunc();
        if n > max as f64 {
            self.warn(field, format!("{} exceeds the limit, using {}", n, max));
            return max;
        }
        n as u32
    }

    pub(crate) fn flag(&mut self, field: &str, value: Field<bool>, default: bool) -> bool {
        match value {
            Field::Value(v) => v,
            Field::Malformed => {
                self.warn(field, format!("not a boolean, using {}", default));
                default
            }
            Field::Missing => default,
        }
    }

    /// Resolves a free-form string; blank strings use the default.
    pub(crate) fn text(&mut self, value: Option<String>, default: &str) -> String {
        value
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| default.to_string())
    }

    pub(crate) fn absorb(&mut self, section: &str, warnings: Vec<ConfigWarning>) {
        self.warnings
            .extend(warnings.into_iter().map(|w| w.nested(section)));
    }
}

// =============================================================================
// Paper, modes
// =============================================================================

/// Supported paper kinds with their printable area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PaperSize {
    #[default]
    A4,
    A3,
}

impl PaperSize {
    /// Parses a paper name; anything other than A3 is A4.
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_uppercase().as_str() {
            "A4" => Some(PaperSize::A4),
            "A3" => Some(PaperSize::A3),
            _ => None,
        }
    }

    /// Printable width and height in millimeters.
    pub fn printable_mm(self) -> (f64, f64) {
        match self {
            PaperSize::A4 => (190.0, 277.0),
            PaperSize::A3 => (277.0, 400.0),
        }
    }

    /// Physical sheet width and height in millimeters.
    pub fn sheet_mm(self) -> (f64, f64) {
        match self {
            PaperSize::A4 => (210.0, 297.0),
            PaperSize::A3 => (297.0, 420.0),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PaperSize::A4 => "A4",
            PaperSize::A3 => "A3",
        }
    }
}

impl std::fmt::Display for PaperSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How each groove ring is rotated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AngleMode {
    /// Independent uniform rotation per ring.
    #[default]
    Random,
    /// Cumulative fixed increment per ring (spiral twist).
    Degree,
}

impl AngleMode {
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "random" => Some(AngleMode::Random),
            "degree" => Some(AngleMode::Degree),
            _ => None,
        }
    }
}

/// Whether cards carry entry data or one shared token text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderMode {
    #[default]
    Music,
    Token,
}

impl RenderMode {
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "music" => Some(RenderMode::Music),
            "token" => Some(RenderMode::Token),
            _ => None,
        }
    }
}

// =============================================================================
// Groove
// =============================================================================

/// Upper bound on `ring_count`.
pub const MAX_RING_COUNT: u32 = 500;
/// Upper bound on the per-ring gap counts.
pub const MAX_GAP_COUNT: u32 = 64;

/// Visual parameters of the vinyl groove background.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "GrooveSettings")]
pub struct GrooveConfig {
    /// Radial distance between rings, in canvas units (default 2.5).
    pub spacing: f64,
    /// Maximum number of rings (default 12).
    pub ring_count: u32,
    /// Base stroke width (default 0.4).
    pub thickness: f64,
    /// Global opacity in percent (default 100).
    pub opacity_percent: f64,
    /// Stroke color (default `#000000`).
    pub color: String,
    /// Random hue per ring with a glow.
    pub neon: bool,
    /// Glow blur radius in px (default 5).
    pub neon_blur: f64,
    /// Per-ring stroke width jitter.
    pub variate: bool,
    /// Gap count range per ring (default 1..=2).
    pub gap_count_min: u32,
    pub gap_count_max: u32,
    /// Gap width range in percent of the circumference (default 25..=30).
    pub gap_width_min: f64,
    pub gap_width_max: f64,
    pub angle_mode: AngleMode,
    /// Per-ring increment in degrees for [`AngleMode::Degree`] (default 0).
    pub angle_offset: f64,
}

impl Default for GrooveConfig {
    fn default() -> Self {
        Self {
            spacing: 2.5,
            ring_count: 12,
            thickness: 0.4,
            opacity_percent: 100.0,
            color: "#000000".to_string(),
            neon: false,
            neon_blur: 5.0,
            variate: false,
            gap_count_min: 1,
            gap_count_max: 2,
            gap_width_min: 25.0,
            gap_width_max: 30.0,
            angle_mode: AngleMode::Random,
            angle_offset: 0.0,
        }
    }
}

impl GrooveConfig {
    pub fn with_spacing(mut self, spacing: f64) -> Self {
        self.spacing = spacing;
        self
    }

    pub fn with_ring_count(mut self, ring_count: u32) -> Self {
        self.ring_count = ring_count;
        self
    }

    pub fn with_thickness(mut self, thickness: f64, variate: bool) -> Self {
        self.thickness = thickness;
        self.variate = variate;
        self
    }

    pub fn with_opacity(mut self, opacity_percent: f64) -> Self {
        self.opacity_percent = opacity_percent;
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    pub fn with_neon(mut self, blur: f64) -> Self {
        self.neon = true;
        self.neon_blur = blur;
        self
    }

    pub fn with_gap_counts(mut self, min: u32, max: u32) -> Self {
        self.gap_count_min = min.min(max);
        self.gap_count_max = min.max(max);
        self
    }

    pub fn with_gap_widths(mut self, min: f64, max: f64) -> Self {
        self.gap_width_min = min.min(max);
        self.gap_width_max = min.max(max);
        self
    }

    pub fn with_angle(mut self, mode: AngleMode, offset: f64) -> Self {
        self.angle_mode = mode;
        self.angle_offset = offset;
        self
    }
}

/// Loosely typed groove settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GrooveSettings {
    #[serde(deserialize_with = "lenient::number")]
    pub spacing: Field<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub ring_count: Field<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub thickness: Field<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub opacity_percent: Field<f64>,
    #[serde(deserialize_with = "lenient::text")]
    pub color: Option<String>,
    #[serde(deserialize_with = "lenient::flag")]
    pub neon: Field<bool>,
    #[serde(deserialize_with = "lenient::number")]
    pub neon_blur: Field<f64>,
    #[serde(deserialize_with = "lenient::flag")]
    pub variate: Field<bool>,
    #[serde(deserialize_with = "lenient::number")]
    pub gap_count_min: Field<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub gap_count_max: Field<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub gap_width_min: Field<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub gap_width_max: Field<f64>,
    #[serde(deserialize_with = "lenient::text")]
    pub angle_mode: Option<String>,
    #[serde(deserialize_with = "lenient::number")]
    pub angle_offset: Field<f64>,
}

impl GrooveSettings {
    /// Resolves the settings, substituting defaults for unusable values.
    pub fn resolve(self) -> Resolved<GrooveConfig> {
        let d = GrooveConfig::default();
        let mut r = Resolver::default();

        let spacing = r.number("spacing", self.spacing, d.spacing, |v| v > 0.0);
        let ring_count = r.count("ring_count", self.ring_count, d.ring_count, 1, MAX_RING_COUNT);
        let thickness = r.number("thickness", self.thickness, d.thickness, |v| v > 0.0);
        let opacity_percent = r
            .number("opacity_percent", self.opacity_percent, d.opacity_percent, |v| v >= 0.0)
            .min(100.0);
        let color = r.text(self.color, &d.color);
        let neon = r.flag("neon", self.neon, d.neon);
        let neon_blur = r.number("neon_blur", self.neon_blur, d.neon_blur, |v| v >= 0.0);
        let variate = r.flag("variate", self.variate, d.variate);

        let mut gap_count_min = r.count("gap_count_min", self.gap_count_min, d.gap_count_min, 0, MAX_GAP_COUNT);
        let mut gap_count_max = r.count("gap_count_max", self.gap_count_max, d.gap_count_max, 0, MAX_GAP_COUNT);
        if gap_count_min > gap_count_max {
            r.warn(
                "gap_count_min",
                format!(
                    "minimum {} exceeds maximum {}, swapping",
                    gap_count_min, gap_count_max
                ),
            );
            std::mem::swap(&mut gap_count_min, &mut gap_count_max);
        }

        let percent = |v: f64| (0.0..=100.0).contains(&v);
        let mut gap_width_min = r.number("gap_width_min", self.gap_width_min, d.gap_width_min, percent);
        let mut gap_width_max = r.number("gap_width_max", self.gap_width_max, d.gap_width_max, percent);
        if gap_width_min > gap_width_max {
            r.warn(
                "gap_width_min",
                format!(
                    "minimum {} exceeds maximum {}, swapping",
                    gap_width_min, gap_width_max
                ),
            );
            std::mem::swap(&mut gap_width_min, &mut gap_width_max);
        }

        let angle_mode = match self.angle_mode {
            Some(name) => AngleMode::parse(&name).unwrap_or_else(|| {
                r.warn("angle_mode", format!("unknown mode '{}', using random", name));
                AngleMode::Random
            }),
            None => d.angle_mode,
        };
        let angle_offset = r.number("angle_offset", self.angle_offset, d.angle_offset, |_| true);

        Resolved {
            value: GrooveConfig {
                spacing,
                ring_count,
                thickness,
                opacity_percent,
                color,
                neon,
                neon_blur,
                variate,
                gap_count_min,
                gap_count_max,
                gap_width_min,
                gap_width_max,
                angle_mode,
                angle_offset,
            },
            warnings: r.warnings,
        }
    }
}

impl From<GrooveSettings> for GrooveConfig {
    fn from(settings: GrooveSettings) -> Self {
        settings.resolve().value
    }
}

// =============================================================================
// QR and token text
// =============================================================================

/// QR code display options for card backs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "QrSettings")]
pub struct QrConfig {
    /// Show the QR code at all (default true).
    pub show: bool,
    /// Overlay text; only the first three characters are drawn.
    pub logo_text: String,
    pub logo_rounded: bool,
    pub logo_inverted: bool,
}

impl Default for QrConfig {
    fn default() -> Self {
        Self {
            show: true,
            logo_text: String::new(),
            logo_rounded: false,
            logo_inverted: false,
        }
    }
}

/// Loosely typed QR settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct QrSettings {
    #[serde(deserialize_with = "lenient::flag")]
    pub show: Field<bool>,
    #[serde(deserialize_with = "lenient::text")]
    pub logo_text: Option<String>,
    #[serde(deserialize_with = "lenient::flag")]
    pub logo_rounded: Field<bool>,
    #[serde(deserialize_with = "lenient::flag")]
    pub logo_inverted: Field<bool>,
}

impl QrSettings {
    pub fn resolve(self) -> Resolved<QrConfig> {
        let d = QrConfig::default();
        let mut r = Resolver::default();
        let value = QrConfig {
            show: r.flag("show", self.show, d.show),
            logo_text: self.logo_text.unwrap_or_default(),
            logo_rounded: r.flag("logo_rounded", self.logo_rounded, d.logo_rounded),
            logo_inverted: r.flag("logo_inverted", self.logo_inverted, d.logo_inverted),
        };
        Resolved {
            value,
            warnings: r.warnings,
        }
    }
}

impl From<QrSettings> for QrConfig {
    fn from(settings: QrSettings) -> Self {
        settings.resolve().value
    }
}

/// The shared text printed on every card in token mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "TokenSettings")]
pub struct TokenConfig {
    /// Main line (default `TOKEN`).
    pub main_text: String,
    /// Optional smaller line below; empty hides it.
    pub sub_text: String,
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            main_text: "TOKEN".to_string(),
            sub_text: String::new(),
        }
    }
}

/// Loosely typed token settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TokenSettings {
    #[serde(deserialize_with = "lenient::opt_string")]
    pub main_text: Option<String>,
    #[serde(deserialize_with = "lenient::opt_string")]
    pub sub_text: Option<String>,
}

impl From<TokenSettings> for TokenConfig {
    fn from(settings: TokenSettings) -> Self {
        let d = TokenConfig::default();
        let mut r = Resolver::default();
        TokenConfig {
            main_text: r.text(settings.main_text, &d.main_text),
            sub_text: settings.sub_text.unwrap_or_default(),
        }
    }
}

// =============================================================================
// Layout
// =============================================================================

/// Smallest card edge a layout accepts; smaller cards lay out no pages.
pub const MIN_CARD_SIZE_MM: f64 = 10.0;
/// Upper bound on `max_lines`.
pub const MAX_LINES: u32 = 20;

/// Configuration snapshot for one render call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "LayoutSettings")]
pub struct LayoutConfig {
    pub paper: PaperSize,
    /// Square card edge in millimeters (default 46).
    pub card_size_mm: f64,
    /// Lines a fitted text field may occupy (default 2).
    pub max_lines: u32,
    pub mode: RenderMode,
    /// Full print context. When false, music layouts are capped to one page
    /// of entries for on-screen grids (default true).
    pub printing: bool,
    pub groove: GrooveConfig,
    pub qr: QrConfig,
    pub token: TokenConfig,
    pub style: CardStyle,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            paper: PaperSize::A4,
            card_size_mm: 46.0,
            max_lines: 2,
            mode: RenderMode::Music,
            printing: true,
            groove: GrooveConfig::default(),
            qr: QrConfig::default(),
            token: TokenConfig::default(),
            style: CardStyle::default(),
        }
    }
}

impl LayoutConfig {
    /// Creates a music-mode config for the given paper and card size.
    pub fn new(paper: PaperSize, card_size_mm: f64) -> Self {
        Self {
            paper,
            card_size_mm,
            ..Default::default()
        }
    }

    /// Switches to token mode with the given texts.
    pub fn with_token(mut self, main_text: impl Into<String>, sub_text: impl Into<String>) -> Self {
        self.mode = RenderMode::Token;
        self.token = TokenConfig {
            main_text: main_text.into(),
            sub_text: sub_text.into(),
        };
        self
    }

    pub fn with_groove(mut self, groove: GrooveConfig) -> Self {
        self.groove = groove;
        self
    }

    pub fn with_max_lines(mut self, max_lines: u32) -> Self {
        self.max_lines = max_lines;
        self
    }

    pub fn with_printing(mut self, printing: bool) -> Self {
        self.printing = printing;
        self
    }

    pub fn with_qr(mut self, qr: QrConfig) -> Self {
        self.qr = qr;
        self
    }

    pub fn with_style(mut self, style: CardStyle) -> Self {
        self.style = style;
        self
    }

    pub fn is_token_mode(&self) -> bool {
        self.mode == RenderMode::Token
    }

    /// Parses a JSON configuration document, applying defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(LayoutSettings::from_json_str(json)?.into())
    }

    /// Parses a YAML configuration document, applying defaults.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        Ok(LayoutSettings::from_yaml_str(yaml)?.into())
    }

    /// Serializes the configuration as pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Loosely typed layout settings, as read from a form or file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LayoutSettings {
    #[serde(deserialize_with = "lenient::text")]
    pub paper: Option<String>,
    #[serde(deserialize_with = "lenient::number")]
    pub card_size_mm: Field<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub max_lines: Field<f64>,
    #[serde(deserialize_with = "lenient::text")]
    pub mode: Option<String>,
    #[serde(deserialize_with = "lenient::flag")]
    pub printing: Field<bool>,
    pub groove: GrooveSettings,
    pub qr: QrSettings,
    pub token: TokenSettings,
    pub style: StyleSettings,
}

impl LayoutSettings {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Resolves the settings, substituting defaults for unusable values.
    pub fn resolve(self) -> Resolved<LayoutConfig> {
        let d = LayoutConfig::default();
        let mut r = Resolver::default();

        let paper = match self.paper {
            Some(name) => PaperSize::parse(&name).unwrap_or_else(|| {
                r.warn("paper", format!("unknown paper '{}', using A4", name));
                PaperSize::A4
            }),
            None => d.paper,
        };
        let card_size_mm = r.number("card_size_mm", self.card_size_mm, d.card_size_mm, |v| {
            v >= MIN_CARD_SIZE_MM
        });
        let max_lines = r.count("max_lines", self.max_lines, d.max_lines, 1, MAX_LINES);
        let mode = match self.mode {
            Some(name) => RenderMode::parse(&name).unwrap_or_else(|| {
                r.warn("mode", format!("unknown mode '{}', using music", name));
                RenderMode::Music
            }),
            None => d.mode,
        };
        let printing = r.flag("printing", self.printing, d.printing);

        let groove = self.groove.resolve();
        r.absorb("groove", groove.warnings);
        let qr = self.qr.resolve();
        r.absorb("qr", qr.warnings);
        let style = self.style.resolve();
        r.absorb("style", style.warnings);

        Resolved {
            value: LayoutConfig {
                paper,
                card_size_mm,
                max_lines,
                mode,
                printing,
                groove: groove.value,
                qr: qr.value,
                token: self.token.into(),
                style: style.value,
            },
            warnings: r.warnings,
        }
    }
}

impl From<LayoutSettings> for LayoutConfig {
    fn from(settings: LayoutSettings) -> Self {
        settings.resolve().value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_paper_printable_area() {
        assert_eq!(PaperSize::A4.printable_mm(), (190.0, 277.0));
        assert_eq!(PaperSize::A3.printable_mm(), (277.0, 400.0));
        assert_eq!(PaperSize::parse("a3"), Some(PaperSize::A3));
        assert_eq!(PaperSize::parse("Letter"), None);
    }

    #[test]
    fn test_empty_document_gives_defaults() {
        let config = LayoutConfig::from_json_str("{}").unwrap();
        assert_eq!(config, LayoutConfig::default());
    }

    #[test]
    fn test_malformed_groove_values_fall_back() {
        let json = r#"{
            "groove": {
                "spacing": "wide",
                "thickness": -1,
                "opacity_percent": "",
                "ring_count": "7.9",
                "gap_count_min": 0,
                "gap_count_max": 0
            }
        }"#;
        let resolved = LayoutSettings::from_json_str(json).unwrap().resolve();
        let groove = &resolved.value.groove;
        assert_eq!(groove.spacing, 2.5);
        assert_eq!(groove.thickness, 0.4);
        assert_eq!(groove.opacity_percent, 100.0);
        assert_eq!(groove.ring_count, 7);
        assert_eq!(groove.gap_count_min, 0);
        assert_eq!(groove.gap_count_max, 0);

        let fields: Vec<&str> = resolved.warnings.iter().map(|w| w.field.as_str()).collect();
        assert_eq!(fields, vec!["groove.spacing", "groove.thickness"]);
    }

    #[test]
    fn test_oversized_counts_are_clamped() {
        let json = r#"{
            "card_size_mm": 0.01,
            "max_lines": 1e9,
            "groove": { "ring_count": 1e12, "gap_count_max": "100000" }
        }"#;
        let resolved = LayoutSettings::from_json_str(json).unwrap().resolve();
        let config = &resolved.value;
        assert_eq!(config.groove.ring_count, MAX_RING_COUNT);
        assert_eq!(config.groove.gap_count_max, MAX_GAP_COUNT);
        assert_eq!(config.max_lines, MAX_LINES);
        assert_eq!(config.card_size_mm, 46.0);

        let fields: Vec<&str> = resolved.warnings.iter().map(|w| w.field.as_str()).collect();
        assert_eq!(
            fields,
            vec!["card_size_mm", "max_lines", "groove.ring_count", "groove.gap_count_max"]
        );
    }

    #[test]
    fn test_inverted_ranges_are_swapped() {
        let settings = GrooveSettings {
            gap_count_min: Field::Value(5.0),
            gap_count_max: Field::Value(2.0),
            gap_width_min: Field::Value(40.0),
            gap_width_max: Field::Value(10.0),
            ..Default::default()
        };
        let resolved = settings.resolve();
        assert_eq!(resolved.value.gap_count_min, 2);
        assert_eq!(resolved.value.gap_count_max, 5);
        assert_eq!(resolved.value.gap_width_min, 10.0);
        assert_eq!(resolved.value.gap_width_max, 40.0);
        assert_eq!(resolved.warnings.len(), 2);
    }

    #[test]
    fn test_unknown_names_fall_back() {
        let resolved = LayoutSettings::from_json_str(
            r#"{"paper": "Letter", "mode": "poster", "groove": {"angle_mode": "spiral"}}"#,
        )
        .unwrap()
        .resolve();
        assert_eq!(resolved.value.paper, PaperSize::A4);
        assert_eq!(resolved.value.mode, RenderMode::Music);
        assert_eq!(resolved.value.groove.angle_mode, AngleMode::Random);
        assert_eq!(resolved.warnings.len(), 3);
    }

    #[test]
    fn test_token_text_defaults() {
        let config = LayoutConfig::from_json_str(
            r#"{"mode": "token", "token": {"main_text": "", "sub_text": "bonus"}}"#,
        )
        .unwrap();
        assert!(config.is_token_mode());
        assert_eq!(config.token.main_text, "TOKEN");
        assert_eq!(config.token.sub_text, "bonus");
    }

    #[test]
    fn test_serialized_config_reads_back() {
        let config = LayoutConfig::new(PaperSize::A3, 60.0)
            .with_groove(
                GrooveConfig::default()
                    .with_neon(3.0)
                    .with_angle(AngleMode::Degree, 15.0),
            )
            .with_token("JOKER", "x2");
        let json = config.to_json_pretty().unwrap();
        let back = LayoutConfig::from_json_str(&json).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn test_yaml_document() {
        let yaml = "paper: A3\ncard_size_mm: 50\nqr:\n  show: off\n  logo_text: HIT\n";
        let config = LayoutConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.paper, PaperSize::A3);
        assert_eq!(config.card_size_mm, 50.0);
        assert!(!config.qr.show);
        assert_eq!(config.qr.logo_text, "HIT");
    }

    #[test]
    fn test_structurally_invalid_document_is_an_error() {
        assert!(matches!(
            LayoutConfig::from_json_str("[1, 2, 3]"),
            Err(ConfigError::Json(_))
        ));
    }
}
