//! Card appearance: borders, font sizes, weights and glows.

use serde::{Deserialize, Serialize};

use crate::config::{Resolved, Resolver};
use crate::lenient::{self, Field};

/// Which card faces draw a border.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BorderMode {
    #[default]
    Both,
    Front,
    Back,
    None,
}

impl BorderMode {
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "both" => Some(BorderMode::Both),
            "front" => Some(BorderMode::Front),
            "back" => Some(BorderMode::Back),
            "none" => Some(BorderMode::None),
            _ => None,
        }
    }

    pub fn draws_front(self) -> bool {
        matches!(self, BorderMode::Both | BorderMode::Front)
    }

    pub fn draws_back(self) -> bool {
        matches!(self, BorderMode::Both | BorderMode::Back)
    }
}

/// Placement of the auxiliary codes on the front face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CodePosition {
    /// Both codes in one line under the title.
    #[default]
    Center,
    /// Code 1 top-left, code 2 bottom-right.
    Corner,
}

impl CodePosition {
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "center" => Some(CodePosition::Center),
            "corner" => Some(CodePosition::Corner),
            _ => None,
        }
    }
}

/// A soft colored halo around text or the QR code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Glow {
    pub color: String,
    /// Blur radius in px.
    pub blur: f64,
}

impl Glow {
    pub fn new(color: impl Into<String>, blur: f64) -> Self {
        Self {
            color: color.into(),
            blur,
        }
    }
}

/// Visual styling shared by all cards of a render.
///
/// Font sizes are CSS px at 96 dpi and are the starting sizes for text
/// fitting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "StyleSettings")]
pub struct CardStyle {
    pub border_color: String,
    /// Border opacity in percent.
    pub border_opacity: f64,
    pub border_mode: BorderMode,
    pub code_position: CodePosition,

    pub artist_font_px: f64,
    pub year_font_px: f64,
    pub title_font_px: f64,
    pub code_font_px: f64,
    pub token_main_font_px: f64,
    pub token_sub_font_px: f64,

    pub bold_year: bool,
    pub bold_artist: bool,
    pub bold_title: bool,
    pub bold_codes: bool,

    /// CSS weights used when the matching bold flag is set; `None` means 700.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year_weight: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artist_weight: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title_weight: Option<u16>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub artist_glow: Option<Glow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year_glow: Option<Glow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title_glow: Option<Glow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qr_glow: Option<Glow>,
}

/// Lightest and heaviest CSS weights accepted in settings.
pub const MIN_FONT_WEIGHT: u16 = 100;
pub const MAX_FONT_WEIGHT: u16 = 900;

/// The CSS weight for a text field: the custom weight (or 700) when bold,
/// 400 otherwise.
pub fn font_weight(bold: bool, weight: Option<u16>) -> u16 {
    if bold {
        weight.unwrap_or(700)
    } else {
        400
    }
}

impl Default for CardStyle {
    fn default() -> Self {
        Self {
            border_color: "#000000".to_string(),
            border_opacity: 100.0,
            border_mode: BorderMode::Both,
            code_position: CodePosition::Center,
            artist_font_px: 16.0,
            year_font_px: 40.0,
            title_font_px: 16.0,
            code_font_px: 10.0,
            token_main_font_px: 28.0,
            token_sub_font_px: 14.0,
            bold_year: true,
            bold_artist: false,
            bold_title: false,
            bold_codes: false,
            year_weight: None,
            artist_weight: None,
            title_weight: None,
            artist_glow: None,
            year_glow: None,
            title_glow: None,
            qr_glow: None,
        }
    }
}

impl CardStyle {
    pub fn with_border(mut self, color: impl Into<String>, opacity: f64, mode: BorderMode) -> Self {
        self.border_color = color.into();
        self.border_opacity = opacity;
        self.border_mode = mode;
        self
    }

    /// Sets the weights used by bold year, artist and title text.
    pub fn with_weights(mut self, year: Option<u16>, artist: Option<u16>, title: Option<u16>) -> Self {
        self.year_weight = year;
        self.artist_weight = artist;
        self.title_weight = title;
        self
    }

    pub fn year_font_weight(&self) -> u16 {
        font_weight(self.bold_year, self.year_weight)
    }

    pub fn artist_font_weight(&self) -> u16 {
        font_weight(self.bold_artist, self.artist_weight)
    }

    pub fn title_font_weight(&self) -> u16 {
        font_weight(self.bold_title, self.title_weight)
    }

    pub fn code_font_weight(&self) -> u16 {
        font_weight(self.bold_codes, None)
    }

    pub fn with_code_position(mut self, position: CodePosition) -> Self {
        self.code_position = position;
        self
    }

    pub fn with_title_glow(mut self, glow: Glow) -> Self {
        self.title_glow = Some(glow);
        self
    }

    pub fn with_qr_glow(mut self, glow: Glow) -> Self {
        self.qr_glow = Some(glow);
        self
    }
}

/// Loosely typed glow settings. A present glow is enabled unless `enabled`
/// says otherwise.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GlowSettings {
    #[serde(deserialize_with = "lenient::flag")]
    pub enabled: Field<bool>,
    #[serde(deserialize_with = "lenient::text")]
    pub color: Option<String>,
    #[serde(deserialize_with = "lenient::number")]
    pub blur: Field<f64>,
}

/// Loosely typed style settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StyleSettings {
    #[serde(deserialize_with = "lenient::text")]
    pub border_color: Option<String>,
    #[serde(deserialize_with = "lenient::number")]
    pub border_opacity: Field<f64>,
    #[serde(deserialize_with = "lenient::text")]
    pub border_mode: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub code_position: Option<String>,

    #[serde(deserialize_with = "lenient::number")]
    pub artist_font_px: Field<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub year_font_px: Field<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub title_font_px: Field<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub code_font_px: Field<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub token_main_font_px: Field<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub token_sub_font_px: Field<f64>,

    #[serde(deserialize_with = "lenient::flag")]
    pub bold_year: Field<bool>,
    #[serde(deserialize_with = "lenient::flag")]
    pub bold_artist: Field<bool>,
    #[serde(deserialize_with = "lenient::flag")]
    pub bold_title: Field<bool>,
    #[serde(deserialize_with = "lenient::flag")]
    pub bold_codes: Field<bool>,

    #[serde(deserialize_with = "lenient::number")]
    pub year_weight: Field<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub artist_weight: Field<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub title_weight: Field<f64>,

    pub artist_glow: Option<GlowSettings>,
    pub year_glow: Option<GlowSettings>,
    pub title_glow: Option<GlowSettings>,
    pub qr_glow: Option<GlowSettings>,
}

const DEFAULT_GLOW_COLOR: &str = "#ffffff";
const DEFAULT_GLOW_BLUR: f64 = 5.0;

impl StyleSettings {
    /// Resolves the settings, substituting defaults for unusable values.
    pub fn resolve(self) -> Resolved<CardStyle> {
        let d = CardStyle::default();
        let mut r = Resolver::default();

        let border_color = r.text(self.border_color, &d.border_color);
        let border_opacity = r
            .number("border_opacity", self.border_opacity, d.border_opacity, |v| v >= 0.0)
            .min(100.0);
        let border_mode = match self.border_mode {
            Some(name) => BorderMode::parse(&name).unwrap_or_else(|| {
                r.warn("border_mode", format!("unknown mode '{}', using both", name));
                BorderMode::Both
            }),
            None => d.border_mode,
        };
        let code_position = match self.code_position {
            Some(name) => CodePosition::parse(&name).unwrap_or_else(|| {
                r.warn(
                    "code_position",
                    format!("unknown position '{}', using center", name),
                );
                CodePosition::Center
            }),
            None => d.code_position,
        };

        let positive = |v: f64| v > 0.0;
        let value = CardStyle {
            border_color,
            border_opacity,
            border_mode,
            code_position,
            artist_font_px: r.number("artist_font_px", self.artist_font_px, d.artist_font_px, positive),
            year_font_px: r.number("year_font_px", self.year_font_px, d.year_font_px, positive),
            title_font_px: r.number("title_font_px", self.title_font_px, d.title_font_px, positive),
            code_font_px: r.number("code_font_px", self.code_font_px, d.code_font_px, positive),
            token_main_font_px: r.number(
                "token_main_font_px",
                self.token_main_font_px,
                d.token_main_font_px,
                positive,
            ),
            token_sub_font_px: r.number(
                "token_sub_font_px",
                self.token_sub_font_px,
                d.token_sub_font_px,
                positive,
            ),
            bold_year: r.flag("bold_year", self.bold_year, d.bold_year),
            bold_artist: r.flag("bold_artist", self.bold_artist, d.bold_artist),
            bold_title: r.flag("bold_title", self.bold_title, d.bold_title),
            bold_codes: r.flag("bold_codes", self.bold_codes, d.bold_codes),
            year_weight: resolve_weight(&mut r, "year_weight", self.year_weight),
            artist_weight: resolve_weight(&mut r, "artist_weight", self.artist_weight),
            title_weight: resolve_weight(&mut r, "title_weight", self.title_weight),
            artist_glow: resolve_glow(&mut r, "artist_glow", self.artist_glow),
            year_glow: resolve_glow(&mut r, "year_glow", self.year_glow),
            title_glow: resolve_glow(&mut r, "title_glow", self.title_glow),
            qr_glow: resolve_glow(&mut r, "qr_glow", self.qr_glow),
        };

        Resolved {
            value,
            warnings: r.warnings,
        }
    }
}

/// A custom weight rounded to the nearest hundred; unusable values are
/// dropped with a warning.
fn resolve_weight(r: &mut Resolver, field: &str, value: Field<f64>) -> Option<u16> {
    let range = MIN_FONT_WEIGHT as f64..=MAX_FONT_WEIGHT as f64;
    match value {
        Field::Missing => None,
        Field::Value(v) if range.contains(&v) => Some(((v / 100.0).round() * 100.0) as u16),
        Field::Value(v) => {
            r.warn(field, format!("{} is not a font weight, using the bold default", v));
            None
        }
        Field::Malformed => {
            r.warn(field, "not a number, using the bold default".to_string());
            None
        }
    }
}

fn resolve_glow(r: &mut Resolver, field: &str, settings: Option<GlowSettings>) -> Option<Glow> {
    let settings = settings?;
    if !r.flag(&format!("{}.enabled", field), settings.enabled, true) {
        return None;
    }
    let color = r.text(settings.color, DEFAULT_GLOW_COLOR);
    let blur = r.number(
        &format!("{}.blur", field),
        settings.blur,
        DEFAULT_GLOW_BLUR,
        |v| v >= 0.0,
    );
    Some(Glow { color, blur })
}

impl From<StyleSettings> for CardStyle {
    fn from(settings: StyleSettings) -> Self {
        settings.resolve().value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_border_mode_faces() {
        assert!(BorderMode::Both.draws_front() && BorderMode::Both.draws_back());
        assert!(BorderMode::Front.draws_front() && !BorderMode::Front.draws_back());
        assert!(!BorderMode::Back.draws_front() && BorderMode::Back.draws_back());
        assert!(!BorderMode::None.draws_front() && !BorderMode::None.draws_back());
    }

    #[test]
    fn test_defaults_from_empty_settings() {
        let style: CardStyle = serde_json::from_str("{}").unwrap();
        assert_eq!(style, CardStyle::default());
        assert!(style.bold_year);
        assert!(!style.bold_title);
    }

    #[test]
    fn test_custom_weights_apply_when_bold() {
        let json = r#"{
            "bold_title": true, "title_weight": "900",
            "bold_artist": false, "artist_weight": 300,
            "year_weight": 640
        }"#;
        let resolved = StyleSettings::resolve(serde_json::from_str(json).unwrap());
        assert!(resolved.warnings.is_empty());
        let style = resolved.value;
        assert_eq!(style.title_weight, Some(900));
        assert_eq!(style.title_font_weight(), 900);
        assert_eq!(style.artist_font_weight(), 400);
        assert_eq!(style.year_font_weight(), 600);
        assert_eq!(style.code_font_weight(), 400);
    }

    #[test]
    fn test_bold_without_weight_is_700() {
        let style = CardStyle::default();
        assert_eq!(style.year_font_weight(), 700);
        assert_eq!(style.title_font_weight(), 400);
        assert_eq!(font_weight(true, None), 700);
        assert_eq!(font_weight(false, Some(900)), 400);
    }

    #[test]
    fn test_unusable_weights_warn() {
        let json = r#"{"bold_title": true, "title_weight": 5000, "year_weight": "heavy"}"#;
        let resolved = StyleSettings::resolve(serde_json::from_str(json).unwrap());
        let fields: Vec<&str> = resolved.warnings.iter().map(|w| w.field.as_str()).collect();
        assert_eq!(fields, vec!["year_weight", "title_weight"]);
        assert_eq!(resolved.value.title_font_weight(), 700);
        assert_eq!(resolved.value.year_font_weight(), 700);
    }

    #[test]
    fn test_glow_settings() {
        let json = r##"{
            "title_glow": {"color": "#ff00ff", "blur": "8"},
            "year_glow": {"enabled": false, "color": "#00ff00"},
            "qr_glow": {}
        }"##;
        let style: CardStyle = serde_json::from_str(json).unwrap();
        assert_eq!(style.title_glow, Some(Glow::new("#ff00ff", 8.0)));
        assert_eq!(style.year_glow, None);
        assert_eq!(style.artist_glow, None);
        assert_eq!(style.qr_glow, Some(Glow::new("#ffffff", 5.0)));
    }

    #[test]
    fn test_invalid_style_values_warn() {
        let settings: StyleSettings = serde_json::from_str(
            r#"{"border_mode": "dotted", "title_font_px": 0, "border_opacity": 250}"#,
        )
        .unwrap();
        let resolved = settings.resolve();
        assert_eq!(resolved.value.border_mode, BorderMode::Both);
        assert_eq!(resolved.value.title_font_px, 16.0);
        assert_eq!(resolved.value.border_opacity, 100.0);
        let fields: Vec<&str> = resolved.warnings.iter().map(|w| w.field.as_str()).collect();
        assert_eq!(fields, vec!["border_mode", "title_font_px"]);
    }
}
