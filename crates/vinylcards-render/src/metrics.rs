//! Text measurement.
//!
//! Fitting needs to know how large a block of text renders. The measurement
//! backend sits behind [`TextMeasure`]. [`FontMetrics`] measures with the
//! bundled DejaVu Sans faces through `rusttype`; [`AdvanceMetrics`] is a
//! table-driven approximation used when the faces cannot be parsed.

use std::sync::OnceLock;

use rusttype::{point, Font, Scale};

/// CSS weight used for bold text.
pub const BOLD_WEIGHT: u16 = 700;
/// CSS weight used for regular text.
pub const NORMAL_WEIGHT: u16 = 400;

/// Font parameters for one text field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    /// Font size in px.
    pub font_size: f64,
    /// CSS font weight (100..=900).
    pub weight: u16,
    /// Line height as a multiple of the font size; `None` means 1.1.
    pub line_height: Option<f64>,
}

impl TextStyle {
    pub const DEFAULT_LINE_HEIGHT: f64 = 1.1;

    pub fn new(font_size: f64) -> Self {
        Self {
            font_size,
            weight: NORMAL_WEIGHT,
            line_height: None,
        }
    }

    pub fn bold(self, bold: bool) -> Self {
        self.with_weight(if bold { BOLD_WEIGHT } else { NORMAL_WEIGHT })
    }

    pub fn with_weight(mut self, weight: u16) -> Self {
        self.weight = weight;
        self
    }

    pub fn with_font_size(mut self, font_size: f64) -> Self {
        self.font_size = font_size;
        self
    }

    /// Weights from 600 up measure with the bold face.
    pub fn is_bold(&self) -> bool {
        self.weight >= 600
    }

    /// Line height in px.
    pub fn line_height_px(&self) -> f64 {
        self.font_size * self.line_height.unwrap_or(Self::DEFAULT_LINE_HEIGHT)
    }
}

/// Rendered extent of a text block.
#[derive(Debug, Clone, PartialEq)]
pub struct TextLayout {
    /// Visual lines after wrapping.
    pub lines: Vec<String>,
    /// Widest line in px; may exceed the wrap width for unbreakable words.
    pub width: f64,
    pub height: f64,
}

/// Measures text blocks.
pub trait TextMeasure {
    /// Lays out `lines` (explicit lines, each wrapped at `max_width`).
    fn measure(&self, lines: &[String], style: &TextStyle, max_width: f64) -> TextLayout;
}

/// Greedy word wrap over any single-run width function.
fn wrap_and_measure(
    lines: &[String],
    style: &TextStyle,
    max_width: f64,
    text_width: impl Fn(&str) -> f64,
) -> TextLayout {
    let mut wrapped = Vec::with_capacity(lines.len());
    for line in lines {
        let mut current = String::new();
        for word in line.split_whitespace() {
            if current.is_empty() {
                current.push_str(word);
                continue;
            }
            let candidate = format!("{} {}", current, word);
            if text_width(&candidate) <= max_width {
                current = candidate;
            } else {
                wrapped.push(std::mem::replace(&mut current, word.to_string()));
            }
        }
        wrapped.push(current);
    }
    let width = wrapped.iter().map(|l| text_width(l)).fold(0.0, f64::max);
    let height = wrapped.len() as f64 * style.line_height_px();
    TextLayout {
        lines: wrapped,
        width,
        height,
    }
}

static REGULAR_TTF: &[u8] = include_bytes!("../fonts/DejaVuSans.ttf");
static BOLD_TTF: &[u8] = include_bytes!("../fonts/DejaVuSans-Bold.ttf");

static BUNDLED: OnceLock<Option<FontMetrics>> = OnceLock::new();

/// Glyph metrics from real font faces, with kerning.
pub struct FontMetrics {
    regular: Font<'static>,
    bold: Font<'static>,
}

impl std::fmt::Debug for FontMetrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontMetrics")
            .field("regular_glyphs", &self.regular.glyph_count())
            .field("bold_glyphs", &self.bold.glyph_count())
            .finish()
    }
}

impl FontMetrics {
    /// Parses a regular and a bold face. `None` if either is not a font.
    pub fn from_bytes(regular: &'static [u8], bold: &'static [u8]) -> Option<Self> {
        Some(Self {
            regular: Font::try_from_bytes(regular)?,
            bold: Font::try_from_bytes(bold)?,
        })
    }

    /// The bundled DejaVu Sans faces, parsed once.
    pub fn bundled() -> Option<&'static FontMetrics> {
        BUNDLED
            .get_or_init(|| {
                let metrics = Self::from_bytes(REGULAR_TTF, BOLD_TTF);
                if metrics.is_none() {
                    log::warn!("Bundled fonts failed to parse, using advance table metrics");
                }
                metrics
            })
            .as_ref()
    }

    fn face(&self, style: &TextStyle) -> &Font<'static> {
        if style.is_bold() {
            &self.bold
        } else {
            &self.regular
        }
    }

    /// Width of a single run of text in px.
    pub fn text_width(&self, text: &str, style: &TextStyle) -> f64 {
        let font = self.face(style);
        // CSS sizes the em box; rusttype scales ascent to descent.
        let vm = font.v_metrics_unscaled();
        let units_per_em = font.units_per_em() as f32;
        if units_per_em <= 0.0 || vm.ascent - vm.descent <= 0.0 {
            return 0.0;
        }
        let px = style.font_size as f32 * (vm.ascent - vm.descent) / units_per_em;
        let scale = Scale::uniform(px);
        font.layout(text, scale, point(0.0, 0.0))
            .last()
            .map(|g| g.position().x + g.unpositioned().h_metrics().advance_width)
            .map_or(0.0, f64::from)
    }
}

impl TextMeasure for FontMetrics {
    fn measure(&self, lines: &[String], style: &TextStyle, max_width: f64) -> TextLayout {
        wrap_and_measure(lines, style, max_width, |t| self.text_width(t, style))
    }
}

/// The bundled font metrics, or the advance table when they are unavailable.
pub fn default_measure() -> &'static dyn TextMeasure {
    static FALLBACK: AdvanceMetrics = AdvanceMetrics;
    if let Some(metrics) = FontMetrics::bundled() {
        return metrics;
    }
    &FALLBACK
}

/// Advance widths per 1000 em for ASCII 32..=126.
const ADVANCES: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '../
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556, // 0..?
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, // @..O
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556, // P.._
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, // `..o
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584, // p..~
];

const DEFAULT_ADVANCE: u16 = 556;
const WIDE_ADVANCE: u16 = 1000;
const BOLD_SCALE: f64 = 1.07;

/// Table-driven Helvetica-like metrics.
#[derive(Debug, Clone, Copy, Default)]
pub struct AdvanceMetrics;

impl AdvanceMetrics {
    pub fn new() -> Self {
        Self
    }

    fn advance(c: char) -> u16 {
        match c as u32 {
            code @ 32..=126 => ADVANCES[(code - 32) as usize],
            // CJK, Hangul and fullwidth forms
            0x1100..=0x115F | 0x2E80..=0xA4CF | 0xAC00..=0xD7A3 | 0xF900..=0xFAFF | 0xFF00..=0xFF60 => {
                WIDE_ADVANCE
            }
            _ if c.is_control() => 0,
            _ => DEFAULT_ADVANCE,
        }
    }

    /// Width of a single run of text in px.
    pub fn text_width(&self, text: &str, style: &TextStyle) -> f64 {
        let units: u32 = text.chars().map(|c| Self::advance(c) as u32).sum();
        let scale = if style.is_bold() { BOLD_SCALE } else { 1.0 };
        units as f64 / 1000.0 * style.font_size * scale
    }
}

impl TextMeasure for AdvanceMetrics {
    fn measure(&self, lines: &[String], style: &TextStyle, max_width: f64) -> TextLayout {
        wrap_and_measure(lines, style, max_width, |t| self.text_width(t, style))
    }
}
