//! Shrink-to-fit text sizing.

use crate::metrics::{TextMeasure, TextStyle};

/// Smallest font size the fitter shrinks to.
pub const MIN_FONT_SIZE: f64 = 4.0;
/// Shrink step in px.
pub const FONT_STEP: f64 = 0.5;

/// Titles longer than this many characters may be split onto two lines.
const TITLE_SPLIT_CHARS: usize = 15;

/// What a text field holds. Titles get balanced two-line splitting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextRole {
    Body,
    Title,
}

/// A text field sized to its box.
#[derive(Debug, Clone, PartialEq)]
pub struct FittedText {
    pub lines: Vec<String>,
    pub font_size: f64,
    /// Line height in px at the fitted size.
    pub line_height: f64,
    pub width: f64,
    pub height: f64,
    /// The text still exceeds its box at the minimum size.
    pub overflow: bool,
}

impl FittedText {
    pub fn is_empty(&self) -> bool {
        self.lines.iter().all(|l| l.is_empty())
    }
}

/// Splits text into explicit lines before wrapping.
///
/// Line breaks in the text are honored as-is. Otherwise a long title of more
/// than two words is broken after the first half of its words.
pub fn explicit_lines(text: &str, role: TextRole) -> Vec<String> {
    if text.contains('\n') || text.contains('\r') {
        return text
            .replace("\r\n", "\n")
            .split('\n')
            .map(|l| l.replace('\r', " "))
            .collect();
    }

    if role == TextRole::Title && text.chars().count() > TITLE_SPLIT_CHARS {
        let words: Vec<&str> = text.split(' ').collect();
        if words.len() > 2 {
            let split_at = (words.len() + 1) / 2;
            return vec![words[..split_at].join(" "), words[split_at..].join(" ")];
        }
    }

    vec![text.to_string()]
}

/// Shrinks `text` from the base font size in half-pixel steps until it fits
/// `max_lines` lines and `max_width` px, or the minimum size is reached.
///
/// The height limit is fixed from the base size.
pub fn fit_text(
    text: &str,
    role: TextRole,
    base: &TextStyle,
    max_width: f64,
    max_lines: u32,
    measure: &dyn TextMeasure,
) -> FittedText {
    let lines = explicit_lines(text, role);
    let max_height = base.line_height_px() * (max_lines as f64 + 0.1);

    let mut style = *base;
    let mut layout = measure.measure(&lines, &style, max_width);
    let exceeds = |height: f64, width: f64| height > max_height || width > max_width;

    while exceeds(layout.height, layout.width) && style.font_size > MIN_FONT_SIZE {
        style.font_size = (style.font_size - FONT_STEP).max(MIN_FONT_SIZE);
        layout = measure.measure(&lines, &style, max_width);
    }

    FittedText {
        overflow: exceeds(layout.height, layout.width),
        lines: layout.lines,
        font_size: style.font_size,
        line_height: style.line_height_px(),
        width: layout.width,
        height: layout.height,
    }
}
