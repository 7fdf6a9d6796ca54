//! Card views and their SVG rendering.
//!
//! Cards are built once per layout by [`CardBuilder`], which fits text and
//! draws fresh groove geometry, and are rendered to SVG on demand. Card
//! coordinates are CSS px at 96 dpi.

use std::fmt::Write;

use vinylcards_spec::{CardStyle, CodePosition, Entry, Glow, LayoutConfig};

use crate::color::rgba_css;
use crate::groove::{generate_groove_image, GrooveImage, CANVAS};
use crate::metrics::{TextMeasure, TextStyle, BOLD_WEIGHT, NORMAL_WEIGHT};
use crate::qr::QrMatrix;
use crate::rng::RandomSource;
use crate::svg::{escape, mm_to_px, num};
use crate::text_fit::{fit_text, FittedText, TextRole};

/// Share of the card width available to text.
pub const TEXT_BOX_RATIO: f64 = 0.88;
/// Share of the card edge covered by the QR code.
const QR_RATIO: f64 = 0.5;
/// Logo badge edge as a share of the QR edge.
const LOGO_RATIO: f64 = 0.24;
/// Characters shown in the logo badge.
const LOGO_CHARS: usize = 3;
const FONT_FAMILY: &str = "'DejaVu Sans', Helvetica, Arial, sans-serif";
const TEXT_FILL: &str = "#000000";

/// Pixel geometry of one card.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardMetrics {
    pub size_px: f64,
    pub text_width_px: f64,
}

impl CardMetrics {
    pub fn from_mm(card_size_mm: f64) -> Self {
        let size_px = mm_to_px(card_size_mm);
        Self {
            size_px,
            text_width_px: size_px * TEXT_BOX_RATIO,
        }
    }
}

/// Text side of a music card.
#[derive(Debug, Clone, PartialEq)]
pub struct FrontCard {
    pub entry_index: usize,
    pub artist: FittedText,
    pub year: String,
    pub title: FittedText,
    pub code1: Option<String>,
    pub code2: Option<String>,
}

/// The logo badge drawn over the QR center.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrLogo {
    pub text: String,
    pub rounded: bool,
    pub inverted: bool,
}

/// Groove side of a music card.
#[derive(Debug, Clone, PartialEq)]
pub struct BackCard {
    pub entry_index: usize,
    pub groove: GrooveImage,
    pub qr: Option<QrMatrix>,
    pub logo: Option<QrLogo>,
}

/// A token card face: groove background with the shared token text.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenCard {
    pub groove: GrooveImage,
    pub main: FittedText,
    pub sub: Option<FittedText>,
    /// Drawn without a border regardless of the border mode.
    pub borderless: bool,
}

/// One slot on a page.
#[derive(Debug, Clone, PartialEq)]
pub enum Card {
    Front(FrontCard),
    Back(BackCard),
    TokenFront(TokenCard),
    TokenBack(TokenCard),
}

impl Card {
    /// Index of the entry this card shows, if any.
    pub fn entry_index(&self) -> Option<usize> {
        match self {
            Card::Front(c) => Some(c.entry_index),
            Card::Back(c) => Some(c.entry_index),
            Card::TokenFront(_) | Card::TokenBack(_) => None,
        }
    }

    pub fn is_back(&self) -> bool {
        matches!(self, Card::Back(_) | Card::TokenBack(_))
    }

    /// CSS class list of the card wrapper.
    pub fn css_class(&self) -> &'static str {
        match self {
            Card::Front(_) => "card front",
            Card::Back(_) => "card back",
            Card::TokenFront(_) => "card token front",
            Card::TokenBack(_) => "card token back",
        }
    }

    /// Renders the card as a standalone SVG of `metrics.size_px` square.
    pub fn to_svg(&self, style: &CardStyle, metrics: &CardMetrics) -> String {
        let size = metrics.size_px;
        let mut svg = format!(
            r#"<svg class="{}" width="{s}" height="{s}" viewBox="0 0 {s} {s}" xmlns="http://www.w3.org/2000/svg" font-family="{}">"#,
            self.css_class(),
            FONT_FAMILY,
            s = num(size),
        );
        svg.push_str(&format!(
            r##"<rect width="{s}" height="{s}" fill="#ffffff"/>"##,
            s = num(size)
        ));

        match self {
            Card::Front(card) => write_front(&mut svg, card, style, size),
            Card::Back(card) => write_back(&mut svg, card, style, size),
            Card::TokenFront(card) | Card::TokenBack(card) => write_token(&mut svg, card, size),
        }

        let border = match self {
            Card::Front(_) | Card::TokenFront(_) => style.border_mode.draws_front(),
            Card::Back(_) => style.border_mode.draws_back(),
            Card::TokenBack(card) => !card.borderless && style.border_mode.draws_back(),
        };
        if border {
            let _ = write!(
                svg,
                r#"<rect x="0.5" y="0.5" width="{s}" height="{s}" fill="none" stroke="{}" stroke-width="1"/>"#,
                escape(&rgba_css(&style.border_color, style.border_opacity)),
                s = num(size - 1.0),
            );
        }

        svg.push_str("</svg>");
        svg
    }
}

/// Builds card views for one layout configuration.
pub struct CardBuilder<'a> {
    config: &'a LayoutConfig,
    measure: &'a dyn TextMeasure,
    metrics: CardMetrics,
}

impl<'a> CardBuilder<'a> {
    pub fn new(config: &'a LayoutConfig, measure: &'a dyn TextMeasure) -> Self {
        Self {
            config,
            measure,
            metrics: CardMetrics::from_mm(config.card_size_mm),
        }
    }

    pub fn metrics(&self) -> CardMetrics {
        self.metrics
    }

    fn fit(&self, text: &str, role: TextRole, style: TextStyle) -> FittedText {
        fit_text(
            text,
            role,
            &style,
            self.metrics.text_width_px,
            self.config.max_lines,
            self.measure,
        )
    }

    /// The text side for `entry`; artist and title are fitted.
    pub fn front(&self, entry_index: usize, entry: &Entry) -> Card {
        let style = &self.config.style;
        Card::Front(FrontCard {
            entry_index,
            artist: self.fit(
                &entry.artist,
                TextRole::Body,
                TextStyle::new(style.artist_font_px).with_weight(style.artist_font_weight()),
            ),
            year: entry.year.clone(),
            title: self.fit(
                &entry.title,
                TextRole::Title,
                TextStyle::new(style.title_font_px).with_weight(style.title_font_weight()),
            ),
            code1: entry.visible_code1().map(str::to_string),
            code2: entry.visible_code2().map(str::to_string),
        })
    }

    /// The groove side for `entry`, with a QR code when enabled and the
    /// payload is encodable.
    pub fn back(&self, entry_index: usize, entry: &Entry, rng: &mut dyn RandomSource) -> Card {
        let groove = generate_groove_image(&self.config.groove, rng);
        let qr_config = &self.config.qr;
        let qr = if qr_config.show {
            QrMatrix::encode(&entry.qr_data)
        } else {
            None
        };
        let logo_text: String = qr_config.logo_text.trim().chars().take(LOGO_CHARS).collect();
        let logo = (qr.is_some() && !logo_text.is_empty()).then(|| QrLogo {
            text: logo_text,
            rounded: qr_config.logo_rounded,
            inverted: qr_config.logo_inverted,
        });
        Card::Back(BackCard {
            entry_index,
            groove,
            qr,
            logo,
        })
    }

    fn token(&self, rng: &mut dyn RandomSource) -> TokenCard {
        let style = &self.config.style;
        let token = &self.config.token;
        let groove = generate_groove_image(&self.config.groove, rng);
        let main = self.fit(
            &token.main_text,
            TextRole::Body,
            TextStyle::new(style.token_main_font_px).with_weight(BOLD_WEIGHT),
        );
        let sub = (!token.sub_text.is_empty()).then(|| {
            self.fit(
                &token.sub_text,
                TextRole::Body,
                TextStyle::new(style.token_sub_font_px),
            )
        });
        TokenCard {
            groove,
            main,
            sub,
            borderless: false,
        }
    }

    pub fn token_front(&self, rng: &mut dyn RandomSource) -> Card {
        Card::TokenFront(self.token(rng))
    }

    /// A token back following the border mode, as shown in previews.
    pub fn token_back(&self, rng: &mut dyn RandomSource) -> Card {
        Card::TokenBack(self.token(rng))
    }

    /// A token back for a printed back page; never bordered.
    pub fn page_token_back(&self, rng: &mut dyn RandomSource) -> Card {
        Card::TokenBack(TokenCard {
            borderless: true,
            ..self.token(rng)
        })
    }
}

// =============================================================================
// SVG bodies
// =============================================================================

#[derive(Debug, Clone, Copy)]
enum Anchor {
    Top,
    Middle,
    Bottom,
}

struct TextSpec<'t> {
    lines: &'t [String],
    font_size: f64,
    line_height: f64,
    weight: u16,
    glow: Option<&'t Glow>,
}

fn glow_style(glow: Option<&Glow>) -> String {
    glow.map(|g| {
        format!(
            r#" style="filter: drop-shadow(0 0 {}px {});""#,
            num(g.blur),
            escape(&g.color)
        )
    })
    .unwrap_or_default()
}

fn write_text(out: &mut String, text: &TextSpec<'_>, cx: f64, y: f64, anchor: Anchor) {
    if text.lines.iter().all(|l| l.is_empty()) {
        return;
    }
    let height = text.lines.len() as f64 * text.line_height;
    let top = match anchor {
        Anchor::Top => y,
        Anchor::Middle => y - height / 2.0,
        Anchor::Bottom => y - height,
    };
    let _ = write!(
        out,
        r#"<text x="{}" font-size="{}" font-weight="{}" fill="{}" text-anchor="middle" dominant-baseline="central"{}>"#,
        num(cx),
        num(text.font_size),
        text.weight,
        TEXT_FILL,
        glow_style(text.glow),
    );
    for (i, line) in text.lines.iter().enumerate() {
        let _ = write!(
            out,
            r#"<tspan x="{}" y="{}">{}</tspan>"#,
            num(cx),
            num(top + text.line_height * (i as f64 + 0.5)),
            escape(line)
        );
    }
    out.push_str("</text>");
}

fn line_spec<'t>(lines: &'t [String], style: TextStyle, glow: Option<&'t Glow>) -> TextSpec<'t> {
    TextSpec {
        lines,
        font_size: style.font_size,
        line_height: style.line_height_px(),
        weight: style.weight,
        glow,
    }
}

fn fitted_spec<'t>(fitted: &'t FittedText, weight: u16, glow: Option<&'t Glow>) -> TextSpec<'t> {
    TextSpec {
        lines: &fitted.lines,
        font_size: fitted.font_size,
        line_height: fitted.line_height,
        weight,
        glow,
    }
}

fn write_front(out: &mut String, card: &FrontCard, style: &CardStyle, size: f64) {
    let cx = size / 2.0;
    let margin = size * (1.0 - TEXT_BOX_RATIO) / 2.0;

    write_text(
        out,
        &fitted_spec(&card.artist, style.artist_font_weight(), style.artist_glow.as_ref()),
        cx,
        margin,
        Anchor::Top,
    );

    let year = [card.year.clone()];
    let year_style = TextStyle::new(style.year_font_px).with_weight(style.year_font_weight());
    write_text(
        out,
        &line_spec(&year, year_style, style.year_glow.as_ref()),
        cx,
        size / 2.0,
        Anchor::Middle,
    );

    write_text(
        out,
        &fitted_spec(&card.title, style.title_font_weight(), style.title_glow.as_ref()),
        cx,
        size - margin,
        Anchor::Bottom,
    );

    let code_style = TextStyle::new(style.code_font_px).with_weight(style.code_font_weight());
    match style.code_position {
        CodePosition::Center => {
            let joined: Vec<&str> = [card.code1.as_deref(), card.code2.as_deref()]
                .into_iter()
                .flatten()
                .collect();
            if !joined.is_empty() {
                let line = [joined.join("  ")];
                let y = size / 2.0 + style.year_font_px * 0.5 + code_style.line_height_px() * 0.5;
                write_text(out, &line_spec(&line, code_style, None), cx, y, Anchor::Top);
            }
        }
        CodePosition::Corner => {
            let pad = margin / 2.0;
            if let Some(code) = &card.code1 {
                let y = pad + code_style.font_size / 2.0;
                write_corner_code(out, code, &code_style, pad, y, "start");
            }
            if let Some(code) = &card.code2 {
                let y = size - pad - code_style.font_size / 2.0;
                write_corner_code(out, code, &code_style, size - pad, y, "end");
            }
        }
    }
}

fn write_corner_code(out: &mut String, code: &str, text: &TextStyle, x: f64, y: f64, anchor: &str) {
    let _ = write!(
        out,
        r#"<text x="{}" y="{}" font-size="{}" font-weight="{}" fill="{}" text-anchor="{}" dominant-baseline="central">{}</text>"#,
        num(x),
        num(y),
        num(text.font_size),
        text.weight,
        TEXT_FILL,
        anchor,
        escape(code),
    );
}

fn write_groove(out: &mut String, groove: &GrooveImage, size: f64) {
    let _ = write!(
        out,
        r#"<svg class="vinyl-bg" width="{s}" height="{s}" viewBox="0 0 {c} {c}">"#,
        s = num(size),
        c = num(CANVAS),
    );
    groove.write_rings(out);
    out.push_str("</svg>");
}

fn write_back(out: &mut String, card: &BackCard, style: &CardStyle, size: f64) {
    write_groove(out, &card.groove, size);

    let Some(qr) = &card.qr else {
        return;
    };
    let qr_size = size * QR_RATIO;
    let origin = (size - qr_size) / 2.0;
    let _ = write!(out, r#"<g class="qr-container"{}>"#, glow_style(style.qr_glow.as_ref()));
    out.push_str(&qr.to_svg_group(origin, origin, qr_size));
    out.push_str("</g>");

    if let Some(logo) = &card.logo {
        let badge = qr_size * LOGO_RATIO;
        let x = (size - badge) / 2.0;
        let (bg, fg) = if logo.inverted {
            ("#000000", "#ffffff")
        } else {
            ("#ffffff", "#000000")
        };
        let radius = if logo.rounded { badge / 2.0 } else { badge * 0.1 };
        let _ = write!(
            out,
            r#"<g class="qr-logo-overlay"><rect x="{x}" y="{x}" width="{b}" height="{b}" rx="{r}" fill="{}"/><text x="{c}" y="{c}" font-size="{}" font-weight="700" fill="{}" text-anchor="middle" dominant-baseline="central">{}</text></g>"#,
            bg,
            num(badge * 0.4),
            fg,
            escape(&logo.text),
            x = num(x),
            b = num(badge),
            r = num(radius),
            c = num(size / 2.0),
        );
    }
}

fn write_token(out: &mut String, card: &TokenCard, size: f64) {
    write_groove(out, &card.groove, size);
    let cx = size / 2.0;
    let main = fitted_spec(&card.main, BOLD_WEIGHT, None);
    match &card.sub {
        Some(sub) => {
            let gap = sub.line_height * 0.25;
            let total = card.main.height + gap + sub.height;
            let top = size / 2.0 - total / 2.0;
            write_text(out, &main, cx, top, Anchor::Top);
            write_text(
                out,
                &fitted_spec(sub, NORMAL_WEIGHT, None),
                cx,
                top + card.main.height + gap,
                Anchor::Top,
            );
        }
        None => write_text(out, &main, cx, size / 2.0, Anchor::Middle),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::AdvanceMetrics;
    use crate::rng::DeterministicRng;
    use vinylcards_spec::{BorderMode, EntrySource, QrConfig};

    fn song() -> Entry {
        Entry::new("Queen", "Bohemian Rhapsody", "1975", "https://example.com/q").with_codes("A1", "B2")
    }

    #[test]
    fn test_metrics_from_mm() {
        let m = CardMetrics::from_mm(25.4);
        assert!((m.size_px - 96.0).abs() < 1e-9);
        assert!((m.text_width_px - 84.48).abs() < 1e-9);
    }

    #[test]
    fn test_front_card_fields() {
        let config = LayoutConfig::default();
        let builder = CardBuilder::new(&config, &AdvanceMetrics);
        let Card::Front(front) = builder.front(3, &song()) else {
            panic!("expected a front card");
        };
        assert_eq!(front.entry_index, 3);
        assert_eq!(front.year, "1975");
        assert_eq!(front.title.lines, vec!["Bohemian Rhapsody".to_string()]);
        assert_eq!(front.code1.as_deref(), Some("A1"));
        assert_eq!(front.code2.as_deref(), Some("B2"));
    }

    #[test]
    fn test_spotify_front_has_no_codes() {
        let config = LayoutConfig::default();
        let builder = CardBuilder::new(&config, &AdvanceMetrics);
        let card = builder.front(0, &song().with_source(EntrySource::Spotify));
        let svg = card.to_svg(&config.style, &builder.metrics());
        assert!(!svg.contains("A1"));
        assert!(svg.contains("Queen"));
    }

    #[test]
    fn test_back_card_qr_and_logo() {
        let config = LayoutConfig::default().with_qr(QrConfig {
            logo_text: "HITS".to_string(),
            logo_rounded: true,
            ..Default::default()
        });
        let builder = CardBuilder::new(&config, &AdvanceMetrics);
        let mut rng = DeterministicRng::new(1);
        let Card::Back(back) = builder.back(0, &song(), &mut rng) else {
            panic!("expected a back card");
        };
        assert!(back.qr.is_some());
        assert_eq!(back.logo.as_ref().map(|l| l.text.as_str()), Some("HIT"));
        assert!(!back.groove.rings.is_empty());
    }

    #[test]
    fn test_back_card_without_qr() {
        let hidden = LayoutConfig::default().with_qr(QrConfig {
            show: false,
            logo_text: "HIT".to_string(),
            ..Default::default()
        });
        let builder = CardBuilder::new(&hidden, &AdvanceMetrics);
        let mut rng = DeterministicRng::new(1);
        let Card::Back(back) = builder.back(0, &song(), &mut rng) else {
            panic!("expected a back card");
        };
        assert!(back.qr.is_none());
        assert!(back.logo.is_none());

        let config = LayoutConfig::default();
        let builder = CardBuilder::new(&config, &AdvanceMetrics);
        let empty = Entry::new("A", "B", "2000", "");
        let card = builder.back(0, &empty, &mut rng);
        let svg = card.to_svg(&config.style, &builder.metrics());
        assert!(!svg.contains("qr-container"));
        assert!(svg.contains("vinyl-bg"));
    }

    #[test]
    fn test_border_modes() {
        let config = LayoutConfig::default();
        let builder = CardBuilder::new(&config, &AdvanceMetrics);
        let mut rng = DeterministicRng::new(2);
        let front = builder.front(0, &song());
        let back = builder.back(0, &song(), &mut rng);
        let preview_token_back = builder.token_back(&mut rng);
        let page_token_back = builder.page_token_back(&mut rng);
        let metrics = builder.metrics();
        let stroke = r#"stroke="rgba(0,0,0,1)""#;

        let front_only = config.style.clone().with_border("#000000", 100.0, BorderMode::Front);
        assert!(front.to_svg(&front_only, &metrics).contains(stroke));
        assert!(!back.to_svg(&front_only, &metrics).contains(stroke));
        assert!(back.to_svg(&config.style, &metrics).contains(stroke));
        assert!(preview_token_back.to_svg(&config.style, &metrics).contains(stroke));
        assert!(!preview_token_back.to_svg(&front_only, &metrics).contains(stroke));
        assert!(!page_token_back.to_svg(&config.style, &metrics).contains(stroke));
    }

    #[test]
    fn test_token_cards() {
        let config = LayoutConfig::default().with_token("JOKER", "");
        let builder = CardBuilder::new(&config, &AdvanceMetrics);
        let mut rng = DeterministicRng::new(4);
        let Card::TokenFront(token) = builder.token_front(&mut rng) else {
            panic!("expected a token front");
        };
        assert_eq!(token.main.lines, vec!["JOKER".to_string()]);
        assert!(token.sub.is_none());

        let config = config.with_token("JOKER", "double points");
        let builder = CardBuilder::new(&config, &AdvanceMetrics);
        let card = builder.token_back(&mut rng);
        assert!(card.is_back());
        assert_eq!(card.entry_index(), None);
        assert!(card.to_svg(&config.style, &builder.metrics()).contains("double points"));
    }

    #[test]
    fn test_custom_weights() {
        let mut style = CardStyle::default().with_weights(Some(300), None, Some(900));
        style.bold_title = true;
        let config = LayoutConfig::default().with_style(style);
        let builder = CardBuilder::new(&config, &AdvanceMetrics);
        let svg = builder.front(0, &song()).to_svg(&config.style, &builder.metrics());
        assert!(svg.contains(r#"font-weight="900""#));
        assert!(svg.contains(r#"font-weight="300""#));
        assert!(!svg.contains(r#"font-weight="700""#));
        // Artist and codes stay regular.
        assert_eq!(svg.matches(r#"font-weight="400""#).count(), 2);
    }

    #[test]
    fn test_text_is_escaped() {
        let config = LayoutConfig::default();
        let builder = CardBuilder::new(&config, &AdvanceMetrics);
        let entry = Entry::new("Simon & Garfunkel", "<Mrs. Robinson>", "1968", "");
        let svg = builder.front(0, &entry).to_svg(&config.style, &builder.metrics());
        assert!(svg.contains("Simon &amp; Garfunkel"));
        assert!(svg.contains("&lt;Mrs. Robinson&gt;"));
    }
}
