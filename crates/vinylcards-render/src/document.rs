//! Printable HTML documents.
//!
//! Pages become `.page-container` CSS grids of fixed-size card wrappers with
//! every card inlined as SVG, one printed sheet side per container.

use std::fmt::Write;

use vinylcards_spec::{LayoutConfig, PaperSize};

use crate::card::{Card, CardMetrics};
use crate::layout::{Page, PageKind};
use crate::preview::PreviewPair;
use crate::svg::num;

fn head(out: &mut String, paper: PaperSize, card_size_mm: f64) {
    let (sheet_w, sheet_h) = paper.sheet_mm();
    let (print_w, print_h) = paper.printable_mm();
    let margin_x = (sheet_w - print_w) / 2.0;
    let margin_y = (sheet_h - print_h) / 2.0;
    let card = num(card_size_mm);

    out.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n<title>vinylcards</title>\n<style>\n");
    let _ = writeln!(
        out,
        "@page {{ size: {} portrait; margin: {}mm {}mm; }}",
        paper,
        num(margin_y),
        num(margin_x)
    );
    out.push_str("body { margin: 0; font-family: 'DejaVu Sans', Helvetica, Arial, sans-serif; }\n");
    let _ = writeln!(
        out,
        ".page-container {{ display: grid; justify-content: center; align-content: start; width: {}mm; height: {}mm; break-after: page; page-break-after: always; }}",
        num(print_w),
        num(print_h)
    );
    out.push_str(".page-container:last-child { break-after: auto; page-break-after: auto; }\n");
    let _ = writeln!(
        out,
        ".card-wrapper {{ width: {card}mm; height: {card}mm; }}",
        card = card
    );
    out.push_str(".card-wrapper svg { display: block; width: 100%; height: 100%; }\n");
    out.push_str(".preview-pair { display: flex; gap: 8mm; padding: 8mm; }\n");
    out.push_str("</style>\n</head>\n<body>\n");
}

fn card_wrapper(out: &mut String, card: Option<&Card>, config: &LayoutConfig, metrics: &CardMetrics) {
    out.push_str("<div class=\"card-wrapper\">");
    if let Some(card) = card {
        out.push_str(&card.to_svg(&config.style, metrics));
    }
    out.push_str("</div>\n");
}

/// Serializes `pages` into one printable HTML document.
pub fn render_document(pages: &[Page], config: &LayoutConfig) -> String {
    let mut out = String::new();
    head(&mut out, config.paper, config.card_size_mm);

    for page in pages {
        let side = match page.kind {
            PageKind::Front => "front",
            PageKind::Back => "back",
        };
        let _ = writeln!(
            out,
            "<div class=\"page-container {} {}\" style=\"grid-template-columns: repeat({}, {}mm);\">",
            page.paper,
            side,
            page.grid.columns,
            num(page.card_size_mm)
        );
        let metrics = page.card_metrics();
        for slot in &page.slots {
            card_wrapper(&mut out, slot.as_ref(), config, &metrics);
        }
        out.push_str("</div>\n");
    }

    out.push_str("</body>\n</html>\n");
    out
}

/// Serializes a preview pair side by side.
pub fn render_preview_document(pair: &PreviewPair, config: &LayoutConfig) -> String {
    let mut out = String::new();
    head(&mut out, config.paper, config.card_size_mm);
    let metrics = CardMetrics::from_mm(config.card_size_mm);
    out.push_str("<div class=\"preview-pair\">\n");
    card_wrapper(&mut out, Some(&pair.front), config, &metrics);
    card_wrapper(&mut out, Some(&pair.back), config, &metrics);
    out.push_str("</div>\n</body>\n</html>\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::LayoutEngine;
    use crate::rng::DeterministicRng;
    use vinylcards_spec::Entry;

    fn entries(n: usize) -> Vec<Entry> {
        (0..n)
            .map(|i| Entry::new(format!("A{}", i), format!("T{}", i), "1990", format!("q{}", i)))
            .collect()
    }

    #[test]
    fn test_document_structure() {
        let config = LayoutConfig::default();
        let engine = LayoutEngine::new(&config);
        let pages = engine.layout_pages(&entries(5), &mut DeterministicRng::new(1));
        let html = render_document(&pages, &config);

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("@page { size: A4 portrait; margin: 10mm 10mm; }"));
        assert_eq!(html.matches("<div class=\"page-container").count(), 2);
        assert!(html.contains("grid-template-columns: repeat(4, 46mm);"));
        // 5 fronts plus 8 back slots (two rows, three of them empty).
        assert_eq!(html.matches("<div class=\"card-wrapper\">").count(), 13);
        assert_eq!(html.matches("<div class=\"card-wrapper\"></div>").count(), 3);
    }

    #[test]
    fn test_empty_document() {
        let config = LayoutConfig::default();
        let html = render_document(&[], &config);
        assert!(!html.contains("<div class=\"page-container"));
        assert!(html.ends_with("</html>\n"));
    }

    #[test]
    fn test_preview_document() {
        let config = LayoutConfig::default();
        let engine = LayoutEngine::new(&config);
        let entry = Entry::new("Nena", "99 Luftballons", "1983", "https://example.com/n");
        let pair = engine
            .render_preview_pair(Some(&entry), &mut DeterministicRng::new(3))
            .unwrap();
        let html = render_preview_document(&pair, &config);
        assert!(html.contains("preview-pair"));
        assert!(html.contains("99 Luftballons"));
        assert!(html.contains("qr-container"));
    }
}
