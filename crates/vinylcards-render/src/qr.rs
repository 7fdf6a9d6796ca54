//! QR code matrices for card backs.

use std::fmt::Write;

use qrcode::types::Color;
use qrcode::{EcLevel, QrCode};

use crate::svg::num;

/// A square grid of QR modules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrMatrix {
    width: usize,
    dark: Vec<bool>,
}

impl QrMatrix {
    /// Encodes `data` at error-correction level H so a logo badge can cover
    /// the center.
    ///
    /// Returns `None` for blank data and for payloads too large to encode.
    pub fn encode(data: &str) -> Option<Self> {
        if data.trim().is_empty() {
            return None;
        }
        match QrCode::with_error_correction_level(data.as_bytes(), EcLevel::H) {
            Ok(code) => Some(Self {
                width: code.width(),
                dark: code
                    .to_colors()
                    .into_iter()
                    .map(|c| c == Color::Dark)
                    .collect(),
            }),
            Err(e) => {
                log::warn!("Skipping QR code for {}-byte payload: {}", data.len(), e);
                None
            }
        }
    }

    /// Modules per side.
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn is_dark(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.width && self.dark[y * self.width + x]
    }

    pub fn dark_count(&self) -> usize {
        self.dark.iter().filter(|d| **d).count()
    }

    /// Path data drawing every dark module as a unit square, with horizontal
    /// runs merged.
    pub fn to_path_data(&self) -> String {
        let mut d = String::new();
        for y in 0..self.width {
            let mut x = 0;
            while x < self.width {
                if !self.is_dark(x, y) {
                    x += 1;
                    continue;
                }
                let start = x;
                while x < self.width && self.is_dark(x, y) {
                    x += 1;
                }
                let _ = write!(d, "M{} {}h{}v1h-{}z", start, y, x - start, x - start);
            }
        }
        d
    }

    /// A `<g>` placing the code at (`x`, `y`) scaled to `size` units, on a
    /// white backing square.
    pub fn to_svg_group(&self, x: f64, y: f64, size: f64) -> String {
        let scale = size / self.width.max(1) as f64;
        format!(
            r##"<g transform="translate({} {}) scale({})"><rect width="{w}" height="{w}" fill="#ffffff"/><path d="{}" fill="#000000" shape-rendering="crispEdges"/></g>"##,
            num(x),
            num(y),
            num(scale),
            self.to_path_data(),
            w = self.width,
        )
    }
}
