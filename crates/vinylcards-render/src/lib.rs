//! vinylcards Card Renderer
//!
//! This crate turns a list of [`Entry`](vinylcards_spec::Entry) records and a
//! [`LayoutConfig`](vinylcards_spec::LayoutConfig) into printable pages of
//! music quiz cards. Fronts carry artist, year and title; backs carry a QR
//! code over a procedurally generated vinyl groove background.
//!
//! # Features
//!
//! - **Groove generator**: concentric gapped rings as standalone SVG
//! - **Text fitting**: shrink-to-fit sizing behind a pluggable [`TextMeasure`]
//! - **Pagination**: grid layout with row-mirrored back pages for duplex print
//! - **Progress variant**: the same layout as an `async fn` that yields
//!   between pages and reports progress
//! - **Documents**: pages serialized into one printable HTML file
//!
//! # Example
//!
//! ```
//! use vinylcards_render::{render_document, DeterministicRng, LayoutEngine};
//! use vinylcards_spec::{Entry, LayoutConfig};
//!
//! let config = LayoutConfig::default();
//! let entries = vec![Entry::new("Queen", "Bohemian Rhapsody", "1975", "https://example.com/q")];
//!
//! let engine = LayoutEngine::new(&config);
//! let pages = engine.layout_pages(&entries, &mut DeterministicRng::new(42));
//! assert_eq!(pages.len(), 2);
//!
//! let html = render_document(&pages, &config);
//! assert!(html.contains("Queen"));
//! ```
//!
//! # Determinism
//!
//! All randomness is drawn from a [`RandomSource`]. With a seeded
//! [`DeterministicRng`] the same entries and configuration render the same
//! pages.

pub mod card;
pub mod color;
pub mod document;
pub mod groove;
pub mod layout;
pub mod metrics;
pub mod preview;
pub mod progress;
pub mod qr;
pub mod rng;
pub mod svg;
pub mod text_fit;

pub use card::{BackCard, Card, CardBuilder, CardMetrics, FrontCard, QrLogo, TokenCard};
pub use document::{render_document, render_preview_document};
pub use groove::{dash_pattern, generate_groove_image, GrooveGap, GrooveImage, GrooveRing};
pub use layout::{mirror_rows, truncate_for_screen, Grid, LayoutEngine, Page, PageKind};
pub use metrics::{
    default_measure, AdvanceMetrics, FontMetrics, TextLayout, TextMeasure, TextStyle,
};
pub use preview::PreviewPair;
pub use progress::layout_pages_with_progress;
pub use qr::QrMatrix;
pub use rng::{DeterministicRng, RandomSource, SequenceRng};
pub use text_fit::{fit_text, FittedText, TextRole};
