//! vinylcards Data Model
//!
//! This crate provides the value types shared by the card renderer and the
//! command-line interface: the [`Entry`] records printed on cards and the
//! [`LayoutConfig`] snapshot describing paper, card size, groove styling and
//! token mode.
//!
//! # Lenient configuration
//!
//! Configuration is usually assembled from loosely typed sources (form
//! controls, hand-written JSON or YAML). Every numeric field therefore accepts
//! numbers or numeric strings, and anything missing or malformed falls back to
//! a documented default. Deserialization of [`LayoutConfig`] and
//! [`GrooveConfig`] never fails on field values; use
//! [`LayoutSettings::resolve`] when the fallbacks should be reported.
//!
//! # Example
//!
//! ```
//! use vinylcards_spec::{LayoutConfig, PaperSize};
//!
//! let config = LayoutConfig::from_json_str(r#"{
//!     "paper": "A4",
//!     "card_size_mm": "46",
//!     "groove": { "spacing": "not a number", "ring_count": 8 }
//! }"#).unwrap();
//!
//! assert_eq!(config.paper, PaperSize::A4);
//! assert_eq!(config.card_size_mm, 46.0);
//! assert_eq!(config.groove.spacing, 2.5);
//! assert_eq!(config.groove.ring_count, 8);
//! ```

pub mod config;
pub mod entry;
pub mod error;
pub mod lenient;
pub mod style;

pub use config::{
    AngleMode, GrooveConfig, GrooveSettings, LayoutConfig, LayoutSettings, PaperSize, QrConfig,
    QrSettings, RenderMode, Resolved, TokenConfig, TokenSettings, MAX_GAP_COUNT, MAX_LINES,
    MAX_RING_COUNT, MIN_CARD_SIZE_MM,
};
pub use entry::{Entry, EntrySource};
pub use error::{ConfigError, ConfigWarning};
pub use style::{
    font_weight, BorderMode, CardStyle, CodePosition, Glow, GlowSettings, StyleSettings,
    MAX_FONT_WEIGHT, MIN_FONT_WEIGHT,
};
