//! Entry records: one printable song or token per front/back card pair.

use serde::{Deserialize, Serialize};

use crate::lenient;

/// Where an entry came from.
///
/// Provenance only matters for one rendering rule: entries imported from
/// Spotify never show their auxiliary codes, because the importer fills them
/// with internal identifiers rather than printable codes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntrySource {
    Spotify,
    Youtube,
    Spreadsheet,
    Manual,
    /// Any tag this crate does not know about.
    #[serde(other)]
    Other,
}

/// One card's content.
///
/// All text fields are display strings: the year is not validated as a
/// number, and empty strings render as empty fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    #[serde(default, deserialize_with = "lenient::string")]
    pub artist: String,

    #[serde(default, deserialize_with = "lenient::string")]
    pub title: String,

    #[serde(default, deserialize_with = "lenient::string")]
    pub year: String,

    /// Payload encoded into the back-side QR code.
    #[serde(default, alias = "qrData", deserialize_with = "lenient::string")]
    pub qr_data: String,

    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::opt_string"
    )]
    pub code1: Option<String>,

    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::opt_string"
    )]
    pub code2: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<EntrySource>,
}

impl Entry {
    /// Creates an entry with the three main text fields and a QR payload.
    pub fn new(
        artist: impl Into<String>,
        title: impl Into<String>,
        year: impl Into<String>,
        qr_data: impl Into<String>,
    ) -> Self {
        Self {
            artist: artist.into(),
            title: title.into(),
            year: year.into(),
            qr_data: qr_data.into(),
            ..Default::default()
        }
    }

    /// Sets the auxiliary codes.
    pub fn with_codes(mut self, code1: impl Into<String>, code2: impl Into<String>) -> Self {
        self.code1 = Some(code1.into());
        self.code2 = Some(code2.into());
        self
    }

    /// Sets the provenance tag.
    pub fn with_source(mut self, source: EntrySource) -> Self {
        self.source = Some(source);
        self
    }

    /// Whether auxiliary codes may be printed for this entry.
    pub fn shows_codes(&self) -> bool {
        self.source != Some(EntrySource::Spotify)
    }

    /// The first auxiliary code, if it should be printed.
    pub fn visible_code1(&self) -> Option<&str> {
        self.visible_code(self.code1.as_deref())
    }

    /// The second auxiliary code, if it should be printed.
    pub fn visible_code2(&self) -> Option<&str> {
        self.visible_code(self.code2.as_deref())
    }

    fn visible_code<'a>(&self, code: Option<&'a str>) -> Option<&'a str> {
        code.filter(|c| !c.is_empty() && self.shows_codes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spotify_entries_hide_codes() {
        let entry = Entry::new("A", "B", "1999", "x")
            .with_codes("C1", "C2")
            .with_source(EntrySource::Spotify);
        assert!(!entry.shows_codes());
        assert_eq!(entry.visible_code1(), None);
        assert_eq!(entry.visible_code2(), None);
    }

    #[test]
    fn test_other_sources_show_non_empty_codes() {
        let entry = Entry::new("A", "B", "1999", "x")
            .with_codes("C1", "")
            .with_source(EntrySource::Youtube);
        assert_eq!(entry.visible_code1(), Some("C1"));
        assert_eq!(entry.visible_code2(), None);

        let untagged = Entry::new("A", "B", "1999", "x").with_codes("C1", "C2");
        assert_eq!(untagged.visible_code2(), Some("C2"));
    }

    #[test]
    fn test_deserialize_loose_record() {
        let json = r#"{
            "artist": "Queen",
            "title": "Bohemian Rhapsody",
            "year": 1975,
            "qrData": "https://example.com/track",
            "code1": 17,
            "source": "discogs"
        }"#;
        let entry: Entry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.year, "1975");
        assert_eq!(entry.qr_data, "https://example.com/track");
        assert_eq!(entry.code1.as_deref(), Some("17"));
        assert_eq!(entry.code2, None);
        assert_eq!(entry.source, Some(EntrySource::Other));
    }

    #[test]
    fn test_missing_fields_default_to_empty() {
        let entry: Entry = serde_json::from_str(r#"{"title": "Only a title"}"#).unwrap();
        assert_eq!(entry.artist, "");
        assert_eq!(entry.year, "");
        assert_eq!(entry.qr_data, "");
        assert!(entry.shows_codes());
    }
}
