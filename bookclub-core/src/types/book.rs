//! The locally persisted book record

use super::raw::VolumeInfo;
use super::unified::UNKNOWN_TITLE;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Maximum length of the derived short description, in characters
pub const SHORT_DESCRIPTION_LEN: usize = 200;

/// A book materialized from the catalog provider.
///
/// Created once per external identifier and never changed afterwards,
/// except for `ai_summary`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedBook {
    /// Internal identifier
    pub id: Uuid,

    /// Catalog provider identifier (unique)
    pub external_id: String,

    pub title: String,

    pub authors: Vec<String>,

    pub published_date: Option<String>,

    pub thumbnail_url: Option<String>,

    /// Description as supplied by the provider (may contain HTML)
    pub full_description: Option<String>,

    /// Plain-text excerpt of the description for list views
    pub short_description: Option<String>,

    /// Last generated summary
    pub ai_summary: Option<String>,

    pub created_at: DateTime<Utc>,
}

impl PersistedBook {
    /// Build a new record from a catalog `volumeInfo` section
    pub fn from_volume(external_id: impl Into<String>, info: &VolumeInfo) -> Self {
        let full_description = info.description.clone().filter(|d| !d.trim().is_empty());
        let short_description = full_description
            .as_deref()
            .map(|d| shorten(d, SHORT_DESCRIPTION_LEN));

        Self {
            id: Uuid::new_v4(),
            external_id: external_id.into(),
            title: info
                .title
                .clone()
                .unwrap_or_else(|| UNKNOWN_TITLE.to_string()),
            authors: info.authors.clone(),
            published_date: info.published_date.clone(),
            thumbnail_url: info
                .image_links
                .as_ref()
                .and_then(|links| links.thumbnail.clone()),
            full_description,
            short_description,
            ai_summary: None,
            created_at: Utc::now(),
        }
    }

    /// Get the primary author (first listed)
    pub fn primary_author(&self) -> Option<&str> {
        self.authors.first().map(|s| s.as_str())
    }
}

/// Strip markup, collapse whitespace and cut at a word boundary
pub fn shorten(text: &str, max_chars: usize) -> String {
    let mut plain = String::with_capacity(text.len());
    let mut in_tag = false;
    for c in text.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => {
                in_tag = false;
                plain.push(' ');
            }
            _ if !in_tag => plain.push(c),
            _ => {}
        }
    }
    let plain = plain.split_whitespace().collect::<Vec<_>>().join(" ");

    if plain.chars().count() <= max_chars {
        return plain;
    }

    let cut: String = plain.chars().take(max_chars).collect();
    let cut = match cut.rfind(' ') {
        Some(pos) if pos > 0 => &cut[..pos],
        _ => cut.as_str(),
    };
    format!("{}...", cut.trim_end_matches(|c: char| matches!(c, ',' | ';' | ':' | '.')))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::raw::ImageLinks;

    #[test]
    fn test_from_volume_defaults() {
        let book = PersistedBook::from_volume("abc123", &VolumeInfo::default());
        assert_eq!(book.external_id, "abc123");
        assert_eq!(book.title, "Unknown Title");
        assert!(book.authors.is_empty());
        assert!(book.thumbnail_url.is_none());
        assert!(book.full_description.is_none());
        assert!(book.short_description.is_none());
        assert!(book.ai_summary.is_none());
    }

    #[test]
    fn test_from_volume_fields() {
        let info = VolumeInfo {
            title: Some("Dune".to_string()),
            authors: vec!["Frank Herbert".to_string()],
            published_date: Some("1965".to_string()),
            image_links: Some(ImageLinks {
                small_thumbnail: None,
                thumbnail: Some("http://example.com/dune.jpg".to_string()),
            }),
            description: Some("<p>Desert <b>planet</b>.</p>".to_string()),
            ..Default::default()
        };
        let book = PersistedBook::from_volume("dune", &info);
        assert_eq!(book.title, "Dune");
        assert_eq!(book.primary_author(), Some("Frank Herbert"));
        assert_eq!(book.thumbnail_url.as_deref(), Some("http://example.com/dune.jpg"));
        assert_eq!(book.full_description.as_deref(), Some("<p>Desert <b>planet</b>.</p>"));
        assert_eq!(book.short_description.as_deref(), Some("Desert planet ."));
    }

    #[test]
    fn test_shorten_long_text() {
        let text = "word ".repeat(100);
        let short = shorten(&text, 20);
        assert!(short.ends_with("..."));
        assert!(short.chars().count() <= 23);
        assert!(!short.contains("  "));
    }

    #[test]
    fn test_shorten_multibyte() {
        let text = "é".repeat(50);
        let short = shorten(&text, 10);
        assert_eq!(short, format!("{}...", "é".repeat(10)));
    }
}
