//! The provider-independent book record

use serde::{Deserialize, Serialize};

/// Title used when a provider omits one
pub const UNKNOWN_TITLE: &str = "Unknown Title";

/// A book as returned by search and feed endpoints.
///
/// Produced per request from provider payloads and never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UnifiedBook {
    /// Catalog provider identifier (absent for ranked-list entries)
    pub external_id: Option<String>,

    pub title: String,

    /// Authors in provider order
    pub authors: Vec<String>,

    /// Free-form publication date
    pub published_date: Option<String>,

    pub categories: Vec<String>,

    pub thumbnail_url: Option<String>,

    pub description: Option<String>,

    pub average_rating: Option<f64>,

    /// Retailer link (ranked-list provider only)
    pub retailer_url: Option<String>,

    /// Position in a ranked list (ranked-list provider only)
    pub rank: Option<u32>,
}

impl Default for UnifiedBook {
    fn default() -> Self {
        Self {
            external_id: None,
            title: UNKNOWN_TITLE.to_string(),
            authors: Vec::new(),
            published_date: None,
            categories: Vec::new(),
            thumbnail_url: None,
            description: None,
            average_rating: None,
            retailer_url: None,
            rank: None,
        }
    }
}

/// The three home page feeds
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HomeFeed {
    /// Top result per category, in category order
    pub carousel: Vec<UnifiedBook>,

    pub recent: Vec<UnifiedBook>,

    /// Bestsellers in rank order
    pub bestsellers: Vec<UnifiedBook>,
}
