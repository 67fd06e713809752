//! Raw payload shapes of the external providers
//!
//! Every field is optional or defaulted so that a partial payload still
//! deserializes. Explicit JSON `null`s for list fields are read as empty lists.

use serde::{Deserialize, Deserializer, Serialize};

/// Treat an explicit `null` the same as a missing field
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A single volume from the catalog search/detail provider
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CatalogVolume {
    /// Provider's own identifier
    pub id: Option<String>,

    /// Nested bibliographic record
    pub volume_info: Option<VolumeInfo>,
}

/// The `volumeInfo` section of a catalog volume
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VolumeInfo {
    pub title: Option<String>,

    #[serde(deserialize_with = "null_as_default")]
    pub authors: Vec<String>,

    /// Free-form date ("2004", "2004-05", "2004-05-01")
    pub published_date: Option<String>,

    #[serde(deserialize_with = "null_as_default")]
    pub categories: Vec<String>,

    pub image_links: Option<ImageLinks>,

    pub description: Option<String>,

    pub average_rating: Option<f64>,
}

/// Cover image links
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ImageLinks {
    pub small_thumbnail: Option<String>,
    pub thumbnail: Option<String>,
}

/// Search response envelope
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CatalogSearch {
    pub total_items: Option<u64>,

    #[serde(deserialize_with = "null_as_default")]
    pub items: Vec<CatalogVolume>,
}

/// A single entry of a ranked (bestseller) list
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankedListItem {
    pub title: Option<String>,
    pub author: Option<String>,
    pub book_image: Option<String>,
    pub amazon_product_url: Option<String>,
    pub rank: Option<u32>,
    pub list_name: Option<String>,
    pub description: Option<String>,
}

/// Ranked-list response envelope
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RankedListResponse {
    pub results: Option<RankedListResults>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RankedListResults {
    pub list_name: Option<String>,

    #[serde(deserialize_with = "null_as_default")]
    pub books: Vec<RankedListItem>,
}

/// A raw provider payload tagged with the provider it came from
#[derive(Debug, Clone, PartialEq)]
pub enum RawBook {
    Catalog(CatalogVolume),
    Ranked(RankedListItem),
}

impl From<CatalogVolume> for RawBook {
    fn from(volume: CatalogVolume) -> Self {
        RawBook::Catalog(volume)
    }
}

impl From<RankedListItem> for RawBook {
    fn from(item: RankedListItem) -> Self {
        RawBook::Ranked(item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_volume_with_nulls() {
        let json = r#"{"id": "abc", "volumeInfo": {"authors": null, "categories": null}}"#;
        let volume: CatalogVolume = serde_json::from_str(json).unwrap();
        let info = volume.volume_info.unwrap();
        assert!(info.authors.is_empty());
        assert!(info.categories.is_empty());
        assert!(info.title.is_none());
    }

    #[test]
    fn test_search_without_items() {
        let search: CatalogSearch = serde_json::from_str(r#"{"totalItems": 0}"#).unwrap();
        assert_eq!(search.total_items, Some(0));
        assert!(search.items.is_empty());
    }

    #[test]
    fn test_ranked_list_envelope() {
        let json = r#"{
            "status": "OK",
            "results": {
                "list_name": "Hardcover Fiction",
                "books": [{"title": "A", "author": "B", "rank": 1}]
            }
        }"#;
        let response: RankedListResponse = serde_json::from_str(json).unwrap();
        let results = response.results.unwrap();
        assert_eq!(results.list_name.as_deref(), Some("Hardcover Fiction"));
        assert_eq!(results.books[0].rank, Some(1));
        assert!(results.books[0].book_image.is_none());
    }
}
