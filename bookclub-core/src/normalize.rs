//! Mapping of provider payloads onto [`UnifiedBook`]
//!
//! Normalization is total: every missing field maps to its default.

use crate::types::{CatalogVolume, RankedListItem, RawBook, UnifiedBook, UNKNOWN_TITLE};

/// Normalize a tagged provider payload
pub fn normalize(raw: RawBook) -> UnifiedBook {
    match raw {
        RawBook::Catalog(volume) => normalize_catalog(volume),
        RawBook::Ranked(item) => normalize_ranked(item),
    }
}

/// Normalize a catalog search/detail volume
pub fn normalize_catalog(volume: CatalogVolume) -> UnifiedBook {
    let info = volume.volume_info.unwrap_or_default();

    UnifiedBook {
        external_id: volume.id,
        title: info.title.unwrap_or_else(|| UNKNOWN_TITLE.to_string()),
        authors: info.authors,
        published_date: info.published_date,
        categories: info.categories,
        thumbnail_url: info.image_links.and_then(|links| links.thumbnail),
        description: info.description,
        average_rating: info.average_rating,
        retailer_url: None,
        rank: None,
    }
}

/// Normalize a ranked-list entry
pub fn normalize_ranked(item: RankedListItem) -> UnifiedBook {
    UnifiedBook {
        external_id: None,
        title: item.title.unwrap_or_else(|| UNKNOWN_TITLE.to_string()),
        authors: singleton(item.author),
        published_date: None,
        categories: singleton(item.list_name),
        thumbnail_url: item.book_image,
        description: item.description,
        average_rating: None,
        retailer_url: item.amazon_product_url,
        rank: item.rank,
    }
}

/// A present, non-empty value becomes a one-element list
fn singleton(value: Option<String>) -> Vec<String> {
    value
        .filter(|v| !v.is_empty())
        .into_iter()
        .collect()
}
