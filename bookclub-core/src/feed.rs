//! Home page feeds and plain search
//!
//! Nothing here is cached; every call goes to the providers.

use crate::catalog::{CatalogProvider, DEFAULT_RANKED_LIST, DEFAULT_SEARCH_RESULTS};
use crate::normalize::{normalize_catalog, normalize_ranked};
use crate::types::{HomeFeed, UnifiedBook};
use futures::future::join_all;
use std::sync::Arc;

/// Categories shown in the carousel, in display order
pub const CAROUSEL_CATEGORIES: [&str; 10] = [
    "Fiction",
    "Science",
    "History",
    "Biography",
    "Fantasy",
    "Romance",
    "Mystery",
    "Self-Help",
    "Technology",
    "Philosophy",
];

/// Query behind the "recent" feed
pub const RECENT_QUERY: &str = "subject:fiction";

/// Length of each home feed
pub const HOME_FEED_LIMIT: usize = 10;

/// Builds feeds from the catalog providers
pub struct FeedService {
    catalog: Arc<dyn CatalogProvider>,
    ranked_list: String,
}

impl FeedService {
    pub fn new(catalog: Arc<dyn CatalogProvider>) -> Self {
        Self {
            catalog,
            ranked_list: DEFAULT_RANKED_LIST.to_string(),
        }
    }

    /// Use a different ranked list for bestsellers
    pub fn with_ranked_list(mut self, list_name: impl Into<String>) -> Self {
        self.ranked_list = list_name.into();
        self
    }

    /// All three home feeds, each at most `limit` long
    pub async fn home_feed(&self, limit: usize) -> HomeFeed {
        let (carousel, recent, bestsellers) = tokio::join!(
            self.carousel(limit),
            self.recent(limit),
            self.bestsellers(limit)
        );
        HomeFeed {
            carousel,
            recent,
            bestsellers,
        }
    }

    /// Top search hit of each of the first `limit` categories.
    ///
    /// Categories without hits are skipped, so the result may be shorter.
    pub async fn carousel(&self, limit: usize) -> Vec<UnifiedBook> {
        let lookups = CAROUSEL_CATEGORIES
            .iter()
            .take(limit)
            .map(|category| self.catalog.search(category, 1));

        join_all(lookups)
            .await
            .into_iter()
            .filter_map(|hits| hits.into_iter().next())
            .map(normalize_catalog)
            .collect()
    }

    /// Recent fiction in provider order
    pub async fn recent(&self, limit: usize) -> Vec<UnifiedBook> {
        let max_results = u32::try_from(limit).unwrap_or(u32::MAX);
        self.catalog
            .search(RECENT_QUERY, max_results)
            .await
            .into_iter()
            .take(limit)
            .map(normalize_catalog)
            .collect()
    }

    /// Bestsellers in rank order
    pub async fn bestsellers(&self, limit: usize) -> Vec<UnifiedBook> {
        self.catalog
            .ranked_list(&self.ranked_list, limit)
            .await
            .into_iter()
            .take(limit)
            .map(normalize_ranked)
            .collect()
    }

    /// Free-text search; empty for a blank query or an unavailable provider
    pub async fn search(&self, query: &str, max_results: Option<u32>) -> Vec<UnifiedBook> {
        let query = query.trim();
        if query.is_empty() {
            return Vec::new();
        }

        self.catalog
            .search(query, max_results.unwrap_or(DEFAULT_SEARCH_RESULTS))
            .await
            .into_iter()
            .map(normalize_catalog)
            .collect()
    }
}
