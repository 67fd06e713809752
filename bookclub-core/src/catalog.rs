//! Clients for the external catalog and ranked-list providers
//!
//! Provider failures never reach callers: a network error, timeout,
//! non-success status or unreadable body is logged and reported as
//! "no data" (an empty list or `None`).

use crate::config::CatalogConfig;
use crate::error::CatalogError;
use crate::types::{CatalogSearch, CatalogVolume, RankedListItem, RankedListResponse};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

/// Default number of results for a plain search
pub const DEFAULT_SEARCH_RESULTS: u32 = 20;

/// Default ranked list
pub const DEFAULT_RANKED_LIST: &str = "hardcover-fiction";

/// Access to the external book providers
#[async_trait]
pub trait CatalogProvider: Send + Sync {
    /// Full-text search; empty when the provider has nothing or is unavailable
    async fn search(&self, query: &str, max_results: u32) -> Vec<CatalogVolume>;

    /// Single volume by provider id
    async fn details(&self, external_id: &str) -> Option<CatalogVolume>;

    /// Current entries of a ranked list, at most `limit`, in rank order
    async fn ranked_list(&self, list_name: &str, limit: usize) -> Vec<RankedListItem>;
}

/// HTTP implementation backed by `reqwest`
#[derive(Clone)]
pub struct HttpCatalog {
    http: reqwest::Client,
    config: CatalogConfig,
}

impl HttpCatalog {
    /// Create a client; the configured timeout applies to every request
    pub fn new(config: CatalogConfig) -> Result<Self, CatalogError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| CatalogError::Network(e.to_string()))?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<T, CatalogError> {
        let response = self
            .http
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|e| CatalogError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Status(status.as_u16()));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| CatalogError::Parse(e.to_string()))
    }

    fn catalog_key(&self) -> Option<(&'static str, String)> {
        self.config
            .catalog_api_key
            .clone()
            .map(|key| ("key", key))
    }
}

#[async_trait]
impl CatalogProvider for HttpCatalog {
    async fn search(&self, query: &str, max_results: u32) -> Vec<CatalogVolume> {
        let url = format!("{}/volumes", self.config.catalog_url.trim_end_matches('/'));
        let mut params = vec![
            ("q", query.to_string()),
            ("maxResults", max_results.to_string()),
        ];
        params.extend(self.catalog_key());

        match self.get_json::<CatalogSearch>(&url, &params).await {
            Ok(search) => {
                debug!(query, results = search.items.len(), "Catalog search");
                search.items
            }
            Err(e) => {
                warn!(query, error = %e, "Catalog search failed");
                Vec::new()
            }
        }
    }

    async fn details(&self, external_id: &str) -> Option<CatalogVolume> {
        let url = format!(
            "{}/volumes/{}",
            self.config.catalog_url.trim_end_matches('/'),
            urlencoding::encode(external_id)
        );
        let params: Vec<_> = self.catalog_key().into_iter().collect();

        match self.get_json::<CatalogVolume>(&url, &params).await {
            Ok(volume) => Some(volume),
            Err(e) => {
                warn!(external_id, error = %e, "Catalog detail lookup failed");
                None
            }
        }
    }

    async fn ranked_list(&self, list_name: &str, limit: usize) -> Vec<RankedListItem> {
        let url = format!(
            "{}/lists/current/{}.json",
            self.config.lists_url.trim_end_matches('/'),
            urlencoding::encode(list_name)
        );
        let params: Vec<_> = self
            .config
            .lists_api_key
            .clone()
            .map(|key| ("api-key", key))
            .into_iter()
            .collect();

        let results = match self.get_json::<RankedListResponse>(&url, &params).await {
            Ok(response) => response.results.unwrap_or_default(),
            Err(e) => {
                warn!(list_name, error = %e, "Ranked list fetch failed");
                return Vec::new();
            }
        };

        // Entries rarely repeat the list name; inherit it from the envelope
        let list_title = results.list_name;
        results
            .books
            .into_iter()
            .take(limit)
            .map(|mut item| {
                if item.list_name.is_none() {
                    item.list_name = list_title.clone();
                }
                item
            })
            .collect()
    }
}
