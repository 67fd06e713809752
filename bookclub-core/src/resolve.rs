//! Book materialization
//!
//! [`BookResolver::get_or_create`] is the only path that creates a
//! [`PersistedBook`]. Concurrent first lookups of the same external id may
//! both reach the provider; the store's unique key lets exactly one insert
//! win and the loser re-reads the winner's row.

use crate::catalog::CatalogProvider;
use crate::error::StorageError;
use crate::memo::{memoized, Fetched, Memoized};
use crate::storage::{BookStore, StorageResult};
use crate::types::PersistedBook;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info};

/// Resolves external ids to persisted books
pub struct BookResolver {
    catalog: Arc<dyn CatalogProvider>,
    store: Arc<dyn BookStore>,
}

impl BookResolver {
    pub fn new(catalog: Arc<dyn CatalogProvider>, store: Arc<dyn BookStore>) -> Self {
        Self { catalog, store }
    }

    /// Return the local book for `external_id`, fetching and persisting it
    /// on first access.
    ///
    /// `Ok(None)` means the provider has no usable record; nothing is created.
    /// Errors are storage backend failures only.
    pub async fn get_or_create(&self, external_id: &str) -> StorageResult<Option<PersistedBook>> {
        memoized(self, external_id).await
    }
}

#[async_trait]
impl Memoized for BookResolver {
    type Key = str;
    type Value = PersistedBook;
    type Error = StorageError;

    async fn lookup(&self, external_id: &str) -> StorageResult<Option<PersistedBook>> {
        let found = self.store.get_by_external_id(external_id).await?;
        if found.is_some() {
            debug!(external_id, "Book already materialized");
        }
        Ok(found)
    }

    async fn fetch(&self, external_id: &str) -> StorageResult<Fetched<PersistedBook>> {
        if external_id.trim().is_empty() {
            return Ok(Fetched::Missing);
        }

        let info = self
            .catalog
            .details(external_id)
            .await
            .and_then(|volume| volume.volume_info);

        Ok(match info {
            Some(info) => Fetched::Fresh(PersistedBook::from_volume(external_id, &info)),
            None => {
                debug!(external_id, "No catalog record to materialize");
                Fetched::Missing
            }
        })
    }

    async fn store(&self, external_id: &str, book: PersistedBook) -> StorageResult<PersistedBook> {
        match self.store.create(book.clone()).await {
            Ok(()) => {
                info!(external_id, id = %book.id, "Materialized book");
                Ok(book)
            }
            Err(StorageError::Conflict(_)) => {
                debug!(external_id, "Lost materialization race, re-reading");
                self.store
                    .get_by_external_id(external_id)
                    .await?
                    .ok_or_else(|| StorageError::NotFound(external_id.to_string()))
            }
            Err(e) => Err(e),
        }
    }
}
