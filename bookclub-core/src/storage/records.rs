//! Record-level storage traits

use super::StorageResult;
use crate::types::{Interaction, PersistedBook, Review};
use async_trait::async_trait;
use uuid::Uuid;

/// Durable store of materialized books.
///
/// The external identifier is a unique key: `create` must fail with
/// [`StorageError::Conflict`](crate::error::StorageError::Conflict) when it is
/// already taken, which is how concurrent materializations are settled.
#[async_trait]
pub trait BookStore: Send + Sync {
    /// Look up a book by internal id
    async fn get(&self, id: Uuid) -> StorageResult<Option<PersistedBook>>;

    /// Look up a book by its unique external id
    async fn get_by_external_id(&self, external_id: &str) -> StorageResult<Option<PersistedBook>>;

    /// Insert a new book
    async fn create(&self, book: PersistedBook) -> StorageResult<()>;

    /// Record the latest generated summary (the only field that may change)
    async fn set_ai_summary(&self, id: Uuid, summary: &str) -> StorageResult<()>;
}

/// Durable store of per-user interactions and reviews
#[async_trait]
pub trait ReaderStore: Send + Sync {
    /// Insert an interaction; `Conflict` if (user, book) already has one
    async fn create_interaction(&self, interaction: Interaction) -> StorageResult<()>;

    async fn get_interaction(
        &self,
        user_id: &str,
        book_id: Uuid,
    ) -> StorageResult<Option<Interaction>>;

    /// Replace an existing interaction; `NotFound` if there is none
    async fn update_interaction(&self, interaction: Interaction) -> StorageResult<()>;

    /// All interactions of one user
    async fn list_interactions(&self, user_id: &str) -> StorageResult<Vec<Interaction>>;

    /// Insert a review; `Conflict` if (user, book) already has one
    async fn create_review(&self, review: Review) -> StorageResult<()>;

    async fn get_review(&self, id: Uuid) -> StorageResult<Option<Review>>;

    /// Replace an existing review; `NotFound` if there is none
    async fn update_review(&self, review: Review) -> StorageResult<()>;

    async fn delete_review(&self, id: Uuid) -> StorageResult<()>;

    /// Reviews of one book, newest first
    async fn list_reviews(&self, book_id: Uuid) -> StorageResult<Vec<Review>>;
}
