//! Snapshot-persisted record store
//!
//! All records live in memory behind one lock and every mutation rewrites a
//! JSON snapshot through a [`StorageProvider`]. Uniqueness checks happen under
//! the write lock, so they are authoritative for the whole process.

use super::{BookStore, MemoryStorage, ReaderStore, StorageProvider, StorageResult};
use crate::error::StorageError;
use crate::types::{Interaction, PersistedBook, Review};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Snapshot file name
pub const LIBRARY_FILE: &str = "library.json";

/// All persisted records
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Library {
    pub books: HashMap<Uuid, PersistedBook>,

    #[serde(default)]
    pub interactions: Vec<Interaction>,

    #[serde(default)]
    pub reviews: HashMap<Uuid, Review>,

    /// external id -> internal id
    #[serde(skip)]
    external_index: HashMap<String, Uuid>,
}

impl Library {
    fn rebuild_index(&mut self) {
        self.external_index = self
            .books
            .values()
            .map(|book| (book.external_id.clone(), book.id))
            .collect();
    }

    fn book_by_external_id(&self, external_id: &str) -> Option<&PersistedBook> {
        self.external_index
            .get(external_id)
            .and_then(|id| self.books.get(id))
    }

    fn interaction_position(&self, user_id: &str, book_id: Uuid) -> Option<usize> {
        self.interactions
            .iter()
            .position(|i| i.user_id == user_id && i.book_id == book_id)
    }
}

/// Record store backed by a JSON snapshot
pub struct LibraryStore {
    library: RwLock<Library>,
    storage: Arc<dyn StorageProvider>,
}

impl LibraryStore {
    /// Load the snapshot from storage, starting empty if there is none
    pub async fn open(storage: Arc<dyn StorageProvider>) -> StorageResult<Self> {
        let mut library = match storage.read(LIBRARY_FILE).await {
            Ok(data) => serde_json::from_slice::<Library>(&data)
                .map_err(|e| StorageError::BackendError(format!("Corrupt library: {}", e)))?,
            Err(StorageError::NotFound(_)) => Library::default(),
            Err(e) => return Err(e),
        };
        library.rebuild_index();

        tracing::debug!(
            books = library.books.len(),
            reviews = library.reviews.len(),
            "Library loaded"
        );

        Ok(Self {
            library: RwLock::new(library),
            storage,
        })
    }

    /// An empty store that lives only in memory
    pub fn in_memory() -> Self {
        Self {
            library: RwLock::new(Library::default()),
            storage: Arc::new(MemoryStorage::new()),
        }
    }

    /// Number of materialized books
    pub async fn book_count(&self) -> usize {
        self.library.read().await.books.len()
    }

    async fn persist(&self, library: &Library) -> StorageResult<()> {
        let data = serde_json::to_vec_pretty(library)
            .map_err(|e| StorageError::BackendError(e.to_string()))?;
        self.storage.write(LIBRARY_FILE, data).await.map_err(|e| {
            tracing::error!("Failed to save library: {}", e);
            e
        })
    }
}

#[async_trait]
impl BookStore for LibraryStore {
    async fn get(&self, id: Uuid) -> StorageResult<Option<PersistedBook>> {
        Ok(self.library.read().await.books.get(&id).cloned())
    }

    async fn get_by_external_id(&self, external_id: &str) -> StorageResult<Option<PersistedBook>> {
        Ok(self
            .library
            .read()
            .await
            .book_by_external_id(external_id)
            .cloned())
    }

    async fn create(&self, book: PersistedBook) -> StorageResult<()> {
        let mut library = self.library.write().await;
        if library.external_index.contains_key(&book.external_id) {
            return Err(StorageError::Conflict(book.external_id));
        }

        let (id, external_id) = (book.id, book.external_id.clone());
        library.external_index.insert(external_id.clone(), id);
        library.books.insert(id, book);

        if let Err(e) = self.persist(&library).await {
            library.books.remove(&id);
            library.external_index.remove(&external_id);
            return Err(e);
        }
        Ok(())
    }

    async fn set_ai_summary(&self, id: Uuid, summary: &str) -> StorageResult<()> {
        let mut library = self.library.write().await;
        let book = library
            .books
            .get_mut(&id)
            .ok_or_else(|| StorageError::NotFound(id.to_string()))?;
        let previous = book.ai_summary.replace(summary.to_string());

        if let Err(e) = self.persist(&library).await {
            if let Some(book) = library.books.get_mut(&id) {
                book.ai_summary = previous;
            }
            return Err(e);
        }
        Ok(())
    }
}

#[async_trait]
impl ReaderStore for LibraryStore {
    async fn create_interaction(&self, interaction: Interaction) -> StorageResult<()> {
        let mut library = self.library.write().await;
        if library
            .interaction_position(&interaction.user_id, interaction.book_id)
            .is_some()
        {
            return Err(StorageError::Conflict(format!(
                "interaction for book {}",
                interaction.book_id
            )));
        }

        library.interactions.push(interaction);
        if let Err(e) = self.persist(&library).await {
            library.interactions.pop();
            return Err(e);
        }
        Ok(())
    }

    async fn get_interaction(
        &self,
        user_id: &str,
        book_id: Uuid,
    ) -> StorageResult<Option<Interaction>> {
        let library = self.library.read().await;
        Ok(library
            .interaction_position(user_id, book_id)
            .map(|pos| library.interactions[pos].clone()))
    }

    async fn update_interaction(&self, interaction: Interaction) -> StorageResult<()> {
        let mut library = self.library.write().await;
        let pos = library
            .interaction_position(&interaction.user_id, interaction.book_id)
            .ok_or_else(|| {
                StorageError::NotFound(format!("interaction for book {}", interaction.book_id))
            })?;

        let previous = std::mem::replace(&mut library.interactions[pos], interaction);
        if let Err(e) = self.persist(&library).await {
            library.interactions[pos] = previous;
            return Err(e);
        }
        Ok(())
    }

    async fn list_interactions(&self, user_id: &str) -> StorageResult<Vec<Interaction>> {
        Ok(self
            .library
            .read()
            .await
            .interactions
            .iter()
            .filter(|i| i.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn create_review(&self, review: Review) -> StorageResult<()> {
        let mut library = self.library.write().await;
        let duplicate = library
            .reviews
            .values()
            .any(|r| r.user_id == review.user_id && r.book_id == review.book_id);
        if duplicate {
            return Err(StorageError::Conflict(format!(
                "review for book {}",
                review.book_id
            )));
        }

        let id = review.id;
        library.reviews.insert(id, review);
        if let Err(e) = self.persist(&library).await {
            library.reviews.remove(&id);
            return Err(e);
        }
        Ok(())
    }

    async fn get_review(&self, id: Uuid) -> StorageResult<Option<Review>> {
        Ok(self.library.read().await.reviews.get(&id).cloned())
    }

    async fn update_review(&self, review: Review) -> StorageResult<()> {
        let mut library = self.library.write().await;
        let id = review.id;
        let previous = match library.reviews.get_mut(&id) {
            Some(existing) => std::mem::replace(existing, review),
            None => return Err(StorageError::NotFound(id.to_string())),
        };

        if let Err(e) = self.persist(&library).await {
            library.reviews.insert(id, previous);
            return Err(e);
        }
        Ok(())
    }

    async fn delete_review(&self, id: Uuid) -> StorageResult<()> {
        let mut library = self.library.write().await;
        let removed = library
            .reviews
            .remove(&id)
            .ok_or_else(|| StorageError::NotFound(id.to_string()))?;

        if let Err(e) = self.persist(&library).await {
            library.reviews.insert(id, removed);
            return Err(e);
        }
        Ok(())
    }

    async fn list_reviews(&self, book_id: Uuid) -> StorageResult<Vec<Review>> {
        let mut reviews: Vec<Review> = self
            .library
            .read()
            .await
            .reviews
            .values()
            .filter(|r| r.book_id == book_id)
            .cloned()
            .collect();
        reviews.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(reviews)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ReadingStatus, VolumeInfo};

    fn sample_book(external_id: &str) -> PersistedBook {
        PersistedBook::from_volume(
            external_id,
            &VolumeInfo {
                title: Some(format!("Title of {}", external_id)),
                ..Default::default()
            },
        )
    }

    #[tokio::test]
    async fn test_create_and_lookup() {
        let store = LibraryStore::in_memory();
        let book = sample_book("ext-1");
        store.create(book.clone()).await.unwrap();

        assert_eq!(store.get(book.id).await.unwrap(), Some(book.clone()));
        assert_eq!(
            store.get_by_external_id("ext-1").await.unwrap(),
            Some(book)
        );
        assert!(store.get_by_external_id("ext-2").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_external_id_conflicts() {
        let store = LibraryStore::in_memory();
        store.create(sample_book("ext-1")).await.unwrap();

        let result = store.create(sample_book("ext-1")).await;
        assert!(matches!(result, Err(StorageError::Conflict(_))));
        assert_eq!(store.book_count().await, 1);
    }

    #[tokio::test]
    async fn test_snapshot_survives_reopen() {
        let storage: Arc<dyn StorageProvider> = Arc::new(MemoryStorage::new());
        let book = sample_book("ext-1");
        {
            let store = LibraryStore::open(storage.clone()).await.unwrap();
            store.create(book.clone()).await.unwrap();
            store.set_ai_summary(book.id, "A summary").await.unwrap();
            store
                .create_interaction(Interaction {
                    user_id: "alice".to_string(),
                    book_id: book.id,
                    status: Some(ReadingStatus::Read),
                    is_favorite: true,
                })
                .await
                .unwrap();
        }

        let reopened = LibraryStore::open(storage).await.unwrap();
        let loaded = reopened.get_by_external_id("ext-1").await.unwrap().unwrap();
        assert_eq!(loaded.ai_summary.as_deref(), Some("A summary"));
        assert_eq!(reopened.list_interactions("alice").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_corrupt_snapshot_is_an_error() {
        let storage = Arc::new(MemoryStorage::new());
        storage
            .write(LIBRARY_FILE, b"not json".to_vec())
            .await
            .unwrap();
        assert!(LibraryStore::open(storage).await.is_err());
    }

    #[tokio::test]
    async fn test_interaction_uniqueness_and_update() {
        let store = LibraryStore::in_memory();
        let book_id = Uuid::new_v4();
        let interaction = Interaction {
            user_id: "bob".to_string(),
            book_id,
            status: None,
            is_favorite: false,
        };

        store.create_interaction(interaction.clone()).await.unwrap();
        assert!(matches!(
            store.create_interaction(interaction.clone()).await,
            Err(StorageError::Conflict(_))
        ));

        let mut updated = interaction.clone();
        updated.is_favorite = true;
        store.update_interaction(updated).await.unwrap();
        assert!(
            store
                .get_interaction("bob", book_id)
                .await
                .unwrap()
                .unwrap()
                .is_favorite
        );

        let stranger = Interaction {
            user_id: "carol".to_string(),
            ..interaction
        };
        assert!(matches!(
            store.update_interaction(stranger).await,
            Err(StorageError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_reviews_newest_first() {
        let store = LibraryStore::in_memory();
        let book_id = Uuid::new_v4();
        let now = chrono::Utc::now();

        for (i, user) in ["u1", "u2", "u3"].iter().enumerate() {
            store
                .create_review(Review {
                    id: Uuid::new_v4(),
                    book_id,
                    user_id: user.to_string(),
                    rating: 4,
                    comment: None,
                    created_at: now + chrono::Duration::seconds(i as i64),
                })
                .await
                .unwrap();
        }

        let reviews = store.list_reviews(book_id).await.unwrap();
        let users: Vec<_> = reviews.iter().map(|r| r.user_id.as_str()).collect();
        assert_eq!(users, vec!["u3", "u2", "u1"]);

        store.delete_review(reviews[0].id).await.unwrap();
        assert_eq!(store.list_reviews(book_id).await.unwrap().len(), 2);
        assert!(matches!(
            store.delete_review(reviews[0].id).await,
            Err(StorageError::NotFound(_))
        ));
    }
}
