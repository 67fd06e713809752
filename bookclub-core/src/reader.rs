//! Reading shelves, favorites and reviews
//!
//! Callers pass an already-authenticated user id.

use crate::error::{BookclubError, Result};
use crate::storage::{BookStore, ReaderStore};
use crate::types::{
    Interaction, InteractionPatch, ReadingStatus, Review, ReviewPatch, MAX_RATING, MIN_RATING,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

/// Request to put a book on a reader's shelf
#[derive(Debug, Clone, Deserialize)]
pub struct NewInteraction {
    /// Internal book id
    pub book: Uuid,

    #[serde(default)]
    pub status: Option<ReadingStatus>,

    #[serde(default)]
    pub is_favorite: bool,
}

/// Request to review a book
#[derive(Debug, Clone, Deserialize)]
pub struct NewReview {
    /// Unchecked; out-of-range values are rejected on post
    pub rating: i64,

    #[serde(default)]
    pub comment: Option<String>,
}

/// A shelf entry joined with its book
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LibraryEntry {
    pub id: Uuid,
    pub external_id: String,
    pub title: String,
    pub authors: Vec<String>,
    pub published_date: Option<String>,
    pub thumbnail_url: Option<String>,
    pub short_description: Option<String>,
    pub status: Option<ReadingStatus>,
    pub is_favorite: bool,
}

fn validate_rating(rating: i64) -> Result<u8> {
    u8::try_from(rating)
        .ok()
        .filter(|r| (MIN_RATING..=MAX_RATING).contains(r))
        .ok_or_else(|| {
            BookclubError::Validation(format!(
                "Rating must be between {} and {}",
                MIN_RATING, MAX_RATING
            ))
        })
}

/// Blank comments are stored as absent
fn clean_comment(comment: Option<String>) -> Option<String> {
    comment
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
}

/// Per-user reading data
pub struct ReaderService {
    books: Arc<dyn BookStore>,
    store: Arc<dyn ReaderStore>,
}

impl ReaderService {
    pub fn new(books: Arc<dyn BookStore>, store: Arc<dyn ReaderStore>) -> Self {
        Self { books, store }
    }

    async fn require_book(&self, book_id: Uuid) -> Result<()> {
        match self.books.get(book_id).await? {
            Some(_) => Ok(()),
            None => Err(BookclubError::NotFound(format!("Book {}", book_id))),
        }
    }

    /// Shelve a book; fails with a storage conflict if already shelved
    pub async fn add_interaction(
        &self,
        user_id: &str,
        request: NewInteraction,
    ) -> Result<Interaction> {
        self.require_book(request.book).await?;

        let interaction = Interaction {
            user_id: user_id.to_string(),
            book_id: request.book,
            status: request.status,
            is_favorite: request.is_favorite,
        };
        self.store.create_interaction(interaction.clone()).await?;
        Ok(interaction)
    }

    /// Partially update an existing shelf entry
    pub async fn update_interaction(
        &self,
        user_id: &str,
        book_id: Uuid,
        patch: InteractionPatch,
    ) -> Result<Interaction> {
        let mut interaction = self
            .store
            .get_interaction(user_id, book_id)
            .await?
            .ok_or_else(|| BookclubError::NotFound("Interaction not found.".to_string()))?;

        interaction.apply(patch);
        self.store.update_interaction(interaction.clone()).await?;
        Ok(interaction)
    }

    /// The user's shelf, optionally only favorites
    pub async fn library(&self, user_id: &str, favorites_only: bool) -> Result<Vec<LibraryEntry>> {
        let mut entries = Vec::new();
        for interaction in self.store.list_interactions(user_id).await? {
            if favorites_only && !interaction.is_favorite {
                continue;
            }
            let Some(book) = self.books.get(interaction.book_id).await? else {
                tracing::warn!(book_id = %interaction.book_id, "Shelf entry for missing book");
                continue;
            };
            entries.push(LibraryEntry {
                id: book.id,
                external_id: book.external_id,
                title: book.title,
                authors: book.authors,
                published_date: book.published_date,
                thumbnail_url: book.thumbnail_url,
                short_description: book.short_description,
                status: interaction.status,
                is_favorite: interaction.is_favorite,
            });
        }
        Ok(entries)
    }

    /// Post a review; one per user and book
    pub async fn post_review(
        &self,
        user_id: &str,
        book_id: Uuid,
        request: NewReview,
    ) -> Result<Review> {
        let rating = validate_rating(request.rating)?;
        self.require_book(book_id).await?;

        let review = Review {
            id: Uuid::new_v4(),
            book_id,
            user_id: user_id.to_string(),
            rating,
            comment: clean_comment(request.comment),
            created_at: Utc::now(),
        };
        self.store.create_review(review.clone()).await?;
        Ok(review)
    }

    /// Reviews of a book, newest first
    pub async fn reviews_for(&self, book_id: Uuid) -> Result<Vec<Review>> {
        self.require_book(book_id).await?;
        Ok(self.store.list_reviews(book_id).await?)
    }

    pub async fn review(&self, review_id: Uuid) -> Result<Review> {
        self.store
            .get_review(review_id)
            .await?
            .ok_or_else(|| BookclubError::NotFound(format!("Review {}", review_id)))
    }

    /// Edit a review; only its author may
    pub async fn edit_review(
        &self,
        user_id: &str,
        review_id: Uuid,
        patch: ReviewPatch,
    ) -> Result<Review> {
        let mut review = self.owned_review(user_id, review_id).await?;

        if let Some(rating) = patch.rating {
            review.rating = validate_rating(rating)?;
        }
        if let Some(comment) = patch.comment {
            review.comment = clean_comment(comment);
        }

        self.store.update_review(review.clone()).await?;
        Ok(review)
    }

    /// Delete a review; only its author may
    pub async fn delete_review(&self, user_id: &str, review_id: Uuid) -> Result<()> {
        self.owned_review(user_id, review_id).await?;
        Ok(self.store.delete_review(review_id).await?)
    }

    async fn owned_review(&self, user_id: &str, review_id: Uuid) -> Result<Review> {
        let review = self.review(review_id).await?;
        if review.user_id != user_id {
            return Err(BookclubError::Forbidden(
                "Only the author may change a review".to_string(),
            ));
        }
        Ok(review)
    }
}
