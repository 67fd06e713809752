//! Search, book details, summaries and the home feed

use super::parse_id;
use crate::error::ApiError;
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    Json,
};
use bookclub_core::feed::HOME_FEED_LIMIT;
use bookclub_core::{HomeFeed, PersistedBook, UnifiedBook};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Query parameters for search
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub books: Vec<UnifiedBook>,
}

/// Search the catalog
pub async fn search_books(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<SearchResponse>, ApiError> {
    let q = query.q.unwrap_or_default();
    if q.trim().is_empty() {
        return Err(ApiError::bad_request("Query parameter 'q' is required."));
    }

    let books = state.feed.search(&q, None).await;
    Ok(Json(SearchResponse { books }))
}

/// A materialized book as shown on its detail page
#[derive(Debug, Serialize)]
pub struct BookDetail {
    pub id: Uuid,
    pub external_id: String,
    pub title: String,
    pub authors: Vec<String>,
    pub published_date: Option<String>,
    pub thumbnail_url: Option<String>,
    pub short_description: Option<String>,
}

impl From<PersistedBook> for BookDetail {
    fn from(book: PersistedBook) -> Self {
        Self {
            id: book.id,
            external_id: book.external_id,
            title: book.title,
            authors: book.authors,
            published_date: book.published_date,
            thumbnail_url: book.thumbnail_url,
            short_description: book.short_description,
        }
    }
}

/// Look up a book by catalog id, materializing it on first access
pub async fn book_details(
    State(state): State<AppState>,
    Path(external_id): Path<String>,
) -> Result<Json<BookDetail>, ApiError> {
    let book = state
        .resolver
        .get_or_create(&external_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Book not found."))?;

    Ok(Json(book.into()))
}

#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    pub summary: String,
}

/// Generated summary of a materialized book
pub async fn book_summary(
    State(state): State<AppState>,
    Path(book_id): Path<String>,
) -> Result<Json<SummaryResponse>, ApiError> {
    let book_id = parse_id(&book_id)?;
    let summary = state.summaries.get_summary(book_id).await;
    Ok(Json(SummaryResponse { summary }))
}

/// Carousel, recent and bestseller feeds
pub async fn home_feed(State(state): State<AppState>) -> Json<HomeFeed> {
    Json(state.feed.home_feed(HOME_FEED_LIMIT).await)
}
