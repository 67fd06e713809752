//! Review handlers

use super::parse_id;
use crate::auth::CurrentUser;
use crate::error::ApiError;
use crate::extract::ApiJson;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use bookclub_core::{NewReview, Review, ReviewPatch};

/// Reviews of a book, newest first
pub async fn list_reviews(
    State(state): State<AppState>,
    Path(book_id): Path<String>,
) -> Result<Json<Vec<Review>>, ApiError> {
    let book_id = parse_id(&book_id)?;
    Ok(Json(state.reader.reviews_for(book_id).await?))
}

pub async fn create_review(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(book_id): Path<String>,
    ApiJson(request): ApiJson<NewReview>,
) -> Result<(StatusCode, Json<Review>), ApiError> {
    let book_id = parse_id(&book_id)?;
    let review = state.reader.post_review(&user, book_id, request).await?;
    Ok((StatusCode::CREATED, Json(review)))
}

pub async fn get_review(
    State(state): State<AppState>,
    Path(review_id): Path<String>,
) -> Result<Json<Review>, ApiError> {
    let review_id = parse_id(&review_id)?;
    Ok(Json(state.reader.review(review_id).await?))
}

/// Edit a review; author only
pub async fn update_review(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(review_id): Path<String>,
    ApiJson(patch): ApiJson<ReviewPatch>,
) -> Result<Json<Review>, ApiError> {
    let review_id = parse_id(&review_id)?;
    Ok(Json(state.reader.edit_review(&user, review_id, patch).await?))
}

/// Delete a review; author only
pub async fn delete_review(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(review_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let review_id = parse_id(&review_id)?;
    state.reader.delete_review(&user, review_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
