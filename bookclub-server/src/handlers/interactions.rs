//! Shelf and favorites handlers

use crate::auth::CurrentUser;
use crate::error::ApiError;
use crate::extract::ApiJson;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, Json};
use bookclub_core::{Interaction, InteractionPatch, LibraryEntry, NewInteraction};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Body of a shelf update
#[derive(Debug, Deserialize)]
pub struct UpdateInteraction {
    pub book_id: Uuid,

    #[serde(flatten)]
    pub patch: InteractionPatch,
}

#[derive(Debug, Serialize)]
pub struct LibraryResponse {
    pub library: Vec<LibraryEntry>,
}

#[derive(Debug, Serialize)]
pub struct FavoritesResponse {
    pub favorites: Vec<LibraryEntry>,
}

/// Put a book on the caller's shelf
pub async fn create_interaction(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    ApiJson(request): ApiJson<NewInteraction>,
) -> Result<(StatusCode, Json<Interaction>), ApiError> {
    let interaction = state.reader.add_interaction(&user, request).await?;
    tracing::debug!(%user, book_id = %interaction.book_id, "Book shelved");
    Ok((StatusCode::CREATED, Json(interaction)))
}

/// Change status or favorite flag of a shelved book
pub async fn update_interaction(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    ApiJson(request): ApiJson<UpdateInteraction>,
) -> Result<Json<Interaction>, ApiError> {
    let interaction = state
        .reader
        .update_interaction(&user, request.book_id, request.patch)
        .await?;
    Ok(Json(interaction))
}

pub async fn my_library(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<LibraryResponse>, ApiError> {
    let library = state.reader.library(&user, false).await?;
    Ok(Json(LibraryResponse { library }))
}

pub async fn favorites(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<FavoritesResponse>, ApiError> {
    let favorites = state.reader.library(&user, true).await?;
    Ok(Json(FavoritesResponse { favorites }))
}
