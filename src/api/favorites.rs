use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use chrono::Utc;
use serde::Deserialize;

use crate::api::expand::{require_document, soft_join};
use crate::api::params::LastValueQuery;
use crate::db::favorite_repository::FavoriteRepository;
use crate::db::models::{CreateFavoriteRequest, Favorite, FavoriteView, StatusResponse};
use crate::db::repository::DocumentRepository;
use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Clone, Deserialize)]
pub struct FavoritesParams {
    pub user_id: String,
}

/// Core favorite logic — separated from the HTTP layer for testability.
///
/// Validates the referenced document before writing, then upserts so the
/// pair has exactly one favorite carrying the latest note.
pub async fn process_add_favorite(
    documents: &dyn DocumentRepository,
    favorites: &dyn FavoriteRepository,
    request: CreateFavoriteRequest,
) -> Result<StatusResponse, AppError> {
    require_document(documents, &request.document_id).await?;

    favorites
        .upsert(Favorite {
            user_id: request.user_id,
            document_id: request.document_id,
            note: request.note,
            created_at: Utc::now(),
        })
        .await?;

    Ok(StatusResponse::ok())
}

/// A user's favorites, newest first, each expanded with its document.
pub async fn process_list_favorites(
    documents: &dyn DocumentRepository,
    favorites: &dyn FavoriteRepository,
    user_id: &str,
) -> Result<Vec<FavoriteView>, AppError> {
    let records = favorites.list_for_user(user_id).await?;

    soft_join(documents, records, |favorite, document| FavoriteView {
        document: document.into(),
        saved_at: favorite.created_at,
        note: favorite.note,
    })
    .await
}

/// Axum handler for `POST /api/favorites`.
pub async fn add_favorite_handler(
    State(state): State<AppState>,
    payload: Result<Json<CreateFavoriteRequest>, JsonRejection>,
) -> Result<Json<StatusResponse>, AppError> {
    let Json(request) = payload?;

    let response = process_add_favorite(
        state.document_repo.as_ref(),
        state.favorite_repo.as_ref(),
        request,
    )
    .await?;

    Ok(Json(response))
}

/// Axum handler for `GET /api/favorites`.
pub async fn list_favorites_handler(
    State(state): State<AppState>,
    LastValueQuery(params): LastValueQuery<FavoritesParams>,
) -> Result<Json<Vec<FavoriteView>>, AppError> {
    let favorites = process_list_favorites(
        state.document_repo.as_ref(),
        state.favorite_repo.as_ref(),
        &params.user_id,
    )
    .await?;

    Ok(Json(favorites))
}
