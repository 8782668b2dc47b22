use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use chrono::Utc;
use serde::Deserialize;

use crate::api::expand::{require_document, soft_join};
use crate::api::params::LastValueQuery;
use crate::db::bookmark_repository::BookmarkRepository;
use crate::db::models::{
    Bookmark, BookmarkFilter, BookmarkInfo, BookmarkView, CreateBookmarkRequest, StatusResponse,
};
use crate::db::repository::DocumentRepository;
use crate::error::AppError;
use crate::state::AppState;

/// Raw query-string parameters of `GET /api/bookmarks`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookmarksParams {
    pub owner: Option<String>,
    pub shared: Option<String>,
}

impl BookmarksParams {
    pub fn to_filter(&self) -> Result<BookmarkFilter, AppError> {
        let shared = match self.shared.as_deref() {
            None => None,
            Some(raw) => Some(parse_flag(raw).ok_or_else(|| {
                AppError::BadRequest(format!("Invalid value '{}' for 'shared'", raw))
            })?),
        };

        Ok(BookmarkFilter {
            owner: self.owner.clone().filter(|o| !o.is_empty()),
            shared,
        })
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Validates the referenced document, then appends a new bookmark.
pub async fn process_add_bookmark(
    documents: &dyn DocumentRepository,
    bookmarks: &dyn BookmarkRepository,
    request: CreateBookmarkRequest,
) -> Result<StatusResponse, AppError> {
    require_document(documents, &request.document_id).await?;

    bookmarks
        .insert(Bookmark {
            name: request.name,
            owner: request.owner,
            document_id: request.document_id,
            shared: request.shared,
            created_at: Utc::now(),
        })
        .await?;

    Ok(StatusResponse::ok())
}

pub async fn process_list_bookmarks(
    documents: &dyn DocumentRepository,
    bookmarks: &dyn BookmarkRepository,
    filter: &BookmarkFilter,
) -> Result<Vec<BookmarkView>, AppError> {
    let records = bookmarks.list(filter).await?;

    soft_join(documents, records, |bookmark, document| BookmarkView {
        document: document.into(),
        bookmark: BookmarkInfo {
            name: bookmark.name,
            owner: bookmark.owner,
            shared: bookmark.shared,
            created_at: bookmark.created_at,
        },
    })
    .await
}

/// Axum handler for `POST /api/bookmarks`.
pub async fn add_bookmark_handler(
    State(state): State<AppState>,
    payload: Result<Json<CreateBookmarkRequest>, JsonRejection>,
) -> Result<Json<StatusResponse>, AppError> {
    let Json(request) = payload?;

    let response = process_add_bookmark(
        state.document_repo.as_ref(),
        state.bookmark_repo.as_ref(),
        request,
    )
    .await?;

    Ok(Json(response))
}

/// Axum handler for `GET /api/bookmarks`.
pub async fn list_bookmarks_handler(
    State(state): State<AppState>,
    LastValueQuery(params): LastValueQuery<BookmarksParams>,
) -> Result<Json<Vec<BookmarkView>>, AppError> {
    let filter = params.to_filter()?;

    let bookmarks = process_list_bookmarks(
        state.document_repo.as_ref(),
        state.bookmark_repo.as_ref(),
        &filter,
    )
    .await?;

    Ok(Json(bookmarks))
}
