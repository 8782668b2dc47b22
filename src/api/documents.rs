use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::params::LastValueQuery;
use crate::db::models::{parse_object_id, Department, DocType, DocumentView};
use crate::db::repository::DocumentRepository;
use crate::error::AppError;
use crate::search::query::{DocumentQuery, SearchParams};
use crate::state::AppState;

/// Default number of documents returned by `GET /api/recents`.
pub const DEFAULT_RECENTS_LIMIT: i64 = 10;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Banner {
    pub message: String,
}

/// Known values clients can offer as filter choices.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Suggestions {
    pub suggested_types: Vec<String>,
    pub suggested_departments: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecentsParams {
    pub limit: Option<String>,
}

pub fn suggestions() -> Suggestions {
    Suggestions {
        suggested_types: DocType::ALL.iter().map(|t| t.as_str().to_string()).collect(),
        suggested_departments: Department::ALL
            .iter()
            .map(|d| d.as_str().to_string())
            .collect(),
    }
}

/// Core search logic. Never fails on bad parameters, only on store errors.
pub async fn process_search(
    repo: &dyn DocumentRepository,
    params: &SearchParams,
) -> Result<Vec<DocumentView>, AppError> {
    let query = DocumentQuery::from_params(params);
    tracing::debug!(?query, "Searching documents");

    let documents = repo.search(&query).await?;
    Ok(documents.into_iter().map(DocumentView::from).collect())
}

/// Most recently updated documents. Unlike search, the limit is not clamped.
pub async fn process_recents(
    repo: &dyn DocumentRepository,
    limit: i64,
) -> Result<Vec<DocumentView>, AppError> {
    let documents = repo.recent(limit).await?;
    Ok(documents.into_iter().map(DocumentView::from).collect())
}

pub async fn process_get_document(
    repo: &dyn DocumentRepository,
    raw_id: &str,
) -> Result<DocumentView, AppError> {
    let id = parse_object_id(raw_id)?;
    repo.find_by_id(&id)
        .await?
        .map(DocumentView::from)
        .ok_or_else(|| AppError::NotFound("Document not found".into()))
}

pub async fn process_get_latest(
    repo: &dyn DocumentRepository,
    canonical_id: &str,
) -> Result<DocumentView, AppError> {
    repo.find_latest_by_canonical(canonical_id)
        .await?
        .map(DocumentView::from)
        .ok_or_else(|| AppError::NotFound("Document not found".into()))
}

/// Axum handler for `GET /`.
pub async fn root_handler() -> Json<Banner> {
    Json(Banner {
        message: "TechVista HR Document Access API".to_string(),
    })
}

/// Axum handler for `GET /api/suggested`.
pub async fn suggested_handler() -> Json<Suggestions> {
    Json(suggestions())
}

/// Axum handler for `GET /api/recents`.
pub async fn recents_handler(
    State(state): State<AppState>,
    LastValueQuery(params): LastValueQuery<RecentsParams>,
) -> Result<Json<Vec<DocumentView>>, AppError> {
    let limit = params
        .limit
        .as_deref()
        .and_then(|raw| raw.trim().parse::<i64>().ok())
        .unwrap_or(DEFAULT_RECENTS_LIMIT);

    let documents = process_recents(state.document_repo.as_ref(), limit).await?;
    Ok(Json(documents))
}

/// Axum handler for `GET /api/documents`.
pub async fn search_handler(
    State(state): State<AppState>,
    LastValueQuery(params): LastValueQuery<SearchParams>,
) -> Result<Json<Vec<DocumentView>>, AppError> {
    let documents = process_search(state.document_repo.as_ref(), &params).await?;
    Ok(Json(documents))
}

/// Axum handler for `GET /api/documents/{id}`.
pub async fn get_document_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DocumentView>, AppError> {
    let document = process_get_document(state.document_repo.as_ref(), &id).await?;
    Ok(Json(document))
}

/// Axum handler for `GET /api/canonical/{canonical_id}/latest`.
pub async fn get_latest_handler(
    State(state): State<AppState>,
    Path(canonical_id): Path<String>,
) -> Result<Json<DocumentView>, AppError> {
    let document = process_get_latest(state.document_repo.as_ref(), &canonical_id).await?;
    Ok(Json(document))
}
