//! Joining favorites and bookmarks back to the documents they reference.
//!
//! References are not owned: a record may point at a document that no
//! longer exists. Reads treat that as a soft join and omit the row.

use futures::{stream, StreamExt, TryStreamExt};
use mongodb::bson::oid::ObjectId;

use crate::db::models::{parse_object_id, Bookmark, Document, Favorite};
use crate::db::repository::DocumentRepository;
use crate::error::AppError;

/// Document lookups kept in flight at once while expanding a listing.
pub const MAX_CONCURRENT_LOOKUPS: usize = 16;

/// A record holding a reference to a document.
pub trait DocumentRef {
    fn document_id(&self) -> &str;
}

impl DocumentRef for Favorite {
    fn document_id(&self) -> &str {
        &self.document_id
    }
}

impl DocumentRef for Bookmark {
    fn document_id(&self) -> &str {
        &self.document_id
    }
}

/// Resolve a stored reference. Unparsable keys resolve to `None`, exactly
/// like keys pointing at deleted documents.
pub async fn lookup_document(
    repo: &dyn DocumentRepository,
    raw_id: &str,
) -> Result<Option<Document>, AppError> {
    let Ok(id) = ObjectId::parse_str(raw_id) else {
        tracing::debug!("Skipping reference with malformed document id '{}'", raw_id);
        return Ok(None);
    };
    repo.find_by_id(&id).await
}

/// Expand each record with its document, dropping records whose document is
/// missing. Store errors still propagate. Input order is preserved and at
/// most `MAX_CONCURRENT_LOOKUPS` lookups run concurrently.
pub async fn soft_join<R, T, F>(
    repo: &dyn DocumentRepository,
    records: Vec<R>,
    merge: F,
) -> Result<Vec<T>, AppError>
where
    R: DocumentRef,
    F: Fn(R, Document) -> T,
{
    let lookups: Vec<_> = records
        .iter()
        .map(|record| lookup_document(repo, record.document_id()))
        .collect();
    let documents: Vec<Option<Document>> = stream::iter(lookups)
        .buffered(MAX_CONCURRENT_LOOKUPS)
        .try_collect()
        .await?;

    Ok(records
        .into_iter()
        .zip(documents)
        .filter_map(|(record, document)| document.map(|doc| merge(record, doc)))
        .collect())
}

/// Validate a client-supplied reference before writing it: the id must
/// parse (`BadRequest`) and the document must exist (`NotFound`).
pub async fn require_document(
    repo: &dyn DocumentRepository,
    raw_id: &str,
) -> Result<Document, AppError> {
    let id = parse_object_id(raw_id)?;
    repo.find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::NotFound("Document not found".into()))
}
