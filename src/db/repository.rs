use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;

use crate::db::models::Document;
use crate::error::AppError;
use crate::search::query::DocumentQuery;

/// Repository trait for document operations.
///
/// This trait allows mocking the database layer in tests.
#[async_trait]
pub trait DocumentRepository: Send + Sync {
    /// Find a document by its store key.
    async fn find_by_id(&self, id: &ObjectId) -> Result<Option<Document>, AppError>;

    /// Find the document flagged `latest` within a canonical group.
    async fn find_latest_by_canonical(
        &self,
        canonical_id: &str,
    ) -> Result<Option<Document>, AppError>;

    /// Run a search, honoring the query's ordering and limit.
    async fn search(&self, query: &DocumentQuery) -> Result<Vec<Document>, AppError>;

    /// Most recently updated documents first.
    ///
    /// `limit` is passed to the store as-is: `0` means no limit and a
    /// negative value returns at most `|limit|` documents.
    async fn recent(&self, limit: i64) -> Result<Vec<Document>, AppError>;

    /// Total number of stored documents.
    async fn count(&self) -> Result<u64, AppError>;

    /// Bulk insert; store keys are assigned by the database.
    async fn insert_many(&self, docs: Vec<Document>) -> Result<(), AppError>;
}

/// MongoDB implementation of the DocumentRepository.
pub struct MongoDocumentRepository {
    collection: mongodb::Collection<Document>,
}

impl MongoDocumentRepository {
    pub fn new(db: &mongodb::Database) -> Self {
        Self {
            collection: db.collection("document"),
        }
    }

    async fn find_all(
        &self,
        filter: mongodb::bson::Document,
        options: mongodb::options::FindOptions,
    ) -> Result<Vec<Document>, AppError> {
        use futures::TryStreamExt;

        let cursor = self
            .collection
            .find(filter)
            .with_options(options)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        cursor
            .try_collect()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}

#[async_trait]
impl DocumentRepository for MongoDocumentRepository {
    async fn find_by_id(&self, id: &ObjectId) -> Result<Option<Document>, AppError> {
        use mongodb::bson::doc;

        self.collection
            .find_one(doc! { "_id": id })
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    async fn find_latest_by_canonical(
        &self,
        canonical_id: &str,
    ) -> Result<Option<Document>, AppError> {
        use mongodb::bson::doc;

        self.collection
            .find_one(doc! { "canonical_id": canonical_id, "latest": true })
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    async fn search(&self, query: &DocumentQuery) -> Result<Vec<Document>, AppError> {
        use mongodb::options::FindOptions;

        let mut options = FindOptions::builder().limit(query.limit).build();
        options.sort = query.sort_spec();

        self.find_all(query.to_filter(), options).await
    }

    async fn recent(&self, limit: i64) -> Result<Vec<Document>, AppError> {
        use mongodb::bson::doc;
        use mongodb::options::FindOptions;

        let options = FindOptions::builder()
            .sort(doc! { "last_updated": -1 })
            .limit(limit)
            .build();

        self.find_all(doc! {}, options).await
    }

    async fn count(&self) -> Result<u64, AppError> {
        use mongodb::bson::doc;

        self.collection
            .count_documents(doc! {})
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    async fn insert_many(&self, docs: Vec<Document>) -> Result<(), AppError> {
        if docs.is_empty() {
            return Ok(());
        }

        self.collection
            .insert_many(docs)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(())
    }
}
