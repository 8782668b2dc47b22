use async_trait::async_trait;

use crate::db::models::{Bookmark, BookmarkFilter};
use crate::error::AppError;

/// Repository trait for bookmarks. Bookmarks are append-only.
#[async_trait]
pub trait BookmarkRepository: Send + Sync {
    /// Store a new bookmark. Duplicates are allowed.
    async fn insert(&self, bookmark: Bookmark) -> Result<(), AppError>;

    /// Bookmarks matching the filter, newest first.
    async fn list(&self, filter: &BookmarkFilter) -> Result<Vec<Bookmark>, AppError>;
}

/// MongoDB implementation of the BookmarkRepository.
pub struct MongoBookmarkRepository {
    collection: mongodb::Collection<Bookmark>,
}

impl MongoBookmarkRepository {
    pub fn new(db: &mongodb::Database) -> Self {
        Self {
            collection: db.collection("bookmark"),
        }
    }
}

#[async_trait]
impl BookmarkRepository for MongoBookmarkRepository {
    async fn insert(&self, bookmark: Bookmark) -> Result<(), AppError> {
        self.collection
            .insert_one(bookmark)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(())
    }

    async fn list(&self, filter: &BookmarkFilter) -> Result<Vec<Bookmark>, AppError> {
        use futures::TryStreamExt;
        use mongodb::bson::doc;
        use mongodb::options::FindOptions;

        let mut query = doc! {};
        if let Some(owner) = &filter.owner {
            query.insert("owner", owner.as_str());
        }
        if let Some(shared) = filter.shared {
            query.insert("shared", shared);
        }

        let options = FindOptions::builder()
            .sort(doc! { "created_at": -1 })
            .build();

        let cursor = self
            .collection
            .find(query)
            .with_options(options)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        cursor
            .try_collect()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}
