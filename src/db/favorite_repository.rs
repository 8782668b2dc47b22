use async_trait::async_trait;

use crate::db::models::Favorite;
use crate::error::AppError;

/// Repository trait for user favorites.
#[async_trait]
pub trait FavoriteRepository: Send + Sync {
    /// Insert the favorite, or overwrite the existing one for the same
    /// `(user_id, document_id)` pair.
    async fn upsert(&self, favorite: Favorite) -> Result<(), AppError>;

    /// All favorites of a user, newest first.
    async fn list_for_user(&self, user_id: &str) -> Result<Vec<Favorite>, AppError>;
}

/// MongoDB implementation of the FavoriteRepository.
pub struct MongoFavoriteRepository {
    collection: mongodb::Collection<Favorite>,
}

impl MongoFavoriteRepository {
    pub fn new(db: &mongodb::Database) -> Self {
        Self {
            collection: db.collection("favorite"),
        }
    }

    /// Create the unique `(user_id, document_id)` index.
    ///
    /// With the index in place, concurrent upserts for the same pair
    /// converge on a single record. Safe to call on every startup.
    pub async fn ensure_indexes(&self) -> Result<(), AppError> {
        use mongodb::bson::doc;
        use mongodb::options::IndexOptions;
        use mongodb::IndexModel;

        let index = IndexModel::builder()
            .keys(doc! { "user_id": 1, "document_id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("user_document_unique".to_string())
                    .build(),
            )
            .build();

        self.collection
            .create_index(index)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(())
    }
}

#[async_trait]
impl FavoriteRepository for MongoFavoriteRepository {
    async fn upsert(&self, favorite: Favorite) -> Result<(), AppError> {
        use mongodb::bson::{doc, to_document};
        use mongodb::options::UpdateOptions;

        let filter = doc! {
            "user_id": &favorite.user_id,
            "document_id": &favorite.document_id,
        };
        let fields = to_document(&favorite).map_err(|e| AppError::Database(e.to_string()))?;
        let options = UpdateOptions::builder().upsert(true).build();

        self.collection
            .update_one(filter, doc! { "$set": fields })
            .with_options(options)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(())
    }

    async fn list_for_user(&self, user_id: &str) -> Result<Vec<Favorite>, AppError> {
        use futures::TryStreamExt;
        use mongodb::bson::doc;
        use mongodb::options::FindOptions;

        let options = FindOptions::builder()
            .sort(doc! { "created_at": -1 })
            .build();

        let cursor = self
            .collection
            .find(doc! { "user_id": user_id })
            .with_options(options)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        cursor
            .try_collect()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}
