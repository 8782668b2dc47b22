use async_trait::async_trait;

use crate::error::AppError;

/// Connectivity probe for the backing store.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StoreProbe: Send + Sync {
    /// Name of the database the service is bound to.
    fn database_name(&self) -> String;

    /// List collection names, failing with `AppError::Unavailable` when the
    /// store cannot be reached.
    async fn list_collections(&self) -> Result<Vec<String>, AppError>;
}

pub struct MongoStoreProbe {
    db: mongodb::Database,
}

impl MongoStoreProbe {
    pub fn new(db: &mongodb::Database) -> Self {
        Self { db: db.clone() }
    }
}

#[async_trait]
impl StoreProbe for MongoStoreProbe {
    fn database_name(&self) -> String {
        self.db.name().to_string()
    }

    async fn list_collections(&self) -> Result<Vec<String>, AppError> {
        self.db
            .list_collection_names()
            .await
            .map_err(|e| AppError::Unavailable(e.to_string()))
    }
}
