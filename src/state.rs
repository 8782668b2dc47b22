use std::sync::Arc;

use crate::config::ExplicitSettings;
use crate::db::bookmark_repository::{BookmarkRepository, MongoBookmarkRepository};
use crate::db::diagnostics::{MongoStoreProbe, StoreProbe};
use crate::db::favorite_repository::{FavoriteRepository, MongoFavoriteRepository};
use crate::db::repository::{DocumentRepository, MongoDocumentRepository};

/// Shared handler state. Every store-backed component is injected as a
/// trait object so tests can swap in their own implementations.
#[derive(Clone)]
pub struct AppState {
    pub document_repo: Arc<dyn DocumentRepository>,
    pub favorite_repo: Arc<dyn FavoriteRepository>,
    pub bookmark_repo: Arc<dyn BookmarkRepository>,
    pub store_probe: Arc<dyn StoreProbe>,
    /// Which store settings were set explicitly, for diagnostics.
    pub explicit_settings: ExplicitSettings,
}

impl AppState {
    /// Wire MongoDB-backed components onto one database handle.
    pub fn from_mongo(db: &mongodb::Database, explicit_settings: ExplicitSettings) -> Self {
        Self {
            document_repo: Arc::new(MongoDocumentRepository::new(db)),
            favorite_repo: Arc::new(MongoFavoriteRepository::new(db)),
            bookmark_repo: Arc::new(MongoBookmarkRepository::new(db)),
            store_probe: Arc::new(MongoStoreProbe::new(db)),
            explicit_settings,
        }
    }
}
