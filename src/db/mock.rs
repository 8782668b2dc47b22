//! In-memory repository implementations for unit tests.

use std::sync::Mutex;

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;

use crate::db::bookmark_repository::BookmarkRepository;
use crate::db::favorite_repository::FavoriteRepository;
use crate::db::models::{Bookmark, BookmarkFilter, Document, Favorite};
use crate::db::repository::DocumentRepository;
use crate::error::AppError;
use crate::search::query::{DocumentQuery, SortOrder};

pub struct MockDocumentRepo {
    pub documents: Mutex<Vec<Document>>,
}

impl MockDocumentRepo {
    pub fn new() -> Self {
        Self {
            documents: Mutex::new(vec![]),
        }
    }

    /// Store a document, assigning a fresh key, and return that key.
    pub fn add(&self, mut doc: Document) -> ObjectId {
        let id = ObjectId::new();
        doc.id = Some(id);
        self.documents.lock().unwrap().push(doc);
        id
    }

    pub fn remove(&self, id: &ObjectId) {
        self.documents.lock().unwrap().retain(|d| d.id.as_ref() != Some(id));
    }
}

fn sorted_by_update(mut docs: Vec<Document>) -> Vec<Document> {
    docs.sort_by(|a, b| b.last_updated.cmp(&a.last_updated));
    docs
}

#[async_trait]
impl DocumentRepository for MockDocumentRepo {
    async fn find_by_id(&self, id: &ObjectId) -> Result<Option<Document>, AppError> {
        Ok(self
            .documents
            .lock()
            .unwrap()
            .iter()
            .find(|d| d.id.as_ref() == Some(id))
            .cloned())
    }

    async fn find_latest_by_canonical(
        &self,
        canonical_id: &str,
    ) -> Result<Option<Document>, AppError> {
        Ok(self
            .documents
            .lock()
            .unwrap()
            .iter()
            .find(|d| d.canonical_id == canonical_id && d.latest)
            .cloned())
    }

    async fn search(&self, query: &DocumentQuery) -> Result<Vec<Document>, AppError> {
        let matching: Vec<Document> = self
            .documents
            .lock()
            .unwrap()
            .iter()
            .filter(|d| query.matches(d))
            .cloned()
            .collect();
        let ordered = match query.sort {
            SortOrder::LastUpdated => sorted_by_update(matching),
            SortOrder::Relevance => matching,
        };
        Ok(ordered.into_iter().take(query.limit as usize).collect())
    }

    async fn recent(&self, limit: i64) -> Result<Vec<Document>, AppError> {
        let docs = sorted_by_update(self.documents.lock().unwrap().clone());
        Ok(match limit {
            0 => docs,
            n => docs.into_iter().take(n.unsigned_abs() as usize).collect(),
        })
    }

    async fn count(&self) -> Result<u64, AppError> {
        Ok(self.documents.lock().unwrap().len() as u64)
    }

    async fn insert_many(&self, docs: Vec<Document>) -> Result<(), AppError> {
        for doc in docs {
            self.add(doc);
        }
        Ok(())
    }
}

pub struct MockFavoriteRepo {
    pub favorites: Mutex<Vec<Favorite>>,
}

impl MockFavoriteRepo {
    pub fn new() -> Self {
        Self {
            favorites: Mutex::new(vec![]),
        }
    }
}

#[async_trait]
impl FavoriteRepository for MockFavoriteRepo {
    async fn upsert(&self, favorite: Favorite) -> Result<(), AppError> {
        let mut favorites = self.favorites.lock().unwrap();
        favorites.retain(|f| {
            !(f.user_id == favorite.user_id && f.document_id == favorite.document_id)
        });
        favorites.push(favorite);
        Ok(())
    }

    async fn list_for_user(&self, user_id: &str) -> Result<Vec<Favorite>, AppError> {
        let mut favorites: Vec<Favorite> = self
            .favorites
            .lock()
            .unwrap()
            .iter()
            .filter(|f| f.user_id == user_id)
            .cloned()
            .collect();
        favorites.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(favorites)
    }
}

pub struct MockBookmarkRepo {
    pub bookmarks: Mutex<Vec<Bookmark>>,
}

impl MockBookmarkRepo {
    pub fn new() -> Self {
        Self {
            bookmarks: Mutex::new(vec![]),
        }
    }
}

#[async_trait]
impl BookmarkRepository for MockBookmarkRepo {
    async fn insert(&self, bookmark: Bookmark) -> Result<(), AppError> {
        self.bookmarks.lock().unwrap().push(bookmark);
        Ok(())
    }

    async fn list(&self, filter: &BookmarkFilter) -> Result<Vec<Bookmark>, AppError> {
        let mut bookmarks: Vec<Bookmark> = self
            .bookmarks
            .lock()
            .unwrap()
            .iter()
            .filter(|b| filter.owner.as_ref().map_or(true, |owner| &b.owner == owner))
            .filter(|b| filter.shared.map_or(true, |shared| b.shared == shared))
            .cloned()
            .collect();
        bookmarks.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(bookmarks)
    }
}
