use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// High-level document category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocType {
    Policies,
    Forms,
    Templates,
    Guides,
    Checklists,
}

impl DocType {
    /// All types, in the order they are suggested to clients.
    pub const ALL: [DocType; 5] = [
        DocType::Policies,
        DocType::Forms,
        DocType::Guides,
        DocType::Templates,
        DocType::Checklists,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DocType::Policies => "Policies",
            DocType::Forms => "Forms",
            DocType::Templates => "Templates",
            DocType::Guides => "Guides",
            DocType::Checklists => "Checklists",
        }
    }
}

/// Organizational department a document applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Department {
    Engineering,
    Sales,
    Marketing,
    Operations,
    Finance,
    #[serde(rename = "Customer Support")]
    CustomerSupport,
    Design,
}

impl Department {
    pub const ALL: [Department; 7] = [
        Department::Engineering,
        Department::Sales,
        Department::Marketing,
        Department::Operations,
        Department::Finance,
        Department::CustomerSupport,
        Department::Design,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Department::Engineering => "Engineering",
            Department::Sales => "Sales",
            Department::Marketing => "Marketing",
            Department::Operations => "Operations",
            Department::Finance => "Finance",
            Department::CustomerSupport => "Customer Support",
            Department::Design => "Design",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FileFormat {
    #[serde(rename = "PDF")]
    Pdf,
    #[serde(rename = "DOCX")]
    Docx,
    #[serde(rename = "XLSX")]
    Xlsx,
}

fn default_latest() -> bool {
    true
}

/// A versioned HR document as stored in the `document` collection.
///
/// `last_updated` is stored as a BSON datetime so that range filters and
/// sorting compare chronologically.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Store key. `None` until MongoDB assigns one.
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub title: String,
    pub doc_type: DocType,
    #[serde(default)]
    pub departments: Vec<Department>,
    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub last_updated: DateTime<Utc>,
    /// Free-form version label (e.g. `v3.2`).
    pub version: String,
    /// Whether this is the current version within its canonical group.
    #[serde(default = "default_latest")]
    pub latest: bool,
    pub size_kb: u32,
    pub format: FileFormat,
    /// Stable identifier shared by every version of the same logical document.
    pub canonical_id: String,
    pub download_url: String,
}

/// A user's personal marking of a document. Unique per `(user_id, document_id)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Favorite {
    pub user_id: String,
    /// Hex form of the referenced document's store key.
    pub document_id: String,
    pub note: Option<String>,
    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
}

/// A named, optionally team-shared marking of a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bookmark {
    pub name: String,
    /// User or team owning the bookmark.
    pub owner: String,
    pub document_id: String,
    #[serde(default)]
    pub shared: bool,
    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
}

/// Optional exact-match filters for listing bookmarks.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookmarkFilter {
    pub owner: Option<String>,
    pub shared: Option<bool>,
}

/// Parse a document identifier into a store key.
pub fn parse_object_id(raw: &str) -> Result<ObjectId, AppError> {
    ObjectId::parse_str(raw).map_err(|_| AppError::BadRequest("Invalid document id".into()))
}

// -- API payloads --

/// Request payload for `POST /api/favorites`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFavoriteRequest {
    pub user_id: String,
    pub document_id: String,
    #[serde(default)]
    pub note: Option<String>,
}

/// Request payload for `POST /api/bookmarks`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBookmarkRequest {
    pub name: String,
    pub owner: String,
    pub document_id: String,
    #[serde(default)]
    pub shared: bool,
}

/// Acknowledgement returned by write endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: String,
}

impl StatusResponse {
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
        }
    }
}

/// Client-facing document: the store key is exposed as a hex `id` and
/// timestamps are plain RFC 3339 strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentView {
    pub id: String,
    pub title: String,
    pub doc_type: DocType,
    pub departments: Vec<Department>,
    pub last_updated: DateTime<Utc>,
    pub version: String,
    pub latest: bool,
    pub size_kb: u32,
    pub format: FileFormat,
    pub canonical_id: String,
    pub download_url: String,
}

impl From<Document> for DocumentView {
    fn from(doc: Document) -> Self {
        Self {
            id: doc.id.map(|oid| oid.to_hex()).unwrap_or_default(),
            title: doc.title,
            doc_type: doc.doc_type,
            departments: doc.departments,
            last_updated: doc.last_updated,
            version: doc.version,
            latest: doc.latest,
            size_kb: doc.size_kb,
            format: doc.format,
            canonical_id: doc.canonical_id,
            download_url: doc.download_url,
        }
    }
}

/// A favorite expanded with its document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FavoriteView {
    #[serde(flatten)]
    pub document: DocumentView,
    pub saved_at: DateTime<Utc>,
    pub note: Option<String>,
}

/// Bookmark details nested under an expanded document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookmarkInfo {
    pub name: String,
    pub owner: String,
    pub shared: bool,
    pub created_at: DateTime<Utc>,
}

/// A bookmark expanded with its document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookmarkView {
    #[serde(flatten)]
    pub document: DocumentView,
    pub bookmark: BookmarkInfo,
}
