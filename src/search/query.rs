//! Translation of raw search parameters into a document store query.
//!
//! Parameters arrive as untyped query-string values. Nothing here fails:
//! anything absent, empty or malformed simply leaves that dimension
//! unfiltered.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use mongodb::bson::{doc, Document as BsonDocument};
use serde::{Deserialize, Serialize};

#[cfg(test)]
use crate::db::models::Document;

/// Default number of results when `limit` is absent or unparsable.
pub const DEFAULT_SEARCH_LIMIT: i64 = 50;
/// Upper bound applied to any requested search limit.
pub const MAX_SEARCH_LIMIT: i64 = 250;

/// Raw query-string parameters of `GET /api/documents`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchParams {
    /// Free text matched against the title.
    pub q: Option<String>,
    pub doc_type: Option<String>,
    /// Comma separated department names.
    pub departments: Option<String>,
    pub date_from: Option<String>,
    pub date_to: Option<String>,
    pub sort: Option<String>,
    pub limit: Option<String>,
}

/// Result ordering for a search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    /// No scoring model exists: results keep the store's natural order.
    #[default]
    Relevance,
    /// Most recently updated first.
    LastUpdated,
}

impl SortOrder {
    /// Unknown values fall back to `Relevance`.
    pub fn parse(raw: &str) -> Self {
        match raw.trim() {
            "last_updated" => SortOrder::LastUpdated,
            _ => SortOrder::Relevance,
        }
    }
}

/// A fully resolved document search.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentQuery {
    /// Case-insensitive literal substring of the title.
    pub title_contains: Option<String>,
    pub doc_type: Option<String>,
    /// Matches documents sharing at least one of these departments.
    pub departments: Vec<String>,
    /// Inclusive lower bound on `last_updated`.
    pub updated_from: Option<DateTime<Utc>>,
    /// Inclusive upper bound on `last_updated`.
    pub updated_to: Option<DateTime<Utc>>,
    pub sort: SortOrder,
    /// Always within `[1, MAX_SEARCH_LIMIT]`.
    pub limit: i64,
}

impl Default for DocumentQuery {
    fn default() -> Self {
        Self {
            title_contains: None,
            doc_type: None,
            departments: Vec::new(),
            updated_from: None,
            updated_to: None,
            sort: SortOrder::Relevance,
            limit: DEFAULT_SEARCH_LIMIT,
        }
    }
}

impl DocumentQuery {
    pub fn from_params(params: &SearchParams) -> Self {
        let requested_limit = params
            .limit
            .as_deref()
            .and_then(|raw| raw.trim().parse::<i64>().ok())
            .unwrap_or(DEFAULT_SEARCH_LIMIT);

        Self {
            title_contains: non_empty(params.q.as_deref()).map(str::to_string),
            doc_type: non_empty(params.doc_type.as_deref()).map(str::to_string),
            departments: params
                .departments
                .as_deref()
                .map(parse_departments)
                .unwrap_or_default(),
            updated_from: params.date_from.as_deref().and_then(parse_timestamp),
            updated_to: params.date_to.as_deref().and_then(parse_timestamp),
            sort: params
                .sort
                .as_deref()
                .map(SortOrder::parse)
                .unwrap_or_default(),
            limit: clamp_search_limit(requested_limit),
        }
    }

    /// MongoDB filter document for this query.
    pub fn to_filter(&self) -> BsonDocument {
        let mut filter = BsonDocument::new();

        if let Some(text) = &self.title_contains {
            filter.insert(
                "title",
                doc! { "$regex": escape_regex(text), "$options": "i" },
            );
        }
        if let Some(doc_type) = &self.doc_type {
            filter.insert("doc_type", doc_type.as_str());
        }
        if !self.departments.is_empty() {
            filter.insert("departments", doc! { "$in": &self.departments });
        }

        let mut range = BsonDocument::new();
        if let Some(from) = self.updated_from {
            range.insert("$gte", bson::DateTime::from_chrono(from));
        }
        if let Some(to) = self.updated_to {
            range.insert("$lte", bson::DateTime::from_chrono(to));
        }
        if !range.is_empty() {
            filter.insert("last_updated", range);
        }

        filter
    }

    /// MongoDB sort specification, `None` for natural order.
    pub fn sort_spec(&self) -> Option<BsonDocument> {
        match self.sort {
            SortOrder::LastUpdated => Some(doc! { "last_updated": -1 }),
            SortOrder::Relevance => None,
        }
    }

    /// In-process evaluation of the same predicate `to_filter` expresses,
    /// backing the in-memory repository.
    #[cfg(test)]
    pub fn matches(&self, document: &Document) -> bool {
        if let Some(text) = &self.title_contains {
            if !document
                .title
                .to_lowercase()
                .contains(&text.to_lowercase())
            {
                return false;
            }
        }
        if let Some(doc_type) = &self.doc_type {
            if document.doc_type.as_str() != doc_type {
                return false;
            }
        }
        if !self.departments.is_empty()
            && !document
                .departments
                .iter()
                .any(|dept| self.departments.iter().any(|d| d == dept.as_str()))
        {
            return false;
        }
        if self.updated_from.is_some_and(|from| document.last_updated < from) {
            return false;
        }
        if self.updated_to.is_some_and(|to| document.last_updated > to) {
            return false;
        }
        true
    }
}

fn non_empty(raw: Option<&str>) -> Option<&str> {
    raw.filter(|s| !s.is_empty())
}

/// Split a comma separated list, trimming entries and dropping empty ones.
pub fn parse_departments(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(str::to_string)
        .collect()
}

/// Naive datetime layouts, taken as UTC.
const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Datetime layouts carrying a `+HH:MM` offset.
const OFFSET_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f%:z",
    "%Y-%m-%dT%H:%M%:z",
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M%:z",
];

/// Parse an ISO-8601 date or datetime. Naive values are taken as UTC and a
/// bare date means midnight. Either `T` or a space separates date and time,
/// minutes and seconds may be omitted, and a trailing `Z` means UTC.
/// Returns `None` for anything malformed.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
    }
    if let Some(dt) = parse_date_hour(raw) {
        return Some(dt.and_utc());
    }
    for format in NAIVE_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(dt.and_utc());
        }
    }

    let with_offset = match raw.strip_suffix('Z').or_else(|| raw.strip_suffix('z')) {
        Some(rest) => format!("{}+00:00", rest),
        None => raw.to_string(),
    };
    OFFSET_FORMATS
        .iter()
        .find_map(|format| DateTime::parse_from_str(&with_offset, format).ok())
        .map(|dt| dt.with_timezone(&Utc))
}

/// `YYYY-MM-DDTHH` or `YYYY-MM-DD HH`, which chrono will not parse without
/// minutes.
fn parse_date_hour(raw: &str) -> Option<NaiveDateTime> {
    if raw.len() != 13 || !matches!(raw.get(10..11)?, "T" | " ") {
        return None;
    }
    let date = NaiveDate::parse_from_str(raw.get(..10)?, "%Y-%m-%d").ok()?;
    let hour_digits = raw.get(11..)?;
    if !hour_digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    date.and_hms_opt(hour_digits.parse().ok()?, 0, 0)
}

pub fn clamp_search_limit(requested: i64) -> i64 {
    requested.clamp(1, MAX_SEARCH_LIMIT)
}

/// Escape regex metacharacters so free text matches literally.
fn escape_regex(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(
            c,
            '\\' | '.' | '+' | '*' | '?' | '(' | ')' | '|' | '[' | ']' | '{' | '}' | '^' | '$'
                | '#' | '-'
        ) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
