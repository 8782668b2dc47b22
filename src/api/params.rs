use axum::extract::{FromRequestParts, Query};
use axum::http::request::Parts;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::AppError;

/// Query-string extractor where a repeated key resolves to its last value.
///
/// `axum::extract::Query` rejects `?q=a&q=b` as a duplicate field. Browsers
/// and form helpers send that shape routinely, so parameters are read as raw
/// pairs and collapsed before typed deserialization. Rejections go through
/// `AppError` so clients always get the JSON error body.
#[derive(Debug, Clone)]
pub struct LastValueQuery<T>(pub T);

impl<T: DeserializeOwned> LastValueQuery<T> {
    pub fn from_pairs<I>(pairs: I) -> Result<Self, AppError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let collapsed: Map<String, Value> = pairs
            .into_iter()
            .map(|(key, value)| (key, Value::String(value)))
            .collect();

        serde_json::from_value(Value::Object(collapsed))
            .map(LastValueQuery)
            .map_err(|e| AppError::BadRequest(format!("Invalid query parameters: {}", e)))
    }
}

impl<T, S> FromRequestParts<S> for LastValueQuery<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Query(pairs) = Query::<Vec<(String, String)>>::try_from_uri(&parts.uri)?;
        Self::from_pairs(pairs)
    }
}
