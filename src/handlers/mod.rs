// handlers/mod.rs - catalog HTTP handlers
//
// Handlers stay thin: decode the request, call CatalogService, shape the
// response. Authorization happens in middleware before any of these run.

pub mod actors;
pub mod health;
pub mod movies;

use axum::body::Bytes;
use axum::extract::{rejection::QueryRejection, Query};
use serde::de::DeserializeOwned;

use crate::error::ApiError;

pub use health::health;

/// Decode a JSON body regardless of Content-Type. Malformed bodies are client errors.
pub(crate) fn parse_json<T: DeserializeOwned>(body: &Bytes) -> Result<T, ApiError> {
    serde_json::from_slice(body).map_err(|e| {
        tracing::info!(error = %e, "Rejected malformed JSON body");
        ApiError::invalid_input("Invalid JSON body")
    })
}

/// Raw query pairs in request order. Repeated keys are kept; lookups take
/// the first occurrence.
pub(crate) type QueryPairs = Result<Query<Vec<(String, String)>>, QueryRejection>;

pub(crate) struct QueryParams(Vec<(String, String)>);

impl QueryParams {
    pub(crate) fn from_request(query: QueryPairs) -> Result<Self, ApiError> {
        let Query(pairs) = query?;
        Ok(Self(pairs))
    }

    pub(crate) fn first(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::models::MovieRequest;
    use axum::http::StatusCode;

    #[test]
    fn parses_partial_body() {
        let body = Bytes::from_static(br#"{"title":"Inception"}"#);
        let req: MovieRequest = parse_json(&body).unwrap();
        assert_eq!(req.title, "Inception");
        assert_eq!(req.id, 0);
    }

    #[test]
    fn malformed_body_is_bad_request() {
        let body = Bytes::from_static(b"{not json");
        let err = parse_json::<MovieRequest>(&body).unwrap_err();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn first_occurrence_wins() {
        let params = QueryParams(vec![
            ("sort_by".into(), "title".into()),
            ("sort_order".into(), "asc".into()),
            ("sort_by".into(), "rating".into()),
        ]);
        assert_eq!(params.first("sort_by"), Some("title"));
        assert_eq!(params.first("sort_order"), Some("asc"));
        assert_eq!(params.first("actor_name"), None);
    }

    #[test]
    fn wrong_shape_is_bad_request() {
        let body = Bytes::from_static(br#""seven""#);
        assert!(parse_json::<i32>(&body).is_err());
    }
}
