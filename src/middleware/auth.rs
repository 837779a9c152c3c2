use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};

use crate::auth::{AccessPolicy, Decision};
use crate::error::ApiError;

/// Gate every catalog request on the static-token access policy.
///
/// Runs before any handler, so a denied request never reaches storage. The
/// header value is the credential as-is; an unreadable header counts as absent.
pub async fn access_policy_middleware(
    State(policy): State<Arc<AccessPolicy>>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let credential = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("");
    let path = request.uri().path();

    match policy.authorize(credential, path) {
        Decision::Allow => {
            let role = policy.role_for(credential).map(|r| r.as_str()).unwrap_or("none");
            tracing::debug!(path, role, "Request authorized");
            Ok(next.run(request).await)
        }
        Decision::Unauthorized => {
            tracing::info!(path, "Rejected request without credentials");
            Err(ApiError::unauthorized("Unauthorized"))
        }
        Decision::Forbidden => {
            tracing::info!(path, "Rejected request with insufficient role");
            Err(ApiError::forbidden("Forbidden"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        http::StatusCode,
        middleware,
        routing::{get, post},
        Router,
    };
    use tower::ServiceExt;

    fn app() -> Router {
        let policy = Arc::new(AccessPolicy::new("root-token"));
        Router::new()
            .route("/movies", get(|| async { "listing" }))
            .route("/movies/add", post(|| async { "added" }))
            .route_layer(middleware::from_fn_with_state(policy, access_policy_middleware))
    }

    async fn send(method: &str, uri: &str, token: Option<&str>) -> (StatusCode, String) {
        let mut builder = axum::http::Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(AUTHORIZATION, token);
        }
        let response = app()
            .oneshot(builder.body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn missing_header_is_unauthorized() {
        let (status, body) = send("GET", "/movies", None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body, "Unauthorized");
    }

    #[tokio::test]
    async fn empty_header_is_unauthorized() {
        let (status, _) = send("POST", "/movies/add", Some("")).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn regular_token_reads_but_cannot_write() {
        let (status, body) = send("GET", "/movies", Some("viewer")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "listing");

        let (status, body) = send("POST", "/movies/add", Some("viewer")).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body, "Forbidden");
    }

    #[tokio::test]
    async fn admin_token_writes() {
        let (status, body) = send("POST", "/movies/add", Some("root-token")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "added");
    }

    #[tokio::test]
    async fn query_string_does_not_affect_path_match() {
        let (status, _) = send("GET", "/movies?sort_by=title", Some("viewer")).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn unknown_routes_skip_authorization() {
        let (status, _) = send("GET", "/nowhere", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
