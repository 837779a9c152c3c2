mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::json;

use common::{ADMIN_TOKEN, USER_TOKEN};

#[tokio::test]
async fn health_endpoint_is_public() -> Result<()> {
    let server = common::start_server().await?;

    let res = server.get("/health", None).await?;
    assert_eq!(res.status(), StatusCode::OK);

    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["status"], "ok");
    assert!(body["timestamp"].is_string(), "missing timestamp: {}", body);
    Ok(())
}

#[tokio::test]
async fn catalog_routes_require_a_credential() -> Result<()> {
    let server = common::start_server().await?;

    for path in ["/movies", "/actors", "/movies/search?title_fragment=a", "/actors/delete?id=1"] {
        let res = server.get(path, None).await?;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED, "path {}", path);
        assert_eq!(res.text().await?, "Unauthorized");
    }

    let res = server.post_json("/movies/add", None, &json!({})).await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(server.catalog.call_count(), 0);
    Ok(())
}

#[tokio::test]
async fn regular_token_reads_allowlisted_routes() -> Result<()> {
    let server = common::start_server().await?;

    for path in [
        "/movies",
        "/movies/search?title_fragment=Heat",
        "/movies/search_by_actor?actor_name=Al%20Pacino",
        "/actors",
        "/actors/movies?actor_name=Al%20Pacino",
    ] {
        let res = server.get(path, Some(USER_TOKEN)).await?;
        assert_eq!(res.status(), StatusCode::OK, "path {}", path);
        let rows = res.json::<Vec<serde_json::Value>>().await?;
        assert!(rows.is_empty(), "expected empty catalog at {}", path);
    }
    Ok(())
}

#[tokio::test]
async fn regular_token_cannot_write() -> Result<()> {
    let server = common::start_server().await?;

    let res = server
        .post_json(
            "/movies/add",
            Some(USER_TOKEN),
            &json!({ "title": "Inception", "release_date": "2010.07.16", "rating": 8.8 }),
        )
        .await?;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
    assert_eq!(res.text().await?, "Forbidden");

    let res = server.get("/actors/delete?id=1", Some(USER_TOKEN)).await?;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    assert_eq!(server.catalog.call_count(), 0);
    Ok(())
}

#[tokio::test]
async fn bearer_prefix_is_not_stripped() -> Result<()> {
    let server = common::start_server().await?;

    let bearer = format!("Bearer {}", ADMIN_TOKEN);
    let res = server
        .post_json("/actors/add", Some(&bearer), &json!({ "name": "Al Pacino" }))
        .await?;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
    Ok(())
}

#[tokio::test]
async fn unknown_route_is_not_found_without_credentials() -> Result<()> {
    let server = common::start_server().await?;

    let res = server.get("/directors", None).await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    Ok(())
}
