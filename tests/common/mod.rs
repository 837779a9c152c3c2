#![allow(dead_code)]

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use reqwest::StatusCode;

use filmoteka_api::api::{self, AppState};
use filmoteka_api::auth::AccessPolicy;
use filmoteka_api::database::MemoryCatalog;

pub const ADMIN_TOKEN: &str = "integration-admin-token";
pub const USER_TOKEN: &str = "integration-viewer-token";

pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    pub catalog: Arc<MemoryCatalog>,
    pub client: reqwest::Client,
}

impl TestServer {
    /// Serve the real router over an empty in-memory catalog.
    ///
    /// The server task lives on the test's runtime, so every test gets its own.
    async fn spawn() -> Result<Self> {
        // Pick an unused port for isolation
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        let catalog = Arc::new(MemoryCatalog::new());
        let state = AppState::new(catalog.clone(), AccessPolicy::new(ADMIN_TOKEN));
        let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
            .await
            .with_context(|| format!("failed to bind port {}", port))?;

        tokio::spawn(async move {
            let _ = axum::serve(listener, api::router(state)).await;
        });

        Ok(Self {
            port,
            base_url,
            catalog,
            client: reqwest::Client::new(),
        })
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let deadline = Instant::now() + timeout;
        loop {
            if Instant::now() > deadline {
                break;
            }
            let url = format!("{}/health", self.base_url);
            if let Ok(resp) = self.client.get(&url).send().await {
                if resp.status() == StatusCode::OK {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn get(&self, path: &str, token: Option<&str>) -> Result<reqwest::Response> {
        let mut req = self.client.get(self.url(path));
        if let Some(token) = token {
            req = req.header("Authorization", token);
        }
        Ok(req.send().await?)
    }

    pub async fn post_json(
        &self,
        path: &str,
        token: Option<&str>,
        body: &serde_json::Value,
    ) -> Result<reqwest::Response> {
        let mut req = self.client.post(self.url(path)).json(body);
        if let Some(token) = token {
            req = req.header("Authorization", token);
        }
        Ok(req.send().await?)
    }

    /// Add a movie as admin and return its id as seen through `GET /movies`.
    pub async fn add_movie(&self, title: &str, release_date: &str, rating: f64) -> Result<i64> {
        let res = self
            .post_json(
                "/movies/add",
                Some(ADMIN_TOKEN),
                &serde_json::json!({ "title": title, "release_date": release_date, "rating": rating }),
            )
            .await?;
        anyhow::ensure!(res.status() == StatusCode::CREATED, "add movie failed: {}", res.status());
        self.find_id("/movies", "title", title).await
    }

    /// Add an actor as admin and return its id as seen through `GET /actors`.
    pub async fn add_actor(&self, name: &str) -> Result<i64> {
        let res = self
            .post_json("/actors/add", Some(ADMIN_TOKEN), &serde_json::json!({ "name": name }))
            .await?;
        anyhow::ensure!(res.status() == StatusCode::CREATED, "add actor failed: {}", res.status());
        self.find_id("/actors", "name", name).await
    }

    async fn find_id(&self, path: &str, field: &str, value: &str) -> Result<i64> {
        let rows: Vec<serde_json::Value> = self.get(path, Some(USER_TOKEN)).await?.json().await?;
        rows.iter()
            .find(|row| row[field] == value)
            .and_then(|row| row["id"].as_i64())
            .with_context(|| format!("{} {} not listed at {}", field, value, path))
    }
}

pub async fn start_server() -> Result<TestServer> {
    let server = TestServer::spawn().await?;
    server.wait_ready(Duration::from_secs(10)).await?;
    Ok(server)
}
