// api/mod.rs - router assembly and shared request state

use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::auth::AccessPolicy;
use crate::database::CatalogRepository;
use crate::error::ApiError;
use crate::handlers::{self, actors, movies};
use crate::middleware::access_policy_middleware;
use crate::services::CatalogService;

/// Shared state handed to every handler. Immutable after startup.
#[derive(Clone)]
pub struct AppState {
    pub catalog: CatalogService,
    pub policy: Arc<AccessPolicy>,
}

impl AppState {
    pub fn new(repository: Arc<dyn CatalogRepository>, policy: AccessPolicy) -> Self {
        Self {
            catalog: CatalogService::new(repository),
            policy: Arc::new(policy),
        }
    }
}

/// Build the full application router
pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(catalog_routes(state.clone()))
        // Public
        .route("/health", get(handlers::health))
        .fallback(not_found)
        .with_state(state)
        // Global middleware
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

fn catalog_routes(state: AppState) -> Router<AppState> {
    Router::new()
        // Movies
        .route("/movies", get(movies::list))
        .route("/movies/add", post(movies::add))
        .route("/movies/update", post(movies::update))
        .route("/movies/delete", get(movies::delete).delete(movies::delete))
        .route("/movies/update_actors", post(movies::update_actors))
        .route("/movies/search", get(movies::search))
        .route("/movies/search_by_actor", get(movies::search_by_actor))
        // Actors
        .route("/actors", get(actors::list))
        .route("/actors/add", post(actors::add))
        .route("/actors/update", post(actors::update))
        .route("/actors/delete", get(actors::delete).delete(actors::delete))
        .route("/actors/movies", get(actors::movies))
        // Only matched routes pass through the access policy
        .route_layer(middleware::from_fn_with_state(
            state.policy.clone(),
            access_policy_middleware,
        ))
}

async fn not_found() -> ApiError {
    ApiError::not_found("Not found")
}
