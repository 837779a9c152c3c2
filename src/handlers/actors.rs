// handlers/actors.rs - /actors/* handlers

use axum::{body::Bytes, extract::State, response::Json};

use crate::api::AppState;
use crate::database::models::{Actor, ActorRequest, Movie};
use crate::middleware::{ApiResult, Confirmation};

use super::{parse_json, QueryPairs, QueryParams};

/// GET /actors - List all actors
pub async fn list(State(state): State<AppState>) -> ApiResult<Json<Vec<Actor>>> {
    Ok(Json(state.catalog.list_actors().await?))
}

/// POST /actors/add
pub async fn add(State(state): State<AppState>, body: Bytes) -> ApiResult<Confirmation> {
    let request: ActorRequest = parse_json(&body)?;
    state.catalog.add_actor(request).await?;
    Ok(Confirmation::created("Actor added"))
}

/// POST /actors/update - Change the provided fields of an existing actor
pub async fn update(State(state): State<AppState>, body: Bytes) -> ApiResult<Confirmation> {
    let request: ActorRequest = parse_json(&body)?;
    state.catalog.update_actor(request).await?;
    Ok(Confirmation::ok("Actor updated"))
}

/// GET|DELETE /actors/delete?id=
pub async fn delete(State(state): State<AppState>, query: QueryPairs) -> ApiResult<Confirmation> {
    let params = QueryParams::from_request(query)?;
    state.catalog.delete_actor(params.first("id")).await?;
    Ok(Confirmation::ok("Actor deleted"))
}

/// GET /actors/movies?actor_name= - Filmography of one actor
pub async fn movies(State(state): State<AppState>, query: QueryPairs) -> ApiResult<Json<Vec<Movie>>> {
    let params = QueryParams::from_request(query)?;
    let movies = state
        .catalog
        .list_movies_by_actor(params.first("actor_name"))
        .await?;
    Ok(Json(movies))
}
