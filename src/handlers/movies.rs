// handlers/movies.rs - /movies/* handlers

use axum::{body::Bytes, extract::State, response::Json};

use crate::api::AppState;
use crate::database::models::{Movie, MovieRequest};
use crate::filter::MovieSort;
use crate::middleware::{ApiResult, Confirmation};
use crate::services::CatalogService;

use super::{parse_json, QueryPairs, QueryParams};

/// GET /movies?sort_by=&sort_order= - List all movies, sorted
///
/// `sort_by` is title, rating or release_date; `sort_order` is asc or desc.
/// Anything else falls back to rating, desc.
pub async fn list(State(state): State<AppState>, query: QueryPairs) -> ApiResult<Json<Vec<Movie>>> {
    let params = QueryParams::from_request(query)?;
    let sort = MovieSort::from_params(params.first("sort_by"), params.first("sort_order"));
    Ok(Json(state.catalog.list_movies(sort).await?))
}

/// POST /movies/add - Create a movie from a JSON body
pub async fn add(State(state): State<AppState>, body: Bytes) -> ApiResult<Confirmation> {
    let request: MovieRequest = parse_json(&body)?;
    state.catalog.add_movie(request).await?;
    Ok(Confirmation::created("Movie added"))
}

/// POST /movies/update - Change the provided fields of an existing movie
pub async fn update(State(state): State<AppState>, body: Bytes) -> ApiResult<Confirmation> {
    let request: MovieRequest = parse_json(&body)?;
    state.catalog.update_movie(request).await?;
    Ok(Confirmation::ok("Movie updated"))
}

/// GET|DELETE /movies/delete?id= - Remove a movie and its cast links
pub async fn delete(State(state): State<AppState>, query: QueryPairs) -> ApiResult<Confirmation> {
    let params = QueryParams::from_request(query)?;
    state.catalog.delete_movie(params.first("id")).await?;
    Ok(Confirmation::ok("Movie deleted"))
}

/// POST /movies/update_actors?movie_id= - Link an actor (bare integer body) to a movie
pub async fn update_actors(
    State(state): State<AppState>,
    query: QueryPairs,
    body: Bytes,
) -> ApiResult<Confirmation> {
    let params = QueryParams::from_request(query)?;
    let movie_id = CatalogService::link_movie_id(params.first("movie_id"))?;
    let actor_id: i32 = parse_json(&body)?;
    state.catalog.link_movie_actor(movie_id, actor_id).await?;
    Ok(Confirmation::ok("Movie cast updated"))
}

/// GET /movies/search?title_fragment=&actor_name_fragment= - Substring search over titles and actor names
pub async fn search(State(state): State<AppState>, query: QueryPairs) -> ApiResult<Json<Vec<Movie>>> {
    let params = QueryParams::from_request(query)?;
    let movies = state
        .catalog
        .search_movies(params.first("title_fragment"), params.first("actor_name_fragment"))
        .await?;
    Ok(Json(movies))
}

/// GET /movies/search_by_actor?actor_name= - Movies featuring an actor, exact name
pub async fn search_by_actor(
    State(state): State<AppState>,
    query: QueryPairs,
) -> ApiResult<Json<Vec<Movie>>> {
    let params = QueryParams::from_request(query)?;
    let movies = state
        .catalog
        .search_movies_by_actor(params.first("actor_name"))
        .await?;
    Ok(Json(movies))
}
