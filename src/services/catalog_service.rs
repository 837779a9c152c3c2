use std::sync::Arc;

use crate::database::models::{
    Actor, ActorChanges, ActorRequest, Movie, MovieChanges, MovieRequest, NewActor, NewMovie,
};
use crate::database::{CatalogRepository, DatabaseError, QueryBuildError};
use crate::error::ApiError;
use crate::filter::MovieSort;
use crate::types::parse_release_date;

/// Catalog operations invoked by the HTTP layer.
///
/// Each operation validates its input, makes exactly one repository call and
/// classifies failures as `InvalidInput` or `StorageError`.
#[derive(Clone)]
pub struct CatalogService {
    repository: Arc<dyn CatalogRepository>,
}

impl CatalogService {
    pub fn new(repository: Arc<dyn CatalogRepository>) -> Self {
        Self { repository }
    }

    pub async fn add_actor(&self, request: ActorRequest) -> Result<i32, ApiError> {
        if request.name.is_empty() {
            return Err(invalid("add_actor", "Actor name is required"));
        }

        let actor = NewActor {
            name: request.name,
            gender: request.gender,
            birthdate: request.birthdate,
        };
        let id = self
            .repository
            .add_actor(&actor)
            .await
            .map_err(|e| ApiError::from_storage("add_actor", "Failed to add actor", e))?;

        tracing::info!(actor_id = id, name = %actor.name, "Actor added");
        Ok(id)
    }

    pub async fn update_actor(&self, request: ActorRequest) -> Result<u64, ApiError> {
        let changes = ActorChanges::from(request);
        let update = changes
            .to_update()
            .map_err(|e| rejected_update("update_actor", e))?;

        let affected = self
            .repository
            .apply_update(&update)
            .await
            .map_err(|e| ApiError::from_storage("update_actor", "Failed to update actor", e))?;

        tracing::info!(actor_id = changes.id, fields = ?update.columns(), affected, "Actor updated");
        Ok(affected)
    }

    pub async fn delete_actor(&self, raw_id: Option<&str>) -> Result<i32, ApiError> {
        let id = parse_id(raw_id).ok_or_else(|| invalid("delete_actor", "Invalid actor id"))?;

        let affected = self
            .repository
            .delete_actor(id)
            .await
            .map_err(|e| ApiError::from_storage("delete_actor", "Failed to delete actor", e))?;

        tracing::info!(actor_id = id, affected, "Actor deleted");
        Ok(id)
    }

    pub async fn add_movie(&self, request: MovieRequest) -> Result<i32, ApiError> {
        if request.title.is_empty() || request.release_date.is_empty() {
            return Err(invalid("add_movie", "Movie title and release date are required"));
        }
        let release_date = parse_release_date(&request.release_date).map_err(|e| {
            tracing::info!(operation = "add_movie", error = %e, "Rejected release date");
            ApiError::invalid_input("Invalid release date format, expected YYYY.MM.DD")
        })?;

        let movie = NewMovie {
            title: request.title,
            description: request.description,
            release_date,
            rating: request.rating,
        };
        let id = self
            .repository
            .add_movie(&movie)
            .await
            .map_err(|e| ApiError::from_storage("add_movie", "Failed to add movie", e))?;

        tracing::info!(movie_id = id, title = %movie.title, "Movie added");
        Ok(id)
    }

    pub async fn update_movie(&self, request: MovieRequest) -> Result<u64, ApiError> {
        if request.id == 0 {
            return Err(invalid("update_movie", "Movie id is required for update"));
        }

        let release_date = if request.release_date.is_empty() {
            None
        } else {
            let date = parse_release_date(&request.release_date).map_err(|e| {
                tracing::info!(operation = "update_movie", movie_id = request.id, error = %e, "Rejected release date");
                ApiError::invalid_input("Invalid release date format, expected YYYY.MM.DD")
            })?;
            Some(date)
        };

        let changes = MovieChanges {
            id: request.id,
            title: request.title,
            description: request.description,
            release_date,
            rating: request.rating,
        };
        let update = changes
            .to_update()
            .map_err(|e| rejected_update("update_movie", e))?;

        let affected = self
            .repository
            .apply_update(&update)
            .await
            .map_err(|e| ApiError::from_storage("update_movie", "Failed to update movie", e))?;

        tracing::info!(movie_id = changes.id, fields = ?update.columns(), affected, "Movie updated");
        Ok(affected)
    }

    pub async fn delete_movie(&self, raw_id: Option<&str>) -> Result<i32, ApiError> {
        let id = parse_id(raw_id).ok_or_else(|| invalid("delete_movie", "Invalid movie id"))?;
        if id == 0 {
            return Err(invalid("delete_movie", "Movie id is required for delete"));
        }

        let affected = self
            .repository
            .delete_movie(id)
            .await
            .map_err(|e| ApiError::from_storage("delete_movie", "Failed to delete movie", e))?;

        tracing::info!(movie_id = id, affected, "Movie deleted");
        Ok(id)
    }

    /// Validate the `movie_id` of a cast link. Checked before the body is decoded.
    pub fn link_movie_id(raw_movie_id: Option<&str>) -> Result<i32, ApiError> {
        parse_id(raw_movie_id).ok_or_else(|| invalid("link_movie_actor", "Invalid movie id"))
    }

    pub async fn link_movie_actor(&self, movie_id: i32, actor_id: i32) -> Result<(), ApiError> {
        self.repository
            .link_movie_actor(movie_id, actor_id)
            .await
            .map_err(|e| {
                ApiError::from_storage("link_movie_actor", "Failed to update movie cast", e)
            })?;

        tracing::info!(movie_id, actor_id, "Actor linked to movie");
        Ok(())
    }

    pub async fn search_movies_by_actor(&self, actor_name: Option<&str>) -> Result<Vec<Movie>, ApiError> {
        let name = required_name("search_movies_by_actor", actor_name)?;
        let movies = self.movies_by_actor(name).await.map_err(|e| {
            ApiError::from_storage("search_movies_by_actor", "Failed to search movies by actor", e)
        })?;

        tracing::debug!(actor_name = name, count = movies.len(), "Movies found by actor");
        Ok(movies)
    }

    pub async fn search_movies(
        &self,
        title_fragment: Option<&str>,
        actor_name_fragment: Option<&str>,
    ) -> Result<Vec<Movie>, ApiError> {
        let title = title_fragment.unwrap_or("");
        let actor = actor_name_fragment.unwrap_or("");
        if title.is_empty() && actor.is_empty() {
            return Err(invalid(
                "search_movies",
                "A title fragment or an actor name fragment is required",
            ));
        }

        let movies = self
            .repository
            .search_movies(title, actor)
            .await
            .map_err(|e| ApiError::from_storage("search_movies", "Failed to search movies", e))?;

        tracing::debug!(title, actor, count = movies.len(), "Movies found by fragment");
        Ok(movies)
    }

    pub async fn list_movies(&self, sort: MovieSort) -> Result<Vec<Movie>, ApiError> {
        let movies = self
            .repository
            .list_movies(sort)
            .await
            .map_err(|e| ApiError::from_storage("list_movies", "Failed to list movies", e))?;

        tracing::debug!(sort = ?sort, count = movies.len(), "Movies listed");
        Ok(movies)
    }

    pub async fn list_actors(&self) -> Result<Vec<Actor>, ApiError> {
        let actors = self
            .repository
            .list_actors()
            .await
            .map_err(|e| ApiError::from_storage("list_actors", "Failed to list actors", e))?;

        tracing::debug!(count = actors.len(), "Actors listed");
        Ok(actors)
    }

    pub async fn list_movies_by_actor(&self, actor_name: Option<&str>) -> Result<Vec<Movie>, ApiError> {
        let name = required_name("list_movies_by_actor", actor_name)?;
        let movies = self.movies_by_actor(name).await.map_err(|e| {
            ApiError::from_storage("list_movies_by_actor", "Failed to list movies by actor", e)
        })?;

        tracing::debug!(actor_name = name, count = movies.len(), "Actor filmography listed");
        Ok(movies)
    }

    pub async fn health_check(&self) -> Result<(), DatabaseError> {
        self.repository.health_check().await
    }

    async fn movies_by_actor(&self, name: &str) -> Result<Vec<Movie>, DatabaseError> {
        self.repository.movies_by_actor(name).await
    }
}

fn parse_id(raw: Option<&str>) -> Option<i32> {
    raw.and_then(|s| s.parse().ok())
}

fn required_name<'a>(operation: &'static str, name: Option<&'a str>) -> Result<&'a str, ApiError> {
    match name {
        Some(name) if !name.is_empty() => Ok(name),
        _ => Err(invalid(operation, "Actor name is required")),
    }
}

fn invalid(operation: &'static str, message: &'static str) -> ApiError {
    tracing::info!(operation, message, "Rejected invalid input");
    ApiError::invalid_input(message)
}

fn rejected_update(operation: &'static str, err: QueryBuildError) -> ApiError {
    tracing::info!(operation, error = %err, "Rejected update");
    match err {
        QueryBuildError::MissingId { .. } => ApiError::invalid_input("Id is required for update"),
        QueryBuildError::EmptyWriteSet { .. } => {
            ApiError::invalid_input("At least one field must be provided for update")
        }
    }
}
