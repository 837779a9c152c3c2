use async_trait::async_trait;

use crate::database::manager::DatabaseError;
use crate::database::models::{Actor, Movie, NewActor, NewMovie};
use crate::database::query_builder::UpdateStatement;
use crate::filter::MovieSort;

/// Persistence seam for catalog operations.
///
/// Every method is a single storage call. Update and delete report the number
/// of affected rows; zero is not an error.
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    async fn add_actor(&self, actor: &NewActor) -> Result<i32, DatabaseError>;

    async fn delete_actor(&self, id: i32) -> Result<u64, DatabaseError>;

    async fn list_actors(&self) -> Result<Vec<Actor>, DatabaseError>;

    async fn add_movie(&self, movie: &NewMovie) -> Result<i32, DatabaseError>;

    async fn delete_movie(&self, id: i32) -> Result<u64, DatabaseError>;

    async fn list_movies(&self, sort: MovieSort) -> Result<Vec<Movie>, DatabaseError>;

    async fn link_movie_actor(&self, movie_id: i32, actor_id: i32) -> Result<(), DatabaseError>;

    /// Movies featuring an actor whose name matches exactly, ordered by id.
    async fn movies_by_actor(&self, actor_name: &str) -> Result<Vec<Movie>, DatabaseError>;

    /// Distinct movies whose title contains `title_fragment` or that feature
    /// an actor whose name contains `actor_fragment`. Empty fragments are
    /// ignored; matching is case-sensitive.
    async fn search_movies(
        &self,
        title_fragment: &str,
        actor_fragment: &str,
    ) -> Result<Vec<Movie>, DatabaseError>;

    async fn apply_update(&self, update: &UpdateStatement) -> Result<u64, DatabaseError>;

    async fn health_check(&self) -> Result<(), DatabaseError>;
}
