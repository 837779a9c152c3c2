use async_trait::async_trait;
use sqlx::postgres::PgArguments;
use sqlx::PgPool;

use crate::database::manager::{self, DatabaseError};
use crate::database::models::{Actor, Movie, NewActor, NewMovie};
use crate::database::query_builder::{FieldValue, UpdateStatement};
use crate::database::repository::CatalogRepository;
use crate::filter::{contains_pattern, MovieSort};

const MOVIE_COLUMNS: &str = "id, title, description, release_date, rating";

/// PostgreSQL-backed catalog
#[derive(Clone)]
pub struct PgCatalogRepository {
    pool: PgPool,
}

impl PgCatalogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl CatalogRepository for PgCatalogRepository {
    async fn add_actor(&self, actor: &NewActor) -> Result<i32, DatabaseError> {
        let id = sqlx::query_scalar::<_, i32>(
            "INSERT INTO actors (name, gender, birthdate) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(&actor.name)
        .bind(&actor.gender)
        .bind(actor.birthdate)
        .fetch_one(&self.pool)
        .await?;
        Ok(id)
    }

    async fn delete_actor(&self, id: i32) -> Result<u64, DatabaseError> {
        let result = sqlx::query("DELETE FROM actors WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    async fn list_actors(&self) -> Result<Vec<Actor>, DatabaseError> {
        let actors = sqlx::query_as::<_, Actor>(
            "SELECT id, name, gender, birthdate FROM actors ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(actors)
    }

    async fn add_movie(&self, movie: &NewMovie) -> Result<i32, DatabaseError> {
        let id = sqlx::query_scalar::<_, i32>(
            "INSERT INTO movies (title, description, release_date, rating) \
             VALUES ($1, $2, $3, $4) RETURNING id",
        )
        .bind(&movie.title)
        .bind(&movie.description)
        .bind(movie.release_date)
        .bind(movie.rating)
        .fetch_one(&self.pool)
        .await?;
        Ok(id)
    }

    async fn delete_movie(&self, id: i32) -> Result<u64, DatabaseError> {
        let result = sqlx::query("DELETE FROM movies WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    async fn list_movies(&self, sort: MovieSort) -> Result<Vec<Movie>, DatabaseError> {
        // order_by_clause only yields static fragments
        let query = format!("SELECT {} FROM movies {}", MOVIE_COLUMNS, sort.order_by_clause());
        let movies = sqlx::query_as::<_, Movie>(&query)
            .fetch_all(&self.pool)
            .await?;
        Ok(movies)
    }

    async fn link_movie_actor(&self, movie_id: i32, actor_id: i32) -> Result<(), DatabaseError> {
        sqlx::query("INSERT INTO movie_actors (movie_id, actor_id) VALUES ($1, $2)")
            .bind(movie_id)
            .bind(actor_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn movies_by_actor(&self, actor_name: &str) -> Result<Vec<Movie>, DatabaseError> {
        let movies = sqlx::query_as::<_, Movie>(
            r#"
            SELECT DISTINCT m.id, m.title, m.description, m.release_date, m.rating
            FROM movies m
            INNER JOIN movie_actors ma ON m.id = ma.movie_id
            INNER JOIN actors a ON ma.actor_id = a.id
            WHERE a.name = $1
            ORDER BY m.id
            "#,
        )
        .bind(actor_name)
        .fetch_all(&self.pool)
        .await?;
        Ok(movies)
    }

    async fn search_movies(
        &self,
        title_fragment: &str,
        actor_fragment: &str,
    ) -> Result<Vec<Movie>, DatabaseError> {
        // A NULL pattern never matches, which drops empty fragments from the OR
        let movies = sqlx::query_as::<_, Movie>(
            r#"
            SELECT DISTINCT m.id, m.title, m.description, m.release_date, m.rating
            FROM movies m
            LEFT JOIN movie_actors ma ON m.id = ma.movie_id
            LEFT JOIN actors a ON ma.actor_id = a.id
            WHERE m.title LIKE $1 OR a.name LIKE $2
            ORDER BY m.id
            "#,
        )
        .bind(contains_pattern(title_fragment))
        .bind(contains_pattern(actor_fragment))
        .fetch_all(&self.pool)
        .await?;
        Ok(movies)
    }

    async fn apply_update(&self, update: &UpdateStatement) -> Result<u64, DatabaseError> {
        let sql = update.to_sql();
        tracing::debug!(
            table = update.table().name(),
            id = update.id(),
            columns = ?update.columns(),
            "Applying partial update"
        );

        let mut q = sqlx::query(&sql);
        for (_, value) in update.assignments() {
            q = bind_field(q, value);
        }
        let result = q.bind(update.id()).execute(&self.pool).await?;
        Ok(result.rows_affected())
    }

    async fn health_check(&self) -> Result<(), DatabaseError> {
        manager::health_check(&self.pool).await
    }
}

fn bind_field<'q>(
    q: sqlx::query::Query<'q, sqlx::Postgres, PgArguments>,
    value: &'q FieldValue,
) -> sqlx::query::Query<'q, sqlx::Postgres, PgArguments> {
    match value {
        FieldValue::Text(s) => q.bind(s.as_str()),
        FieldValue::Date(d) => q.bind(*d),
        FieldValue::Float(f) => q.bind(*f),
    }
}
