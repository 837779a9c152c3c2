use std::collections::{BTreeMap, BTreeSet};
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::database::manager::DatabaseError;
use crate::database::models::{Actor, Movie, NewActor, NewMovie};
use crate::database::query_builder::{CatalogTable, FieldValue, UpdateStatement};
use crate::database::repository::CatalogRepository;
use crate::filter::MovieSort;

#[derive(Debug, Default)]
struct CatalogData {
    movies: BTreeMap<i32, Movie>,
    actors: BTreeMap<i32, Actor>,
    // duplicates are kept, as with an unconstrained link table
    links: Vec<(i32, i32)>,
    last_movie_id: i32,
    last_actor_id: i32,
}

impl CatalogData {
    fn movies_where(&self, mut matches: impl FnMut(&Movie, &[&Actor]) -> bool) -> Vec<Movie> {
        self.movies
            .values()
            .filter(|movie| {
                let cast: Vec<&Actor> = self
                    .links
                    .iter()
                    .filter(|(movie_id, _)| *movie_id == movie.id)
                    .filter_map(|(_, actor_id)| self.actors.get(actor_id))
                    .collect();
                matches(movie, &cast)
            })
            .cloned()
            .collect()
    }
}

/// In-process catalog with the same observable semantics as the PostgreSQL
/// repository: serial ids, cascading link removal, foreign-key checks on link.
#[derive(Debug, Default)]
pub struct MemoryCatalog {
    data: RwLock<CatalogData>,
    calls: AtomicUsize,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of repository calls served so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Distinct actor ids linked to a movie.
    pub async fn cast_of(&self, movie_id: i32) -> BTreeSet<i32> {
        let data = self.data.read().await;
        data.links
            .iter()
            .filter(|(m, _)| *m == movie_id)
            .map(|(_, a)| *a)
            .collect()
    }

    fn record_call(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl CatalogRepository for MemoryCatalog {
    async fn add_actor(&self, actor: &NewActor) -> Result<i32, DatabaseError> {
        self.record_call();
        let mut data = self.data.write().await;
        data.last_actor_id += 1;
        let id = data.last_actor_id;
        data.actors.insert(
            id,
            Actor {
                id,
                name: actor.name.clone(),
                gender: actor.gender.clone(),
                birthdate: actor.birthdate,
            },
        );
        Ok(id)
    }

    async fn delete_actor(&self, id: i32) -> Result<u64, DatabaseError> {
        self.record_call();
        let mut data = self.data.write().await;
        let removed = data.actors.remove(&id).is_some();
        data.links.retain(|(_, actor_id)| *actor_id != id);
        Ok(u64::from(removed))
    }

    async fn list_actors(&self) -> Result<Vec<Actor>, DatabaseError> {
        self.record_call();
        let data = self.data.read().await;
        Ok(data.actors.values().cloned().collect())
    }

    async fn add_movie(&self, movie: &NewMovie) -> Result<i32, DatabaseError> {
        self.record_call();
        let mut data = self.data.write().await;
        data.last_movie_id += 1;
        let id = data.last_movie_id;
        data.movies.insert(
            id,
            Movie {
                id,
                title: movie.title.clone(),
                description: movie.description.clone(),
                release_date: movie.release_date,
                rating: movie.rating,
            },
        );
        Ok(id)
    }

    async fn delete_movie(&self, id: i32) -> Result<u64, DatabaseError> {
        self.record_call();
        let mut data = self.data.write().await;
        let removed = data.movies.remove(&id).is_some();
        data.links.retain(|(movie_id, _)| *movie_id != id);
        Ok(u64::from(removed))
    }

    async fn list_movies(&self, sort: MovieSort) -> Result<Vec<Movie>, DatabaseError> {
        self.record_call();
        let data = self.data.read().await;
        let mut movies: Vec<Movie> = data.movies.values().cloned().collect();
        movies.sort_by(|a, b| sort.compare(a, b));
        Ok(movies)
    }

    async fn link_movie_actor(&self, movie_id: i32, actor_id: i32) -> Result<(), DatabaseError> {
        self.record_call();
        let mut data = self.data.write().await;
        if !data.movies.contains_key(&movie_id) {
            return Err(DatabaseError::Constraint(format!("movie {} does not exist", movie_id)));
        }
        if !data.actors.contains_key(&actor_id) {
            return Err(DatabaseError::Constraint(format!("actor {} does not exist", actor_id)));
        }
        data.links.push((movie_id, actor_id));
        Ok(())
    }

    async fn movies_by_actor(&self, actor_name: &str) -> Result<Vec<Movie>, DatabaseError> {
        self.record_call();
        let data = self.data.read().await;
        Ok(data.movies_where(|_, cast| cast.iter().any(|a| a.name == actor_name)))
    }

    async fn search_movies(
        &self,
        title_fragment: &str,
        actor_fragment: &str,
    ) -> Result<Vec<Movie>, DatabaseError> {
        self.record_call();
        let data = self.data.read().await;
        Ok(data.movies_where(|movie, cast| {
            let by_title = !title_fragment.is_empty() && movie.title.contains(title_fragment);
            let by_actor = !actor_fragment.is_empty()
                && cast.iter().any(|a| a.name.contains(actor_fragment));
            by_title || by_actor
        }))
    }

    async fn apply_update(&self, update: &UpdateStatement) -> Result<u64, DatabaseError> {
        self.record_call();
        let mut data = self.data.write().await;
        let id = update.id();

        match update.table() {
            CatalogTable::Movies => {
                let Some(movie) = data.movies.get_mut(&id) else {
                    return Ok(0);
                };
                let mut next = movie.clone();
                for (column, value) in update.assignments() {
                    match (*column, value) {
                        ("title", FieldValue::Text(v)) => next.title = v.clone(),
                        ("description", FieldValue::Text(v)) => next.description = v.clone(),
                        ("release_date", FieldValue::Date(v)) => next.release_date = *v,
                        ("rating", FieldValue::Float(v)) => next.rating = *v,
                        (column, value) => return Err(unsupported("movies", column, value)),
                    }
                }
                *movie = next;
            }
            CatalogTable::Actors => {
                let Some(actor) = data.actors.get_mut(&id) else {
                    return Ok(0);
                };
                let mut next = actor.clone();
                for (column, value) in update.assignments() {
                    match (*column, value) {
                        ("name", FieldValue::Text(v)) => next.name = v.clone(),
                        ("gender", FieldValue::Text(v)) => next.gender = v.clone(),
                        ("birthdate", FieldValue::Date(v)) => next.birthdate = Some(*v),
                        (column, value) => return Err(unsupported("actors", column, value)),
                    }
                }
                *actor = next;
            }
        }
        Ok(1)
    }

    async fn health_check(&self) -> Result<(), DatabaseError> {
        Ok(())
    }
}

fn unsupported(table: &str, column: &str, value: &FieldValue) -> DatabaseError {
    DatabaseError::QueryError(format!(
        "cannot assign {:?} to column \"{}\" of \"{}\"",
        value, column, table
    ))
}
