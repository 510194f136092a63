//! In-memory `MovieRepository` implementation.

use async_trait::async_trait;
use pagination::{Page, PageRequest};
use tracing::debug;

use crate::domain::ports::{MovieRepository, MovieRepositoryError};
use crate::domain::{Movie, MovieDetails, MovieId};

use super::store::{InMemoryStore, StoreFailure};

/// Catalogue half of the in-memory gateway.
#[derive(Debug, Clone)]
pub struct InMemoryMovieRepository {
    store: InMemoryStore,
}

impl InMemoryMovieRepository {
    /// Create a repository over `store`.
    pub fn new(store: InMemoryStore) -> Self {
        Self { store }
    }
}

fn map_store_failure(failure: StoreFailure) -> MovieRepositoryError {
    match failure {
        StoreFailure::Offline => MovieRepositoryError::connection("store offline"),
        StoreFailure::Poisoned => MovieRepositoryError::query("store lock poisoned"),
    }
}

#[async_trait]
impl MovieRepository for InMemoryMovieRepository {
    async fn find_by_id(&self, id: MovieId) -> Result<Option<Movie>, MovieRepositoryError> {
        self.store
            .read(|state| state.movie(id))
            .map_err(map_store_failure)
    }

    async fn exists_by_id(&self, id: MovieId) -> Result<bool, MovieRepositoryError> {
        self.store
            .read(|state| state.movies.contains_key(&id))
            .map_err(map_store_failure)
    }

    async fn get_reference_by_id(&self, id: MovieId) -> Result<Movie, MovieRepositoryError> {
        self.store
            .read(|state| state.movie(id))
            .map_err(map_store_failure)?
            .ok_or_else(|| MovieRepositoryError::entity_not_found(id))
    }

    async fn insert(&self, details: &MovieDetails) -> Result<Movie, MovieRepositoryError> {
        self.store
            .write(|state| state.insert_movie(details.clone()))
            .map_err(map_store_failure)?
            .map_err(|err| MovieRepositoryError::query(err.to_string()))
    }

    async fn save(&self, movie: &Movie) -> Result<Movie, MovieRepositoryError> {
        let id = movie.id();
        self.store
            .write(|state| {
                let details = state.movies.get_mut(&id)?;
                *details = movie.details().clone();
                state.movie(id)
            })
            .map_err(map_store_failure)?
            .ok_or_else(|| MovieRepositoryError::entity_not_found(id))
    }

    async fn delete_by_id(&self, id: MovieId) -> Result<(), MovieRepositoryError> {
        self.store
            .write(|state| {
                if !state.movies.contains_key(&id) {
                    return Err(MovieRepositoryError::entity_not_found(id));
                }
                if state.has_scores(id) {
                    return Err(MovieRepositoryError::integrity_violation(format!(
                        "scores still reference movie {id}"
                    )));
                }
                state.movies.remove(&id);
                Ok(())
            })
            .map_err(map_store_failure)?
    }

    async fn search_by_title(
        &self,
        title: &str,
        request: PageRequest,
    ) -> Result<Page<Movie>, MovieRepositoryError> {
        let needle = title.to_lowercase();
        let page = self
            .store
            .read(|state| {
                let matches: Vec<Movie> = state
                    .movies
                    .iter()
                    .filter(|(_, details)| details.title().to_lowercase().contains(&needle))
                    .filter_map(|(&id, _)| state.movie(id))
                    .collect();
                Page::from_ordered(matches, request)
            })
            .map_err(map_store_failure)?;
        debug!(
            title,
            total = page.total_elements(),
            returned = page.content().len(),
            "title search"
        );
        Ok(page)
    }
}
