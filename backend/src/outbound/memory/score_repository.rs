//! In-memory `ScoreRepository` implementation.

use async_trait::async_trait;

use crate::domain::ports::{ScoreRepository, ScoreRepositoryError};
use crate::domain::{Movie, Score};

use super::store::{InMemoryStore, StoreFailure};

/// Score half of the in-memory gateway.
///
/// The movie is rebuilt, the score upserted onto it, and the row written
/// under one lock, so concurrent scorers of the same movie never overwrite
/// each other.
#[derive(Debug, Clone)]
pub struct InMemoryScoreRepository {
    store: InMemoryStore,
}

impl InMemoryScoreRepository {
    /// Create a repository over `store`.
    pub fn new(store: InMemoryStore) -> Self {
        Self { store }
    }
}

fn map_store_failure(failure: StoreFailure) -> ScoreRepositoryError {
    match failure {
        StoreFailure::Offline => ScoreRepositoryError::connection("store offline"),
        StoreFailure::Poisoned => ScoreRepositoryError::query("store lock poisoned"),
    }
}

#[async_trait]
impl ScoreRepository for InMemoryScoreRepository {
    async fn save_and_flush(&self, score: &Score) -> Result<Movie, ScoreRepositoryError> {
        let movie_id = score.movie_id();
        let user_id = score.user_id();
        self.store
            .write(|state| -> Result<Movie, ScoreRepositoryError> {
                if !state.users.contains_key(&user_id) {
                    return Err(ScoreRepositoryError::user_not_found(user_id));
                }
                let mut movie = state
                    .movie(movie_id)
                    .ok_or_else(|| ScoreRepositoryError::movie_not_found(movie_id))?;
                let stored = movie.record_score(user_id, score.value());
                state.scores.insert((movie_id, user_id), stored.value());
                Ok(movie)
            })
            .map_err(map_store_failure)?
    }
}
